//! Film grain overlay texture generator.
//!
//! Samples a field of normally distributed gray levels, packs it into the
//! red, green and blue channels of an RGBA image with a constant alpha, and
//! writes the result as PNG.

pub mod config;
pub mod error;
pub mod grain_texture;

pub use config::GrainConfig;
pub use error::GrainError;
pub use grain_texture::{
    build_alpha, build_luminance, generate, generate_to_file, merge_channels, sample_noise_field,
    save_texture,
};
