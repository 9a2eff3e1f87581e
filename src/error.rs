use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrainError {
    #[error("Invalid grain configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid noise distribution: {0}")]
    Distribution(#[from] rand_distr::NormalError),
    #[error("Failed to allocate {bytes} bytes for the noise field")]
    Allocation { bytes: usize },
    #[error("Noise buffer holds {actual} pixels, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("Output directory does not exist: {}", .0.display())]
    MissingOutputDir(PathBuf),
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
}
