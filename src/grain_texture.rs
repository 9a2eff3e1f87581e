use std::path::{Path, PathBuf};

use image::{GrayImage, ImageBuffer, ImageFormat, Luma, Rgba, RgbaImage};
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

use crate::config::GrainConfig;
use crate::error::GrainError;

const MAX_GRAY_LEVEL: f32 = 255.0;

/// Generate the grain texture described by `config`, drawing randomness from `rng`.
///
/// The same seeded `rng` always yields the same texture. The config is
/// validated by `sample_noise_field` before anything is allocated.
pub fn generate<R: Rng>(config: &GrainConfig, rng: &mut R) -> Result<RgbaImage, GrainError> {
    let noise = sample_noise_field(config, rng)?;
    let luminance = build_luminance(config, noise)?;
    let alpha = build_alpha(config);

    merge_channels(&luminance, &luminance, &luminance, &alpha)
}

/// Generate the texture and write it to `config.resolved_output_path()`.
///
/// Returns the path that was written.
pub fn generate_to_file(config: &GrainConfig) -> Result<PathBuf, GrainError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let texture = generate(config, &mut rng)?;
    let output_path = config.resolved_output_path();
    save_texture(&texture, &output_path)?;

    Ok(output_path)
}

/// Draw `width * height` gray levels from Normal(mean, stddev), row-major.
///
/// # Parameters
/// - `config`: Size and distribution of the grain.
/// - `rng`: Source of the base seed. Each row is rendered by its own `StdRng`
///   derived from that seed and the row index, so the result does not depend on
///   how rayon splits the work.
///
/// # Returns
/// One byte per pixel. Samples are truncated toward zero and saturated to `[0, 255]`.
pub fn sample_noise_field<R: Rng>(config: &GrainConfig, rng: &mut R) -> Result<Vec<u8>, GrainError> {
    config.validate()?;
    let normal_dist = Normal::new(config.mean, config.stddev)?;

    let len = config.pixel_count()?;
    let mut noise = Vec::new();
    noise
        .try_reserve_exact(len)
        .map_err(|_| GrainError::Allocation { bytes: len })?;
    noise.resize(len, 0u8);

    debug!(
        "sampling {}x{} noise field from N({}, {})",
        config.width, config.height, config.mean, config.stddev
    );

    let base_seed: u64 = rng.gen();

    noise
        .par_chunks_mut(config.width as usize)
        .enumerate()
        .for_each(|(row, pixels)| {
            let mut row_rng = StdRng::seed_from_u64(row_seed(base_seed, row as u64));
            for pixel in pixels.iter_mut() {
                *pixel = gray_level(normal_dist.sample(&mut row_rng));
            }
        });

    Ok(noise)
}

/// Wrap a row-major noise field as a single-channel image.
pub fn build_luminance(config: &GrainConfig, noise: Vec<u8>) -> Result<GrayImage, GrainError> {
    let expected = config.pixel_count()?;
    let actual = noise.len();
    if actual != expected {
        return Err(GrainError::BufferSize { expected, actual });
    }

    ImageBuffer::from_raw(config.width, config.height, noise)
        .ok_or(GrainError::BufferSize { expected, actual })
}

/// Uniform single-channel image holding the overlay opacity.
pub fn build_alpha(config: &GrainConfig) -> GrayImage {
    let alpha = config.alpha_value();
    debug!("alpha channel value {alpha} (opacity {})", config.opacity_level);

    GrayImage::from_pixel(config.width, config.height, Luma([alpha]))
}

/// Compose four single-channel images into one RGBA image.
pub fn merge_channels(
    red: &GrayImage,
    green: &GrayImage,
    blue: &GrayImage,
    alpha: &GrayImage,
) -> Result<RgbaImage, GrainError> {
    let dimensions = red.dimensions();
    for channel in [green, blue, alpha] {
        if channel.dimensions() != dimensions {
            return Err(GrainError::DimensionMismatch {
                expected: dimensions,
                actual: channel.dimensions(),
            });
        }
    }

    let (width, height) = dimensions;
    Ok(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            red.get_pixel(x, y)[0],
            green.get_pixel(x, y)[0],
            blue.get_pixel(x, y)[0],
            alpha.get_pixel(x, y)[0],
        ])
    }))
}

/// Encode `texture` as PNG at `path`, replacing any existing file.
///
/// The parent directory must already exist.
pub fn save_texture(texture: &RgbaImage, path: &Path) -> Result<(), GrainError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(GrainError::MissingOutputDir(parent.to_path_buf()));
    }

    debug!("encoding {}x{} texture", texture.width(), texture.height());
    texture.save_with_format(path, ImageFormat::Png)?;
    info!("wrote grain texture to {}", path.display());

    Ok(())
}

fn gray_level(sample: f32) -> u8 {
    sample.trunc().clamp(0.0, MAX_GRAY_LEVEL) as u8
}

fn row_seed(base: u64, row: u64) -> u64 {
    base.wrapping_add(row)
}
