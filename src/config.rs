use std::path::{Path, PathBuf};

use crate::error::GrainError;

const DEFAULT_SIZE: u32 = 1024;
const DEFAULT_MEAN: f32 = 127.0;
const DEFAULT_STDDEV: f32 = 20.0;
const DEFAULT_OPACITY_LEVEL: f32 = 0.25;
const DEFAULT_OUTPUT_PATH: &str = "public/grain.png";

#[derive(Debug, Clone)]
pub struct GrainConfig {
    pub width: u32,            // Width of the texture in pixels
    pub height: u32,           // Height of the texture in pixels
    pub mean: f32,             // Mean gray level of the grain
    pub stddev: f32,           // Standard deviation of the grain around the mean
    pub opacity_level: f32,    // Opacity of the overlay in [0, 1]
    pub base_dir: PathBuf,     // Directory the output path is resolved against
    pub output_path: PathBuf,  // Output file, relative to base_dir unless absolute
    pub seed: Option<u64>,     // Fixed seed for reproducible output, entropy when None
}

impl Default for GrainConfig {
    fn default() -> Self {
        GrainConfig {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            mean: DEFAULT_MEAN,
            stddev: DEFAULT_STDDEV,
            opacity_level: DEFAULT_OPACITY_LEVEL,
            base_dir: PathBuf::from("."),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            seed: None,
        }
    }
}

impl GrainConfig {
    /// Output path joined onto `base_dir`. Absolute output paths are kept as is.
    pub fn resolved_output_path(&self) -> PathBuf {
        if self.output_path.is_absolute() {
            self.output_path.clone()
        } else {
            self.base_dir.join(&self.output_path)
        }
    }

    /// Constant alpha byte, `floor(255 * opacity_level)`.
    pub fn alpha_value(&self) -> u8 {
        (255.0 * self.opacity_level).floor().clamp(0.0, 255.0) as u8
    }

    pub fn pixel_count(&self) -> Result<usize, GrainError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or_else(|| {
                GrainError::InvalidConfig(format!(
                    "texture size {}x{} does not fit in memory",
                    self.width, self.height
                ))
            })
    }

    pub fn validate(&self) -> Result<(), GrainError> {
        if self.width == 0 || self.height == 0 {
            return Err(GrainError::InvalidConfig(format!(
                "texture size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        self.pixel_count()?;
        if !self.mean.is_finite() {
            return Err(GrainError::InvalidConfig(format!(
                "mean must be finite, got {}",
                self.mean
            )));
        }
        if !self.stddev.is_finite() || self.stddev < 0.0 {
            return Err(GrainError::InvalidConfig(format!(
                "standard deviation must be finite and non-negative, got {}",
                self.stddev
            )));
        }
        if !(0.0..=1.0).contains(&self.opacity_level) {
            return Err(GrainError::InvalidConfig(format!(
                "opacity level must lie in [0, 1], got {}",
                self.opacity_level
            )));
        }
        Ok(())
    }

    pub fn with_base_dir(mut self, base_dir: impl AsRef<Path>) -> Self {
        self.base_dir = base_dir.as_ref().to_path_buf();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_fixed_constants() {
        let config = GrainConfig::default();
        assert_eq!((config.width, config.height), (1024, 1024));
        assert_eq!(config.mean, 127.0);
        assert_eq!(config.stddev, 20.0);
        assert_eq!(config.opacity_level, 0.25);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn alpha_value_floors_opacity() {
        let mut config = GrainConfig::default();
        assert_eq!(config.alpha_value(), 63);

        config.opacity_level = 1.0;
        assert_eq!(config.alpha_value(), 255);

        config.opacity_level = 0.0;
        assert_eq!(config.alpha_value(), 0);
    }

    #[test]
    fn output_path_resolves_against_base_dir() {
        let config = GrainConfig::default().with_base_dir("/srv/site");
        assert_eq!(
            config.resolved_output_path(),
            PathBuf::from("/srv/site/public/grain.png")
        );
    }

    #[test]
    fn absolute_output_path_ignores_base_dir() {
        let config = GrainConfig {
            output_path: PathBuf::from("/tmp/grain.png"),
            ..GrainConfig::default().with_base_dir("/srv/site")
        };
        assert_eq!(config.resolved_output_path(), PathBuf::from("/tmp/grain.png"));
    }

    #[test]
    fn pixel_count_is_width_times_height() {
        let config = GrainConfig {
            width: 3,
            height: 5,
            ..Default::default()
        };
        assert_eq!(config.pixel_count().unwrap(), 15);
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn oversized_texture_is_invalid() {
        let config = GrainConfig {
            width: u32::MAX,
            height: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(config.pixel_count(), Err(GrainError::InvalidConfig(_))));
        assert!(matches!(config.validate(), Err(GrainError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_invalid_values() {
        let zero_width = GrainConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_width.validate(),
            Err(GrainError::InvalidConfig(_))
        ));

        let negative_stddev = GrainConfig {
            stddev: -1.0,
            ..Default::default()
        };
        assert!(negative_stddev.validate().is_err());

        let nan_mean = GrainConfig {
            mean: f32::NAN,
            ..Default::default()
        };
        assert!(nan_mean.validate().is_err());

        let too_opaque = GrainConfig {
            opacity_level: 1.5,
            ..Default::default()
        };
        assert!(too_opaque.validate().is_err());

        let nan_opacity = GrainConfig {
            opacity_level: f32::NAN,
            ..Default::default()
        };
        assert!(nan_opacity.validate().is_err());
    }
}
