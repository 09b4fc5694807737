//! Render configuration and config file handling for ascii-filter.
//!
//! Loads configuration from `<config dir>/ascii-filter/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

/// Side length of a cell in pixels. Every glyph covers exactly one cell.
pub const CELL_SIZE: usize = 8;

/// Default Gaussian kernel size for the edge detector.
pub const DEFAULT_EDGE_KERNEL_SIZE: usize = 3;

/// Largest accepted Gaussian kernel size.
pub const MAX_EDGE_KERNEL_SIZE: usize = 31;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// How glyphs are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Every glyph gets the same color
    Fixed(Rgb),
    /// Each glyph gets the average color of the cell it covers
    SampleOriginal,
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Fixed(Rgb::WHITE)
    }
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    /// Parse `R,G,B` or `original`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "original" => return Ok(ColorMode::SampleOriginal),
            _ => {}
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        let mut channels = [0u8; 3];
        for (channel, part) in channels.iter_mut().zip(&parts) {
            *channel = part
                .parse()
                .map_err(|_| ConfigError::InvalidColor(s.to_string()))?;
        }
        Ok(ColorMode::Fixed(Rgb::from(channels)))
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorMode::Fixed(c) => write!(f, "{},{},{}", c.r, c.g, c.b),
            ColorMode::SampleOriginal => write!(f, "original"),
        }
    }
}

/// Resampling kernel used by the scaler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Unweighted mean over each output pixel's source footprint
    #[default]
    Area,
    /// Bilinear interpolation with pixel-center alignment
    Bilinear,
}

/// Settings consumed by [`crate::ascii::AsciiRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub color_mode: ColorMode,
    /// Gaussian blur kernel size used before edge extraction (odd, at most
    /// [`MAX_EDGE_KERNEL_SIZE`])
    pub edge_kernel_size: usize,
    pub interpolation: Interpolation,
    /// Worker threads; `None` uses the global pool sized to the machine
    pub threads: Option<usize>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::default(),
            edge_kernel_size: DEFAULT_EDGE_KERNEL_SIZE,
            interpolation: Interpolation::default(),
            threads: None,
        }
    }
}

impl FilterConfig {
    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.edge_kernel_size % 2 == 0 || self.edge_kernel_size > MAX_EDGE_KERNEL_SIZE {
            return Err(ConfigError::InvalidKernelSize(self.edge_kernel_size));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::InvalidThreadCount);
        }
        Ok(())
    }
}

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct RenderConfig {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub edge_kernel_size: Option<usize>,
    #[serde(default)]
    pub interpolation: Option<Interpolation>,
    #[serde(default)]
    pub threads: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
pub struct InputConfig {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Build a validated [`FilterConfig`] from the `[render]` section.
    pub fn filter_config(&self) -> Result<FilterConfig, ConfigError> {
        let defaults = FilterConfig::default();
        let color_mode = match &self.render.color {
            Some(s) => s.parse()?,
            None => defaults.color_mode,
        };
        let config = FilterConfig {
            color_mode,
            edge_kernel_size: self
                .render
                .edge_kernel_size
                .unwrap_or(defaults.edge_kernel_size),
            interpolation: self.render.interpolation.unwrap_or_default(),
            threads: self.render.threads,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("ascii-filter").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".config/ascii-filter/config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_color_mode_parse_fixed() {
        let mode: ColorMode = "255, 128,0".parse().unwrap();
        assert_eq!(mode, ColorMode::Fixed(Rgb::new(255, 128, 0)));
    }

    #[test]
    fn test_color_mode_parse_original() {
        assert_eq!(
            "original".parse::<ColorMode>().unwrap(),
            ColorMode::SampleOriginal
        );
        assert_eq!(
            " ORIGINAL ".parse::<ColorMode>().unwrap(),
            ColorMode::SampleOriginal
        );
    }

    #[test]
    fn test_color_mode_parse_rejects_out_of_range() {
        assert!("256,0,0".parse::<ColorMode>().is_err());
        assert!("-1,0,0".parse::<ColorMode>().is_err());
        assert!("1,2".parse::<ColorMode>().is_err());
        assert!("red".parse::<ColorMode>().is_err());
        assert!("sampled".parse::<ColorMode>().is_err());
    }

    #[test]
    fn test_color_mode_display_roundtrip() {
        let mode = ColorMode::Fixed(Rgb::new(1, 2, 3));
        assert_eq!(mode.to_string(), "1,2,3");
        assert_eq!(ColorMode::SampleOriginal.to_string(), "original");
    }

    #[test]
    fn test_filter_config_default() {
        let config = FilterConfig::default();
        assert_eq!(config.edge_kernel_size, 3);
        assert_eq!(config.interpolation, Interpolation::Area);
        assert_eq!(config.color_mode, ColorMode::Fixed(Rgb::WHITE));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_filter_config_rejects_even_kernel() {
        let config = FilterConfig {
            edge_kernel_size: 4,
            ..FilterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidKernelSize(4))
        ));
        let config = FilterConfig {
            edge_kernel_size: 0,
            ..FilterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_filter_config_kernel_size_limit() {
        let config = FilterConfig {
            edge_kernel_size: MAX_EDGE_KERNEL_SIZE,
            ..FilterConfig::default()
        };
        assert!(config.validate().is_ok());

        for size in [MAX_EDGE_KERNEL_SIZE + 2, 20_001, usize::MAX] {
            let config = FilterConfig {
                edge_kernel_size: size,
                ..FilterConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidKernelSize(s)) if s == size),
                "size {}",
                size
            );
        }
    }

    #[test]
    fn test_filter_config_rejects_zero_threads() {
        let config = FilterConfig {
            threads: Some(0),
            ..FilterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreadCount)
        ));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("missing.toml").as_path())).unwrap();
        assert!(config.render.color.is_none());
        assert_eq!(config.filter_config().unwrap(), FilterConfig::default());
    }

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[render]
color = "original"
edge_kernel_size = 5
interpolation = "bilinear"
threads = 2

[input]
width = 640
height = 480
format = "rgb24"
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.input.width, Some(640));
        assert_eq!(config.input.height, Some(480));
        let filter = config.filter_config().unwrap();
        assert_eq!(filter.color_mode, ColorMode::SampleOriginal);
        assert_eq!(filter.edge_kernel_size, 5);
        assert_eq!(filter.interpolation, Interpolation::Bilinear);
        assert_eq!(filter.threads, Some(2));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render\ncolor = ").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_filter_config_rejects_bad_color() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\ncolor = \"1,2,3,4\"").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert!(matches!(
            config.filter_config(),
            Err(ConfigError::InvalidColor(_))
        ));
    }
}
