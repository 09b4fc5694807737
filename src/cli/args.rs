//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{InputFormat, InterpolationArg};
use crate::config::{ColorMode, Config, FilterConfig};
use crate::error::ConfigError;
use crate::frame::PixelFormat;

/// Render raw video frames as 8x8 character-art glyphs
#[derive(Parser, Debug)]
#[command(name = "ascii-filter")]
#[command(version, about = "Render raw video frames as character art", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Raw input frames (default: stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Frame size (WIDTHxHEIGHT, e.g., 640x480)
    #[arg(long, short = 's', value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Input pixel format
    #[arg(long, short = 'f')]
    pub format: Option<InputFormat>,

    /// Glyph color: R,G,B or 'original' to sample the input
    #[arg(long, value_parser = parse_color)]
    pub color: Option<ColorMode>,

    /// Gaussian kernel size for edge detection (odd, 1 to 31)
    #[arg(long, short = 'k')]
    pub kernel_size: Option<usize>,

    /// Worker threads (default: one per core)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Downscale interpolation
    #[arg(long)]
    pub interpolation: Option<InterpolationArg>,

    /// Emit glyph text instead of raw RGB frames
    #[arg(long)]
    pub text: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the resolved configuration
    Show,
    /// Create default config file
    Init,
}

/// Settings for a render run after merging CLI > config file > defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub filter: FilterConfig,
}

impl Args {
    /// Merge the CLI flags over the file configuration.
    pub fn resolve(&self, config: &Config) -> Result<RunSettings, ConfigError> {
        let mut filter = config.filter_config()?;
        if let Some(color) = self.color {
            filter.color_mode = color;
        }
        if let Some(kernel_size) = self.kernel_size {
            filter.edge_kernel_size = kernel_size;
        }
        if let Some(threads) = self.threads {
            filter.threads = Some(threads);
        }
        if let Some(interpolation) = self.interpolation {
            filter.interpolation = interpolation.into();
        }
        filter.validate()?;

        let (width, height) = match (self.size, config.input.width, config.input.height) {
            (Some(size), _, _) => size,
            (None, Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
            _ => return Err(ConfigError::MissingSize),
        };

        let format = match (self.format, &config.input.format) {
            (Some(format), _) => format.into(),
            (None, Some(name)) => PixelFormat::from_str(name)
                .ok_or_else(|| ConfigError::InvalidFormat(name.clone()))?,
            (None, None) => PixelFormat::default(),
        };

        Ok(RunSettings {
            width,
            height,
            format,
            filter,
        })
    }
}

/// Parse and validate frame size (WIDTHxHEIGHT format)
pub fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid size format '{}'. Use WIDTHxHEIGHT (e.g., 640x480)",
            s
        ));
    }
    let width: u32 = parts[0]
        .parse()
        .map_err(|_| format!("Invalid width '{}' in size", parts[0]))?;
    let height: u32 = parts[1]
        .parse()
        .map_err(|_| format!("Invalid height '{}' in size", parts[1]))?;
    if width == 0 || height == 0 {
        return Err("Frame width and height must be greater than 0".to_string());
    }
    Ok((width, height))
}

/// Parse a glyph color (R,G,B or 'original')
pub fn parse_color(s: &str) -> Result<ColorMode, String> {
    s.parse().map_err(|e: ConfigError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Interpolation, Rgb};

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["ascii-filter"]);
        assert!(args.input.is_none());
        assert!(args.output.is_none());
        assert!(args.size.is_none());
        assert!(args.format.is_none());
        assert!(args.color.is_none());
        assert!(args.kernel_size.is_none());
        assert!(args.threads.is_none());
        assert!(!args.text);
        assert!(args.config.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_args_size() {
        let args = Args::parse_from(["ascii-filter", "--size", "640x480"]);
        assert_eq!(args.size, Some((640, 480)));
        assert!(Args::try_parse_from(["ascii-filter", "--size", "640"]).is_err());
        assert!(Args::try_parse_from(["ascii-filter", "--size", "0x480"]).is_err());
    }

    #[test]
    fn test_args_color() {
        let args = Args::parse_from(["ascii-filter", "--color", "255,0,128"]);
        assert_eq!(args.color, Some(ColorMode::Fixed(Rgb::new(255, 0, 128))));

        let args = Args::parse_from(["ascii-filter", "--color", "original"]);
        assert_eq!(args.color, Some(ColorMode::SampleOriginal));

        assert!(Args::try_parse_from(["ascii-filter", "--color", "300,0,0"]).is_err());
    }

    #[test]
    fn test_args_format_values() {
        let args = Args::parse_from(["ascii-filter", "--format", "gray"]);
        assert_eq!(args.format, Some(InputFormat::Gray));

        let args = Args::parse_from(["ascii-filter", "-f", "rgb24"]);
        assert_eq!(args.format, Some(InputFormat::Rgb24));
    }

    #[test]
    fn test_args_config_subcommands() {
        let args = Args::parse_from(["ascii-filter", "config", "show"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));

        let args = Args::parse_from(["ascii-filter", "config", "init"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn test_resolve_cli_overrides_config() {
        let config: Config = toml::from_str(
            r#"
            [render]
            color = "original"
            edge_kernel_size = 5
            threads = 2

            [input]
            width = 320
            height = 240
            format = "gray"
            "#,
        )
        .unwrap();
        let args = Args::parse_from([
            "ascii-filter",
            "--color",
            "10,20,30",
            "--size",
            "64x48",
            "--interpolation",
            "bilinear",
        ]);

        let settings = args.resolve(&config).unwrap();
        assert_eq!((settings.width, settings.height), (64, 48));
        assert_eq!(settings.format, PixelFormat::Gray);
        assert_eq!(
            settings.filter.color_mode,
            ColorMode::Fixed(Rgb::new(10, 20, 30))
        );
        assert_eq!(settings.filter.edge_kernel_size, 5);
        assert_eq!(settings.filter.threads, Some(2));
        assert_eq!(settings.filter.interpolation, Interpolation::Bilinear);
    }

    #[test]
    fn test_resolve_requires_size() {
        let args = Args::parse_from(["ascii-filter"]);
        assert!(matches!(
            args.resolve(&Config::default()),
            Err(ConfigError::MissingSize)
        ));
    }

    #[test]
    fn test_resolve_rejects_even_kernel() {
        let args = Args::parse_from(["ascii-filter", "--size", "8x8", "-k", "4"]);
        assert!(matches!(
            args.resolve(&Config::default()),
            Err(ConfigError::InvalidKernelSize(4))
        ));
    }

    #[test]
    fn test_resolve_rejects_oversized_kernel() {
        let args = Args::parse_from(["ascii-filter", "--size", "8x8", "-k", "20001"]);
        assert!(matches!(
            args.resolve(&Config::default()),
            Err(ConfigError::InvalidKernelSize(20001))
        ));
    }
}
