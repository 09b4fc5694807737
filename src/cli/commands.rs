//! Subcommand handlers for config actions.

use std::path::Path;

use super::args::{Args, ConfigAction};
use crate::config::{default_path as get_config_path, Config};
use crate::error::ConfigError;

/// Contents written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# ascii-filter configuration

[render]
# Glyph color: "R,G,B" or "original" to sample the input
color = "255,255,255"
# Gaussian kernel size for edge detection (odd, 1 to 31)
edge_kernel_size = 3
# Downscale interpolation: "area" or "bilinear"
interpolation = "area"
# Worker threads (default: one per core)
# threads = 4

[input]
# width = 640
# height = 480
format = "rgb24"
"#;

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, args: &Args) -> Result<(), ConfigError> {
    let config_path = args.config.clone().unwrap_or_else(get_config_path);
    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(config_path.as_path()))?;
            let filter = config.filter_config()?;
            println!("Current configuration:");
            println!("  Color: {}", filter.color_mode);
            println!("  Edge kernel size: {}", filter.edge_kernel_size);
            println!("  Interpolation: {:?}", filter.interpolation);
            match filter.threads {
                Some(n) => println!("  Threads: {}", n),
                None => println!("  Threads: auto"),
            }
            match (config.input.width, config.input.height) {
                (Some(w), Some(h)) => println!("  Frame size: {}x{}", w, h),
                _ => println!("  Frame size: (set with --size)"),
            }
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            write_default_config(&config_path)?;
            println!("Created config file: {}", config_path.display());
            Ok(())
        }
    }
}

/// Write [`DEFAULT_CONFIG`] to `path`, creating parent directories.
/// Refuses to overwrite an existing file.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.filter_config().unwrap(), FilterConfig::default());
    }

    #[test]
    fn test_write_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        write_default_config(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        assert!(matches!(
            write_default_config(&path),
            Err(ConfigError::AlreadyExists(_))
        ));
    }
}
