use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::time::Instant;

use ascii_filter::cli::{handle_config_action, Args, Command};
use ascii_filter::config::Config;
use ascii_filter::error::{ConfigError, StreamError};
use ascii_filter::stream::{ctrlc_received, setup_ctrlc_handler, FrameReader, FrameWriter};
use ascii_filter::AsciiRenderer;
use clap::Parser;

/// Frames between throughput log lines
const FPS_LOG_INTERVAL: u64 = 10;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let result = match &args.command {
        Some(Command::Config { action }) => {
            handle_config_action(action.clone(), &args).map_err(|e| e.to_string())
        }
        None => run(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Load config: an explicit --config path must exist, the default path may not.
fn load_config(args: &Args) -> Result<Config, ConfigError> {
    if let Some(path) = &args.config {
        if !path.exists() {
            return Err(ConfigError::Io {
                path: path.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
            });
        }
    }
    Config::load(args.config.as_deref())
}

fn run(args: &Args) -> Result<(), String> {
    let config = load_config(args).map_err(|e| e.to_string())?;
    let settings = args.resolve(&config).map_err(|e| e.to_string())?;
    let renderer = AsciiRenderer::new(settings.filter.clone()).map_err(|e| e.to_string())?;

    let input: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(
            File::open(path).map_err(|e| format!("Failed to open {}: {}", path.display(), e))?,
        ),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let mut reader = FrameReader::new(
        BufReader::new(input),
        settings.width,
        settings.height,
        settings.format,
    )
    .map_err(|e| e.to_string())?;
    let mut writer = FrameWriter::new(BufWriter::new(output));

    if let Err(e) = setup_ctrlc_handler() {
        log::warn!("Failed to install Ctrl+C handler: {}", e);
    }

    log::info!(
        "Rendering {}x{} {} frames ({} threads, color {})",
        settings.width,
        settings.height,
        settings.format,
        renderer.threads(),
        settings.filter.color_mode
    );

    let start = Instant::now();
    let mut frames = 0u64;

    while !ctrlc_received() {
        let frame = match reader.read_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(StreamError::Truncated { read, expected }) => {
                log::warn!(
                    "Input ended mid-frame ({} of {} bytes), stopping",
                    read,
                    expected
                );
                break;
            }
            Err(e) => return Err(e.to_string()),
        };

        let rendered = renderer.render_with_glyphs(&frame);
        let written = if args.text {
            writer.write_text(&rendered.glyphs)
        } else {
            writer.write_frame(&rendered.frame)
        };
        match written {
            Ok(()) => {}
            Err(StreamError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                log::debug!("Output closed, stopping");
                break;
            }
            Err(e) => return Err(e.to_string()),
        }

        frames += 1;
        if frames % FPS_LOG_INTERVAL == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            log::info!(
                "{} frames, {:.1} fps average",
                frames,
                frames as f64 / elapsed.max(f64::EPSILON)
            );
        }
    }

    match writer.flush() {
        Ok(()) => {}
        Err(StreamError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => return Err(e.to_string()),
    }

    log::info!(
        "Rendered {} frames in {:.2}s",
        frames,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
