//! Facial emotion estimation over recorded landmark captures.

use anyhow::Result;
use clap::Parser;
use face_emotion_estimation::app::{AppConfig, EmotionApp, OutputFormat};
use face_emotion_estimation::config::Config;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Capture file to replay (JSON array of landmark frames)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Enable majority-vote smoothing
    #[arg(short, long)]
    smoothing: bool,

    /// Smoothing window size in frames
    #[arg(short, long)]
    window: Option<usize>,

    /// Report format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    example_config: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.example_config {
        print!("{}", face_emotion_estimation::config::EXAMPLE_CONFIG);
        return Ok(());
    }

    info!("Facial Emotion Estimation");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Apply command line overrides
    if args.smoothing {
        config.smoothing.enabled = true;
    }
    if let Some(window) = args.window {
        config.smoothing.window = window;
    }
    if args.debug {
        config.debug = true;
    }

    config.validate()?;

    let input = args
        .input
        .ok_or_else(|| anyhow::anyhow!("--input is required unless --example-config is given"))?;

    let app_config = AppConfig {
        input,
        output_format: args.format.parse::<OutputFormat>()?,
    };

    // Create and run application
    let app = EmotionApp::new(config, app_config);
    app.run()?;

    Ok(())
}
