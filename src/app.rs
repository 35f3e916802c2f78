//! Frame-replay application.
//!
//! Replays a recorded capture file (a JSON array of landmark frames,
//! `null` where the landmark detector saw no face) through a scanning
//! session and reports the timeline and summary. This is the crate's
//! runnable surface; live capture belongs to the embedding application.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::features::extract_features;
use crate::landmarks::Point;
use crate::presentation::Intensity;
use crate::session::{ScanSession, SessionSummary, TimelineEntry};
use log::{debug, info};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable timeline and summary
    Text,
    /// Machine-readable report
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidInput(format!("Unknown output format: {other}"))),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Capture file to replay
    pub input: PathBuf,
    /// Report format
    pub output_format: OutputFormat,
}

/// One recorded frame: a landmark set, or `null` when no face was found
type RecordedFrame = Option<Vec<Point>>;

/// Full machine-readable report
#[derive(Debug, Serialize)]
struct Report<'a> {
    timeline: &'a [TimelineEntry],
    summary: &'a SessionSummary,
}

/// Replay application
pub struct EmotionApp {
    config: Config,
    app_config: AppConfig,
}

impl EmotionApp {
    #[must_use]
    pub fn new(config: Config, app_config: AppConfig) -> Self {
        Self { config, app_config }
    }

    /// Replay the capture file and print the report.
    ///
    /// # Errors
    ///
    /// Returns an error if the capture file cannot be read or parsed, or
    /// if the report cannot be serialized.
    pub fn run(&self) -> Result<()> {
        let frames = self.load_frames()?;
        info!(
            "Replaying {} frames from {}",
            frames.len(),
            self.app_config.input.display()
        );

        let mut session = ScanSession::new(&self.config);
        for frame in &frames {
            if self.config.debug {
                if let Some(landmarks) = frame {
                    match extract_features(landmarks) {
                        Ok(features) => debug!("frame features: {features:?}"),
                        Err(failure) => debug!("frame extraction failed: {failure:?}"),
                    }
                }
            }
            let entry = session.record(frame.as_deref());
            debug!("{} -> {} ({}%)", entry.time, entry.label, entry.confidence);
        }

        let summary = session.summary();
        match self.app_config.output_format {
            OutputFormat::Text => {
                for entry in session.timeline() {
                    println!(
                        "{:>4}  {}  {:<10} {:>3}%  {}",
                        entry.time,
                        entry.emoji,
                        entry.label.to_string(),
                        entry.confidence,
                        Intensity::from_confidence(f32::from(entry.confidence))
                    );
                }
                println!(
                    "dominant: {} ({:.0}% over {} frames)",
                    summary.dominant, summary.average_confidence, summary.frames
                );
            }
            OutputFormat::Json => {
                let report = Report {
                    timeline: session.timeline(),
                    summary: &summary,
                };
                let rendered = serde_json::to_string_pretty(&report)?;
                println!("{rendered}");
            }
        }

        Ok(())
    }

    fn load_frames(&self) -> Result<Vec<RecordedFrame>> {
        let content = std::fs::read_to_string(&self.app_config.input)?;
        Ok(serde_json::from_str(&content)?)
    }
}
