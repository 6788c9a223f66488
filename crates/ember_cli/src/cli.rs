use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in demo scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneName {
    BouncingSpheres,
    CheckeredSpheres,
    Earth,
    PerlinSpheres,
    Quads,
    SimpleLight,
    CornellBox,
    CornellSmoke,
    FinalScene,
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "ember")]
#[command(about = "Offline CPU path tracer", version)]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "cornell-box")]
    pub scene: SceneName,

    /// JSON render settings applied on top of the scene's own
    #[arg(long, value_name = "JSON")]
    pub settings: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, short = 'w')]
    pub width: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum ray bounce depth
    #[arg(long, short = 'd')]
    pub depth: Option<u32>,

    /// Seed for scene generation and sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file path (.png or .ppm)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Logging level; RUST_LOG takes precedence for per-module filters
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
