use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
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

/// Command line arguments structure using clap derive macros
#[derive(Debug, Parser)]
#[command(name = "chromaphong")]
#[command(about = "A Phong ray tracer for analytic shapes")]
pub struct Args {
    /// Scene description file (TOML); renders the built-in demo scene when absent
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub debug_level: LogLevel,

    /// Override the image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Override the image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Overlay a grid line every N pixels
    #[arg(long, value_name = "N")]
    pub grid: Option<u32>,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["chromaphong"]).unwrap();
        assert!(args.scene.is_none());
        assert_eq!(args.output, PathBuf::from("output.png"));
        assert!(args.width.is_none() && args.height.is_none() && args.grid.is_none());
        assert_eq!(LevelFilter::from(args.debug_level), LevelFilter::Info);
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "chromaphong",
            "--scene",
            "demo.toml",
            "-o",
            "out.exr",
            "--width",
            "320",
            "--height",
            "200",
            "--grid",
            "50",
            "--debug-level",
            "trace",
        ])
        .unwrap();
        assert_eq!(args.scene, Some(PathBuf::from("demo.toml")));
        assert_eq!(args.output, PathBuf::from("out.exr"));
        assert_eq!((args.width, args.height, args.grid), (Some(320), Some(200), Some(50)));
        assert_eq!(LevelFilter::from(args.debug_level), LevelFilter::Trace);
    }
}
