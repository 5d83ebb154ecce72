use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use reel::output::Format;

#[derive(Copy, Clone, Debug, ValueEnum)]
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

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Png,
    #[value(alias = "jpeg")]
    Jpg,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Png => Format::Png,
            OutputFormat::Jpg => Format::Jpeg,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "reel")]
#[command(about = "Renders keyframed ray-traced animations")]
pub struct Args {
    /// Scene description, JSON when the extension is `.json`, text otherwise
    pub scene: PathBuf,

    /// Directory receiving `frame_<N>` images, created when missing
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Image format of written frames
    #[arg(short, long, value_enum, default_value = "png")]
    pub format: OutputFormat,

    /// Show frames in a window while they render
    #[arg(short, long)]
    pub preview: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["reel", "scene.txt"]).unwrap();

        assert_eq!(PathBuf::from("scene.txt"), args.scene);
        assert!(args.output.is_none());
        assert_eq!(Format::Png, Format::from(args.format));
        assert!(!args.preview);
        assert_eq!(LevelFilter::Info, LevelFilter::from(args.log_level));
    }

    #[test]
    fn all_flags() {
        let args = Args::try_parse_from([
            "reel", "scene.json", "-o", "frames", "-f", "jpg", "-p", "--log-level", "debug",
        ])
        .unwrap();

        assert_eq!(Some(PathBuf::from("frames")), args.output);
        assert_eq!(Format::Jpeg, Format::from(args.format));
        assert!(args.preview);
        assert_eq!(LevelFilter::Debug, LevelFilter::from(args.log_level));
    }

    #[test]
    fn scene_is_required() {
        assert!(Args::try_parse_from(["reel"]).is_err());
    }
}
