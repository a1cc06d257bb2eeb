use clap::Parser;
use std::path::PathBuf;

use crate::time_utils::BucketSize;

/// Default location of the written profile.
pub const DEFAULT_OUTPUT: &str = "model.stats.json";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Learn a per-source baseline of per-minute log volume
#[derive(Parser, Debug, Clone)]
#[command(
    name = "log-baseline",
    about = "Learn a per-source baseline of per-minute log volume",
    version
)]
pub struct Settings {
    /// CSV file with columns ts,source,msg (ts as RFC 3339)
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the profile
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Bucket granularity (only 1m is supported)
    #[arg(long, default_value = "1m")]
    pub bucket: BucketSize,

    /// Logging level
    #[arg(
        long,
        env = "LOG_BASELINE_LOG_LEVEL",
        default_value = "INFO",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"]
    )]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments, exiting with a usage message on error.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Parse an explicit argument list (first element is the program name).
    pub fn load_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    /// Apply the `--debug` override.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::load_from_args(["log-baseline", "--input", "logs.csv"]).unwrap();
        assert_eq!(s.input, PathBuf::from("logs.csv"));
        assert_eq!(s.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(s.bucket, BucketSize::OneMinute);
        assert!(!s.debug);
    }

    #[test]
    fn test_explicit_output_and_bucket() {
        let s = Settings::load_from_args([
            "log-baseline",
            "--input",
            "logs.csv",
            "--output",
            "out/profile.json",
            "--bucket",
            "1m",
        ])
        .unwrap();
        assert_eq!(s.output, PathBuf::from("out/profile.json"));
        assert_eq!(s.bucket, BucketSize::OneMinute);
    }

    #[test]
    fn test_input_is_required() {
        let err = Settings::load_from_args(["log-baseline"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_unsupported_bucket_is_rejected() {
        let err =
            Settings::load_from_args(["log-baseline", "--input", "x.csv", "--bucket", "1h"])
                .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("1h"));
    }

    #[test]
    fn test_debug_overrides_log_level() {
        let s = Settings::load_from_args([
            "log-baseline",
            "--input",
            "x.csv",
            "--log-level",
            "ERROR",
            "--debug",
        ])
        .unwrap();
        assert_eq!(s.log_level, "DEBUG");
    }
}
