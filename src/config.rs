use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use directories::ProjectDirs;
use tracing_subscriber::filter::LevelFilter;

use crate::deck::Mode;

/// Concentration: find all 26 pairs before running out of flips.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// RNG seed for reproducible deals
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start in hard mode (pairs must also share a color)
    #[arg(long, default_value_t = false)]
    pub hard: bool,

    /// Milliseconds per clock tick
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Log file, defaults to concentration.log in the user data directory
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn mode(&self) -> Mode {
        if self.hard { Mode::Hard } else { Mode::Normal }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Where the log goes, or `None` if no data directory can be found.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(default_log_path)
    }
}

fn default_log_path() -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "concentration", "concentration")?;
    Some(proj_dirs.data_dir().join("concentration.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["concentration"]).unwrap();
        assert_eq!(args.seed, None);
        assert_eq!(args.mode(), Mode::Normal);
        assert_eq!(args.tick(), Duration::from_millis(100));
        assert_eq!(args.log_level, LevelFilter::INFO);
    }

    #[test]
    fn all_options() {
        let args = Args::try_parse_from([
            "concentration",
            "--seed",
            "12",
            "--hard",
            "--tick-ms",
            "50",
            "-l",
            "debug",
            "--log-file",
            "/tmp/c.log",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(12));
        assert_eq!(args.mode(), Mode::Hard);
        assert_eq!(args.tick(), Duration::from_millis(50));
        assert_eq!(args.log_level, LevelFilter::DEBUG);
        assert_eq!(args.log_path(), Some(PathBuf::from("/tmp/c.log")));
    }

    #[test]
    fn rejects_zero_tick() {
        assert!(Args::try_parse_from(["concentration", "--tick-ms", "0"]).is_err());
        assert!(Args::try_parse_from(["concentration", "--seed", "abc"]).is_err());
    }
}
