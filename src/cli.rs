use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "profile-recap")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Coding activity summary generator for profile READMEs",
    long_about = "profile-recap buckets your commits by time of day and weekday, ranks your \
                  languages, editors and operating systems from WakaTime, and writes the \
                  result between section markers in a README."
)]
pub struct Cli {
    /// Path to config file (default: ~/.config/profile-recap/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// JSON snapshot of repositories and commit dates
    #[arg(short, long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// README to update
    #[arg(short, long, value_name = "FILE")]
    pub readme: Option<PathBuf>,

    /// Print the rendered section instead of writing the README
    #[arg(long, conflicts_with = "readme")]
    pub dry_run: bool,

    /// Bar glyph style (1 = blocks, 2 = braille, 3 = squares)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(1..=3))]
    pub symbol_version: Option<u8>,

    /// IANA time zone for commit bucketing
    #[arg(long, value_name = "TZ")]
    pub time_zone: Option<String>,

    /// Skip the WakaTime API even if a key is configured
    #[arg(long)]
    pub no_wakatime: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration
    Config,
}

impl Cli {
    /// Whether progress indicators should be drawn
    pub fn is_interactive(&self) -> bool {
        !self.dry_run && self.verbose == 0 && self.command.is_none()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref zone) = self.time_zone {
            if zone.trim().is_empty() {
                return Err("--time-zone must not be empty".to_string());
            }
        }

        if self.command.is_some() && (self.snapshot.is_some() || self.dry_run) {
            return Err("Subcommands do not take --snapshot or --dry-run".to_string());
        }

        Ok(())
    }
}
