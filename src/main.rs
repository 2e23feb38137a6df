mod chart;
mod cli;
mod config;
mod error;
mod i18n;
mod orchestrator;
mod readme;
mod render;
mod source;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use orchestrator::Orchestrator;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Validate CLI arguments
    if let Err(e) = cli.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    init_logging(cli.verbose);

    // Handle subcommands
    if let Some(command) = &cli.command {
        return handle_command(command, &cli);
    }

    // Load config, falling back to defaults
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load_or_default()?
    };

    // Apply CLI overrides to config
    let config = apply_cli_overrides(config, &cli);
    config.validate()?;

    run(config, &cli).await
}

async fn run(config: Config, cli: &Cli) -> Result<()> {
    let readme_path = config.readme_path.clone();
    let section = config.section_name.clone();

    let mut orchestrator = Orchestrator::new(config)?;
    if cli.no_wakatime {
        orchestrator = orchestrator.without_wakatime();
    }

    let spinner = if cli.is_interactive() {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Collecting activity...");
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(spinner)
    } else {
        None
    };

    let data = orchestrator.collect().await;
    if let Some(ref spinner) = spinner {
        spinner.finish_and_clear();
    }

    let stats = orchestrator.render(&data?)?;

    if cli.dry_run {
        println!("{}", stats);
        return Ok(());
    }

    if readme::update_file(&readme_path, &section, &stats)? {
        println!("✓ Updated section '{}' in {}", section, readme_path.display());
    } else {
        println!("No changes to {}", readme_path.display());
    }

    Ok(())
}

fn handle_command(command: &Commands, cli: &Cli) -> Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_config_path()?,
    };

    match command {
        Commands::Init { force } => {
            if config_path.exists() && !force {
                eprintln!(
                    "Config file already exists at: {}",
                    config_path.display()
                );
                eprintln!("Use --force to overwrite");
                std::process::exit(1);
            }

            Config::create_default_at(&config_path)?;
            println!("✓ Created config file at: {}", config_path.display());
            println!("\nTo fetch coding time from WakaTime, either:");
            println!("  1. Set the {} environment variable", config::WAKATIME_API_KEY_ENV);
            println!("  2. Add wakatime_api_key to the config file");
        }
        Commands::Config => {
            let config = if config_path.exists() {
                Config::load_from(&config_path)?
            } else {
                Config::default()
            };
            let toml_str = toml::to_string_pretty(&config)?;
            println!("Current configuration:\n");
            println!("{}", toml_str);
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    info!("profile-recap v{}", env!("CARGO_PKG_VERSION"));
}

fn apply_cli_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(ref snapshot) = cli.snapshot {
        config.snapshot_path = Some(snapshot.clone());
    }

    if let Some(ref readme) = cli.readme {
        config.readme_path = readme.clone();
    }

    if let Some(version) = cli.symbol_version {
        config.symbol_version = version;
    }

    if let Some(ref zone) = cli.time_zone {
        config.time_zone = Some(zone.clone());
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_apply_cli_overrides() {
        let cli = Cli::parse_from(vec![
            "profile-recap",
            "--snapshot",
            "snap.json",
            "--readme",
            "docs/README.md",
            "--symbol-version",
            "2",
            "--time-zone",
            "Africa/Cairo",
        ]);
        let config = apply_cli_overrides(Config::default(), &cli);

        assert_eq!(config.snapshot_path, Some(PathBuf::from("snap.json")));
        assert_eq!(config.readme_path, PathBuf::from("docs/README.md"));
        assert_eq!(config.symbol_version, 2);
        assert_eq!(config.time_zone.as_deref(), Some("Africa/Cairo"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_cli_overrides_keeps_config_values() {
        let cli = Cli::parse_from(vec!["profile-recap"]);
        let mut config = Config::default();
        config.symbol_version = 3;
        let config = apply_cli_overrides(config, &cli);
        assert_eq!(config.symbol_version, 3);
        assert!(config.snapshot_path.is_none());
    }
}
