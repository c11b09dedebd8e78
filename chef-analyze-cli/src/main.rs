use anyhow::Context;
use chef_analyze_core::{find_config_file, WorkstationConfig, DEFAULT_FILE_NAME};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chef-analyze")]
#[command(version, about = "Analyze your Chef Infra Server artifacts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chef Workstation configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the path of the configuration file in use
    Path {
        /// File to look for inside .chef/ and .chef-workstation/
        #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
        name: String,
    },

    /// Print the settings read from the configuration file
    Show {
        /// File to look for inside .chef/ and .chef-workstation/
        #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
        name: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct ConfigReport<'a> {
    path: &'a Path,
    config: &'a WorkstationConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Path { name } => {
                let path = find_config_file(&name)
                    .context("unable to locate Chef Workstation configuration")?;
                debug!(path = %path.display(), "Located config file");
                println!("{}", path.display());
            }
            ConfigCommands::Show { name, json } => {
                let (path, config) = WorkstationConfig::load(&name)
                    .context("unable to load Chef Workstation configuration")?;
                debug!(path = %path.display(), json, "Showing config file");
                if json {
                    let report = ConfigReport {
                        path: &path,
                        config: &config,
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print_config(&path, &config);
                }
            }
        },
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the `[log] level` of the default config file,
/// otherwise `warn`. An invalid configured level is reported once the
/// subscriber is installed.
fn init_tracing() {
    let mut invalid_level = None;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match WorkstationConfig::load_default() {
            Ok((_, config)) => config.log_level().unwrap_or_else(|e| {
                invalid_level = Some(e);
                None
            }),
            Err(_) => None,
        };
        EnvFilter::new(level.as_deref().unwrap_or("warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = invalid_level {
        warn!(error = %e, "Ignoring [log] level from config file");
    }
}

fn print_config(path: &Path, config: &WorkstationConfig) {
    println!("Config file: {}", path.display());
    println!("  log.level: {}", display_opt(config.log.level.as_deref()));
    println!(
        "  log.location: {}",
        display_opt(config.log.location.as_deref().map(|p| p.to_string_lossy()).as_deref())
    );
    println!(
        "  telemetry.enable: {}",
        display_opt(config.telemetry.enable.map(|v| v.to_string()).as_deref())
    );
    println!(
        "  telemetry.dev: {}",
        display_opt(config.telemetry.dev.map(|v| v.to_string()).as_deref())
    );
    println!(
        "  chef.trusted_certs_dir: {}",
        display_opt(
            config
                .chef
                .trusted_certs_dir
                .as_deref()
                .map(|p| p.to_string_lossy())
                .as_deref()
        )
    );
}

fn display_opt(value: Option<&str>) -> &str {
    value.unwrap_or("(unset)")
}
