mod config_cmd;
mod zones;

use anyhow::Result;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::models::{HrZoneSystem, PowerZoneSystem};

#[derive(Parser)]
#[command(name = "ridepro")]
#[command(about = "Terminal client for RidePro training zones", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// View and update training zones
    #[command(subcommand)]
    Zones(ZonesSubcommands),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ZonesSubcommands {
    /// Show the calculated power and heart rate zone tables
    Show {
        /// Athlete ID (defaults to the configured athlete)
        #[arg(short, long)]
        athlete: Option<Uuid>,
    },

    /// Update thresholds or zone systems, then show the result
    Set {
        /// Athlete ID (defaults to the configured athlete)
        #[arg(short, long)]
        athlete: Option<Uuid>,

        /// Functional threshold power, watts
        #[arg(long)]
        ftp: Option<u32>,

        /// Maximum heart rate, bpm
        #[arg(long)]
        max_hr: Option<u32>,

        /// Resting heart rate, bpm
        #[arg(long)]
        resting_hr: Option<u32>,

        /// Power zone system: coggan, polarized or custom
        #[arg(long)]
        power_system: Option<PowerZoneSystem>,

        /// Heart rate zone system: standard, karvonen or custom
        #[arg(long)]
        hr_system: Option<HrZoneSystem>,
    },

    /// Edit zones in an interactive settings view
    Edit {
        /// Athlete ID (defaults to the configured athlete)
        #[arg(short, long)]
        athlete: Option<Uuid>,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Edit configuration file
    Edit,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::info!("Verbose mode enabled");
        }

        match self.command {
            Commands::Zones(subcmd) => match subcmd {
                ZonesSubcommands::Show { athlete } => zones::show_zones(athlete).await,
                ZonesSubcommands::Set {
                    athlete,
                    ftp,
                    max_hr,
                    resting_hr,
                    power_system,
                    hr_system,
                } => {
                    zones::set_zones(athlete, ftp, max_hr, resting_hr, power_system, hr_system)
                        .await
                }
                ZonesSubcommands::Edit { athlete } => zones::edit_zones(athlete).await,
            },
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config().await,
                ConfigSubcommands::Edit => config_cmd::edit_config().await,
                ConfigSubcommands::Init { force } => config_cmd::init_config(force).await,
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
