use std::path::{Path, PathBuf};

mod list;
mod map;
mod report;
mod show;
mod stats;
mod terminal;

use clap::ArgAction;
use list::List;
use map::Map;
use report::Report;
use show::Show;
use stats::Stats;
use studyspot::{SpaceId, Store};
use tracing::instrument;

/// Parse a space identifier from a string, normalizing to lowercase.
///
/// This is a CLI boundary function that accepts uppercase input
/// and normalizes it before parsing.
fn parse_space_id(s: &str) -> Result<SpaceId, String> {
    // Normalize to lowercase
    let lowercase = s.to_lowercase();
    // Parse using FromStr (strict validation)
    lowercase.parse().map_err(|e| format!("{e}"))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The path to the directory holding the campus data
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::List(List::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            //.pretty()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// List campus buildings with their occupancy (default)
    List(List),

    /// Display a building's rooms and their occupancy
    Show(Show),

    /// Report how busy a study room is right now
    Report(Report),

    /// Draw the campus as a colour-coded occupancy map
    Map(Map),

    /// Summarise occupancy across the whole campus
    Stats(Stats),

    /// Discard every crowd report and reseed the built-in catalog
    Reset(Reset),

    /// Show or modify configuration settings
    Config(Config),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(root)?,
            Self::Show(command) => command.run(root)?,
            Self::Report(command) => command.run(root)?,
            Self::Map(command) => command.run(root)?,
            Self::Stats(command) => command.run(root)?,
            Self::Reset(command) => command.run(root)?,
            Self::Config(command) => command.run(&root)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Reset {
    /// Skip confirmation prompts
    #[arg(long, short)]
    yes: bool,
}

impl Reset {
    #[instrument]
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        use terminal::Colorize;

        if !self.yes {
            eprintln!(
                "{}",
                "⚠️  This discards every crowd report and restores the built-in catalog".warning()
            );

            eprint!("\nProceed? (y/N) ");
            use std::io::{self, BufRead};
            let stdin = io::stdin();
            let mut line = String::new();
            stdin.lock().read_line(&mut line)?;
            if !line.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled");
                std::process::exit(130);
            }
        }

        let mut store = Store::open(root)?;
        store.reset()?;

        println!("{}", "✅ Reseeded the campus catalog".success());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Config {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Config {
    #[instrument]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        use terminal::Colorize;

        let config_path = root.join(".studyspot/config.toml");

        match self.command {
            ConfigCommand::Show => {
                let config = if config_path.exists() {
                    studyspot::Config::load(&config_path).map_err(|e| anyhow::anyhow!("{e}"))?
                } else {
                    studyspot::Config::default()
                };

                println!("Configuration:");
                println!("  campus: {}", config.campus);
                println!("  data_file: {}", config.data_file());
            }
            ConfigCommand::Set { key, value } => {
                let mut config = if config_path.exists() {
                    studyspot::Config::load(&config_path).map_err(|e| anyhow::anyhow!("{e}"))?
                } else {
                    studyspot::Config::default()
                };

                if let Some(parent) = config_path.parent() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| anyhow::anyhow!("Failed to create data directory: {e}"))?;
                }

                match key.as_str() {
                    "campus" => {
                        config.campus = value.clone();
                        config
                            .save(&config_path)
                            .map_err(|e| anyhow::anyhow!("{e}"))?;

                        println!("{}", format!("Campus name: {value}").success());
                    }
                    "data_file" => {
                        config.set_data_file(value.clone());
                        config
                            .save(&config_path)
                            .map_err(|e| anyhow::anyhow!("{e}"))?;

                        println!("{}", format!("Snapshot file: {value}").success());
                        println!(
                            "\n{}",
                            "Existing snapshots are not moved; the next command seeds the new \
                             file if it is missing."
                                .info()
                        );
                    }
                    _ => {
                        return Err(anyhow::anyhow!(
                            "Unknown configuration key: '{key}'\nSupported keys: campus, \
                             data_file",
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use studyspot::Store;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn parse_space_id_normalizes_case() {
        let id = parse_space_id("AQ-3153").expect("identifier should parse");
        assert_eq!(id.as_ref(), "aq-3153");
    }

    #[test]
    fn parse_space_id_rejects_bad_syntax() {
        assert!(parse_space_id("aq--3153").is_err());
        assert!(parse_space_id("").is_err());
    }

    #[test]
    fn reset_restores_catalog_counts() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        let building = parse_space_id("aq").expect("identifier should parse");
        let room = parse_space_id("aq-3153").expect("identifier should parse");

        let mut store = Store::open(root.clone()).expect("failed to open store");
        store
            .report(&building, &room, 0.95)
            .expect("report should succeed");

        Reset { yes: true }
            .run(root.clone())
            .expect("reset command should succeed");

        let store = Store::open(root).expect("failed to open store");
        let (_, reseeded) = store
            .snapshot()
            .find_room(&building, &room)
            .expect("seeded room should exist");
        assert_eq!(reseeded.occupied(), 12);
    }

    #[test]
    fn config_set_and_show_round_trip() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        let set = Config {
            command: ConfigCommand::Set {
                key: "campus".to_string(),
                value: "UBC Point Grey".to_string(),
            },
        };
        set.run(&root).expect("config set should succeed");

        let config = studyspot::Config::load(&root.join(".studyspot/config.toml"))
            .expect("config should load");
        assert_eq!(config.campus, "UBC Point Grey");
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        let set = Config {
            command: ConfigCommand::Set {
                key: "colour".to_string(),
                value: "mauve".to_string(),
            },
        };
        assert!(set.run(&root).is_err());
    }
}
