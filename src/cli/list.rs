use std::{fmt, path::PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use studyspot::{Building, Status, Store};
use tracing::instrument;

use super::terminal::{self, Colorize};

/// Command arguments for `spot list`.
#[derive(Debug, Default, Parser)]
#[command(about = "List campus buildings with their current status")]
pub struct List {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Show only buildings that currently have plenty of space.
    #[arg(long)]
    available: bool,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
        })
    }
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let store = Store::open(root)?;

        let buildings: Vec<&Building> = store
            .snapshot()
            .buildings()
            .iter()
            .filter(|building| !self.available || building.status() == Status::Green)
            .collect();

        match self.output {
            OutputFormat::Table => {
                render_table(&buildings, &store.config().campus, self.quiet);
                Ok(())
            }
            OutputFormat::Json => render_json(&buildings),
        }
    }
}

fn render_table(buildings: &[&Building], campus: &str, quiet: bool) {
    if quiet {
        for building in buildings {
            let rollup = building.rollup();
            println!(
                "{}\t{}\t{}",
                building.id(),
                rollup.percentage,
                building.status()
            );
        }
        return;
    }

    if buildings.is_empty() {
        println!("No buildings to show.");
        return;
    }

    if terminal::is_narrow() {
        println!("{campus}");
        for building in buildings {
            let rollup = building.rollup();
            println!(
                "{} {} ({}%)",
                terminal::paint(building.status(), "●"),
                building.name(),
                rollup.percentage
            );
        }
        return;
    }

    let headers = ["ID", "NAME", "ROOMS", "FULL", "OCC/CAP", "CLOSES"];
    let mut data: Vec<(Vec<String>, Status)> = Vec::new();

    for building in buildings {
        let rollup = building.rollup();
        data.push((
            vec![
                building.id().to_string(),
                building.name().to_string(),
                building.rooms().len().to_string(),
                format!("{}%", rollup.percentage),
                format!("{}/{}", rollup.occupied, rollup.capacity),
                building.open_until().to_string(),
            ],
            rollup.status,
        ));
    }

    // Determine column widths for alignment.
    let widths = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            data.iter()
                .map(|(row, _)| row[idx].len())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect::<Vec<_>>();

    println!("{campus}");
    println!();

    for (header, width) in headers.iter().zip(&widths) {
        print!("{header:<width$}  ");
    }
    println!("STATUS");

    for width in &widths {
        print!("{:-<width$}  ", "");
    }
    println!("------");

    for (row, status) in data {
        for (idx, value) in row.iter().enumerate() {
            let width = widths[idx];
            print!("{value:<width$}  ");
        }
        println!("{}", terminal::paint(status, status.label()));
    }

    println!();
    println!(
        "{}",
        format!("{} buildings. Run 'spot show <id>' to see rooms.", buildings.len()).dim()
    );
}

fn render_json(buildings: &[&Building]) -> anyhow::Result<()> {
    let rows: Vec<serde_json::Value> = buildings
        .iter()
        .map(|building| {
            let rollup = building.rollup();
            serde_json::json!({
                "id": building.id().as_str(),
                "name": building.name(),
                "description": building.description(),
                "open_until": building.open_until(),
                "status": building.status(),
                "percentage": rollup.percentage,
                "occupied": rollup.occupied,
                "capacity": rollup.capacity,
                "rooms": building.rooms().len(),
            })
        })
        .collect();

    serde_json::to_writer_pretty(std::io::stdout(), &rows)
        .context("failed to render json output")?;
    println!();
    Ok(())
}
