use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use studyspot::{CampusStats, Status, Store};
use tracing::instrument;

use super::terminal::{self, Colorize};

#[derive(Debug, Default, Parser)]
#[command(about = "Summarise occupancy across the whole campus")]
pub struct Stats {
    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Print only the campus-wide average percentage
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Stats {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let store = Store::open(root)?;
        let stats = CampusStats::collect(store.snapshot());

        let mut by_status: BTreeMap<Status, usize> = BTreeMap::new();
        for building in store.snapshot().buildings() {
            *by_status.entry(building.status()).or_insert(0) += 1;
        }

        if self.quiet {
            println!("{}", stats.average_occupancy);
            return Ok(());
        }

        match self.output {
            OutputFormat::Table => output_table(&store.config().campus, stats, &by_status),
            OutputFormat::Json => output_json(stats, &by_status)?,
        }

        Ok(())
    }
}

fn output_table(campus: &str, stats: CampusStats, by_status: &BTreeMap<Status, usize>) {
    println!("{campus}");
    println!("{:-<width$}", "", width = campus.chars().count());
    println!("Buildings:         {}", stats.buildings);
    println!("Study rooms:       {}", stats.rooms);
    println!("Available now:     {}", stats.available);
    println!("Average occupancy: {}%", stats.average_occupancy);

    println!("\n{}", "By status".dim());
    for status in [Status::Red, Status::Yellow, Status::Green, Status::Grey] {
        if let Some(count) = by_status.get(&status) {
            // Pad before painting so the colour codes stay out of the width.
            let label = format!("{:<16}", status.label());
            println!("  {} {count}", terminal::paint(status, &label));
        }
    }
}

fn output_json(stats: CampusStats, by_status: &BTreeMap<Status, usize>) -> anyhow::Result<()> {
    use serde_json::json;

    let by_status: BTreeMap<&str, usize> = by_status
        .iter()
        .map(|(status, count)| (status.as_str(), *count))
        .collect();

    let output = json!({
        "buildings": stats.buildings,
        "rooms": stats.rooms,
        "available": stats.available,
        "average_occupancy": stats.average_occupancy,
        "by_status": by_status,
    });

    serde_json::to_writer_pretty(std::io::stdout(), &output)
        .context("failed to render json output")?;
    println!();
    Ok(())
}
