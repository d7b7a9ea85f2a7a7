use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use studyspot::{Building, SpaceId, Store};
use tracing::instrument;

use super::terminal::{self, Colorize};

#[derive(Debug, Parser)]
#[command(about = "Display a building's rooms and their occupancy")]
pub struct Show {
    /// The identifier of the building to display
    #[clap(value_parser = super::parse_space_id)]
    building: SpaceId,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let store = Store::open(root)?;

        // Find the building
        let Some(building) = store.snapshot().building(&self.building) else {
            eprintln!("Building {} not found", self.building);
            std::process::exit(1);
        };

        match self.output {
            OutputFormat::Pretty => output_pretty(building),
            OutputFormat::Json => output_json(building)?,
        }

        Ok(())
    }
}

fn output_pretty(building: &Building) {
    let rollup = building.rollup();

    // Header
    println!("# {} ({})", building.name(), building.id());
    println!("{}\n", building.description().dim());

    println!(
        "Status: {} ({}% full, {}/{} seats taken)",
        terminal::paint(rollup.status, rollup.status.label()),
        rollup.percentage,
        rollup.occupied,
        rollup.capacity
    );
    println!("Hours:  Open until {}", building.open_until());

    // Rooms
    println!("\n{}", "Rooms".dim());
    let now = Utc::now();
    for room in building.rooms() {
        println!(
            "  {} {} ({}, floor {})",
            terminal::status_dot(room.status()),
            room.name(),
            room.id(),
            room.floor()
        );
        println!(
            "    {}/{} seats ({}%), updated {}",
            room.occupied(),
            room.capacity(),
            room.percentage(),
            terminal::format_relative(room.last_updated(), now)
        );
        if !room.amenities().is_empty() {
            let amenities: Vec<_> = room.amenities().iter().map(String::as_str).collect();
            println!("    {}", amenities.join(", ").dim());
        }
    }
}

fn output_json(building: &Building) -> anyhow::Result<()> {
    use serde_json::json;

    let rollup = building.rollup();
    let rooms: Vec<_> = building
        .rooms()
        .iter()
        .map(|room| {
            json!({
                "id": room.id().to_string(),
                "name": room.name(),
                "floor": room.floor(),
                "capacity": room.capacity(),
                "occupied": room.occupied(),
                "percentage": room.percentage(),
                "status": room.status(),
                "amenities": room.amenities(),
                "last_updated": room.last_updated().to_rfc3339(),
            })
        })
        .collect();

    let output = json!({
        "id": building.id().to_string(),
        "name": building.name(),
        "description": building.description(),
        "open_until": building.open_until(),
        "status": rollup.status,
        "percentage": rollup.percentage,
        "occupied": rollup.occupied,
        "capacity": rollup.capacity,
        "rooms": rooms,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
