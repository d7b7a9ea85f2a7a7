use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use studyspot::{domain::map, Marker, Status, Store};
use tracing::instrument;

use super::terminal::{self, Colorize};

const GRID_WIDTH: usize = 64;
const GRID_HEIGHT: usize = 16;

#[derive(Debug, Default, Parser)]
#[command(about = "Draw the campus as a colour-coded occupancy map")]
pub struct Map {
    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "grid")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Grid,
    Json,
}

/// One character of the rendered grid, painted when it belongs to a marker.
#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    status: Option<Status>,
}

impl Map {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let store = Store::open(root)?;
        let markers = map::markers(store.snapshot());

        match self.output {
            OutputFormat::Grid => output_grid(&markers, &store.config().campus),
            OutputFormat::Json => output_json(&markers)?,
        }

        Ok(())
    }
}

fn output_grid(markers: &[Marker], campus: &str) {
    if terminal::is_narrow() {
        for marker in markers {
            println!(
                "{} {} ({}%, {} rooms)",
                terminal::status_dot(marker.status),
                marker.name,
                marker.percentage,
                marker.room_count
            );
        }
        return;
    }

    let blank = Cell {
        ch: ' ',
        status: None,
    };
    let mut canvas = vec![vec![blank; GRID_WIDTH]; GRID_HEIGHT];

    for marker in markers {
        // Percentage coordinates scale onto the grid.
        let column = usize::from(marker.x) * (GRID_WIDTH - 1) / 100;
        let row = usize::from(marker.y) * (GRID_HEIGHT - 1) / 100;
        canvas[row][column] = Cell {
            ch: '●',
            status: Some(marker.status),
        };

        let label = format!(" {} ({})", marker.label(), marker.room_count);
        for (offset, ch) in label.chars().enumerate() {
            let Some(cell) = canvas[row].get_mut(column + 1 + offset) else {
                break;
            };
            *cell = Cell { ch, status: None };
        }
    }

    for cells in &canvas {
        let mut line = String::new();
        for cell in cells {
            let rendered = cell.status.map_or_else(
                || cell.ch.to_string(),
                |status| terminal::paint(status, &cell.ch.to_string()),
            );
            line.push_str(&rendered);
        }
        println!("{}", line.trim_end());
    }

    let legend: Vec<_> = [Status::Green, Status::Yellow, Status::Red, Status::Grey]
        .into_iter()
        .map(|status| terminal::paint(status, &format!("● {}", status.label())))
        .collect();
    println!();
    println!("{}", campus.dim());
    println!("{}", legend.join("   "));
}

fn output_json(markers: &[Marker]) -> anyhow::Result<()> {
    use serde_json::json;

    let rows: Vec<_> = markers
        .iter()
        .map(|marker| {
            json!({
                "id": marker.id.to_string(),
                "name": marker.name,
                "x": marker.x,
                "y": marker.y,
                "status": marker.status,
                "percentage": marker.percentage,
                "rooms": marker.room_count,
                "size": marker.size,
            })
        })
        .collect();

    serde_json::to_writer_pretty(std::io::stdout(), &rows)
        .context("failed to render json output")?;
    println!();
    Ok(())
}
