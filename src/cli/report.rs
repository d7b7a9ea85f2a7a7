use std::path::PathBuf;

use clap::Parser;
use studyspot::{SpaceId, Store};
use tracing::instrument;

use super::terminal::{self, Colorize};

#[derive(Debug, Parser)]
#[command(about = "Report how busy a study room is right now")]
pub struct Report {
    /// The identifier of the building the room belongs to
    #[clap(value_parser = super::parse_space_id)]
    building: SpaceId,

    /// The identifier of the room being reported
    #[clap(value_parser = super::parse_space_id)]
    room: SpaceId,

    /// How crowded the room looks
    #[arg(long, value_enum, value_name = "LEVEL", conflicts_with = "fraction")]
    level: Option<Level>,

    /// Occupied fraction of the room's seats, between 0.0 and 1.0
    #[arg(long, value_name = "FRACTION")]
    fraction: Option<f64>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Level {
    /// Lots of available seats
    Empty,
    /// Plenty of room available
    SomeSpace,
    /// Limited seats available
    Crowded,
    /// No seats available
    Packed,
}

impl Level {
    const fn fraction(self) -> f64 {
        match self {
            Self::Empty => 0.1,
            Self::SomeSpace => 0.4,
            Self::Crowded => 0.7,
            Self::Packed => 0.95,
        }
    }
}

impl Report {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let fraction = match (self.level, self.fraction) {
            (Some(level), None) => level.fraction(),
            (None, Some(fraction)) => fraction,
            (None, None) => {
                anyhow::bail!("specify how crowded the room is with --level or --fraction")
            }
            (Some(_), Some(_)) => unreachable!("clap rejects conflicting arguments"),
        };

        let mut store = Store::open(root)?;
        store.report(&self.building, &self.room, fraction)?;

        let Some((building, room)) = store.snapshot().find_room(&self.building, &self.room)
        else {
            unreachable!("the report just resolved this room")
        };
        let rollup = building.rollup();

        println!("{}", "✅ Status Reported!".success());
        println!(
            "  {} is now {} ({}% full, {}/{} seats taken)",
            room.name(),
            terminal::paint(room.status(), room.status().label()),
            room.percentage(),
            room.occupied(),
            room.capacity()
        );
        println!(
            "  {} overall: {} ({}% full)",
            building.name(),
            terminal::paint(rollup.status, rollup.status.label()),
            rollup.percentage
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use studyspot::{SpaceId, Status, Store};
    use tempfile::tempdir;

    use super::{Level, Report};

    fn id(raw: &str) -> SpaceId {
        raw.parse().expect("valid identifier")
    }

    #[test]
    fn packed_report_fills_the_room() {
        let dir = tempdir().expect("create temp dir");
        let report = Report {
            building: id("aq"),
            room: id("aq-3153"),
            level: Some(Level::Packed),
            fraction: None,
        };
        report
            .run(dir.path().to_path_buf())
            .expect("report succeeds");

        let store = Store::open(dir.path().to_path_buf()).expect("open store");
        let (_, room) = store
            .snapshot()
            .find_room(&id("aq"), &id("aq-3153"))
            .expect("room exists");
        assert_eq!(room.occupied(), 38);
        assert_eq!(room.status(), Status::Red);
    }

    #[test]
    fn unknown_room_is_an_error() {
        let dir = tempdir().expect("create temp dir");
        let report = Report {
            building: id("aq"),
            room: id("aq-9999"),
            level: None,
            fraction: Some(0.5),
        };
        assert!(report.run(dir.path().to_path_buf()).is_err());
    }

    #[test]
    fn missing_level_and_fraction_is_an_error() {
        let dir = tempdir().expect("create temp dir");
        let report = Report {
            building: id("aq"),
            room: id("aq-3153"),
            level: None,
            fraction: None,
        };
        assert!(report.run(dir.path().to_path_buf()).is_err());
    }
}
