//! Domain model for campus occupancy tracking.
//!
//! Buildings own rooms, rooms carry occupancy counts, and everything else is
//! derived: status buckets, fill percentages, map markers, and campus-wide
//! statistics all come from classifying raw counts against capacities.

mod building;
pub mod catalog;
mod config;
pub mod map;
mod room;
mod snapshot;
/// Space identifier types and parsing.
pub mod space_id;
mod stats;
mod status;

pub use building::{Building, Rollup};
pub use config::Config;
pub use map::Marker;
pub use room::Room;
pub use snapshot::{ReportError, Snapshot};
pub use space_id::{Error as SpaceIdError, SpaceId};
pub use stats::CampusStats;
pub use status::{classify, Classification, Status};
