//! Campus Study-Space Occupancy
//!
//! Buildings and their rooms form an in-memory snapshot that is persisted as
//! a versioned JSON document.

pub mod domain;
pub use domain::{
    classify, Building, CampusStats, Config, Marker, ReportError, Room, Snapshot, SpaceId, Status,
};

/// Filesystem persistence for occupancy snapshots.
pub mod storage;
pub use storage::{SnapshotDocument, Store};
