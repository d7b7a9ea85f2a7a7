//! Projection of a snapshot onto the fixed campus map.

use super::{Snapshot, SpaceId, Status};

/// Known campus positions, in percent of the map extent.
const POSITIONS: &[(&str, (u8, u8))] = &[
    ("aq", (50, 40)),
    ("wac", (30, 60)),
    ("tsc1", (70, 60)),
    ("sub", (40, 20)),
    ("rcb", (60, 80)),
];

/// Position given to buildings the table does not know about.
const FALLBACK: (u8, u8) = (50, 50);

/// A building reduced to what the campus map needs to place it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Building identifier.
    pub id: SpaceId,
    /// Building display name.
    pub name: String,
    /// Horizontal position, percent of the map width.
    pub x: u8,
    /// Vertical position, percent of the map height.
    pub y: u8,
    /// Current building status.
    pub status: Status,
    /// Current building fill percentage.
    pub percentage: u32,
    /// Number of rooms in the building.
    pub room_count: usize,
    /// Relative bubble diameter, scaled by room count.
    pub size: usize,
}

impl Marker {
    /// Short label drawn next to the bubble: the uppercased identifier.
    #[must_use]
    pub fn label(&self) -> String {
        self.id.as_str().to_uppercase()
    }
}

/// Builds a marker for every building, in display order.
#[must_use]
pub fn markers(snapshot: &Snapshot) -> Vec<Marker> {
    snapshot
        .buildings()
        .iter()
        .map(|building| {
            let (x, y) = POSITIONS
                .iter()
                .find(|(id, _)| *id == building.id().as_str())
                .map_or(FALLBACK, |(_, position)| *position);
            let rollup = building.rollup();
            let room_count = building.rooms().len();

            Marker {
                id: building.id().clone(),
                name: building.name().to_string(),
                x,
                y,
                status: rollup.status,
                percentage: rollup.percentage,
                room_count,
                size: 60 + 10 * room_count,
            }
        })
        .collect()
}
