use chrono::{DateTime, Utc};

use super::{Building, Room, SpaceId};

/// The complete set of campus buildings at a point in time.
///
/// Snapshots are value objects: applying a report returns a new snapshot and
/// never mutates the receiver, so references held across a report stay valid
/// and a failed report cannot leave partial state behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub(crate) buildings: Vec<Building>,
}

impl Snapshot {
    /// Creates a snapshot from an ordered building sequence.
    #[must_use]
    pub const fn new(buildings: Vec<Building>) -> Self {
        Self { buildings }
    }

    /// Returns the buildings in display order.
    #[must_use]
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Looks up a building by identifier.
    #[must_use]
    pub fn building(&self, id: &SpaceId) -> Option<&Building> {
        self.buildings.iter().find(|building| building.id() == id)
    }

    /// Looks up a room together with its owning building.
    #[must_use]
    pub fn find_room(
        &self,
        building_id: &SpaceId,
        room_id: &SpaceId,
    ) -> Option<(&Building, &Room)> {
        let building = self.building(building_id)?;
        let room = building.room(room_id)?;
        Some((building, room))
    }

    /// Applies an occupancy report, stamping the current instant.
    ///
    /// See [`Self::report_occupancy_at`].
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the building or room does not resolve.
    pub fn report_occupancy(
        &self,
        building_id: &SpaceId,
        room_id: &SpaceId,
        level: f64,
    ) -> Result<Self, ReportError> {
        self.report_occupancy_at(building_id, room_id, level, Utc::now())
    }

    /// Applies an occupancy report and returns the updated snapshot.
    ///
    /// The fractional `level` is converted to an absolute occupied count
    /// against the room's capacity (rounded to the nearest occupant, then
    /// clamped into `[0, capacity]`), the room is reclassified and stamped
    /// with `at`, and the owning building's status is recomputed over its
    /// full room sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the building or room does not resolve. The
    /// receiver is untouched either way.
    pub fn report_occupancy_at(
        &self,
        building_id: &SpaceId,
        room_id: &SpaceId,
        level: f64,
        at: DateTime<Utc>,
    ) -> Result<Self, ReportError> {
        let mut next = self.clone();

        let building = next
            .buildings
            .iter_mut()
            .find(|building| building.id() == building_id)
            .ok_or_else(|| ReportError::BuildingNotFound(building_id.clone()))?;

        let room = building
            .room_mut(room_id)
            .ok_or_else(|| ReportError::RoomNotFound {
                building: building_id.clone(),
                room: room_id.clone(),
            })?;

        room.apply_level(level, at);
        building.recompute();

        Ok(next)
    }
}

/// Errors returned when an occupancy report cannot be applied.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReportError {
    /// No building with this identifier exists in the snapshot.
    #[error("Building '{0}' not found")]
    BuildingNotFound(SpaceId),

    /// The building exists but contains no room with this identifier.
    #[error("Room '{room}' not found in building '{building}'")]
    RoomNotFound {
        /// The building that was searched.
        building: SpaceId,
        /// The room identifier that did not resolve.
        room: SpaceId,
    },
}
