use super::{classify, Classification, Room, SpaceId, Status};

/// A campus building and its ordered sequence of rooms.
///
/// Room order is display order and is stable. The building status is always
/// derived from the summed room counts, never by averaging the per-room
/// buckets, so one packed closet cannot mark a whole building red.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Building {
    pub(crate) id: SpaceId,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) open_until: String,
    pub(crate) rooms: Vec<Room>,
    pub(crate) status: Status,
}

impl Building {
    /// Creates a building, deriving its status from the room totals.
    #[must_use]
    pub fn new(
        id: SpaceId,
        name: String,
        description: String,
        open_until: String,
        rooms: Vec<Room>,
    ) -> Self {
        let mut building = Self {
            id,
            name,
            description,
            open_until,
            rooms,
            status: Status::Grey,
        };
        building.recompute();
        building
    }

    /// Returns the building identifier.
    #[must_use]
    pub const fn id(&self) -> &SpaceId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the one-line description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the closing time, e.g. "11:00 PM".
    #[must_use]
    pub fn open_until(&self) -> &str {
        &self.open_until
    }

    /// Returns the rooms in display order.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Returns the current status bucket.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Looks up a room by identifier.
    #[must_use]
    pub fn room(&self, id: &SpaceId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id() == id)
    }

    pub(crate) fn room_mut(&mut self, id: &SpaceId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|room| room.id() == id)
    }

    /// Sums occupancy over the full room sequence and classifies the totals.
    ///
    /// A building with no rooms has zero capacity and classifies as grey.
    #[must_use]
    pub fn rollup(&self) -> Rollup {
        let occupied: u32 = self.rooms.iter().map(Room::occupied).sum();
        let capacity: u32 = self.rooms.iter().map(Room::capacity).sum();
        let Classification { status, percentage } = classify(occupied, capacity);
        Rollup {
            status,
            percentage,
            occupied,
            capacity,
        }
    }

    /// Rederives the stored status from the current room totals.
    pub(crate) fn recompute(&mut self) {
        self.status = self.rollup().status;
    }
}

/// Building-level occupancy totals, summed over the full room sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rollup {
    /// Bucket classified from the summed counts.
    pub status: Status,
    /// Fill percentage classified from the summed counts.
    pub percentage: u32,
    /// Total occupied count across all rooms.
    pub occupied: u32,
    /// Total capacity across all rooms.
    pub capacity: u32,
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
    }

    fn room(id: &str, capacity: u32, occupied: u32) -> Room {
        Room::new(
            id.parse().unwrap(),
            id.to_uppercase(),
            1,
            capacity,
            occupied,
            BTreeSet::new(),
            t0(),
        )
    }

    fn hall(rooms: Vec<Room>) -> Building {
        Building::new(
            "aq".parse().unwrap(),
            "Academic Quadrangle".to_string(),
            "Main academic building".to_string(),
            "11:00 PM".to_string(),
            rooms,
        )
    }

    #[test]
    fn rollup_sums_counts_before_classifying() {
        // One full room and one empty room: 40/100 overall, green, even
        // though the full room on its own is red.
        let building = hall(vec![room("aq-1", 40, 40), room("aq-2", 60, 0)]);
        let rollup = building.rollup();

        assert_eq!(rollup.occupied, 40);
        assert_eq!(rollup.capacity, 100);
        assert_eq!(rollup.percentage, 40);
        assert_eq!(rollup.status, Status::Green);
        assert_eq!(building.status(), Status::Green);
    }

    #[test]
    fn rollup_ignores_room_order() {
        let forward = hall(vec![room("aq-1", 40, 40), room("aq-2", 60, 0)]);
        let backward = hall(vec![room("aq-2", 60, 0), room("aq-1", 40, 40)]);

        assert_eq!(forward.rollup().status, backward.rollup().status);
        assert_eq!(forward.rollup().percentage, backward.rollup().percentage);
    }

    #[test]
    fn empty_building_is_grey() {
        let building = hall(Vec::new());
        let rollup = building.rollup();

        assert_eq!(rollup.status, Status::Grey);
        assert_eq!(rollup.percentage, 0);
        assert_eq!(rollup.capacity, 0);
    }

    #[test]
    fn room_lookup() {
        let building = hall(vec![room("aq-1", 40, 10), room("aq-2", 60, 0)]);

        assert_eq!(
            building.room(&"aq-2".parse().unwrap()).unwrap().capacity(),
            60
        );
        assert!(building.room(&"aq-9".parse().unwrap()).is_none());
    }

    #[test]
    fn recompute_tracks_room_mutation() {
        let mut building = hall(vec![room("aq-1", 40, 10)]);
        assert_eq!(building.status(), Status::Green);

        building
            .room_mut(&"aq-1".parse().unwrap())
            .unwrap()
            .set_occupied(39, t0());
        building.recompute();

        assert_eq!(building.status(), Status::Red);
    }
}
