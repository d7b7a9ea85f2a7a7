use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::{classify, SpaceId, Status};

/// A study space inside a building.
///
/// The occupied count is clamped into `[0, capacity]` at every write and the
/// status bucket is rederived at the same time, so the two can never drift
/// apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub(crate) id: SpaceId,
    pub(crate) name: String,
    pub(crate) floor: u8,
    pub(crate) capacity: u32,
    pub(crate) occupied: u32,
    pub(crate) amenities: BTreeSet<String>,
    pub(crate) status: Status,
    pub(crate) last_updated: DateTime<Utc>,
}

impl Room {
    /// Creates a room, clamping `occupied` into `[0, capacity]` and deriving
    /// the initial status bucket.
    #[must_use]
    pub fn new(
        id: SpaceId,
        name: String,
        floor: u8,
        capacity: u32,
        occupied: u32,
        amenities: BTreeSet<String>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        let occupied = occupied.min(capacity);
        let status = classify(occupied, capacity).status;
        Self {
            id,
            name,
            floor,
            capacity,
            occupied,
            amenities,
            status,
            last_updated,
        }
    }

    /// Returns the room identifier.
    #[must_use]
    pub const fn id(&self) -> &SpaceId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the floor the room is on.
    #[must_use]
    pub const fn floor(&self) -> u8 {
        self.floor
    }

    /// Returns the fixed seat capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the current occupied count.
    #[must_use]
    pub const fn occupied(&self) -> u32 {
        self.occupied
    }

    /// Returns the amenity tags, ordered alphabetically.
    #[must_use]
    pub const fn amenities(&self) -> &BTreeSet<String> {
        &self.amenities
    }

    /// Returns the current status bucket.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the instant the occupancy was last written.
    #[must_use]
    pub const fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Returns the current fill percentage, rounded half-up.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        classify(self.occupied, self.capacity).percentage
    }

    /// Replaces the occupied count, clamping into `[0, capacity]`,
    /// reclassifying, and stamping the update instant.
    pub(crate) fn set_occupied(&mut self, occupied: u32, at: DateTime<Utc>) {
        self.occupied = occupied.min(self.capacity);
        self.status = classify(self.occupied, self.capacity).status;
        self.last_updated = at;
    }

    /// Applies a fractional fullness report against the room's capacity.
    pub(crate) fn apply_level(&mut self, level: f64, at: DateTime<Utc>) {
        self.set_occupied(occupied_for_level(level, self.capacity), at);
    }
}

// The final cast is lossless: raw is a whole number strictly inside
// (0, capacity).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn occupied_for_level(level: f64, capacity: u32) -> u32 {
    let raw = (level * f64::from(capacity)).round();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else if raw >= f64::from(capacity) {
        capacity
    } else {
        raw as u32
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use test_case::test_case;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
    }

    fn lounge(capacity: u32, occupied: u32) -> Room {
        Room::new(
            "aq-3153".parse().unwrap(),
            "AQ 3153 Lounge".to_string(),
            3,
            capacity,
            occupied,
            BTreeSet::from(["wifi".to_string(), "outlets".to_string()]),
            t0(),
        )
    }

    #[test]
    fn construction_clamps_and_classifies() {
        let room = lounge(40, 55);

        assert_eq!(room.occupied(), 40);
        assert_eq!(room.status(), Status::Red);
        assert_eq!(room.percentage(), 100);
    }

    #[test]
    fn set_occupied_reclassifies_and_stamps() {
        let mut room = lounge(40, 12);
        assert_eq!(room.status(), Status::Green);

        let later = t0() + chrono::Duration::minutes(5);
        room.set_occupied(38, later);

        assert_eq!(room.occupied(), 38);
        assert_eq!(room.status(), Status::Red);
        assert_eq!(room.last_updated(), later);
    }

    #[test_case(0.0, 0; "empty")]
    #[test_case(0.1, 4; "ten percent")]
    #[test_case(0.4, 16; "forty percent")]
    #[test_case(0.7, 28; "seventy percent")]
    #[test_case(0.95, 38; "ninety five percent")]
    #[test_case(1.0, 40; "full")]
    #[test_case(-0.5, 0; "negative clamps to zero")]
    #[test_case(1.5, 40; "above one clamps to capacity")]
    fn apply_level_rounds_and_clamps(level: f64, expected: u32) {
        let mut room = lounge(40, 12);
        room.apply_level(level, t0());
        assert_eq!(room.occupied(), expected);
    }

    #[test]
    fn nan_level_clears_the_room() {
        let mut room = lounge(40, 12);
        room.apply_level(f64::NAN, t0());

        assert_eq!(room.occupied(), 0);
        assert_eq!(room.status(), Status::Green);
    }

    #[test]
    fn zero_capacity_room_stays_grey() {
        let mut room = lounge(0, 0);
        assert_eq!(room.status(), Status::Grey);

        room.apply_level(0.95, t0());

        assert_eq!(room.occupied(), 0);
        assert_eq!(room.status(), Status::Grey);
        assert_eq!(room.percentage(), 0);
    }
}
