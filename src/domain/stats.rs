use super::{Snapshot, Status};

/// Campus-wide occupancy summary derived from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampusStats {
    /// Number of buildings on campus.
    pub buildings: usize,
    /// Total rooms across all buildings.
    pub rooms: usize,
    /// Buildings currently classified green.
    pub available: usize,
    /// Mean of the per-building fill percentages, rounded half-up.
    pub average_occupancy: u32,
}

impl CampusStats {
    /// Collects the summary over every building in the snapshot.
    ///
    /// Grey buildings count into the mean at 0%, matching their rollup. An
    /// empty campus reports a 0% average.
    #[must_use]
    pub fn collect(snapshot: &Snapshot) -> Self {
        let buildings = snapshot.buildings().len();
        let rooms = snapshot
            .buildings()
            .iter()
            .map(|building| building.rooms().len())
            .sum();
        let available = snapshot
            .buildings()
            .iter()
            .filter(|building| building.status() == Status::Green)
            .count();

        Self {
            buildings,
            rooms,
            available,
            average_occupancy: average_percentage(snapshot),
        }
    }
}

/// Mean of the buildings' fill percentages, rounded half-up.
fn average_percentage(snapshot: &Snapshot) -> u32 {
    let mut total: u64 = 0;
    let mut count: u64 = 0;
    for building in snapshot.buildings() {
        total += u64::from(building.rollup().percentage);
        count += 1;
    }
    if count == 0 {
        return 0;
    }
    u32::try_from((total * 2 + count) / (count * 2)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{DateTime, TimeZone, Utc};

    use super::{
        super::{catalog, Building, Room},
        *,
    };

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn seeded_campus_summary() {
        let stats = CampusStats::collect(&catalog::seed(t0()));

        assert_eq!(stats.buildings, 5);
        assert_eq!(stats.rooms, 11);
        assert_eq!(stats.available, 3);
        // Building percentages 47, 51, 61, 23, 25: mean 41.4 rounds to 41.
        assert_eq!(stats.average_occupancy, 41);
    }

    #[test]
    fn empty_campus_is_all_zeroes() {
        let stats = CampusStats::collect(&Snapshot::new(Vec::new()));

        assert_eq!(stats.buildings, 0);
        assert_eq!(stats.rooms, 0);
        assert_eq!(stats.available, 0);
        assert_eq!(stats.average_occupancy, 0);
    }

    #[test]
    fn mean_rounds_half_up() {
        let building = |raw_id: &str, capacity: u32, occupied: u32| {
            Building::new(
                raw_id.parse().unwrap(),
                raw_id.to_uppercase(),
                String::new(),
                "9:00 PM".to_string(),
                vec![Room::new(
                    format!("{raw_id}-1").parse().unwrap(),
                    "Room".to_string(),
                    1,
                    capacity,
                    occupied,
                    BTreeSet::new(),
                    t0(),
                )],
            )
        };

        // 40% and 43% average to 41.5, which rounds up to 42.
        let snapshot = Snapshot::new(vec![building("a", 100, 40), building("b", 100, 43)]);
        let stats = CampusStats::collect(&snapshot);

        assert_eq!(stats.average_occupancy, 42);
    }
}
