//! The fixed campus catalog used to seed fresh snapshots.

use chrono::{DateTime, Utc};

use super::{Building, Room, Snapshot, SpaceId};

/// Builds the campus catalog with every room stamped `seeded_at`.
///
/// Statuses are derived during construction, so the returned snapshot is
/// internally consistent and ready to persist.
#[must_use]
pub fn seed(seeded_at: DateTime<Utc>) -> Snapshot {
    Snapshot::new(vec![
        Building::new(
            id("aq"),
            "Academic Quadrangle".to_string(),
            "Main academic building with multiple study lounges".to_string(),
            "11:00 PM".to_string(),
            vec![
                room(
                    "aq-3153",
                    "AQ 3153 Lounge",
                    3,
                    40,
                    12,
                    &["wifi", "outlets", "quiet"],
                    seeded_at,
                ),
                room(
                    "aq-5000",
                    "AQ 5000 Lounge",
                    5,
                    25,
                    8,
                    &["wifi", "outlets", "quiet", "whiteboard"],
                    seeded_at,
                ),
                room(
                    "aq-4100",
                    "AQ 4100 Study Area",
                    4,
                    30,
                    25,
                    &["wifi", "outlets", "group study"],
                    seeded_at,
                ),
            ],
        ),
        Building::new(
            id("wac"),
            "W.A.C. Bennett Library".to_string(),
            "Main campus library with extensive study spaces".to_string(),
            "12:00 AM".to_string(),
            vec![
                room(
                    "lib-2",
                    "Floor 2",
                    2,
                    200,
                    110,
                    &["wifi", "outlets", "quiet", "computers"],
                    seeded_at,
                ),
                room(
                    "lib-3",
                    "Floor 3 (Group)",
                    3,
                    150,
                    90,
                    &["wifi", "outlets", "group study", "whiteboard"],
                    seeded_at,
                ),
                room(
                    "lib-6",
                    "Floor 6 (Silent)",
                    6,
                    100,
                    30,
                    &["wifi", "outlets", "silent"],
                    seeded_at,
                ),
            ],
        ),
        Building::new(
            id("tsc1"),
            "Technology and Science Complex 1".to_string(),
            "Engineering and science building".to_string(),
            "10:00 PM".to_string(),
            vec![
                room(
                    "tsc1-lounge",
                    "Atrium Lounge",
                    1,
                    50,
                    35,
                    &["wifi", "outlets"],
                    seeded_at,
                ),
                room(
                    "tsc1-lab",
                    "Open Computer Lab",
                    2,
                    40,
                    20,
                    &["wifi", "outlets", "computers"],
                    seeded_at,
                ),
            ],
        ),
        Building::new(
            id("sub"),
            "Student Union Building".to_string(),
            "Student center with casual study spaces".to_string(),
            "11:00 PM".to_string(),
            vec![
                room(
                    "sub-lounge",
                    "Main Lounge",
                    2,
                    80,
                    20,
                    &["wifi", "outlets", "group study"],
                    seeded_at,
                ),
                room(
                    "sub-quiet",
                    "Quiet Study Room",
                    4,
                    30,
                    5,
                    &["wifi", "outlets", "quiet"],
                    seeded_at,
                ),
            ],
        ),
        Building::new(
            id("rcb"),
            "Robert C. Brown Hall".to_string(),
            "Science building with study areas".to_string(),
            "10:00 PM".to_string(),
            vec![room(
                "rcb-atrium",
                "Atrium Study Area",
                1,
                60,
                15,
                &["wifi", "outlets"],
                seeded_at,
            )],
        ),
    ])
}

fn id(raw: &str) -> SpaceId {
    raw.parse().expect("catalog identifiers are valid")
}

fn room(
    raw_id: &str,
    name: &str,
    floor: u8,
    capacity: u32,
    occupied: u32,
    amenities: &[&str],
    at: DateTime<Utc>,
) -> Room {
    Room::new(
        id(raw_id),
        name.to_string(),
        floor,
        capacity,
        occupied,
        amenities.iter().copied().map(String::from).collect(),
        at,
    )
}
