use std::fmt;

use serde::{Deserialize, Serialize};

/// Crowding bucket for a room or building.
///
/// Variants are ordered by severity (`Grey < Green < Yellow < Red`) so
/// statuses can be compared and sorted directly. `Grey` sits below `Green`
/// because a zero-capacity space has no crowd to rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Zero capacity, nothing to classify.
    Grey,
    /// Below half full.
    Green,
    /// Half full or more.
    Yellow,
    /// Nearly full.
    Red,
}

impl Status {
    /// The lowercase name used in serialized documents and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grey => "grey",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }

    /// Human-readable label shown next to the colour.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grey => "Closed",
            Self::Green => "Plenty of Space",
            Self::Yellow => "Half Full",
            Self::Red => "Packed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying an occupied count against a capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// The bucket the ratio falls into.
    pub status: Status,
    /// Fill percentage, rounded half-up.
    pub percentage: u32,
}

/// Classifies an occupied count against a capacity.
///
/// Zero capacity classifies as [`Status::Grey`] at 0%. Otherwise the
/// percentage is `100 * occupied / capacity` rounded half-up in integer
/// arithmetic, and the thresholds are: 80% and above is red, 50% and above
/// is yellow, anything below is green.
///
/// The function is total. `occupied` is not validated against `capacity`
/// here, callers clamp before calling.
#[must_use]
pub fn classify(occupied: u32, capacity: u32) -> Classification {
    if capacity == 0 {
        return Classification {
            status: Status::Grey,
            percentage: 0,
        };
    }

    let rounded = (u64::from(occupied) * 200 + u64::from(capacity)) / (u64::from(capacity) * 2);
    let percentage = u32::try_from(rounded).unwrap_or(u32::MAX);

    let status = if percentage >= 80 {
        Status::Red
    } else if percentage >= 50 {
        Status::Yellow
    } else {
        Status::Green
    };

    Classification { status, percentage }
}
