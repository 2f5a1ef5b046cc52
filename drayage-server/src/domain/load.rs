//! Container/load metadata types.
//!
//! A load is the unit whose journey is tracked: one container moving
//! through an import or export flow. The engine never fetches loads
//! itself; callers attach this metadata to every leg in a snapshot.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

use super::{ContainerNumber, ScacCode};

/// Which way the shipment flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipmentDirection {
    /// Box arrives loaded at the terminal and must reach the customer.
    Import,
    /// Box is picked up empty, loaded at the customer, and returned.
    Export,
}

impl ShipmentDirection {
    /// Parse a direction from its wire label ("IMPORT" or "EXPORT").
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "IMPORT" => Some(ShipmentDirection::Import),
            "EXPORT" => Some(ShipmentDirection::Export),
            _ => None,
        }
    }

    /// Returns the wire label for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentDirection::Import => "IMPORT",
            ShipmentDirection::Export => "EXPORT",
        }
    }
}

impl fmt::Display for ShipmentDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard container size classes.
///
/// Nonstandard equipment labels (flat racks, open tops, tanks) pass
/// through as `Other` so a feed never fails on them; size matching
/// treats each unknown label as its own class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerSize {
    /// 20-foot standard.
    S20,
    /// 40-foot standard.
    S40,
    /// 40-foot high cube.
    S40Hc,
    /// 45-foot.
    S45,
    /// An unrecognized label, kept verbatim.
    Other(String),
}

impl ContainerSize {
    /// Parse a size from its wire label ("20", "40", "40HC", "45").
    ///
    /// Unknown labels are preserved as `Other`, never rejected.
    pub fn parse(label: &str) -> Self {
        match label {
            "20" => ContainerSize::S20,
            "40" => ContainerSize::S40,
            "40HC" => ContainerSize::S40Hc,
            "45" => ContainerSize::S45,
            other => ContainerSize::Other(other.to_string()),
        }
    }

    /// Returns the wire label for this size.
    pub fn as_str(&self) -> &str {
        match self {
            ContainerSize::S20 => "20",
            ContainerSize::S40 => "40",
            ContainerSize::S40Hc => "40HC",
            ContainerSize::S45 => "45",
            ContainerSize::Other(label) => label,
        }
    }
}

impl fmt::Display for ContainerSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shipment metadata attached to every leg of a container.
#[derive(Debug, Clone)]
pub struct LoadInfo {
    /// Import or export flow; decides the expected leg sequence.
    pub direction: ShipmentDirection,

    /// Validated ISO 6346 number, when the feed had one.
    pub container_number: Option<ContainerNumber>,

    /// Equipment size class.
    pub size: ContainerSize,

    /// Steamship line operating the box, when known.
    pub line: Option<ScacCode>,

    /// Hazardous-materials placard required.
    pub is_hazmat: bool,

    /// Overweight permit required.
    pub is_overweight: bool,

    /// Customer display name.
    pub customer: String,

    /// Terminal display name.
    pub terminal: String,

    /// Last free day before demurrage starts accruing.
    pub last_free_day: Option<NaiveDate>,
}

impl LoadInfo {
    /// Create metadata with the given direction and size. Display fields
    /// start empty; the optional fields start unset.
    pub fn new(direction: ShipmentDirection, size: ContainerSize) -> Self {
        Self {
            direction,
            container_number: None,
            size,
            line: None,
            is_hazmat: false,
            is_overweight: false,
            customer: String::new(),
            terminal: String::new(),
            last_free_day: None,
        }
    }
}

/// Order two optional deadlines: earlier first, present before absent.
///
/// A load with no last free day has no storage clock running, so it
/// sorts after everything that does.
pub fn cmp_last_free_day(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_deadline() -> impl Strategy<Value = Option<NaiveDate>> {
        prop::option::of((2020i32..2030, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
            NaiveDate::from_ymd_opt(y, m, d).unwrap()
        }))
    }

    proptest! {
        /// The comparator is antisymmetric
        #[test]
        fn deadline_cmp_antisymmetric(a in arb_deadline(), b in arb_deadline()) {
            prop_assert_eq!(cmp_last_free_day(a, b), cmp_last_free_day(b, a).reverse());
        }

        /// The comparator is transitive
        #[test]
        fn deadline_cmp_transitive(
            a in arb_deadline(),
            b in arb_deadline(),
            c in arb_deadline()
        ) {
            use Ordering::Greater;
            if cmp_last_free_day(a, b) != Greater && cmp_last_free_day(b, c) != Greater {
                prop_assert_ne!(cmp_last_free_day(a, c), Greater);
            }
        }

        /// A present deadline never sorts after an absent one
        #[test]
        fn present_before_absent(a in arb_deadline()) {
            if a.is_some() {
                prop_assert_ne!(cmp_last_free_day(a, None), Ordering::Greater);
            }
        }
    }
}
