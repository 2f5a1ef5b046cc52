//! The leg plan for each shipment direction.
//!
//! A container's direction decides which legs it is expected to run.
//! Imports come off the vessel loaded and the box goes back empty;
//! exports go out to the customer empty and come back loaded. The plan
//! is a fixed table, not data: trucking flows change far less often
//! than the code around them.

use crate::domain::{LegType, ShipmentDirection};

/// Legs an import runs: deliver the loaded box, return the empty.
static IMPORT_LEGS: [LegType; 2] = [LegType::ImportDelivery, LegType::EmptyReturn];

/// Legs an export runs: fetch an empty, haul the loaded box in.
static EXPORT_LEGS: [LegType; 2] = [LegType::EmptyPickup, LegType::ExportPickup];

/// The ordered leg types a container with the given direction is
/// expected to complete.
///
/// # Example
///
/// ```
/// use drayage_server::domain::{LegType, ShipmentDirection};
/// use drayage_server::journey::expected_leg_types;
///
/// let plan = expected_leg_types(ShipmentDirection::Import);
/// assert_eq!(plan, &[LegType::ImportDelivery, LegType::EmptyReturn]);
/// ```
pub fn expected_leg_types(direction: ShipmentDirection) -> &'static [LegType] {
    match direction {
        ShipmentDirection::Import => &IMPORT_LEGS,
        ShipmentDirection::Export => &EXPORT_LEGS,
    }
}
