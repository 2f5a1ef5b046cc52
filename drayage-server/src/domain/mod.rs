//! Domain types for the drayage dispatch engine.
//!
//! This module contains the core domain model types that represent
//! validated shipment data. Identifier types enforce their invariants at
//! construction time, so code that receives them can trust their
//! validity; leg and load records are plain data attached by the caller.

mod container;
mod leg;
mod line;
mod load;

pub use container::{ContainerNumber, InvalidContainerNumber, compute_check_digit};
pub use leg::{Leg, LegStatus, LegType, NextAction};
pub use line::{InvalidScac, ScacCode};
pub use load::{ContainerSize, LoadInfo, ShipmentDirection, cmp_last_free_day};
