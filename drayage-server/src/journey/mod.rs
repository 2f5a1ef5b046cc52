//! Container journey derivation.
//!
//! This module answers the dispatcher's standing question: "where is
//! this container in its lifecycle, and what should happen to it next?"
//!
//! Journeys are never stored. The engine re-derives them from the raw
//! legs on every read, so the answer reflects exactly what is on the
//! dispatch board right now.

mod aggregate;
mod plan;

pub use aggregate::{Journey, aggregate, build_journey, order_journeys};
pub use plan::expected_leg_types;
