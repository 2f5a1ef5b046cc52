//! Drayage dispatch engine.
//!
//! A web service that answers: "given every leg we know about, what is
//! each container's journey, what should happen next, and which import
//! empties can turn straight into export bookings?"

pub mod domain;
pub mod journey;
pub mod matcher;
pub mod web;
