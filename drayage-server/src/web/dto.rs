//! Data transfer objects for web requests and responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Leg, NextAction};
use crate::journey::Journey;
use crate::matcher::StreetTurnCandidate;

/// A leg as posted by a caller.
///
/// Timestamps are RFC 3339 strings and dates are `YYYY-MM-DD`; both are
/// validated by the handler. Labels the engine only displays travel as
/// plain strings.
#[derive(Debug, Deserialize)]
pub struct LegRequest {
    /// Unique leg identifier
    pub id: String,

    /// Owning container identifier
    pub container_id: String,

    /// Leg type label (e.g. "IMPORT_DELIVERY"); unknown labels are kept
    pub leg_type: String,

    /// Dispatch status label (e.g. "PENDING")
    pub status: String,

    /// Explicit ordering hint, if the feed has one
    pub sequence: Option<u32>,

    /// Creation time, RFC 3339
    pub created_at: String,

    /// Free-text pickup location
    pub pickup_label: Option<String>,

    /// Free-text delivery location
    pub delivery_label: Option<String>,

    /// Assigned driver, if dispatched
    pub driver_id: Option<String>,

    /// The owning container's shipment metadata
    pub load: LoadRequest,
}

/// Shipment metadata attached to a posted leg.
#[derive(Debug, Deserialize)]
pub struct LoadRequest {
    /// "IMPORT" or "EXPORT"
    pub direction: String,

    /// ISO 6346 container number; ignored when not valid
    pub container_number: Option<String>,

    /// Equipment size label (e.g. "40", "40HC")
    pub size: String,

    /// Steamship line SCAC; ignored when not valid
    pub line: Option<String>,

    /// Hazardous-materials placard required
    pub is_hazmat: Option<bool>,

    /// Overweight permit required
    pub is_overweight: Option<bool>,

    /// Customer display name
    pub customer: Option<String>,

    /// Terminal display name
    pub terminal: Option<String>,

    /// Last free day, `YYYY-MM-DD`
    pub last_free_day: Option<String>,
}

/// Request to derive journeys from a leg snapshot.
#[derive(Debug, Deserialize)]
pub struct AggregateJourneysRequest {
    /// Legs for any number of containers, in any order
    pub legs: Vec<LegRequest>,
}

/// An import-side street-turn candidate as posted by a caller.
#[derive(Debug, Deserialize)]
pub struct ImportCandidateRequest {
    /// The empty-return leg
    pub leg: LegRequest,

    /// City where the empty is sitting
    pub city: String,

    /// Whether the customer confirmed the box is unloaded
    pub empty_ready: Option<bool>,

    /// Whether a turn was already accepted for this leg
    pub already_paired: Option<bool>,
}

/// An export-side street-turn candidate as posted by a caller.
#[derive(Debug, Deserialize)]
pub struct ExportCandidateRequest {
    /// The empty-pickup leg
    pub leg: LegRequest,

    /// City where the empty is needed
    pub city: String,

    /// Whether a turn was already accepted for this leg
    pub already_paired: Option<bool>,
}

/// Request to rank street-turn pairings.
#[derive(Debug, Deserialize)]
pub struct FindStreetTurnsRequest {
    /// Imports that owe an empty back
    pub imports: Vec<ImportCandidateRequest>,

    /// Exports that need an empty
    pub exports: Vec<ExportCandidateRequest>,
}

/// Request to validate a container number.
#[derive(Debug, Deserialize)]
pub struct ValidateContainerRequest {
    /// The code to check, in whatever shape the user typed it
    pub code: String,
}

/// A leg in a journey response.
#[derive(Debug, Serialize)]
pub struct LegResult {
    /// Unique leg identifier
    pub id: String,

    /// Leg type label
    pub leg_type: String,

    /// Dispatch status label
    pub status: String,

    /// Explicit ordering hint, if any
    pub sequence: Option<u32>,

    /// Creation time, RFC 3339
    pub created_at: String,

    /// Free-text pickup location
    pub pickup_label: String,

    /// Free-text delivery location
    pub delivery_label: String,

    /// Assigned driver, if any
    pub driver_id: Option<String>,
}

/// The recommended next move for a journey.
#[derive(Debug, Serialize)]
pub struct NextActionResult {
    /// "complete", "dispatch", or "create"
    pub verb: String,

    /// The leg type the action points at
    pub leg_type: String,

    /// Display form, e.g. "create EMPTY_RETURN"
    pub label: String,
}

/// A container's derived journey.
#[derive(Debug, Serialize)]
pub struct JourneyResult {
    /// The container this journey describes
    pub container_id: String,

    /// "IMPORT" or "EXPORT"
    pub direction: String,

    /// Validated container number, if the feed had one
    pub container_number: Option<String>,

    /// Customer display name
    pub customer: String,

    /// Terminal display name
    pub terminal: String,

    /// Last free day, `YYYY-MM-DD`
    pub last_free_day: Option<String>,

    /// Planned leg type labels, in order
    pub expected_leg_types: Vec<String>,

    /// Planned leg types already completed, in plan order
    pub completed_leg_types: Vec<String>,

    /// Completed steps, plus 0.5 while a leg is rolling
    pub current_step_index: f64,

    /// Progress through the plan, 0.0 to 1.0
    pub progress: f64,

    /// Recommended next move, absent when nothing is left
    pub next_action: Option<NextActionResult>,

    /// Whether every planned leg is completed
    pub is_complete: bool,

    /// Whether any leg is currently rolling
    pub in_flight: bool,

    /// Every leg, cancelled ones included, in display order
    pub legs: Vec<LegResult>,
}

/// Response for journey aggregation.
#[derive(Debug, Serialize)]
pub struct AggregateJourneysResponse {
    /// One journey per container, most urgent first
    pub journeys: Vec<JourneyResult>,
}

/// A ranked street-turn pairing.
#[derive(Debug, Serialize)]
pub struct StreetTurnResult {
    /// The import-side empty-return leg
    pub import_leg_id: String,

    /// The export-side empty-pickup leg
    pub export_leg_id: String,

    /// Container offering its empty
    pub import_container_id: String,

    /// Container booking needing an empty
    pub export_container_id: String,

    /// City where the empty is sitting
    pub import_city: String,

    /// City where the empty is needed
    pub export_city: String,

    /// Additive match score
    pub score: u32,

    /// "MATCHED", "DIFFERS", or "UNKNOWN"
    pub line_match: String,

    /// Estimated savings of executing this turn, in cents
    pub estimated_savings_cents: i64,
}

/// Response for street-turn matching.
#[derive(Debug, Serialize)]
pub struct FindStreetTurnsResponse {
    /// Every eligible pairing, best first
    pub candidates: Vec<StreetTurnResult>,
}

/// Response for container-number validation.
///
/// Both outcomes are ordinary responses; a failed check is feedback for
/// the user, not a server error.
#[derive(Debug, Serialize)]
pub struct ValidateContainerResponse {
    /// Whether the code passed every check
    pub valid: bool,

    /// The normalized code, present only when valid
    pub normalized: Option<String>,

    /// Why the code was rejected, present only when invalid
    pub error: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl LegResult {
    /// Create from a domain Leg.
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            id: leg.id.clone(),
            leg_type: leg.leg_type.as_str().to_string(),
            status: leg.status.as_str().to_string(),
            sequence: leg.sequence,
            created_at: format_timestamp(&leg.created_at),
            pickup_label: leg.pickup_label.clone(),
            delivery_label: leg.delivery_label.clone(),
            driver_id: leg.driver_id.clone(),
        }
    }
}

impl NextActionResult {
    /// Create from a domain NextAction.
    pub fn from_action(action: &NextAction) -> Self {
        Self {
            verb: action.verb().to_string(),
            leg_type: action.leg_type().as_str().to_string(),
            label: action.to_string(),
        }
    }
}

impl JourneyResult {
    /// Create from a domain Journey.
    pub fn from_journey(journey: &Journey) -> Self {
        Self {
            container_id: journey.container_id.clone(),
            direction: journey.load.direction.as_str().to_string(),
            container_number: journey
                .load
                .container_number
                .map(|n| n.as_str().to_string()),
            customer: journey.load.customer.clone(),
            terminal: journey.load.terminal.clone(),
            last_free_day: journey.load.last_free_day.as_ref().map(format_date),
            expected_leg_types: journey
                .expected
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            completed_leg_types: journey
                .completed
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            current_step_index: journey.current_step_index(),
            progress: journey.progress_fraction(),
            next_action: journey.next_action.as_ref().map(NextActionResult::from_action),
            is_complete: journey.is_complete(),
            in_flight: journey.in_flight,
            legs: journey.legs.iter().map(LegResult::from_leg).collect(),
        }
    }
}

impl StreetTurnResult {
    /// Create from a domain StreetTurnCandidate.
    pub fn from_candidate(candidate: &StreetTurnCandidate) -> Self {
        Self {
            import_leg_id: candidate.import.leg.id.clone(),
            export_leg_id: candidate.export.leg.id.clone(),
            import_container_id: candidate.import.leg.container_id.clone(),
            export_container_id: candidate.export.leg.container_id.clone(),
            import_city: candidate.import.city.clone(),
            export_city: candidate.export.city.clone(),
            score: candidate.score,
            line_match: candidate.line_match.as_str().to_string(),
            estimated_savings_cents: candidate.estimated_savings_cents,
        }
    }
}

/// Format a timestamp as RFC 3339.
fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339()
}

/// Format a date as `YYYY-MM-DD`.
fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
