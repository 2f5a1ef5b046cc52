//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::domain::{
    ContainerNumber, ContainerSize, Leg, LegStatus, LegType, LoadInfo, ScacCode,
    ShipmentDirection,
};
use crate::journey::aggregate;
use crate::matcher::{ExportCandidate, ImportCandidate, find_candidates};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/journeys", post(aggregate_journeys))
        .route("/street-turns", post(find_street_turns))
        .route("/containers/validate", get(validate_container))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Derive per-container journeys from a snapshot of legs.
async fn aggregate_journeys(body: Bytes) -> Result<Json<AggregateJourneysResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: AggregateJourneysRequest = serde_json::from_slice(&body).map_err(|e| {
        eprintln!("[JSON parse error] {e}");
        eprintln!("[Body] {}", String::from_utf8_lossy(&body));
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let mut legs = Vec::with_capacity(req.legs.len());
    for leg in &req.legs {
        legs.push(parse_leg(leg)?);
    }

    let journeys: Vec<JourneyResult> = aggregate(legs)
        .iter()
        .map(JourneyResult::from_journey)
        .collect();
    info!(
        legs = req.legs.len(),
        journeys = journeys.len(),
        "aggregated journeys"
    );

    Ok(Json(AggregateJourneysResponse { journeys }))
}

/// Rank street-turn pairings between import empties and export needs.
async fn find_street_turns(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FindStreetTurnsResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: FindStreetTurnsRequest = serde_json::from_slice(&body).map_err(|e| {
        eprintln!("[JSON parse error] {e}");
        eprintln!("[Body] {}", String::from_utf8_lossy(&body));
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let mut imports = Vec::with_capacity(req.imports.len());
    for candidate in &req.imports {
        imports.push(parse_import_candidate(candidate)?);
    }
    let mut exports = Vec::with_capacity(req.exports.len());
    for candidate in &req.exports {
        exports.push(parse_export_candidate(candidate)?);
    }

    let candidates: Vec<StreetTurnResult> = find_candidates(imports, exports, &state.config)
        .iter()
        .map(StreetTurnResult::from_candidate)
        .collect();
    info!(
        imports = req.imports.len(),
        exports = req.exports.len(),
        candidates = candidates.len(),
        "ranked street turns"
    );

    Ok(Json(FindStreetTurnsResponse { candidates }))
}

/// Validate an ISO 6346 container number.
///
/// Both outcomes are 200 responses; a rejected code is an answer for
/// the user, not a server failure.
async fn validate_container(
    Query(req): Query<ValidateContainerRequest>,
) -> Json<ValidateContainerResponse> {
    match ContainerNumber::parse(&req.code) {
        Ok(number) => Json(ValidateContainerResponse {
            valid: true,
            normalized: Some(number.as_str().to_string()),
            error: None,
        }),
        Err(e) => Json(ValidateContainerResponse {
            valid: false,
            normalized: None,
            error: Some(e.to_string()),
        }),
    }
}

/// Convert posted shipment metadata into a [`LoadInfo`].
///
/// Fields the engine orders or ranks by (direction, last free day) are
/// strict; advisory fields (container number, steamship line) fall back
/// to absent when they do not parse.
fn parse_load(req: &LoadRequest) -> Result<LoadInfo, AppError> {
    let direction =
        ShipmentDirection::parse(&req.direction).ok_or_else(|| AppError::BadRequest {
            message: format!("Invalid direction: {}", req.direction),
        })?;

    let mut load = LoadInfo::new(direction, ContainerSize::parse(&req.size));
    load.container_number = req
        .container_number
        .as_deref()
        .and_then(|c| ContainerNumber::parse(c).ok());
    load.line = req.line.as_deref().and_then(|s| ScacCode::parse(s).ok());
    load.is_hazmat = req.is_hazmat.unwrap_or(false);
    load.is_overweight = req.is_overweight.unwrap_or(false);
    load.customer = req.customer.clone().unwrap_or_default();
    load.terminal = req.terminal.clone().unwrap_or_default();
    load.last_free_day = req
        .last_free_day
        .as_deref()
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::BadRequest {
                message: format!("Invalid last free day: {s}"),
            })
        })
        .transpose()?;

    Ok(load)
}

/// Convert a posted leg into a domain [`Leg`].
///
/// Unknown leg types are kept as opaque labels; unknown statuses are
/// rejected, since every downstream decision reads the status.
fn parse_leg(req: &LegRequest) -> Result<Leg, AppError> {
    let status = LegStatus::parse(&req.status).ok_or_else(|| AppError::BadRequest {
        message: format!("Invalid leg status: {}", req.status),
    })?;

    let created_at = DateTime::parse_from_rfc3339(&req.created_at)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| AppError::BadRequest {
            message: format!("Invalid created_at time: {}", req.created_at),
        })?;

    let mut leg = Leg::new(
        req.id.clone(),
        req.container_id.clone(),
        LegType::parse(&req.leg_type),
        status,
        created_at,
        parse_load(&req.load)?,
    );
    leg.sequence = req.sequence;
    leg.pickup_label = req.pickup_label.clone().unwrap_or_default();
    leg.delivery_label = req.delivery_label.clone().unwrap_or_default();
    leg.driver_id = req.driver_id.clone();

    Ok(leg)
}

fn parse_import_candidate(req: &ImportCandidateRequest) -> Result<ImportCandidate, AppError> {
    let mut candidate = ImportCandidate::new(parse_leg(&req.leg)?, req.city.clone());
    candidate.empty_ready = req.empty_ready.unwrap_or(false);
    candidate.already_paired = req.already_paired.unwrap_or(false);
    Ok(candidate)
}

fn parse_export_candidate(req: &ExportCandidateRequest) -> Result<ExportCandidate, AppError> {
    let mut candidate = ExportCandidate::new(parse_leg(&req.leg)?, req.city.clone());
    candidate.already_paired = req.already_paired.unwrap_or(false);
    Ok(candidate)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        // Log errors to stderr for debugging
        eprintln!("[{status}] {message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
