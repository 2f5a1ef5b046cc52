//! Candidate records for street-turn matching.

use std::fmt;
use std::sync::Arc;

use crate::domain::{Leg, ScacCode};

/// An import empty waiting to go back to the terminal.
///
/// Wraps the container's empty-return leg with the bits of context the
/// matcher needs and the feed keeps outside the leg record.
#[derive(Debug, Clone)]
pub struct ImportCandidate {
    /// The empty-return leg.
    pub leg: Leg,

    /// City where the empty is sitting, usually the delivery city.
    pub city: String,

    /// Whether the customer has confirmed the box is unloaded.
    pub empty_ready: bool,

    /// Whether a turn has already been accepted for this leg.
    pub already_paired: bool,
}

impl ImportCandidate {
    /// Create a candidate that is not yet confirmed empty or paired.
    pub fn new(leg: Leg, city: String) -> Self {
        Self {
            leg,
            city,
            empty_ready: false,
            already_paired: false,
        }
    }
}

/// An export booking waiting for an empty container.
#[derive(Debug, Clone)]
pub struct ExportCandidate {
    /// The empty-pickup leg.
    pub leg: Leg,

    /// City where the empty is needed, usually the pickup city.
    pub city: String,

    /// Whether a turn has already been accepted for this leg.
    pub already_paired: bool,
}

impl ExportCandidate {
    /// Create a candidate that is not yet paired.
    pub fn new(leg: Leg, city: String) -> Self {
        Self {
            leg,
            city,
            already_paired: false,
        }
    }
}

/// Steamship-line agreement between the two sides of a pairing.
///
/// Carriers restrict whose bookings a box may serve, but interchange
/// agreements exist that this engine cannot see. The comparison travels
/// with the candidate as advisory data; it never changes the score, and
/// the dispatcher makes the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMatch {
    /// Both sides name the same line.
    Matched,
    /// The sides name different lines.
    Differs,
    /// At least one side has no line on record.
    Unknown,
}

impl LineMatch {
    /// Compare the lines on the two sides of a pairing.
    pub fn from_lines(import: Option<ScacCode>, export: Option<ScacCode>) -> Self {
        match (import, export) {
            (Some(a), Some(b)) if a == b => LineMatch::Matched,
            (Some(_), Some(_)) => LineMatch::Differs,
            _ => LineMatch::Unknown,
        }
    }

    /// Returns the wire label for this comparison.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineMatch::Matched => "MATCHED",
            LineMatch::Differs => "DIFFERS",
            LineMatch::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for LineMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored import/export pairing.
///
/// Candidates are derived values; one becomes a persisted street turn
/// only when a dispatcher accepts it, and that write belongs to the
/// caller.
#[derive(Debug, Clone)]
pub struct StreetTurnCandidate {
    /// The import side of the pairing.
    pub import: Arc<ImportCandidate>,

    /// The export side of the pairing.
    pub export: Arc<ExportCandidate>,

    /// Additive match score; 0 up to [`MatchConfig::max_score`].
    ///
    /// [`MatchConfig::max_score`]: super::MatchConfig::max_score
    pub score: u32,

    /// Advisory line comparison, never part of the score.
    pub line_match: LineMatch,

    /// Presentation estimate of what executing this turn saves, in
    /// cents.
    pub estimated_savings_cents: i64,
}

/// Lifecycle of an accepted street turn.
///
/// The matcher only ever produces `Potential` pairings; the rest of the
/// lifecycle is driven by dispatcher decisions and persisted elsewhere.
/// The engine answers which moves are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnStatus {
    /// Suggested by the matcher, not yet reviewed.
    Potential,
    /// A dispatcher has signed off on the pairing.
    Approved,
    /// The legs have been rewritten to hand the box across.
    Linked,
    /// The handoff happened.
    Completed,
    /// Dropped at any point before completion.
    Rejected,
}

impl TurnStatus {
    /// Parse a status from its wire label.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "POTENTIAL" => Some(TurnStatus::Potential),
            "APPROVED" => Some(TurnStatus::Approved),
            "LINKED" => Some(TurnStatus::Linked),
            "COMPLETED" => Some(TurnStatus::Completed),
            "REJECTED" => Some(TurnStatus::Rejected),
            _ => None,
        }
    }

    /// Returns the wire label for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnStatus::Potential => "POTENTIAL",
            TurnStatus::Approved => "APPROVED",
            TurnStatus::Linked => "LINKED",
            TurnStatus::Completed => "COMPLETED",
            TurnStatus::Rejected => "REJECTED",
        }
    }

    /// True for statuses that never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnStatus::Completed | TurnStatus::Rejected)
    }

    /// Whether a status move is legal.
    ///
    /// The forward flow is Potential -> Approved -> Linked -> Completed,
    /// and a turn can be rejected at any point before completion.
    pub fn can_transition_to(self, next: TurnStatus) -> bool {
        use TurnStatus::*;
        matches!(
            (self, next),
            (Potential, Approved | Rejected)
                | (Approved, Linked | Rejected)
                | (Linked, Completed | Rejected)
        )
    }
}

impl fmt::Display for TurnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
