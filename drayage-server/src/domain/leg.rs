//! Transport leg types.
//!
//! A `Leg` is one atomic, dispatchable container movement (dispatchers
//! call it an "order"): terminal to customer, customer back to terminal,
//! and so on. A container's journey state is derived from its legs on
//! every read, never stored.

use std::fmt;

use chrono::{DateTime, Utc};

use super::LoadInfo;

/// The kind of movement a leg performs.
///
/// The four known types cover the standard import and export flows.
/// Feeds occasionally carry labels this engine does not know (chassis
/// repositioning, one-off yard moves); those are preserved as `Other`
/// and treated as opaque display values, never as errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LegType {
    /// Loaded container from the terminal to the customer.
    ImportDelivery,
    /// Empty container from the customer back to the terminal.
    EmptyReturn,
    /// Empty container from the terminal or depot to the customer.
    EmptyPickup,
    /// Loaded container from the customer to the terminal.
    ExportPickup,
    /// An unrecognized label, kept verbatim for display.
    Other(String),
}

impl LegType {
    /// Parse a leg type from its wire label.
    ///
    /// Recognized labels are "IMPORT_DELIVERY", "EMPTY_RETURN",
    /// "EMPTY_PICKUP", and "EXPORT_PICKUP". Anything else becomes
    /// `Other` with the label preserved verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use drayage_server::domain::LegType;
    ///
    /// assert_eq!(LegType::parse("EMPTY_RETURN"), LegType::EmptyReturn);
    ///
    /// // Unknown labels are tolerated, not errors
    /// let chassis = LegType::parse("CHASSIS_FLIP");
    /// assert_eq!(chassis.as_str(), "CHASSIS_FLIP");
    /// assert!(!chassis.is_known());
    /// ```
    pub fn parse(label: &str) -> Self {
        match label {
            "IMPORT_DELIVERY" => LegType::ImportDelivery,
            "EMPTY_RETURN" => LegType::EmptyReturn,
            "EMPTY_PICKUP" => LegType::EmptyPickup,
            "EXPORT_PICKUP" => LegType::ExportPickup,
            other => LegType::Other(other.to_string()),
        }
    }

    /// Returns the wire label for this leg type.
    pub fn as_str(&self) -> &str {
        match self {
            LegType::ImportDelivery => "IMPORT_DELIVERY",
            LegType::EmptyReturn => "EMPTY_RETURN",
            LegType::EmptyPickup => "EMPTY_PICKUP",
            LegType::ExportPickup => "EXPORT_PICKUP",
            LegType::Other(label) => label,
        }
    }

    /// Returns true for the four types with journey semantics.
    /// `Other` legs stay visible but never count toward completeness.
    pub fn is_known(&self) -> bool {
        !matches!(self, LegType::Other(_))
    }
}

impl fmt::Display for LegType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatch status of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegStatus {
    /// Created but not yet ready to dispatch.
    Pending,
    /// Cleared for dispatch, waiting on a driver.
    Ready,
    /// Sent to a driver.
    Dispatched,
    /// Driver is actively working the leg.
    InProgress,
    /// Movement finished.
    Completed,
    /// Abandoned; excluded from journey state entirely.
    Cancelled,
}

impl LegStatus {
    /// Parse a status from its wire label. Statuses are a closed set,
    /// so unknown labels return `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "PENDING" => Some(LegStatus::Pending),
            "READY" => Some(LegStatus::Ready),
            "DISPATCHED" => Some(LegStatus::Dispatched),
            "IN_PROGRESS" => Some(LegStatus::InProgress),
            "COMPLETED" => Some(LegStatus::Completed),
            "CANCELLED" => Some(LegStatus::Cancelled),
            _ => None,
        }
    }

    /// Returns the wire label for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LegStatus::Pending => "PENDING",
            LegStatus::Ready => "READY",
            LegStatus::Dispatched => "DISPATCHED",
            LegStatus::InProgress => "IN_PROGRESS",
            LegStatus::Completed => "COMPLETED",
            LegStatus::Cancelled => "CANCELLED",
        }
    }

    /// True for `Completed`.
    pub fn is_completed(&self) -> bool {
        matches!(self, LegStatus::Completed)
    }

    /// True while a driver is moving the box (`Dispatched`, `InProgress`).
    pub fn is_in_flight(&self) -> bool {
        matches!(self, LegStatus::Dispatched | LegStatus::InProgress)
    }

    /// True while the leg is still waiting to roll (`Pending`, `Ready`).
    pub fn is_open(&self) -> bool {
        matches!(self, LegStatus::Pending | LegStatus::Ready)
    }

    /// True for statuses that never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LegStatus::Completed | LegStatus::Cancelled)
    }

    /// Whether a status move is legal on the dispatch board.
    ///
    /// The forward flow is Pending -> Ready -> Dispatched -> InProgress
    /// -> Completed. Dispatch may skip Ready, and drivers often complete
    /// a leg without an explicit in-progress ping. Any non-terminal leg
    /// can be cancelled; terminal statuses never move.
    ///
    /// The engine only answers legality; performing the move is the
    /// caller's write.
    pub fn can_transition_to(self, next: LegStatus) -> bool {
        use LegStatus::*;
        matches!(
            (self, next),
            (Pending, Ready | Dispatched | Cancelled)
                | (Ready, Dispatched | Cancelled)
                | (Dispatched, InProgress | Completed | Cancelled)
                | (InProgress, Completed | Cancelled)
        )
    }
}

impl fmt::Display for LegStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single recommended next move for a container's journey.
///
/// Exactly one applies at a time: finish what is rolling, dispatch what
/// is waiting, or create the first missing leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextAction {
    /// A leg is in flight; see it through.
    Complete(LegType),
    /// A leg is open; dispatch it.
    Dispatch(LegType),
    /// No leg exists yet for this expected type; create it.
    Create(LegType),
}

impl NextAction {
    /// Returns the verb for this action.
    pub fn verb(&self) -> &'static str {
        match self {
            NextAction::Complete(_) => "complete",
            NextAction::Dispatch(_) => "dispatch",
            NextAction::Create(_) => "create",
        }
    }

    /// Returns the leg type this action points at.
    pub fn leg_type(&self) -> &LegType {
        match self {
            NextAction::Complete(t) | NextAction::Dispatch(t) | NextAction::Create(t) => t,
        }
    }
}

impl fmt::Display for NextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb(), self.leg_type())
    }
}

/// One atomic container movement.
///
/// Carries its container's shipment metadata inline (`load`), attached
/// when the snapshot was assembled; the engine never looks containers
/// up itself.
#[derive(Debug, Clone)]
pub struct Leg {
    /// Opaque unique identifier.
    pub id: String,

    /// Owning container's identifier (a foreign key, not owned here).
    pub container_id: String,

    /// What kind of movement this is.
    pub leg_type: LegType,

    /// Dispatch status.
    pub status: LegStatus,

    /// Explicit ordering hint. Many feeds never populate it, so the
    /// aggregator falls back to `created_at`.
    pub sequence: Option<u32>,

    /// Creation time, the ordering fallback.
    pub created_at: DateTime<Utc>,

    /// Free-text pickup location, display only.
    pub pickup_label: String,

    /// Free-text delivery location, display only.
    pub delivery_label: String,

    /// Assigned driver, once dispatch has picked one.
    pub driver_id: Option<String>,

    /// The owning container's shipment metadata.
    pub load: LoadInfo,
}

impl Leg {
    /// Create a leg with empty display labels and no driver or sequence.
    pub fn new(
        id: String,
        container_id: String,
        leg_type: LegType,
        status: LegStatus,
        created_at: DateTime<Utc>,
        load: LoadInfo,
    ) -> Self {
        Self {
            id,
            container_id,
            leg_type,
            status,
            sequence: None,
            created_at,
            pickup_label: String::new(),
            delivery_label: String::new(),
            driver_id: None,
            load,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_status() -> impl Strategy<Value = LegStatus> {
        prop_oneof![
            Just(LegStatus::Pending),
            Just(LegStatus::Ready),
            Just(LegStatus::Dispatched),
            Just(LegStatus::InProgress),
            Just(LegStatus::Completed),
            Just(LegStatus::Cancelled),
        ]
    }

    proptest! {
        /// Every status is in exactly one of the four classification sets
        #[test]
        fn classification_partitions(status in arb_status()) {
            let cancelled = status == LegStatus::Cancelled;
            let buckets = [
                status.is_completed(),
                status.is_in_flight(),
                status.is_open(),
                cancelled,
            ];
            prop_assert_eq!(buckets.iter().filter(|b| **b).count(), 1);
        }

        /// Status labels roundtrip through parse
        #[test]
        fn status_label_roundtrip(status in arb_status()) {
            prop_assert_eq!(LegStatus::parse(status.as_str()), Some(status));
        }

        /// Cancellation is legal from exactly the non-terminal statuses
        #[test]
        fn cancel_iff_non_terminal(status in arb_status()) {
            prop_assert_eq!(
                status.can_transition_to(LegStatus::Cancelled),
                !status.is_terminal()
            );
        }

        /// No transition ever leaves a terminal status
        #[test]
        fn terminal_is_absorbing(status in arb_status(), next in arb_status()) {
            if status.is_terminal() {
                prop_assert!(!status.can_transition_to(next));
            }
        }

        /// A status never transitions to itself
        #[test]
        fn no_self_transitions(status in arb_status()) {
            prop_assert!(!status.can_transition_to(status));
        }

        /// Any leg-type label roundtrips through parse, known or not
        #[test]
        fn leg_type_label_roundtrip(label in "[A-Z_]{0,20}") {
            let parsed = LegType::parse(&label);
            prop_assert_eq!(parsed.as_str(), label.as_str());
        }
    }
}
