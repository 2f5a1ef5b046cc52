//! Journey assembly from raw legs.
//!
//! A journey is a projection: it is derived from the container's legs on
//! every read and never stored, so it cannot drift out of sync with the
//! dispatch board. Feeds are messy (duplicate types, unknown types,
//! cancelled legs, missing sequence numbers) and none of that is fatal;
//! the aggregator always produces a usable journey.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::domain::{Leg, LegStatus, LegType, LoadInfo, NextAction, cmp_last_free_day};

use super::plan::expected_leg_types;

/// A container's derived journey state.
#[derive(Debug, Clone)]
pub struct Journey {
    /// The container this journey describes.
    pub container_id: String,

    /// Shipment metadata, taken from the first leg in sort order.
    pub load: LoadInfo,

    /// Every leg of the container in display order, cancelled ones
    /// included. Cancelled legs stay visible; they just carry no state.
    pub legs: Vec<Leg>,

    /// The leg types the plan expects for this load's direction.
    pub expected: Vec<LegType>,

    /// Planned leg types that have a completed leg, in plan order.
    /// Completed legs of unplanned types stay visible in `legs` but
    /// are not listed here.
    pub completed: Vec<LegType>,

    /// The single recommended move, or `None` when nothing is left.
    pub next_action: Option<NextAction>,

    /// Whether any leg is currently dispatched or in progress.
    pub in_flight: bool,
}

impl Journey {
    /// Whether every planned leg type has a completed leg.
    ///
    /// Always derived from `completed`, never cached: a stored flag
    /// would go stale the moment a leg is cancelled or re-run.
    pub fn is_complete(&self) -> bool {
        self.expected.iter().all(|t| self.completed.contains(t))
    }

    /// Planned leg types not yet completed, in plan order.
    pub fn missing(&self) -> Vec<LegType> {
        self.expected
            .iter()
            .filter(|t| !self.completed.contains(t))
            .cloned()
            .collect()
    }

    /// How far along the plan this journey is, in steps.
    ///
    /// Counts completed planned legs, plus a half step while a leg is
    /// in flight.
    pub fn current_step_index(&self) -> f64 {
        let done = self.completed.len() as f64;
        if self.in_flight { done + 0.5 } else { done }
    }

    /// Progress through the plan as a fraction in `0.0..=1.0`.
    ///
    /// Clamped to 1.0: moves beyond the plan do not overfill the bar.
    pub fn progress_fraction(&self) -> f64 {
        if self.expected.is_empty() {
            return 1.0;
        }
        (self.current_step_index() / self.expected.len() as f64).min(1.0)
    }
}

/// Cancelled legs are excluded from all derived state.
fn is_live(leg: &Leg) -> bool {
    leg.status != LegStatus::Cancelled
}

/// Sort legs for display and state derivation.
///
/// Sequence numbers are honored only when every leg carries one; a
/// partial sequence would interleave arbitrarily with the rest, so the
/// fallback is creation time. Both sorts are stable.
fn sort_legs(legs: &mut [Leg]) {
    if legs.iter().all(|l| l.sequence.is_some()) {
        legs.sort_by_key(|l| l.sequence);
    } else {
        legs.sort_by_key(|l| l.created_at);
    }
}

/// Build the journey for one container from its legs.
///
/// The legs may arrive in any order and may be empty; a container that
/// exists but has no legs yet gets a journey pointing at the first
/// planned leg.
///
/// # Example
///
/// ```
/// use chrono::DateTime;
/// use drayage_server::domain::{
///     ContainerSize, Leg, LegStatus, LegType, LoadInfo, NextAction, ShipmentDirection,
/// };
/// use drayage_server::journey::build_journey;
///
/// let load = LoadInfo::new(ShipmentDirection::Import, ContainerSize::S40);
/// let delivered = Leg::new(
///     "leg-1".into(),
///     "cont-1".into(),
///     LegType::ImportDelivery,
///     LegStatus::Completed,
///     DateTime::from_timestamp(0, 0).unwrap(),
///     load.clone(),
/// );
///
/// let journey = build_journey("cont-1".into(), load, vec![delivered]);
/// assert!(!journey.is_complete());
/// assert_eq!(
///     journey.next_action,
///     Some(NextAction::Create(LegType::EmptyReturn))
/// );
/// ```
pub fn build_journey(container_id: String, load: LoadInfo, mut legs: Vec<Leg>) -> Journey {
    sort_legs(&mut legs);

    let expected: Vec<LegType> = expected_leg_types(load.direction).to_vec();

    // Completed legs are never cancelled, so no liveness check here.
    // Duplicates collapse, and unplanned types drop out.
    let completed: Vec<LegType> = expected
        .iter()
        .filter(|t| {
            legs.iter()
                .any(|l| l.status.is_completed() && &l.leg_type == *t)
        })
        .cloned()
        .collect();

    let in_flight_type = legs
        .iter()
        .find(|l| is_live(l) && l.status.is_in_flight())
        .map(|l| l.leg_type.clone());
    let open_type = legs
        .iter()
        .find(|l| is_live(l) && l.status.is_open())
        .map(|l| l.leg_type.clone());

    let in_flight = in_flight_type.is_some();

    // Precedence: finish what is rolling, then dispatch what is
    // waiting, then create the first planned leg nothing covers.
    let next_action = if let Some(t) = in_flight_type {
        Some(NextAction::Complete(t))
    } else if let Some(t) = open_type {
        Some(NextAction::Dispatch(t))
    } else {
        expected
            .iter()
            .find(|t| !legs.iter().any(|l| is_live(l) && &l.leg_type == *t))
            .cloned()
            .map(NextAction::Create)
    };

    Journey {
        container_id,
        load,
        legs,
        expected,
        completed,
        next_action,
        in_flight,
    }
}

/// Group a mixed bag of legs into one journey per container.
///
/// Containers appear in the output ordered by urgency (see
/// [`order_journeys`]); within equal urgency, first appearance in the
/// input decides, so the result is deterministic for a given feed.
pub fn aggregate(legs: Vec<Leg>) -> Vec<Journey> {
    let total_legs = legs.len();
    let mut seen: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<Leg>> = HashMap::new();

    for leg in legs {
        if !groups.contains_key(&leg.container_id) {
            seen.push(leg.container_id.clone());
        }
        groups
            .entry(leg.container_id.clone())
            .or_default()
            .push(leg);
    }

    debug!(
        legs = total_legs,
        containers = seen.len(),
        "grouped legs by container"
    );

    let mut journeys = Vec::with_capacity(seen.len());
    for container_id in seen {
        let mut group = groups.remove(&container_id).unwrap_or_default();
        sort_legs(&mut group);
        let load = match group.first() {
            Some(first) => first.load.clone(),
            None => continue,
        };

        let journey = build_journey(container_id, load, group);
        trace!(
            container = %journey.container_id,
            legs = journey.legs.len(),
            complete = journey.is_complete(),
            "derived journey"
        );
        journeys.push(journey);
    }

    order_journeys(journeys)
}

/// Order journeys by dispatch urgency.
///
/// Journeys are ordered by:
/// 1. Completeness (unfinished work first)
/// 2. Last free day (earlier first, present before absent)
///
/// The sort is stable, so ties keep their input order.
pub fn order_journeys(mut journeys: Vec<Journey>) -> Vec<Journey> {
    journeys.sort_by(|a, b| {
        // Primary: unfinished work first
        let complete_cmp = a.is_complete().cmp(&b.is_complete());
        if complete_cmp != std::cmp::Ordering::Equal {
            return complete_cmp;
        }

        // Secondary: tighter demurrage clock first
        cmp_last_free_day(a.load.last_free_day, b.load.last_free_day)
    });

    journeys
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{ContainerSize, ShipmentDirection};
    use chrono::DateTime;
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

    fn arb_leg_type() -> impl Strategy<Value = LegType> {
        prop_oneof![
            Just(LegType::ImportDelivery),
            Just(LegType::EmptyReturn),
            Just(LegType::EmptyPickup),
            Just(LegType::ExportPickup),
            Just(LegType::Other("YARD_MOVE".to_string())),
        ]
    }

    fn arb_direction() -> impl Strategy<Value = ShipmentDirection> {
        prop_oneof![
            Just(ShipmentDirection::Import),
            Just(ShipmentDirection::Export),
        ]
    }

    /// A bag of legs spread over a small pool of containers, so
    /// partitions regularly hold several legs.
    fn arb_legs() -> impl Strategy<Value = Vec<Leg>> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["AAA", "BBB", "CCC"]),
                arb_direction(),
                arb_leg_type(),
                arb_status(),
                0i64..100_000,
                prop::option::of(0u32..10),
            ),
            0..20,
        )
        .prop_map(|parts| {
            parts
                .into_iter()
                .enumerate()
                .map(|(i, (container, direction, leg_type, status, secs, sequence))| {
                    let mut leg = Leg::new(
                        format!("leg-{i}"),
                        container.to_string(),
                        leg_type,
                        status,
                        DateTime::from_timestamp(secs, 0).unwrap(),
                        LoadInfo::new(direction, ContainerSize::S40),
                    );
                    leg.sequence = sequence;
                    leg
                })
                .collect()
        })
    }

    proptest! {
        /// Every input leg lands in exactly one journey, under its own
        /// container
        #[test]
        fn every_leg_lands_in_exactly_one_journey(legs in arb_legs()) {
            let mut input_ids: Vec<String> =
                legs.iter().map(|l| l.id.clone()).collect();
            let journeys = aggregate(legs);
            let mut output_ids: Vec<String> = journeys
                .iter()
                .flat_map(|j| j.legs.iter().map(|l| l.id.clone()))
                .collect();

            input_ids.sort();
            output_ids.sort();
            prop_assert_eq!(input_ids, output_ids);

            for j in &journeys {
                prop_assert!(j.legs.iter().all(|l| l.container_id == j.container_id));
            }
        }

        /// No finished journey ever appears before an unfinished one
        #[test]
        fn unfinished_journeys_always_lead(legs in arb_legs()) {
            let journeys = aggregate(legs);
            for w in journeys.windows(2) {
                if w[0].is_complete() {
                    prop_assert!(w[1].is_complete());
                }
            }
        }

        /// Within a journey, legs are ordered by sequence when every leg
        /// has one, otherwise by creation time
        #[test]
        fn legs_within_a_journey_are_ordered(legs in arb_legs()) {
            for j in aggregate(legs) {
                if j.legs.iter().all(|l| l.sequence.is_some()) {
                    for w in j.legs.windows(2) {
                        prop_assert!(w[0].sequence <= w[1].sequence);
                    }
                } else {
                    for w in j.legs.windows(2) {
                        prop_assert!(w[0].created_at <= w[1].created_at);
                    }
                }
            }
        }

        /// Completeness always agrees with the raw legs
        #[test]
        fn completion_requires_every_planned_leg(legs in arb_legs()) {
            for j in aggregate(legs) {
                let from_legs = j.expected.iter().all(|t| {
                    j.legs
                        .iter()
                        .any(|l| l.status == LegStatus::Completed && &l.leg_type == t)
                });
                prop_assert_eq!(j.is_complete(), from_legs);
            }
        }

        /// The next action always comes from the highest-precedence
        /// branch that applies
        #[test]
        fn next_action_respects_precedence(legs in arb_legs()) {
            for j in aggregate(legs) {
                let has_in_flight = j
                    .legs
                    .iter()
                    .any(|l| l.status.is_in_flight());
                let has_open = j.legs.iter().any(|l| l.status.is_open());

                match &j.next_action {
                    Some(NextAction::Complete(_)) => prop_assert!(has_in_flight),
                    Some(NextAction::Dispatch(_)) => {
                        prop_assert!(!has_in_flight && has_open);
                    }
                    Some(NextAction::Create(t)) => {
                        prop_assert!(!has_in_flight && !has_open);
                        prop_assert!(j.expected.contains(t));
                    }
                    None => {
                        prop_assert!(!has_in_flight && !has_open);
                        prop_assert!(j.is_complete());
                    }
                }
            }
        }

        /// Aggregation is a pure function of its input
        #[test]
        fn aggregation_is_deterministic(legs in arb_legs()) {
            let render = |journeys: &[Journey]| {
                journeys
                    .iter()
                    .map(|j| {
                        (
                            j.container_id.clone(),
                            j.next_action.as_ref().map(|a| a.to_string()),
                            j.is_complete(),
                        )
                    })
                    .collect::<Vec<_>>()
            };

            let first = aggregate(legs.clone());
            let second = aggregate(legs);
            prop_assert_eq!(render(&first), render(&second));
        }

        /// A container with no legs is never complete and always starts
        /// at the first planned leg
        #[test]
        fn zero_leg_journeys_are_never_complete(direction in arb_direction()) {
            let load = LoadInfo::new(direction, ContainerSize::S40);
            let journey = build_journey("TEST".into(), load, Vec::new());

            prop_assert!(!journey.is_complete());
            let first = expected_leg_types(direction)[0].clone();
            prop_assert_eq!(journey.next_action, Some(NextAction::Create(first)));
        }
    }
}
