//! Street-turn pairing and scoring.
//!
//! A street turn hands an import's freshly-emptied container straight
//! to a nearby exporter, replacing two terminal trips with one handoff.
//! The matcher scores every eligible import/export pair and ranks the
//! lot; it never filters on score. A weak pairing can still be the best
//! available on a slow day, so the display cutoff is the dispatcher's
//! call.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::{LegType, cmp_last_free_day};

use super::candidates::{ExportCandidate, ImportCandidate, LineMatch, StreetTurnCandidate};
use super::config::MatchConfig;

/// Whether an import leg can offer its empty to an export.
///
/// The leg must be an empty return that is still open (pending or
/// ready), have no driver on it, and not already belong to an accepted
/// turn.
pub fn eligible_import(candidate: &ImportCandidate) -> bool {
    candidate.leg.leg_type == LegType::EmptyReturn
        && candidate.leg.status.is_open()
        && candidate.leg.driver_id.is_none()
        && !candidate.already_paired
}

/// Whether an export leg can take its empty from an import.
///
/// Mirrors [`eligible_import`] for the empty-pickup side.
pub fn eligible_export(candidate: &ExportCandidate) -> bool {
    candidate.leg.leg_type == LegType::EmptyPickup
        && candidate.leg.status.is_open()
        && candidate.leg.driver_id.is_none()
        && !candidate.already_paired
}

/// Case-insensitive, whitespace-trimmed city comparison. Unknown
/// cities never match, not even each other.
fn cities_match(a: &str, b: &str) -> bool {
    let a = a.trim();
    let b = b.trim();
    !a.is_empty() && a.eq_ignore_ascii_case(b)
}

/// Score one import/export pairing.
///
/// The score is additive over independent signals:
/// 1. Same city (the dominant weight)
/// 2. Same equipment size
/// 3. The import empty confirmed unloaded
///
/// Line agreement is not one of them; see [`LineMatch`].
pub fn score_pair(
    import: &ImportCandidate,
    export: &ExportCandidate,
    config: &MatchConfig,
) -> u32 {
    let mut score = 0;

    if cities_match(&import.city, &export.city) {
        score += config.city_weight;
    }
    if import.leg.load.size == export.leg.load.size {
        score += config.size_weight;
    }
    if import.empty_ready {
        score += config.empty_ready_weight;
    }

    score
}

/// Pair every eligible import with every eligible export, scored and
/// ranked.
///
/// Ineligible candidates are dropped up front; everything left is
/// paired all-against-all, so the result can be large. See
/// [`rank_candidates`] for the order.
pub fn find_candidates(
    imports: Vec<ImportCandidate>,
    exports: Vec<ExportCandidate>,
    config: &MatchConfig,
) -> Vec<StreetTurnCandidate> {
    let imports: Vec<Arc<ImportCandidate>> = imports
        .into_iter()
        .filter(eligible_import)
        .map(Arc::new)
        .collect();
    let exports: Vec<Arc<ExportCandidate>> = exports
        .into_iter()
        .filter(eligible_export)
        .map(Arc::new)
        .collect();

    debug!(
        imports = imports.len(),
        exports = exports.len(),
        "pairing eligible street-turn candidates"
    );

    let mut candidates = Vec::with_capacity(imports.len() * exports.len());
    for import in &imports {
        for export in &exports {
            let score = score_pair(import, export, config);
            trace!(
                import = %import.leg.id,
                export = %export.leg.id,
                score,
                "scored pairing"
            );
            candidates.push(StreetTurnCandidate {
                import: Arc::clone(import),
                export: Arc::clone(export),
                score,
                line_match: LineMatch::from_lines(import.leg.load.line, export.leg.load.line),
                estimated_savings_cents: config.savings_per_turn_cents,
            });
        }
    }

    rank_candidates(candidates)
}

/// Order candidates for presentation.
///
/// Candidates are ordered by:
/// 1. Score (higher first)
/// 2. The import's last free day (sooner first, present before absent)
///
/// The sort is stable and pairing order is fixed by input order, so
/// re-running the matcher on an unchanged snapshot returns the same
/// list.
pub fn rank_candidates(mut candidates: Vec<StreetTurnCandidate>) -> Vec<StreetTurnCandidate> {
    candidates.sort_by(|a, b| {
        // Primary: stronger pairing first
        let score_cmp = b.score.cmp(&a.score);
        if score_cmp != std::cmp::Ordering::Equal {
            return score_cmp;
        }

        // Secondary: most urgent import inventory first
        cmp_last_free_day(
            a.import.leg.load.last_free_day,
            b.import.leg.load.last_free_day,
        )
    });

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ContainerSize, Leg, LegStatus, LoadInfo, ScacCode, ShipmentDirection,
    };
    use chrono::{DateTime, NaiveDate, Utc};

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn return_leg(id: &str, size: ContainerSize) -> Leg {
        Leg::new(
            id.into(),
            format!("cont-{id}"),
            LegType::EmptyReturn,
            LegStatus::Pending,
            ts(0),
            LoadInfo::new(ShipmentDirection::Import, size),
        )
    }

    fn pickup_leg(id: &str, size: ContainerSize) -> Leg {
        Leg::new(
            id.into(),
            format!("cont-{id}"),
            LegType::EmptyPickup,
            LegStatus::Pending,
            ts(0),
            LoadInfo::new(ShipmentDirection::Export, size),
        )
    }

    fn import(id: &str, city: &str, size: ContainerSize, ready: bool) -> ImportCandidate {
        let mut c = ImportCandidate::new(return_leg(id, size), city.into());
        c.empty_ready = ready;
        c
    }

    fn export(id: &str, city: &str, size: ContainerSize) -> ExportCandidate {
        ExportCandidate::new(pickup_leg(id, size), city.into())
    }

    #[test]
    fn eligible_import_requires_open_unassigned_return() {
        let base = import("i1", "Carson", ContainerSize::S40, true);
        assert!(eligible_import(&base));

        let mut ready_status = base.clone();
        ready_status.leg.status = LegStatus::Ready;
        assert!(eligible_import(&ready_status));

        let mut dispatched = base.clone();
        dispatched.leg.status = LegStatus::Dispatched;
        assert!(!eligible_import(&dispatched));

        let mut done = base.clone();
        done.leg.status = LegStatus::Completed;
        assert!(!eligible_import(&done));

        let mut driven = base.clone();
        driven.leg.driver_id = Some("drv-9".into());
        assert!(!eligible_import(&driven));

        let mut paired = base.clone();
        paired.already_paired = true;
        assert!(!eligible_import(&paired));

        let mut wrong_type = base.clone();
        wrong_type.leg.leg_type = LegType::ImportDelivery;
        assert!(!eligible_import(&wrong_type));
    }

    #[test]
    fn eligible_export_requires_open_unassigned_pickup() {
        let base = export("e1", "Carson", ContainerSize::S40);
        assert!(eligible_export(&base));

        let mut cancelled = base.clone();
        cancelled.leg.status = LegStatus::Cancelled;
        assert!(!eligible_export(&cancelled));

        let mut driven = base.clone();
        driven.leg.driver_id = Some("drv-9".into());
        assert!(!eligible_export(&driven));

        let mut paired = base.clone();
        paired.already_paired = true;
        assert!(!eligible_export(&paired));

        let mut wrong_type = base.clone();
        wrong_type.leg.leg_type = LegType::ExportPickup;
        assert!(!eligible_export(&wrong_type));
    }

    #[test]
    fn perfect_pair_scores_the_maximum() {
        let config = MatchConfig::default();
        let score = score_pair(
            &import("i1", "Carson", ContainerSize::S40, true),
            &export("e1", "Carson", ContainerSize::S40),
            &config,
        );
        assert_eq!(score, config.max_score());
    }

    #[test]
    fn city_match_is_worth_the_most() {
        let config = MatchConfig::default();

        let city_only = score_pair(
            &import("i1", "Carson", ContainerSize::S20, false),
            &export("e1", "Carson", ContainerSize::S40),
            &config,
        );
        let everything_else = score_pair(
            &import("i2", "Carson", ContainerSize::S40, true),
            &export("e2", "Long Beach", ContainerSize::S40),
            &config,
        );

        assert_eq!(city_only, 55);
        assert_eq!(everything_else, 45);
        assert!(city_only > everything_else);
    }

    #[test]
    fn city_comparison_ignores_case_and_padding() {
        let config = MatchConfig::default();
        let score = score_pair(
            &import("i1", "  CARSON ", ContainerSize::S40, false),
            &export("e1", "carson", ContainerSize::S20),
            &config,
        );
        assert_eq!(score, config.city_weight);
    }

    #[test]
    fn blank_cities_never_match() {
        let config = MatchConfig::default();
        let score = score_pair(
            &import("i1", "  ", ContainerSize::S40, false),
            &export("e1", "", ContainerSize::S40),
            &config,
        );
        assert_eq!(score, config.size_weight);
    }

    #[test]
    fn line_never_moves_the_score() {
        let config = MatchConfig::default();
        let mut same_line = import("i1", "Carson", ContainerSize::S40, true);
        same_line.leg.load.line = ScacCode::parse("MAEU").ok();
        let mut other_line = same_line.clone();
        other_line.leg.load.line = ScacCode::parse("MSCU").ok();

        let mut target = export("e1", "Carson", ContainerSize::S40);
        target.leg.load.line = ScacCode::parse("MAEU").ok();

        assert_eq!(
            score_pair(&same_line, &target, &config),
            score_pair(&other_line, &target, &config)
        );
    }

    #[test]
    fn carson_pair_outranks_cross_town_pair() {
        let candidates = find_candidates(
            vec![import("i1", "Carson", ContainerSize::S40, true)],
            vec![
                export("e1", "Long Beach", ContainerSize::S40),
                export("e2", "Carson", ContainerSize::S40),
            ],
            &MatchConfig::default(),
        );

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].export.leg.id, "e2");
        assert_eq!(candidates[0].score, 100);
        assert_eq!(candidates[1].export.leg.id, "e1");
        assert_eq!(candidates[1].score, 45);
    }

    #[test]
    fn weak_pairs_are_ranked_not_dropped() {
        let candidates = find_candidates(
            vec![import("i1", "Carson", ContainerSize::S20, false)],
            vec![export("e1", "Long Beach", ContainerSize::S40)],
            &MatchConfig::default(),
        );

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].score, 0);
    }

    #[test]
    fn ties_break_on_import_urgency() {
        let mut tight = import("i1", "Carson", ContainerSize::S40, true);
        tight.leg.load.last_free_day = NaiveDate::from_ymd_opt(2026, 1, 3);
        let mut loose = import("i2", "Carson", ContainerSize::S40, true);
        loose.leg.load.last_free_day = NaiveDate::from_ymd_opt(2026, 1, 5);
        let unclocked = import("i3", "Carson", ContainerSize::S40, true);

        let candidates = find_candidates(
            vec![loose, unclocked, tight],
            vec![export("e1", "Carson", ContainerSize::S40)],
            &MatchConfig::default(),
        );

        assert_eq!(candidates.len(), 3);
        assert!(candidates.iter().all(|c| c.score == 100));
        assert_eq!(candidates[0].import.leg.id, "i1");
        assert_eq!(candidates[1].import.leg.id, "i2");
        assert_eq!(candidates[2].import.leg.id, "i3");
    }

    #[test]
    fn ineligible_candidates_never_pair() {
        let mut taken = import("i2", "Carson", ContainerSize::S40, true);
        taken.already_paired = true;
        let mut rolling = export("e2", "Carson", ContainerSize::S40);
        rolling.leg.status = LegStatus::Dispatched;

        let candidates = find_candidates(
            vec![import("i1", "Carson", ContainerSize::S40, true), taken],
            vec![export("e1", "Carson", ContainerSize::S40), rolling],
            &MatchConfig::default(),
        );

        // One eligible import times one eligible export
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].import.leg.id, "i1");
        assert_eq!(candidates[0].export.leg.id, "e1");
    }

    #[test]
    fn estimated_savings_come_from_config() {
        let config = MatchConfig::new(55, 25, 20, 50_000);
        let candidates = find_candidates(
            vec![import("i1", "Carson", ContainerSize::S40, true)],
            vec![export("e1", "Carson", ContainerSize::S40)],
            &config,
        );

        assert_eq!(candidates[0].estimated_savings_cents, 50_000);
    }

    #[test]
    fn line_comparison_travels_with_the_candidate() {
        let mut maersk_import = import("i1", "Carson", ContainerSize::S40, true);
        maersk_import.leg.load.line = ScacCode::parse("MAEU").ok();

        let mut maersk_export = export("e1", "Carson", ContainerSize::S40);
        maersk_export.leg.load.line = ScacCode::parse("MAEU").ok();
        let mut msc_export = export("e2", "Carson", ContainerSize::S40);
        msc_export.leg.load.line = ScacCode::parse("MSCU").ok();
        let silent_export = export("e3", "Carson", ContainerSize::S40);

        let candidates = find_candidates(
            vec![maersk_import],
            vec![maersk_export, msc_export, silent_export],
            &MatchConfig::default(),
        );

        let by_export = |id: &str| {
            candidates
                .iter()
                .find(|c| c.export.leg.id == id)
                .map(|c| c.line_match)
        };
        assert_eq!(by_export("e1"), Some(LineMatch::Matched));
        assert_eq!(by_export("e2"), Some(LineMatch::Differs));
        assert_eq!(by_export("e3"), Some(LineMatch::Unknown));
    }

    #[test]
    fn empty_inputs_yield_no_candidates() {
        let config = MatchConfig::default();
        assert!(find_candidates(Vec::new(), Vec::new(), &config).is_empty());
        assert!(
            find_candidates(
                vec![import("i1", "Carson", ContainerSize::S40, true)],
                Vec::new(),
                &config
            )
            .is_empty()
        );
    }
}
