//! Street-turn matching.
//!
//! This module pairs imports that owe an empty container back to the
//! terminal with exports that need one, so a single handoff can replace
//! two terminal trips. Pairings are scored, ranked, and handed to the
//! dispatcher; accepting one (and writing the resulting legs) is the
//! caller's job.

mod candidates;
mod config;
mod score;

pub use candidates::{
    ExportCandidate, ImportCandidate, LineMatch, StreetTurnCandidate, TurnStatus,
};
pub use config::MatchConfig;
pub use score::{eligible_export, eligible_import, find_candidates, rank_candidates, score_pair};
