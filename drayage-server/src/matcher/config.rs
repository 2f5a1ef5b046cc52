//! Scoring configuration for the street-turn matcher.

/// Configuration parameters for street-turn scoring.
///
/// The default weights sum to 100, so a perfect pairing scores 100.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Points awarded when both moves sit in the same city.
    /// City is the dominant signal: a cross-town reposition can cost
    /// more than the turn saves.
    pub city_weight: u32,

    /// Points awarded when the container sizes line up.
    pub size_weight: u32,

    /// Points awarded when the import empty is confirmed unloaded.
    /// An unconfirmed empty cannot be handed off yet.
    pub empty_ready_weight: u32,

    /// Estimated savings of one executed street turn, in cents.
    /// A presentation value for dispatchers to tune to their lane
    /// economics; ranking never reads it.
    pub savings_per_turn_cents: i64,
}

impl MatchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        city_weight: u32,
        size_weight: u32,
        empty_ready_weight: u32,
        savings_per_turn_cents: i64,
    ) -> Self {
        Self {
            city_weight,
            size_weight,
            empty_ready_weight,
            savings_per_turn_cents,
        }
    }

    /// The score a pairing earns when every signal lines up.
    pub fn max_score(&self) -> u32 {
        self.city_weight + self.size_weight + self.empty_ready_weight
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            city_weight: 55,
            size_weight: 25,
            empty_ready_weight: 20,
            savings_per_turn_cents: 35_000, // one avoided repositioning trip
        }
    }
}
