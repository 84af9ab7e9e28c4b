//! Method ranking and the success-rate fallback.
use crate::result::MethodScore;
use itertools::Itertools;
use protexpress_models::SuccessRates;
use tracing::debug;

/// Sort by score, highest first. Equal scores keep their input order.
pub fn rank_methods(scores: Vec<MethodScore>) -> Vec<MethodScore> {
    scores
        .into_iter()
        .sorted_by(|a, b| b.score().total_cmp(&a.score()))
        .collect()
}

/// Replace an empty ranking with one built from historical success rates.
///
/// A non-empty ranking is returned untouched and the table is not consulted.
/// If both are empty the result is empty.
pub fn apply_rate_fallback(ranked: Vec<MethodScore>, rates: &SuccessRates) -> Vec<MethodScore> {
    if !ranked.is_empty() || rates.is_empty() {
        return ranked;
    }
    debug!(methods = rates.len(), "ranking methods by historical success rate");
    rank_methods(
        rates
            .iter()
            .map(|(name, rate)| MethodScore::new(name, rate))
            .collect(),
    )
}
