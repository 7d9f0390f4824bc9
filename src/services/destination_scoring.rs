use serde::{Deserialize, Serialize};

use crate::config::env_or;
use crate::models::destination::Destination;

/// Keyword groups and the destination slugs they promote.
const KEYWORD_RULES: &[(&[&str], &[&str])] = &[
    (&["mountain", "peaceful"], &["swiss-alps", "banff"]),
    (&["beach", "luxury"], &["maldives", "santorini"]),
    (&["culture", "temple"], &["kyoto"]),
    (&["wine", "countryside"], &["tuscany"]),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    /// Added once per keyword rule that promotes the destination
    pub keyword_bonus: f64,
    /// Added when the estimated cost fits the budget
    pub within_budget_bonus: f64,
    /// Subtracted when the cost exceeds the budget by more than `over_budget_ratio`
    pub over_budget_penalty: f64,
    pub over_budget_ratio: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword_bonus: 20.0,
            within_budget_bonus: 10.0,
            over_budget_penalty: 20.0,
            over_budget_ratio: 1.5,
        }
    }
}

impl ScoringWeights {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            keyword_bonus: env_or("SCORING_KEYWORD_BONUS", defaults.keyword_bonus),
            within_budget_bonus: env_or("SCORING_WITHIN_BUDGET_BONUS", defaults.within_budget_bonus),
            over_budget_penalty: env_or("SCORING_OVER_BUDGET_PENALTY", defaults.over_budget_penalty),
            over_budget_ratio: env_or("SCORING_OVER_BUDGET_RATIO", defaults.over_budget_ratio),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DestinationScorer {
    pub weights: ScoringWeights,
}

impl DestinationScorer {
    pub fn new() -> Self {
        let weights = ScoringWeights::from_env();
        log::debug!("DestinationScorer initialized with weights: {:?}", weights);
        Self { weights }
    }

    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Score every destination against the wish and budget, best first,
    /// keeping at most `count`. Ties keep their stored order.
    pub fn recommend(
        &self,
        travel_wish: &str,
        budget: f64,
        count: usize,
        destinations: Vec<Destination>,
    ) -> Vec<Destination> {
        let keywords = travel_wish.to_lowercase();

        let mut scored: Vec<Destination> = destinations
            .into_iter()
            .map(|mut destination| {
                destination.match_score = self.score(&keywords, budget, &destination);
                destination
            })
            .collect();

        scored.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        scored.truncate(count);
        scored
    }

    fn score(&self, keywords: &str, budget: f64, destination: &Destination) -> f64 {
        let mut score = destination.match_score;
        score += self.keyword_score(keywords, &destination.id);
        score += self.budget_score(budget, destination.estimated_cost);
        score
    }

    fn keyword_score(&self, keywords: &str, destination_id: &str) -> f64 {
        KEYWORD_RULES
            .iter()
            .filter(|(words, ids)| {
                words.iter().any(|word| keywords.contains(word)) && ids.contains(&destination_id)
            })
            .count() as f64
            * self.weights.keyword_bonus
    }

    fn budget_score(&self, budget: f64, estimated_cost: f64) -> f64 {
        if estimated_cost <= budget {
            self.weights.within_budget_bonus
        } else if estimated_cost > budget * self.weights.over_budget_ratio {
            -self.weights.over_budget_penalty
        } else {
            0.0
        }
    }
}
