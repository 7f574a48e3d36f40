//! Contextual scoring: how favourable the current matchup is for the acting side.
//!
//! # How It Works
//!
//! The contextual score is a speed bonus plus a weighted sum of the matchup features:
//!
//! ```text
//! score = (acts_first ? 2 : 0) + Σ(wᵢ × featureᵢ)
//! ```
//!
//! Where:
//!
//! - `acts_first` is [`speed_order`] for the matchup
//! - `featureᵢ` are the raw values of [`ALL_MATCHUP_FEATURES`]
//! - `wᵢ` are the matching entries of the [`WeightVector`]
//!
//! A score of −1 or below means the matchup is bad enough to consider switching out.
//!
//! # Explainability
//!
//! [`ContextualScorer::breakdown`] returns every term of the sum in a [`ScoreBreakdown`], so
//! a decision can be explained feature by feature.

use std::{fmt, iter};

use serde::Serialize;

use crate::{
    matchup_feature::{ALL_MATCHUP_FEATURES, Matchup, speed_order},
    weights::WeightVector,
};

/// Bonus added to the score when the acting unit moves first.
pub const SPEED_BONUS: f32 = 2.0;

/// Score at or below which the acting side wants to switch out.
pub const SWITCH_THRESHOLD: f32 = -1.0;

/// One weighted term of the contextual score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureContribution {
    pub id: &'static str,
    pub name: &'static str,
    pub raw: f32,
    pub weight: f32,
    pub weighted: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub acts_first: bool,
    pub speed_bonus: f32,
    pub features: Vec<FeatureContribution>,
    pub total: f32,
}

impl ScoreBreakdown {
    /// Returns `true` if the score is low enough to consider switching out.
    #[must_use]
    pub fn wants_switch(&self) -> bool {
        self.total <= SWITCH_THRESHOLD
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<20} {:>8}",
            "Speed Order",
            if self.acts_first { "first" } else { "second" }
        )?;
        writeln!(f, "{:<20} {:>8.3}", "  bonus", self.speed_bonus)?;
        for feature in &self.features {
            writeln!(
                f,
                "{:<20} {:>8.3} × {:>6.3} = {:>8.3}",
                feature.name, feature.raw, feature.weight, feature.weighted
            )?;
        }
        write!(f, "{:<20} {:>8.3}", "Total", self.total)
    }
}

/// Scores matchups with a fixed set of weights.
#[derive(Debug, Clone)]
pub struct ContextualScorer {
    weights: WeightVector,
}

impl ContextualScorer {
    #[must_use]
    pub fn new(weights: WeightVector) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> WeightVector {
        self.weights
    }

    pub fn set_weights(&mut self, weights: WeightVector) {
        self.weights = weights;
    }

    #[must_use]
    pub fn score(&self, matchup: &Matchup<'_>) -> f32 {
        self.breakdown(matchup).total
    }

    #[must_use]
    pub fn breakdown(&self, matchup: &Matchup<'_>) -> ScoreBreakdown {
        let acts_first = speed_order(matchup.unit, matchup.opponent, matchup.field, matchup.turn);
        let speed_bonus = if acts_first { SPEED_BONUS } else { 0.0 };

        let features = iter::zip(ALL_MATCHUP_FEATURES, self.weights.to_array())
            .map(|(feature, weight)| {
                let raw = feature.evaluate(matchup);
                FeatureContribution {
                    id: feature.id(),
                    name: feature.name(),
                    raw,
                    weight,
                    weighted: weight * raw,
                }
            })
            .collect::<Vec<_>>();
        let total = features.iter().fold(speed_bonus, |acc, f| acc + f.weighted);

        ScoreBreakdown {
            acts_first,
            speed_bonus,
            features,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use duelist_engine::{FieldState, StatTable, Status, Type, Unit, Weather};

    use super::*;

    fn unit(types: &[Type], speed: u16) -> Unit {
        Unit::new("Test", types, StatTable::new(80, 80, 80, 80, 80, speed))
    }

    #[test]
    fn test_speed_bonus_is_added() {
        let fast = unit(&[Type::Normal], 100);
        let slow = unit(&[Type::Normal], 80);
        let field = FieldState::default();
        let matchup = Matchup {
            unit: &fast,
            opponent: &slow,
            field: &field,
            turn: 1,
        };
        let scorer = ContextualScorer::new(WeightVector::TUNED);
        let breakdown = scorer.breakdown(&matchup);
        assert!(breakdown.acts_first);
        assert_eq!(breakdown.speed_bonus, SPEED_BONUS);
        // identical healthy units: every feature is 0
        assert_eq!(breakdown.total, 2.0);
        assert_eq!(scorer.score(&matchup.swapped()), 0.0);
    }

    #[test]
    fn test_weighted_sum() {
        let water = unit(&[Type::Water], 80).with_hp_fraction(0.5);
        let fire = unit(&[Type::Fire], 100).with_status(Status::Paralysis);
        let field = FieldState::default().with_weather(Weather::Rain, 1);
        let matchup = Matchup {
            unit: &water,
            opponent: &fire,
            field: &field,
            turn: 1,
        };
        let weights = WeightVector::from_array([1.0, 2.0, 3.0, 4.0, 5.0]);
        let breakdown = ContextualScorer::new(weights).breakdown(&matchup);

        let raws = breakdown.features.iter().map(|f| f.raw).collect::<Vec<_>>();
        assert_eq!(raws, vec![0.0, 1.5, -0.5, 1.5, 2.0]);
        assert!(!breakdown.acts_first);
        let expected = 1.5 * 2.0 - 0.5 * 3.0 + 1.5 * 4.0 + 2.0 * 5.0;
        assert!((breakdown.total - expected).abs() < 1e-6);
        assert!(!breakdown.wants_switch());
    }

    #[test]
    fn test_bad_matchup_wants_switch() {
        let fire = unit(&[Type::Fire], 50).with_hp_fraction(0.3);
        let water = unit(&[Type::Water], 100);
        let field = FieldState::default();
        let matchup = Matchup {
            unit: &fire,
            opponent: &water,
            field: &field,
            turn: 1,
        };
        let breakdown = ContextualScorer::new(WeightVector::ONES).breakdown(&matchup);
        // typing −1.5, hp −0.7
        assert!((breakdown.total - -2.2).abs() < 1e-6);
        assert!(breakdown.wants_switch());
        assert!(breakdown.to_string().contains("Typing Advantage"));
    }
}
