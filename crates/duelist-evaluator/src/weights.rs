//! Weights of the contextual score.
//!
//! A [`WeightVector`] holds one weight per matchup feature, in the order of
//! [`ALL_MATCHUP_FEATURES`](crate::matchup_feature::ALL_MATCHUP_FEATURES).
//!
//! Weight vectors are plain `Copy` values: every operation that "changes" weights returns a
//! new vector, so a snapshot of the best weights can never be corrupted by later updates.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Range each weight is drawn from when training starts from scratch.
pub const INITIAL_WEIGHT_RANGE: RangeInclusive<f32> = 1.0..=2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub stats: f32,
    pub typing: f32,
    pub hp: f32,
    pub status: f32,
    pub weather: f32,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::TUNED
    }
}

impl WeightVector {
    pub const LEN: usize = 5;

    /// Weights found by an earlier training run.
    pub const TUNED: Self = Self {
        stats: 1.113_727_4,
        typing: 0.958_200_1,
        hp: 1.687_692_6,
        status: 1.299_638_4,
        weather: 1.877_638_2,
    };

    /// Every weight set to 1.
    pub const ONES: Self = Self::splat(1.0);

    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self::from_array([value; Self::LEN])
    }

    #[must_use]
    pub const fn from_array([stats, typing, hp, status, weather]: [f32; Self::LEN]) -> Self {
        Self {
            stats,
            typing,
            hp,
            status,
            weather,
        }
    }

    #[must_use]
    pub const fn to_array(self) -> [f32; Self::LEN] {
        [self.stats, self.typing, self.hp, self.status, self.weather]
    }

    /// Creates a weight vector by applying a function to each feature index.
    ///
    /// # Examples
    ///
    /// ```
    /// use duelist_evaluator::weights::WeightVector;
    ///
    /// let weights = WeightVector::from_fn(|i| (i + 1) as f32);
    /// assert_eq!(weights.stats, 1.0);
    /// assert_eq!(weights.weather, 5.0);
    /// ```
    #[must_use]
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> f32,
    {
        Self::from_array(std::array::from_fn(f))
    }

    /// Applies `f` to every weight.
    #[must_use]
    pub fn map<F>(self, f: F) -> Self
    where
        F: FnMut(f32) -> f32,
    {
        Self::from_array(self.to_array().map(f))
    }

    /// Draws every weight independently and uniformly from [`INITIAL_WEIGHT_RANGE`].
    #[must_use]
    pub fn random_initial<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_fn(|_| rng.random_range(INITIAL_WEIGHT_RANGE))
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|w| w.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_array_layout() {
        let weights = WeightVector::from_array([1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(weights.typing, 2.0);
        assert_eq!(weights.status, 4.0);
        assert_eq!(weights.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(weights.map(|w| w * 2.0).hp, 6.0);
    }

    #[test]
    fn test_random_initial_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            let weights = WeightVector::random_initial(&mut rng);
            assert!(weights.to_array().iter().all(|w| INITIAL_WEIGHT_RANGE.contains(w)));
        }
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(WeightVector::ONES).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"stats": 1.0, "typing": 1.0, "hp": 1.0, "status": 1.0, "weather": 1.0})
        );
        assert_eq!(WeightVector::default(), WeightVector::TUNED);
        assert!(!WeightVector::splat(f32::NAN).is_finite());
    }
}
