//! Weight vector operations for hill climbing.
//!
//! The only move of the search is [`Perturbation::apply`]: add an independent
//! `uniform(−step, +step)` offset to every weight. There is no clamping and no normalization,
//! so weights may drift anywhere, including below zero.

use duelist_evaluator::weights::WeightVector;
use rand::Rng;
use rand_distr::{Distribution as _, Uniform};

/// Step used when none is configured.
pub const DEFAULT_STEP: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("perturbation step must be finite and positive, got {step}")]
pub struct InvalidStepError {
    step: f32,
}

/// Uniform random offset applied to every weight.
#[derive(Debug, Clone, Copy)]
pub struct Perturbation {
    step: f32,
    offset: Uniform<f32>,
}

impl Perturbation {
    /// Creates a perturbation drawing offsets from `[-step, step]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use duelist_training::weights::Perturbation;
    ///
    /// assert!(Perturbation::new(0.05).is_ok());
    /// assert!(Perturbation::new(0.0).is_err());
    /// assert!(Perturbation::new(f32::INFINITY).is_err());
    /// ```
    pub fn new(step: f32) -> Result<Self, InvalidStepError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(InvalidStepError { step });
        }
        let offset = Uniform::new_inclusive(-step, step).map_err(|_| InvalidStepError { step })?;
        Ok(Self { step, offset })
    }

    #[must_use]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Returns a neighbour of `weights`.
    #[must_use]
    pub fn apply<R>(&self, weights: WeightVector, rng: &mut R) -> WeightVector
    where
        R: Rng + ?Sized,
    {
        weights.map(|w| w + self.offset.sample(rng))
    }
}
