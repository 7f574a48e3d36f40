use std::path::Path;

use chrono::{DateTime, Utc};
use duelist_evaluator::weights::WeightVector;
use serde::{Deserialize, Serialize};

use crate::util;

/// Weights saved by a training run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub best_epoch_wins: usize,
    pub battles_per_epoch: usize,
    pub weights: WeightVector,
    /// Wins of every epoch of the run, oldest first.
    #[serde(default)]
    pub epoch_wins: Vec<usize>,
}

impl EngineModel {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        util::read_json_file("engine model", path)
    }

    /// Loads the weights from `path`, or the tuned weights when no path is given.
    pub fn load_weights(path: Option<&Path>) -> anyhow::Result<WeightVector> {
        let Some(path) = path else {
            return Ok(WeightVector::TUNED);
        };
        let model = Self::open(path)?;
        if !model.weights.is_finite() {
            anyhow::bail!("Model {} has non-finite weights: {}", model.name, path.display());
        }
        tracing::info!(name = %model.name, trained_at = %model.trained_at, "loaded model");
        Ok(model.weights)
    }
}
