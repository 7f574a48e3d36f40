//! Parameters of a search run.

use serde::{Deserialize, Serialize};

use crate::{
    self_play::Baseline,
    weights::{DEFAULT_STEP, InvalidStepError, Perturbation},
};

/// Parameters of a search run.
///
/// Every field has a default, so a partial JSON object is a valid configuration.
///
/// ```
/// use duelist_training::config::SearchConfig;
///
/// let config: SearchConfig = serde_json::from_str(r#"{"epochs": 5}"#).unwrap();
/// assert_eq!(config.epochs, 5);
/// assert_eq!(config.battles_per_epoch, SearchConfig::default().battles_per_epoch);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub epochs: usize,
    pub battles_per_epoch: usize,
    /// Largest offset added to a weight when moving to a neighbour.
    pub step: f32,
    pub team_size: usize,
    /// Turns after which a battle is a draw.
    pub turn_limit: u32,
    pub baseline: Baseline,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            battles_per_epoch: 10,
            step: DEFAULT_STEP,
            team_size: 3,
            turn_limit: 200,
            baseline: Baseline::default(),
        }
    }
}

impl SearchConfig {
    pub fn perturbation(&self) -> Result<Perturbation, InvalidStepError> {
        Perturbation::new(self.step)
    }
}
