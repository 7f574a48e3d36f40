//! Summary statistics over the per-epoch win history.

use serde::{Deserialize, Serialize};

/// Summary of the wins of every epoch of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochSummary {
    /// Number of epochs summarized.
    pub epochs: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f32,
    /// Population standard deviation.
    pub std_dev: f32,
}

impl EpochSummary {
    /// Summarizes a win history.
    ///
    /// Returns `None` for an empty history.
    ///
    /// # Examples
    ///
    /// ```
    /// use duelist_training::history::EpochSummary;
    ///
    /// let summary = EpochSummary::new(&[2, 4, 4, 4, 5, 5, 7, 9]).unwrap();
    /// assert_eq!(summary.min, 2);
    /// assert_eq!(summary.max, 9);
    /// assert_eq!(summary.mean, 5.0);
    /// assert_eq!(summary.std_dev, 2.0);
    /// assert!(EpochSummary::new(&[]).is_none());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(wins: &[usize]) -> Option<Self> {
        let min = *wins.iter().min()?;
        let max = *wins.iter().max()?;
        let n = wins.len() as f32;
        let mean = wins.iter().map(|w| *w as f32).sum::<f32>() / n;
        let variance = wins.iter().map(|w| (*w as f32 - mean).powi(2)).sum::<f32>() / n;
        Some(Self {
            epochs: wins.len(),
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}
