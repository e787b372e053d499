use crate::dataset::DatasetView;
use crate::error::{BayesError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
}

impl Evaluation {
    pub fn accuracy(&self) -> f64 {
        self.correct as f64 / self.total as f64
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} correct, accuracy {}",
            self.correct,
            self.total,
            self.accuracy()
        )
    }
}

/// Compares predictions against the true classes. `predictions[i]` must
/// belong to instance `i` of `dataset`.
pub fn evaluate<D: DatasetView + ?Sized>(predictions: &[usize], dataset: &D) -> Result<Evaluation> {
    let total = dataset.num_instances();
    if total == 0 {
        return Err(BayesError::invalid_dataset("dataset has no instances"));
    }
    if predictions.len() != total {
        return Err(BayesError::ShapeMismatch {
            expected: format!("{total} predictions"),
            got: format!("{} predictions", predictions.len()),
        });
    }

    let correct = predictions
        .iter()
        .enumerate()
        .filter(|&(i, &predicted)| predicted == dataset.class_value(i))
        .count();

    Ok(Evaluation { correct, total })
}

/// Fraction of correctly predicted instances, in `[0, 1]`.
pub fn accuracy<D: DatasetView + ?Sized>(predictions: &[usize], dataset: &D) -> Result<f64> {
    evaluate(predictions, dataset).map(|evaluation| evaluation.accuracy())
}
