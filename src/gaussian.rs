use crate::dataset::{validate, DatasetView};
use crate::error::{BayesError, Result};
use std::f64::consts::PI;
use std::fmt;

/// Mean and population standard deviation of one attribute within one class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianParams {
    pub mu: f64,
    pub sigma: f64,
}

impl GaussianParams {
    /// Log of the normal density at `x`. `sigma` must be positive.
    pub fn log_density(&self, x: f64) -> f64 {
        let diff = x - self.mu;
        -0.5 * (2.0 * PI).ln() - self.sigma.ln() - diff * diff / (2.0 * self.sigma * self.sigma)
    }
}

impl fmt::Display for GaussianParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.mu, self.sigma)
    }
}

/// What to do with a zero standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SigmaPolicy {
    /// Fail the fit with `DegenerateDistribution`.
    #[default]
    Reject,
    /// Raise any sigma below the floor up to it.
    Floor(f64),
}

/// Estimates `[class][attribute]` gaussian parameters. Every class needs at
/// least one training instance.
pub fn estimate_gaussian<D: DatasetView + ?Sized>(
    dataset: &D,
    policy: SigmaPolicy,
) -> Result<Vec<Vec<GaussianParams>>> {
    validate(dataset)?;

    if let SigmaPolicy::Floor(floor) = policy {
        if !(floor.is_finite() && floor > 0.0) {
            return Err(BayesError::InvalidParameter(format!(
                "sigma floor must be positive and finite, got {floor}"
            )));
        }
    }

    let num_classes = dataset.num_classes();
    let num_attributes = dataset.num_attributes();

    // values[c][a] holds attribute a of every instance of class c
    let mut values: Vec<Vec<Vec<f64>>> = vec![vec![Vec::new(); num_attributes]; num_classes];
    for i in 0..dataset.num_instances() {
        let class = dataset.class_value(i);
        for (a, column) in values[class].iter_mut().enumerate() {
            let x = dataset.feature(i, a).real().ok_or_else(|| {
                BayesError::invalid_dataset(format!(
                    "instance {i} has a categorical value for continuous attribute {a}"
                ))
            })?;
            if !x.is_finite() {
                return Err(BayesError::invalid_dataset(format!(
                    "instance {i} has non-finite value {x} for attribute {a}"
                )));
            }
            column.push(x);
        }
    }

    let mut params = Vec::with_capacity(num_classes);
    for (class, columns) in values.iter().enumerate() {
        let mut class_params = Vec::with_capacity(num_attributes);
        for (attribute, column) in columns.iter().enumerate() {
            if column.is_empty() {
                return Err(BayesError::DegenerateDistribution {
                    class,
                    attribute,
                    reason: "class has no training instances".to_string(),
                });
            }

            // Identical values are pinned to sigma 0 since the rounded mean
            // may leave a tiny residual spread.
            let identical = column.iter().all(|&x| x == column[0]);
            let (mu, mut sigma) = if identical {
                (column[0], 0.0)
            } else {
                let n = column.len() as f64;
                let mu = column.iter().sum::<f64>() / n;
                let variance = column.iter().map(|x| (x - mu) * (x - mu)).sum::<f64>() / n;
                (mu, variance.sqrt())
            };

            match policy {
                SigmaPolicy::Reject if sigma == 0.0 => {
                    let reason = if identical {
                        format!("all values equal {mu}, standard deviation is zero")
                    } else {
                        "variance underflows to zero".to_string()
                    };
                    return Err(BayesError::DegenerateDistribution {
                        class,
                        attribute,
                        reason,
                    });
                }
                SigmaPolicy::Floor(floor) if sigma < floor => {
                    log::warn!(
                        "sigma {sigma} of class {class}, attribute {attribute} raised to {floor}"
                    );
                    sigma = floor;
                }
                _ => {}
            }

            class_params.push(GaussianParams { mu, sigma });
        }
        params.push(class_params);
    }

    log::debug!("Gaussian parameters: {params:?}");

    Ok(params)
}
