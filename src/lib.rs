//! Naive Bayes classification over categorical or gaussian attributes.
//!
//! ```
//! use naive_bayes::{accuracy, classify_all, fit, FitOptions, Table};
//!
//! let table = Table::from_categories(&[2], 2, &[(&[0], 0), (&[0], 0), (&[1], 1)])?;
//! let model = fit(&table, &FitOptions::default())?;
//! let predictions = classify_all(&model, &table)?;
//! assert_eq!(accuracy(&predictions, &table)?, 1.0);
//! # Ok::<(), naive_bayes::BayesError>(())
//! ```

pub mod categorical;
pub mod classify;
pub mod dataset;
pub mod error;
pub mod evaluate;
pub mod gaussian;
pub mod loader;
pub mod model;
pub mod prior;

pub use classify::{classify, classify_all, log_scores};
pub use dataset::{DatasetView, Table, Value};
pub use error::{BayesError, Result};
pub use evaluate::{accuracy, evaluate, Evaluation};
pub use gaussian::SigmaPolicy;
pub use loader::{LoadOptions, Schema};
pub use model::{fit, FitOptions, FittedModel, LikelihoodTable, Mode, NaiveBayesClassifier};
