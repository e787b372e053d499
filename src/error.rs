use thiserror::Error;

#[derive(Debug, Error)]
pub enum BayesError {
    /// The dataset can't be used for fitting or evaluation.
    #[error("invalid dataset: {reason}")]
    InvalidDataset { reason: String },

    /// A gaussian (class, attribute) pair has no usable distribution.
    #[error("degenerate distribution for class {class}, attribute {attribute}: {reason}")]
    DegenerateDistribution {
        class: usize,
        attribute: usize,
        reason: String,
    },

    /// A categorical value outside of the domain allocated during fitting.
    #[error("value {value} of attribute {attribute} is outside its domain of {domain_size} values")]
    UnsupportedValue {
        attribute: usize,
        value: usize,
        domain_size: usize,
    },

    /// Classification was attempted before `fit`.
    #[error("model used before calling fit")]
    ModelNotFitted,

    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// A query cell whose kind doesn't match the fitted model.
    #[error("attribute {attribute} should be {expected}")]
    KindMismatch {
        attribute: usize,
        expected: &'static str,
    },

    /// Every class scored zero likelihood for the query.
    #[error("every class has zero likelihood for this instance")]
    ZeroLikelihood,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("line {line}, column {column}: cannot parse {value:?} as a number")]
    Parse {
        line: u64,
        column: usize,
        value: String,
    },
}

impl BayesError {
    pub(crate) fn invalid_dataset(reason: impl Into<String>) -> Self {
        BayesError::InvalidDataset {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BayesError>;
