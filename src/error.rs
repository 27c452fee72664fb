//! Error types shared across the library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown assumption key '{key}'")]
    UnknownAssumption { key: String },

    #[error("Invalid value '{value}' for assumption '{key}'")]
    InvalidAssumption { key: String, value: String },

    #[error("{control} must be within [{min}, {max}], got {value}")]
    ControlOutOfRange {
        control: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Scenario set has no '{name}' scenario to compare against")]
    MissingBaseline { name: String },

    #[error("History is empty")]
    EmptyHistory,

    #[error("Regression needs at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Least-squares solve failed: {0}")]
    Solve(&'static str),

    #[error("Sweep needs between 2 and {max} steps per axis, got {0}", max = crate::sweep::MAX_SWEEP_STEPS)]
    InvalidSweepSteps(usize),
}

pub type ForecastResult<T> = Result<T, ForecastError>;
