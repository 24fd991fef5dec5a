use thiserror::Error;

use crate::core::numerics::NumericsError;
use crate::core::optimize::OptimizeError;
use crate::core::stats::StatsError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Numerical routine failed: {source}")]
    Numerics {
        #[from]
        source: NumericsError,
    },

    #[error("Minimization failed: {source}")]
    Optimization {
        #[from]
        source: OptimizeError,
    },

    #[error("Regression failed: {source}")]
    Statistics {
        #[from]
        source: StatsError,
    },

    #[error("Partition function '{system}' is not positive and finite at T = {temperature} K: {value}")]
    InvalidPartition {
        system: String,
        temperature: f64,
        value: f64,
    },

    #[error("Eigen decomposition produced only {available} states, {requested} requested")]
    TooFewStates { requested: usize, available: usize },
}

impl EngineError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
