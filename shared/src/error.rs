//! Errors raised by the core library

use thiserror::Error;

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid farm record {farm_id}: field `{field}` {reason}")]
    InvalidInputShape {
        farm_id: String,
        field: &'static str,
        reason: String,
    },

    #[error("Misaligned {series} history on {farm_id}: expected {expected} points, found {found}")]
    MisalignedSeries {
        series: &'static str,
        farm_id: String,
        expected: usize,
        found: usize,
    },

    #[error("Misaligned {series} history on {farm_id}: point {index} is dated differently")]
    MisalignedDates {
        series: &'static str,
        farm_id: String,
        index: usize,
    },

    #[error("Duplicate farm id: {0}")]
    DuplicateFarmId(String),

    #[error("Page size must be at least 1")]
    InvalidPageSize,

    #[error("Total {0} cannot be expressed as a decimal amount")]
    NonFiniteTotal(&'static str),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn invalid(farm_id: &str, field: &'static str, reason: impl Into<String>) -> Self {
        CoreError::InvalidInputShape {
            farm_id: farm_id.to_string(),
            field,
            reason: reason.into(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
