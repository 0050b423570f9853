//! Error types for policy conversion.

use thiserror::Error;

/// Result type alias for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors raised while converting a source policy.
///
/// None of these are transient: they describe input that cannot be
/// represented in the target schema.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("illegal metric name `{metric}` generated from queue name `{queue}`")]
    InvalidMetricName { queue: String, metric: String },

    #[error("unknown rule type `{0}`")]
    UnknownRuleKind(String),

    #[error("time of day out of range: {hour:02}:{minute:02}")]
    InvalidTimeOfDay { hour: u8, minute: u8 },

    #[error("malformed time of day `{0}` (expected HH:MM)")]
    MalformedTimeOfDay(String),

    #[error("malformed timestamp `{value}`: {source}")]
    MalformedTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
