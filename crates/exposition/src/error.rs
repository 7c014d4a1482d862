use {crate::render::MetricType, thiserror::Error};

/// Errors raised while constructing metric names, labels, samples, or
/// derived metrics.
///
/// All validation is fail-fast: every variant is produced synchronously at
/// the smallest constructible unit, so invalid data can never enter a
/// collection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid metric name: {0:?}")]
    InvalidMetricName(String),

    #[error("invalid label name: {0:?}")]
    InvalidLabelName(String),

    #[error("label value cannot be empty")]
    EmptyLabelValue,

    #[error("invalid label string: {0:?}")]
    InvalidLabelString(String),

    #[error("sample value must be finite, got {0}")]
    NonFiniteValue(f64),

    #[error("counters must start at 0 and can only go up, got {0}")]
    NegativeCounterValue(f64),

    #[error("quantile must satisfy 0 <= phi <= 1, got {0}")]
    QuantileOutOfRange(f64),

    #[error("invalid histogram bounds: {0}")]
    InvalidBounds(&'static str),

    #[error("operation requires a non-empty collection")]
    EmptyCollection,

    #[error("metric {name:?} is registered as a {registered}, requested as a {requested}")]
    MetricTypeMismatch {
        name: String,
        registered: MetricType,
        requested: MetricType,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
