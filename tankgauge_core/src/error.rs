use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GaugeError {
    #[error("non-finite {quantity}: {value}")]
    NonFinite { quantity: &'static str, value: f64 },
    #[error("observation at {at} is earlier than the previous observation at {prev}")]
    OutOfOrder {
        at: NaiveDateTime,
        prev: NaiveDateTime,
    },
    #[error("timeout waiting for depth sensor")]
    Timeout,
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing tank geometry")]
    MissingGeometry,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
