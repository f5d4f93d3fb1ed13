use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Malformed input detected before any iteration begins.
///
/// Every variant keeps the offending value so callers can report it verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value for {what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Size mismatch for {what}: expected {expected}, got {actual}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{what} must be strictly increasing (violated at index {index})")]
    NotMonotonic { what: &'static str, index: usize },

    #[error("Degenerate input: {what}")]
    Degenerate { what: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_value() {
        let err = DomainError::NonPositive {
            what: "diameter",
            value: -0.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("diameter"));
        assert!(msg.contains("-0.5"));
    }

    #[test]
    fn display_not_monotonic() {
        let err = DomainError::NotMonotonic {
            what: "profile coordinates",
            index: 3,
        };
        assert!(err.to_string().contains("index 3"));
    }
}
