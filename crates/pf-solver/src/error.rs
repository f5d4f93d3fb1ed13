//! Error types for solver operations.

use pf_core::DomainError;
use thiserror::Error;

/// Errors that can occur while solving the pipe boundary-value problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error(
        "Shooting did not converge for p_in = {p_in} Pa, p_out = {p_out} Pa \
         (last flow = {last_flow} m³/s, residual = {residual} Pa, iterations = {iterations})"
    )]
    Convergence {
        p_in: f64,
        p_out: f64,
        last_flow: f64,
        residual: f64,
        iterations: usize,
    },

    #[error("Integration failed: {what}")]
    Integration { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convergence_error_keeps_inputs() {
        let err = SolverError::Convergence {
            p_in: 2e6,
            p_out: 101_325.0,
            last_flow: 1.5,
            residual: 12.0,
            iterations: 50,
        };
        let msg = err.to_string();
        assert!(msg.contains("2000000"));
        assert!(msg.contains("101325"));
        assert!(msg.contains("iterations = 50"));
    }

    #[test]
    fn domain_error_converts() {
        let err: SolverError = DomainError::InvalidArg { what: "test" }.into();
        assert!(matches!(err, SolverError::Domain(_)));
    }
}
