use pf_core::DomainError;
use pf_solver::SolverError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid scenario: {0}")]
    Domain(#[from] DomainError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Invalid argument: {what}")]
    Argument { what: String },
}
