//! Error types for Grover search.

use grover_hal::HalError;
use grover_ir::IrError;
use thiserror::Error;

/// Errors that can occur while building, running or searching.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GroverError {
    /// Problem parameters are out of range.
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// The backend returned results that do not fit the circuit.
    #[error("Malformed outcome: {0}")]
    MalformedOutcome(String),

    /// Circuit construction failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),

    /// The backend failed.
    #[error("Backend error: {0}")]
    Backend(#[from] HalError),
}

/// Result type for Grover operations.
pub type GroverResult<T> = Result<T, GroverError>;
