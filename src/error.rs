use thiserror::Error;

/// Unified error type for `bargain` operations.
#[derive(Debug, Error)]
pub enum BargainError {
    /// Raised when caller arguments are malformed or out of domain.
    #[error("invalid input for {context}: found {value}")]
    InvalidInput {
        /// Human-readable context describing the rejected argument.
        context: &'static str,
        /// Display form of the value that was actually supplied.
        value: String,
    },

    /// Raised when bargaining parameters make the model mathematically undefined.
    #[error("invalid bargaining parameters: {context}")]
    InvalidParameters { context: &'static str },

    /// Raised when a salary or share falls outside the feasible bargaining range.
    #[error("{context} must lie in [{lower}, {upper}], found {value}")]
    OutOfRange {
        /// Human-readable context describing the checked quantity.
        context: &'static str,
        /// The value that was actually supplied.
        value: f64,
        /// Inclusive lower bound of the feasible range.
        lower: f64,
        /// Inclusive upper bound of the feasible range.
        upper: f64,
    },

    /// Raised when the inverse equilibrium solve cannot recover a valid floor.
    #[error("no feasible bargaining range: {context}")]
    Infeasible { context: &'static str },

    /// Raised on a lookup-table miss.
    #[error("unknown {table} category `{key}`")]
    UnknownCategory { table: &'static str, key: String },

    /// Raised when a simulator operation is invoked out of turn.
    #[error("operation requires the {expected} turn")]
    WrongTurn { expected: &'static str },

    /// Raised when a turn operation is invoked on a terminal session.
    #[error("negotiation session is already terminal")]
    SessionClosed,
}

impl BargainError {
    /// Helper to format an [`InvalidInput`](BargainError::InvalidInput) error.
    pub fn invalid_input(context: &'static str, value: impl ToString) -> Self {
        Self::InvalidInput {
            context,
            value: value.to_string(),
        }
    }

    /// Helper to raise when bargaining parameters are undefined.
    pub fn invalid_parameters(context: &'static str) -> Self {
        Self::InvalidParameters { context }
    }

    /// Helper to format an [`OutOfRange`](BargainError::OutOfRange) error.
    pub fn out_of_range(context: &'static str, value: f64, lower: f64, upper: f64) -> Self {
        Self::OutOfRange {
            context,
            value,
            lower,
            upper,
        }
    }

    /// Helper for bubbling up infeasibility from the inverse solver.
    pub fn infeasible(context: &'static str) -> Self {
        Self::Infeasible { context }
    }

    /// Helper to format an [`UnknownCategory`](BargainError::UnknownCategory) error.
    pub fn unknown_category(table: &'static str, key: impl Into<String>) -> Self {
        Self::UnknownCategory {
            table,
            key: key.into(),
        }
    }
}

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, BargainError>;
