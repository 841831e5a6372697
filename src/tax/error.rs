/// Reason an income value was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IncomeProblem {
    #[error("Income must be a numeric value.")]
    NotNumeric,
    #[error("Income must be greater than zero.")]
    NotPositive,
}

/// Validation failures for employee input. All of these are recoverable by
/// asking the user again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaxError {
    #[error("{0}")]
    InvalidIncome(IncomeProblem),
    #[error("Invalid employee type. Please choose from 'government', 'private', or 'contract'.")]
    InvalidCategory(String),
    #[error("Invalid employee type. Only 'Regular' is supported.")]
    InvalidEmployeeType(String),
}

impl From<IncomeProblem> for TaxError {
    fn from(problem: IncomeProblem) -> Self {
        TaxError::InvalidIncome(problem)
    }
}
