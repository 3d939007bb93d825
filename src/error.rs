use rust_decimal::Decimal;
use thiserror::Error;

/// Domain failures raised by the savings core.
///
/// Everything except `SingletonViolation` is caused by user input and is
/// recoverable: the caller re-prompts or abandons the current action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum FinanceError {
    #[error("Amount must be greater than zero (got {0})")]
    InvalidAmount(Decimal),

    #[error("Invalid selection {index}: choose a number between 1 and {len}")]
    InvalidSelection { index: usize, len: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("A deposit notifier already exists for this process")]
    SingletonViolation,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password must have at least 8 characters, with an uppercase letter, a lowercase letter and a digit")]
    WeakPassword,

    #[error("Name must not be empty")]
    EmptyName,

    #[error("A user with email {0} is already registered")]
    DuplicateEmail(String),
}

impl FinanceError {
    pub(crate) fn is_recoverable(&self) -> bool {
        !matches!(self, Self::SingletonViolation)
    }
}

/// Classify an application error: `Some` when it carries a recoverable
/// domain failure that the interactive loop should report and survive.
pub(crate) fn recoverable(err: &anyhow::Error) -> Option<&FinanceError> {
    err.downcast_ref::<FinanceError>()
        .filter(|e| e.is_recoverable())
}
