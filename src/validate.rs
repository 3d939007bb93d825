use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

use crate::error::FinanceError;

// Anchored at both ends; the TLD must be at least two letters.
static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").ok()
});

pub(crate) fn email(input: &str) -> Result<String, FinanceError> {
    let candidate = input.trim();
    let valid = EMAIL
        .as_ref()
        .is_some_and(|re| re.is_match(candidate))
        && !candidate.contains("..");
    if valid {
        Ok(candidate.to_lowercase())
    } else {
        Err(FinanceError::InvalidEmail(candidate.to_string()))
    }
}

/// At least 8 characters with an uppercase letter, a lowercase letter and a digit.
pub(crate) fn password(input: &str) -> Result<(), FinanceError> {
    let long_enough = input.chars().count() >= 8;
    let has_upper = input.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = input.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = input.chars().any(|c| c.is_ascii_digit());
    if long_enough && has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(FinanceError::WeakPassword)
    }
}

pub(crate) fn name(input: &str) -> Result<String, FinanceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(FinanceError::EmptyName)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Hex SHA-256 of the password, salted with the (normalized) email.
pub(crate) fn password_hash(email: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}", email.to_lowercase(), password));
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
