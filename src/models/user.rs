use rust_decimal::Decimal;

use super::Account;
use crate::error::FinanceError;
use crate::validate;

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub balance: Decimal,
    pub created_at: String,
}

impl User {
    pub(crate) fn account(&self) -> Account {
        Account::new(self.id, self.email.clone(), self.balance)
    }

    pub(crate) fn verify_password(&self, password: &str) -> bool {
        validate::password_hash(&self.email, password) == self.password_hash
    }
}

/// A validated registration request. Construction is the only place the
/// email, password and opening balance are checked.
#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub initial_balance: Decimal,
    pub created_at: String,
}

impl NewUser {
    pub(crate) fn new(
        name: &str,
        email: &str,
        password: &str,
        initial_balance: Decimal,
    ) -> Result<Self, FinanceError> {
        let name = validate::name(name)?;
        let email = validate::email(email)?;
        validate::password(password)?;
        if initial_balance < Decimal::ZERO {
            return Err(FinanceError::InvalidAmount(initial_balance));
        }
        Ok(Self {
            password_hash: validate::password_hash(&email, password),
            name,
            email,
            initial_balance,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
