use rust_decimal::Decimal;

use crate::budget::{Allocation, BudgetTemplate};
use crate::error::FinanceError;

/// The balance-holding side of a user. Only `apply_deposit` mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Account {
    pub user_id: i64,
    pub owner: String,
    balance: Decimal,
}

impl Account {
    pub(crate) fn new(user_id: i64, owner: String, balance: Decimal) -> Self {
        Self {
            user_id,
            owner,
            balance,
        }
    }

    pub(crate) fn balance(&self) -> Decimal {
        self.balance
    }

    /// Add a positive amount and return the new balance. A zero or negative
    /// amount, or one that would overflow the balance, leaves it untouched.
    pub(crate) fn apply_deposit(&mut self, amount: Decimal) -> Result<Decimal, FinanceError> {
        if amount <= Decimal::ZERO {
            return Err(FinanceError::InvalidAmount(amount));
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(FinanceError::InvalidAmount(amount))?;
        Ok(self.balance)
    }

    /// Advisory split of `amount`; never touches the balance.
    pub(crate) fn suggest_distribution(
        &self,
        template: &BudgetTemplate,
        amount: Decimal,
    ) -> Result<Vec<Allocation>, FinanceError> {
        template.apply(amount)
    }
}
