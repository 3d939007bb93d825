use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::AccountStore;
use crate::error::FinanceError;
use crate::models::{Account, NewUser, Transaction, User};

/// Process-lifetime store. Users are kept in registration order and ids are
/// their 1-based position.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    users: Vec<User>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn user_mut(&mut self, user_id: i64) -> Result<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| FinanceError::NotFound(format!("user {user_id}")).into())
    }
}

impl AccountStore for MemoryStore {
    fn register_user(&mut self, user: &NewUser) -> Result<User> {
        if self.find_user(&user.email)?.is_some() {
            return Err(FinanceError::DuplicateEmail(user.email.clone()).into());
        }
        let created = User {
            id: self.users.len() as i64 + 1,
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            balance: user.initial_balance,
            created_at: user.created_at.clone(),
        };
        self.users.push(created.clone());
        Ok(created)
    }

    fn find_user(&self, email: &str) -> Result<Option<User>> {
        let lower = email.trim().to_lowercase();
        Ok(self.users.iter().find(|u| u.email == lower).cloned())
    }

    fn account(&self, user_id: i64) -> Result<Account> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(User::account)
            .ok_or_else(|| FinanceError::NotFound(format!("user {user_id}")).into())
    }

    fn record_deposit(
        &mut self,
        account: &Account,
        _amount: Decimal,
        _at: DateTime<Utc>,
    ) -> Result<()> {
        self.user_mut(account.user_id)?.balance = account.balance();
        Ok(())
    }

    fn transactions(&self, _user_id: i64) -> Result<Vec<Transaction>> {
        Ok(Vec::new())
    }

    fn keeps_ledger(&self) -> bool {
        false
    }
}
