mod memory;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::FinanceError;
use crate::models::{Account, NewUser, Transaction, User};

pub(crate) use memory::MemoryStore;

/// Where users and their balances live. The SQLite `Database` keeps a
/// ledger of every deposit; `MemoryStore` only keeps balances.
pub(crate) trait AccountStore {
    fn register_user(&mut self, user: &NewUser) -> Result<User>;

    /// Look a user up by email (case-insensitive).
    fn find_user(&self, email: &str) -> Result<Option<User>>;

    fn account(&self, user_id: i64) -> Result<Account>;

    /// Persist a deposit already applied to `account`: the new balance and,
    /// where a ledger is kept, the transaction row. Both land or neither does.
    fn record_deposit(&mut self, account: &Account, amount: Decimal, at: DateTime<Utc>)
        -> Result<()>;

    /// Ledger rows for a user in insertion order.
    fn transactions(&self, user_id: i64) -> Result<Vec<Transaction>>;

    fn keeps_ledger(&self) -> bool;

    fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        match self.find_user(email)? {
            Some(user) if user.verify_password(password) => Ok(user),
            _ => {
                tracing::warn!(email, "login rejected");
                Err(FinanceError::NotFound("no user with that email and password".into()).into())
            }
        }
    }
}
