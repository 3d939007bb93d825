mod account;
mod transaction;
mod user;

pub(crate) use account::Account;
pub(crate) use transaction::{Transaction, TransactionKind};
pub(crate) use user::{NewUser, User};
