//! The deposit entry point.
//!
//! There is one `DepositNotifier` per process. It is not a global: the
//! `Bank` owns the only slot it can live in and hands out references.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::budget::{Allocation, BudgetTemplate};
use crate::store::AccountStore;

/// What a caller gets back from a successful deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DepositReceipt {
    pub user_id: i64,
    pub amount: Decimal,
    pub new_balance: Decimal,
    pub template: BudgetTemplate,
    pub breakdown: Vec<Allocation>,
    pub message: String,
}

#[derive(Debug)]
pub(crate) struct DepositNotifier {
    _private: (),
}

impl DepositNotifier {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }

    /// Apply `amount` to the user's account, persist it and suggest how to
    /// split it with `template`. Nothing is written when the amount or the
    /// user is rejected.
    pub(crate) fn notify<S: AccountStore + ?Sized>(
        &self,
        store: &mut S,
        user_id: i64,
        amount: Decimal,
        template: &BudgetTemplate,
    ) -> Result<DepositReceipt> {
        let mut account = store.account(user_id)?;
        let new_balance = account.apply_deposit(amount)?;
        store.record_deposit(&account, amount, Utc::now())?;
        let breakdown = account.suggest_distribution(template, amount)?;

        tracing::info!(
            user_id,
            owner = %account.owner,
            amount = %amount,
            balance = %new_balance,
            template = template.description(),
            "deposit recorded"
        );

        Ok(DepositReceipt {
            user_id,
            amount,
            new_balance,
            template: *template,
            breakdown,
            message: format!("[Bank] Deposit notification: ${amount:.2}."),
        })
    }
}
