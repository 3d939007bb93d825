use anyhow::Result;
use rust_decimal::Decimal;
use std::cell::OnceCell;

use crate::budget::TemplateCatalog;
use crate::error::FinanceError;
use crate::models::{NewUser, Transaction, User};
use crate::notify::{DepositNotifier, DepositReceipt};
use crate::report::{self, MonthlyTotal, TrendPoint};
use crate::store::AccountStore;

/// Composition root: owns the store, the template catalog and the single
/// notifier slot. `main` builds exactly one of these per process.
pub(crate) struct Bank<S> {
    store: S,
    catalog: TemplateCatalog,
    notifier: OnceCell<DepositNotifier>,
}

impl<S: AccountStore> Bank<S> {
    pub(crate) fn new(store: S, catalog: TemplateCatalog) -> Self {
        Self {
            store,
            catalog,
            notifier: OnceCell::new(),
        }
    }

    /// The shared notifier, created on first use.
    pub(crate) fn notifier(&self) -> &DepositNotifier {
        self.notifier.get_or_init(DepositNotifier::new)
    }

    /// Hand in an explicitly built notifier. Fails once one exists.
    pub(crate) fn install_notifier(
        &self,
        notifier: DepositNotifier,
    ) -> Result<&DepositNotifier, FinanceError> {
        self.notifier
            .set(notifier)
            .map_err(|_| FinanceError::SingletonViolation)?;
        Ok(self.notifier())
    }

    pub(crate) fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub(crate) fn keeps_ledger(&self) -> bool {
        self.store.keeps_ledger()
    }

    pub(crate) fn register(&mut self, user: &NewUser) -> Result<User> {
        let created = self.store.register_user(user)?;
        tracing::info!(user_id = created.id, email = %created.email, "user registered");
        Ok(created)
    }

    pub(crate) fn login(&self, email: &str, password: &str) -> Result<User> {
        self.store.authenticate(email, password)
    }

    pub(crate) fn balance(&self, user_id: i64) -> Result<Decimal> {
        Ok(self.store.account(user_id)?.balance())
    }

    /// Deposit `amount` and split it with the 1-based `template_index`.
    /// The index is checked before anything is written.
    pub(crate) fn deposit(
        &mut self,
        user_id: i64,
        amount: Decimal,
        template_index: usize,
    ) -> Result<DepositReceipt> {
        let template = *self.catalog.select(template_index)?;
        let notifier = self.notifier.get_or_init(DepositNotifier::new);
        notifier.notify(&mut self.store, user_id, amount, &template)
    }

    pub(crate) fn transactions(&self, user_id: i64) -> Result<Vec<Transaction>> {
        self.store.transactions(user_id)
    }

    pub(crate) fn monthly_report(&self, user_id: i64) -> Result<Vec<MonthlyTotal>> {
        Ok(report::monthly_totals(&self.transactions(user_id)?))
    }

    pub(crate) fn trend(&self, user_id: i64) -> Result<Vec<TrendPoint>> {
        Ok(report::trend(&self.transactions(user_id)?))
    }
}

#[cfg(test)]
#[path = "bank_tests.rs"]
mod tests;
