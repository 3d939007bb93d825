#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::db::Database;
use crate::store::MemoryStore;

fn sqlite_bank() -> Bank<Database> {
    Bank::new(Database::open_in_memory().unwrap(), TemplateCatalog::standard())
}

fn register_ana<S: AccountStore>(bank: &mut Bank<S>) -> User {
    let ana = NewUser::new("Ana", "ana@example.com", "Secreta123", dec!(0)).unwrap();
    bank.register(&ana).unwrap()
}

// ── Notifier slot ─────────────────────────────────────────────

#[test]
fn test_notifier_is_shared() {
    let bank = sqlite_bank();
    let first: *const DepositNotifier = bank.notifier();
    let second: *const DepositNotifier = bank.notifier();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn test_second_construction_is_rejected() {
    let bank = sqlite_bank();
    let _ = bank.notifier();
    assert_eq!(
        bank.install_notifier(DepositNotifier::new()).unwrap_err(),
        FinanceError::SingletonViolation
    );
    assert!(!FinanceError::SingletonViolation.is_recoverable());
}

#[test]
fn test_install_before_first_use() {
    let bank = sqlite_bank();
    let installed: *const DepositNotifier = bank.install_notifier(DepositNotifier::new()).unwrap();
    assert!(std::ptr::eq(installed, bank.notifier()));
    assert!(bank.install_notifier(DepositNotifier::new()).is_err());
}

#[test]
fn test_deposit_uses_shared_notifier() {
    let mut bank = sqlite_bank();
    let ana = register_ana(&mut bank);
    bank.deposit(ana.id, dec!(10), 1).unwrap();
    assert_eq!(
        bank.install_notifier(DepositNotifier::new()).unwrap_err(),
        FinanceError::SingletonViolation
    );
}

// ── Scenarios ─────────────────────────────────────────────────

#[test]
fn test_ana_deposits_twice() {
    let mut bank = sqlite_bank();
    let ana = register_ana(&mut bank);

    bank.deposit(ana.id, dec!(200), 1).unwrap();
    let receipt = bank.deposit(ana.id, dec!(200), 2).unwrap();

    assert_eq!(receipt.new_balance, dec!(400));
    assert_eq!(bank.balance(ana.id).unwrap(), dec!(400));
    let txns = bank.transactions(ana.id).unwrap();
    assert_eq!(txns.len(), 2);
    assert!(txns.iter().all(|t| t.amount == dec!(200)));
    assert!(txns[0].id < txns[1].id);
}

#[test]
fn test_deposit_breakdowns() {
    let mut bank = sqlite_bank();
    let ana = register_ana(&mut bank);

    let split = |r: &DepositReceipt| -> Vec<(&'static str, Decimal)> {
        r.breakdown.iter().map(|a| (a.label, a.amount)).collect()
    };

    let first = bank.deposit(ana.id, dec!(100), 1).unwrap();
    assert_eq!(
        split(&first),
        vec![("Ahorros", dec!(50.00)), ("Emergencias", dec!(25.00)), ("Gastos", dec!(25.00))]
    );
    let second = bank.deposit(ana.id, dec!(100), 2).unwrap();
    assert_eq!(
        split(&second),
        vec![("Ahorros", dec!(70.00)), ("Educación", dec!(20.00)), ("Ocio", dec!(10.00))]
    );
}

#[test]
fn test_bad_template_index_writes_nothing() {
    let mut bank = sqlite_bank();
    let ana = register_ana(&mut bank);

    for index in [0, 3] {
        let err = bank.deposit(ana.id, dec!(50), index).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FinanceError>(),
            Some(&FinanceError::InvalidSelection { index, len: 2 })
        );
    }
    assert_eq!(bank.balance(ana.id).unwrap(), Decimal::ZERO);
    assert!(bank.transactions(ana.id).unwrap().is_empty());
}

#[test]
fn test_monthly_report_is_repeatable() {
    let mut bank = sqlite_bank();
    let ana = register_ana(&mut bank);
    bank.deposit(ana.id, dec!(200), 1).unwrap();
    bank.deposit(ana.id, dec!(25.50), 2).unwrap();

    let once = bank.monthly_report(ana.id).unwrap();
    let twice = bank.monthly_report(ana.id).unwrap();
    assert_eq!(once, twice);
    assert_eq!(once.len(), 1);
    assert_eq!(once[0].total, dec!(225.50));
    assert_eq!(bank.trend(ana.id).unwrap().len(), 2);
}

#[test]
fn test_memory_bank_keeps_no_ledger() {
    let mut bank = Bank::new(MemoryStore::new(), TemplateCatalog::standard());
    let ana = register_ana(&mut bank);
    bank.deposit(ana.id, dec!(200), 1).unwrap();
    bank.deposit(ana.id, dec!(200), 1).unwrap();

    assert!(!bank.keeps_ledger());
    assert_eq!(bank.balance(ana.id).unwrap(), dec!(400));
    assert!(bank.monthly_report(ana.id).unwrap().is_empty());
}

#[test]
fn test_overflowing_deposit_is_recoverable() {
    let mut bank = Bank::new(MemoryStore::new(), TemplateCatalog::standard());
    let rich = NewUser::new("Ana", "ana@example.com", "Secreta123", Decimal::MAX).unwrap();
    let ana = bank.register(&rich).unwrap();

    let err = bank.deposit(ana.id, dec!(1), 1).unwrap_err();
    assert_eq!(
        err.downcast_ref::<FinanceError>(),
        Some(&FinanceError::InvalidAmount(dec!(1)))
    );
    assert!(crate::error::recoverable(&err).is_some());
    assert_eq!(bank.balance(ana.id).unwrap(), Decimal::MAX);
}

#[test]
fn test_login() {
    let mut bank = sqlite_bank();
    let ana = register_ana(&mut bank);
    assert_eq!(bank.login("ana@example.com", "Secreta123").unwrap().id, ana.id);
    assert!(bank.login("ana@example.com", "nope").is_err());
}
