#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;
use rust_decimal_macros::dec;

fn register(db: &mut Database, name: &str, email: &str, balance: Decimal) -> User {
    let new_user = NewUser::new(name, email, "Secreta123", balance).unwrap();
    db.register_user(&new_user).unwrap()
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_has_version() {
    let db = Database::open_in_memory().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_reopen_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alcancia.db");

    let user_id = {
        let mut db = Database::open(&path).unwrap();
        let user = register(&mut db, "Ana", "ana@example.com", dec!(10));
        let mut account = db.account(user.id).unwrap();
        account.apply_deposit(dec!(5)).unwrap();
        db.record_deposit(&account, dec!(5), Utc::now()).unwrap();
        user.id
    };

    let db = Database::open(&path).unwrap();
    let versions: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(versions, 1);
    assert_eq!(db.account(user_id).unwrap().balance(), dec!(15));
    assert_eq!(db.transactions(user_id).unwrap().len(), 1);
}

// ── Users ─────────────────────────────────────────────────────

#[test]
fn test_register_and_find_user() {
    let mut db = Database::open_in_memory().unwrap();
    let user = register(&mut db, "Ana", "ana@example.com", dec!(0));
    assert!(user.id > 0);
    assert_eq!(user.balance, Decimal::ZERO);

    let found = db.find_user("ANA@example.com").unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(found.name, "Ana");
    assert!(found.verify_password("Secreta123"));

    assert!(db.find_user("luis@example.com").unwrap().is_none());
}

#[test]
fn test_register_duplicate_email() {
    let mut db = Database::open_in_memory().unwrap();
    register(&mut db, "Ana", "ana@example.com", dec!(0));
    let again = NewUser::new("Ana B", "Ana@Example.com", "Secreta123", dec!(0)).unwrap();
    let err = db.register_user(&again).unwrap_err();
    assert_eq!(
        err.downcast_ref::<FinanceError>(),
        Some(&FinanceError::DuplicateEmail("ana@example.com".into()))
    );
}

#[test]
fn test_user_by_id_not_found() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_user_by_id(99999).unwrap().is_none());
    let err = db.account(99999).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinanceError>(),
        Some(FinanceError::NotFound(_))
    ));
}

#[test]
fn test_balance_stored_exactly() {
    let mut db = Database::open_in_memory().unwrap();
    let user = register(&mut db, "Ana", "ana@example.com", dec!(0.10));
    let mut account = db.account(user.id).unwrap();
    account.apply_deposit(dec!(0.20)).unwrap();
    db.record_deposit(&account, dec!(0.20), Utc::now()).unwrap();
    assert_eq!(db.account(user.id).unwrap().balance(), dec!(0.30));
}

// ── Transactions ──────────────────────────────────────────────

#[test]
fn test_record_deposit_appends_ledger_row() {
    let mut db = Database::open_in_memory().unwrap();
    let user = register(&mut db, "Ana", "ana@example.com", dec!(0));
    let at = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap();

    let mut account = db.account(user.id).unwrap();
    account.apply_deposit(dec!(200)).unwrap();
    db.record_deposit(&account, dec!(200), at).unwrap();

    let txns = db.transactions(user.id).unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].user_id, user.id);
    assert_eq!(txns[0].kind, TransactionKind::Deposit);
    assert_eq!(txns[0].amount, dec!(200));
    assert_eq!(txns[0].timestamp, at);
    assert!(txns[0].id.is_some());
}

#[test]
fn test_record_deposit_for_missing_user_rolls_back() {
    let mut db = Database::open_in_memory().unwrap();
    let ghost = Account::new(42, "ghost@example.com".into(), dec!(10));
    let err = db.record_deposit(&ghost, dec!(10), Utc::now()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinanceError>(),
        Some(FinanceError::NotFound(_))
    ));
    let rows: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn test_transactions_are_per_user() {
    let mut db = Database::open_in_memory().unwrap();
    let ana = register(&mut db, "Ana", "ana@example.com", dec!(0));
    let luis = register(&mut db, "Luis", "luis@example.com", dec!(0));

    for (user, amount) in [(&ana, dec!(1)), (&luis, dec!(2)), (&ana, dec!(3))] {
        let mut account = db.account(user.id).unwrap();
        account.apply_deposit(amount).unwrap();
        db.record_deposit(&account, amount, Utc::now()).unwrap();
    }

    let ana_amounts: Vec<Decimal> = db
        .transactions(ana.id)
        .unwrap()
        .iter()
        .map(|t| t.amount)
        .collect();
    assert_eq!(ana_amounts, vec![dec!(1), dec!(3)]);
    assert_eq!(db.transactions(luis.id).unwrap().len(), 1);
    assert_eq!(db.account(ana.id).unwrap().balance(), dec!(4));
}

#[test]
fn test_corrupt_timestamp_is_an_error() {
    let mut db = Database::open_in_memory().unwrap();
    let user = register(&mut db, "Ana", "ana@example.com", dec!(0));
    db.conn
        .execute(
            "INSERT INTO transactions (user_id, type, amount, timestamp) VALUES (?1, 'deposit', '5', 'yesterday')",
            params![user.id],
        )
        .unwrap();
    assert!(db.transactions(user.id).is_err());
}

#[test]
fn test_corrupt_amount_is_an_error() {
    let mut db = Database::open_in_memory().unwrap();
    let user = register(&mut db, "Ana", "ana@example.com", dec!(0));
    db.conn
        .execute(
            "INSERT INTO transactions (user_id, type, amount, timestamp) VALUES (?1, 'deposit', 'five', '2024-01-01T00:00:00+00:00')",
            params![user.id],
        )
        .unwrap();
    assert!(db.transactions(user.id).is_err());
}

#[test]
fn test_corrupt_balance_is_not_overwritten() {
    let mut db = Database::open_in_memory().unwrap();
    let user = register(&mut db, "Ana", "ana@example.com", dec!(500));
    db.conn
        .execute(
            "UPDATE users SET balance = '500,00' WHERE id = ?1",
            params![user.id],
        )
        .unwrap();
    assert!(db.account(user.id).is_err());

    let notifier = crate::notify::DepositNotifier::new();
    let template = crate::budget::BudgetTemplate::SavingsEmergencySpending;
    assert!(notifier.notify(&mut db, user.id, dec!(10), &template).is_err());
    let stored: String = db
        .conn
        .query_row("SELECT balance FROM users WHERE id = ?1", params![user.id], |r| r.get(0))
        .unwrap();
    assert_eq!(stored, "500,00");
    assert!(db.transactions(user.id).unwrap().is_empty());
}

#[test]
fn test_legacy_type_tag_is_read() {
    let mut db = Database::open_in_memory().unwrap();
    let user = register(&mut db, "Ana", "ana@example.com", dec!(0));
    db.conn
        .execute(
            "INSERT INTO transactions (user_id, type, amount, timestamp) VALUES (?1, 'Deposito', '5', '2024-01-01T00:00:00+00:00')",
            params![user.id],
        )
        .unwrap();
    let txns = db.transactions(user.id).unwrap();
    assert_eq!(txns[0].kind, TransactionKind::Deposit);
}
