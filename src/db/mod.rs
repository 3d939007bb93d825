mod schema;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::FinanceError;
use crate::models::*;
use crate::store::AccountStore;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "database ready");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::debug!(version = schema::CURRENT_VERSION, "created schema");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tracing::debug!(from_version, "applying migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Users ─────────────────────────────────────────────────

    fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
        let balance: String = row.get(4)?;
        Ok(User {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
            balance: Decimal::from_str(&balance).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
            })?,
            created_at: row.get(5)?,
        })
    }

    pub(crate) fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = self.conn.query_row(
            "SELECT id, name, email, password_hash, balance, created_at FROM users WHERE id = ?1",
            params![id],
            Self::user_from_row,
        );
        match result {
            Ok(u) => Ok(Some(u)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // ── Transactions ──────────────────────────────────────────

    fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
        let kind: String = row.get(2)?;
        let amount: String = row.get(3)?;
        let timestamp: String = row.get(4)?;
        let kind = TransactionKind::parse(&kind).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                Type::Text,
                format!("unknown transaction type: {kind}").into(),
            )
        })?;
        let amount = Decimal::from_str(&amount)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
        let timestamp = DateTime::parse_from_rfc3339(&timestamp)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?
            .with_timezone(&Utc);
        Ok(Transaction {
            id: Some(row.get(0)?),
            user_id: row.get(1)?,
            kind,
            amount,
            timestamp,
        })
    }
}

impl AccountStore for Database {
    fn register_user(&mut self, user: &NewUser) -> Result<User> {
        let inserted = self.conn.execute(
            "INSERT INTO users (name, email, password_hash, balance, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.name,
                user.email,
                user.password_hash,
                user.initial_balance.to_string(),
                user.created_at,
            ],
        );
        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                return Err(FinanceError::DuplicateEmail(user.email.clone()).into());
            }
            Err(e) => return Err(e).context("Failed to insert user"),
        }
        let id = self.conn.last_insert_rowid();
        self.get_user_by_id(id)?
            .ok_or_else(|| anyhow::anyhow!("User {id} vanished after insert"))
    }

    fn find_user(&self, email: &str) -> Result<Option<User>> {
        let result = self.conn.query_row(
            "SELECT id, name, email, password_hash, balance, created_at FROM users WHERE email = ?1",
            params![email.trim().to_lowercase()],
            Self::user_from_row,
        );
        match result {
            Ok(u) => Ok(Some(u)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn account(&self, user_id: i64) -> Result<Account> {
        self.get_user_by_id(user_id)?
            .map(|u| u.account())
            .ok_or_else(|| FinanceError::NotFound(format!("user {user_id}")).into())
    }

    fn record_deposit(&mut self, account: &Account, amount: Decimal, at: DateTime<Utc>) -> Result<()> {
        let tx = self.conn.transaction()?;
        let updated = tx.execute(
            "UPDATE users SET balance = ?1 WHERE id = ?2",
            params![account.balance().to_string(), account.user_id],
        )?;
        if updated == 0 {
            // Dropping `tx` rolls back.
            return Err(FinanceError::NotFound(format!("user {}", account.user_id)).into());
        }
        let txn = Transaction::deposit(account.user_id, amount, at);
        tx.execute(
            "INSERT INTO transactions (user_id, type, amount, timestamp) VALUES (?1, ?2, ?3, ?4)",
            params![
                txn.user_id,
                txn.kind.as_str(),
                txn.amount.to_string(),
                txn.timestamp.to_rfc3339(),
            ],
        )?;
        tx.commit().context("Failed to commit deposit")?;
        Ok(())
    }

    fn transactions(&self, user_id: i64) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, type, amount, timestamp FROM transactions
             WHERE user_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![user_id], Self::transaction_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn keeps_ledger(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests;
