use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransactionKind {
    Deposit,
}

impl TransactionKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deposit" | "deposito" | "depósito" => Some(Self::Deposit),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ledger row. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transaction {
    pub id: Option<i64>,
    pub user_id: i64,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub(crate) fn deposit(user_id: i64, amount: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id,
            kind: TransactionKind::Deposit,
            amount,
            timestamp,
        }
    }

    /// Calendar period `YYYY-MM` the transaction falls in.
    pub(crate) fn period(&self) -> String {
        self.timestamp.format("%Y-%m").to_string()
    }
}
