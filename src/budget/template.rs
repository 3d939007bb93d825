use rust_decimal::Decimal;

use crate::error::FinanceError;

/// One row of a suggested split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Allocation {
    pub label: &'static str,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BudgetTemplate {
    /// 50% savings, 25% emergencies, 25% spending.
    SavingsEmergencySpending,
    /// 70% savings, 20% education, 10% leisure.
    SavingsEducationLeisure,
}

// Fractions are stored in percent so each table is exact in decimal.
const SAVINGS_EMERGENCY_SPENDING: &[(&str, i64)] =
    &[("Ahorros", 50), ("Emergencias", 25), ("Gastos", 25)];

const SAVINGS_EDUCATION_LEISURE: &[(&str, i64)] =
    &[("Ahorros", 70), ("Educación", 20), ("Ocio", 10)];

impl BudgetTemplate {
    pub(crate) fn all() -> &'static [BudgetTemplate] {
        &[Self::SavingsEmergencySpending, Self::SavingsEducationLeisure]
    }

    pub(crate) fn description(&self) -> &'static str {
        match self {
            Self::SavingsEmergencySpending => "50% Ahorros, 25% Emergencias, 25% Gastos",
            Self::SavingsEducationLeisure => "70% Ahorros, 20% Educación, 10% Ocio",
        }
    }

    fn table(&self) -> &'static [(&'static str, i64)] {
        match self {
            Self::SavingsEmergencySpending => SAVINGS_EMERGENCY_SPENDING,
            Self::SavingsEducationLeisure => SAVINGS_EDUCATION_LEISURE,
        }
    }

    /// The allocation table as `(label, fraction)` pairs.
    pub(crate) fn fractions(&self) -> Vec<(&'static str, Decimal)> {
        self.table()
            .iter()
            .map(|&(label, pct)| (label, Decimal::new(pct, 2)))
            .collect()
    }

    /// Split `amount` across the template's labels, in table order.
    pub(crate) fn apply(&self, amount: Decimal) -> Result<Vec<Allocation>, FinanceError> {
        if amount <= Decimal::ZERO {
            return Err(FinanceError::InvalidAmount(amount));
        }
        Ok(self
            .fractions()
            .into_iter()
            .map(|(label, fraction)| Allocation {
                label,
                amount: amount * fraction,
            })
            .collect())
    }
}

impl std::fmt::Display for BudgetTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
