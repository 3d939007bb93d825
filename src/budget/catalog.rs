use super::BudgetTemplate;
use crate::error::FinanceError;

/// Ordered set of templates offered to the user. Display order is
/// insertion order and selection is 1-based.
#[derive(Debug, Clone)]
pub(crate) struct TemplateCatalog {
    templates: Vec<BudgetTemplate>,
}

impl TemplateCatalog {
    pub(crate) fn new(templates: Vec<BudgetTemplate>) -> Self {
        Self { templates }
    }

    pub(crate) fn standard() -> Self {
        Self::new(BudgetTemplate::all().to_vec())
    }

    pub(crate) fn len(&self) -> usize {
        self.templates.len()
    }

    /// `(1-based index, template)` pairs in display order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &BudgetTemplate)> {
        self.templates.iter().enumerate().map(|(i, t)| (i + 1, t))
    }

    pub(crate) fn select(&self, index: usize) -> Result<&BudgetTemplate, FinanceError> {
        index
            .checked_sub(1)
            .and_then(|i| self.templates.get(i))
            .ok_or(FinanceError::InvalidSelection {
                index,
                len: self.templates.len(),
            })
    }

    /// Parse raw menu input into a valid 1-based index. Non-numeric input
    /// counts as index 0, which is always out of range.
    pub(crate) fn parse_index(&self, input: &str) -> Result<usize, FinanceError> {
        let index = input.trim().parse::<usize>().unwrap_or(0);
        self.select(index).map(|_| index)
    }
}
