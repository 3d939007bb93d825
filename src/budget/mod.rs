mod catalog;
mod template;

pub(crate) use catalog::TemplateCatalog;
pub(crate) use template::{Allocation, BudgetTemplate};
