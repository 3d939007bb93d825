pub(crate) mod theme;
pub(crate) mod trend;
pub(crate) mod util;
