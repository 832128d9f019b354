//! List formatting and pagination engine.

pub mod formatter;
pub mod options;
pub mod paginator;

pub use formatter::{ListFormatter, ListPage};
pub use options::FormattingOptions;
pub use paginator::{PaginationError, Paginator};
