//! Message domain: models, filters and persistence.

pub mod models;
pub mod query;
pub mod repository;

pub use models::{Message, NewMessage};
pub use query::{MessageFilter, SortOrder};
pub use repository::MessageRepository;
