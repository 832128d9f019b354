//! HTTP API: routes, handlers, shared state and error mapping.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod templates;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
