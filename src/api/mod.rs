//! HTTP API serving text analysis over REST

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use handlers::AppState;
pub use server::build_router;
pub use server::serve_api;
