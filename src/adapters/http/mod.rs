//! HTTP adapter - REST API over the conversation core.

mod dto;
mod handlers;
mod routes;

pub use handlers::AgentAppState;
pub use routes::router;
