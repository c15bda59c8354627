//! Admin HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AdminHandlers;
pub use routes::admin_routes;
