//! HTTP layer of the mall backend: route handlers, request DTOs, error
//! mapping and the application factory shared by the binary and tests.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod i18n;
pub mod routes;

pub use app::create_app;
pub use routes::AppState;
