//! HTTP layer of the Light Room backend
//!
//! Routes, request/response DTOs and middleware on top of actix-web.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
