//! HTTP server implementation
//!
//! Composition root for the gateway: builds the shared services from
//! configuration and exposes them behind the actix application.

mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{HttpServer, run_server};
pub use state::AppState;
