//! Webhook server and command-line surface over `weather-core`.

pub mod cli;
pub mod server;

pub use server::build_router;
