//! Web API module for CloudStore.
//!
//! A thin REST facade over the storage engine: handlers validate and
//! parse requests, call the engine under the shared lock, and serialize
//! the results.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
