//! Logship - Azure Log Analytics data collector client library.

pub mod client;
pub mod config;
pub mod error;
pub mod schema;
pub mod signature;
