pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod server;
pub mod store;
