pub mod config;
pub mod database;
pub mod error;
pub mod extractor;
pub mod flash;
pub mod middleware;
pub mod openapi;
pub mod telemetry;
pub mod templates;
