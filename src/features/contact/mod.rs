//! Contact form: validated submissions stored with the sender's location.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/contact` | Submit the contact form, redirects back with a flash message |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{ContactRepository, SqlContactRepository};
pub use services::ContactService;
