//! Visitor tracking: one row per landing-page view, enriched with location.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/` | Landing page, records a visit |
//! | GET | `/visitor-stats` | Recent visitors and per-country counts (HTML) |
//! | GET | `/api/visitor-stats` | Same statistics as JSON |
//! | GET | `/visitor-count` | SSE stream of currently active visitors |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{SqlVisitorRepository, VisitorRepository};
pub use services::{ActiveVisitors, VisitorService};
