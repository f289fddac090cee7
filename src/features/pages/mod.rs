//! Static pages and the liveness probe.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/flash-news` | News page |
//! | GET | `/ping` | Liveness probe, always `pong` |

pub mod handlers;
pub mod routes;
