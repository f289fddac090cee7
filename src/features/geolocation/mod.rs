//! IP geolocation enrichment.
//!
//! One outbound lookup per call, bounded by the configured timeout. Any
//! failure degrades to "no location" and never reaches the caller as an error.

pub mod models;
pub mod services;

pub use models::LocationInfo;
pub use services::GeolocationService;
