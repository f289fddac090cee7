mod geolocation_service;

pub use geolocation_service::{GeolocationService, IpApiResponse};
