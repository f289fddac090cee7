use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use std::convert::Infallible;

/// Source address of the request.
///
/// Resolution order: first `X-Forwarded-For` entry, `X-Real-IP`, socket peer,
/// then the literal `"unknown"`. Values that are not IP addresses are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

pub const UNKNOWN_IP: &str = "unknown";

fn header_ip(headers: &HeaderMap, name: &str) -> Option<IpAddr> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse::<IpAddr>().ok())
}

impl ClientIp {
    pub fn from_parts(parts: &Parts) -> Self {
        let ip = header_ip(&parts.headers, "x-forwarded-for")
            .or_else(|| header_ip(&parts.headers, "x-real-ip"))
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip())
            });

        match ip {
            Some(ip) => ClientIp(ip.to_string()),
            None => ClientIp(UNKNOWN_IP.to_string()),
        }
    }
}

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientIp::from_parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_forwarded_for_wins() {
        let p = parts(
            Request::builder()
                .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
                .header("x-real-ip", "198.51.100.2"),
        );
        assert_eq!(ClientIp::from_parts(&p), ClientIp("203.0.113.7".to_string()));
    }

    #[test]
    fn test_invalid_header_falls_through() {
        let p = parts(
            Request::builder()
                .header("x-forwarded-for", "not-an-ip")
                .header("x-real-ip", "198.51.100.2"),
        );
        assert_eq!(ClientIp::from_parts(&p), ClientIp("198.51.100.2".to_string()));
    }

    #[test]
    fn test_socket_peer_then_unknown() {
        let mut p = parts(Request::builder());
        assert_eq!(ClientIp::from_parts(&p).0, UNKNOWN_IP);

        let addr: SocketAddr = "192.0.2.10:53211".parse().unwrap();
        p.extensions.insert(ConnectInfo(addr));
        assert_eq!(ClientIp::from_parts(&p).0, "192.0.2.10");
    }
}
