//! One-shot notifications carried across a redirect in a signed cookie.
//!
//! Cookie value: `base64url(json) "." hex(hmac_sha256(secret, json))`.
//! Values with a bad signature are treated as absent.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use base64::prelude::*;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// Signs and verifies flash cookies with the session secret
#[derive(Clone)]
pub struct FlashSigner {
    mac: HmacSha256,
}

impl FlashSigner {
    pub fn new(secret: &str) -> Result<Self, hmac::digest::InvalidLength> {
        Ok(Self {
            mac: HmacSha256::new_from_slice(secret.as_bytes())?,
        })
    }

    pub fn encode(&self, messages: &[FlashMessage]) -> String {
        let json = serde_json::to_vec(messages).unwrap_or_default();
        let mut mac = self.mac.clone();
        mac.update(&json);
        let signature = hex::encode(mac.finalize().into_bytes());
        format!("{}.{}", BASE64_URL_SAFE_NO_PAD.encode(&json), signature)
    }

    pub fn decode(&self, value: &str) -> Option<Vec<FlashMessage>> {
        let (payload, signature) = value.rsplit_once('.')?;
        let json = BASE64_URL_SAFE_NO_PAD.decode(payload).ok()?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(&json);
        mac.verify_slice(&signature).ok()?;

        serde_json::from_slice(&json).ok()
    }

    /// Pending messages from the request's `Cookie` headers
    pub fn read(&self, headers: &HeaderMap) -> Vec<FlashMessage> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .filter_map(|pair| {
                pair.trim()
                    .strip_prefix(FLASH_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
            })
            .find_map(|value| self.decode(value))
            .unwrap_or_default()
    }

    pub fn set_cookie(&self, messages: &[FlashMessage]) -> Option<HeaderValue> {
        HeaderValue::from_str(&format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            self.encode(messages)
        ))
        .ok()
    }

    pub fn clear_cookie() -> HeaderValue {
        HeaderValue::from_static("flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
    }

    /// Expire the cookie on `response` once `shown` messages have been rendered
    pub fn consume(mut response: Response, shown: &[FlashMessage]) -> Response {
        if !shown.is_empty() {
            response
                .headers_mut()
                .append(SET_COOKIE, Self::clear_cookie());
        }
        response
    }

    /// Redirect to `to`, carrying a single message
    pub fn redirect(&self, to: &str, message: FlashMessage) -> Response {
        let mut response = Redirect::to(to).into_response();
        if let Some(cookie) = self.set_cookie(&[message]) {
            response.headers_mut().append(SET_COOKIE, cookie);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn signer() -> FlashSigner {
        FlashSigner::new("test-secret").unwrap()
    }

    #[test]
    fn test_decode_signed_value() {
        let signer = signer();
        let messages = vec![FlashMessage::success("Thanks!")];
        let encoded = signer.encode(&messages);

        assert_eq!(signer.decode(&encoded), Some(messages));
    }

    #[test]
    fn test_tampered_value_is_ignored() {
        let signer = signer();
        let encoded = signer.encode(&[FlashMessage::error("Nope")]);
        let (_, signature) = encoded.rsplit_once('.').unwrap();
        let forged = format!(
            "{}.{}",
            BASE64_URL_SAFE_NO_PAD.encode(br#"[{"level":"success","message":"forged"}]"#),
            signature
        );

        assert_eq!(signer.decode(&forged), None);
        assert_eq!(signer.decode("garbage"), None);
    }

    #[test]
    fn test_other_secret_rejects_cookie() {
        let encoded = signer().encode(&[FlashMessage::success("hi")]);
        let other = FlashSigner::new("another-secret").unwrap();
        assert_eq!(other.decode(&encoded), None);
    }

    #[test]
    fn test_read_from_cookie_header() {
        let signer = signer();
        let value = signer.encode(&[FlashMessage::error("Please fill in all fields")]);
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; flash={}; other=1", value)).unwrap(),
        );

        let messages = signer.read(&headers);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].level, FlashLevel::Error);
        assert_eq!(messages[0].message, "Please fill in all fields");
    }

    #[test]
    fn test_read_without_cookie_is_empty() {
        assert!(signer().read(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn test_redirect_sets_cookie() {
        let response = signer().redirect("/#contact", FlashMessage::success("ok"));
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/#contact");
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("flash="));
    }
}
