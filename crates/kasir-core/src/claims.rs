//! # Token Claims
//!
//! Best-effort claim extraction from a bearer token.
//!
//! ## Token Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   header . payload . signature                                          │
//! │     │        │          │                                               │
//! │     │        │          └── ignored                                     │
//! │     │        └── base64url(JSON object) ──► { "userId": .., "exp": .. } │
//! │     └── ignored                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Not a Security Boundary
//! Nothing here verifies the signature, issuer or audience. The client only
//! reads its own token to find the user id and to notice when it has expired.
//! The backend remains the only party that decides whether a token is valid.
//!
//! ## Failure Mode
//! Every helper fails closed: a token that cannot be decoded yields no claims
//! and counts as expired, which sends the cashier back to the login screen.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};
use crate::{EXPIRY_CLAIM, USER_ID_CLAIM};

/// base64url that accepts the payload with or without `=` padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

// =============================================================================
// Payload Decoding
// =============================================================================

/// Decodes the payload segment, reporting why it failed.
pub fn try_decode_payload(token: &str) -> CoreResult<Map<String, Value>> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(CoreError::MalformedToken {
            found: segments.len(),
        });
    }

    let bytes = PAYLOAD_ENGINE
        .decode(segments[1])
        .map_err(|e| CoreError::PayloadEncoding(e.to_string()))?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CoreError::PayloadFormat(format!(
            "expected object, found {}",
            json_kind(&other)
        ))),
        Err(e) => Err(CoreError::PayloadFormat(e.to_string())),
    }
}

/// Decodes the payload segment into a JSON object.
///
/// `None` unless the token has exactly three segments, the middle one is
/// base64url, and it decodes to a UTF-8 JSON object.
pub fn decode_payload(token: &str) -> Option<Map<String, Value>> {
    try_decode_payload(token).ok()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Claim Lookup
// =============================================================================

/// Reads a claim as text.
///
/// Strings come back verbatim. Numbers and booleans come back as their JSON
/// text (`42`, `true`). A `null` or missing claim is `None`.
///
/// ```rust
/// use kasir_core::claims::claim;
///
/// // {"userId":"u-7"}
/// let token = "e30.eyJ1c2VySWQiOiJ1LTcifQ.sig";
/// assert_eq!(claim(token, "userId").as_deref(), Some("u-7"));
/// assert_eq!(claim(token, "role"), None);
/// ```
pub fn claim(token: &str, name: &str) -> Option<String> {
    let payload = decode_payload(token)?;
    match payload.get(name)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// The `userId` claim.
pub fn user_id(token: &str) -> Option<String> {
    claim(token, USER_ID_CLAIM)
}

/// The `exp` claim in seconds since the Unix epoch.
///
/// Accepts an integer, a float (truncated) or a numeric string. Missing,
/// non-numeric and zero values are `None`, meaning the token never expires.
pub fn expires_at(token: &str) -> Option<i64> {
    let payload = decode_payload(token)?;
    let exp = match payload.get(EXPIRY_CLAIM)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }?;
    (exp != 0).then_some(exp)
}

/// Whether the token should be treated as expired at `now` (Unix seconds).
///
/// An undecodable token is always expired. A token without a usable `exp` is
/// never expired. Otherwise it is expired once `exp` is in the past.
pub fn is_expired_at(token: &str, now: i64) -> bool {
    if decode_payload(token).is_none() {
        return true;
    }
    match expires_at(token) {
        Some(exp) => exp < now,
        None => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const NOW: i64 = 1_700_000_000;

    fn jwt(claims: Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    fn raw_token(payload: &str) -> String {
        format!("e30.{}.sig", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_decode_signed_token() {
        let token = jwt(json!({ "userId": "u-1", "exp": NOW + 3600 }));

        let payload = decode_payload(&token).unwrap();
        assert_eq!(payload["userId"], "u-1");
        assert_eq!(user_id(&token).as_deref(), Some("u-1"));
        assert_eq!(expires_at(&token), Some(NOW + 3600));
        assert!(!is_expired_at(&token, NOW));
    }

    #[test]
    fn test_zero_exp_never_expires() {
        let token = raw_token(r#"{"exp":0}"#);
        assert_eq!(expires_at(&token), None);
        assert!(!is_expired_at(&token, NOW));
        assert!(!is_expired_at(&token, i64::MAX));
    }

    #[test]
    fn test_missing_exp_never_expires() {
        let token = jwt(json!({ "userId": "u-1" }));
        assert_eq!(expires_at(&token), None);
        assert!(!is_expired_at(&token, NOW));
    }

    #[test]
    fn test_past_exp_is_expired() {
        let token = jwt(json!({ "userId": "u-1", "exp": NOW - 1 }));
        assert!(is_expired_at(&token, NOW));
    }

    #[test]
    fn test_exp_equal_to_now_is_not_expired() {
        let token = jwt(json!({ "exp": NOW }));
        assert!(!is_expired_at(&token, NOW));
        assert!(is_expired_at(&token, NOW + 1));
    }

    #[test]
    fn test_wrong_segment_count_is_expired() {
        assert!(is_expired_at("only.two", NOW));
        assert!(is_expired_at("", NOW));
        assert!(is_expired_at("a.b.c.d", NOW));
        assert!(matches!(
            try_decode_payload("only.two"),
            Err(CoreError::MalformedToken { found: 2 })
        ));
    }

    #[test]
    fn test_bad_payload_is_expired() {
        assert!(is_expired_at("e30.!!!not-base64!!!.sig", NOW));
        assert!(matches!(
            try_decode_payload("e30.!!!.sig"),
            Err(CoreError::PayloadEncoding(_))
        ));

        let not_json = raw_token("plain text");
        assert!(is_expired_at(&not_json, NOW));

        let not_object = raw_token("[1,2,3]");
        assert!(matches!(
            try_decode_payload(&not_object),
            Err(CoreError::PayloadFormat(_))
        ));
        assert!(is_expired_at(&not_object, NOW));
    }

    #[test]
    fn test_padded_payload_accepted() {
        let token = format!("e30.{}.sig", URL_SAFE.encode(r#"{"userId":"u-9"}"#));
        assert_eq!(user_id(&token).as_deref(), Some("u-9"));
    }

    #[test]
    fn test_claim_renders_scalars() {
        let token = raw_token(r#"{"n":42,"flag":true,"none":null,"s":"x"}"#);
        assert_eq!(claim(&token, "n").as_deref(), Some("42"));
        assert_eq!(claim(&token, "flag").as_deref(), Some("true"));
        assert_eq!(claim(&token, "none"), None);
        assert_eq!(claim(&token, "s").as_deref(), Some("x"));
        assert_eq!(claim(&token, "absent"), None);
    }

    #[test]
    fn test_exp_variants() {
        assert_eq!(expires_at(&raw_token(r#"{"exp":"1700000000"}"#)), Some(NOW));
        assert_eq!(expires_at(&raw_token(r#"{"exp":1700000000.9}"#)), Some(NOW));
        assert_eq!(expires_at(&raw_token(r#"{"exp":"soon"}"#)), None);
        assert_eq!(expires_at(&raw_token(r#"{"exp":null}"#)), None);
    }
}
