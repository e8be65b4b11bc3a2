//! Token clock: pure expiry inspection over bearer token strings.
//!
//! Tokens are three-segment dot-delimited strings whose second segment
//! is base64url JSON carrying an `exp` claim in seconds since epoch.
//! A token with no decodable expiry is treated as non-expiring rather
//! than rejected; that is the permissive fallback this design inherits.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::credential::BearerToken;

/// Default buffer subtracted from a token's expiry, absorbing clock
/// drift and in-flight request latency.
pub const DEFAULT_EXPIRY_SKEW_SECS: i64 = 30;

#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Decode the expiration instant embedded in a bearer token.
///
/// Returns `None` if the token is not three dot-delimited segments, the
/// payload is not valid base64url JSON, or the `exp` claim is absent.
/// Never fails.
pub fn decode_expiry(token: &BearerToken) -> Option<DateTime<Utc>> {
    let mut segments = token.as_str().split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return None,
    };

    let decoded = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: Claims = serde_json::from_slice(&decoded).ok()?;
    let exp = claims.exp?;

    Utc.timestamp_opt(exp, 0).single()
}

/// Check whether a token should be treated as expired.
///
/// True when the current time is at or past (expiry - skew). A token
/// with no decodable expiry is never expired.
pub fn is_expired(token: &BearerToken, skew_secs: i64) -> bool {
    match decode_expiry(token) {
        Some(expiry) => Utc::now() >= expiry - chrono::Duration::seconds(skew_secs),
        None => false,
    }
}

/// Remaining lifetime of a token, floored at zero.
///
/// A token with no decodable expiry reports zero remaining time; use
/// [`decode_expiry`] first when the two cases must be distinguished.
pub fn time_to_live(token: &BearerToken) -> Duration {
    match decode_expiry(token) {
        Some(expiry) => (expiry - Utc::now()).to_std().unwrap_or(Duration::ZERO),
        None => Duration::ZERO,
    }
}
