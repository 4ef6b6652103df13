//! Identity token claims extraction
//!
//! Tokens are decoded, not verified: the signature segment is ignored and
//! only `exp` is checked by callers. A token from an untrusted source is
//! accepted as long as it parses.

use crate::error::TokenError;
use crate::session::User;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Claims read from an ID token payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Expiry, epoch seconds
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Claims {
    /// A token without `exp` counts as expired
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_none_or(|exp| exp <= now.timestamp())
    }

    pub fn to_user(&self) -> Result<User, TokenError> {
        let id = self.sub.clone().ok_or(TokenError::MissingSubject)?;
        Ok(User {
            id,
            email: self.email.clone().unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
        })
    }
}

/// Decode the payload segment of a compact JWT
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return Err(TokenError::SegmentCount(segments.len()));
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}
