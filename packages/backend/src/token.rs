//! Unverified JWT claim decoding.
//!
//! The backend signs its bearer tokens with a key this application never sees,
//! so tokens are only decoded, not verified: the payload segment is base64url
//! JSON carrying `userId` and `exp`. The backend still validates every request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::models::optional_id;

/// Claims read from a backend bearer token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    #[serde(default, deserialize_with = "optional_id")]
    pub user_id: Option<String>,
    /// Expiry, seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<u64>,
}

impl TokenClaims {
    /// Decode the payload segment of a `header.payload.signature` token.
    pub fn decode(token: &str) -> Result<Self, BackendError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [_, payload, _] = segments.as_slice() else {
            return Err(BackendError::Decode(format!(
                "expected 3 token segments, got {}",
                segments.len()
            )));
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| BackendError::Decode(format!("token payload: {}", e)))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| BackendError::Decode(format!("token claims: {}", e)))
    }

    /// A token without an `exp` claim counts as expired.
    pub fn is_expired_at(&self, now_secs: u64) -> bool {
        match self.exp {
            Some(exp) => exp <= now_secs,
            None => true,
        }
    }
}

/// Build an unsigned token carrying the given claims. Used by [`crate::MemoryBackend`].
pub fn encode_unsigned(claims: &TokenClaims) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = serde_json::to_vec(claims).unwrap_or_default();
    format!("{}.{}.unsigned", header, URL_SAFE_NO_PAD.encode(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    // {"userId":"7f3c","exp":1700000000,"iat":1699990000}
    const TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJ1c2VySWQiOiI3ZjNjIiwiZXhwIjoxNzAwMDAwMDAwLCJpYXQiOjE2OTk5OTAwMDB9.c2ln";

    #[test]
    fn test_decode_claims() {
        let claims = TokenClaims::decode(TOKEN).unwrap();
        assert_eq!(claims.user_id.as_deref(), Some("7f3c"));
        assert_eq!(claims.exp, Some(1_700_000_000));
    }

    #[test]
    fn test_expiry() {
        let claims = TokenClaims::decode(TOKEN).unwrap();
        assert!(!claims.is_expired_at(1_699_999_999));
        assert!(claims.is_expired_at(1_700_000_000));
        assert!(TokenClaims::default().is_expired_at(0));
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(matches!(TokenClaims::decode("not-a-jwt"), Err(BackendError::Decode(_))));
        assert!(matches!(TokenClaims::decode("a.!!!.c"), Err(BackendError::Decode(_))));
        // valid base64, not JSON
        assert!(matches!(TokenClaims::decode("a.aGVsbG8.c"), Err(BackendError::Decode(_))));
    }

    #[test]
    fn test_encode_unsigned_decodes_back() {
        let claims = TokenClaims {
            user_id: Some("12".into()),
            exp: Some(4_102_444_800),
        };
        assert_eq!(TokenClaims::decode(&encode_unsigned(&claims)).unwrap(), claims);
    }
}
