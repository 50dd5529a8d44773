//! # Identity Tokens
//!
//! Issues and verifies the bearer credentials that assert a user's email.
//! A token is `base64url(claims) + "." + hex(HMAC-SHA256(secret, claims))`;
//! verification is a pure function of token, secret, and clock.

use crate::error::{ShopError, ShopResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signed token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// Email the credential asserts
    email: String,

    /// Expiry as a unix timestamp
    exp: i64,
}

/// Issues and verifies signed bearer credentials
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl: Duration,
}

impl TokenService {
    /// Create a service with a signing secret and a token lifetime.
    /// The lifetime is deployment configuration, not a constant.
    pub fn new(secret: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Issue a credential for an email. Always succeeds.
    pub fn issue(&self, email: &str) -> String {
        let claims = Claims {
            email: email.to_string(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        // Claims is two plain fields; serialization cannot fail
        let payload = serde_json::to_vec(&claims).unwrap_or_default();
        let encoded = URL_SAFE_NO_PAD.encode(&payload);
        let signature = compute_hmac_sha256(&self.secret, &encoded);
        format!("{encoded}.{signature}")
    }

    /// Verify a credential and return the embedded email.
    /// Fails with `InvalidToken` on malformed structure, signature mismatch,
    /// or expiry.
    pub fn verify(&self, token: &str) -> ShopResult<String> {
        let (encoded, signature) = token
            .split_once('.')
            .ok_or_else(|| ShopError::InvalidToken("malformed token".to_string()))?;

        let expected = compute_hmac_sha256(&self.secret, encoded);
        if !constant_time_compare(signature, &expected) {
            return Err(ShopError::InvalidToken("signature mismatch".to_string()));
        }

        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| ShopError::InvalidToken("invalid payload encoding".to_string()))?;
        let claims: Claims = serde_json::from_slice(&payload)
            .map_err(|_| ShopError::InvalidToken("invalid claims".to_string()))?;

        if claims.exp < Utc::now().timestamp() {
            return Err(ShopError::InvalidToken("token expired".to_string()));
        }

        Ok(claims.email)
    }
}

fn compute_hmac_sha256(secret: &str, message: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_verify_round_trip() {
        let tokens = TokenService::new("secret", 24);
        let token = tokens.issue("buyer@example.com");

        assert_eq!(tokens.verify(&token).unwrap(), "buyer@example.com");
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative lifetime produces an already-expired credential
        let tokens = TokenService::new("secret", -1);
        let token = tokens.issue("buyer@example.com");

        let err = tokens.verify(&token).unwrap_err();
        assert!(matches!(err, ShopError::InvalidToken(_)));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let tokens = TokenService::new("secret", 24);
        let token = tokens.issue("buyer@example.com");

        let forged_claims = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&Claims {
                email: "admin@example.com".to_string(),
                exp: (Utc::now() + Duration::hours(1)).timestamp(),
            })
            .unwrap(),
        );
        let signature = token.split_once('.').unwrap().1;
        let forged = format!("{forged_claims}.{signature}");

        assert!(tokens.verify(&forged).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenService::new("secret-a", 24);
        let verifier = TokenService::new("secret-b", 24);

        let token = issuer.issue("buyer@example.com");
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_malformed_token_rejected() {
        let tokens = TokenService::new("secret", 24);

        assert!(tokens.verify("no-dot-here").is_err());
        assert!(tokens.verify("a.b").is_err());
        assert!(tokens.verify("").is_err());
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
    }
}
