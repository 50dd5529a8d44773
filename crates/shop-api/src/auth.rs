//! # Authorization Gate
//!
//! Two composable checks guard the gated routes:
//!
//! 1. `RequireAuthenticated`: is a valid bearer credential present?
//! 2. `RequireAdmin`: does the authenticated account hold the admin role?
//!
//! Each check is a plain object with an `authorize` method; the axum
//! extractors below chain them explicitly (auth-check, then role-check) so a
//! handler's signature says exactly which gate it sits behind.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use shop_core::{DocumentStore, Filter, ShopError, ShopResult, StoreHandle, TokenService, User};

/// The authenticated caller, as decoded from the bearer credential
#[derive(Debug, Clone)]
pub struct Identity {
    pub email: String,
}

/// First gate: a request must carry a verifiable bearer credential.
///
/// Missing credential means `Unauthorized` (401); failed verification means
/// `InvalidToken` (403).
pub struct RequireAuthenticated {
    tokens: TokenService,
}

impl RequireAuthenticated {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }

    pub fn authorize(&self, headers: &HeaderMap) -> ShopResult<Identity> {
        let token = bearer_token(headers).ok_or(ShopError::Unauthorized)?;
        let email = self.tokens.verify(token)?;
        Ok(Identity { email })
    }
}

/// Second gate: the authenticated account's role field must be `admin`.
/// Runs after `RequireAuthenticated`; an account that is missing from the
/// users store denies like any non-admin.
pub struct RequireAdmin {
    users: StoreHandle,
}

impl RequireAdmin {
    pub fn new(users: StoreHandle) -> Self {
        Self { users }
    }

    pub async fn authorize(&self, identity: &Identity) -> ShopResult<()> {
        let account = self
            .users
            .find_one(Filter::new().eq("email", identity.email.clone()))
            .await?;

        let is_admin = match account {
            Some(doc) => {
                let user: User = serde_json::from_value(serde_json::Value::Object(doc))
                    .map_err(|e| ShopError::Serialization(e.to_string()))?;
                user.is_admin()
            }
            None => false,
        };

        if is_admin {
            Ok(())
        } else {
            Err(ShopError::Forbidden(format!(
                "{} does not hold the admin role",
                identity.email
            )))
        }
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let gate = RequireAuthenticated::new(state.tokens.clone());
        Ok(gate.authorize(&parts.headers)?)
    }
}

/// Extractor for admin-gated handlers: authenticates, then checks the role
pub struct AdminIdentity(pub Identity);

impl FromRequestParts<AppState> for AdminIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let identity = RequireAuthenticated::new(state.tokens.clone()).authorize(&parts.headers)?;
        RequireAdmin::new(state.stores.users.clone())
            .authorize(&identity)
            .await?;
        Ok(AdminIdentity(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shop_core::Document;
    use shop_store::MemoryStore;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_missing_credential_is_unauthorized() {
        let gate = RequireAuthenticated::new(TokenService::new("s", 24));

        let err = gate.authorize(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, ShopError::Unauthorized));

        // A non-bearer scheme is the same as no credential
        let err = gate.authorize(&headers_with("Basic abc")).unwrap_err();
        assert!(matches!(err, ShopError::Unauthorized));
    }

    #[test]
    fn test_bad_credential_is_forbidden() {
        let gate = RequireAuthenticated::new(TokenService::new("s", 24));
        let err = gate
            .authorize(&headers_with("Bearer not-a-token"))
            .unwrap_err();
        assert!(matches!(err, ShopError::InvalidToken(_)));
    }

    #[test]
    fn test_valid_credential_yields_identity() {
        let tokens = TokenService::new("s", 24);
        let token = tokens.issue("buyer@example.com");
        let gate = RequireAuthenticated::new(tokens);

        let identity = gate
            .authorize(&headers_with(&format!("Bearer {token}")))
            .unwrap();
        assert_eq!(identity.email, "buyer@example.com");
    }

    #[tokio::test]
    async fn test_admin_gate_checks_role_field() {
        let users = MemoryStore::handle();
        users
            .insert_one(doc(json!({"email": "boss@example.com", "role": "admin"})))
            .await
            .unwrap();
        users
            .insert_one(doc(json!({"email": "user@example.com", "role": "none"})))
            .await
            .unwrap();

        let gate = RequireAdmin::new(users);

        assert!(gate
            .authorize(&Identity {
                email: "boss@example.com".into()
            })
            .await
            .is_ok());

        let err = gate
            .authorize(&Identity {
                email: "user@example.com".into()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ShopError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_admin_gate_denies_unknown_account() {
        let gate = RequireAdmin::new(MemoryStore::handle());
        let err = gate
            .authorize(&Identity {
                email: "ghost@example.com".into()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ShopError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_admin_gate_denies_account_without_role() {
        let users = MemoryStore::handle();
        users
            .insert_one(doc(json!({"email": "plain@example.com", "name": "P"})))
            .await
            .unwrap();

        let gate = RequireAdmin::new(users);
        assert!(gate
            .authorize(&Identity {
                email: "plain@example.com".into()
            })
            .await
            .is_err());
    }
}
