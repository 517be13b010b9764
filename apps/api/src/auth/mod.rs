//! Auth Gate: bearer-token verification against the identity provider.
//!
//! Handlers never see raw tokens: `middleware::require_auth` verifies the
//! `Authorization: Bearer <ID token>` header through a `TokenVerifier` and
//! places the resulting `AuthUser` in request extensions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub mod firebase;
pub mod middleware;

/// Identity extracted from a verified ID token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Returns the token's owner, or `AppError::Unauthorized`.
    async fn verify(&self, id_token: &str) -> Result<AuthUser, AppError>;
}

/// Pulls the token out of an `Authorization` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extracts() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("bearer   abc"), Some("abc"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token("Basic dXNlcg=="), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
