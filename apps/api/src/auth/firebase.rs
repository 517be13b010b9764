use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::{AuthUser, TokenVerifier};
use crate::errors::AppError;

const LOOKUP_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts:lookup";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
    #[serde(default)]
    disabled: bool,
}

/// Verifies Firebase ID tokens with the Identity Toolkit `accounts:lookup`
/// endpoint. Expired, revoked or malformed tokens are rejected upstream.
#[derive(Clone)]
pub struct FirebaseTokenVerifier {
    client: Client,
    api_key: String,
}

impl FirebaseTokenVerifier {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl TokenVerifier for FirebaseTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<AuthUser, AppError> {
        let response = self
            .client
            .post(LOOKUP_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&LookupRequest { id_token })
            .send()
            .await
            .map_err(|e| {
                warn!("Token lookup request failed: {e}");
                AppError::Unauthorized
            })?;

        if !response.status().is_success() {
            debug!("Token lookup rejected with status {}", response.status());
            return Err(AppError::Unauthorized);
        }

        let body: LookupResponse = response.json().await.map_err(|e| {
            warn!("Token lookup returned an unreadable body: {e}");
            AppError::Unauthorized
        })?;

        user_from_lookup(body).ok_or(AppError::Unauthorized)
    }
}

fn user_from_lookup(body: LookupResponse) -> Option<AuthUser> {
    let user = body.users.into_iter().next()?;
    if user.disabled {
        return None;
    }
    Some(AuthUser {
        uid: user.local_id,
        email: user.email,
        name: user.display_name,
    })
}
