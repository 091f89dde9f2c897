//! Credential-issuing endpoints (login, registration) and logout.
//!
//! These calls use a bare HTTP client rather than the pipeline: a rejected
//! login is an ordinary form error and must not tear down an existing session
//! or force navigation.

use serde::{Deserialize, Serialize};

use libris_core::UserId;
use libris_session::{CredentialStore, UserProfile};

use crate::error::ApiError;

#[derive(Debug, Serialize)]
struct CredentialsForm<'a> {
    username: &'a str,
    password: &'a str,
}

/// Successful login payload: a fresh credential plus profile fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    user_id: String,
    username: String,
}

/// Bindings for the account endpoints.
pub struct AccountApi {
    base_url: String,
    http: reqwest::Client,
    store: CredentialStore,
}

impl AccountApi {
    pub fn new(base_url: impl Into<String>, store: CredentialStore) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            store,
        }
    }

    /// Log in and establish the session.
    ///
    /// On success the store holds the fresh credential and profile fields.
    /// The caller decides where to navigate next.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile, ApiError> {
        let resp = self
            .http
            .post(format!("{}/api/user/login", self.base_url))
            .json(&CredentialsForm { username, password })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api(status, body));
        }

        let body: LoginResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        let profile = UserProfile {
            user_id: UserId::new(body.user_id),
            username: body.username,
        };
        self.store.establish(&body.token, &profile);
        tracing::info!(user = %profile.username, "logged in");

        Ok(profile)
    }

    /// Register a new account.
    ///
    /// No credential is issued on this path; the caller sends the user to the
    /// login surface afterwards.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(format!("{}/api/user/register", self.base_url))
            .json(&CredentialsForm { username, password })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api(status, body));
        }

        Ok(())
    }

    /// Drop the local session.
    ///
    /// Nothing is sent to the server: bearer sessions end by discarding the
    /// credential. The caller navigates.
    pub fn logout(&self) {
        self.store.clear();
        tracing::info!("logged out");
    }
}
