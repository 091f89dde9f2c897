//! Outbound credential attachment and inbound 401 teardown.

use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use libris_core::Surface;
use libris_session::CredentialStore;

use crate::error::ApiError;

/// Forced-navigation seam.
///
/// The pipeline is the only component that navigates on its own; everything
/// else returns redirect targets as data for the caller to act on.
pub trait Navigator: Send + Sync {
    fn redirect(&self, target: Surface);
}

/// Default navigator for hosts without a routing integration: records the
/// forced navigation in the log and nothing else.
#[derive(Debug, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn redirect(&self, target: Surface) {
        tracing::info!(%target, "forced navigation");
    }
}

/// HTTP client for the protected API endpoints.
///
/// Requests read the credential store at dispatch time; responses are
/// screened for authorization failure before the caller sees them. Two
/// concurrent requests may observe different credential snapshots when a
/// teardown lands between their dispatches; the stale one is rejected by the
/// server and triggers a second, harmless teardown.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    store: CredentialStore,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        store: CredentialStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            store,
            navigator,
        }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// GET a JSON resource from a protected endpoint.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.dispatch(self.http.get(self.url(path))).await?;
        resp.json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// POST a JSON body to a protected endpoint.
    pub async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        self.dispatch(self.http.post(self.url(path)).json(body)).await
    }

    /// DELETE a protected resource.
    pub async fn delete(&self, path: &str) -> Result<Response, ApiError> {
        self.dispatch(self.http.delete(self.url(path))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Outbound stage, dispatch, and inbound stage for a single request.
    ///
    /// The credential is attached exactly as stored, malformed or not: shape
    /// validation is the guard's concern, and an undecodable credential is
    /// simply rejected by the server. Requests without a stored credential go
    /// out bare; whether the endpoint requires one is the server's call.
    async fn dispatch(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let req = match self.store.credential() {
            Some(credential) => req.bearer_auth(credential),
            None => req,
        };

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("server rejected credential, tearing session down");
            self.teardown();
            return Err(ApiError::Unauthorized);
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api(status, body));
        }

        Ok(resp)
    }

    /// Revoke local session state and force navigation to registration.
    ///
    /// Idempotent: concurrent failing responses each run this; clearing an
    /// already-cleared store is a no-op.
    pub fn teardown(&self) {
        self.store.clear();
        self.navigator.redirect(Surface::Register);
    }
}
