//! Compact bearer-token decoding (claims only, never verified).

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::Role;

/// Vendor long-form role claim key, preferred over the short `role` claim
/// when both are present.
pub const ROLE_CLAIM_LONG: &str =
    "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

/// Short role claim key (fallback).
pub const ROLE_CLAIM_SHORT: &str = "role";

/// Structural decode failure.
///
/// A credential that fails any of these checks must never be treated as an
/// authenticated session. Callers recover locally (the guard denies with a
/// redirect); this error is never surfaced to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedCredential {
    #[error("credential has fewer than 3 segments")]
    MissingSegments,

    #[error("payload segment is not valid base64url")]
    PayloadEncoding,

    #[error("payload is not a JSON object")]
    PayloadShape,
}

/// Claims decoded from a credential's payload segment.
///
/// Only the role claim is interpreted here; everything else passes through
/// opaquely for the caller to read. In particular there is no local expiry
/// check: expiry is observed server-side and arrives as a 401.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimSet {
    claims: Map<String, Value>,
}

impl ClaimSet {
    /// Raw claim lookup.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Raw role claim value: long-form key first, then `role`.
    ///
    /// A non-string role claim is treated as absent.
    pub fn role_claim(&self) -> Option<&str> {
        self.claims
            .get(ROLE_CLAIM_LONG)
            .or_else(|| self.claims.get(ROLE_CLAIM_SHORT))
            .and_then(Value::as_str)
    }

    /// Derived role. The single derivation path, shared by the guard and any
    /// UI that branches on role.
    pub fn role(&self) -> Role {
        Role::from_claim(self.role_claim())
    }

    /// Subject claim, passed through opaquely.
    pub fn subject(&self) -> Option<&str> {
        self.claims.get("sub").and_then(Value::as_str)
    }
}

/// Decode a credential's payload segment into its claim set.
///
/// Shape checks only: at least three dot-separated segments and a base64url
/// payload that parses as a JSON object. The signature segment must be
/// present but its content is ignored — this layer trusts the issuer (see
/// the crate docs for the trust boundary).
pub fn decode(credential: &str) -> Result<ClaimSet, MalformedCredential> {
    let segments: Vec<&str> = credential.split('.').collect();
    if segments.len() < 3 {
        return Err(MalformedCredential::MissingSegments);
    }

    // Some issuers pad the payload segment; the engine below rejects padding.
    let payload = segments[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| MalformedCredential::PayloadEncoding)?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(claims)) => Ok(ClaimSet { claims }),
        _ => Err(MalformedCredential::PayloadShape),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
