//! Navigation-time authorization decisions.

use libris_core::Surface;

use crate::policy::RoutePolicy;
use crate::role::Role;
use crate::store::{CredentialStore, UserProfile};
use crate::token::{self, ClaimSet};

/// Credentials shorter than this cannot carry three meaningful segments; the
/// check short-circuits decode attempts on empty or truncated strings. It is
/// a sanity filter, not a security control.
pub const MIN_CREDENTIAL_LEN: usize = 10;

/// Outcome of an authorization check.
///
/// Plain data: the caller performs the navigation. Denials carry the surface
/// to land on instead — registration when there is no usable session, catalog
/// home when the session exists but the role is insufficient. The user never
/// sees an error dialog on either path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Render the requested surface.
    Granted,
    /// Do not render; navigate to `redirect` instead.
    Denied { redirect: Surface },
}

/// Snapshot of the current session, for UI that branches on role or identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub role: Role,
    pub profile: Option<UserProfile>,
    pub claims: ClaimSet,
}

/// Decides whether a navigation target is permitted given the stored
/// credential.
///
/// Stateless and side-effect free: every check re-reads the store, nothing is
/// cached across navigations.
#[derive(Clone)]
pub struct SessionGuard {
    store: CredentialStore,
    policy: RoutePolicy,
}

impl SessionGuard {
    pub fn new(store: CredentialStore, policy: RoutePolicy) -> Self {
        Self { store, policy }
    }

    /// Authorize against an explicit role requirement.
    ///
    /// An empty `required` slice admits any decodable session regardless of
    /// its role claim, including an absent one.
    pub fn authorize(&self, required: &[Role]) -> Access {
        let Some(credential) = self.store.credential() else {
            return Access::Denied {
                redirect: Surface::Register,
            };
        };

        if credential.len() < MIN_CREDENTIAL_LEN {
            tracing::debug!("stored credential too short to be well-formed");
            return Access::Denied {
                redirect: Surface::Register,
            };
        }

        let claims = match token::decode(&credential) {
            Ok(claims) => claims,
            Err(err) => {
                tracing::debug!(%err, "stored credential failed to decode");
                return Access::Denied {
                    redirect: Surface::Register,
                };
            }
        };

        if required.is_empty() {
            return Access::Granted;
        }

        let role = claims.role();
        if required.contains(&role) {
            Access::Granted
        } else {
            tracing::debug!(%role, ?required, "role not permitted");
            Access::Denied {
                redirect: Surface::Home,
            }
        }
    }

    /// Authorize entry to a navigation surface via the route policy.
    ///
    /// Surfaces absent from the policy are public and never consult the
    /// store.
    pub fn authorize_surface(&self, surface: Surface) -> Access {
        match self.policy.required_roles(surface) {
            Some(required) => self.authorize(required),
            None => Access::Granted,
        }
    }

    /// Current session snapshot, if the stored credential decodes.
    pub fn session(&self) -> Option<Session> {
        let credential = self.store.credential()?;
        let claims = token::decode(&credential).ok()?;
        Some(Session {
            role: claims.role(),
            profile: self.store.profile(),
            claims,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use serde_json::{Value, json};

    use libris_core::UserId;

    use super::*;
    use crate::store::MemoryStore;
    use crate::token::ROLE_CLAIM_LONG;

    fn guard_with(credential: Option<&str>) -> SessionGuard {
        let store = CredentialStore::new(Arc::new(MemoryStore::new()));
        if let Some(credential) = credential {
            let profile = UserProfile {
                user_id: UserId::new("7"),
                username: "alice".to_string(),
            };
            store.establish(credential, &profile);
        }
        SessionGuard::new(store, RoutePolicy::standard())
    }

    fn mint(payload: Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.c2lnbmF0dXJl")
    }

    #[test]
    fn no_credential_denies_to_register() {
        let guard = guard_with(None);
        assert_eq!(
            guard.authorize(&[]),
            Access::Denied {
                redirect: Surface::Register
            }
        );
    }

    #[test]
    fn two_segment_credential_denies_to_register() {
        let guard = guard_with(Some("abc.def"));
        assert_eq!(
            guard.authorize(&[]),
            Access::Denied {
                redirect: Surface::Register
            }
        );
    }

    #[test]
    fn undecodable_credential_of_plausible_length_denies_to_register() {
        let guard = guard_with(Some("xxxxxxxxxxxxxxxxxxxx"));
        assert_eq!(
            guard.authorize(&[Role::Admin]),
            Access::Denied {
                redirect: Surface::Register
            }
        );
    }

    #[test]
    fn empty_requirement_admits_any_decodable_session() {
        // Role claim present, absent or unrecognized: all admitted.
        for payload in [json!({ "role": "Reader" }), json!({}), json!({ "role": "x" })] {
            let guard = guard_with(Some(&mint(payload)));
            assert_eq!(guard.authorize(&[]), Access::Granted);
        }
    }

    #[test]
    fn matching_role_is_granted() {
        let guard = guard_with(Some(&mint(json!({ "role": "Admin" }))));
        assert_eq!(guard.authorize(&[Role::Admin]), Access::Granted);
    }

    #[test]
    fn mismatched_role_denies_to_home() {
        let guard = guard_with(Some(&mint(json!({ "role": "Reader" }))));
        assert_eq!(
            guard.authorize(&[Role::Admin]),
            Access::Denied {
                redirect: Surface::Home
            }
        );
    }

    #[test]
    fn absent_role_fails_a_non_empty_requirement() {
        let guard = guard_with(Some(&mint(json!({ "sub": "7" }))));
        assert_eq!(
            guard.authorize(&[Role::Admin, Role::Reader]),
            Access::Denied {
                redirect: Surface::Home
            }
        );
    }

    #[test]
    fn long_form_role_claim_wins_over_short() {
        let token = mint(json!({ ROLE_CLAIM_LONG: "Admin", "role": "Reader" }));
        let guard = guard_with(Some(&token));
        assert_eq!(guard.authorize(&[Role::Admin]), Access::Granted);
    }

    #[test]
    fn admin_surface_requires_admin_role() {
        let reader = guard_with(Some(&mint(json!({ "role": "Reader" }))));
        assert_eq!(
            reader.authorize_surface(Surface::Admin),
            Access::Denied {
                redirect: Surface::Home
            }
        );

        let admin = guard_with(Some(&mint(json!({ "role": "Admin" }))));
        assert_eq!(admin.authorize_surface(Surface::Admin), Access::Granted);
    }

    #[test]
    fn profile_surface_admits_any_authenticated_session() {
        let guard = guard_with(Some(&mint(json!({ "role": "Reader" }))));
        assert_eq!(guard.authorize_surface(Surface::Profile), Access::Granted);
    }

    #[test]
    fn public_surfaces_never_consult_the_store() {
        let guard = guard_with(None);
        assert_eq!(guard.authorize_surface(Surface::Home), Access::Granted);
        assert_eq!(guard.authorize_surface(Surface::Login), Access::Granted);
        assert_eq!(guard.authorize_surface(Surface::Register), Access::Granted);
    }

    #[test]
    fn decisions_track_store_state_across_calls() {
        let store = CredentialStore::new(Arc::new(MemoryStore::new()));
        let guard = SessionGuard::new(store.clone(), RoutePolicy::standard());

        assert_eq!(
            guard.authorize(&[]),
            Access::Denied {
                redirect: Surface::Register
            }
        );

        let profile = UserProfile {
            user_id: UserId::new("7"),
            username: "alice".to_string(),
        };
        store.establish(&mint(json!({ "role": "Reader" })), &profile);
        assert_eq!(guard.authorize(&[]), Access::Granted);

        store.clear();
        assert_eq!(
            guard.authorize(&[]),
            Access::Denied {
                redirect: Surface::Register
            }
        );
    }

    #[test]
    fn session_snapshot_exposes_role_and_profile() {
        let guard = guard_with(Some(&mint(json!({ "role": "Admin", "sub": "7" }))));
        let session = guard.session().unwrap();

        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.claims.subject(), Some("7"));
        let profile = session.profile.unwrap();
        assert_eq!(profile.username, "alice");
        assert_eq!(profile.user_id.as_str(), "7");
    }

    #[test]
    fn session_is_none_without_a_decodable_credential() {
        assert!(guard_with(None).session().is_none());
        assert!(guard_with(Some("abc.def")).session().is_none());
    }
}
