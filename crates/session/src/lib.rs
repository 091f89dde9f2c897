//! `libris-session` — client-side session and authorization boundary.
//!
//! This crate owns the persisted bearer credential, decodes it, derives an
//! authorization role and decides whether a navigation target is permitted.
//! It decides, it does not navigate: guard results are plain data and the
//! caller performs the redirect.
//!
//! Trust boundary: credentials are decoded, **never verified**. The client
//! holds no verification key; the server is the only issuer and transport
//! security is assumed to prevent tampering. Every claim is treated as
//! asserted by the server, not proven.

pub mod guard;
pub mod policy;
pub mod role;
pub mod store;
pub mod token;

pub use guard::{Access, MIN_CREDENTIAL_LEN, Session, SessionGuard};
pub use policy::RoutePolicy;
pub use role::Role;
pub use store::{CredentialStore, KeyValueStore, MemoryStore, UserProfile};
pub use token::{ClaimSet, MalformedCredential, decode};
