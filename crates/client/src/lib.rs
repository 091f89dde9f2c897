//! `libris-client` — outbound request pipeline and account endpoints.
//!
//! Every protected API call flows through [`ApiClient`]: the stored
//! credential is attached on the way out, and an authorization failure on the
//! way back tears the session down (clear the store, force navigation to
//! registration) while the caller still observes the error.

pub mod account;
pub mod error;
pub mod pipeline;

pub use account::AccountApi;
pub use error::ApiError;
pub use pipeline::{ApiClient, Navigator, TracingNavigator};
