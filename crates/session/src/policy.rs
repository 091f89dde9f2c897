//! Declarative mapping from protected surfaces to required roles.

use libris_core::Surface;

use crate::role::Role;

const ANY_AUTHENTICATED: &[Role] = &[];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Which roles may enter each protected surface.
///
/// An empty role slice means "any authenticated session"; surfaces not listed
/// are public and never reach the guard. The table is read-only at runtime
/// and consumed only by [`SessionGuard`](crate::SessionGuard).
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    rules: Vec<(Surface, &'static [Role])>,
}

impl RoutePolicy {
    /// The application's route table: book creation, the profile and the
    /// personal book manager admit any authenticated session; the admin
    /// console is restricted to administrators.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                (Surface::CreateBook, ANY_AUTHENTICATED),
                (Surface::Profile, ANY_AUTHENTICATED),
                (Surface::MyBooksManager, ANY_AUTHENTICATED),
                (Surface::Admin, ADMIN_ONLY),
            ],
        }
    }

    /// Required roles for `surface`; `None` marks a public surface.
    pub fn required_roles(&self, surface: Surface) -> Option<&[Role]> {
        self.rules
            .iter()
            .find(|(listed, _)| *listed == surface)
            .map(|(_, roles)| *roles)
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::standard()
    }
}
