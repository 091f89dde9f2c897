use serde::{Deserialize, Serialize};

/// A navigation target in the application.
///
/// Surfaces are the unit of authorization: protected ones declare required
/// roles in the route policy, and guard denials name the surface to land on
/// instead. The mapping to route paths lives here so redirects are expressed
/// as data, not strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Surface {
    /// Catalog home, public.
    Home,
    /// Account registration, public. Also the landing target for every
    /// "no usable session" denial.
    Register,
    /// Login form, public.
    Login,
    /// Book creation form.
    CreateBook,
    /// The user's own profile.
    Profile,
    /// Management view for the user's own books.
    MyBooksManager,
    /// Administration console.
    Admin,
}

impl Surface {
    /// Route path for this surface.
    pub fn path(&self) -> &'static str {
        match self {
            Surface::Home => "/",
            Surface::Register => "/register",
            Surface::Login => "/login",
            Surface::CreateBook => "/create-book",
            Surface::Profile => "/profile",
            Surface::MyBooksManager => "/my-books-manager",
            Surface::Admin => "/admin",
        }
    }
}

impl core::fmt::Display for Surface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}
