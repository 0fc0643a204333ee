//! Role-based capability resolution.
//!
//! Every screen asks [`capabilities`] what the current session may do instead
//! of comparing role strings itself. The set per role is closed:
//!
//! | Role            | Capabilities                                        |
//! |-----------------|-----------------------------------------------------|
//! | signed out      | browse, cart                                        |
//! | `Blocked`       | browse                                              |
//! | `user`          | browse, cart, checkout, own orders, profile         |
//! | `admin`         | browse, profile, manage books/orders/users, revenue |
//!
//! The API still enforces authorization; this only decides what to offer.

use crate::domain::error::{FolioError, Result};
use crate::domain::{AuthState, Role};
use std::fmt;

/// An action a screen may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    BrowseCatalogue,
    ManageCart,
    Checkout,
    ViewOwnOrders,
    ViewProfile,
    ManageBooks,
    ManageOrders,
    ManageUsers,
    ViewRevenue,
}

impl Capability {
    /// Whether the capability can only be exercised with a session.
    #[must_use]
    pub const fn needs_session(self) -> bool {
        !matches!(self, Self::BrowseCatalogue | Self::ManageCart)
    }

    /// Dashboard entry for this capability, if it has one.
    #[must_use]
    pub const fn dashboard_section(self) -> Option<&'static str> {
        match self {
            Self::ViewOwnOrders => Some("My orders"),
            Self::ViewProfile => Some("Profile"),
            Self::ManageBooks => Some("Manage books"),
            Self::ManageOrders => Some("Manage orders"),
            Self::ManageUsers => Some("Manage users"),
            Self::ViewRevenue => Some("Revenue"),
            Self::BrowseCatalogue | Self::ManageCart | Self::Checkout => None,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BrowseCatalogue => "browse the catalogue",
            Self::ManageCart => "use the cart",
            Self::Checkout => "check out",
            Self::ViewOwnOrders => "view your orders",
            Self::ViewProfile => "view your profile",
            Self::ManageBooks => "manage books",
            Self::ManageOrders => "manage orders",
            Self::ManageUsers => "manage users",
            Self::ViewRevenue => "view revenue",
        })
    }
}

const GUEST: &[Capability] = &[Capability::BrowseCatalogue, Capability::ManageCart];

const BLOCKED: &[Capability] = &[Capability::BrowseCatalogue];

const CUSTOMER: &[Capability] = &[
    Capability::BrowseCatalogue,
    Capability::ManageCart,
    Capability::Checkout,
    Capability::ViewOwnOrders,
    Capability::ViewProfile,
];

const ADMIN: &[Capability] = &[
    Capability::BrowseCatalogue,
    Capability::ViewProfile,
    Capability::ManageBooks,
    Capability::ManageOrders,
    Capability::ManageUsers,
    Capability::ViewRevenue,
];

/// The closed capability set for a role; `None` means signed out.
#[must_use]
pub const fn for_role(role: Option<Role>) -> &'static [Capability] {
    match role {
        None => GUEST,
        Some(Role::Blocked) => BLOCKED,
        Some(Role::User) => CUSTOMER,
        Some(Role::Admin) => ADMIN,
    }
}

/// The capability set for the current session.
#[must_use]
pub fn capabilities(auth: &AuthState) -> &'static [Capability] {
    for_role(auth.role())
}

/// Whether the session may exercise `capability`.
#[must_use]
pub fn allows(auth: &AuthState, capability: Capability) -> bool {
    capabilities(auth).contains(&capability)
}

/// Checks a capability before any request is built.
///
/// # Errors
///
/// - [`FolioError::TokenNotFound`] when signed out and the capability needs a
///   session
/// - [`FolioError::Forbidden`] when the role does not carry it
pub fn require(auth: &AuthState, capability: Capability) -> Result<()> {
    if allows(auth, capability) {
        return Ok(());
    }
    if capability.needs_session() && !auth.is_authenticated() {
        return Err(FolioError::TokenNotFound);
    }
    tracing::debug!(role = ?auth.role(), capability = ?capability, "capability denied");
    Err(FolioError::Forbidden(format!("your account cannot {capability}")))
}

/// Dashboard sections to list for the current session, in display order.
#[must_use]
pub fn dashboard(auth: &AuthState) -> Vec<&'static str> {
    capabilities(auth)
        .iter()
        .filter_map(|c| c.dashboard_section())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_manages_but_does_not_check_out() {
        let caps = for_role(Some(Role::Admin));
        assert!(caps.contains(&Capability::ManageBooks));
        assert!(caps.contains(&Capability::ManageUsers));
        assert!(caps.contains(&Capability::ManageOrders));
        assert!(!caps.contains(&Capability::Checkout));
    }

    #[test]
    fn user_gets_own_orders_profile_and_cart() {
        let caps = for_role(Some(Role::User));
        assert!(caps.contains(&Capability::ViewOwnOrders));
        assert!(caps.contains(&Capability::ViewProfile));
        assert!(caps.contains(&Capability::ManageCart));
        assert!(!caps.contains(&Capability::ManageBooks));
    }

    #[test]
    fn blocked_only_browses() {
        assert_eq!(for_role(Some(Role::Blocked)), &[Capability::BrowseCatalogue]);
    }

    #[test]
    fn signed_out_management_reports_missing_token() {
        let err = require(&AuthState::Unauthenticated, Capability::ManageBooks).unwrap_err();
        assert!(matches!(err, FolioError::TokenNotFound));
    }

    #[test]
    fn signed_out_can_browse() {
        assert!(require(&AuthState::Unauthenticated, Capability::BrowseCatalogue).is_ok());
    }
}
