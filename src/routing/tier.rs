//! Trust tiers.
//!
//! # Design Decisions
//! - Tier order is the declaration order below (increasing trust requirement)
//! - A route's tier is fixed when the route table is declared, never per request
//! - The tier only tells the dispatcher which auth context to request;
//!   identity checks live behind the `AuthGate` collaborator

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trust level bucket of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// No authentication.
    Public,
    /// Token issued by the trusted external portal.
    Portal,
    /// No token check. Must sit behind network-level restriction.
    UnrestrictedPrivate,
    /// Valid back-office JWT required.
    BackOffice,
    /// Administrative credentials required.
    Dev,
}

impl Tier {
    /// Every tier, in registration order.
    pub const ALL: [Tier; 5] = [
        Tier::Public,
        Tier::Portal,
        Tier::UnrestrictedPrivate,
        Tier::BackOffice,
        Tier::Dev,
    ];

    /// Stable label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Public => "public",
            Tier::Portal => "portal",
            Tier::UnrestrictedPrivate => "unrestricted_private",
            Tier::BackOffice => "back_office",
            Tier::Dev => "dev",
        }
    }

    /// Whether requests in this tier carry a token to verify.
    pub fn requires_credentials(&self) -> bool {
        matches!(self, Tier::Portal | Tier::BackOffice | Tier::Dev)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
