//! Access control decisions.
//!
//! Everything here is pure: callers resolve the requestor and load the target
//! resource first, then ask for a verdict.

use crate::database::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny,
}

impl Verdict {
    pub fn is_allowed(self) -> bool {
        self == Verdict::Allow
    }
}

/// Admins may touch anything; everyone else only what they own.
pub fn decide(requestor_role: Role, requestor_email: &str, resource_owner_email: &str) -> Verdict {
    if requestor_role == Role::Admin || requestor_email == resource_owner_email {
        Verdict::Allow
    } else {
        Verdict::Deny
    }
}

/// Gate for user-management operations.
pub fn require_admin(requestor_role: Role) -> Verdict {
    match requestor_role {
        Role::Admin => Verdict::Allow,
        Role::User => Verdict::Deny,
    }
}
