//! Access decisions from role membership and resource ownership
//!
//! One pure decision function replaces the usual pair of mechanisms
//! (a coarse role guard on the route plus ad-hoc ownership comparisons
//! inside handlers): each protected operation describes itself as an
//! [`OperationSpec`] and is evaluated exactly once.

use std::collections::HashSet;

use crate::auth::identity::{LoggedIdentity, Role};
use crate::error::{GatepostError, Result};

/// Access requirements for one protected operation.
#[derive(Debug, Clone, Default)]
pub struct OperationSpec {
    /// Roles allowed to perform the operation. Empty means any
    /// authenticated caller. `Admin` always satisfies the test.
    pub required_roles: HashSet<Role>,
    /// Roles that skip the ownership comparison (typically `Admin`).
    pub ownership_exempt: HashSet<Role>,
}

impl OperationSpec {
    /// Any authenticated caller; no ownership concept
    pub fn authenticated() -> Self {
        Self::default()
    }

    /// Gated on role membership only
    pub fn role_gated<I: IntoIterator<Item = Role>>(roles: I) -> Self {
        Self {
            required_roles: roles.into_iter().collect(),
            ownership_exempt: HashSet::new(),
        }
    }

    /// Owner-only, with the given roles exempt from the ownership check
    pub fn owner_or<I: IntoIterator<Item = Role>>(exempt: I) -> Self {
        Self {
            required_roles: HashSet::new(),
            ownership_exempt: exempt.into_iter().collect(),
        }
    }
}

/// The owner field of the targeted resource, borrowed from the store for
/// the duration of one decision.
#[derive(Debug, Clone, Copy)]
pub struct Ownership<'a> {
    pub owner: &'a str,
}

/// Why access was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    RoleNotPermitted,
    NotOwner,
}

/// The outcome of a policy evaluation. Derived per request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenyReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    /// Collapse into the crate error surface: every deny is `Forbidden`.
    pub fn into_result(self) -> Result<()> {
        match self {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny(reason) => {
                log::debug!("Access denied: {:?}", reason);
                Err(GatepostError::Forbidden)
            }
        }
    }
}

/// Decide whether `caller` may perform the operation described by `spec`
/// on a resource with the given ownership, if any.
///
/// Pure and synchronous: all inputs arrive as arguments, nothing is
/// fetched here.
pub fn decide(
    caller: &LoggedIdentity,
    spec: &OperationSpec,
    resource: Option<Ownership<'_>>,
) -> AccessDecision {
    let role_satisfied = spec.required_roles.is_empty()
        || caller.role == Role::Admin
        || spec.required_roles.contains(&caller.role);

    if !role_satisfied {
        return AccessDecision::Deny(DenyReason::RoleNotPermitted);
    }

    if spec.ownership_exempt.contains(&caller.role) {
        return AccessDecision::Allow;
    }

    match resource {
        Some(Ownership { owner }) if caller.username == owner => AccessDecision::Allow,
        Some(_) => AccessDecision::Deny(DenyReason::NotOwner),
        None => AccessDecision::Allow,
    }
}
