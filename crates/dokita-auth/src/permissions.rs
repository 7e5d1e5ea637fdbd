//! Permission requirements and the authorization predicate.
//!
//! A check walks these rules in order, first match wins:
//! an empty requirement passes; a wildcard grant passes; the requirement is
//! narrowed to the names the catalog still knows (falling back to the raw
//! list when the catalog is not loaded or shares nothing with it); the check
//! passes when any remaining name is granted.

use std::collections::BTreeSet;

use dokita_core::IntersectionPolicy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::PermissionCatalog;
use crate::error::AuthError;
use crate::session::SessionProvider;

/// Satisfies every requirement.
pub const ALL_PERMISSIONS: &str = "ALL_PERMISSIONS";
/// Satisfies every requirement.
pub const ADMIN_PANEL: &str = "ADMIN_PANEL";

pub const PERMISSIONS: &[(&str, &str)] = &[
    (ALL_PERMISSIONS, "All permissions (wildcard)"),
    (ADMIN_PANEL, "Administration panel (wildcard)"),
    ("LIST_USERS", "View administrator accounts"),
    ("LIST_ROLES", "View roles and their permissions"),
    ("LIST_PERMISSIONS", "View the permission catalog"),
    ("LIST_PATIENTS", "View patients"),
    ("LIST_DOCTORS", "View doctors"),
    ("LIST_SUBSCRIPTIONS", "View subscriptions"),
    ("LIST_APPOINTMENTS", "View appointments"),
    ("LIST_TRANSACTIONS", "View payment transactions"),
    ("LIST_ORDONNANCES", "View prescriptions"),
    ("LIST_MEDICAMENTS", "View medications"),
    ("LIST_MALADIES", "View diseases"),
    ("LIST_FICHES", "View structured form templates"),
    ("LIST_FORMATIONS", "View continuing-education content"),
    ("LIST_FORMATION_CATEGORIES", "View continuing-education categories"),
    ("LIST_VIDEOS", "View educational videos"),
    ("LIST_VIDEO_CATEGORIES", "View educational video categories"),
    ("SYNCHRONISATION", "Run data synchronisation"),
];

/// Permission names held by the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantSet(BTreeSet<String>);

impl GrantSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// True when a wildcard grant is present.
    pub fn is_wildcard(&self) -> bool {
        self.contains(ALL_PERMISSIONS) || self.contains(ADMIN_PANEL)
    }
}

impl<S: Into<String>> FromIterator<S> for GrantSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// What a gated feature asks of the grant set. `AnyOf` is satisfied by any
/// one of its names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Requirement {
    #[default]
    None,
    Single(String),
    AnyOf(Vec<String>),
}

impl Requirement {
    pub fn single(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Requirement::None
        } else {
            Requirement::Single(name)
        }
    }

    pub fn any_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            Requirement::None
        } else {
            Requirement::AnyOf(names)
        }
    }

    /// The requirement as a list; empty for `None`.
    pub fn names(&self) -> &[String] {
        match self {
            Requirement::None => &[],
            Requirement::Single(name) => std::slice::from_ref(name),
            Requirement::AnyOf(names) => names,
        }
    }

    pub fn is_none(&self) -> bool {
        self.names().is_empty()
    }
}

impl From<&str> for Requirement {
    fn from(name: &str) -> Self {
        Requirement::single(name)
    }
}

impl From<Option<&str>> for Requirement {
    fn from(name: Option<&str>) -> Self {
        name.map(Requirement::single).unwrap_or_default()
    }
}

impl From<&[&str]> for Requirement {
    fn from(names: &[&str]) -> Self {
        Requirement::any_of(names.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Requirement {
    fn from(names: [&str; N]) -> Self {
        Requirement::any_of(names)
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requirement::None => write!(f, "-"),
            Requirement::Single(name) => write!(f, "{name}"),
            Requirement::AnyOf(names) => write!(f, "{}", names.join(" | ")),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRequirement {
    Single(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for Requirement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RawRequirement>::deserialize(deserializer)? {
            None => Requirement::None,
            Some(RawRequirement::Single(name)) => Requirement::single(name),
            Some(RawRequirement::Many(names)) => Requirement::any_of(names),
        })
    }
}

impl Serialize for Requirement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Requirement::None => serializer.serialize_none(),
            Requirement::Single(name) => serializer.serialize_str(name),
            Requirement::AnyOf(names) => names.serialize(serializer),
        }
    }
}

/// Snapshot of grants and catalog against which requirements are checked.
#[derive(Debug, Clone, Default)]
pub struct Authorizer {
    grants: GrantSet,
    catalog: PermissionCatalog,
    policy: IntersectionPolicy,
}

impl Authorizer {
    pub fn new(grants: GrantSet, catalog: PermissionCatalog, policy: IntersectionPolicy) -> Self {
        Self {
            grants,
            catalog,
            policy,
        }
    }

    /// Snapshot the provider's current grants.
    pub fn from_session(
        session: &dyn SessionProvider,
        catalog: PermissionCatalog,
        policy: IntersectionPolicy,
    ) -> Self {
        Self::new(session.current_grants(), catalog, policy)
    }

    pub fn grants(&self) -> &GrantSet {
        &self.grants
    }

    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    pub fn policy(&self) -> IntersectionPolicy {
        self.policy
    }

    pub fn has_permission(&self, required: &Requirement) -> bool {
        let names = required.names();
        if names.is_empty() || self.grants.is_wildcard() {
            return true;
        }

        let known: Vec<&String> = names
            .iter()
            .filter(|n| self.catalog.contains(n))
            .collect();

        // An unloaded catalog always falls back to the raw list.
        let effective: Vec<&String> = if !known.is_empty() {
            known
        } else if !self.catalog.is_empty() && self.policy == IntersectionPolicy::DenyAll {
            tracing::debug!(%required, "no required permission in catalog, denying");
            return false;
        } else {
            names.iter().collect()
        };

        effective.iter().any(|n| self.grants.contains(n))
    }

    pub fn require(&self, required: &Requirement) -> Result<(), AuthError> {
        if self.has_permission(required) {
            Ok(())
        } else {
            Err(AuthError::Forbidden(format!("missing permission: {required}")))
        }
    }
}
