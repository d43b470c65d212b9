//! Portal role vocabulary.
//!
//! Roles arrive from the hosted backend as loosely-typed strings
//! (`"Admin"`, `"DIRECTOR"`, `"director_sede"`). They are normalised into the
//! closed [`Role`] enum exactly once, when a [`RoleSet`] is built at the
//! session boundary. Everything downstream compares typed values.
//!
//! Two parsing modes exist, one per origin of the string:
//!
//! - **User side** ([`Role::normalize`]): trimmed and lower-cased first, so
//!   `"DIRECTOR"` is `Role::Director`.
//! - **Authored allow-lists** ([`Role::from_authored`]): exact match only, so a
//!   route table entry spelled `"Admin"` is rejected when the table is built.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A role tag on a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Foundation administrators. Full console access.
    Admin,
    /// Foundation-wide director.
    Director,
    /// Director of a single headquarters ("sede").
    DirectorSede,
    /// Registered donor.
    Donator,
    /// Sports trainer attached to a headquarters.
    Entrenador,
}

impl Role {
    /// Every known role.
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Director,
        Role::DirectorSede,
        Role::Donator,
        Role::Entrenador,
    ];

    /// Canonical wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Director => "director",
            Role::DirectorSede => "director_sede",
            Role::Donator => "donator",
            Role::Entrenador => "entrenador",
        }
    }

    /// Parses an authored role name. Case-sensitive.
    pub fn from_authored(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == name)
    }

    /// Parses a role string coming from a user profile. Case-insensitive.
    pub fn normalize(raw: &str) -> Option<Role> {
        Role::from_authored(&raw.trim().to_lowercase())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_authored(s)
            .ok_or_else(|| ValidationError::invalid_format("role", format!("unknown role '{}'", s)))
    }
}

/// The set of roles held by a user.
///
/// Deserializes from raw strings through `from_raw`, so unknown entries are
/// dropped and case is normalised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<Role>")]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// An empty role set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a role set from raw profile strings.
    ///
    /// Unknown strings are dropped and logged; they never match anything.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (roles, unknown) = Self::partition_raw(raw);
        if !unknown.is_empty() {
            tracing::warn!(unknown = ?unknown, "Dropping unrecognized role strings");
        }
        roles
    }

    /// Splits raw profile strings into known roles and unrecognized leftovers.
    pub fn partition_raw<I, S>(raw: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roles = BTreeSet::new();
        let mut unknown = Vec::new();
        for value in raw {
            let value = value.as_ref();
            match Role::normalize(value) {
                Some(role) => {
                    roles.insert(role);
                }
                None => unknown.push(value.to_string()),
            }
        }
        (Self(roles), unknown)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<String>> for RoleSet {
    fn from(raw: Vec<String>) -> Self {
        Self::from_raw(raw)
    }
}

impl From<RoleSet> for Vec<Role> {
    fn from(roles: RoleSet) -> Self {
        roles.0.into_iter().collect()
    }
}

/// Roles allowed to enter a route. Authored by developers, not users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedRoles(Vec<Role>);

impl AllowedRoles {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut roles: Vec<Role> = roles.into_iter().collect();
        roles.sort();
        roles.dedup();
        Self(roles)
    }

    /// Builds an allow-list from authored names, rejecting unknown or
    /// mis-cased entries.
    pub fn from_authored<S: AsRef<str>>(names: &[S]) -> Result<Self, ValidationError> {
        let roles = names
            .iter()
            .map(|name| name.as_ref().parse::<Role>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(roles))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn roles(&self) -> &[Role] {
        &self.0
    }

    /// True when the user holds at least one allowed role.
    pub fn permits(&self, held: &RoleSet) -> bool {
        self.0.iter().any(|role| held.contains(*role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_case_insensitive() {
        assert_eq!(Role::normalize("DIRECTOR"), Some(Role::Director));
        assert_eq!(Role::normalize("Director_Sede"), Some(Role::DirectorSede));
        assert_eq!(Role::normalize("  admin "), Some(Role::Admin));
    }

    #[test]
    fn normalize_rejects_unknown() {
        assert_eq!(Role::normalize("unknown_role"), None);
        assert_eq!(Role::normalize(""), None);
    }

    #[test]
    fn from_authored_is_case_sensitive() {
        assert_eq!(Role::from_authored("entrenador"), Some(Role::Entrenador));
        assert_eq!(Role::from_authored("Entrenador"), None);
    }

    #[test]
    fn parse_reports_unknown_role() {
        let err = "Admin".parse::<Role>().unwrap_err();
        assert!(err.to_string().contains("unknown role 'Admin'"));
    }

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Role::DirectorSede).unwrap(),
            "\"director_sede\""
        );
    }

    #[test]
    fn partition_raw_keeps_known_and_reports_unknown() {
        let (roles, unknown) = RoleSet::partition_raw(["unknown_role", "DONATOR", "donator"]);
        assert_eq!(roles.len(), 1);
        assert!(roles.contains(Role::Donator));
        assert_eq!(unknown, vec!["unknown_role".to_string()]);
    }

    #[test]
    fn role_set_deserializes_through_normalisation() {
        let roles: RoleSet = serde_json::from_str(r#"["ADMIN", "bogus", " donator "]"#).unwrap();
        let expected: RoleSet = [Role::Admin, Role::Donator].into_iter().collect();
        assert_eq!(roles, expected);
    }

    #[test]
    fn role_set_serializes_as_sorted_list() {
        let roles: RoleSet = [Role::Donator, Role::Admin].into_iter().collect();
        assert_eq!(serde_json::to_string(&roles).unwrap(), r#"["admin","donator"]"#);
    }

    #[test]
    fn allowed_roles_from_authored_rejects_miscased_names() {
        assert!(AllowedRoles::from_authored(&["director", "Admin"]).is_err());
    }

    #[test]
    fn allowed_roles_permits_on_intersection() {
        let allowed = AllowedRoles::from_authored(&["director", "admin"]).unwrap();
        assert!(allowed.permits(&RoleSet::from_raw(["DIRECTOR"])));
        assert!(!allowed.permits(&RoleSet::from_raw(["donator"])));
        assert!(!allowed.permits(&RoleSet::empty()));
    }

    #[test]
    fn allowed_roles_dedups() {
        let allowed = AllowedRoles::new([Role::Admin, Role::Admin, Role::Director]);
        assert_eq!(allowed.roles(), &[Role::Admin, Role::Director]);
    }
}
