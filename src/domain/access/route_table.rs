//! Static route classification.
//!
//! Every portal route is tagged once, when the table is built, with whether
//! it needs a session, a completed profile and which roles may enter. The
//! builder rejects tables that break the classification invariants, so a
//! bad table fails at startup instead of at the first unlucky visitor.

use std::fmt;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::domain::foundation::{AllowedRoles, ValidationError};

use super::paths::{is_profile_exempt, ROOT_PATH};
use super::route_guard::GuardOptions;

/// Errors detected while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("Route pattern cannot be empty")]
    EmptyPattern,

    #[error("Route pattern '{0}' must start with '/'")]
    RelativePattern(String),

    #[error("Route pattern '{0}' is declared twice")]
    DuplicatePattern(String),

    #[error("Profile-exempt route '{0}' cannot be role-gated")]
    ExemptRouteWithRoles(String),

    #[error("Route '{0}' restricts roles but does not require authentication")]
    RolesWithoutAuth(String),

    #[error("Route '{0}' is not on the fixed profile-exempt list")]
    NotExempt(String),

    #[error("Invalid role in allow-list: {0}")]
    InvalidRole(#[from] ValidationError),
}

/// Path pattern: exact (`/login`) or a subtree (`/admin/*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    Exact(String),
    /// Matches the prefix itself and anything below it.
    Subtree(String),
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self, RouteTableError> {
        if pattern.is_empty() {
            return Err(RouteTableError::EmptyPattern);
        }
        if !pattern.starts_with('/') {
            return Err(RouteTableError::RelativePattern(pattern.to_string()));
        }
        match pattern.strip_suffix("/*") {
            Some(prefix) if !prefix.is_empty() => Ok(Self::Subtree(prefix.to_string())),
            _ => Ok(Self::Exact(pattern.to_string())),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Exact(exact) => path == exact,
            RoutePattern::Subtree(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutePattern::Exact(exact) => f.write_str(exact),
            RoutePattern::Subtree(prefix) => write!(f, "{}/*", prefix),
        }
    }
}

/// Static tags attached to a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteClass {
    pub requires_auth: bool,
    pub requires_complete_profile: bool,
    pub allowed_roles: Option<AllowedRoles>,
    pub is_profile_exempt: bool,
}

impl RouteClass {
    /// Marketing pages and anything unknown.
    pub fn public() -> Self {
        Self {
            requires_auth: false,
            requires_complete_profile: false,
            allowed_roles: None,
            is_profile_exempt: false,
        }
    }

    /// Sign-in, registration and the completion form itself.
    pub fn profile_exempt() -> Self {
        Self {
            is_profile_exempt: true,
            ..Self::public()
        }
    }

    /// Any signed-in user with a completed profile.
    pub fn protected() -> Self {
        Self {
            requires_auth: true,
            requires_complete_profile: true,
            allowed_roles: None,
            is_profile_exempt: false,
        }
    }

    /// Signed-in users holding one of `roles`.
    pub fn role_gated(roles: AllowedRoles) -> Self {
        Self {
            allowed_roles: Some(roles),
            ..Self::protected()
        }
    }

    /// Options for the route guard wrapping this route.
    pub fn guard_options(&self) -> GuardOptions {
        GuardOptions {
            allowed_roles: self.allowed_roles.clone(),
            require_complete_profile: self.requires_complete_profile,
        }
    }

    fn is_role_gated(&self) -> bool {
        self.allowed_roles.as_ref().is_some_and(|r| !r.is_empty())
    }
}

/// One classified route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub pattern: RoutePattern,
    pub class: RouteClass,
}

/// Ordered route classification. First match wins; unknown paths are public.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    fallback: RouteClass,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Classification for `path`.
    pub fn classify(&self, path: &str) -> &RouteClass {
        self.entries
            .iter()
            .find(|entry| entry.pattern.matches(path))
            .map(|entry| &entry.class)
            .unwrap_or(&self.fallback)
    }
}

/// Builder collecting entries and validating them on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    pending: Vec<(String, PendingClass)>,
}

#[derive(Debug)]
enum PendingClass {
    Ready(RouteClass),
    Roles(Vec<String>),
}

impl RouteTableBuilder {
    pub fn public(self, pattern: &str) -> Self {
        self.route(pattern, RouteClass::public())
    }

    pub fn exempt(self, pattern: &str) -> Self {
        self.route(pattern, RouteClass::profile_exempt())
    }

    pub fn protected(self, pattern: &str) -> Self {
        self.route(pattern, RouteClass::protected())
    }

    /// Role-gated route. Role names are authored, so they must be spelled
    /// exactly as in the vocabulary.
    pub fn role_gated(mut self, pattern: &str, roles: &[&str]) -> Self {
        self.pending.push((
            pattern.to_string(),
            PendingClass::Roles(roles.iter().map(|r| r.to_string()).collect()),
        ));
        self
    }

    pub fn route(mut self, pattern: &str, class: RouteClass) -> Self {
        self.pending
            .push((pattern.to_string(), PendingClass::Ready(class)));
        self
    }

    pub fn build(self) -> Result<RouteTable, RouteTableError> {
        let mut entries: Vec<RouteEntry> = Vec::with_capacity(self.pending.len());

        for (raw, pending) in self.pending {
            let pattern = RoutePattern::parse(&raw)?;
            let class = match pending {
                PendingClass::Ready(class) => class,
                PendingClass::Roles(names) => {
                    RouteClass::role_gated(AllowedRoles::from_authored(names.as_slice())?)
                }
            };

            if entries.iter().any(|e| e.pattern == pattern) {
                return Err(RouteTableError::DuplicatePattern(raw));
            }
            if class.is_profile_exempt && class.is_role_gated() {
                return Err(RouteTableError::ExemptRouteWithRoles(raw));
            }
            if class.is_profile_exempt && !is_profile_exempt(&raw) {
                return Err(RouteTableError::NotExempt(raw));
            }
            if class.is_role_gated() && !class.requires_auth {
                return Err(RouteTableError::RolesWithoutAuth(raw));
            }

            entries.push(RouteEntry { pattern, class });
        }

        Ok(RouteTable {
            entries,
            fallback: RouteClass::public(),
        })
    }
}

fn build_portal_routes() -> Result<RouteTable, RouteTableError> {
    RouteTable::builder()
        .public(ROOT_PATH)
        .public("/nosotros")
        .public("/proyectos")
        .public("/donar")
        .public("/contacto")
        .exempt("/complete-profile")
        .exempt("/login")
        .exempt("/registro")
        .exempt("/auth/callback")
        .exempt("/reset-password")
        .role_gated("/admin/*", &["admin"])
        .role_gated("/director-sede/*", &["director_sede", "admin"])
        .role_gated("/director/*", &["director", "admin"])
        .role_gated("/donator/*", &["donator", "admin"])
        .protected("/profile/*")
        .build()
}

static PORTAL_ROUTES: Lazy<RouteTable> =
    Lazy::new(|| build_portal_routes().expect("portal route table is statically valid"));

/// The foundation portal's route table.
pub fn portal_routes() -> &'static RouteTable {
    &PORTAL_ROUTES
}
