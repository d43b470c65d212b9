//! ProfileReader port for the portal's profile table.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::foundation::{DomainError, UserId};

/// Raw profile row as stored by the portal.
///
/// Roles stay as strings here; they are normalised into a `RoleSet` by the
/// session loader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(rename = "profile_completed", default)]
    pub has_completed_profile: bool,
}

/// Query operations on user profiles
#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// Find the profile row for a user. `Ok(None)` when no row exists.
    ///
    /// `access_token` is the user's own validated token. Stores that scope
    /// rows to their owner read with it, so only the caller's row is visible.
    async fn find_profile(
        &self,
        user_id: &UserId,
        access_token: &str,
    ) -> Result<Option<ProfileRecord>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_from_table_row() {
        let record: ProfileRecord =
            serde_json::from_str(r#"{"roles":["admin","donator"],"profile_completed":true}"#)
                .unwrap();
        assert_eq!(record.roles, vec!["admin", "donator"]);
        assert!(record.has_completed_profile);
    }

    #[test]
    fn record_defaults_missing_columns() {
        let record: ProfileRecord = serde_json::from_str("{}").unwrap();
        assert!(record.roles.is_empty());
        assert!(!record.has_completed_profile);
    }

    #[test]
    fn profile_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn ProfileReader) {}
    }
}
