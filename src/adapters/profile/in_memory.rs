//! In-memory ProfileReader for tests and local development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{ProfileReader, ProfileRecord};

/// Profile rows keyed by user id.
#[derive(Debug, Default)]
pub struct InMemoryProfileReader {
    profiles: RwLock<HashMap<UserId, ProfileRecord>>,
    unavailable: RwLock<bool>,
}

impl InMemoryProfileReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, user_id: UserId, roles: &[&str], has_completed_profile: bool) -> Self {
        self.insert(
            user_id,
            ProfileRecord {
                roles: roles.iter().map(|r| r.to_string()).collect(),
                has_completed_profile,
            },
        );
        self
    }

    pub fn insert(&self, user_id: UserId, record: ProfileRecord) {
        self.profiles.write().unwrap().insert(user_id, record);
    }

    /// Makes every lookup fail as if the backend were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().unwrap() = unavailable;
    }
}

#[async_trait]
impl ProfileReader for InMemoryProfileReader {
    async fn find_profile(
        &self,
        user_id: &UserId,
        _access_token: &str,
    ) -> Result<Option<ProfileRecord>, DomainError> {
        if *self.unavailable.read().unwrap() {
            return Err(DomainError::new(
                ErrorCode::ExternalServiceError,
                "Profile store unavailable",
            ));
        }

        Ok(self.profiles.read().unwrap().get(user_id).cloned())
    }
}
