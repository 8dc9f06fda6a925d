//! In-memory user directory adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{SubjectId, UserProfile};

/// User profiles held in process memory, keyed by subject.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    profiles: RwLock<HashMap<SubjectId, UserProfile>>,
}

impl MemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find(&self, subject: &SubjectId) -> Result<Option<UserProfile>, UserDirectoryError> {
        Ok(self.profiles.read().await.get(subject).cloned())
    }

    async fn insert(&self, profile: &UserProfile) -> Result<(), UserDirectoryError> {
        // Last write wins, as in the backing store.
        self.profiles
            .write()
            .await
            .insert(profile.subject.clone(), profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ProfileService;
    use std::sync::Arc;

    fn subject() -> SubjectId {
        SubjectId::new("uid-1").expect("subject id")
    }

    #[tokio::test]
    async fn find_returns_inserted_profile() {
        let directory = MemoryUserDirectory::new();
        let profile = UserProfile::with_default_name(subject());

        directory.insert(&profile).await.expect("insert");
        assert_eq!(
            directory.find(&subject()).await.expect("find"),
            Some(profile)
        );
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent_against_this_adapter() {
        let service = ProfileService::new(Arc::new(MemoryUserDirectory::new()));

        let first = service.get_or_create(&subject()).await.expect("profile");
        let second = service.get_or_create(&subject()).await.expect("profile");
        assert_eq!(first, second);
    }
}
