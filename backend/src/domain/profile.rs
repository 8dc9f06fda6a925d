//! Lazy user profile creation.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{SubjectId, UserProfile};

/// Looks up user profiles, creating a default one on first sight.
///
/// Get-or-create is idempotent from the caller's view: a second call for the
/// same subject observes the stored profile and writes nothing. Two racing
/// first logins may both insert; the store's last write wins and both writes
/// carry the same default profile.
#[derive(Clone)]
pub struct ProfileService {
    directory: Arc<dyn UserDirectory>,
}

impl ProfileService {
    /// Build the service over the given directory port.
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Fetch the profile for a subject, creating the default on first login.
    pub async fn get_or_create(
        &self,
        subject: &SubjectId,
    ) -> Result<UserProfile, UserDirectoryError> {
        if let Some(profile) = self.directory.find(subject).await? {
            return Ok(profile);
        }

        let profile = UserProfile::with_default_name(subject.clone());
        self.directory.insert(&profile).await?;
        info!(subject = %subject, "created default profile on first login");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::DEFAULT_DISPLAY_NAME;
    use crate::domain::ports::MockUserDirectory;
    use mockall::predicate::eq;

    fn subject() -> SubjectId {
        SubjectId::new("uid-1").expect("subject id")
    }

    #[tokio::test]
    async fn first_login_inserts_default_profile() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find()
            .with(eq(subject()))
            .return_once(|_| Ok(None));
        directory
            .expect_insert()
            .withf(|profile| profile.display_name == DEFAULT_DISPLAY_NAME)
            .once()
            .return_once(|_| Ok(()));

        let service = ProfileService::new(Arc::new(directory));
        let profile = service.get_or_create(&subject()).await.expect("profile");
        assert_eq!(profile.subject, subject());
    }

    #[tokio::test]
    async fn existing_profile_is_returned_without_writes() {
        let stored = UserProfile {
            subject: subject(),
            display_name: "Ada".to_owned(),
        };
        let returned = stored.clone();

        let mut directory = MockUserDirectory::new();
        directory
            .expect_find()
            .return_once(move |_| Ok(Some(returned)));
        directory.expect_insert().never();

        let service = ProfileService::new(Arc::new(directory));
        let profile = service.get_or_create(&subject()).await.expect("profile");
        assert_eq!(profile, stored);
    }

    #[tokio::test]
    async fn directory_failures_propagate() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find()
            .return_once(|_| Err(UserDirectoryError::connection("refused")));

        let service = ProfileService::new(Arc::new(directory));
        let err = service.get_or_create(&subject()).await.expect_err("error");
        assert!(matches!(err, UserDirectoryError::Connection { .. }));
    }
}
