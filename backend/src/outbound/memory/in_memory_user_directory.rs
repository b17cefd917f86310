//! Mutex-guarded [`UserDirectory`] implementing the user ports.
//!
//! One lock covers all five operations, so concurrent requests from several
//! actix workers are applied one at a time in arrival order. The lock is
//! never held across an `.await`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::{debug, error, info};

use super::user_directory_error_mapping::map_directory_error;
use crate::domain::ports::{UsersCommand, UsersQuery};
use crate::domain::{EmailPolicy, Error, UserChanges, UserDirectory, UserRecord};

/// Shared, process-local user directory.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use user_directory::domain::EmailPolicy;
/// use user_directory::domain::ports::UsersQuery;
/// use user_directory::outbound::memory::InMemoryUserDirectory;
///
/// let directory = Arc::new(InMemoryUserDirectory::seeded(EmailPolicy::Unique));
/// let _query: Arc<dyn UsersQuery> = directory;
/// ```
#[derive(Debug)]
pub struct InMemoryUserDirectory {
    directory: Mutex<UserDirectory>,
}

impl InMemoryUserDirectory {
    /// Wrap an existing directory.
    #[must_use]
    pub fn new(directory: UserDirectory) -> Self {
        Self {
            directory: Mutex::new(directory),
        }
    }

    /// Start from the seed records.
    #[must_use]
    pub fn seeded(policy: EmailPolicy) -> Self {
        Self::new(UserDirectory::seeded(policy))
    }

    /// Start with no records.
    #[must_use]
    pub fn empty(policy: EmailPolicy) -> Self {
        Self::new(UserDirectory::new(policy))
    }

    /// Copy of the current directory state.
    ///
    /// # Errors
    /// Returns an internal error if a previous holder of the lock panicked.
    pub fn snapshot(&self) -> Result<UserDirectory, Error> {
        self.lock().map(|directory| directory.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, UserDirectory>, Error> {
        self.directory.lock().map_err(|_| {
            error!("user directory lock poisoned");
            Error::internal("user directory is unavailable")
        })
    }
}

#[async_trait]
impl UsersQuery for InMemoryUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, Error> {
        let directory = self.lock()?;
        debug!(count = directory.len(), "listing users");
        Ok(directory.list().to_vec())
    }

    async fn find_users_by_email(&self, email: &str) -> Result<Vec<UserRecord>, Error> {
        let directory = self.lock()?;
        let matches: Vec<UserRecord> = directory.find_by_email(email).cloned().collect();
        debug!(email, matches = matches.len(), "looked up users by email");
        Ok(matches)
    }
}

#[async_trait]
impl UsersCommand for InMemoryUserDirectory {
    async fn create_user(&self, user: UserRecord) -> Result<UserRecord, Error> {
        let mut directory = self.lock()?;
        let created = directory.create(user).map_err(map_directory_error)?;
        info!(
            email = %created.email(),
            first_name = created.first_name(),
            count = directory.len(),
            "user added"
        );
        Ok(created)
    }

    async fn update_user(&self, email: &str, changes: UserChanges) -> Result<UserRecord, Error> {
        let mut directory = self.lock()?;
        let updated = directory
            .update(email, &changes)
            .map_err(map_directory_error)?;
        let fields: Vec<&str> = changes
            .fields()
            .into_iter()
            .map(|field| field.wire_name())
            .collect();
        info!(email, ?fields, "user updated");
        Ok(updated)
    }

    async fn delete_user(&self, email: &str) -> Result<usize, Error> {
        let mut directory = self.lock()?;
        let removed = directory.delete(email);
        info!(email, removed, count = directory.len(), "user deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn directory() -> InMemoryUserDirectory {
        InMemoryUserDirectory::seeded(EmailPolicy::Unique)
    }

    fn jon() -> UserRecord {
        UserRecord::new("Jon", "Lovato", "jon@x.com", Some("10/10/1995".to_owned()))
            .expect("valid user")
    }

    #[rstest]
    #[tokio::test]
    async fn list_is_stable_without_mutation(directory: InMemoryUserDirectory) {
        let first = directory.list_users().await.expect("list");
        let second = directory.list_users().await.expect("list");
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn created_user_is_visible_to_queries(directory: InMemoryUserDirectory) {
        directory.create_user(jon()).await.expect("create");

        let found = directory
            .find_users_by_email("jon@x.com")
            .await
            .expect("lookup");
        assert_eq!(found, vec![jon()]);
        assert_eq!(directory.list_users().await.expect("list").len(), 4);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_create_is_a_conflict(directory: InMemoryUserDirectory) {
        directory.create_user(jon()).await.expect("first create");
        let err = directory.create_user(jon()).await.expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_unknown_email_is_not_found(directory: InMemoryUserDirectory) {
        let changes = UserChanges::new().with_date_of_birth(Some("1/1/1971".to_owned()));
        let err = directory
            .update_user("nobody@x.com", changes)
            .await
            .expect_err("unknown email");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Unable to find user!");
        assert_eq!(directory.snapshot().expect("snapshot").len(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_removed_count(directory: InMemoryUserDirectory) {
        assert_eq!(
            directory
                .delete_user("johnwick@gamil.com")
                .await
                .expect("delete"),
            1
        );
        assert_eq!(
            directory.delete_user("nobody@x.com").await.expect("delete"),
            0
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_are_all_applied() {
        let directory = Arc::new(InMemoryUserDirectory::empty(EmailPolicy::Unique));
        let handles: Vec<_> = (0..32)
            .map(|index| {
                let directory = Arc::clone(&directory);
                tokio::spawn(async move {
                    let user = UserRecord::new("User", "Example", format!("user{index}@x.com"), None)
                        .expect("valid user");
                    directory.create_user(user).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.expect("task").expect("create");
        }
        assert_eq!(directory.snapshot().expect("snapshot").len(), 32);
    }

    #[test]
    fn poisoned_lock_surfaces_internal_error() {
        let directory = Arc::new(InMemoryUserDirectory::seeded(EmailPolicy::Unique));
        let poisoner = Arc::clone(&directory);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.directory.lock().expect("first lock");
            panic!("poison the directory lock");
        })
        .join();

        let err = directory.snapshot().expect_err("poisoned lock");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
