//! Driving port for mutating the user directory.

use async_trait::async_trait;

use crate::domain::{Error, UserChanges, UserRecord};

/// Write-side use-cases over the user directory.
///
/// Implementations must apply each call atomically with respect to every
/// other call on the same directory, in arrival order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Append a new record and return it.
    ///
    /// Fails with [`crate::domain::ErrorCode::Conflict`] when the directory
    /// enforces unique emails and `user` repeats one.
    async fn create_user(&self, user: UserRecord) -> Result<UserRecord, Error>;

    /// Apply `changes` to the record keyed by `email` and return the result.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when nothing matches.
    async fn update_user(&self, email: &str, changes: UserChanges) -> Result<UserRecord, Error>;

    /// Remove every record keyed by `email`, returning how many went.
    async fn delete_user(&self, email: &str) -> Result<usize, Error>;
}
