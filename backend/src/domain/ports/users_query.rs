//! Driving port for reading the user directory.
//!
//! Inbound adapters use this port to list and look up records without
//! knowing where the directory lives.

use async_trait::async_trait;

use crate::domain::{Error, UserRecord};

/// Read-side use-cases over the user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every record in insertion order.
    async fn list_users(&self) -> Result<Vec<UserRecord>, Error>;

    /// Return the records whose email equals `email` exactly.
    ///
    /// An empty result is a success, not an error.
    async fn find_users_by_email(&self, email: &str) -> Result<Vec<UserRecord>, Error>;
}
