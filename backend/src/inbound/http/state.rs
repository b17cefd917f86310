//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and stay testable without real storage.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read-side directory port.
    pub users: Arc<dyn UsersQuery>,
    /// Write-side directory port.
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Construct state from separate query and command ports.
    pub fn new(users: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users,
            users_command,
        }
    }

    /// Construct state from one adapter implementing both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_directory::domain::EmailPolicy;
    /// use user_directory::inbound::http::state::HttpState;
    /// use user_directory::outbound::memory::InMemoryUserDirectory;
    ///
    /// let directory = Arc::new(InMemoryUserDirectory::seeded(EmailPolicy::Unique));
    /// let state = HttpState::from_directory(directory);
    /// let _users = state.users.clone();
    /// ```
    pub fn from_directory<D>(directory: Arc<D>) -> Self
    where
        D: UsersQuery + UsersCommand + 'static,
    {
        Self {
            users: directory.clone(),
            users_command: directory,
        }
    }
}
