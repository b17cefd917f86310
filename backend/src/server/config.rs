//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use user_directory::outbound::memory::InMemoryUserDirectory;

/// Everything needed to start the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) directory: Arc<InMemoryUserDirectory>,
}

impl ServerConfig {
    /// Construct a server configuration serving `directory` on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, directory: Arc<InMemoryUserDirectory>) -> Self {
        Self {
            bind_addr,
            directory,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
