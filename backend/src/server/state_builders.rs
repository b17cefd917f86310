//! Builders turning settings into the directory adapter and handler state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use user_directory::domain::EmailPolicy;
use user_directory::inbound::http::state::HttpState;
use user_directory::outbound::memory::InMemoryUserDirectory;

/// Create the process-wide directory, seeded unless `skip_seed` is set.
pub fn build_directory(policy: EmailPolicy, skip_seed: bool) -> Arc<InMemoryUserDirectory> {
    let directory = if skip_seed {
        InMemoryUserDirectory::empty(policy)
    } else {
        InMemoryUserDirectory::seeded(policy)
    };
    info!(%policy, seeded = !skip_seed, "user directory initialised");
    Arc::new(directory)
}

/// Wrap the directory in handler state shared by every worker.
pub fn build_http_state(directory: Arc<InMemoryUserDirectory>) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_directory(directory))
}
