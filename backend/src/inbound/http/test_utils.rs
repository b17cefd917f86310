//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::EmailPolicy;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::users_scope;
use crate::outbound::memory::InMemoryUserDirectory;

/// HTTP state over a freshly seeded directory enforcing unique emails.
pub fn seeded_state() -> HttpState {
    HttpState::from_directory(Arc::new(InMemoryUserDirectory::seeded(EmailPolicy::Unique)))
}

/// Build an app serving the users resource over `state`, wrapped in tracing.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(users_scope())
}
