//! In-memory user directory served over HTTP.
//!
//! Layout follows a ports-and-adapters split:
//! - [`domain`]: records, the directory, errors and port traits.
//! - [`outbound`]: where the records live.
//! - [`inbound`]: the actix-web handlers.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
