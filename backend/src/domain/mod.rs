//! Domain primitives, the user directory and its ports.
//!
//! Purpose: keep record management free of transport and storage concerns.
//! Inbound adapters talk to the directory through [`ports`]; outbound
//! adapters decide where the records live.
//!
//! Public surface:
//! - [`UserDirectory`]: ordered collection implementing the five operations.
//! - [`UserRecord`], [`UserChanges`]: the stored entity and partial updates.
//! - [`Error`], [`ErrorCode`]: transport-agnostic failures.
//! - [`TraceId`]: request correlation identifier.

pub mod directory;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::directory::{
    DirectoryError, EmailPolicy, ParseEmailPolicyError, USER_NOT_FOUND_MESSAGE, UserDirectory,
    seed_users,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{Email, UserChanges, UserField, UserRecord, UserValidationError};
