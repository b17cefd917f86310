//! Mapping from directory failures to transport-safe domain errors.

use serde_json::json;

use crate::domain::{DirectoryError, Error, USER_NOT_FOUND_MESSAGE};

pub(super) fn map_directory_error(error: DirectoryError) -> Error {
    match error {
        DirectoryError::NotFound { email } => {
            Error::not_found(USER_NOT_FOUND_MESSAGE).with_details(json!({ "email": email }))
        }
        DirectoryError::DuplicateEmail { email } => {
            Error::conflict(format!("A user with the email {email} already exists."))
                .with_details(json!({ "field": "email", "code": "duplicate_email" }))
        }
    }
}
