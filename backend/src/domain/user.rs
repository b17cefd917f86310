//! User record model.
//!
//! A [`UserRecord`] is the unit the directory stores: a person's names, the
//! email address used as the lookup key, and a free-form date of birth. The
//! wire format keeps the historical `DOB` key for the date of birth.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fields a caller can supply for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Lookup key.
    Email,
    /// Free-form date of birth.
    DateOfBirth,
}

impl UserField {
    /// Name of the field as it appears in requests and responses.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::DateOfBirth => "DOB",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Validation errors raised while building a [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// A required field was absent or blank.
    #[error("{field} must not be empty")]
    MissingField {
        /// The offending field.
        field: UserField,
    },
}

impl UserValidationError {
    /// Field the error refers to.
    #[must_use]
    pub const fn field(&self) -> UserField {
        match self {
            Self::MissingField { field } => *field,
        }
    }
}

fn require(field: UserField, value: String) -> Result<String, UserValidationError> {
    if value.trim().is_empty() {
        return Err(UserValidationError::MissingField { field });
    }
    Ok(value)
}

/// Email address identifying a user record.
///
/// Stored verbatim: comparisons are exact and case-sensitive, with no
/// trimming or normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        require(UserField::Email, email.into()).map(Self)
    }

    /// Borrow the address as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One person held by the directory.
///
/// ## Invariants
/// - `firstName`, `lastName` and `email` are non-blank.
/// - `DOB` is optional and stored verbatim.
///
/// # Examples
/// ```
/// use user_directory::domain::UserRecord;
///
/// let user = UserRecord::new("Jon", "Lovato", "jon@x.com", Some("10/10/1995".into()))
///     .expect("valid user");
/// assert!(user.has_email("jon@x.com"));
/// assert!(!user.has_email("JON@x.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "UserRecordDto", into = "UserRecordDto")]
pub struct UserRecord {
    #[schema(rename = "firstName", example = "John")]
    first_name: String,
    #[schema(rename = "lastName", example = "Wick")]
    last_name: String,
    #[schema(value_type = String, example = "johnwick@gamil.com")]
    email: Email,
    #[schema(rename = "DOB", example = "22-01-1990")]
    date_of_birth: Option<String>,
}

impl UserRecord {
    /// Build a record, rejecting blank required fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        date_of_birth: Option<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            first_name: require(UserField::FirstName, first_name.into())?,
            last_name: require(UserField::LastName, last_name.into())?,
            email: Email::new(email)?,
            date_of_birth,
        })
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Lookup key.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Free-form date of birth, if recorded.
    #[must_use]
    pub fn date_of_birth(&self) -> Option<&str> {
        self.date_of_birth.as_deref()
    }

    /// Exact, case-sensitive comparison against the record's email.
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        self.email.as_str() == email
    }

    /// Overwrite every field present in `changes`.
    pub fn apply(&mut self, changes: &UserChanges) {
        if let Some(first_name) = &changes.first_name {
            self.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &changes.last_name {
            self.last_name.clone_from(last_name);
        }
        if let Some(date_of_birth) = &changes.date_of_birth {
            self.date_of_birth = Some(date_of_birth.clone());
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct UserRecordDto {
    first_name: String,
    last_name: String,
    email: String,
    #[serde(rename = "DOB", default, skip_serializing_if = "Option::is_none")]
    date_of_birth: Option<String>,
}

impl From<UserRecord> for UserRecordDto {
    fn from(value: UserRecord) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email.into(),
            date_of_birth: value.date_of_birth,
        }
    }
}

impl TryFrom<UserRecordDto> for UserRecord {
    type Error = UserValidationError;

    fn try_from(value: UserRecordDto) -> Result<Self, Self::Error> {
        Self::new(
            value.first_name,
            value.last_name,
            value.email,
            value.date_of_birth,
        )
    }
}

/// Partial update applied to an existing record.
///
/// Blank values are discarded on construction, so an empty `DOB` in a request
/// leaves the stored value untouched. The email is the lookup key and cannot
/// be changed here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    first_name: Option<String>,
    last_name: Option<String>,
    date_of_birth: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl UserChanges {
    /// Start from an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the given name when `value` is present and not blank.
    #[must_use]
    pub fn with_first_name(mut self, value: Option<String>) -> Self {
        self.first_name = non_blank(value);
        self
    }

    /// Replace the family name when `value` is present and not blank.
    #[must_use]
    pub fn with_last_name(mut self, value: Option<String>) -> Self {
        self.last_name = non_blank(value);
        self
    }

    /// Replace the date of birth when `value` is present and not blank.
    #[must_use]
    pub fn with_date_of_birth(mut self, value: Option<String>) -> Self {
        self.date_of_birth = non_blank(value);
        self
    }

    /// True when applying the changes would leave a record untouched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.date_of_birth.is_none()
    }

    /// Names of the fields this change set overwrites.
    #[must_use]
    pub fn fields(&self) -> Vec<UserField> {
        [
            (UserField::FirstName, self.first_name.is_some()),
            (UserField::LastName, self.last_name.is_some()),
            (UserField::DateOfBirth, self.date_of_birth.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, present)| present.then_some(field))
        .collect()
    }
}
