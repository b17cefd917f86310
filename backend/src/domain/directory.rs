//! The user directory: an ordered, in-memory collection of [`UserRecord`]s
//! keyed by email.
//!
//! All operations are synchronous transformations of the record sequence.
//! Callers that share a directory across threads must serialise access; see
//! [`crate::outbound::memory::InMemoryUserDirectory`].

use std::fmt;
use std::str::FromStr;

use crate::domain::{UserChanges, UserRecord};

/// Message reported when an update targets an unknown email.
pub const USER_NOT_FOUND_MESSAGE: &str = "Unable to find user!";

/// How the directory treats repeated email addresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmailPolicy {
    /// Reject a create whose email already exists.
    #[default]
    Unique,
    /// Accept duplicates; a later update collapses them into one record.
    Permissive,
}

/// Error returned when parsing an [`EmailPolicy`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown email policy `{0}`; expected `unique` or `permissive`")]
pub struct ParseEmailPolicyError(String);

impl FromStr for EmailPolicy {
    type Err = ParseEmailPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unique" => Ok(Self::Unique),
            "permissive" => Ok(Self::Permissive),
            _ => Err(ParseEmailPolicyError(s.to_owned())),
        }
    }
}

impl fmt::Display for EmailPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unique => f.write_str("unique"),
            Self::Permissive => f.write_str("permissive"),
        }
    }
}

/// Failures raised by directory mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// No record carries the requested email.
    #[error("no user with email {email}")]
    NotFound {
        /// Email that was looked up.
        email: String,
    },
    /// The email is already taken under [`EmailPolicy::Unique`].
    #[error("a user with email {email} already exists")]
    DuplicateEmail {
        /// Email that collided.
        email: String,
    },
}

/// Records every fresh directory starts with unless seeding is disabled.
#[must_use]
pub fn seed_users() -> Vec<UserRecord> {
    [
        ("John", "Wick", "johnwick@gamil.com", "22-01-1990"),
        ("John", "Smith", "johnsmith@gamil.com", "21-07-1983"),
        ("Joyal", "White", "joyalwhite@gamil.com", "21-03-1989"),
    ]
    .into_iter()
    .filter_map(|(first, last, email, dob)| {
        UserRecord::new(first, last, email, Some(dob.to_owned())).ok()
    })
    .collect()
}

/// Ordered collection of user records.
///
/// # Examples
/// ```
/// use user_directory::domain::{EmailPolicy, UserChanges, UserDirectory};
///
/// let mut directory = UserDirectory::seeded(EmailPolicy::Unique);
/// let changes = UserChanges::new().with_date_of_birth(Some("1/1/1971".into()));
/// directory
///     .update("johnsmith@gamil.com", &changes)
///     .expect("seed user exists");
/// assert_eq!(directory.list().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDirectory {
    records: Vec<UserRecord>,
    policy: EmailPolicy,
}

impl UserDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new(policy: EmailPolicy) -> Self {
        Self::with_records(Vec::new(), policy)
    }

    /// Create a directory holding the [`seed_users`].
    #[must_use]
    pub fn seeded(policy: EmailPolicy) -> Self {
        Self::with_records(seed_users(), policy)
    }

    /// Create a directory from existing records, kept in the given order.
    #[must_use]
    pub fn with_records(records: Vec<UserRecord>, policy: EmailPolicy) -> Self {
        Self { records, policy }
    }

    /// Policy applied to duplicate emails.
    #[must_use]
    pub fn policy(&self) -> EmailPolicy {
        self.policy
    }

    /// Every record in insertion order.
    #[must_use]
    pub fn list(&self) -> &[UserRecord] {
        &self.records
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the directory holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose email equals `email` exactly, in insertion order.
    pub fn find_by_email<'a>(&'a self, email: &'a str) -> impl Iterator<Item = &'a UserRecord> {
        self.records.iter().filter(move |record| record.has_email(email))
    }

    /// Append `record`, returning a copy of what was stored.
    ///
    /// # Errors
    /// Returns [`DirectoryError::DuplicateEmail`] when the policy is
    /// [`EmailPolicy::Unique`] and the email is already present.
    pub fn create(&mut self, record: UserRecord) -> Result<UserRecord, DirectoryError> {
        let email = record.email().as_str();
        if self.policy == EmailPolicy::Unique && self.find_by_email(email).next().is_some() {
            return Err(DirectoryError::DuplicateEmail {
                email: email.to_owned(),
            });
        }
        self.records.push(record.clone());
        Ok(record)
    }

    /// Apply `changes` to the first record matching `email`.
    ///
    /// Every record with that email is then removed and the single updated
    /// record is appended, so duplicates collapse and the record moves to the
    /// end of the sequence.
    ///
    /// # Errors
    /// Returns [`DirectoryError::NotFound`] and leaves the directory untouched
    /// when nothing matches.
    pub fn update(
        &mut self,
        email: &str,
        changes: &UserChanges,
    ) -> Result<UserRecord, DirectoryError> {
        let Some(mut updated) = self.find_by_email(email).next().cloned() else {
            return Err(DirectoryError::NotFound {
                email: email.to_owned(),
            });
        };
        updated.apply(changes);
        self.records.retain(|record| !record.has_email(email));
        self.records.push(updated.clone());
        Ok(updated)
    }

    /// Remove every record matching `email`, returning how many were removed.
    ///
    /// Removing nothing is not an error.
    pub fn delete(&mut self, email: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|record| !record.has_email(email));
        before - self.records.len()
    }
}

#[cfg(test)]
mod tests;
