//! Regression coverage for directory operations.

use super::*;
use rstest::{fixture, rstest};

const JOHN_SMITH: &str = "johnsmith@gamil.com";
const JOHN_WICK: &str = "johnwick@gamil.com";

#[fixture]
fn directory() -> UserDirectory {
    UserDirectory::seeded(EmailPolicy::Unique)
}

#[fixture]
fn jon() -> UserRecord {
    UserRecord::new("Jon", "Lovato", "jon@x.com", Some("10/10/1995".to_owned()))
        .expect("valid user")
}

fn emails(directory: &UserDirectory) -> Vec<&str> {
    directory
        .list()
        .iter()
        .map(|record| record.email().as_str())
        .collect()
}

fn dob_change(value: &str) -> UserChanges {
    UserChanges::new().with_date_of_birth(Some(value.to_owned()))
}

#[rstest]
fn seeded_directory_lists_seed_users_in_order(directory: UserDirectory) {
    assert_eq!(
        emails(&directory),
        vec![JOHN_WICK, JOHN_SMITH, "joyalwhite@gamil.com"]
    );
    assert_eq!(directory.list(), seed_users().as_slice());
}

#[rstest]
fn empty_directory_has_no_records() {
    let directory = UserDirectory::new(EmailPolicy::Permissive);
    assert!(directory.is_empty());
    assert_eq!(directory.policy(), EmailPolicy::Permissive);
}

#[rstest]
fn create_appends_and_is_findable(mut directory: UserDirectory, jon: UserRecord) {
    let created = directory.create(jon.clone()).expect("unique email");

    assert_eq!(created, jon);
    assert_eq!(directory.len(), 4);
    assert_eq!(directory.list().last(), Some(&jon));
    let found: Vec<_> = directory.find_by_email("jon@x.com").collect();
    assert_eq!(found, vec![&jon]);
}

#[rstest]
fn unique_policy_rejects_duplicate_email(mut directory: UserDirectory) {
    let duplicate = UserRecord::new("Johnny", "Smith", JOHN_SMITH, None).expect("valid user");
    let before = directory.clone();

    let err = directory.create(duplicate).expect_err("duplicate email");

    assert_eq!(
        err,
        DirectoryError::DuplicateEmail {
            email: JOHN_SMITH.to_owned()
        }
    );
    assert_eq!(directory, before);
}

#[rstest]
#[case("JOHNSMITH@gamil.com")]
#[case("johnsmith")]
#[case("johnsmith@gamil.com ")]
fn lookups_are_exact(directory: UserDirectory, #[case] probe: &str) {
    assert_eq!(directory.find_by_email(probe).count(), 0);
}

#[rstest]
fn update_changes_only_supplied_fields(mut directory: UserDirectory) {
    let updated = directory
        .update(JOHN_SMITH, &dob_change("1/1/1971"))
        .expect("seed user exists");

    assert_eq!(updated.date_of_birth(), Some("1/1/1971"));
    assert_eq!(updated.first_name(), "John");
    assert_eq!(updated.last_name(), "Smith");
    let found: Vec<_> = directory.find_by_email(JOHN_SMITH).collect();
    assert_eq!(found, vec![&updated]);
}

#[rstest]
fn update_moves_record_to_end(mut directory: UserDirectory) {
    directory
        .update(JOHN_WICK, &dob_change("1/1/1971"))
        .expect("seed user exists");

    assert_eq!(
        emails(&directory),
        vec![JOHN_SMITH, "joyalwhite@gamil.com", JOHN_WICK]
    );
}

#[rstest]
fn update_missing_user_leaves_directory_unchanged(mut directory: UserDirectory) {
    let before = directory.clone();

    let err = directory
        .update("nobody@x.com", &dob_change("1/1/1971"))
        .expect_err("unknown email");

    assert_eq!(
        err,
        DirectoryError::NotFound {
            email: "nobody@x.com".to_owned()
        }
    );
    assert_eq!(directory, before);
}

#[rstest]
fn permissive_update_collapses_duplicates() {
    let mut directory = UserDirectory::seeded(EmailPolicy::Permissive);
    let duplicate = UserRecord::new("Johnny", "Smith", JOHN_SMITH, None).expect("valid user");
    directory.create(duplicate).expect("permissive accepts duplicates");
    assert_eq!(directory.find_by_email(JOHN_SMITH).count(), 2);

    let updated = directory
        .update(JOHN_SMITH, &dob_change("1/1/1971"))
        .expect("user exists");

    // The first match by insertion order wins.
    assert_eq!(updated.first_name(), "John");
    assert_eq!(directory.find_by_email(JOHN_SMITH).count(), 1);
    assert_eq!(directory.len(), 3);
    assert_eq!(directory.list().last(), Some(&updated));
}

#[rstest]
fn delete_removes_matching_records(mut directory: UserDirectory) {
    assert_eq!(directory.delete(JOHN_WICK), 1);
    assert_eq!(directory.find_by_email(JOHN_WICK).count(), 0);
    assert_eq!(directory.len(), 2);
}

#[rstest]
fn delete_missing_user_is_a_no_op(mut directory: UserDirectory) {
    let before = directory.clone();
    assert_eq!(directory.delete("nobody@x.com"), 0);
    assert_eq!(directory, before);
}

#[rstest]
#[case("unique", EmailPolicy::Unique)]
#[case("Permissive", EmailPolicy::Permissive)]
#[case(" unique ", EmailPolicy::Unique)]
fn email_policy_parses_known_names(#[case] raw: &str, #[case] expected: EmailPolicy) {
    assert_eq!(raw.parse::<EmailPolicy>(), Ok(expected));
}

#[rstest]
fn email_policy_rejects_unknown_names() {
    let err = "strict".parse::<EmailPolicy>().expect_err("unknown policy");
    assert!(err.to_string().contains("strict"));
}
