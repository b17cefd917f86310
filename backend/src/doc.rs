//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/users` handler together with the record,
//! request and error schemas. The document is served by Swagger UI in debug
//! builds and exported via `cargo run --bin openapi-dump` for tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, UserRecord};
use crate::inbound::http::users::{CreateUserRequest, UpdateUserRequest, UsersEnvelope};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "Create, read, update and delete users keyed by email."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_users_by_email,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
    ),
    components(schemas(
        UserRecord,
        UsersEnvelope,
        CreateUserRequest,
        UpdateUserRequest,
        Error,
        ErrorCode
    )),
    tags(
        (name = "users", description = "Operations on the user directory")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths and schema fields.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_properties(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        match schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema for {name}"),
        }
    }

    #[rstest]
    #[case("/users")]
    #[case("/users/{email}")]
    fn users_paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn item_path_carries_get_put_and_delete() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/users/{email}").expect("item path");
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
    }

    #[test]
    fn user_record_schema_uses_wire_names() {
        let properties = schema_properties("UserRecord");
        for field in ["firstName", "lastName", "email", "DOB"] {
            assert!(properties.iter().any(|p| p == field), "missing {field}");
        }
    }

    #[test]
    fn error_schema_has_envelope_fields() {
        let properties = schema_properties("Error");
        for field in ["code", "message", "traceId", "details"] {
            assert!(properties.iter().any(|p| p == field), "missing {field}");
        }
    }
}
