//! Users resource handlers.
//!
//! ```text
//! GET    /users
//! GET    /users/{email}
//! POST   /users?firstName=Jon&lastName=Lovato&email=jon@x.com&DOB=10/10/1995
//! PUT    /users/{email} {"DOB":"1/1/1971"}
//! DELETE /users/{email}
//! ```
//!
//! Create and update read their fields from the query string and from an
//! optional body, either a JSON object or a urlencoded form. A non-blank body
//! field takes precedence over the same query field.

use actix_web::dev::Payload;
use actix_web::http::header::ContentType;
use actix_web::{
    FromRequest, HttpMessage, HttpRequest, HttpResponse, delete, get, post, put, web,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, UserChanges, UserRecord, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{form_config, json_config, query_config};
use crate::inbound::http::state::HttpState;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Fields accepted by `POST /users`.
///
/// Every field is optional on the wire so the query string and body can each
/// carry a subset; completeness is checked when converting to a
/// [`UserRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    /// Given name; required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name; required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Email key; required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Date of birth as free text.
    #[serde(rename = "DOB", default, skip_serializing_if = "Option::is_none")]
    #[schema(rename = "DOB")]
    pub date_of_birth: Option<String>,
}

impl CreateUserRequest {
    /// Merge `body` over `self`.
    ///
    /// Blank values count as absent on both sides, so a blank body field
    /// falls through to the query value.
    #[must_use]
    pub fn overlay(self, body: Self) -> Self {
        Self {
            first_name: non_blank(body.first_name).or_else(|| non_blank(self.first_name)),
            last_name: non_blank(body.last_name).or_else(|| non_blank(self.last_name)),
            email: non_blank(body.email).or_else(|| non_blank(self.email)),
            date_of_birth: non_blank(body.date_of_birth)
                .or_else(|| non_blank(self.date_of_birth)),
        }
    }
}

impl TryFrom<CreateUserRequest> for UserRecord {
    type Error = UserValidationError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        Self::new(
            value.first_name.unwrap_or_default(),
            value.last_name.unwrap_or_default(),
            value.email.unwrap_or_default(),
            non_blank(value.date_of_birth),
        )
    }
}

/// Fields accepted by `PUT /users/{email}`.
///
/// Blank or absent values leave the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    /// New given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New date of birth.
    #[serde(rename = "DOB", default, skip_serializing_if = "Option::is_none")]
    #[schema(rename = "DOB")]
    pub date_of_birth: Option<String>,
}

impl UpdateUserRequest {
    /// Merge `body` over `self`.
    ///
    /// Blank values count as absent on both sides, so a blank body field
    /// falls through to the query value.
    #[must_use]
    pub fn overlay(self, body: Self) -> Self {
        Self {
            first_name: non_blank(body.first_name).or_else(|| non_blank(self.first_name)),
            last_name: non_blank(body.last_name).or_else(|| non_blank(self.last_name)),
            date_of_birth: non_blank(body.date_of_birth)
                .or_else(|| non_blank(self.date_of_birth)),
        }
    }
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(value: UpdateUserRequest) -> Self {
        UserChanges::new()
            .with_first_name(value.first_name)
            .with_last_name(value.last_name)
            .with_date_of_birth(value.date_of_birth)
    }
}

/// Response body for `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UsersEnvelope {
    /// Every record in insertion order.
    pub users: Vec<UserRecord>,
}

fn map_validation_error(err: UserValidationError) -> Error {
    let field = err.field();
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field.wire_name(),
        "code": "missing_field",
    }))
}

/// Decode an optional body through the `Form` or `Json` extractor.
///
/// A urlencoded content type selects the form extractor; anything else is
/// read as JSON. An empty or whitespace-only body yields `T::default()`.
async fn body_fields<T>(req: &HttpRequest, body: web::Bytes) -> ApiResult<T>
where
    T: DeserializeOwned + Default + 'static,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    let mut payload = Payload::from(body);
    if req.content_type().eq_ignore_ascii_case(FORM_CONTENT_TYPE) {
        let form = web::Form::<T>::from_request(req, &mut payload).await?;
        Ok(form.into_inner())
    } else {
        let json = web::Json::<T>::from_request(req, &mut payload).await?;
        Ok(json.into_inner())
    }
}

fn plain_text(message: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(message)
}

/// List every user.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users in insertion order", body = UsersEnvelope),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersEnvelope>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(UsersEnvelope { users }))
}

/// Users whose email matches the path segment exactly.
///
/// No match yields an empty array rather than an error.
#[utoipa::path(
    get,
    path = "/users/{email}",
    params(("email" = String, Path, description = "Email to match exactly")),
    responses(
        (status = 200, description = "Matching users", body = [UserRecord]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUsersByEmail"
)]
#[get("/{email}")]
pub async fn get_users_by_email(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<UserRecord>>> {
    let email = path.into_inner();
    let users = state.users.find_users_by_email(&email).await?;
    Ok(web::Json(users))
}

/// Add a user.
#[utoipa::path(
    post,
    path = "/users",
    params(
        ("firstName" = Option<String>, Query, description = "Given name"),
        ("lastName" = Option<String>, Query, description = "Family name"),
        ("email" = Option<String>, Query, description = "Email key"),
        ("DOB" = Option<String>, Query, description = "Date of birth")
    ),
    request_body(
        content(
            (CreateUserRequest = "application/json"),
            (CreateUserRequest = "application/x-www-form-urlencoded")
        ),
        description = "Fields overriding the query string"
    ),
    responses(
        (status = 200, description = "User added", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already in use", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("")]
pub async fn create_user(
    state: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<CreateUserRequest>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let request = query.into_inner().overlay(body_fields(&req, body).await?);
    let user = UserRecord::try_from(request).map_err(map_validation_error)?;
    let created = state.users_command.create_user(user).await?;
    Ok(plain_text(format!(
        "The user {} has been added",
        created.first_name()
    )))
}

/// Overwrite the supplied fields of the user with this email.
///
/// The updated record moves to the end of the listing.
#[utoipa::path(
    put,
    path = "/users/{email}",
    params(
        ("email" = String, Path, description = "Email of the user to update"),
        ("firstName" = Option<String>, Query, description = "New given name"),
        ("lastName" = Option<String>, Query, description = "New family name"),
        ("DOB" = Option<String>, Query, description = "New date of birth")
    ),
    request_body(
        content(
            (UpdateUserRequest = "application/json"),
            (UpdateUserRequest = "application/x-www-form-urlencoded")
        ),
        description = "Fields overriding the query string"
    ),
    responses(
        (status = 200, description = "User updated", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unable to find user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/{email}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<UpdateUserRequest>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let email = path.into_inner();
    let request = query.into_inner().overlay(body_fields(&req, body).await?);
    let changes = UserChanges::from(request);
    if changes.is_empty() {
        debug!(%email, "update carries no field changes");
    }
    state.users_command.update_user(&email, changes).await?;
    Ok(plain_text(format!("User with the email {email} updated.")))
}

/// Remove every user with this email.
///
/// Removing nothing still succeeds.
#[utoipa::path(
    delete,
    path = "/users/{email}",
    params(("email" = String, Path, description = "Email of the users to remove")),
    responses(
        (status = 200, description = "Users removed", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/{email}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let email = path.into_inner();
    state.users_command.delete_user(&email).await?;
    Ok(plain_text(format!("User with the email {email} deleted.")))
}

/// The `/users` scope with every handler registered.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_directory::inbound::http::users::users_scope;
///
/// let _app = App::new().service(users_scope());
/// ```
pub fn users_scope() -> actix_web::Scope {
    web::scope("/users")
        .app_data(query_config())
        .app_data(json_config())
        .app_data(form_config())
        .service(list_users)
        .service(create_user)
        .service(get_users_by_email)
        .service(update_user)
        .service(delete_user)
}
