//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep [`Error`] HTTP-agnostic while letting Actix handlers turn
//! domain failures into consistent JSON envelopes and status codes.

use actix_web::error::{JsonPayloadError, QueryPayloadError, UrlencodedError};
use actix_web::web::{FormConfig, JsonConfig, QueryConfig};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Extractor error handlers already wrap a domain error.
        if let Some(domain) = err.as_error::<Error>() {
            return domain.clone();
        }
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

fn map_query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, path = req.path(), "rejected query string");
    Error::invalid_request("query string is not valid for this operation")
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

fn invalid_body(reason: String) -> actix_web::Error {
    Error::invalid_request("request body is not valid for this operation")
        .with_details(json!({ "reason": reason }))
        .into()
}

fn map_json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, path = req.path(), "rejected JSON body");
    invalid_body(err.to_string())
}

fn map_form_error(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, path = req.path(), "rejected form body");
    invalid_body(err.to_string())
}

/// JSON body configuration that accepts bodies without a JSON content type
/// and reports failures in the error envelope.
pub fn json_config() -> JsonConfig {
    JsonConfig::default()
        .content_type_required(false)
        .error_handler(map_json_error)
}

/// Urlencoded form configuration that reports failures in the error envelope.
pub fn form_config() -> FormConfig {
    FormConfig::default().error_handler(map_form_error)
}

/// Query extractor configuration that reports failures in the error envelope.
///
/// Register it with `app_data` on every scope that extracts `web::Query`.
pub fn query_config() -> QueryConfig {
    QueryConfig::default().error_handler(map_query_error)
}
