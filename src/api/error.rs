use actix_session::{SessionGetError, SessionInsertError};
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use std::borrow::Cow;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Validation Failed: {0}")]
    Validation(validator::ValidationErrors),
    #[error("Unauthorized: {0}")]
    Unauthorized(Cow<'static, str>),
    #[error("Forbidden: {0}")]
    Forbidden(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Conflict: {0}")]
    Conflict(Cow<'static, str>),
    #[error("Upstream Failure: {0}")]
    UpstreamFailure(StatusCode),
    #[error("Internal Server Error")]
    InternalServer,
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl Error {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Stable machine-readable code carried in every error body.
    pub fn code(&self) -> &'static str {
        match self {
            Error::BadRequest(_) | Error::Validation(_) => "bad_request",
            Error::Unauthorized(_) => "unauthorized",
            Error::Forbidden(_) => "forbidden",
            Error::NotFound(_) => "not_found",
            Error::Conflict(_) => "conflict",
            Error::UpstreamFailure(_) => "upstream_failure",
            Error::InternalServer => "internal_error",
        }
    }

    fn body(&self) -> ErrorBody {
        let (message, details) = match self {
            Error::NotFound(msg)
            | Error::Conflict(msg)
            | Error::Unauthorized(msg)
            | Error::BadRequest(msg)
            | Error::Forbidden(msg) => (msg.clone(), None),
            Error::Validation(errors) => {
                ("Validation failed".into(), serde_json::to_value(errors).ok())
            }
            Error::UpstreamFailure(status) => (
                "Catalog fetch failed".into(),
                Some(json!({ "status": status.as_u16() })),
            ),
            Error::InternalServer => ("Internal Server Error".into(), None),
        };
        ErrorBody { code: self.code(), message, details }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::UpstreamFailure(status) => status,
            Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    // argon2 errors
    #[error("Hash Error")]
    HashError(#[from] argon2::password_hash::Error),
    // sqlx errors
    #[error("Database Error : {0}")]
    DatabaseError(Cow<'static, str>),
    #[error("Unique Violation: {0:?}")]
    UniqueViolation(DbErrorMeta),
    // serde errors
    #[error("JSON Serialization/Deserialization Error")]
    JsonError(#[from] serde_json::Error),
    // session store errors
    #[error("Session Error: {0}")]
    SessionError(Cow<'static, str>),
    // outbound http
    #[error("HTTP Client Error")]
    HttpClientError(#[from] reqwest::Error),
    #[error("Upstream responded with status {0}")]
    Upstream(u16),
    // Custom Errors
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Unauthorized: {0}")]
    Unauthorized(Cow<'static, str>),
    #[error("Forbidden: {0}")]
    Forbidden(Cow<'static, str>),
    #[error("Database Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Conflict: {0}")]
    Conflict(Cow<'static, str>),
    #[error("Provisioning Failed: {0}")]
    ProvisioningFailed(Cow<'static, str>),
    #[error("Internal System Error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug)]
pub struct DbErrorMeta {
    pub constraint: Option<String>,
    pub message: String,
}

impl DbErrorMeta {
    pub fn is_constraint(&self, name: &str) -> bool {
        self.constraint.as_deref() == Some(name)
    }
}

fn conflict_message(meta: &DbErrorMeta) -> Cow<'static, str> {
    let Some(constraint) = meta.constraint.as_deref() else {
        return "Duplicate value".into();
    };

    match constraint {
        "friends_pair_key" | "friends_pkey" => return "Already friends".into(),
        "friend_requests_pending_key" => return "Friend request already sent".into(),
        "group_memberships_pkey" => return "Already a member of this group".into(),
        _ => {}
    }

    let trimmed = constraint
        .strip_suffix("_pkey")
        .or_else(|| constraint.strip_suffix("_key"))
        .unwrap_or(constraint);
    let field = trimmed.rsplit('_').next().unwrap_or("value");

    let mut chars = field.chars();
    let field = match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Value".to_string(),
    };

    format!("{field} already exists").into()
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::BadRequest(msg) => Error::BadRequest(msg),
            SystemError::Unauthorized(msg) => Error::Unauthorized(msg),
            SystemError::Forbidden(msg) => Error::Forbidden(msg),
            SystemError::NotFound(msg) => Error::NotFound(msg),
            SystemError::Conflict(msg) => Error::Conflict(msg),
            SystemError::UniqueViolation(meta) => {
                log::warn!("Unique violation: {}", meta.message);
                Error::Conflict(conflict_message(&meta))
            }
            SystemError::Upstream(status) => Error::UpstreamFailure(
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            ),
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer
            }
        }
    }
}

impl From<sqlx::Error> for SystemError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some("23505") => {
                    return SystemError::UniqueViolation(DbErrorMeta {
                        constraint: db_err.constraint().map(|s| s.to_string()),
                        message: db_err.message().to_string(),
                    });
                }
                Some("23503") => {
                    return SystemError::NotFound("Referenced resource not found".into());
                }
                _ => {
                    log::error!("Unhandled DB error: {:?}", db_err);
                    return SystemError::DatabaseError(db_err.message().to_string().into());
                }
            }
        }
        log::error!("{:?}", err);
        SystemError::InternalError(Box::new(err))
    }
}

impl From<SessionGetError> for SystemError {
    fn from(err: SessionGetError) -> Self {
        SystemError::SessionError(err.to_string().into())
    }
}

impl From<SessionInsertError> for SystemError {
    fn from(err: SessionInsertError) -> Self {
        SystemError::SessionError(err.to_string().into())
    }
}

impl SystemError {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn conflict(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        let msg: String = msg.into();
        Self::InternalError(msg.into())
    }

    /// True when a unique violation was raised by the named constraint.
    pub fn is_unique_violation_on(&self, constraint: &str) -> bool {
        matches!(self, SystemError::UniqueViolation(meta) if meta.is_constraint(constraint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn violation(constraint: &str) -> SystemError {
        SystemError::UniqueViolation(DbErrorMeta {
            constraint: Some(constraint.to_string()),
            message: "duplicate key value violates unique constraint".to_string(),
        })
    }

    #[rstest]
    #[case("users_username_key", "Username already exists")]
    #[case("users_email_key", "Email already exists")]
    #[case("friends_pair_key", "Already friends")]
    #[case("friend_requests_pending_key", "Friend request already sent")]
    #[case("group_memberships_pkey", "Already a member of this group")]
    fn unique_violations_become_conflicts(#[case] constraint: &str, #[case] expected: &str) {
        match Error::from(violation(constraint)) {
            Error::Conflict(msg) => assert_eq!(msg, expected),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn upstream_status_is_forwarded() {
        let err = Error::from(SystemError::Upstream(429));
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.code(), "upstream_failure");
    }

    #[test]
    fn unexpected_failures_are_internal() {
        let err = Error::from(SystemError::internal("boom"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "internal_error");
    }

    #[test]
    fn provisioning_failure_is_internal() {
        let err = Error::from(SystemError::ProvisioningFailed("exhausted".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn constraint_check_matches_only_named_constraint() {
        let err = violation("users_username_key");
        assert!(err.is_unique_violation_on("users_username_key"));
        assert!(!err.is_unique_violation_on("users_email_key"));
    }
}
