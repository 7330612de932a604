use crate::error::AccountsError;
use axum::Json;
use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use miette::Diagnostic;
use serde::Serialize;

/// An [`AccountsError`] rendered as `{"detail": ..., "code": ...}`.
#[derive(Debug)]
pub struct ApiError(pub AccountsError);

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
    code: Option<String>,
}

impl From<AccountsError> for ApiError {
    fn from(err: AccountsError) -> Self {
        Self(err)
    }
}

/// Malformed paths, query strings and bodies are validation failures.
macro_rules! rejection_as_validation {
    ($($rejection:ty),+) => {$(
        impl From<$rejection> for ApiError {
            fn from(rejection: $rejection) -> Self {
                Self(AccountsError::Validation(rejection.body_text()))
            }
        }
    )+};
}

rejection_as_validation!(JsonRejection, FormRejection, PathRejection, QueryRejection);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AccountsError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AccountsError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            AccountsError::NotFound { .. } => StatusCode::NOT_FOUND,
            AccountsError::DomainAlreadyExists(_)
            | AccountsError::UserAlreadyExists(_)
            | AccountsError::Conflict(_)
            | AccountsError::InvalidState(_) => StatusCode::CONFLICT,
            AccountsError::Authentication(_)
            | AccountsError::InvalidToken(_)
            | AccountsError::ExpiredToken => StatusCode::UNAUTHORIZED,
            AccountsError::InactiveUser => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };
        let body = ErrorBody {
            detail,
            code: self.0.code().map(|c| c.to_string()),
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AccountsError::validation("bad"), StatusCode::UNPROCESSABLE_ENTITY),
            (AccountsError::InvalidFilter("x".into()), StatusCode::BAD_REQUEST),
            (AccountsError::not_found("User", "x"), StatusCode::NOT_FOUND),
            (AccountsError::DomainAlreadyExists("a.com".into()), StatusCode::CONFLICT),
            (AccountsError::InvalidState("x".into()), StatusCode::CONFLICT),
            (AccountsError::ExpiredToken, StatusCode::UNAUTHORIZED),
            (AccountsError::InactiveUser, StatusCode::FORBIDDEN),
            (AccountsError::Hashing("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }

    #[test]
    fn test_unauthorized_sets_challenge() {
        let response = ApiError(AccountsError::InvalidToken("bad".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
