use super::error::ApiError;
use super::extract::{Form, Json};
use super::schemas::{LoginRequest, TokenForm, TokenResponse, UserCreateRequest, UserResponse};
use super::AppState;
use crate::domain::user::User;
use crate::error::AccountsError;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::routing::{get, post};
use axum::Router;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/token", post(token))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/me", get(me))
        .route("/auth/refresh", post(refresh))
}

/// The raw bearer token from the `Authorization` header.
pub struct BearerToken(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AccountsError::Authentication("Not authenticated".to_string()))?;

        match value.split_once(' ') {
            Some((scheme, token))
                if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
            {
                Ok(Self(token.trim().to_string()))
            }
            _ => Err(AccountsError::Authentication("Not authenticated".to_string()).into()),
        }
    }
}

/// The active user owning the request's bearer token.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        let user = state.auth.get_logged_in_user(&token).await?;
        Ok(Self(user))
    }
}

/// Unknown emails answer like wrong passwords.
async fn issue_for_credentials(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .auth
        .authenticate_user(email, password)
        .await
        .map_err(|e| match e {
            AccountsError::NotFound { .. } => {
                AccountsError::Authentication("Invalid email or password".to_string())
            }
            other => other,
        })?;
    let token = state.auth.create_access_token(&user)?;
    tracing::info!(user_id = %user.id, "access token issued");
    Ok(Json(TokenResponse::bearer(token)))
}

async fn token(
    State(state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    issue_for_credentials(&state, &form.username, &form.password).await
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    issue_for_credentials(&state, &body.email, &body.password).await
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<UserCreateRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .users
        .create_user(
            &body.email,
            &body.password,
            body.organization_id,
            body.name.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

async fn refresh(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<TokenResponse>, ApiError> {
    // Only tokens of users that are still active can be refreshed.
    state.auth.get_logged_in_user(&token).await?;
    let token = state.auth.refresh_access_token(&token)?;
    Ok(Json(TokenResponse::bearer(token)))
}
