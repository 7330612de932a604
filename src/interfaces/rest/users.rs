use super::auth::CurrentUser;
use super::error::ApiError;
use super::extract::{Json, Path, Query};
use super::schemas::{ListParams, ListResponse, UserResponse};
use super::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/:org_id/users", get(list))
        .route("/organizations/:org_id/users/:user_id", get(show))
}

async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(org_id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<UserResponse>>, ApiError> {
    let page = params.page()?;
    let (items, total) = state
        .users
        .list_users(org_id, page, params.status())
        .await?;
    Ok(Json(ListResponse::new(items, total, page)))
}

async fn show(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((org_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.get_user(Some(org_id), user_id).await?;
    Ok(Json(user.into()))
}
