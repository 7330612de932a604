use super::auth::CurrentUser;
use super::error::ApiError;
use super::extract::{Json, Path, Query};
use super::schemas::{
    ListParams, ListResponse, OrganizationCreateRequest, OrganizationResponse,
    OrganizationUpdateRequest,
};
use super::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use uuid::Uuid;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations", get(list).post(create))
        .route("/organizations/:org_id", get(show).patch(update))
        .route("/organizations/:org_id/activate", post(activate))
        .route("/organizations/:org_id/suspend", post(suspend))
        .route("/organizations/:org_id/reactivate", post(reactivate))
}

async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<OrganizationResponse>>, ApiError> {
    let page = params.page()?;
    let (items, total) = state
        .organizations
        .list_organizations(page, params.status())
        .await?;
    Ok(Json(ListResponse::new(items, total, page)))
}

async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(body): Json<OrganizationCreateRequest>,
) -> Result<(StatusCode, Json<OrganizationResponse>), ApiError> {
    let org = state
        .organizations
        .create_organization(&body.name, &body.domain)
        .await?;
    Ok((StatusCode::CREATED, Json(org.into())))
}

async fn show(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(org_id): Path<Uuid>,
) -> Result<Json<OrganizationResponse>, ApiError> {
    let org = state.organizations.get_organization(org_id).await?;
    Ok(Json(org.into()))
}

async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(org_id): Path<Uuid>,
    Json(body): Json<OrganizationUpdateRequest>,
) -> Result<Json<OrganizationResponse>, ApiError> {
    let org = state
        .organizations
        .update_organization(org_id, body.name.as_deref(), body.domain.as_deref())
        .await?;
    Ok(Json(org.into()))
}

async fn activate(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(org_id): Path<Uuid>,
) -> Result<Json<OrganizationResponse>, ApiError> {
    Ok(Json(state.organizations.activate_organization(org_id).await?.into()))
}

async fn suspend(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(org_id): Path<Uuid>,
) -> Result<Json<OrganizationResponse>, ApiError> {
    Ok(Json(state.organizations.suspend_organization(org_id).await?.into()))
}

async fn reactivate(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(org_id): Path<Uuid>,
) -> Result<Json<OrganizationResponse>, ApiError> {
    Ok(Json(
        state
            .organizations
            .reactivate_organization(org_id)
            .await?
            .into(),
    ))
}
