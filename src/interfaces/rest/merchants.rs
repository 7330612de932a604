use super::auth::CurrentUser;
use super::error::ApiError;
use super::extract::{Json, Path, Query};
use super::schemas::{
    ApiKeyResponse, ListParams, ListResponse, MerchantCreateRequest, MerchantResponse,
    PaymentMethodRequest,
};
use super::AppState;
use crate::application::merchant_service::NewMerchant;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::Router;
use uuid::Uuid;

const BASE: &str = "/organizations/:org_id/merchants";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(BASE, get(list).post(create))
        .route(&format!("{BASE}/:merchant_id"), get(show))
        .route(&format!("{BASE}/:merchant_id/activate"), post(activate))
        .route(&format!("{BASE}/:merchant_id/suspend"), post(suspend))
        .route(&format!("{BASE}/:merchant_id/review"), post(review))
        .route(
            &format!("{BASE}/:merchant_id/payment-methods"),
            post(add_payment_method),
        )
        .route(
            &format!("{BASE}/:merchant_id/payment-methods/:method"),
            delete(remove_payment_method),
        )
        .route(&format!("{BASE}/:merchant_id/api-keys"), post(issue_api_key))
        .route(
            &format!("{BASE}/:merchant_id/api-keys/:key"),
            delete(revoke_api_key),
        )
}

type MerchantResult = Result<Json<MerchantResponse>, ApiError>;

async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(org_id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<MerchantResponse>>, ApiError> {
    let page = params.page()?;
    let (items, total) = state
        .merchants
        .list_merchants(org_id, page, params.status())
        .await?;
    Ok(Json(ListResponse::new(items, total, page)))
}

async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(org_id): Path<Uuid>,
    Json(body): Json<MerchantCreateRequest>,
) -> Result<(StatusCode, Json<MerchantResponse>), ApiError> {
    let new = NewMerchant {
        name: body.name,
        country_code: body.country_code,
        currency: body.currency,
        description: body.description,
    };
    let merchant = state.merchants.create_merchant(org_id, new).await?;
    Ok((StatusCode::CREATED, Json(merchant.into())))
}

async fn show(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((org_id, merchant_id)): Path<(Uuid, Uuid)>,
) -> MerchantResult {
    Ok(Json(state.merchants.get_merchant(org_id, merchant_id).await?.into()))
}

async fn activate(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((org_id, merchant_id)): Path<(Uuid, Uuid)>,
) -> MerchantResult {
    Ok(Json(
        state
            .merchants
            .activate_merchant(org_id, merchant_id)
            .await?
            .into(),
    ))
}

async fn suspend(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((org_id, merchant_id)): Path<(Uuid, Uuid)>,
) -> MerchantResult {
    Ok(Json(
        state
            .merchants
            .suspend_merchant(org_id, merchant_id)
            .await?
            .into(),
    ))
}

async fn review(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((org_id, merchant_id)): Path<(Uuid, Uuid)>,
) -> MerchantResult {
    Ok(Json(
        state
            .merchants
            .review_merchant(org_id, merchant_id)
            .await?
            .into(),
    ))
}

async fn add_payment_method(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((org_id, merchant_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<PaymentMethodRequest>,
) -> MerchantResult {
    let merchant = state
        .merchants
        .add_payment_method(org_id, merchant_id, &body.payment_method)
        .await?;
    Ok(Json(merchant.into()))
}

async fn remove_payment_method(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((org_id, merchant_id, method)): Path<(Uuid, Uuid, String)>,
) -> MerchantResult {
    let merchant = state
        .merchants
        .remove_payment_method(org_id, merchant_id, &method)
        .await?;
    Ok(Json(merchant.into()))
}

async fn issue_api_key(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((org_id, merchant_id)): Path<(Uuid, Uuid)>,
) -> Result<(StatusCode, Json<ApiKeyResponse>), ApiError> {
    let (_, key) = state.merchants.issue_api_key(org_id, merchant_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiKeyResponse::new(merchant_id, key)),
    ))
}

async fn revoke_api_key(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((org_id, merchant_id, key)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state
        .merchants
        .revoke_api_key(org_id, merchant_id, key)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
