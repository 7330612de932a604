//! Request and response bodies.

use crate::domain::merchant::Merchant;
use crate::domain::organization::Organization;
use crate::domain::ports::Page;
use crate::domain::user::User;
use crate::domain::value_objects::mask_api_key;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// `?limit=&offset=&status=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub status: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> Result<Page> {
        Page::new(self.limit, self.offset)
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

impl<T> ListResponse<T> {
    pub fn new<E>(items: Vec<E>, total: usize, page: Page) -> Self
    where
        T: From<E>,
    {
        Self {
            data: items.into_iter().map(T::from).collect(),
            total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserCreateRequest {
    pub email: String,
    pub password: String,
    pub organization_id: Uuid,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub organization_id: Uuid,
    pub name: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email.to_string(),
            organization_id: user.organization_id,
            name: user.name,
            status: user.status.to_string(),
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrganizationCreateRequest {
    pub name: String,
    pub domain: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct OrganizationUpdateRequest {
    pub name: Option<String>,
    pub domain: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrganizationResponse {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl From<Organization> for OrganizationResponse {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id,
            name: org.name.to_string(),
            domain: org.domain.to_string(),
            status: org.status.to_string(),
            created_at: org.created_at,
            updated_at: org.updated_at,
            metadata: org.metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MerchantCreateRequest {
    pub name: String,
    pub country_code: String,
    pub currency: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentMethodRequest {
    pub payment_method: String,
}

/// Merchant as exposed over HTTP. API keys are always masked.
#[derive(Debug, Serialize, Deserialize)]
pub struct MerchantResponse {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub country_code: String,
    pub currency: String,
    pub status: String,
    pub payment_methods: Vec<String>,
    pub api_keys: Vec<String>,
    pub metadata: BTreeMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Merchant> for MerchantResponse {
    fn from(merchant: Merchant) -> Self {
        Self {
            id: merchant.id,
            organization_id: merchant.organization_id,
            name: merchant.name,
            description: merchant.description,
            country_code: merchant.country_code.to_string(),
            currency: merchant.currency.to_string(),
            status: merchant.status.to_string(),
            payment_methods: merchant.payment_methods,
            api_keys: merchant
                .api_keys
                .iter()
                .map(|key| mask_api_key(&key.to_string()))
                .collect(),
            metadata: merchant.metadata,
            created_at: merchant.created_at,
            updated_at: merchant.updated_at,
        }
    }
}

/// Returned once, when a key is issued.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiKeyResponse {
    pub api_key: Uuid,
    pub masked_key: String,
    pub merchant_id: Uuid,
}

impl ApiKeyResponse {
    pub fn new(merchant_id: Uuid, api_key: Uuid) -> Self {
        Self {
            api_key,
            masked_key: mask_api_key(&api_key.to_string()),
            merchant_id,
        }
    }
}
