use super::ports::{Entity, Filter};
use super::value_objects::{Email, HashedPassword};
use crate::error::{AccountsError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

/// An authenticated member of an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub organization_id: Uuid,
    pub hashed_password: HashedPassword,
    pub name: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(
        email: Email,
        organization_id: Uuid,
        hashed_password: HashedPassword,
        name: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            email,
            organization_id,
            hashed_password,
            name: normalize_name(name)?,
            status: UserStatus::default(),
            created_at: Utc::now(),
            last_login: None,
        })
    }

    pub fn activate(&mut self) {
        self.status = UserStatus::Active;
    }

    pub fn deactivate(&mut self) {
        self.status = UserStatus::Inactive;
    }

    pub fn suspend(&mut self) {
        self.status = UserStatus::Suspended;
    }

    pub fn record_login(&mut self) {
        self.last_login = Some(Utc::now());
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

fn normalize_name(name: Option<&str>) -> Result<Option<String>> {
    match name {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => {
            Err(AccountsError::validation("Name cannot be empty string"))
        }
        Some(raw) => Ok(Some(raw.trim().to_string())),
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub organization_id: Option<Uuid>,
    pub status: Option<UserStatus>,
    pub email: Option<Email>,
}

impl Filter<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        self.organization_id
            .is_none_or(|id| user.organization_id == id)
            && self.status.is_none_or(|s| user.status == s)
            && self.email.as_ref().is_none_or(|e| &user.email == e)
    }

    fn is_empty(&self) -> bool {
        self.organization_id.is_none() && self.status.is_none() && self.email.is_none()
    }
}

impl Entity for User {
    const KIND: &'static str = "User";
    const COLLECTION: &'static str = "users";

    type Filter = UserFilter;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
