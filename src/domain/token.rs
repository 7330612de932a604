use super::user::{User, UserStatus};
use super::value_objects::Email;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity carried by an access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenData {
    pub user_id: Uuid,
    pub email: Email,
    pub status: UserStatus,
    pub expires_at: DateTime<Utc>,
}

impl TokenData {
    pub fn create(user: &User, expires_in: Duration) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            status: user.status,
            expires_at: Utc::now() + expires_in,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::HashedPassword;

    #[test]
    fn test_expiry() {
        let user = User::new(
            Email::parse("user@example.com").unwrap(),
            Uuid::new_v4(),
            HashedPassword::new("x"),
            None,
        )
        .unwrap();

        let fresh = TokenData::create(&user, Duration::hours(1));
        assert!(!fresh.is_expired());
        assert_eq!(fresh.user_id, user.id);

        let stale = TokenData::create(&user, Duration::seconds(-1));
        assert!(stale.is_expired());
    }
}
