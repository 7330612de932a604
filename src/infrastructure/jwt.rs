use crate::config::JwtSettings;
use crate::domain::ports::TokenManager;
use crate::domain::token::TokenData;
use crate::domain::user::UserStatus;
use crate::domain::value_objects::Email;
use crate::error::{AccountsError, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Wire claims. `exp` is seconds since the epoch.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: Uuid,
    email: String,
    status: UserStatus,
    exp: i64,
}

/// HMAC-signed JSON Web Tokens.
pub struct JwtManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    header: Header,
    validation: Validation,
}

impl JwtManager {
    pub fn new(secret: &str, algorithm: &str) -> Result<Self> {
        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|_| AccountsError::Config(format!("unknown JWT algorithm {algorithm}")))?;
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AccountsError::Config(format!(
                "JWT algorithm {algorithm:?} is not an HMAC algorithm"
            )));
        }
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            header: Header::new(algorithm),
            validation,
        })
    }

    pub fn from_settings(settings: &JwtSettings) -> Result<Self> {
        Self::new(&settings.secret_key, &settings.algorithm)
    }
}

impl TokenManager for JwtManager {
    fn issue(&self, data: &TokenData) -> Result<String> {
        let claims = Claims {
            user_id: data.user_id,
            email: data.email.to_string(),
            status: data.status,
            exp: data.expires_at.timestamp(),
        };
        jsonwebtoken::encode(&self.header, &claims, &self.encoding)
            .map_err(|e| AccountsError::InternalError(Box::new(e)))
    }

    fn decode(&self, token: &str) -> Result<TokenData> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AccountsError::ExpiredToken,
                _ => AccountsError::InvalidToken(e.to_string()),
            })?
            .claims;

        let email = Email::parse(&claims.email)
            .map_err(|e| AccountsError::InvalidToken(format!("invalid token payload: {e}")))?;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| AccountsError::InvalidToken("invalid expiration".to_string()))?;

        Ok(TokenData {
            user_id: claims.user_id,
            email,
            status: claims.status,
            expires_at,
        })
    }

    fn refresh(&self, token: &str, expires_in: Option<Duration>) -> Result<String> {
        let mut data = self.decode(token)?;
        data.expires_at = Utc::now() + expires_in.unwrap_or_else(|| self.default_expiration());
        self.issue(&data)
    }
}
