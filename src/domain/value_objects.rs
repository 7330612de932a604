//! Validated value objects shared by the accounts aggregates.
//!
//! Every type here is immutable once built and normalizes its input, so two
//! values compare equal whenever their normalized forms are equal.

use crate::error::{AccountsError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z0-9]+(-[a-z0-9]+)*\.)+[a-z]{2,}$").expect("valid domain regex")
});

const MASK: &str = "********";

/// An email address. The local part keeps its case, the domain is lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(AccountsError::validation("Email cannot be empty"));
        }
        if !EMAIL_PATTERN.is_match(value) {
            return Err(AccountsError::validation("Invalid email format"));
        }
        let (local, domain) = value
            .split_once('@')
            .ok_or_else(|| AccountsError::validation("Invalid email format"))?;
        Ok(Self(format!("{local}@{}", domain.to_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or_default()
    }
}

/// Domain name following RFC 1035 host syntax, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    pub const MAX_LENGTH: usize = 253;

    pub fn parse(raw: &str) -> Result<Self> {
        let domain = raw.trim().to_lowercase();
        if domain.is_empty() {
            return Err(AccountsError::validation("Domain name cannot be empty"));
        }
        if domain.len() > Self::MAX_LENGTH {
            return Err(AccountsError::validation(format!(
                "Domain must be less than {} characters",
                Self::MAX_LENGTH
            )));
        }
        if !DOMAIN_PATTERN.is_match(&domain) {
            return Err(AccountsError::validation(
                "Invalid domain format. Must be a valid domain name (e.g., example.com)",
            ));
        }
        Ok(Self(domain))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrganizationName(String);

impl OrganizationName {
    pub const MIN_LENGTH: usize = 2;
    pub const MAX_LENGTH: usize = 100;

    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(AccountsError::validation(
                "Organization name cannot be empty",
            ));
        }
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(AccountsError::validation(format!(
                "Organization name must be at least {} characters",
                Self::MIN_LENGTH
            )));
        }
        if length > Self::MAX_LENGTH {
            return Err(AccountsError::validation(format!(
                "Organization name must be less than {} characters",
                Self::MAX_LENGTH
            )));
        }
        if !name.chars().any(char::is_alphanumeric) {
            return Err(AccountsError::validation(
                "Organization name must contain at least one alphanumeric character",
            ));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A raw password that satisfies the complexity rules.
///
/// The value never leaves this type through `Display` or `Debug`; callers
/// hand it to a [`PasswordHasher`](crate::domain::ports::PasswordHasher) via
/// [`Password::expose`].
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 8;

    pub fn parse(raw: &str) -> Result<Self> {
        let mut errors = Vec::new();
        if raw.chars().count() < Self::MIN_LENGTH {
            errors.push("Must be at least 8 characters long");
        }
        if !raw.chars().any(|c| c.is_ascii_uppercase()) {
            errors.push("At least one uppercase letter required");
        }
        if !raw.chars().any(|c| c.is_ascii_lowercase()) {
            errors.push("At least one lowercase letter required");
        }
        if !raw.chars().any(|c| c.is_ascii_digit()) {
            errors.push("At least one digit required");
        }
        if !raw.chars().any(|c| !c.is_ascii_alphanumeric()) {
            errors.push("At least one special character required");
        }

        if errors.is_empty() {
            Ok(Self(raw.to_string()))
        } else {
            Err(AccountsError::Validation(format!(
                "Password validation failed: {}",
                errors.join("; ")
            )))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

/// PHC-formatted password hash as produced by the configured hasher.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashedPassword(String);

impl HashedPassword {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl fmt::Display for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

/// ISO 3166-1 alpha-2 country code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    pub fn parse(raw: &str) -> Result<Self> {
        let code = raw.trim();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AccountsError::validation(
                "Country code must be ISO 3166-1 alpha-2 format",
            ));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn parse(raw: &str) -> Result<Self> {
        let code = raw.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AccountsError::validation("Currency must be ISO 4217 format"));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Masks an API key for display: `abcd...wxyz`.
pub fn mask_api_key(full_key: &str) -> String {
    let chars: Vec<char> = full_key.chars().collect();
    if chars.len() <= 8 {
        return MASK.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

macro_rules! string_value_object {
    ($($ty:ident),+) => {$(
        impl TryFrom<String> for $ty {
            type Error = AccountsError;

            fn try_from(value: String) -> Result<Self> {
                Self::parse(&value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    )+};
}

string_value_object!(Email, DomainName, OrganizationName, CountryCode, CurrencyCode);
