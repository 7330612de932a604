use super::ports::{Entity, Filter};
use super::value_objects::{CountryCode, CurrencyCode};
use crate::error::{AccountsError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString, VariantNames};
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MerchantStatus {
    /// Fully operational, can process transactions.
    #[default]
    Active,
    Suspended,
    /// Undergoing compliance checks.
    UnderReview,
}

/// A business inside an organization that processes payments.
///
/// Owns its payment method configuration and the API keys issued to it.
/// Every mutation refreshes `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub country_code: CountryCode,
    pub currency: CurrencyCode,
    pub status: MerchantStatus,
    pub payment_methods: Vec<String>,
    pub api_keys: Vec<Uuid>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Merchant {
    pub const MAX_NAME_LENGTH: usize = 100;

    pub fn new(
        organization_id: Uuid,
        name: &str,
        country_code: CountryCode,
        currency: CurrencyCode,
        description: Option<String>,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AccountsError::validation("Merchant name cannot be empty"));
        }
        if name.chars().count() > Self::MAX_NAME_LENGTH {
            return Err(AccountsError::Validation(format!(
                "Merchant name must be at most {} characters",
                Self::MAX_NAME_LENGTH
            )));
        }
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            organization_id,
            name: name.to_string(),
            description,
            country_code,
            currency,
            status: MerchantStatus::default(),
            payment_methods: Vec::new(),
            api_keys: Vec::new(),
            metadata: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn suspend(&mut self) {
        self.status = MerchantStatus::Suspended;
        self.touch();
    }

    pub fn activate(&mut self) {
        self.status = MerchantStatus::Active;
        self.touch();
    }

    pub fn put_under_review(&mut self) {
        self.status = MerchantStatus::UnderReview;
        self.touch();
    }

    pub fn add_payment_method(&mut self, method: &str) -> Result<()> {
        let method = method.trim().to_lowercase();
        if method.is_empty() {
            return Err(AccountsError::validation("Payment method cannot be empty"));
        }
        if self.payment_methods.contains(&method) {
            return Err(AccountsError::Conflict(format!(
                "Payment method {method} already exists"
            )));
        }
        self.payment_methods.push(method);
        self.touch();
        Ok(())
    }

    pub fn remove_payment_method(&mut self, method: &str) -> Result<()> {
        let method = method.trim().to_lowercase();
        let position = self
            .payment_methods
            .iter()
            .position(|m| *m == method)
            .ok_or_else(|| AccountsError::not_found("Payment method", &method))?;
        self.payment_methods.remove(position);
        self.touch();
        Ok(())
    }

    pub fn add_api_key(&mut self, api_key: Uuid) -> Result<()> {
        if self.api_keys.contains(&api_key) {
            return Err(AccountsError::Conflict(format!(
                "API key {api_key} already exists"
            )));
        }
        self.api_keys.push(api_key);
        self.touch();
        Ok(())
    }

    pub fn remove_api_key(&mut self, api_key: Uuid) -> Result<()> {
        let position = self
            .api_keys
            .iter()
            .position(|k| *k == api_key)
            .ok_or_else(|| AccountsError::not_found("API key", api_key))?;
        self.api_keys.remove(position);
        self.touch();
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == MerchantStatus::Active
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Default)]
pub struct MerchantFilter {
    pub organization_id: Option<Uuid>,
    pub status: Option<MerchantStatus>,
    /// Case-insensitive substring of the merchant name.
    pub name_contains: Option<String>,
}

impl Filter<Merchant> for MerchantFilter {
    fn matches(&self, merchant: &Merchant) -> bool {
        self.organization_id
            .is_none_or(|id| merchant.organization_id == id)
            && self.status.is_none_or(|s| merchant.status == s)
            && self.name_contains.as_ref().is_none_or(|needle| {
                merchant
                    .name
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
    }

    fn is_empty(&self) -> bool {
        self.organization_id.is_none() && self.status.is_none() && self.name_contains.is_none()
    }
}

impl Entity for Merchant {
    const KIND: &'static str = "Merchant";
    const COLLECTION: &'static str = "merchants";

    type Filter = MerchantFilter;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Merchant {
        Merchant::new(
            Uuid::new_v4(),
            "  Acme Payments ",
            CountryCode::parse("us").unwrap(),
            CurrencyCode::parse("usd").unwrap(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_new_merchant_defaults() {
        let merchant = store();
        assert_eq!(merchant.name, "Acme Payments");
        assert_eq!(merchant.country_code.as_str(), "US");
        assert_eq!(merchant.currency.as_str(), "USD");
        assert!(merchant.is_active());
        assert!(merchant.payment_methods.is_empty());
    }

    #[test]
    fn test_name_validation() {
        let country = CountryCode::parse("US").unwrap();
        let currency = CurrencyCode::parse("USD").unwrap();
        assert!(
            Merchant::new(Uuid::new_v4(), "  ", country.clone(), currency.clone(), None).is_err()
        );
        let long = "x".repeat(101);
        assert!(Merchant::new(Uuid::new_v4(), &long, country, currency, None).is_err());
    }

    #[test]
    fn test_status_transitions() {
        let mut merchant = store();
        merchant.suspend();
        assert_eq!(merchant.status, MerchantStatus::Suspended);
        merchant.put_under_review();
        assert_eq!(merchant.status, MerchantStatus::UnderReview);
        assert!(!merchant.is_active());
        merchant.activate();
        assert!(merchant.is_active());
    }

    #[test]
    fn test_payment_methods_are_normalized() {
        let mut merchant = store();
        merchant.add_payment_method("Stripe").unwrap();
        assert_eq!(merchant.payment_methods, vec!["stripe".to_string()]);

        assert!(matches!(
            merchant.add_payment_method("STRIPE"),
            Err(AccountsError::Conflict(_))
        ));

        merchant.remove_payment_method("STRIPE").unwrap();
        assert!(merchant.payment_methods.is_empty());
        assert!(matches!(
            merchant.remove_payment_method("paypal"),
            Err(AccountsError::NotFound { .. })
        ));
    }

    #[test]
    fn test_api_keys() {
        let mut merchant = store();
        let key = Uuid::new_v4();
        merchant.add_api_key(key).unwrap();
        assert!(merchant.add_api_key(key).is_err());
        merchant.remove_api_key(key).unwrap();
        assert!(matches!(
            merchant.remove_api_key(key),
            Err(AccountsError::NotFound { .. })
        ));
    }

    #[test]
    fn test_filter_by_name() {
        let merchant = store();
        let filter = MerchantFilter {
            name_contains: Some("payMENTS".into()),
            ..Default::default()
        };
        assert!(filter.matches(&merchant));
    }
}
