use crate::domain::merchant::{Merchant, MerchantFilter, MerchantStatus};
use crate::domain::organization::Organization;
use crate::domain::parse_status;
use crate::domain::ports::{Page, SharedRepository};
use crate::domain::value_objects::{CountryCode, CurrencyCode};
use crate::error::{AccountsError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Input for [`MerchantService::create_merchant`].
#[derive(Debug, Clone)]
pub struct NewMerchant {
    pub name: String,
    pub country_code: String,
    pub currency: String,
    pub description: Option<String>,
}

/// Merchant use cases. Every operation is scoped to an organization; a
/// merchant belonging to another organization is reported as not found.
#[derive(Clone)]
pub struct MerchantService {
    merchants: SharedRepository<Merchant>,
    organizations: SharedRepository<Organization>,
    write_lock: Arc<Mutex<()>>,
}

impl MerchantService {
    pub fn new(
        merchants: SharedRepository<Merchant>,
        organizations: SharedRepository<Organization>,
    ) -> Self {
        Self {
            merchants,
            organizations,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn list_merchants(
        &self,
        org_id: Uuid,
        page: Page,
        status: Option<&str>,
    ) -> Result<(Vec<Merchant>, usize)> {
        self.organizations.get(org_id).await?;
        let filter = MerchantFilter {
            organization_id: Some(org_id),
            status: status.map(parse_status::<MerchantStatus>).transpose()?,
            ..Default::default()
        };
        let merchants = self.merchants.list_all(page, &filter).await?;
        let total = self.merchants.count(&filter).await?;
        Ok((merchants, total))
    }

    pub async fn get_merchant(&self, org_id: Uuid, merchant_id: Uuid) -> Result<Merchant> {
        let merchant = self.merchants.get(merchant_id).await?;
        if merchant.organization_id != org_id {
            return Err(AccountsError::not_found("Merchant", merchant_id));
        }
        Ok(merchant)
    }

    pub async fn create_merchant(&self, org_id: Uuid, new: NewMerchant) -> Result<Merchant> {
        self.organizations.get(org_id).await?;
        let merchant = Merchant::new(
            org_id,
            &new.name,
            CountryCode::parse(&new.country_code)?,
            CurrencyCode::parse(&new.currency)?,
            new.description,
        )?;
        let merchant = self.merchants.save(merchant).await?;
        tracing::info!(
            organization_id = %org_id,
            merchant_id = %merchant.id,
            "merchant created"
        );
        Ok(merchant)
    }

    pub async fn suspend_merchant(&self, org_id: Uuid, merchant_id: Uuid) -> Result<Merchant> {
        self.modify(org_id, merchant_id, "suspended", |m| {
            m.suspend();
            Ok(())
        })
        .await
    }

    pub async fn activate_merchant(&self, org_id: Uuid, merchant_id: Uuid) -> Result<Merchant> {
        self.modify(org_id, merchant_id, "activated", |m| {
            m.activate();
            Ok(())
        })
        .await
    }

    /// Puts the merchant under review.
    pub async fn review_merchant(&self, org_id: Uuid, merchant_id: Uuid) -> Result<Merchant> {
        self.modify(org_id, merchant_id, "put under review", |m| {
            m.put_under_review();
            Ok(())
        })
        .await
    }

    pub async fn add_payment_method(
        &self,
        org_id: Uuid,
        merchant_id: Uuid,
        method: &str,
    ) -> Result<Merchant> {
        self.modify(org_id, merchant_id, "payment method added", |m| {
            m.add_payment_method(method)
        })
        .await
    }

    pub async fn remove_payment_method(
        &self,
        org_id: Uuid,
        merchant_id: Uuid,
        method: &str,
    ) -> Result<Merchant> {
        self.modify(org_id, merchant_id, "payment method removed", |m| {
            m.remove_payment_method(method)
        })
        .await
    }

    /// Generates a new API key. The full key is only returned here.
    pub async fn issue_api_key(&self, org_id: Uuid, merchant_id: Uuid) -> Result<(Merchant, Uuid)> {
        let key = Uuid::new_v4();
        let merchant = self
            .modify(org_id, merchant_id, "api key issued", |m| m.add_api_key(key))
            .await?;
        Ok((merchant, key))
    }

    pub async fn revoke_api_key(
        &self,
        org_id: Uuid,
        merchant_id: Uuid,
        key: Uuid,
    ) -> Result<Merchant> {
        self.modify(org_id, merchant_id, "api key revoked", |m| {
            m.remove_api_key(key)
        })
        .await
    }

    async fn modify<F>(
        &self,
        org_id: Uuid,
        merchant_id: Uuid,
        action: &'static str,
        change: F,
    ) -> Result<Merchant>
    where
        F: FnOnce(&mut Merchant) -> Result<()>,
    {
        let _guard = self.write_lock.lock().await;
        let mut merchant = self.get_merchant(org_id, merchant_id).await?;
        change(&mut merchant)?;
        let merchant = self.merchants.save(merchant).await?;
        tracing::info!(merchant_id = %merchant_id, status = %merchant.status, "merchant {action}");
        Ok(merchant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing;

    fn shop(name: &str) -> NewMerchant {
        NewMerchant {
            name: name.to_string(),
            country_code: "us".to_string(),
            currency: "usd".to_string(),
            description: Some("Online store".to_string()),
        }
    }

    async fn setup() -> (MerchantService, Uuid) {
        let accounts = testing::accounts();
        let org = accounts
            .organizations
            .create_organization("Acme", "acme.com")
            .await
            .unwrap();
        (accounts.merchants, org.id)
    }

    #[tokio::test]
    async fn test_create_requires_organization() {
        let (service, _) = setup().await;
        let err = service
            .create_merchant(Uuid::new_v4(), shop("Store"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::NotFound { entity: "Organization", .. }));
    }

    #[tokio::test]
    async fn test_create_and_scope_by_organization() {
        let (service, org_id) = setup().await;
        let merchant = service.create_merchant(org_id, shop("Store")).await.unwrap();
        assert_eq!(merchant.country_code.as_str(), "US");
        assert_eq!(merchant.currency.as_str(), "USD");

        assert_eq!(service.get_merchant(org_id, merchant.id).await.unwrap(), merchant);
        assert!(matches!(
            service.get_merchant(Uuid::new_v4(), merchant.id).await,
            Err(AccountsError::NotFound { entity: "Merchant", .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_codes() {
        let (service, org_id) = setup().await;
        let mut bad = shop("Store");
        bad.currency = "DOLLARS".to_string();
        assert!(matches!(
            service.create_merchant(org_id, bad).await,
            Err(AccountsError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_status_transitions_and_listing() {
        let (service, org_id) = setup().await;
        let a = service.create_merchant(org_id, shop("A")).await.unwrap();
        service.create_merchant(org_id, shop("B")).await.unwrap();

        let suspended = service.suspend_merchant(org_id, a.id).await.unwrap();
        assert_eq!(suspended.status, MerchantStatus::Suspended);

        let (items, total) = service
            .list_merchants(org_id, Page::default(), Some("suspended"))
            .await
            .unwrap();
        assert_eq!((items.len(), total), (1, 1));

        let reviewed = service.review_merchant(org_id, a.id).await.unwrap();
        assert_eq!(reviewed.status, MerchantStatus::UnderReview);
        let active = service.activate_merchant(org_id, a.id).await.unwrap();
        assert!(active.is_active());

        let (_, total) = service
            .list_merchants(org_id, Page::default(), None)
            .await
            .unwrap();
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn test_payment_methods() {
        let (service, org_id) = setup().await;
        let merchant = service.create_merchant(org_id, shop("Store")).await.unwrap();

        let merchant = service
            .add_payment_method(org_id, merchant.id, "Card")
            .await
            .unwrap();
        assert_eq!(merchant.payment_methods, vec!["card"]);

        assert!(matches!(
            service.add_payment_method(org_id, merchant.id, "card").await,
            Err(AccountsError::Conflict(_))
        ));

        let merchant = service
            .remove_payment_method(org_id, merchant.id, "card")
            .await
            .unwrap();
        assert!(merchant.payment_methods.is_empty());
    }

    #[tokio::test]
    async fn test_api_keys() {
        let (service, org_id) = setup().await;
        let merchant = service.create_merchant(org_id, shop("Store")).await.unwrap();

        let (merchant, key) = service.issue_api_key(org_id, merchant.id).await.unwrap();
        assert_eq!(merchant.api_keys, vec![key]);

        let merchant = service
            .revoke_api_key(org_id, merchant.id, key)
            .await
            .unwrap();
        assert!(merchant.api_keys.is_empty());
        assert!(matches!(
            service.revoke_api_key(org_id, merchant.id, key).await,
            Err(AccountsError::NotFound { .. })
        ));
    }
}
