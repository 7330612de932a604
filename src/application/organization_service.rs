use crate::domain::organization::{Organization, OrganizationFilter, OrganizationStatus};
use crate::domain::parse_status;
use crate::domain::ports::{Page, SharedRepository};
use crate::domain::value_objects::{DomainName, OrganizationName};
use crate::error::{AccountsError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Organization use cases: creation, listing and lifecycle.
#[derive(Clone)]
pub struct OrganizationService {
    repo: SharedRepository<Organization>,
    // Serializes domain-uniqueness checks with the writes that depend on them.
    write_lock: Arc<Mutex<()>>,
}

impl OrganizationService {
    pub fn new(repo: SharedRepository<Organization>) -> Self {
        Self {
            repo,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Lists organizations, optionally by status. The total counts every match.
    pub async fn list_organizations(
        &self,
        page: Page,
        status: Option<&str>,
    ) -> Result<(Vec<Organization>, usize)> {
        let filter = OrganizationFilter {
            status: status.map(parse_status::<OrganizationStatus>).transpose()?,
            ..Default::default()
        };
        let organizations = self.repo.list_all(page, &filter).await?;
        let total = self.repo.count(&filter).await?;
        Ok((organizations, total))
    }

    pub async fn get_organization(&self, id: Uuid) -> Result<Organization> {
        self.repo.get(id).await
    }

    pub async fn create_organization(&self, name: &str, domain: &str) -> Result<Organization> {
        let name = OrganizationName::parse(name)?;
        let domain = DomainName::parse(domain)?;

        let _guard = self.write_lock.lock().await;
        self.ensure_domain_available(&domain, None).await?;

        let organization = self.repo.save(Organization::new(name, domain)).await?;
        tracing::info!(
            organization_id = %organization.id,
            domain = %organization.domain,
            "organization created"
        );
        Ok(organization)
    }

    pub async fn update_organization(
        &self,
        id: Uuid,
        name: Option<&str>,
        domain: Option<&str>,
    ) -> Result<Organization> {
        let name = name.map(OrganizationName::parse).transpose()?;
        let domain = domain.map(DomainName::parse).transpose()?;

        let _guard = self.write_lock.lock().await;
        let mut organization = self.repo.get(id).await?;
        if let Some(name) = name {
            organization.rename(name);
        }
        if let Some(domain) = domain {
            self.ensure_domain_available(&domain, Some(id)).await?;
            organization.change_domain(domain);
        }
        let organization = self.repo.save(organization).await?;
        tracing::info!(organization_id = %id, "organization updated");
        Ok(organization)
    }

    /// Moves a pending or suspended organization to active.
    pub async fn activate_organization(&self, id: Uuid) -> Result<Organization> {
        self.transition(id, |org| match org.status {
            OrganizationStatus::Active => Err(AccountsError::InvalidState(
                "Organization is already active".to_string(),
            )),
            _ => {
                org.activate();
                Ok(())
            }
        })
        .await
    }

    pub async fn suspend_organization(&self, id: Uuid) -> Result<Organization> {
        self.transition(id, |org| match org.status {
            OrganizationStatus::Suspended => Err(AccountsError::InvalidState(
                "Organization is already suspended".to_string(),
            )),
            _ => {
                org.suspend();
                Ok(())
            }
        })
        .await
    }

    pub async fn reactivate_organization(&self, id: Uuid) -> Result<Organization> {
        self.transition(id, |org| match org.status {
            OrganizationStatus::Suspended => {
                org.activate();
                Ok(())
            }
            status => Err(AccountsError::InvalidState(format!(
                "Only suspended organizations can be reactivated (current status: {status})"
            ))),
        })
        .await
    }

    async fn transition<F>(&self, id: Uuid, change: F) -> Result<Organization>
    where
        F: FnOnce(&mut Organization) -> Result<()>,
    {
        let _guard = self.write_lock.lock().await;
        let mut organization = self.repo.get(id).await?;
        let from = organization.status;
        change(&mut organization)?;
        let organization = self.repo.save(organization).await?;
        tracing::info!(
            organization_id = %id,
            %from,
            to = %organization.status,
            "organization status changed"
        );
        Ok(organization)
    }

    async fn ensure_domain_available(&self, domain: &DomainName, owner: Option<Uuid>) -> Result<()> {
        let filter = OrganizationFilter {
            domain: Some(domain.clone()),
            ..Default::default()
        };
        match self.repo.find_one(&filter).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(AccountsError::DomainAlreadyExists(domain.to_string()))
            }
            _ => Ok(()),
        }
    }
}
