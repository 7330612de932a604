use super::ports::{Entity, Filter};
use super::value_objects::{DomainName, OrganizationName};
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
pub enum OrganizationStatus {
    /// Awaiting activation approval.
    #[default]
    Pending,
    Active,
    Suspended,
}

/// Top-level tenant owning users and merchants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: OrganizationName,
    pub domain: DomainName,
    pub status: OrganizationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Organization {
    pub fn new(name: OrganizationName, domain: DomainName) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            domain,
            status: OrganizationStatus::default(),
            created_at: now,
            updated_at: now,
            metadata: BTreeMap::new(),
        }
    }

    pub fn activate(&mut self) {
        self.status = OrganizationStatus::Active;
        self.touch();
    }

    pub fn suspend(&mut self) {
        self.status = OrganizationStatus::Suspended;
        self.touch();
    }

    pub fn rename(&mut self, name: OrganizationName) {
        self.name = name;
        self.touch();
    }

    pub fn change_domain(&mut self, domain: DomainName) {
        self.domain = domain;
        self.touch();
    }

    pub fn is_active(&self) -> bool {
        self.status == OrganizationStatus::Active
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrganizationFilter {
    pub status: Option<OrganizationStatus>,
    pub domain: Option<DomainName>,
}

impl Filter<Organization> for OrganizationFilter {
    fn matches(&self, org: &Organization) -> bool {
        self.status.is_none_or(|s| org.status == s)
            && self.domain.as_ref().is_none_or(|d| &org.domain == d)
    }

    fn is_empty(&self) -> bool {
        self.status.is_none() && self.domain.is_none()
    }
}

impl Entity for Organization {
    const KIND: &'static str = "Organization";
    const COLLECTION: &'static str = "organizations";

    type Filter = OrganizationFilter;

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
    use crate::domain::parse_status;

    fn acme() -> Organization {
        Organization::new(
            OrganizationName::parse("Acme Corp").unwrap(),
            DomainName::parse("acme.com").unwrap(),
        )
    }

    #[test]
    fn test_new_organization_is_pending() {
        let org = acme();
        assert_eq!(org.status, OrganizationStatus::Pending);
        assert!(!org.is_active());
        assert_eq!(org.created_at, org.updated_at);
    }

    #[test]
    fn test_lifecycle_updates_timestamp() {
        let mut org = acme();
        let created = org.updated_at;
        org.activate();
        assert!(org.is_active());
        assert!(org.updated_at >= created);

        org.suspend();
        assert_eq!(org.status, OrganizationStatus::Suspended);
    }

    #[test]
    fn test_filter_matching() {
        let mut org = acme();
        org.activate();

        let by_status = OrganizationFilter {
            status: Some(OrganizationStatus::Active),
            ..Default::default()
        };
        assert!(by_status.matches(&org));

        let by_domain = OrganizationFilter {
            domain: Some(DomainName::parse("other.com").unwrap()),
            ..Default::default()
        };
        assert!(!by_domain.matches(&org));
        assert!(OrganizationFilter::default().is_empty());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            parse_status::<OrganizationStatus>("ACTIVE").unwrap(),
            OrganizationStatus::Active
        );
        let err = parse_status::<OrganizationStatus>("archived").unwrap_err();
        assert!(err.to_string().contains("pending, active, suspended"));
    }
}
