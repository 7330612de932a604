//! Administrative commands. Each prints the affected record as pretty JSON.

use super::rest::schemas::{OrganizationResponse, UserResponse};
use crate::application::Accounts;
use crate::error::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::net::SocketAddr;
use uuid::Uuid;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Create an organization (starts pending)
    CreateOrganization(CreateOrganizationArgs),
    /// Activate a pending or suspended organization
    ActivateOrganization(ActivateOrganizationArgs),
    /// Create a user inside an existing organization
    CreateUser(CreateUserArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind: SocketAddr,
}

#[derive(Debug, Args)]
pub struct CreateOrganizationArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub domain: String,
}

#[derive(Debug, Args)]
pub struct ActivateOrganizationArgs {
    #[arg(long)]
    pub id: Uuid,
}

#[derive(Debug, Args)]
pub struct CreateUserArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub organization_id: Uuid,
    #[arg(long)]
    pub name: Option<String>,
}

pub async fn create_organization(
    accounts: &Accounts,
    args: &CreateOrganizationArgs,
) -> Result<String> {
    let org = accounts
        .organizations
        .create_organization(&args.name, &args.domain)
        .await?;
    to_json(&OrganizationResponse::from(org))
}

pub async fn activate_organization(
    accounts: &Accounts,
    args: &ActivateOrganizationArgs,
) -> Result<String> {
    let org = accounts.organizations.activate_organization(args.id).await?;
    to_json(&OrganizationResponse::from(org))
}

pub async fn create_user(accounts: &Accounts, args: &CreateUserArgs) -> Result<String> {
    let user = accounts
        .users
        .create_user(
            &args.email,
            &args.password,
            args.organization_id,
            args.name.as_deref(),
        )
        .await?;
    to_json(&UserResponse::from(user))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{self, PASSWORD};
    use crate::error::AccountsError;
    use serde_json::Value;

    #[tokio::test]
    async fn test_bootstrap_commands() {
        let accounts = testing::accounts();
        let out = create_organization(
            &accounts,
            &CreateOrganizationArgs {
                name: "Acme".to_string(),
                domain: "acme.com".to_string(),
            },
        )
        .await
        .unwrap();
        let org: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(org["status"], "pending");
        let id: Uuid = org["id"].as_str().unwrap().parse().unwrap();

        let out = activate_organization(&accounts, &ActivateOrganizationArgs { id })
            .await
            .unwrap();
        assert!(out.contains("\"active\""));

        let out = create_user(
            &accounts,
            &CreateUserArgs {
                email: "admin@acme.com".to_string(),
                password: PASSWORD.to_string(),
                organization_id: id,
                name: Some("Admin".to_string()),
            },
        )
        .await
        .unwrap();
        assert!(out.contains("admin@acme.com"));
        assert!(!out.contains("argon2"));
    }

    #[tokio::test]
    async fn test_create_user_unknown_organization() {
        let accounts = testing::accounts();
        let err = create_user(
            &accounts,
            &CreateUserArgs {
                email: "admin@acme.com".to_string(),
                password: PASSWORD.to_string(),
                organization_id: Uuid::new_v4(),
                name: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AccountsError::NotFound { .. }));
    }
}
