#![allow(dead_code)]

use payment_gateway::application::Accounts;
use payment_gateway::config::{HashingSettings, Settings};
use payment_gateway::domain::organization::Organization;
use payment_gateway::domain::user::User;
use payment_gateway::infrastructure::{Stores, build_accounts};
use payment_gateway::interfaces::rest;
use serde_json::Value;
use tokio::net::TcpListener;

pub const PASSWORD: &str = "SecurePass123!";

/// Cheap Argon2 parameters so tests don't spend seconds hashing.
pub const FAST_HASHING: HashingSettings = HashingSettings {
    time_cost: 1,
    memory_kib: 1024,
    parallelism: 1,
};

pub struct TestApp {
    pub base: String,
    pub accounts: Accounts,
    pub stores: Stores,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// An active organization with one user, plus that user's bearer token.
    pub async fn bootstrap(&self, domain: &str) -> (Organization, User, String) {
        let org = self
            .accounts
            .organizations
            .create_organization("Acme Corp", domain)
            .await
            .unwrap();
        let org = self
            .accounts
            .organizations
            .activate_organization(org.id)
            .await
            .unwrap();
        let user = self
            .accounts
            .users
            .create_user(&format!("admin@{domain}"), PASSWORD, org.id, Some("Admin"))
            .await
            .unwrap();
        let token = self.login(&format!("admin@{domain}"), PASSWORD).await;
        (org, user, token)
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .client
            .post(self.url("/accounts/auth/login"))
            .json(&serde_json::json!({"email": email, "password": password}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        body["access_token"].as_str().unwrap().to_string()
    }
}

pub async fn spawn_app() -> TestApp {
    let mut settings = Settings::default();
    settings.jwt.secret_key = "integration-secret".to_string();
    settings.hashing = FAST_HASHING;

    let stores = Stores::in_memory();
    let accounts = build_accounts(&settings, stores.clone()).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(rest::serve(listener, accounts.clone()));

    TestApp {
        base: format!("http://{addr}"),
        accounts,
        stores,
        client: reqwest::Client::new(),
    }
}
