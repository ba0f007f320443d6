//! Client for the certificate monitor backend API

use std::sync::Arc;

use serde::de::DeserializeOwned;

use certmon_app::api::{self, CertificateRecord, CheckResponse, StateCertRecord, StateRecord};
use certmon_app::components::check_panel::CheckQuery;
use certmon_app::Validity;

use crate::io::HttpClient;
use crate::DashboardError;

/// Typed access to the backend's JSON endpoints
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl BackendClient {
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        tracing::debug!("Created BackendClient for {}", base_url);
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL with URL-encoded query parameters
    pub fn url(&self, path: &str, params: &[(&str, &str)]) -> crate::Result<String> {
        let raw = format!("{}{}", self.base_url, path);
        let url = if params.is_empty() {
            reqwest::Url::parse(&raw)
        } else {
            reqwest::Url::parse_with_params(&raw, params)
        }
        .map_err(|e| DashboardError::Config(format!("Invalid backend URL {}: {}", raw, e)))?;
        Ok(url.to_string())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> crate::Result<T> {
        let url = self.url(path, params)?;
        let response = self.http.get(&url).await?;
        if !response.is_success() {
            return Err(DashboardError::Http(format!(
                "GET {} returned status {}",
                url, response.status
            )));
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// The backend encodes an empty collection as `null`; malformed elements are skipped
    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> crate::Result<Vec<T>> {
        let list: serde_json::Value = self.get_json(path, params).await?;
        Ok(api::decode_list(list))
    }

    pub async fn certificates(&self) -> crate::Result<Vec<CertificateRecord>> {
        self.get_list("/certs", &[]).await
    }

    pub async fn states(&self) -> crate::Result<Vec<StateRecord>> {
        self.get_list("/states", &[]).await
    }

    pub async fn state_certificates(&self) -> crate::Result<Vec<StateCertRecord>> {
        self.get_list("/statecerts", &[]).await
    }

    /// Run an ad-hoc check of one host
    pub async fn check(&self, query: &CheckQuery) -> crate::Result<CheckResponse> {
        tracing::debug!("Checking {}", query);
        self.get_json("/check", &query.params()).await
    }

    /// Ask the backend to start monitoring a host
    pub async fn add_state(&self, query: &CheckQuery) -> crate::Result<()> {
        let url = self.url("/states", &[])?;
        let response = self.http.post_form(&url, &query.params()).await?;
        if !response.is_success() {
            return Err(DashboardError::Http(format!(
                "POST {} returned status {}",
                url, response.status
            )));
        }
        tracing::info!("Backend accepted new state {}", query);
        Ok(())
    }

    /// Certificates expiring within `days`
    pub async fn expiring_certificates(&self, days: u32) -> crate::Result<Vec<CertificateRecord>> {
        let days = days.to_string();
        self.get_list("/report/expire", &[("filter", days.as_str())])
            .await
    }

    /// States currently reported with the given validity
    pub async fn states_by_validity(&self, validity: Validity) -> crate::Result<Vec<StateRecord>> {
        let code = validity.code().to_string();
        self.get_list("/report/valid", &[("filter", code.as_str())])
            .await
    }
}
