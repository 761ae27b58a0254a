use crate::domain::model::Grant;
use crate::domain::ports::GrantCatalog;
use crate::utils::error::{MatchError, Result, Service};
use async_trait::async_trait;
use reqwest::Client;

/// Reads the whole grants table through the Supabase REST (PostgREST) API
/// using the service role key.
#[derive(Debug, Clone)]
pub struct SupabaseCatalog {
    client: Client,
    base_url: String,
    service_role_key: String,
    table: String,
}

impl SupabaseCatalog {
    pub fn new(client: Client, base_url: &str, service_role_key: &str, table: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_role_key: service_role_key.to_string(),
            table: table.to_string(),
        }
    }
}

#[async_trait]
impl GrantCatalog for SupabaseCatalog {
    async fn fetch_all(&self) -> Result<Vec<Grant>> {
        let endpoint = format!("{}/rest/v1/{}", self.base_url, self.table);
        tracing::debug!("Fetching grant catalog from: {}", endpoint);

        let response = self
            .client
            .get(&endpoint)
            .query(&[("select", "*")])
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| MatchError::service(Service::Catalog, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!("Grant catalog returned HTTP {}: {}", status, detail);
            return Err(MatchError::service(
                Service::Catalog,
                format!("HTTP {}", status),
            ));
        }

        let grants: Vec<Grant> = response
            .json()
            .await
            .map_err(|e| MatchError::service(Service::Catalog, e.to_string()))?;

        tracing::debug!("Fetched {} grant(s)", grants.len());
        Ok(grants)
    }
}
