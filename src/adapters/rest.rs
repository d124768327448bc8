use crate::domain::model::{BoxRecord, NewBox};
use crate::domain::ports::BoxStore;
use crate::utils::error::{Result, ShippingError};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

/// A hosted record store speaking the PostgREST dialect
/// (`/rest/v1/<table>` with `apikey` authentication).
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    endpoint: String,
    api_key: String,
    table: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl RestStore {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            table: table.into(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.endpoint, self.table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn check(response: Response, operation: &'static str) -> Result<Response> {
        let status = response.status();
        tracing::debug!("{} responded with {}", operation, status);
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.message)
            .unwrap_or_else(|| {
                if body.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body
                }
            });
        Err(ShippingError::store(operation, message))
    }
}

impl BoxStore for RestStore {
    async fn insert(&self, payload: NewBox) -> Result<BoxRecord> {
        let request = self
            .client
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(&payload);

        let response = self.authorized(request).send().await?;
        let response = Self::check(response, "insert").await?;
        let mut rows: Vec<BoxRecord> = response.json().await?;

        if rows.is_empty() {
            return Err(ShippingError::store("insert", "No data returned from insert"));
        }
        Ok(rows.swap_remove(0))
    }

    async fn list_all(&self) -> Result<Vec<BoxRecord>> {
        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", "*"), ("order", "created_at.desc")]);

        let response = self.authorized(request).send().await?;
        let response = Self::check(response, "list").await?;
        Ok(response.json().await?)
    }
}
