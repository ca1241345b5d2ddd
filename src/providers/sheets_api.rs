use crate::core::dashboard::{
    BalancePoint, CategoryTotal, DashboardCounts, DashboardProvider, MonthlyPoint,
};
use crate::core::normalize::{
    normalize_balance, normalize_categories, normalize_counts, normalize_monthly,
};
use crate::providers::util::with_retry;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Client for the spreadsheet-backed dashboard API.
///
/// Every endpoint wraps its payload in a `{ "data": ... }` envelope. The
/// envelope must parse; the records inside it are normalized leniently.
pub struct SheetsApiProvider {
    base_url: String,
}

impl SheetsApiProvider {
    pub fn new(base_url: &str) -> Self {
        SheetsApiProvider {
            base_url: base_url.to_string(),
        }
    }

    async fn get_text(&self, endpoint: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Requesting dashboard data from {}", url);

        let client = reqwest::Client::builder().user_agent("fdash/1.0").build()?;
        let response = with_retry(|| async { client.get(&url).send().await }, 3, 500)
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} from {}", response.status(), url));
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))
    }

    async fn get_records(&self, endpoint: &str) -> Result<Vec<Value>> {
        let response_text = self.get_text(endpoint).await?;

        let response: ListResponse = serde_json::from_str(&response_text).with_context(|| {
            format!("Failed to parse response from {endpoint}. Response: '{response_text}'")
        })?;

        debug!("Fetched {} records from {}", response.data.len(), endpoint);
        Ok(response.data)
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    data: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct CountsResponse {
    #[serde(default)]
    data: Value,
}

#[async_trait]
impl DashboardProvider for SheetsApiProvider {
    async fn fetch_counts(&self) -> Result<DashboardCounts> {
        let response_text = self.get_text("/dashboard/counts").await?;

        let response: CountsResponse = serde_json::from_str(&response_text).with_context(|| {
            format!("Failed to parse counts response. Response: '{response_text}'")
        })?;

        Ok(normalize_counts(&response.data))
    }

    async fn fetch_monthly(&self) -> Result<Vec<MonthlyPoint>> {
        let records = self.get_records("/dashboard/monthly").await?;
        Ok(normalize_monthly(&records))
    }

    async fn fetch_balance(&self) -> Result<Vec<BalancePoint>> {
        let records = self.get_records("/dashboard/balance").await?;
        Ok(normalize_balance(&records))
    }

    async fn fetch_categories(&self) -> Result<Vec<CategoryTotal>> {
        let records = self.get_records("/dashboard/categories").await?;
        Ok(normalize_categories(&records))
    }
}
