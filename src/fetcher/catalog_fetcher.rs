use crate::auth::Token;
use crate::config::ExplorerConfig;
use crate::error::FetchFailure;
use crate::models::Catalog;
use reqwest::StatusCode;
use std::time::{Duration, Instant};

/// Classified result of one catalog retrieval.
pub type FetchOutcome = Result<Catalog, FetchFailure>;

pub struct CatalogFetcher {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl CatalogFetcher {
    pub fn new(config: &ExplorerConfig) -> Result<Self, reqwest::Error> {
        // No client-level timeout: the budget is enforced around the whole
        // exchange in `fetch`.
        let client = reqwest::Client::builder()
            .user_agent(concat!("api-docs-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            url: config.catalog_url(),
            timeout: config.request_timeout,
            client,
        })
    }

    pub async fn fetch(&self, token: &Token) -> FetchOutcome {
        tracing::info!(url = %self.url, timeout = ?self.timeout, "fetching API catalog");
        let started = Instant::now();

        // Dropping the request future on elapse aborts it, so a response that
        // arrives later has nowhere to be delivered.
        let outcome = match tokio::time::timeout(self.timeout, self.request(token)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(FetchFailure::Timeout(self.timeout)),
        };

        let elapsed = started.elapsed();
        match &outcome {
            Ok(catalog) => tracing::info!(
                categories = catalog.categories.len(),
                endpoints = catalog.endpoint_count(),
                ?elapsed,
                "catalog loaded"
            ),
            Err(failure) => tracing::warn!(kind = failure.kind(), ?elapsed, "catalog fetch failed: {}", failure),
        }
        outcome
    }

    async fn request(&self, token: &Token) -> FetchOutcome {
        let response = self
            .client
            .get(&self.url)
            .bearer_auth(token.expose())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_failure(e))?;

        let status = response.status();
        tracing::debug!(%status, "catalog response received");
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchFailure::Unauthorized);
        }
        if !status.is_success() {
            return Err(FetchFailure::ServerError(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.transport_failure(e))?;
        serde_json::from_str::<Catalog>(&body)
            .map_err(|e| FetchFailure::MalformedDocument(e.to_string()))
    }

    fn transport_failure(&self, error: reqwest::Error) -> FetchFailure {
        if error.is_timeout() {
            FetchFailure::Timeout(self.timeout)
        } else {
            FetchFailure::NetworkUnreachable(error.to_string())
        }
    }
}
