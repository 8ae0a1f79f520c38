use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, AppResult};
use crate::models::Contributor;
use crate::services::provider::ContributorSource;

/// GitHub's REST API rejects requests without a user agent.
const USER_AGENT: &str = concat!("car-maintenance/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct GitHubClient {
    base_url: String,
    repository: String,
    http: Client,
}

impl GitHubClient {
    /// `repository` is `owner/name`.
    pub fn new(base_url: String, repository: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            repository,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub async fn fetch_contributors(&self) -> AppResult<Vec<Contributor>> {
        let url = format!("{}/repos/{}/contributors", self.base_url, self.repository);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "GitHub returned HTTP {}",
                response.status()
            )));
        }

        let contributors = response
            .json::<Vec<Contributor>>()
            .await
            .map_err(|err| AppError::Parse(err.to_string()))?;

        tracing::debug!(
            "Fetched {} contributors for {}",
            contributors.len(),
            self.repository
        );

        Ok(contributors)
    }
}

#[async_trait]
impl ContributorSource for GitHubClient {
    async fn fetch_contributors(&self) -> AppResult<Vec<Contributor>> {
        GitHubClient::fetch_contributors(self).await
    }

    fn source_name(&self) -> &str {
        "github"
    }
}
