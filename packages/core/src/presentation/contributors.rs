use std::sync::Arc;

use crate::models::{sort_contributors, Contributor};
use crate::services::ContributorSource;

/// Backs the contributors list in settings.
pub struct ContributorsViewModel {
    source: Arc<dyn ContributorSource>,
    contributors: Vec<Contributor>,
    pub error_message: Option<String>,
}

impl ContributorsViewModel {
    pub fn new(source: Arc<dyn ContributorSource>) -> Self {
        Self {
            source,
            contributors: Vec::new(),
            error_message: None,
        }
    }

    /// Contributors, most contributions first.
    pub fn sorted_contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    /// The list shows a spinner until the first successful load.
    pub fn is_loading(&self) -> bool {
        self.contributors.is_empty() && self.error_message.is_none()
    }

    pub async fn load(&mut self) {
        match self.source.fetch_contributors().await {
            Ok(mut contributors) => {
                sort_contributors(&mut contributors);
                self.contributors = contributors;
                self.error_message = None;
            }
            Err(err) => {
                tracing::error!(
                    "Failed to fetch contributors from {}: {}",
                    self.source.source_name(),
                    err
                );
                self.error_message = Some(err.to_string());
            }
        }
    }
}
