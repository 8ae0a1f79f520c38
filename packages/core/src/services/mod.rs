pub mod github;
pub mod provider;

pub use github::GitHubClient;
pub use provider::{AlertSource, ContributorSource, ReadingStore, VehicleStore};
