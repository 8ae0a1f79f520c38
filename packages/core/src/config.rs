use std::env;

/// Default number of alert documents requested per fetch. The alert banner
/// only ever shows one.
pub const DEFAULT_ALERT_FETCH_LIMIT: usize = 1;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GITHUB_REPOSITORY: &str = "mikaelacaron/Basic-Car-Maintenance";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub alert_fetch_limit: usize,
    pub github_api_url: String,
    pub github_repository: String,
}

impl Config {
    /// Read the config from the process environment. An explicit database
    /// URL (from the command line) takes precedence over `DATABASE_URL`.
    pub fn from_env(database_url: Option<String>) -> Result<Self, String> {
        Self::from_lookup(with_database_url(database_url, |key| env::var(key).ok()))
    }

    /// Build the config from an arbitrary key lookup so tests don't have
    /// to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or("DATABASE_URL is required")?;

        let alert_fetch_limit = match lookup("ALERT_FETCH_LIMIT") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) | Err(_) => {
                    return Err(format!(
                        "ALERT_FETCH_LIMIT must be a positive integer, got {:?}",
                        raw
                    ))
                }
                Ok(limit) => limit,
            },
            None => DEFAULT_ALERT_FETCH_LIMIT,
        };

        let github_api_url = lookup("GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());

        let github_repository = lookup("GITHUB_REPOSITORY")
            .unwrap_or_else(|| DEFAULT_GITHUB_REPOSITORY.to_string());

        if !github_repository.contains('/') {
            return Err(format!(
                "GITHUB_REPOSITORY must look like owner/name, got {:?}",
                github_repository
            ));
        }

        Ok(Self {
            database_url,
            alert_fetch_limit,
            github_api_url,
            github_repository,
        })
    }
}

/// Wrap `lookup` so that `DATABASE_URL` resolves to `database_url` when
/// one is given.
fn with_database_url<F>(database_url: Option<String>, lookup: F) -> impl Fn(&str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    move |key| match (key, &database_url) {
        ("DATABASE_URL", Some(url)) => Some(url.clone()),
        _ => lookup(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")]))
            .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.alert_fetch_limit, DEFAULT_ALERT_FETCH_LIMIT);
        assert_eq!(config.github_api_url, DEFAULT_GITHUB_API_URL);
        assert_eq!(config.github_repository, DEFAULT_GITHUB_REPOSITORY);
    }

    #[test]
    fn missing_database_url_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.contains("DATABASE_URL"));
    }

    #[test]
    fn zero_fetch_limit_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("ALERT_FETCH_LIMIT", "0"),
        ]))
        .unwrap_err();
        assert!(err.contains("ALERT_FETCH_LIMIT"));
    }

    #[test]
    fn non_numeric_fetch_limit_is_rejected() {
        assert!(Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("ALERT_FETCH_LIMIT", "many"),
        ]))
        .is_err());
    }

    #[test]
    fn repository_without_owner_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("GITHUB_REPOSITORY", "Basic-Car-Maintenance"),
        ]))
        .unwrap_err();
        assert!(err.contains("owner/name"));
    }

    #[test]
    fn command_line_database_url_wins_over_environment() {
        let env = lookup_from(&[("DATABASE_URL", "sqlite://from-env.db")]);
        let config =
            Config::from_lookup(with_database_url(Some("sqlite::memory:".into()), env)).unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn environment_database_url_used_without_override() {
        let env = lookup_from(&[("DATABASE_URL", "sqlite://from-env.db")]);
        let config = Config::from_lookup(with_database_url(None, env)).unwrap();
        assert_eq!(config.database_url, "sqlite://from-env.db");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite://garage.db"),
            ("ALERT_FETCH_LIMIT", "5"),
            ("GITHUB_API_URL", "http://localhost:9000"),
            ("GITHUB_REPOSITORY", "someone/fork"),
        ]))
        .unwrap();

        assert_eq!(config.alert_fetch_limit, 5);
        assert_eq!(config.github_api_url, "http://localhost:9000");
        assert_eq!(config.github_repository, "someone/fork");
    }
}
