//! Runtime settings: built-in defaults, then an optional settings file,
//! then `MOORING_STATS_*` environment variables. CLI flags are applied last
//! by the command layer.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{ProcessingError, Result};
use crate::models::AggregationPolicy;
use crate::utils::constants::{
    DEFAULT_BASE_URL, DEFAULT_DATASET, DEFAULT_END, DEFAULT_START, DEFAULT_TIMEOUT_SECS,
    ENV_PREFIX,
};
use crate::utils::query::TableQuery;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// tabledap endpoint, without the dataset id
    pub base_url: String,
    pub dataset: String,
    /// ISO-8601 bounds of the requested time range
    pub start: String,
    pub end: String,
    /// Full request URL; overrides base_url/dataset/start/end when set
    pub url: Option<String>,
    pub timeout_secs: u64,
    pub pretty: bool,
    pub policy: AggregationPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dataset: DEFAULT_DATASET.to_string(),
            start: DEFAULT_START.to_string(),
            end: DEFAULT_END.to_string(),
            url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            pretty: false,
            policy: AggregationPolicy::Legacy,
        }
    }
}

impl Settings {
    /// Load settings, reading `path` if given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = config::Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("dataset", defaults.dataset)?
            .set_default("start", defaults.start)?
            .set_default("end", defaults.end)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("pretty", defaults.pretty)?
            .set_default("policy", "legacy")?;

        if let Some(path) = path {
            if !path.exists() {
                return Err(ProcessingError::Config(format!(
                    "settings file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(ProcessingError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The URL to fetch: an explicit `url`, or one built from the query fields
    pub fn request_url(&self) -> Result<String> {
        match &self.url {
            Some(url) => Ok(url.clone()),
            None => {
                let query = TableQuery::new(&self.base_url, &self.dataset, &self.start, &self.end)?;
                Ok(query.to_url())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::Builder;

    fn clear_env() {
        for key in ["TIMEOUT_SECS", "POLICY", "DATASET", "PRETTY"] {
            std::env::remove_var(format!("{}_{}", ENV_PREFIX, key));
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert_eq!(settings.policy, AggregationPolicy::Legacy);
        assert!(settings
            .request_url()
            .unwrap()
            .starts_with("http://www.neracoos.org/erddap/tabledap/E05_aanderaa_all.json?"));
    }

    #[test]
    #[serial]
    fn test_load_from_file() -> Result<()> {
        clear_env();
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "dataset = \"M01_aanderaa_all\"")?;
        writeln!(file, "timeout_secs = 30")?;
        writeln!(file, "pretty = true")?;
        writeln!(file, "policy = \"corrected\"")?;

        let settings = Settings::load(Some(file.path()))?;

        assert_eq!(settings.dataset, "M01_aanderaa_all");
        assert_eq!(settings.timeout_secs, 30);
        assert!(settings.pretty);
        assert_eq!(settings.policy, AggregationPolicy::Corrected);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        Ok(())
    }

    #[test]
    #[serial]
    fn test_missing_file_is_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/mooring-stats.toml"))).unwrap_err();
        assert!(matches!(err, ProcessingError::Config(_)));
    }

    #[test]
    #[serial]
    fn test_env_overrides_defaults() {
        clear_env();
        std::env::set_var("MOORING_STATS_TIMEOUT_SECS", "30");
        std::env::set_var("MOORING_STATS_POLICY", "Corrected");

        let loaded = Settings::load(None);
        clear_env();
        let settings = loaded.unwrap();

        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.policy, AggregationPolicy::Corrected);
        assert_eq!(settings.dataset, DEFAULT_DATASET);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() -> Result<()> {
        clear_env();
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "timeout_secs = 5")?;
        writeln!(file, "policy = \"LEGACY\"")?;
        std::env::set_var("MOORING_STATS_TIMEOUT_SECS", "45");

        let loaded = Settings::load(Some(file.path()));
        clear_env();
        let settings = loaded?;

        assert_eq!(settings.timeout_secs, 45);
        assert_eq!(settings.policy, AggregationPolicy::Legacy);
        Ok(())
    }

    #[test]
    #[serial]
    fn test_env_unknown_policy_rejected() {
        clear_env();
        std::env::set_var("MOORING_STATS_POLICY", "strict");

        let loaded = Settings::load(None);
        clear_env();

        assert!(loaded.is_err());
    }

    #[test]
    fn test_explicit_url_wins() {
        let settings = Settings {
            url: Some("http://localhost/table.json".to_string()),
            ..Settings::default()
        };
        assert_eq!(settings.request_url().unwrap(), "http://localhost/table.json");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let settings = Settings {
            timeout_secs: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
