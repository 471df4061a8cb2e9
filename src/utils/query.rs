use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Url;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::COLUMN_NAMES;

/// Parameters of a tabledap request for the mooring columns
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    pub base_url: Url,
    pub dataset: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TableQuery {
    pub fn new(base_url: &str, dataset: &str, start: &str, end: &str) -> Result<Self> {
        if dataset.trim().is_empty() {
            return Err(ProcessingError::MissingData("dataset id".to_string()));
        }

        let base_url = Url::parse(base_url).map_err(|e| {
            ProcessingError::Config(format!("invalid base url '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ProcessingError::Config(format!(
                "base url '{}' cannot carry a dataset path",
                base_url
            )));
        }

        let start = DateTime::parse_from_rfc3339(start)?.with_timezone(&Utc);
        let end = DateTime::parse_from_rfc3339(end)?.with_timezone(&Utc);

        if start > end {
            return Err(ProcessingError::Config(format!(
                "start {} is after end {}",
                start, end
            )));
        }

        Ok(Self {
            base_url,
            dataset: dataset.to_string(),
            start,
            end,
        })
    }

    /// Full request URL, e.g. `.../E05_aanderaa_all.json?station%2C...&time%3E=...`
    pub fn to_url(&self) -> String {
        let mut url = self.base_url.clone();
        url.set_query(None);

        // cannot_be_a_base was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&format!("{}.json", self.dataset));
        }

        url.query_pairs_mut()
            .append_key_only(&COLUMN_NAMES.join(","))
            .append_pair(
                "time>",
                &self.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            )
            .append_pair(
                "time<",
                &self.end.to_rfc3339_opts(SecondsFormat::Secs, true),
            );

        url.to_string()
    }
}
