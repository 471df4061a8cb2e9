use std::time::Duration;
use tracing::{debug, info};

use crate::error::{ProcessingError, Result};
use crate::models::MooringRow;
use crate::readers::TableReader;

/// Fetches tabledap JSON documents over HTTP
pub struct ErddapClient {
    client: reqwest::Client,
    reader: TableReader,
}

impl ErddapClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mooring-stats/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            reader: TableReader::new(),
        })
    }

    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        info!(url, "fetching table");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProcessingError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "response received");
        Ok(body.to_vec())
    }

    /// Fetch and decode all rows. Transport, status and decoding failures are all errors.
    pub async fn fetch_rows(&self, url: &str) -> Result<Vec<MooringRow>> {
        let body = self.fetch_bytes(url).await?;
        self.reader.read_slice(&body)
    }
}
