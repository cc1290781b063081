// src/pipeline/load.rs

//! Dataset loading.
//!
//! Fetches `cabins.json` from a local path or an http(s) URL, enriches every
//! row independently and builds the read-only [`Directory`]. A failed load
//! leaves the application running on an empty directory.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::app::{Notifier, Severity};
use crate::error::{AppError, Result};
use crate::models::{Config, DatasetConfig, Directory};
use crate::services::{Enricher, summarize};

/// Where the raw dataset bytes come from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable location for logs and errors.
    fn describe(&self) -> String;

    /// Fetch the raw dataset bytes.
    async fn fetch(&self) -> Result<Vec<u8>>;
}

/// Dataset stored on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| AppError::load(self.describe(), e))
    }
}

/// Dataset served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    client: Client,
}

impl HttpSource {
    pub fn new(url: Url, config: &DatasetConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| AppError::load(self.describe(), e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::load(
                self.describe(),
                format!("HTTP error! status: {}", status.as_u16()),
            ));
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::load(self.describe(), e))?;
        Ok(body.to_vec())
    }
}

/// Pick a source for `location`: http(s) URLs go over the network,
/// anything else is a file path.
pub fn source_for(location: &str, config: &DatasetConfig) -> Result<Box<dyn DatasetSource>> {
    match Url::parse(location) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Ok(Box::new(HttpSource::new(url, config)?))
        }
        _ => Ok(Box::new(FileSource::new(location))),
    }
}

/// Parse dataset bytes into one JSON value per row.
pub fn parse_rows(origin: &str, bytes: &[u8]) -> Result<Vec<Value>> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| AppError::load(origin, e))?;
    match value {
        Value::Array(rows) => Ok(rows),
        other => Err(AppError::load(
            origin,
            format!("expected a JSON array, found {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Fetch, enrich and summarize. Malformed rows are reported on the returned
/// directory, not raised.
pub async fn load_directory(source: &dyn DatasetSource, enricher: &Enricher) -> Result<Directory> {
    let origin = source.describe();
    log::info!("Loading faculty data from {}...", origin);

    let bytes = source.fetch().await?;
    let rows = parse_rows(&origin, &bytes)?;
    log::info!("Raw cabin data loaded: {} records", rows.len());

    let outcome = enricher.enrich_values(rows);
    let schools = summarize(&outcome.records, enricher.tables());

    let directory = Directory {
        records: outcome.records,
        schools,
        issues: outcome.issues,
        load_error: None,
    };
    log::info!(
        "Processed faculty data: {} faculty members in {} schools ({} rows skipped)",
        directory.records.len(),
        directory.schools.len(),
        directory.skipped_count()
    );
    Ok(directory)
}

/// Startup load. Never fails: on error the user is notified and an empty
/// directory is returned.
pub async fn bootstrap(
    config: &Config,
    source: &dyn DatasetSource,
    notifier: &dyn Notifier,
) -> Directory {
    let enricher = Enricher::from_config(config);
    match load_directory(source, &enricher).await {
        Ok(directory) => directory,
        Err(e) => {
            log::error!("Error loading {}: {}", source.describe(), e);
            notifier.notify("Error loading faculty data", Severity::Error);
            Directory::failed(e.to_string())
        }
    }
}
