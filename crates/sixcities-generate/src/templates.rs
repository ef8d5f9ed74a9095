use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use sixcities_core::TemplateItem;

use crate::errors::GenerationError;
use crate::generator::check_templates;

/// Supplier of the templates offers are generated from.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Human-readable location of the source, used in logs and errors.
    fn describe(&self) -> String;

    /// Fetch every template the source holds.
    async fn fetch(&self) -> Result<Vec<TemplateItem>, GenerationError>;
}

/// Fetch templates and reject an empty set or a template missing its lists.
pub async fn load_templates(
    source: &dyn TemplateSource,
) -> Result<Vec<TemplateItem>, GenerationError> {
    let templates = source.fetch().await?;
    if templates.is_empty() {
        return Err(GenerationError::TemplateSource(format!(
            "{} returned no templates",
            source.describe()
        )));
    }
    check_templates(&templates)?;
    info!(
        event = "templates_loaded",
        source = %source.describe(),
        templates = templates.len(),
    );
    Ok(templates)
}

/// Pick the source for `address`: `http(s)://` URLs are fetched over HTTP,
/// anything else is read as a local JSON file.
pub fn template_source(
    address: &str,
    timeout: Duration,
) -> Result<Box<dyn TemplateSource>, GenerationError> {
    if address.starts_with("http://") || address.starts_with("https://") {
        Ok(Box::new(HttpTemplateSource::new(address, timeout)?))
    } else {
        Ok(Box::new(FileTemplateSource::new(address)))
    }
}

/// Templates served as a JSON array over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTemplateSource {
    url: String,
    client: reqwest::Client,
}

impl HttpTemplateSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| GenerationError::TemplateSource(err.to_string()))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<TemplateItem>, GenerationError> {
        let unreachable = |err: reqwest::Error| {
            GenerationError::TemplateSource(format!("can't load data from {}: {err}", self.url))
        };
        let body: Value = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(unreachable)?
            .error_for_status()
            .map_err(unreachable)?
            .json()
            .await
            .map_err(unreachable)?;
        parse_templates(body, &self.url)
    }
}

/// Templates stored as a JSON array in a local file.
#[derive(Debug, Clone)]
pub struct FileTemplateSource {
    path: PathBuf,
}

impl FileTemplateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TemplateSource for FileTemplateSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<TemplateItem>, GenerationError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            GenerationError::TemplateSource(format!(
                "can't read templates from {}: {err}",
                self.path.display()
            ))
        })?;
        let body: Value = serde_json::from_str(&contents).map_err(|err| {
            GenerationError::TemplateSource(format!(
                "invalid JSON in {}: {err}",
                self.path.display()
            ))
        })?;
        parse_templates(body, &self.describe())
    }
}

/// Fixed in-memory templates.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplateSource {
    templates: Vec<TemplateItem>,
}

impl StaticTemplateSource {
    pub fn new(templates: Vec<TemplateItem>) -> Self {
        Self { templates }
    }
}

#[async_trait]
impl TemplateSource for StaticTemplateSource {
    fn describe(&self) -> String {
        "static templates".to_string()
    }

    async fn fetch(&self) -> Result<Vec<TemplateItem>, GenerationError> {
        Ok(self.templates.clone())
    }
}

fn parse_templates(body: Value, origin: &str) -> Result<Vec<TemplateItem>, GenerationError> {
    if !body.is_array() {
        return Err(GenerationError::TemplateSource(format!(
            "{origin} must return a JSON array of templates"
        )));
    }
    serde_json::from_value(body).map_err(|err| {
        GenerationError::TemplateSource(format!("malformed template from {origin}: {err}"))
    })
}
