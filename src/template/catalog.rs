use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::foundation::{
    config::CatalogConfig,
    error::{MemeError, MemeResult},
    fs::write_atomic,
};

/// Supplies template files for a generation run.
pub trait TemplateSource {
    /// Return up to `limit` local template paths.
    fn templates(&mut self, limit: usize) -> MemeResult<Vec<PathBuf>>;
}

/// A single user-chosen template file.
#[derive(Clone, Debug)]
pub struct LocalTemplate {
    path: PathBuf,
}

impl LocalTemplate {
    /// Wrap `path`; existence is checked when templates are requested.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TemplateSource for LocalTemplate {
    fn templates(&mut self, _limit: usize) -> MemeResult<Vec<PathBuf>> {
        if !self.path.is_file() {
            return Err(MemeError::file_not_found(format!(
                "template '{}'",
                self.path.display()
            )));
        }
        Ok(vec![self.path.clone()])
    }
}

/// One template listed by the catalog service.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    /// Catalog identifier; names the cached file.
    pub id: String,
    /// Human-readable template name.
    #[serde(default)]
    pub name: String,
    /// Image download URL.
    pub url: String,
}

#[derive(Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    success: bool,
    data: Option<CatalogData>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct CatalogData {
    memes: Vec<CatalogEntry>,
}

/// Popular templates from the Imgflip catalog, cached on disk by id.
#[derive(Clone, Debug)]
pub struct ImgflipCatalog {
    client: reqwest::blocking::Client,
    url: String,
    template_dir: PathBuf,
}

impl ImgflipCatalog {
    /// Build the HTTP client. Nothing is fetched until [`TemplateSource::templates`] runs.
    pub fn new(cfg: &CatalogConfig, template_dir: impl Into<PathBuf>) -> MemeResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| MemeError::network(format!("build catalog client: {e}")))?;
        Ok(Self {
            client,
            url: cfg.url.clone(),
            template_dir: template_dir.into(),
        })
    }

    /// Fetch the catalog listing and keep the first `limit` entries.
    pub fn list(&self, limit: usize) -> MemeResult<Vec<CatalogEntry>> {
        let body = self.get(&self.url)?;
        let text = String::from_utf8(body)
            .map_err(|e| MemeError::network(format!("catalog response is not UTF-8: {e}")))?;
        parse_catalog(&text, limit)
    }

    /// Local cache path for `entry`.
    pub fn cached_path(&self, entry: &CatalogEntry) -> PathBuf {
        cache_path(&self.template_dir, entry)
    }

    /// Download `entry` unless it is already cached; returns the local path.
    pub fn fetch(&self, entry: &CatalogEntry) -> MemeResult<PathBuf> {
        let path = self.cached_path(entry);
        if path.is_file() {
            tracing::debug!(id = %entry.id, "template cached");
            return Ok(path);
        }
        let bytes = self.get(&entry.url)?;
        write_atomic(&path, &bytes)?;
        tracing::info!(
            id = %entry.id,
            name = %entry.name,
            path = %path.display(),
            "downloaded template"
        );
        Ok(path)
    }

    fn get(&self, url: &str) -> MemeResult<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| MemeError::network(format!("GET {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(MemeError::network(format!("GET {url} answered {status}")));
        }
        let bytes = resp
            .bytes()
            .map_err(|e| MemeError::network(format!("read body of {url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}

impl TemplateSource for ImgflipCatalog {
    #[tracing::instrument(skip(self))]
    fn templates(&mut self, limit: usize) -> MemeResult<Vec<PathBuf>> {
        let entries = self.list(limit)?;
        let mut paths = Vec::with_capacity(entries.len());
        for entry in &entries {
            match self.fetch(entry) {
                Ok(path) => paths.push(path),
                Err(e) => tracing::warn!(id = %entry.id, error = %e, "skipping template"),
            }
        }
        Ok(paths)
    }
}

pub(crate) fn parse_catalog(body: &str, limit: usize) -> MemeResult<Vec<CatalogEntry>> {
    let resp: CatalogResponse = serde_json::from_str(body)
        .map_err(|e| MemeError::network(format!("parse catalog response: {e}")))?;
    if !resp.success {
        let why = resp
            .error_message
            .unwrap_or_else(|| "catalog reported failure".to_string());
        return Err(MemeError::network(why));
    }
    let mut memes = resp.data.map(|d| d.memes).unwrap_or_default();
    memes.truncate(limit);
    Ok(memes)
}

fn cache_path(dir: &Path, entry: &CatalogEntry) -> PathBuf {
    let id: String = entry
        .id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    let id = if id.is_empty() { "template" } else { &id };
    dir.join(format!("{id}{}", url_extension(&entry.url)))
}

fn url_extension(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && (1..=4).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => ".jpg".to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/catalog.rs"]
mod tests;
