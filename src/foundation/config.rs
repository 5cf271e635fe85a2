use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{MemeError, MemeResult};

/// Top-level generator configuration.
///
/// Every field has a default, so a JSON config file only needs to name the values it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory receiving generated files.
    pub output_dir: PathBuf,
    /// Directory caching downloaded catalog templates.
    pub template_dir: PathBuf,
    /// Prompts file read by the batch menu entries.
    pub prompts_file: PathBuf,
    /// Text stamped in the bottom-left corner of every output; `None` disables it.
    pub watermark: Option<String>,
    /// Seed for template selection; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Caption layout parameters.
    pub layout: LayoutParams,
    /// Template catalog settings.
    pub catalog: CatalogConfig,
    /// Hosted classification model settings.
    pub inference: InferenceConfig,
    /// Font selection.
    pub font: FontConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated_memes"),
            template_dir: PathBuf::from("templates"),
            prompts_file: PathBuf::from("prompts.txt"),
            watermark: Some("AI MemeGen".to_string()),
            seed: None,
            layout: LayoutParams::default(),
            catalog: CatalogConfig::default(),
            inference: InferenceConfig::default(),
            font: FontConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MemeResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| MemeError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MemeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MemeError::file_not_found(format!("open config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> MemeResult<()> {
        self.layout.validate()?;
        if self.catalog.interactive_limit == 0 || self.catalog.batch_limit == 0 {
            return Err(MemeError::validation("catalog limits must be > 0"));
        }
        Ok(())
    }
}

/// Caption layout parameters shared by every frame render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Maximum characters per wrapped line.
    pub wrap_width: usize,
    /// Caption font size as a fraction of frame height.
    pub font_scale: f32,
    /// Outline neighborhood radius in pixels.
    pub outline_radius: i32,
    /// Vertical gap between stacked lines in pixels.
    pub line_spacing_px: i32,
    /// Distance of the top and bottom blocks (and the watermark) from the frame edges.
    pub margin_px: i32,
    /// Watermark font size as a fraction of frame height.
    pub watermark_scale: f32,
    /// Caption fill color.
    pub fill_rgba: [u8; 4],
    /// Caption outline color.
    pub outline_rgba: [u8; 4],
    /// Watermark color.
    pub watermark_rgba: [u8; 4],
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            wrap_width: 25,
            font_scale: 0.08,
            outline_radius: 2,
            line_spacing_px: 5,
            margin_px: 10,
            watermark_scale: 0.03,
            fill_rgba: [255, 255, 255, 255],
            outline_rgba: [0, 0, 0, 255],
            watermark_rgba: [128, 128, 128, 255],
        }
    }
}

impl LayoutParams {
    /// Check that sizes and radii are usable.
    pub fn validate(&self) -> MemeResult<()> {
        if self.wrap_width == 0 {
            return Err(MemeError::validation("layout wrap_width must be > 0"));
        }
        for (name, v) in [
            ("font_scale", self.font_scale),
            ("watermark_scale", self.watermark_scale),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(MemeError::validation(format!(
                    "layout {name} must be finite and > 0"
                )));
            }
        }
        if self.outline_radius < 0 {
            return Err(MemeError::validation("layout outline_radius must be >= 0"));
        }
        Ok(())
    }
}

/// Template catalog settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog listing endpoint.
    pub url: String,
    /// Templates fetched for interactive prompts.
    pub interactive_limit: usize,
    /// Templates fetched for prompts-file batches.
    pub batch_limit: usize,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: "https://api.imgflip.com/get_memes".to_string(),
            interactive_limit: 3,
            batch_limit: 5,
            timeout_secs: 30,
        }
    }
}

/// Hosted inference endpoint settings for the classification models.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Base URL; model ids are appended as path segments.
    pub base_url: String,
    /// Sentiment classification model id.
    pub sentiment_model: String,
    /// Zero-shot classification model id.
    pub context_model: String,
    /// Environment variable holding an optional bearer token.
    pub token_env: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-inference.huggingface.co/models".to_string(),
            sentiment_model: "distilbert-base-uncased-finetuned-sst-2-english".to_string(),
            context_model: "facebook/bart-large-mnli".to_string(),
            token_env: "HF_API_TOKEN".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Font selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Explicit font file; skips system discovery when set.
    pub path: Option<PathBuf>,
    /// Family names tried in order during discovery.
    pub families: Vec<String>,
    /// Extra directories scanned for `ttf`/`otf`/`ttc` files.
    pub dirs: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            families: vec!["Impact".to_string(), "Arial".to_string()],
            dirs: vec![PathBuf::from("fonts")],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
