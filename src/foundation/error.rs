/// Convenience result type used across memegen.
pub type MemeResult<T> = Result<T, MemeError>;

/// Top-level error taxonomy used by generator APIs.
#[derive(thiserror::Error, Debug)]
pub enum MemeError {
    /// Template catalog unreachable or answered with a non-success status.
    #[error("network error: {0}")]
    Network(String),

    /// A required input file (prompts file, picked template) does not exist or was not chosen.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// Template bytes could not be opened or decoded.
    #[error("template load error: {0}")]
    TemplateLoad(String),

    /// A classification model failed to load or infer.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// No usable font could be loaded.
    #[error("font error: {0}")]
    Font(String),

    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MemeError {
    /// Build a [`MemeError::Network`] value.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Build a [`MemeError::FileNotFound`] value.
    pub fn file_not_found(msg: impl Into<String>) -> Self {
        Self::FileNotFound(msg.into())
    }

    /// Build a [`MemeError::TemplateLoad`] value.
    pub fn template_load(msg: impl Into<String>) -> Self {
        Self::TemplateLoad(msg.into())
    }

    /// Build a [`MemeError::ModelUnavailable`] value.
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Build a [`MemeError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`MemeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
