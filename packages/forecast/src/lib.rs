#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pre-rendered forecast documents.
//!
//! Forecasts are produced offline and stored as
//! `{directory}/{country}_{model}.{extension}`. This crate only resolves and
//! reads them; the bytes are returned unchanged.

use std::path::PathBuf;

use conflict_dash_config::DashboardConfig;

/// Errors that can occur while reading a forecast document.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    /// No document exists for the model.
    #[error("No forecast for model '{model}' at {}", path.display())]
    ArtifactNotFound {
        /// Requested model name.
        model: String,
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The model name could escape the forecast directory.
    #[error("Invalid forecast model name '{0}'")]
    InvalidModelName(String),

    /// The document exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Document path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Resolves and reads forecast documents for one country.
#[derive(Debug, Clone)]
pub struct ForecastStore {
    directory: PathBuf,
    country: String,
    extension: String,
}

impl ForecastStore {
    /// A store reading `{directory}/{country}_{model}.{extension}`.
    #[must_use]
    pub fn new(
        directory: impl Into<PathBuf>,
        country: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            country: country.into(),
            extension: extension.into(),
        }
    }

    /// A store for the configured country and forecast directory.
    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(
            config.forecast.directory.clone(),
            config.country.clone(),
            config.forecast.extension.clone(),
        )
    }

    /// MIME type of the stored documents, derived from the extension.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        match self.extension.to_ascii_lowercase().as_str() {
            "html" | "htm" => "text/html; charset=utf-8",
            "json" => "application/json",
            "svg" => "image/svg+xml",
            "png" => "image/png",
            "pdf" => "application/pdf",
            "csv" => "text/csv; charset=utf-8",
            "txt" => "text/plain; charset=utf-8",
            _ => "application/octet-stream",
        }
    }

    /// Path of the document for `model`.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidModelName`] if `model` is empty or
    /// contains a path separator or `..`.
    pub fn path_for(&self, model: &str) -> Result<PathBuf, ForecastError> {
        if model.is_empty() || model.contains(['/', '\\']) || model.contains("..") {
            return Err(ForecastError::InvalidModelName(model.to_string()));
        }

        Ok(self
            .directory
            .join(format!("{}_{model}.{}", self.country, self.extension)))
    }

    /// Reads the document for `model`.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::InvalidModelName`] if the name is rejected.
    /// * [`ForecastError::ArtifactNotFound`] if no document exists.
    /// * [`ForecastError::Io`] if the document cannot be read.
    pub async fn read(&self, model: &str) -> Result<Vec<u8>, ForecastError> {
        let path = self.path_for(model)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                log::debug!("Read forecast {} ({} bytes)", path.display(), bytes.len());
                Ok(bytes)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ForecastError::ArtifactNotFound {
                    model: model.to_string(),
                    path,
                })
            }
            Err(source) => Err(ForecastError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn builds_country_model_path() {
        let store = ForecastStore::new("docs/figures", "Afghanistan", "html");
        assert_eq!(
            store.path_for("TiDE").unwrap(),
            PathBuf::from("docs/figures/Afghanistan_TiDE.html")
        );
    }

    #[test]
    fn from_config_uses_configured_directory() {
        let config = DashboardConfig::embedded().unwrap();
        let store = ForecastStore::from_config(&config);
        assert_eq!(
            store.path_for("TiDE").unwrap(),
            PathBuf::from("docs/figures/operative/TiDE/default/Afghanistan_TiDE.html")
        );
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(
            ForecastStore::new("docs", "Afghanistan", "html").content_type(),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            ForecastStore::new("docs", "Afghanistan", "PNG").content_type(),
            "image/png"
        );
        assert_eq!(
            ForecastStore::new("docs", "Afghanistan", "json").content_type(),
            "application/json"
        );
        assert_eq!(
            ForecastStore::new("docs", "Afghanistan", "bin").content_type(),
            "application/octet-stream"
        );
    }

    #[test]
    fn rejects_escaping_names() {
        let store = ForecastStore::new("docs", "Afghanistan", "html");
        for name in ["", "../secret", "a/b", "a\\b", ".."] {
            assert!(
                matches!(
                    store.path_for(name),
                    Err(ForecastError::InvalidModelName(_))
                ),
                "accepted {name:?}"
            );
        }
    }

    #[tokio::test]
    async fn returns_document_bytes_unchanged() {
        let dir = TempDir::new().unwrap();
        let content = b"<html><body>forecast</body></html>\n";
        std::fs::write(dir.path().join("Afghanistan_TiDE.html"), content).unwrap();

        let store = ForecastStore::new(dir.path(), "Afghanistan", "html");
        assert_eq!(store.read("TiDE").await.unwrap(), content.to_vec());
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = ForecastStore::new(dir.path(), "Afghanistan", "html");

        let err = store.read("TiDE").await.unwrap_err();
        match err {
            ForecastError::ArtifactNotFound { model, path } => {
                assert_eq!(model, "TiDE");
                assert_eq!(path, dir.path().join("Afghanistan_TiDE.html"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
