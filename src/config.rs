//! Runtime configuration for the FitScope client.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color_scheme::ColorScheme;
use crate::error::ConfigError;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "fitscope.yaml";

/// Environment variable overriding [`FitScopeConfig::backend_url`].
pub const BACKEND_URL_ENV: &str = "FITSCOPE_BACKEND_URL";

// ─────────────────────────────────────────────────────────────────────────────
// OverlaySource
// ─────────────────────────────────────────────────────────────────────────────

/// Endpoint the overlap contour is fetched from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlaySource {
    /// `GET /get_overlap_data`, the grid the backend computed last.
    #[default]
    OverlapData,
    /// `POST /get_calculated_contour` for the current model file and selection.
    CalculatedContour,
}

impl OverlaySource {
    pub fn label(self) -> &'static str {
        match self {
            OverlaySource::OverlapData => "Overlap data",
            OverlaySource::CalculatedContour => "Calculated contour",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FitScopeConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field                  | Purpose |
/// |------------------------|---------|
/// | `backend_url`          | Base URL of the fitting backend |
/// | `request_timeout_secs` | Per-request timeout; finetuning can take minutes |
/// | `title`                | Native window title |
/// | `window_size`          | Initial window size in points |
/// | `overlay_source`       | Which endpoint feeds the overlap contour |
/// | `color_scheme`         | Dark or light window theme |
/// | `log_filter`           | `tracing` filter used when `RUST_LOG` is unset |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitScopeConfig {
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub title: String,
    pub window_size: [f32; 2],
    pub overlay_source: OverlaySource,
    pub color_scheme: ColorScheme,
    pub log_filter: String,
}

impl Default for FitScopeConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 300,
            title: "FitScope".to_string(),
            window_size: [1400.0, 900.0],
            overlay_source: OverlaySource::default(),
            color_scheme: ColorScheme::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl FitScopeConfig {
    /// Parse a YAML document. Missing fields take their defaults.
    pub fn from_yaml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(path, &text)
    }

    /// Load from `explicit` if given, else from [`DEFAULT_CONFIG_FILE`] in the
    /// working directory when it exists, else use defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load_from_path(&fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply the environment override and then the command-line override.
    pub fn with_overrides(mut self, env_url: Option<String>, cli_url: Option<String>) -> Self {
        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            self.backend_url = url.trim().to_string();
        }
        if let Some(url) = cli_url.filter(|u| !u.trim().is_empty()) {
            self.backend_url = url.trim().to_string();
        }
        self
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
