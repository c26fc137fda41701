use crate::error::{BlogError, BlogResult};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "inkwell.toml";

const MIN_DEBOUNCE_MS: u64 = 100;
const MAX_DEBOUNCE_MS: u64 = 300;

/// Settings read from `inkwell.toml`. Every field has a default, so an
/// absent file or table is fine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub site: SiteConfig,
    pub search: SearchConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    /// Prefix for absolute links in share buttons, e.g. `https://blog.example.com`.
    pub base_url: String,
    pub author_link: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            title: "Blogs".to_string(),
            description: "Stories that inspire, inform, and entertain".to_string(),
            base_url: String::new(),
            author_link: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub preview_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            debounce_ms: MIN_DEBOUNCE_MS,
            preview_limit: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub default: Theme,
}

impl BlogConfig {
    /// Loads `path`, or `inkwell.toml` in the working directory when none is
    /// given. A missing default file yields the defaults; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> BlogResult<BlogConfig> {
        let (path, explicit) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };
        if !explicit && !path.exists() {
            debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
            return Ok(BlogConfig::default());
        }
        let raw = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded config");
        BlogConfig::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> BlogResult<BlogConfig> {
        toml::from_str(raw).map_err(|err| BlogError::config(err.to_string()))
    }

    /// The search debounce, kept within 100..=300 ms.
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(
            self.search
                .debounce_ms
                .clamp(MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS),
        )
    }
}
