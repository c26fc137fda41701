//! Theme preference held in an explicit context object.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    System,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            "system" => Ok(Theme::System),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// Key/value preferences, the same shape as browser local storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Current theme plus the store it is written through to.
#[derive(Debug, Clone)]
pub struct ThemeContext<S = MemoryPreferences> {
    theme: Theme,
    store: S,
}

impl<S: PreferenceStore> ThemeContext<S> {
    pub fn init(store: S) -> ThemeContext<S> {
        ThemeContext::with_default(store, Theme::Dark)
    }

    /// Reads the saved theme; a missing or unreadable value is replaced by
    /// `default`, which is written back.
    pub fn with_default(mut store: S, default: Theme) -> ThemeContext<S> {
        let saved = store.get(THEME_KEY).and_then(|value| value.parse().ok());
        let theme = match saved {
            Some(theme) => theme,
            None => {
                store.set(THEME_KEY, default.as_str());
                default
            }
        };
        debug!(%theme, "theme initialised");
        ThemeContext { theme, store }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn is_light(&self) -> bool {
        self.theme == Theme::Light
    }

    pub fn set_dark(&mut self) {
        self.set(Theme::Dark);
    }

    pub fn set_light(&mut self) {
        self.set(Theme::Light);
    }

    /// Dark becomes light; anything else becomes dark.
    pub fn toggle(&mut self) -> Theme {
        if self.is_dark() {
            self.set_light();
        } else {
            self.set_dark();
        }
        self.theme
    }

    /// Applies a change made to the store by someone else.
    pub fn on_storage_change(&mut self, key: &str, new_value: Option<&str>) {
        if key != THEME_KEY {
            return;
        }
        self.theme = new_value
            .and_then(|value| value.parse().ok())
            .unwrap_or(Theme::Dark);
    }

    pub fn preferences(&self) -> &S {
        &self.store
    }

    fn set(&mut self, theme: Theme) {
        self.store.set(THEME_KEY, theme.as_str());
        self.theme = theme;
    }
}
