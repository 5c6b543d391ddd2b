use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::app::AppTheme;

const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeskConfig {
    pub api_url: Option<String>,
    pub theme: Option<String>,
}

impl DeskConfig {
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("gitecho-desk").join("config.toml")
    }

    pub fn load() -> Self {
        let path = Self::config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Server base URL; the GITECHO_API_URL env var wins over the file.
    pub fn api_url(&self) -> String {
        std::env::var("GITECHO_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn theme(&self) -> AppTheme {
        match self.theme.as_deref() {
            Some("light") => AppTheme::Light,
            Some("dark") => AppTheme::Dark,
            _ => AppTheme::System,
        }
    }
}

fn xdg_config_home() -> PathBuf {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return PathBuf::from(dir);
    }
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".config"))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_map_to_app_themes() {
        let mut config = DeskConfig::default();
        assert_eq!(config.theme(), AppTheme::System);
        config.theme = Some("dark".to_string());
        assert_eq!(config.theme(), AppTheme::Dark);
        config.theme = Some("banana".to_string());
        assert_eq!(config.theme(), AppTheme::System);
    }
}
