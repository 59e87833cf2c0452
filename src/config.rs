use serde::Deserialize;
use std::path::PathBuf;

/// Fixed catalog dimensions for this deployment. Not derived from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub items_per_page: u32,
    pub total_items: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            items_per_page: 6,
            total_items: 15,
        }
    }
}

impl CatalogConfig {
    pub fn total_pages(&self) -> u32 {
        self.total_items.div_ceil(self.items_per_page.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.escuelajs.co/api/v1".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Prefix for shareable links; the query string is appended to it.
    pub share_base: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            share_base: "http://localhost:3000/products".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("shelf").join("config.toml"))
}

impl Config {
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Config::default();
        };

        let Ok(content) = std::fs::read_to_string(&path) else {
            return Config::default();
        };

        match Self::parse(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(content)?;
        config.normalize();
        Ok(config)
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        per_page: Option<u32>,
        total_items: Option<u32>,
    ) -> Self {
        if let Some(url) = api_url {
            self.api.base_url = url;
        }
        if let Some(n) = per_page {
            self.catalog.items_per_page = n;
        }
        if let Some(n) = total_items {
            self.catalog.total_items = n;
        }
        self.normalize();
        self
    }

    fn normalize(&mut self) {
        if self.catalog.items_per_page == 0 {
            tracing::warn!("items_per_page must be positive, using 1");
            self.catalog.items_per_page = 1;
        }
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
    }
}
