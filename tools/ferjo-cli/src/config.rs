//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use ferjo_catalog::money::DEFAULT_CURRENCY_CODE;
use ferjo_catalog::search::StockPolicy;
use ferjo_media::DEFAULT_THUMBNAIL_WIDTH;
use ferjo_storefront::{StorefrontConfig, PLACEHOLDER_IMAGE};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Image settings.
    #[serde(default)]
    pub media: MediaConfig,

    /// Catalog presentation settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Settings for the catalog page.
    pub fn storefront(&self) -> StorefrontConfig {
        StorefrontConfig::default()
            .with_placeholder(self.media.placeholder.clone())
            .with_thumbnail_width(self.media.cdn_width)
            .with_default_currency(self.catalog.default_currency.clone())
            .with_stock_policy(self.catalog.stock_policy)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Catalog API settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Web endpoint serving `?path=products`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Request timeout in seconds. Unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Image shown when a card has nothing to show.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Width requested from the thumbnail services.
    #[serde(default = "default_cdn_width")]
    pub cdn_width: u32,

    /// Cards probed at once by `ferjo images`.
    #[serde(default = "default_probe_concurrency")]
    pub probe_concurrency: usize,
}

fn default_placeholder() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

fn default_cdn_width() -> u32 {
    DEFAULT_THUMBNAIL_WIDTH
}

fn default_probe_concurrency() -> usize {
    4
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            cdn_width: default_cdn_width(),
            probe_concurrency: default_probe_concurrency(),
        }
    }
}

/// Catalog presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Currency for products without `moneda`.
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// `flag_only` or `exclude_out_of_stock`.
    #[serde(default)]
    pub stock_policy: StockPolicy,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY_CODE.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            stock_policy: StockPolicy::default(),
        }
    }
}

/// Generate a default ferjo.toml config file.
pub fn generate_default_config(api_base: Option<&str>) -> String {
    let base_line = match api_base {
        Some(base) => format!("base = \"{}\"", base),
        None => "# base = \"https://script.google.com/macros/s/<deployment>/exec\"".to_string(),
    };

    format!(
        r#"# FERJO catalog configuration

[api]
{base_line}
# timeout_secs = 20

[media]
placeholder = "{placeholder}"
cdn_width = {cdn_width}
probe_concurrency = {concurrency}

[catalog]
default_currency = "{currency}"
# flag_only keeps out-of-stock products visible; exclude_out_of_stock hides them
stock_policy = "flag_only"
"#,
        base_line = base_line,
        placeholder = PLACEHOLDER_IMAGE,
        cdn_width = DEFAULT_THUMBNAIL_WIDTH,
        concurrency = default_probe_concurrency(),
        currency = DEFAULT_CURRENCY_CODE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config(None)).unwrap();
        assert_eq!(config, CliConfig::default());

        let config: CliConfig =
            toml::from_str(&generate_default_config(Some("https://x/exec"))).unwrap();
        assert_eq!(config.api.base.as_deref(), Some("https://x/exec"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: CliConfig =
            toml::from_str("[catalog]\nstock_policy = \"exclude_out_of_stock\"\n").unwrap();
        assert_eq!(config.catalog.stock_policy, StockPolicy::ExcludeOutOfStock);
        assert_eq!(config.catalog.default_currency, "GTQ");
        assert_eq!(config.media.cdn_width, 1600);
        assert!(config.api.timeout().is_none());
    }

    #[test]
    fn test_save_and_load_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.api.base = Some("https://x/exec".to_string());
        config.api.timeout_secs = Some(15);

        for name in ["ferjo.toml", "ferjo.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(CliConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_storefront_settings() {
        let mut config = CliConfig::default();
        config.media.cdn_width = 800;
        config.catalog.default_currency = "USD".to_string();

        let storefront = config.storefront();
        assert_eq!(storefront.thumbnail_width, 800);
        assert_eq!(storefront.default_currency, "USD");
        assert_eq!(storefront.placeholder, PLACEHOLDER_IMAGE);
    }
}
