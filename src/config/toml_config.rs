use crate::core::currency::{CurrencyFormat, Grouping};
use crate::core::engine::ShippingEngine;
use crate::core::pricing::PricingTable;
use crate::domain::model::DestinationCountry;
use crate::utils::error::{Result, ShippingError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    #[default]
    File,
    Rest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_store_path")]
    pub path: String,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_table")]
    pub table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default)]
    pub grouping: Grouping,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub multipliers: HashMap<String, f64>,
}

fn default_store_path() -> String {
    "./boxes.json".to_string()
}

fn default_table() -> String {
    "boxes".to_string()
}

fn default_symbol() -> String {
    CurrencyFormat::default().symbol
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
            endpoint: None,
            api_key: None,
            table: default_table(),
        }
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        let format = CurrencyFormat::default();
        Self {
            symbol: format.symbol,
            grouping: format.grouping,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ShippingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ShippingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BOX_STORE_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ShippingError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat {
            symbol: self.currency.symbol.clone(),
            grouping: self.currency.grouping,
        }
    }

    pub fn pricing_table(&self) -> Result<PricingTable> {
        let overrides = self
            .pricing
            .multipliers
            .iter()
            .map(|(code, multiplier)| Ok((code.parse::<DestinationCountry>()?, *multiplier)))
            .collect::<Result<HashMap<_, _>>>()?;

        PricingTable::with_overrides(&overrides)
    }

    pub fn build_engine(&self) -> Result<ShippingEngine> {
        Ok(ShippingEngine::new(
            self.pricing_table()?,
            self.currency_format(),
        ))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        match self.store.backend {
            StoreBackend::Memory => {}
            StoreBackend::File => validation::validate_path("store.path", &self.store.path)?,
            StoreBackend::Rest => {
                let endpoint = validation::validate_required_field("store.endpoint", &self.store.endpoint)?;
                validation::validate_substituted("store.endpoint", endpoint)?;
                validation::validate_url("store.endpoint", endpoint)?;

                let api_key = validation::validate_required_field("store.api_key", &self.store.api_key)?;
                validation::validate_substituted("store.api_key", api_key)?;
                validation::validate_non_empty_string("store.api_key", api_key)?;
                validation::validate_non_empty_string("store.table", &self.store.table)?;
            }
        }

        validation::validate_non_empty_string("currency.symbol", &self.currency.symbol)?;
        self.pricing_table()?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.store.backend, StoreBackend::File);
        assert_eq!(config.store.path, "./boxes.json");
        assert_eq!(config.store.table, "boxes");
        assert_eq!(config.currency_format(), CurrencyFormat::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[store]
backend = "rest"
endpoint = "https://example.supabase.co"
api_key = "anon-key"
table = "shipments"

[currency]
symbol = "$"
grouping = "thousands"

[pricing.multipliers]
CHINA = 12.5
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.store.backend, StoreBackend::Rest);
        assert_eq!(config.store.table, "shipments");

        let engine = config.build_engine().unwrap();
        assert_eq!(engine.compute_cost(2.0, DestinationCountry::China).unwrap(), 25.0);
        assert_eq!(engine.format_currency(1234.5), "$1,234.50");
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("BOX_SHIPPER_TEST_KEY", "secret");
        let config = TomlConfig::from_toml_str(
            r#"
[store]
backend = "rest"
endpoint = "https://example.supabase.co"
api_key = "${BOX_SHIPPER_TEST_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(config.store.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_rest_backend_requires_credentials() {
        let config = TomlConfig::from_toml_str(
            r#"
[store]
backend = "rest"
endpoint = "https://example.supabase.co"
api_key = "${BOX_SHIPPER_UNSET_VARIABLE}"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[store]\nbackend = \"rest\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(TomlConfig::from_toml_str("[store]\nbackend = \"ftp\"\n").is_err());
        let config = TomlConfig::from_toml_str("[pricing.multipliers]\nMARS = 1.0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ShippingError::UnknownDestination { .. })
        ));

        let config = TomlConfig::from_toml_str("[pricing.multipliers]\nSWEDEN = 0.0\n").unwrap();
        assert!(config.validate().is_err());
    }
}
