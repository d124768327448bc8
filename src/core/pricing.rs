use crate::domain::model::{CountryOption, DestinationCountry};
use crate::utils::error::{Result, ShippingError};
use std::collections::HashMap;

/// Price per kilogram for every supported destination.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable {
    entries: Vec<CountryOption>,
}

impl PricingTable {
    /// The published rates.
    pub fn standard() -> Self {
        let entries = [
            (DestinationCountry::Sweden, "Sweden", 7.35),
            (DestinationCountry::China, "China", 11.53),
            (DestinationCountry::Brazil, "Brazil", 15.63),
            (DestinationCountry::Australia, "Australia", 50.09),
        ]
        .into_iter()
        .map(|(code, name, multiplier)| CountryOption {
            code,
            name: name.to_string(),
            multiplier,
        })
        .collect();

        Self { entries }
    }

    /// Builds a table from explicit entries. Multipliers must be positive and finite.
    pub fn new(entries: Vec<CountryOption>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ShippingError::ConfigError {
                message: "pricing table must contain at least one destination".to_string(),
            });
        }

        for option in &entries {
            if !option.multiplier.is_finite() || option.multiplier <= 0.0 {
                return Err(ShippingError::InvalidConfigValueError {
                    field: format!("pricing.multipliers.{}", option.code),
                    value: option.multiplier.to_string(),
                    reason: "Multiplier must be a positive number".to_string(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Standard table with some multipliers replaced.
    pub fn with_overrides(overrides: &HashMap<DestinationCountry, f64>) -> Result<Self> {
        let entries = Self::standard()
            .entries
            .into_iter()
            .map(|mut option| {
                if let Some(multiplier) = overrides.get(&option.code) {
                    option.multiplier = *multiplier;
                }
                option
            })
            .collect();

        Self::new(entries)
    }

    pub fn lookup(&self, code: DestinationCountry) -> Result<&CountryOption> {
        self.entries
            .iter()
            .find(|option| option.code == code)
            .ok_or_else(|| ShippingError::UnknownDestination {
                code: code.to_string(),
            })
    }

    /// Looks up a raw code string, failing for anything not in the table.
    pub fn lookup_code(&self, code: &str) -> Result<&CountryOption> {
        let country: DestinationCountry = code.parse()?;
        self.lookup(country)
    }

    /// Display name for a code, or the code itself when it is not in the table.
    pub fn display_name(&self, code: &str) -> String {
        self.lookup_code(code)
            .map(|option| option.name.clone())
            .unwrap_or_else(|_| code.to_string())
    }

    pub fn options(&self) -> impl Iterator<Item = &CountryOption> {
        self.entries.iter()
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::standard()
    }
}
