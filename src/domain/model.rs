use crate::utils::error::{Result, ShippingError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DestinationCountry {
    Sweden,
    China,
    Brazil,
    Australia,
}

impl DestinationCountry {
    pub const ALL: [DestinationCountry; 4] = [
        DestinationCountry::Sweden,
        DestinationCountry::China,
        DestinationCountry::Brazil,
        DestinationCountry::Australia,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            DestinationCountry::Sweden => "SWEDEN",
            DestinationCountry::China => "CHINA",
            DestinationCountry::Brazil => "BRAZIL",
            DestinationCountry::Australia => "AUSTRALIA",
        }
    }
}

impl FromStr for DestinationCountry {
    type Err = ShippingError;

    fn from_str(code: &str) -> Result<Self> {
        DestinationCountry::ALL
            .into_iter()
            .find(|country| country.code() == code)
            .ok_or_else(|| ShippingError::UnknownDestination {
                code: code.to_string(),
            })
    }
}

impl fmt::Display for DestinationCountry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

/// A destination with its display name and price per kilogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryOption {
    pub code: DestinationCountry,
    pub name: String,
    pub multiplier: f64,
}

/// Raw form input, exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxSubmission {
    pub receiver_name: String,
    pub weight: f64,
    pub box_color: String,
    pub destination_country: String,
}

impl BoxSubmission {
    /// Replaces a negative weight with zero. Returns true when a reset happened.
    pub fn reset_negative_weight(&mut self) -> bool {
        if self.weight < 0.0 {
            self.weight = 0.0;
            true
        } else {
            false
        }
    }
}

/// Payload handed to a store; id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBox {
    pub receiver_name: String,
    pub weight: f64,
    pub box_color: String,
    pub destination_country: DestinationCountry,
    pub shipping_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxRecord {
    pub id: String,
    pub receiver_name: String,
    pub weight: f64,
    pub box_color: String,
    pub destination_country: DestinationCountry,
    pub shipping_cost: f64,
    pub created_at: DateTime<Utc>,
}

impl BoxRecord {
    pub fn from_new(payload: NewBox, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            receiver_name: payload.receiver_name,
            weight: payload.weight,
            box_color: payload.box_color,
            destination_country: payload.destination_country,
            shipping_cost: payload.shipping_cost,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BoxField {
    ReceiverName,
    Weight,
    BoxColor,
    DestinationCountry,
}

impl BoxField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoxField::ReceiverName => "receiver_name",
            BoxField::Weight => "weight",
            BoxField::BoxColor => "box_color",
            BoxField::DestinationCountry => "destination_country",
        }
    }
}

/// Field-to-message mapping produced by a validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: BTreeMap<BoxField, String>,
}

impl ValidationErrors {
    pub fn insert(&mut self, field: BoxField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: BoxField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BoxField, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, msg)| format!("{}: {}", field.as_str(), msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Count and running total over a listing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxSummary {
    pub count: usize,
    pub total_cost: f64,
}

impl BoxSummary {
    pub fn from_records(records: &[BoxRecord]) -> Self {
        Self {
            count: records.len(),
            total_cost: records.iter().map(|r| r.shipping_cost).sum(),
        }
    }

    pub fn count_label(&self) -> String {
        if self.count == 1 {
            "1 box".to_string()
        } else {
            format!("{} boxes", self.count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_codes_parse() {
        for country in DestinationCountry::ALL {
            assert_eq!(country.code().parse::<DestinationCountry>().unwrap(), country);
        }
        assert!(matches!(
            "MARS".parse::<DestinationCountry>(),
            Err(ShippingError::UnknownDestination { code }) if code == "MARS"
        ));
        assert!("sweden".parse::<DestinationCountry>().is_err());
    }

    #[test]
    fn test_destination_serializes_as_code() {
        let json = serde_json::to_string(&DestinationCountry::Australia).unwrap();
        assert_eq!(json, "\"AUSTRALIA\"");
    }

    #[test]
    fn test_reset_negative_weight() {
        let mut submission = BoxSubmission {
            weight: -3.0,
            ..Default::default()
        };
        assert!(submission.reset_negative_weight());
        assert_eq!(submission.weight, 0.0);
        assert!(!submission.reset_negative_weight());
    }

    #[test]
    fn test_summary_labels() {
        let mut summary = BoxSummary::default();
        assert_eq!(summary.count_label(), "0 boxes");
        summary.count = 1;
        assert_eq!(summary.count_label(), "1 box");
    }
}
