use crate::core::color::Color;
use crate::core::currency::CurrencyFormat;
use crate::core::pricing::PricingTable;
use crate::domain::model::{
    BoxField, BoxRecord, BoxSubmission, BoxSummary, DestinationCountry, NewBox, ValidationErrors,
};
use crate::utils::error::Result;

/// Pricing, validation and display rules for shipping boxes.
///
/// Holds only read-only configuration, so one engine can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct ShippingEngine {
    pricing: PricingTable,
    currency: CurrencyFormat,
}

impl ShippingEngine {
    pub fn new(pricing: PricingTable, currency: CurrencyFormat) -> Self {
        Self { pricing, currency }
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    /// Checks every field independently and reports all problems at once.
    pub fn validate(&self, submission: &BoxSubmission) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        if submission.receiver_name.trim().is_empty() {
            errors.insert(BoxField::ReceiverName, "Receiver name is required");
        }

        let weight = submission.weight;
        if weight.is_nan() || weight.is_infinite() {
            errors.insert(BoxField::Weight, "Weight must be a finite number");
        } else if weight < 0.0 {
            errors.insert(BoxField::Weight, "Weight cannot be negative");
        } else if weight == 0.0 {
            errors.insert(BoxField::Weight, "Weight must be greater than 0");
        }

        if submission.box_color.is_empty() {
            errors.insert(BoxField::BoxColor, "Box color is required");
        } else {
            match Color::parse_channels(&submission.box_color) {
                Err(_) => errors.insert(BoxField::BoxColor, "Box color must be in r,g,b format"),
                Ok(channels) if channels.iter().any(|c| !(0..=255).contains(c)) => errors.insert(
                    BoxField::BoxColor,
                    "Box color channels must be between 0 and 255",
                ),
                Ok(_) => {}
            }
        }

        if submission.destination_country.is_empty() {
            errors.insert(
                BoxField::DestinationCountry,
                "Destination country is required",
            );
        } else if self
            .pricing
            .lookup_code(&submission.destination_country)
            .is_err()
        {
            errors.insert(
                BoxField::DestinationCountry,
                "Destination country is not supported",
            );
        }

        if !errors.is_valid() {
            tracing::debug!("Submission rejected: {}", errors);
        }
        errors
    }

    /// `weight * multiplier`, unrounded.
    pub fn compute_cost(&self, weight: f64, destination: DestinationCountry) -> Result<f64> {
        let option = self.pricing.lookup(destination)?;
        Ok(weight * option.multiplier)
    }

    /// Same as [`compute_cost`](Self::compute_cost) for a raw code string.
    pub fn compute_cost_for_code(&self, weight: f64, code: &str) -> Result<f64> {
        let option = self.pricing.lookup_code(code)?;
        Ok(weight * option.multiplier)
    }

    /// Builds the payload to persist. Expects a submission that passed `validate`;
    /// the color is stored in canonical, clamped form.
    pub fn build_record(&self, submission: &BoxSubmission) -> Result<NewBox> {
        let destination: DestinationCountry = submission.destination_country.parse()?;
        let shipping_cost = self.compute_cost(submission.weight, destination)?;

        Ok(NewBox {
            receiver_name: submission.receiver_name.trim().to_string(),
            weight: submission.weight,
            box_color: Color::from_storage_str(&submission.box_color)?.to_storage_string(),
            destination_country: destination,
            shipping_cost,
        })
    }

    pub fn format_currency(&self, amount: f64) -> String {
        self.currency.format(amount)
    }

    pub fn format_weight(&self, weight: f64) -> String {
        format!("{} kg", weight)
    }

    pub fn display_name(&self, code: &str) -> String {
        self.pricing.display_name(code)
    }

    pub fn summarize(&self, records: &[BoxRecord]) -> BoxSummary {
        BoxSummary::from_records(records)
    }

    pub fn render_row(&self, record: &BoxRecord) -> BoxRow {
        let color = Color::from_storage_str(&record.box_color)
            .map(|c| c.to_string())
            .unwrap_or_else(|e| {
                tracing::warn!("Record {} has an unreadable color: {}", record.id, e);
                record.box_color.clone()
            });

        BoxRow {
            receiver_name: record.receiver_name.clone(),
            weight: self.format_weight(record.weight),
            color,
            destination: self.display_name(record.destination_country.code()),
            shipping_cost: self.format_currency(record.shipping_cost),
        }
    }
}

/// One record rendered for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxRow {
    pub receiver_name: String,
    pub weight: String,
    pub color: String,
    pub destination: String,
    pub shipping_cost: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CountryOption;
    use crate::utils::error::ShippingError;
    use chrono::Utc;

    fn alice() -> BoxSubmission {
        BoxSubmission {
            receiver_name: " Alice ".to_string(),
            weight: 2.5,
            box_color: "255,0,0".to_string(),
            destination_country: "SWEDEN".to_string(),
        }
    }

    #[test]
    fn test_empty_submission_reports_every_field() {
        let engine = ShippingEngine::default();
        let errors = engine.validate(&BoxSubmission::default());

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(BoxField::ReceiverName), Some("Receiver name is required"));
        assert_eq!(errors.get(BoxField::Weight), Some("Weight must be greater than 0"));
        assert_eq!(errors.get(BoxField::BoxColor), Some("Box color is required"));
        assert_eq!(
            errors.get(BoxField::DestinationCountry),
            Some("Destination country is required")
        );
    }

    #[test]
    fn test_valid_submission_builds_record() {
        let engine = ShippingEngine::default();
        let submission = alice();

        assert!(engine.validate(&submission).is_valid());

        let record = engine.build_record(&submission).unwrap();
        assert_eq!(record.receiver_name, "Alice");
        assert_eq!(record.shipping_cost, 2.5 * 7.35);
        assert_eq!(record.shipping_cost, 18.375);
        assert_eq!(record.box_color, "255,0,0");
        assert_eq!(record.destination_country, DestinationCountry::Sweden);
    }

    #[test]
    fn test_weight_rules() {
        let engine = ShippingEngine::default();
        let check = |weight: f64| {
            let submission = BoxSubmission { weight, ..alice() };
            engine.validate(&submission).get(BoxField::Weight).map(str::to_string)
        };

        assert_eq!(check(-1.0).as_deref(), Some("Weight cannot be negative"));
        assert_eq!(check(0.0).as_deref(), Some("Weight must be greater than 0"));
        assert_eq!(check(f64::NAN).as_deref(), Some("Weight must be a finite number"));
        assert_eq!(check(f64::INFINITY).as_deref(), Some("Weight must be a finite number"));
        assert_eq!(check(0.01), None);
    }

    #[test]
    fn test_whitespace_name_and_bad_codes() {
        let engine = ShippingEngine::default();
        let submission = BoxSubmission {
            receiver_name: "   ".to_string(),
            box_color: "red".to_string(),
            destination_country: "NORWAY".to_string(),
            ..alice()
        };
        let errors = engine.validate(&submission);

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(BoxField::BoxColor), Some("Box color must be in r,g,b format"));
        assert_eq!(
            errors.get(BoxField::DestinationCountry),
            Some("Destination country is not supported")
        );
    }

    #[test]
    fn test_out_of_range_color_is_rejected() {
        let engine = ShippingEngine::default();
        let submission = BoxSubmission {
            box_color: "300,-5,128".to_string(),
            ..alice()
        };

        let errors = engine.validate(&submission);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(BoxField::BoxColor),
            Some("Box color channels must be between 0 and 255")
        );
    }

    #[test]
    fn test_build_record_stores_canonical_color() {
        let engine = ShippingEngine::default();
        let clamped = BoxSubmission {
            box_color: "300,-5,128".to_string(),
            ..alice()
        };
        assert_eq!(engine.build_record(&clamped).unwrap().box_color, "255,0,128");

        let padded = BoxSubmission {
            box_color: " 010, 20 ,30".to_string(),
            ..alice()
        };
        assert!(engine.validate(&padded).is_valid());
        assert_eq!(engine.build_record(&padded).unwrap().box_color, "10,20,30");

        let garbage = BoxSubmission {
            box_color: "red".to_string(),
            ..alice()
        };
        assert!(matches!(
            engine.build_record(&garbage),
            Err(ShippingError::MalformedColor { .. })
        ));
    }

    #[test]
    fn test_cost_is_exact_product() {
        let engine = ShippingEngine::default();
        for option in engine.pricing().options() {
            for weight in [0.1, 1.0, 2.5, 13.7, 1000.0] {
                assert_eq!(
                    engine.compute_cost(weight, option.code).unwrap(),
                    weight * option.multiplier
                );
            }
        }
    }

    #[test]
    fn test_unknown_destination_is_hard_failure() {
        let engine = ShippingEngine::default();
        assert!(matches!(
            engine.compute_cost_for_code(1.0, "ATLANTIS"),
            Err(ShippingError::UnknownDestination { .. })
        ));

        let sweden_only = PricingTable::new(vec![CountryOption {
            code: DestinationCountry::Sweden,
            name: "Sweden".to_string(),
            multiplier: 7.35,
        }])
        .unwrap();
        let engine = ShippingEngine::new(sweden_only, CurrencyFormat::default());
        assert!(matches!(
            engine.compute_cost(1.0, DestinationCountry::China),
            Err(ShippingError::UnknownDestination { .. })
        ));

        let submission = BoxSubmission {
            destination_country: "CHINA".to_string(),
            ..alice()
        };
        assert!(engine.build_record(&submission).is_err());
    }

    #[test]
    fn test_render_row() {
        let engine = ShippingEngine::default();
        let mut record = BoxRecord {
            id: "box-1".to_string(),
            receiver_name: "Alice".to_string(),
            weight: 2.5,
            box_color: "255,0,0".to_string(),
            destination_country: DestinationCountry::Sweden,
            shipping_cost: 18.375,
            created_at: Utc::now(),
        };

        let row = engine.render_row(&record);
        assert_eq!(row.weight, "2.5 kg");
        assert_eq!(row.color, "RGB(255, 0, 0)");
        assert_eq!(row.destination, "Sweden");
        assert_eq!(row.shipping_cost, "₹18.38");

        record.box_color = "garbage".to_string();
        assert_eq!(engine.render_row(&record).color, "garbage");
    }
}
