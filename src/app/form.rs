use crate::core::color::Color;
use crate::core::engine::ShippingEngine;
use crate::domain::model::{BoxField, BoxSubmission, ValidationErrors};

/// Result of checking a form: the field errors and whether the weight was reset.
#[derive(Debug, Clone, PartialEq)]
pub struct FormCheck {
    pub errors: ValidationErrors,
    pub weight_reset: bool,
}

/// Builds a submission from raw input. Picker values (`#rrggbb`) are converted
/// to the stored `r,g,b` form; unreadable ones are kept as typed so validation
/// reports them against the color field.
pub fn submission_from_input(
    receiver: String,
    weight: f64,
    color: &str,
    destination: String,
) -> BoxSubmission {
    let color = color.trim();
    let box_color = if color.starts_with('#') {
        Color::from_hex(color)
            .map(|c| c.to_storage_string())
            .unwrap_or_else(|_| color.to_string())
    } else {
        color.to_string()
    };

    BoxSubmission {
        receiver_name: receiver,
        weight,
        box_color,
        destination_country: destination,
    }
}

/// Validates the submission and resets a negative weight to zero, so the
/// corrected form can be shown again.
pub fn check_submission(engine: &ShippingEngine, submission: &mut BoxSubmission) -> FormCheck {
    let mut errors = engine.validate(submission);

    if submission.box_color.starts_with('#') && errors.get(BoxField::BoxColor).is_some() {
        errors.insert(BoxField::BoxColor, "Box color must be a #rrggbb hex value");
    }

    let weight_reset = submission.reset_negative_weight();
    if weight_reset {
        tracing::debug!("Negative weight reset to {}", submission.weight);
    }

    FormCheck {
        errors,
        weight_reset,
    }
}
