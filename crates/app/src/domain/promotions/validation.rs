//! Promotion form validation.
//!
//! These are the checks the create and edit forms run before handing a
//! promotion to the store. The store itself never validates.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::civil::DateTime;

use crate::domain::promotions::{
    data::NewPromotion,
    records::{ApplyTo, PromotionRecord},
};

/// Per-field validation messages. `None` means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Message for the name field.
    pub name: Option<String>,
    /// Message for the description field.
    pub description: Option<String>,
    /// Message for the discount field.
    pub discount_value: Option<String>,
    /// Product selection for the apply-to type.
    pub products: Option<String>,
    /// Message for the start field.
    pub start_datetime: Option<String>,
    /// Message for the end field.
    pub end_datetime: Option<String>,
}

impl ValidationErrors {
    /// No field has a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages().next().is_none()
    }

    /// Field name and message for every invalid field, in form order.
    pub fn messages(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("name", &self.name),
            ("description", &self.description),
            ("discount_value", &self.discount_value),
            ("products", &self.products),
            ("start_datetime", &self.start_datetime),
            ("end_datetime", &self.end_datetime),
        ]
        .into_iter()
        .filter_map(|(field, message)| message.as_deref().map(|m| (field, m)))
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut first = true;

        for (field, message) in self.messages() {
            if !first {
                f.write_str("; ")?;
            }

            write!(f, "{field}: {message}")?;

            first = false;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// The fields both forms check, borrowed from either a new or a stored promotion.
struct FormFields<'a> {
    name: &'a str,
    description: &'a str,
    discount_value: f64,
    apply_to: ApplyTo,
    target_identifiers: &'a [String],
    bundled_product_codes: &'a [String],
}

impl<'a> From<&'a NewPromotion> for FormFields<'a> {
    fn from(promotion: &'a NewPromotion) -> Self {
        Self {
            name: &promotion.name,
            description: &promotion.description,
            discount_value: promotion.discount_value,
            apply_to: promotion.apply_to,
            target_identifiers: &promotion.target_identifiers,
            bundled_product_codes: &promotion.bundled_product_codes,
        }
    }
}

impl<'a> From<&'a PromotionRecord> for FormFields<'a> {
    fn from(promotion: &'a PromotionRecord) -> Self {
        Self {
            name: &promotion.name,
            description: &promotion.description,
            discount_value: promotion.discount_value,
            apply_to: promotion.apply_to,
            target_identifiers: &promotion.target_identifiers,
            bundled_product_codes: &promotion.bundled_product_codes,
        }
    }
}

fn check_fields(promotion: &FormFields<'_>) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if promotion.name.trim().is_empty() {
        errors.name = Some("Name is required".to_string());
    }

    if promotion.description.trim().is_empty() {
        errors.description = Some("Description is required".to_string());
    }

    if promotion.discount_value.is_nan() || promotion.discount_value <= 0.0 {
        errors.discount_value = Some("Discount must be greater than 0".to_string());
    }

    match promotion.apply_to {
        ApplyTo::Product if promotion.target_identifiers.is_empty() => {
            errors.products = Some("Please select at least one product".to_string());
        }
        ApplyTo::Bundle if promotion.bundled_product_codes.is_empty() => {
            errors.products = Some("Please select at least one product for the bundle".to_string());
        }
        ApplyTo::Product | ApplyTo::Bundle => {}
    }

    errors
}

/// Validate a promotion about to be created.
///
/// # Errors
///
/// Returns the collected messages when any field is invalid.
pub fn validate_new(promotion: &NewPromotion, now: DateTime) -> Result<(), ValidationErrors> {
    let mut errors = check_fields(&promotion.into());

    if promotion.start_datetime < now {
        errors.start_datetime = Some("Start date must be in the future".to_string());
    }

    if promotion.end_datetime <= promotion.start_datetime {
        errors.end_datetime = Some("End date must be after start date".to_string());
    }

    errors.into_result()
}

/// Validate an edited promotion. Dates are not re-checked on edit.
///
/// # Errors
///
/// Returns the collected messages when any field is invalid.
pub fn validate_update(promotion: &PromotionRecord) -> Result<(), ValidationErrors> {
    check_fields(&promotion.into()).into_result()
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use smallvec::smallvec;

    use crate::domain::promotions::records::PromotionId;

    use super::*;

    fn now() -> DateTime {
        date(2030, 1, 1).at(12, 0, 0, 0)
    }

    fn valid() -> NewPromotion {
        let start = date(2030, 1, 2).at(9, 0, 0, 0);
        let mut promotion = NewPromotion::with_defaults("Vitamin week", start);

        promotion.description = "Ten percent off vitamins".to_string();
        promotion.discount_value = 10.0;
        promotion.target_identifiers = smallvec!["B0001".to_string(), "B0002".to_string()];

        promotion
    }

    #[test]
    fn valid_promotion_passes() {
        assert_eq!(validate_new(&valid(), now()), Ok(()));
    }

    #[test]
    fn blank_text_fields_are_rejected() {
        let mut promotion = valid();
        promotion.name = "   ".to_string();
        promotion.description = String::new();

        let errors = validate_new(&promotion, now()).err().unwrap_or_default();

        assert_eq!(errors.name.as_deref(), Some("Name is required"));
        assert_eq!(errors.description.as_deref(), Some("Description is required"));
        assert_eq!(errors.products, None);
    }

    #[test]
    fn non_positive_discount_is_rejected() {
        let mut promotion = valid();
        promotion.discount_value = 0.0;

        let errors = validate_new(&promotion, now()).err().unwrap_or_default();

        assert_eq!(
            errors.discount_value.as_deref(),
            Some("Discount must be greater than 0")
        );
    }

    #[test]
    fn bundle_without_codes_is_rejected() {
        let mut promotion = valid();
        promotion.apply_to = ApplyTo::Bundle;

        let errors = validate_new(&promotion, now()).err().unwrap_or_default();

        assert_eq!(
            errors.products.as_deref(),
            Some("Please select at least one product for the bundle")
        );
    }

    #[test]
    fn dates_must_be_ordered_and_in_the_future() {
        let mut promotion = valid();
        promotion.start_datetime = date(2029, 12, 31).at(9, 0, 0, 0);
        promotion.end_datetime = promotion.start_datetime;

        let errors = validate_new(&promotion, now()).err().unwrap_or_default();

        assert_eq!(
            errors.start_datetime.as_deref(),
            Some("Start date must be in the future")
        );
        assert_eq!(
            errors.end_datetime.as_deref(),
            Some("End date must be after start date")
        );
    }

    fn stored(promotion: NewPromotion) -> PromotionRecord {
        promotion.into_record(PromotionId::new("1"), Timestamp::UNIX_EPOCH)
    }

    #[test]
    fn update_validation_ignores_dates() {
        let mut promotion = valid();
        promotion.start_datetime = date(2020, 1, 1).at(0, 0, 0, 0);
        promotion.end_datetime = promotion.start_datetime;

        assert_eq!(validate_update(&stored(promotion)), Ok(()));
    }

    #[test]
    fn display_lists_every_message() {
        let mut promotion = valid();
        promotion.name = String::new();
        promotion.target_identifiers = smallvec![];

        let errors = validate_update(&stored(promotion)).err().unwrap_or_default();

        assert_eq!(
            errors.to_string(),
            "name: Name is required; products: Please select at least one product"
        );
    }
}
