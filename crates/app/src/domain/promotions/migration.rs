//! Stored promotion shape and on-read migration.
//!
//! Records written by older dashboard builds can lack fields that were added
//! later. [`StoredPromotion`] is the shape as decoded, with every late field
//! optional, and [`migrate`] turns it into a complete [`PromotionRecord`].

use std::{fmt::Display, str::FromStr};

use jiff::{Timestamp, civil::DateTime};
use serde::{
    Deserialize, Deserializer,
    de::{DeserializeOwned, Error as _},
};
use serde_json::Value;

use crate::domain::promotions::{
    data::{DEFAULT_MAX_USES_PER_USER, DEFAULT_MIN_CART_QTY, DEFAULT_TOTAL_USES_LIMIT},
    records::{
        ApplyTo, DiscountType, FileMetadata, ProductCodes, PromotionId, PromotionRecord,
        PromotionType,
    },
};

/// A sequence field as found in storage.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StoredSequence<T> {
    /// Key absent or `null`.
    Missing,

    /// Present but not an array.
    Malformed,

    Present(Vec<T>),
}

impl<T> Default for StoredSequence<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T> StoredSequence<T> {
    const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    fn into_present(self) -> Option<Vec<T>> {
        match self {
            Self::Present(items) => Some(items),
            Self::Missing | Self::Malformed => None,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for StoredSequence<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::Missing),
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<T>, _>>()
                .map(Self::Present)
                .map_err(D::Error::custom),
            _ => Ok(Self::Malformed),
        }
    }
}

/// A numeric field as found in storage.
///
/// The create form saved whatever the number input held, so older records
/// carry numbers as strings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum StoredNumber<T> {
    Number(T),

    /// A string holding a number, such as `"15"`.
    Text(T),

    /// An empty or whitespace-only string.
    Blank,
}

impl<T> StoredNumber<T> {
    const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    fn into_value(self) -> Option<T> {
        match self {
            Self::Number(value) | Self::Text(value) => Some(value),
            Self::Blank => None,
        }
    }
}

impl<'de, T> Deserialize<'de> for StoredNumber<T>
where
    T: DeserializeOwned + FromStr,
    T::Err: Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(number) => serde_json::from_value(Value::Number(number))
                .map(Self::Number)
                .map_err(D::Error::custom),
            Value::String(text) if text.trim().is_empty() => Ok(Self::Blank),
            Value::String(text) => text
                .trim()
                .parse()
                .map(Self::Text)
                .map_err(|error| D::Error::custom(format!("invalid number {text:?}: {error}"))),
            other => Err(D::Error::custom(format!(
                "expected a number or numeric string, found {other}"
            ))),
        }
    }
}

const fn is_stored_as_number<T>(field: Option<&StoredNumber<T>>) -> bool {
    match field {
        Some(number) => number.is_number(),
        None => true,
    }
}

/// Promotion as decoded from storage, before migration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct StoredPromotion {
    pub(crate) id: PromotionId,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) discount_type: DiscountType,
    pub(crate) discount_value: StoredNumber<f64>,
    pub(crate) apply_to: ApplyTo,
    #[serde(default)]
    pub(crate) target_identifiers: StoredSequence<String>,
    #[serde(rename = "bundledProductCodes", default)]
    pub(crate) bundled_product_codes: StoredSequence<String>,
    #[serde(default)]
    pub(crate) min_cart_qty: Option<StoredNumber<u32>>,
    #[serde(default)]
    pub(crate) max_uses_per_user: Option<StoredNumber<u32>>,
    #[serde(default)]
    pub(crate) total_uses_limit: Option<StoredNumber<u32>>,
    pub(crate) start_datetime: DateTime,
    pub(crate) end_datetime: DateTime,
    pub(crate) is_active: bool,
    #[serde(default)]
    pub(crate) files: StoredSequence<FileMetadata>,
    #[serde(default)]
    pub(crate) terms_and_conditions: Option<String>,
    #[serde(default)]
    pub(crate) rules: Option<String>,
    #[serde(default)]
    pub(crate) promotion_type: Option<PromotionType>,
    #[serde(default)]
    pub(crate) partner_name: Option<String>,
    #[serde(default)]
    pub(crate) terms_file: Option<FileMetadata>,
    #[serde(rename = "createdAt")]
    pub(crate) created_at: Timestamp,
    #[serde(default)]
    pub(crate) claimed: Option<u64>,
}

impl StoredPromotion {
    /// Whether the record predates the files/terms/rules fields or holds
    /// numbers as strings.
    ///
    /// Only these fields decide whether the collection gets written back; the
    /// other defaults are filled in regardless.
    pub(crate) const fn needs_migration(&self) -> bool {
        !self.files.is_present()
            || self.terms_and_conditions.is_none()
            || self.rules.is_none()
            || !self.has_numeric_fields()
    }

    const fn has_numeric_fields(&self) -> bool {
        self.discount_value.is_number()
            && is_stored_as_number(self.min_cart_qty.as_ref())
            && is_stored_as_number(self.max_uses_per_user.as_ref())
            && is_stored_as_number(self.total_uses_limit.as_ref())
    }
}

/// Upgrade a stored promotion to the current record shape.
///
/// Applying this to a record that was already complete yields the same record.
pub(crate) fn migrate(stored: StoredPromotion) -> PromotionRecord {
    let StoredPromotion {
        id,
        name,
        description,
        discount_type,
        discount_value,
        apply_to,
        target_identifiers,
        bundled_product_codes,
        min_cart_qty,
        max_uses_per_user,
        total_uses_limit,
        start_datetime,
        end_datetime,
        is_active,
        files,
        terms_and_conditions,
        rules,
        promotion_type,
        partner_name,
        terms_file,
        created_at,
        claimed,
    } = stored;

    let target_identifiers: ProductCodes = target_identifiers
        .into_present()
        .unwrap_or_default()
        .into_iter()
        .collect();

    // Bundles from before `bundledProductCodes` existed kept their products in
    // `target_identifiers`. Those are copied, not moved.
    let bundled_product_codes: ProductCodes = match bundled_product_codes.into_present() {
        Some(codes) => codes.into_iter().collect(),
        None if apply_to == ApplyTo::Bundle => target_identifiers.clone(),
        None => ProductCodes::new(),
    };

    let partner_name = match (promotion_type, partner_name) {
        (Some(PromotionType::Partner), None) => Some(String::new()),
        (_, partner_name) => partner_name,
    };

    // A blank discount reads as zero, as the form's number input did.
    let discount_value = discount_value.into_value().unwrap_or_default();

    PromotionRecord {
        id,
        name,
        description,
        discount_type,
        discount_value,
        apply_to,
        target_identifiers,
        bundled_product_codes,
        min_cart_qty: min_cart_qty
            .and_then(StoredNumber::into_value)
            .unwrap_or(DEFAULT_MIN_CART_QTY),
        max_uses_per_user: max_uses_per_user
            .and_then(StoredNumber::into_value)
            .unwrap_or(DEFAULT_MAX_USES_PER_USER),
        total_uses_limit: total_uses_limit
            .and_then(StoredNumber::into_value)
            .unwrap_or(DEFAULT_TOTAL_USES_LIMIT),
        start_datetime,
        end_datetime,
        is_active,
        files: files.into_present().unwrap_or_default(),
        terms_and_conditions: terms_and_conditions.unwrap_or_default(),
        rules: rules.unwrap_or_default(),
        promotion_type,
        partner_name,
        terms_file,
        created_at,
        claimed,
    }
}
