//! Promotions Records

use jiff::{Timestamp, civil::DateTime};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::ids::TypedId;

/// Promotion Id
pub type PromotionId = TypedId<PromotionRecord>;

/// Ordered list of product codes.
pub type ProductCodes = SmallVec<[String; 4]>;

/// How the discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// Percentage off the price.
    Percentage,
    /// Fixed amount off the price.
    Fixed,
}

impl DiscountType {
    /// Literal written to storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "PERCENTAGE",
            Self::Fixed => "FIXED",
        }
    }
}

/// What the promotion targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplyTo {
    /// Individual products, listed in `target_identifiers`.
    Product,

    /// A fixed bundle, listed in `bundled_product_codes`.
    Bundle,
}

impl ApplyTo {
    /// Literal written to storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "PRODUCT",
            Self::Bundle => "BUNDLE",
        }
    }
}

/// Who runs the promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionType {
    /// Run by PharmaPlus itself.
    Pharmaplus,
    /// Run with a partner brand.
    Partner,
}

impl PromotionType {
    /// Literal written to storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pharmaplus => "PHARMAPLUS",
            Self::Partner => "PARTNER",
        }
    }
}

/// Metadata for an attached file. File contents are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type, stored as `type`.
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Promotion Record
///
/// Field names on the wire follow the keys the admin dashboard has always
/// written, which mix snake case and camel case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionRecord {
    /// Unique within the collection.
    pub id: PromotionId,
    /// Display name.
    pub name: String,
    /// Shown under the name on the list and detail pages.
    pub description: String,
    /// How `discount_value` is applied.
    pub discount_type: DiscountType,
    /// Percentage or fixed amount, depending on `discount_type`.
    pub discount_value: f64,
    /// Whether the promotion targets products or a bundle.
    pub apply_to: ApplyTo,
    /// Product codes targeted when applying to products.
    pub target_identifiers: ProductCodes,
    /// Product codes in the bundle when applying to a bundle.
    #[serde(rename = "bundledProductCodes")]
    pub bundled_product_codes: ProductCodes,
    /// Minimum cart quantity before the discount applies.
    pub min_cart_qty: u32,
    /// Redemptions allowed per customer.
    pub max_uses_per_user: u32,
    /// Redemptions allowed overall.
    pub total_uses_limit: u32,
    /// Local start time.
    pub start_datetime: DateTime,
    /// Local end time.
    pub end_datetime: DateTime,
    /// Switched on by an operator.
    pub is_active: bool,
    /// Attached files, metadata only.
    pub files: Vec<FileMetadata>,
    /// Free text, possibly empty.
    pub terms_and_conditions: String,
    /// Free text, possibly empty.
    pub rules: String,
    /// Who runs the promotion, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_type: Option<PromotionType>,
    /// Partner running the promotion, when the promotion type is partner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_name: Option<String>,
    /// Terms and conditions document, metadata only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_file: Option<FileMetadata>,
    /// Set once when the promotion is first saved.
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    /// Redemptions so far, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed: Option<u64>,
}

impl PromotionRecord {
    /// Product codes the promotion actually applies to, per `apply_to`.
    #[must_use]
    pub fn product_codes(&self) -> &[String] {
        match self.apply_to {
            ApplyTo::Product => &self.target_identifiers,
            ApplyTo::Bundle => &self.bundled_product_codes,
        }
    }
}
