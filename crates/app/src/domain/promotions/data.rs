//! Promotions Data

use jiff::{Timestamp, civil::DateTime};

use crate::domain::promotions::records::{
    ApplyTo, DiscountType, FileMetadata, ProductCodes, PromotionId, PromotionRecord,
    PromotionType,
};

/// Default minimum cart quantity for new and migrated promotions.
pub const DEFAULT_MIN_CART_QTY: u32 = 1;

/// Default per-user redemption cap for new and migrated promotions.
pub const DEFAULT_MAX_USES_PER_USER: u32 = 100;

/// Default overall redemption cap for new and migrated promotions.
pub const DEFAULT_TOTAL_USES_LIMIT: u32 = 10_000;

/// New Promotion Data
///
/// Everything a promotion carries before it has been persisted: no id and
/// no creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotion {
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
    pub promotion_type: Option<PromotionType>,
    /// Partner running the promotion, when the promotion type is partner.
    pub partner_name: Option<String>,
    /// Terms and conditions document, metadata only.
    pub terms_file: Option<FileMetadata>,
    /// Redemptions so far, when known.
    pub claimed: Option<u64>,
}

impl NewPromotion {
    /// A promotion with the create form's defaults: percentage discount on
    /// products, active, running for thirty days from `start`.
    #[must_use]
    pub fn with_defaults(name: impl Into<String>, start: DateTime) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            discount_type: DiscountType::Percentage,
            discount_value: 0.0,
            apply_to: ApplyTo::Product,
            target_identifiers: ProductCodes::new(),
            bundled_product_codes: ProductCodes::new(),
            min_cart_qty: DEFAULT_MIN_CART_QTY,
            max_uses_per_user: DEFAULT_MAX_USES_PER_USER,
            total_uses_limit: DEFAULT_TOTAL_USES_LIMIT,
            start_datetime: start,
            end_datetime: start.saturating_add(jiff::Span::new().days(30)),
            is_active: true,
            files: Vec::new(),
            terms_and_conditions: String::new(),
            rules: String::new(),
            promotion_type: None,
            partner_name: None,
            terms_file: None,
            claimed: None,
        }
    }

    /// Attach an id and creation time, producing the record to persist.
    #[must_use]
    pub fn into_record(self, id: PromotionId, created_at: Timestamp) -> PromotionRecord {
        PromotionRecord {
            id,
            name: self.name,
            description: self.description,
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            apply_to: self.apply_to,
            target_identifiers: self.target_identifiers,
            bundled_product_codes: self.bundled_product_codes,
            min_cart_qty: self.min_cart_qty,
            max_uses_per_user: self.max_uses_per_user,
            total_uses_limit: self.total_uses_limit,
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            is_active: self.is_active,
            files: self.files,
            terms_and_conditions: self.terms_and_conditions,
            rules: self.rules,
            promotion_type: self.promotion_type,
            partner_name: self.partner_name,
            terms_file: self.terms_file,
            created_at,
            claimed: self.claimed,
        }
    }
}
