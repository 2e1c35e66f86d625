//! Dashboard summary over the promotion collection.

use jiff::civil::DateTime;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::domain::promotions::{
    PromotionsService, PromotionsServiceError,
    records::{ApplyTo, PromotionRecord, PromotionType},
    status::PromotionStatus,
};

/// Counts shown on the dashboard landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Every stored promotion.
    pub total: usize,
    /// Active and within their schedule.
    pub active: usize,
    /// Active, not started yet.
    pub scheduled: usize,
    /// Active, past their end.
    pub expired: usize,
    /// Switched off, whatever their schedule.
    pub inactive: usize,
    /// Promotions applying to individual products.
    pub product_promotions: usize,
    /// Promotions applying to bundles.
    pub bundle_promotions: usize,
    /// Promotions run with a partner.
    pub partner_promotions: usize,
    /// Sum of known redemptions.
    pub total_claimed: u64,
    /// Promotions per targeted product code.
    pub promotions_per_product: FxHashMap<String, usize>,
}

impl DashboardSummary {
    /// Count `promotions` as of `now`.
    #[must_use]
    pub fn from_promotions(promotions: &[PromotionRecord], now: DateTime) -> Self {
        let mut summary = Self {
            total: promotions.len(),
            ..Self::default()
        };

        for promotion in promotions {
            match promotion.status(now) {
                PromotionStatus::Active => summary.active += 1,
                PromotionStatus::Scheduled => summary.scheduled += 1,
                PromotionStatus::Expired => summary.expired += 1,
                PromotionStatus::Inactive => summary.inactive += 1,
            }

            match promotion.apply_to {
                ApplyTo::Product => summary.product_promotions += 1,
                ApplyTo::Bundle => summary.bundle_promotions += 1,
            }

            if promotion.promotion_type == Some(PromotionType::Partner) {
                summary.partner_promotions += 1;
            }

            summary.total_claimed = summary
                .total_claimed
                .saturating_add(promotion.claimed.unwrap_or_default());

            for code in promotion.product_codes() {
                *summary
                    .promotions_per_product
                    .entry(code.clone())
                    .or_default() += 1;
            }
        }

        summary
    }
}

/// Load every promotion and summarise it as of `now`.
///
/// # Errors
///
/// Returns an error when the promotions cannot be loaded.
pub fn summarize(
    promotions: &dyn PromotionsService,
    now: DateTime,
) -> Result<DashboardSummary, PromotionsServiceError> {
    let records = promotions.load_all()?;

    let summary = DashboardSummary::from_promotions(&records, now);

    debug!(total = summary.total, active = summary.active, "built dashboard summary");

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::domain::promotions::{
        MockPromotionsService, data::NewPromotion, records::PromotionId,
    };

    use super::*;

    fn record(id: &str, start_month: i8, end_month: i8) -> PromotionRecord {
        let start = date(2030, start_month, 1).at(0, 0, 0, 0);
        let mut promotion = NewPromotion::with_defaults(format!("Promotion {id}"), start);

        promotion.end_datetime = date(2030, end_month, 1).at(0, 0, 0, 0);
        promotion.target_identifiers = smallvec!["A0001".to_string()];

        promotion.into_record(PromotionId::new(id), Timestamp::UNIX_EPOCH)
    }

    fn now() -> DateTime {
        date(2030, 6, 15).at(0, 0, 0, 0)
    }

    #[test]
    fn empty_collection_summarises_to_zero() {
        assert_eq!(
            DashboardSummary::from_promotions(&[], now()),
            DashboardSummary::default()
        );
    }

    #[test]
    fn counts_by_status_and_type() {
        let active = record("1", 6, 7);
        let scheduled = record("2", 7, 8);
        let expired = record("3", 1, 2);

        let mut inactive = record("4", 6, 7);
        inactive.is_active = false;

        let mut bundle = record("5", 6, 7);
        bundle.apply_to = ApplyTo::Bundle;
        bundle.bundled_product_codes = smallvec!["A0001".to_string(), "B0001".to_string()];
        bundle.promotion_type = Some(PromotionType::Partner);
        bundle.claimed = Some(12);

        let summary = DashboardSummary::from_promotions(
            &[active, scheduled, expired, inactive, bundle],
            now(),
        );

        assert_eq!(summary.total, 5);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.scheduled, 1);
        assert_eq!(summary.expired, 1);
        assert_eq!(summary.inactive, 1);
        assert_eq!(summary.product_promotions, 4);
        assert_eq!(summary.bundle_promotions, 1);
        assert_eq!(summary.partner_promotions, 1);
        assert_eq!(summary.total_claimed, 12);
        assert_eq!(summary.promotions_per_product.get("A0001"), Some(&5));
        assert_eq!(summary.promotions_per_product.get("B0001"), Some(&1));
    }

    #[test]
    fn summarize_loads_from_service() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_load_all()
            .times(1)
            .returning(|| Ok(vec![record("1", 6, 7)]));

        let summary = summarize(&promotions, now())?;

        assert_eq!(summary.total, 1);
        assert_eq!(summary.active, 1);

        Ok(())
    }

    #[test]
    fn summarize_propagates_load_errors() {
        let mut promotions = MockPromotionsService::new();

        promotions.expect_load_all().returning(|| {
            Err(PromotionsServiceError::Decode(
                <serde_json::Error as serde::de::Error>::custom("bad data"),
            ))
        });

        let result = summarize(&promotions, now());

        assert!(
            matches!(result, Err(PromotionsServiceError::Decode(_))),
            "expected Decode, got {result:?}"
        );
    }
}
