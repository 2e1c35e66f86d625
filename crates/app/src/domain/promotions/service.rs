//! Promotions Service

use std::sync::Arc;

use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, debug, info, warn};

use crate::{
    domain::promotions::{
        PromotionsServiceError,
        data::NewPromotion,
        migration::{StoredPromotion, migrate},
        records::{PromotionId, PromotionRecord},
        repository::LocalPromotionsRepository,
    },
    storage::StorageMedium,
};

/// Promotion store over a [`StorageMedium`].
#[derive(Debug, Clone)]
pub struct LocalPromotionsService {
    promotions: LocalPromotionsRepository,
}

impl LocalPromotionsService {
    /// A store reading and writing through `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageMedium>) -> Self {
        Self {
            promotions: LocalPromotionsRepository::new(storage),
        }
    }

    fn load(&self) -> Result<Vec<PromotionRecord>, PromotionsServiceError> {
        let Some(stored) = self.promotions.read_promotions()? else {
            return Ok(Vec::new());
        };

        let needs_migration = stored.iter().any(StoredPromotion::needs_migration);

        let promotions: Vec<PromotionRecord> = stored.into_iter().map(migrate).collect();

        if needs_migration {
            self.promotions.write_promotions(&promotions)?;

            info!(count = promotions.len(), "migrated stored promotions");
        }

        Ok(promotions)
    }
}

/// Pick an id from the clock that no record in `existing` already uses.
fn next_promotion_id(now: Timestamp, existing: &[PromotionRecord]) -> PromotionId {
    let mut candidate = PromotionId::from_clock(now);
    let mut millis = now.as_millisecond();

    while existing.iter().any(|p| p.id == candidate) {
        millis = millis.saturating_add(1);
        candidate = PromotionId::new(millis.to_string());
    }

    candidate
}

impl PromotionsService for LocalPromotionsService {
    #[tracing::instrument(
        name = "promotions.service.load_all",
        skip(self),
        fields(count = tracing::field::Empty),
        err
    )]
    fn load_all(&self) -> Result<Vec<PromotionRecord>, PromotionsServiceError> {
        let promotions = self.load()?;

        Span::current().record("count", promotions.len());

        Ok(promotions)
    }

    #[tracing::instrument(
        name = "promotions.service.find_by_id",
        skip(self),
        fields(promotion_id = %id),
        err
    )]
    fn find_by_id(
        &self,
        id: &PromotionId,
    ) -> Result<Option<PromotionRecord>, PromotionsServiceError> {
        let promotion = self.load()?.into_iter().find(|p| p.id == *id);

        if promotion.is_none() {
            debug!("promotion not found");
        }

        Ok(promotion)
    }

    #[tracing::instrument(
        name = "promotions.service.save",
        skip(self, promotion),
        fields(promotion_id = tracing::field::Empty, apply_to = promotion.apply_to.as_str()),
        err
    )]
    fn save(&self, promotion: NewPromotion) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut promotions = self.load()?;

        let now = Timestamp::now();
        let id = next_promotion_id(now, &promotions);

        Span::current().record("promotion_id", tracing::field::display(&id));

        let record = promotion.into_record(id, now);

        promotions.push(record.clone());

        self.promotions.write_promotions(&promotions)?;

        info!(promotion_id = %record.id, "created promotion");

        Ok(record)
    }

    #[tracing::instrument(
        name = "promotions.service.remove",
        skip(self),
        fields(promotion_id = %id, removed = tracing::field::Empty),
        err
    )]
    fn remove(&self, id: &PromotionId) -> Result<(), PromotionsServiceError> {
        let mut promotions = self.load()?;
        let before = promotions.len();

        promotions.retain(|p| p.id != *id);

        let removed = before - promotions.len();

        Span::current().record("removed", removed);

        self.promotions.write_promotions(&promotions)?;

        info!(promotion_id = %id, removed, "removed promotion");

        Ok(())
    }

    #[tracing::instrument(
        name = "promotions.service.update",
        skip(self, promotion),
        fields(promotion_id = %promotion.id),
        err
    )]
    fn update(&self, promotion: PromotionRecord) -> Result<(), PromotionsServiceError> {
        let mut promotions = self.load()?;

        let Some(existing) = promotions.iter_mut().find(|p| p.id == promotion.id) else {
            warn!(promotion_id = %promotion.id, "promotion not found, nothing updated");

            return Ok(());
        };

        let created_at = existing.created_at;

        *existing = PromotionRecord {
            created_at,
            ..promotion
        };

        self.promotions.write_promotions(&promotions)?;

        info!("updated promotion");

        Ok(())
    }
}

/// Persistent promotion collection.
///
/// Every mutation reads the whole collection and writes the whole collection
/// back. Concurrent writers can overwrite each other's changes.
#[automock]
pub trait PromotionsService: Send + Sync {
    /// Load every stored promotion, migrating older records when needed.
    ///
    /// An empty store yields an empty list.
    fn load_all(&self) -> Result<Vec<PromotionRecord>, PromotionsServiceError>;

    /// Find the first promotion with the given id.
    fn find_by_id(
        &self,
        id: &PromotionId,
    ) -> Result<Option<PromotionRecord>, PromotionsServiceError>;

    /// Persist a new promotion, assigning its id and creation time.
    ///
    /// No validation is performed.
    fn save(&self, promotion: NewPromotion) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Remove every promotion with the given id. Unknown ids are ignored.
    fn remove(&self, id: &PromotionId) -> Result<(), PromotionsServiceError>;

    /// Replace a stored promotion, keeping its original creation time.
    ///
    /// Does nothing when no promotion has the record's id.
    fn update(&self, promotion: PromotionRecord) -> Result<(), PromotionsServiceError>;
}
