//! Promotions Repository

use std::sync::Arc;

use tracing::debug;

use crate::{
    domain::promotions::{
        PromotionsServiceError, migration::StoredPromotion, records::PromotionRecord,
    },
    storage::StorageMedium,
};

/// Storage key holding the serialized promotion collection.
pub const PROMOTIONS_KEY: &str = "pharmaplus_promotions";

#[derive(Debug, Clone)]
pub(crate) struct LocalPromotionsRepository {
    storage: Arc<dyn StorageMedium>,
}

impl LocalPromotionsRepository {
    #[must_use]
    pub(crate) fn new(storage: Arc<dyn StorageMedium>) -> Self {
        Self { storage }
    }

    /// Read and decode the whole collection. `None` when nothing is stored.
    pub(crate) fn read_promotions(
        &self,
    ) -> Result<Option<Vec<StoredPromotion>>, PromotionsServiceError> {
        let Some(raw) = self.storage.get(PROMOTIONS_KEY)? else {
            return Ok(None);
        };

        let promotions: Vec<StoredPromotion> =
            serde_json::from_str(&raw).map_err(PromotionsServiceError::Decode)?;

        debug!(count = promotions.len(), "read stored promotions");

        Ok(Some(promotions))
    }

    /// Encode and write the whole collection, replacing what was stored.
    pub(crate) fn write_promotions(
        &self,
        promotions: &[PromotionRecord],
    ) -> Result<(), PromotionsServiceError> {
        let raw = serde_json::to_string(promotions).map_err(PromotionsServiceError::Encode)?;

        self.storage.set(PROMOTIONS_KEY, raw)?;

        debug!(count = promotions.len(), "wrote promotions");

        Ok(())
    }
}
