//! App Context

use std::sync::Arc;

use crate::{
    config::StorageConfig,
    domain::{
        products::{DemoProductsService, ProductsService},
        promotions::{LocalPromotionsService, PromotionsService},
    },
    storage::{FileStorage, StorageMedium},
};

/// Services shared by every command.
#[derive(Clone)]
pub struct AppContext {
    /// Promotion store.
    pub promotions: Arc<dyn PromotionsService>,
    /// Product catalog.
    pub products: Arc<dyn ProductsService>,
}

impl AppContext {
    /// Build application context over an existing storage medium.
    #[must_use]
    pub fn from_storage(storage: Arc<dyn StorageMedium>) -> Self {
        Self {
            promotions: Arc::new(LocalPromotionsService::new(storage)),
            products: Arc::new(DemoProductsService::new()),
        }
    }

    /// Build application context backed by the configured storage file.
    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::from_storage(Arc::new(FileStorage::new(&config.storage_path)))
    }
}
