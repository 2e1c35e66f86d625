//! Promotions

pub mod data;
mod errors;
mod migration;
pub mod records;
mod repository;
pub mod service;
pub mod status;
pub mod validation;

pub use errors::PromotionsServiceError;
pub use repository::PROMOTIONS_KEY;
pub use service::*;
