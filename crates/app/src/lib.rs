//! PharmaPlus promotions data layer: storage, promotion store and dashboard.

pub mod config;
pub mod context;
pub mod domain;
pub mod format;
pub mod ids;
pub mod observability;
pub mod storage;
