//! PharmaPlus Domain Concerns

pub mod dashboard;
pub mod products;
pub mod promotions;
