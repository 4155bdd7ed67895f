//! Spending aggregation over the transaction source.

mod spending_service;

pub use spending_service::{SpendingService, SpendingServiceTrait};
