//! Inventory Port - Read-only queries over the vehicle stock.
//!
//! The dialogue needs the body types and brands on offer within a budget
//! to build its prompts, the ordered listings matching a full criteria
//! triple, and photo metadata per listing.
//!
//! Implementations must tolerate concurrent readers; every conversation
//! shares one inventory.

use async_trait::async_trait;

use crate::domain::browse::{BudgetBucket, CarImage, CarListing, Preference, ResolvedCriteria};

/// Errors that can occur while querying the inventory
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("Inventory unavailable: {0}")]
    Unavailable(String),

    #[error("Inventory query failed: {0}")]
    QueryFailed(String),

    #[error("Inventory query timed out")]
    Timeout,
}

/// Port for querying the vehicle inventory
#[async_trait]
pub trait InventoryQuery: Send + Sync {
    /// Body types with at least one listing in `budget`, sorted and unique.
    async fn available_types(&self, budget: BudgetBucket) -> Result<Vec<String>, InventoryError>;

    /// Brands with at least one listing in `budget` of `car_type`, sorted
    /// and unique.
    async fn available_brands(
        &self,
        budget: BudgetBucket,
        car_type: &Preference,
    ) -> Result<Vec<String>, InventoryError>;

    /// Listings matching all three criteria, in display order.
    async fn filter_cars(&self, criteria: &ResolvedCriteria)
        -> Result<Vec<CarListing>, InventoryError>;

    /// Photos for one listing, ordered by sequence.
    async fn images_for_car(&self, registration_number: &str)
        -> Result<Vec<CarImage>, InventoryError>;
}
