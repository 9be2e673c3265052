//! In-Memory Inventory Adapter
//!
//! Holds listings and photos in shared maps. Used by tests and by the
//! binary when no database is configured.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::browse::{BudgetBucket, CarImage, CarListing, Preference, ResolvedCriteria};
use crate::ports::{InventoryError, InventoryQuery};

/// In-memory vehicle stock
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventory {
    cars: Arc<RwLock<Vec<CarListing>>>,
    images: Arc<RwLock<HashMap<String, Vec<CarImage>>>>,
    /// When set, every query fails with this error.
    failure: Arc<RwLock<Option<InventoryError>>>,
    /// When set, only image lookups fail with this error.
    image_failure: Arc<RwLock<Option<InventoryError>>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory pre-loaded with `cars`.
    pub fn with_cars(cars: Vec<CarListing>) -> Self {
        Self {
            cars: Arc::new(RwLock::new(cars)),
            ..Self::default()
        }
    }

    /// Inventory pre-loaded with a small demonstration stock.
    pub fn with_demo_stock() -> Self {
        Self::with_cars(demo_stock())
    }

    pub async fn add_car(&self, car: CarListing) {
        self.cars.write().await.push(car);
    }

    /// Attaches a photo to a listing; photos are kept in sequence order.
    pub async fn add_image(&self, registration_number: &str, image: CarImage) {
        let mut images = self.images.write().await;
        let list = images.entry(registration_number.to_string()).or_default();
        list.push(image);
        list.sort_by_key(|img| img.sequence.unwrap_or(i32::MAX));
    }

    /// Makes every subsequent query fail (`None` restores service).
    pub async fn set_failure(&self, failure: Option<InventoryError>) {
        *self.failure.write().await = failure;
    }

    /// Makes image lookups fail (`None` restores service).
    pub async fn set_image_failure(&self, failure: Option<InventoryError>) {
        *self.image_failure.write().await = failure;
    }

    async fn check(&self) -> Result<(), InventoryError> {
        match self.failure.read().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl InventoryQuery for InMemoryInventory {
    async fn available_types(&self, budget: BudgetBucket) -> Result<Vec<String>, InventoryError> {
        self.check().await?;
        let cars = self.cars.read().await;
        let types: BTreeSet<String> = cars
            .iter()
            .filter(|car| budget.contains_price(car.price))
            .map(|car| car.car_type.clone())
            .filter(|t| !t.trim().is_empty())
            .collect();
        Ok(types.into_iter().collect())
    }

    async fn available_brands(
        &self,
        budget: BudgetBucket,
        car_type: &Preference,
    ) -> Result<Vec<String>, InventoryError> {
        self.check().await?;
        let cars = self.cars.read().await;
        let brands: BTreeSet<String> = cars
            .iter()
            .filter(|car| budget.contains_price(car.price) && car_type.admits(&car.car_type))
            .map(|car| car.brand.clone())
            .collect();
        Ok(brands.into_iter().collect())
    }

    async fn filter_cars(
        &self,
        criteria: &ResolvedCriteria,
    ) -> Result<Vec<CarListing>, InventoryError> {
        self.check().await?;
        let cars = self.cars.read().await;
        let mut matching: Vec<CarListing> = cars
            .iter()
            .filter(|car| {
                criteria.budget.contains_price(car.price)
                    && criteria.car_type.admits(&car.car_type)
                    && criteria.brand.admits(&car.brand)
            })
            .cloned()
            .collect();
        matching.sort_by_key(|car| car.price);
        Ok(matching)
    }

    async fn images_for_car(
        &self,
        registration_number: &str,
    ) -> Result<Vec<CarImage>, InventoryError> {
        self.check().await?;
        if let Some(err) = self.image_failure.read().await.clone() {
            return Err(err);
        }
        Ok(self
            .images
            .read()
            .await
            .get(registration_number)
            .cloned()
            .unwrap_or_default())
    }
}

#[allow(clippy::too_many_arguments)]
fn listing(
    brand: &str,
    model: &str,
    variant: &str,
    year: i32,
    fuel_type: &str,
    price: u64,
    registration_number: &str,
    car_type: &str,
) -> CarListing {
    CarListing {
        brand: brand.to_string(),
        model: model.to_string(),
        variant: variant.to_string(),
        year,
        fuel_type: fuel_type.to_string(),
        price,
        registration_number: registration_number.to_string(),
        car_type: car_type.to_string(),
    }
}

/// Stock served in demo mode.
pub fn demo_stock() -> Vec<CarListing> {
    vec![
        listing("Maruti", "Swift", "VXI", 2019, "Petrol", 450_000, "KA01AB1201", "Hatchback"),
        listing("Hyundai", "i20", "Asta", 2020, "Petrol", 690_000, "KA03MN4521", "Hatchback"),
        listing("Hyundai", "Creta", "SX", 2021, "Diesel", 1_250_000, "KA05JK7788", "SUV"),
        listing("Hyundai", "Venue", "S Plus", 2021, "Petrol", 820_000, "KA02CD9012", "SUV"),
        listing("Tata", "Nexon", "XZ Plus", 2020, "Petrol", 780_000, "KA51EF3344", "SUV"),
        listing("Kia", "Sonet", "HTX", 2022, "Diesel", 950_000, "KA04GH5566", "SUV"),
        listing("Honda", "City", "VX", 2019, "Petrol", 880_000, "KA53PQ2233", "Sedan"),
        listing("Hyundai", "Verna", "SX(O)", 2022, "Petrol", 1_380_000, "KA01RS6677", "Sedan"),
        listing("Mahindra", "XUV700", "AX7", 2022, "Diesel", 2_150_000, "KA09TU8899", "SUV"),
        listing("Toyota", "Innova Crysta", "2.4 GX", 2019, "Diesel", 1_650_000, "KA05VW1122", "MUV"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(budget: BudgetBucket, car_type: Preference, brand: Preference) -> ResolvedCriteria {
        ResolvedCriteria {
            budget,
            car_type,
            brand,
        }
    }

    #[tokio::test]
    async fn types_are_sorted_and_unique_within_budget() {
        let inventory = InMemoryInventory::with_demo_stock();
        let types = inventory
            .available_types(BudgetBucket::From5To10Lakh)
            .await
            .unwrap();
        assert_eq!(types, vec!["Hatchback", "SUV", "Sedan"]);
    }

    #[tokio::test]
    async fn brands_respect_type_preference() {
        let inventory = InMemoryInventory::with_demo_stock();
        let suv = Preference::Only("suv".into());
        let brands = inventory
            .available_brands(BudgetBucket::From5To10Lakh, &suv)
            .await
            .unwrap();
        assert_eq!(brands, vec!["Hyundai", "Kia", "Tata"]);

        let all = inventory
            .available_brands(BudgetBucket::From5To10Lakh, &Preference::Any)
            .await
            .unwrap();
        assert_eq!(all, vec!["Honda", "Hyundai", "Kia", "Tata"]);
    }

    #[tokio::test]
    async fn filter_orders_by_price() {
        let inventory = InMemoryInventory::with_demo_stock();
        let cars = inventory
            .filter_cars(&criteria(BudgetBucket::From5To10Lakh, Preference::Only("SUV".into()), Preference::Any))
            .await
            .unwrap();
        let names: Vec<String> = cars.iter().map(|c| c.display_name()).collect();
        assert_eq!(
            names,
            vec!["Tata Nexon XZ Plus", "Hyundai Venue S Plus", "Kia Sonet HTX"]
        );
    }

    #[tokio::test]
    async fn images_come_back_in_sequence() {
        let inventory = InMemoryInventory::with_demo_stock();
        for seq in [2, 1] {
            inventory
                .add_image(
                    "KA05JK7788",
                    CarImage {
                        path: format!("uploads/KA05JK7788_{}.jpg", seq),
                        sequence: Some(seq),
                        image_type: None,
                    },
                )
                .await;
        }

        let images = inventory.images_for_car("KA05JK7788").await.unwrap();
        assert_eq!(images[0].sequence, Some(1));
        assert!(inventory.images_for_car("NOPE").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn injected_failure_applies_to_all_queries() {
        let inventory = InMemoryInventory::with_demo_stock();
        inventory
            .set_failure(Some(InventoryError::Unavailable("maintenance".into())))
            .await;

        assert!(inventory.available_types(BudgetBucket::Under5Lakh).await.is_err());
        assert!(inventory.images_for_car("KA01AB1201").await.is_err());

        inventory.set_failure(None).await;
        assert!(inventory.available_types(BudgetBucket::Under5Lakh).await.is_ok());
    }
}
