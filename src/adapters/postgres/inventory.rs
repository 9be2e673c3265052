//! PostgreSQL implementation of InventoryQuery.
//!
//! Reads the `cars` and `car_images` tables:
//!
//! ```text
//! cars(id, brand, model, variant, year, fuel_type, price BIGINT,
//!      registration_number, type)
//! car_images(id, car_id -> cars.id, image_path, sequence, image_type)
//! ```

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::browse::{BudgetBucket, CarImage, CarListing, Preference, ResolvedCriteria};
use crate::ports::{InventoryError, InventoryQuery};

/// PostgreSQL implementation of InventoryQuery.
#[derive(Clone)]
pub struct PostgresInventory {
    pool: PgPool,
}

impl PostgresInventory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Bucket bounds as SQL parameters: inclusive min, exclusive optional max.
fn price_params(budget: BudgetBucket) -> (i64, Option<i64>) {
    let (min, max) = budget.price_bounds();
    (
        i64::try_from(min).unwrap_or(i64::MAX),
        max.map(|m| i64::try_from(m).unwrap_or(i64::MAX)),
    )
}

fn query_failed(what: &str, e: sqlx::Error) -> InventoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            InventoryError::Unavailable(format!("Failed to {}: {}", what, e))
        }
        other => InventoryError::QueryFailed(format!("Failed to {}: {}", what, other)),
    }
}

#[async_trait]
impl InventoryQuery for PostgresInventory {
    async fn available_types(&self, budget: BudgetBucket) -> Result<Vec<String>, InventoryError> {
        let (min, max) = price_params(budget);

        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT type
            FROM cars
            WHERE price >= $1
              AND ($2::BIGINT IS NULL OR price < $2)
              AND type IS NOT NULL AND type <> ''
            ORDER BY type
            "#,
        )
        .bind(min)
        .bind(max)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("fetch car types", e))?;

        Ok(rows.into_iter().map(|(t,)| t).collect())
    }

    async fn available_brands(
        &self,
        budget: BudgetBucket,
        car_type: &Preference,
    ) -> Result<Vec<String>, InventoryError> {
        let (min, max) = price_params(budget);

        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT brand
            FROM cars
            WHERE price >= $1
              AND ($2::BIGINT IS NULL OR price < $2)
              AND ($3::TEXT IS NULL OR LOWER(type) = LOWER($3))
            ORDER BY brand
            "#,
        )
        .bind(min)
        .bind(max)
        .bind(car_type.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("fetch brands", e))?;

        Ok(rows.into_iter().map(|(b,)| b).collect())
    }

    async fn filter_cars(
        &self,
        criteria: &ResolvedCriteria,
    ) -> Result<Vec<CarListing>, InventoryError> {
        let (min, max) = price_params(criteria.budget);

        let rows = sqlx::query(
            r#"
            SELECT brand, model, variant, year, fuel_type, price, registration_number, type
            FROM cars
            WHERE price >= $1
              AND ($2::BIGINT IS NULL OR price < $2)
              AND ($3::TEXT IS NULL OR LOWER(type) = LOWER($3))
              AND ($4::TEXT IS NULL OR LOWER(brand) = LOWER($4))
            ORDER BY price ASC, brand, model, variant
            "#,
        )
        .bind(min)
        .bind(max)
        .bind(criteria.car_type.value())
        .bind(criteria.brand.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("filter cars", e))?;

        rows.into_iter().map(row_to_listing).collect()
    }

    async fn images_for_car(
        &self,
        registration_number: &str,
    ) -> Result<Vec<CarImage>, InventoryError> {
        let rows = sqlx::query(
            r#"
            SELECT ci.image_path, ci.sequence, ci.image_type
            FROM car_images ci
            JOIN cars c ON ci.car_id = c.id
            WHERE c.registration_number = $1
              AND (ci.image_type IS NULL
                   OR ci.image_type IN ('front', 'back', 'side', 'interior'))
            ORDER BY ci.sequence NULLS LAST, ci.id
            "#,
        )
        .bind(registration_number)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("fetch car images", e))?;

        rows.into_iter()
            .map(|row| {
                Ok(CarImage {
                    path: row.try_get("image_path").map_err(|e| query_failed("read image_path", e))?,
                    sequence: row.try_get("sequence").map_err(|e| query_failed("read sequence", e))?,
                    image_type: row
                        .try_get("image_type")
                        .map_err(|e| query_failed("read image_type", e))?,
                })
            })
            .collect()
    }
}

fn row_to_listing(row: PgRow) -> Result<CarListing, InventoryError> {
    let get_text = |column: &str| -> Result<String, InventoryError> {
        row.try_get::<Option<String>, _>(column)
            .map(|v| v.unwrap_or_default())
            .map_err(|e| query_failed(&format!("read {}", column), e))
    };

    let price: i64 = row
        .try_get("price")
        .map_err(|e| query_failed("read price", e))?;

    Ok(CarListing {
        brand: get_text("brand")?,
        model: get_text("model")?,
        variant: get_text("variant")?,
        year: row.try_get("year").map_err(|e| query_failed("read year", e))?,
        fuel_type: get_text("fuel_type")?,
        price: u64::try_from(price).unwrap_or(0),
        registration_number: get_text("registration_number")?,
        car_type: get_text("type")?,
    })
}
