//! Warehouses and shelf locations

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::error::AppResult;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct LocationDetails {
    pub location_id: i32,
    pub name: String,
    pub warehouse_id: i32,
    pub warehouse_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocationInput {
    #[validate(length(min = 1, message = "Warehouse name is required"))]
    pub warehouse_name: String,

    #[validate(length(min = 1, message = "Location name is required"))]
    pub location_name: String,
}

#[derive(Clone)]
pub struct WarehouseService {
    db: PgPool,
}

impl WarehouseService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a location, reusing the warehouse when one with the same name
    /// already exists.
    pub async fn create_location(&self, input: CreateLocationInput) -> AppResult<i32> {
        input.validate()?;

        let mut tx = self.db.begin().await?;

        let warehouse_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO warehouses (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING warehouse_id
            "#,
        )
        .bind(&input.warehouse_name)
        .fetch_one(&mut *tx)
        .await?;

        let location_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO locations (warehouse_id, name) VALUES ($1, $2) RETURNING location_id",
        )
        .bind(warehouse_id)
        .bind(&input.location_name)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            location_id,
            warehouse = %input.warehouse_name,
            location = %input.location_name,
            "location created"
        );

        Ok(location_id)
    }

    /// Every location with its warehouse name.
    pub async fn list_locations(&self) -> AppResult<Vec<LocationDetails>> {
        let locations = sqlx::query_as::<_, LocationDetails>(
            r#"
            SELECT l.location_id, l.name, l.warehouse_id, w.name AS warehouse_name
            FROM locations l
            JOIN warehouses w ON w.warehouse_id = l.warehouse_id
            ORDER BY w.name, l.name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(locations)
    }

    /// Locations with nothing on them, candidates for a receive or a move.
    pub async fn available_locations(&self) -> AppResult<Vec<LocationDetails>> {
        let locations = sqlx::query_as::<_, LocationDetails>(
            r#"
            SELECT l.location_id, l.name, l.warehouse_id, w.name AS warehouse_name
            FROM locations l
            JOIN warehouses w ON w.warehouse_id = l.warehouse_id
            LEFT JOIN materials m ON m.location_id = l.location_id AND m.quantity > 0
            WHERE m.material_id IS NULL
            ORDER BY w.name, l.name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(locations)
    }
}
