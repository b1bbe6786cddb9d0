//! Repository for the `facilities` table.

use hotel_core::types::DbId;
use sqlx::PgPool;

use crate::models::facility::Facility;

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for facilities.
pub struct FacilityRepo;

impl FacilityRepo {
    /// Insert a facility. A duplicate name violates `uq_facilities_name`.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Facility, sqlx::Error> {
        let query = format!("INSERT INTO facilities (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Facility>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Facility>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM facilities WHERE id = $1");
        sqlx::query_as::<_, Facility>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all facilities ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Facility>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM facilities ORDER BY name");
        sqlx::query_as::<_, Facility>(&query).fetch_all(pool).await
    }

    /// Rename a facility. Returns `None` if no row with the given `id` exists.
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<Facility>, sqlx::Error> {
        let query = format!("UPDATE facilities SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Facility>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a facility. Its room associations cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM facilities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
