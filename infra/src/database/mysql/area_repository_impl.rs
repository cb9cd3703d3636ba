//! MySQL implementation of the AreaRepository trait.
//!
//! Reads the `tb_areas` table:
//!
//! ```sql
//! CREATE TABLE tb_areas (
//!     id        BIGINT PRIMARY KEY,
//!     name      VARCHAR(20) NOT NULL,
//!     parent_id BIGINT NULL,
//!     FOREIGN KEY (parent_id) REFERENCES tb_areas (id) ON DELETE SET NULL
//! );
//! ```

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use mall_core::domain::entities::area::Area;
use mall_core::errors::DomainError;
use mall_core::repositories::AreaRepository;

/// MySQL implementation of AreaRepository
pub struct MySqlAreaRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAreaRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Area entity
    fn row_to_area(row: &sqlx::mysql::MySqlRow) -> Result<Area, DomainError> {
        Ok(Area {
            id: row.try_get("id").map_err(db_error)?,
            name: row.try_get("name").map_err(db_error)?,
            parent_id: row.try_get::<Option<i64>, _>("parent_id").map_err(db_error)?,
        })
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: e.to_string(),
    }
}

#[async_trait]
impl AreaRepository for MySqlAreaRepository {
    async fn find_provinces(&self) -> Result<Vec<Area>, DomainError> {
        let rows = sqlx::query("SELECT id, name, parent_id FROM tb_areas WHERE parent_id IS NULL ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to query provinces");
                db_error(e)
            })?;

        rows.iter().map(Self::row_to_area).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Area>, DomainError> {
        let row = sqlx::query("SELECT id, name, parent_id FROM tb_areas WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(area_id = id, error = %e, "Failed to query area");
                db_error(e)
            })?;

        row.as_ref().map(Self::row_to_area).transpose()
    }

    async fn find_children(&self, parent_id: i64) -> Result<Vec<Area>, DomainError> {
        let rows = sqlx::query("SELECT id, name, parent_id FROM tb_areas WHERE parent_id = ? ORDER BY id")
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(parent_id, error = %e, "Failed to query sub areas");
                db_error(e)
            })?;

        rows.iter().map(Self::row_to_area).collect()
    }
}
