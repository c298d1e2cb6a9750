use sqlx::{self, postgres::PgRow, FromRow, PgPool};

use crate::database::error::StoreError;

/// Tenant-scoped reads and deletes shared by every entity table.
///
/// Table and column names come from constants in `PgStore`, never from
/// request input. Every statement carries `tenant_id = $1`.
pub struct Repository<'a, T> {
    table_name: &'static str,
    pool: &'a PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T> Repository<'a, T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table_name: &'static str, pool: &'a PgPool) -> Self {
        Self {
            table_name,
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    /// All rows of the tenant in insertion order
    pub async fn select_any(&self, tenant_id: i64) -> Result<Vec<T>, StoreError> {
        let sql = format!(
            "SELECT * FROM \"{}\" WHERE tenant_id = $1 ORDER BY id",
            self.table_name
        );
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(tenant_id)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn select_one(&self, tenant_id: i64, id: i64) -> Result<Option<T>, StoreError> {
        let sql = format!(
            "SELECT * FROM \"{}\" WHERE tenant_id = $1 AND id = $2",
            self.table_name
        );
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// Returns whether a row was removed
    pub async fn delete(&self, tenant_id: i64, id: i64) -> Result<bool, StoreError> {
        let sql = format!(
            "DELETE FROM \"{}\" WHERE tenant_id = $1 AND id = $2",
            self.table_name
        );
        let result = sqlx::query(&sql)
            .bind(tenant_id)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Rows of the tenant whose `column` equals `value`
    pub async fn count_where(
        &self,
        tenant_id: i64,
        column: &'static str,
        value: i64,
    ) -> Result<i64, StoreError> {
        let sql = format!(
            "SELECT COUNT(*) FROM \"{}\" WHERE tenant_id = $1 AND \"{}\" = $2",
            self.table_name, column
        );
        let (count,): (i64,) = sqlx::query_as(&sql)
            .bind(tenant_id)
            .bind(value)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
