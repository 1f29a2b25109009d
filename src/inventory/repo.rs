use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Units below this count classify an entry as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

pub fn is_low_stock(units_available: i32) -> bool {
    units_available < LOW_STOCK_THRESHOLD
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    pub blood_type: String,
    pub units_available: i32,
    pub expiry_date: Date,
    pub location: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

const COLUMNS: &str = "id, blood_type, units_available, expiry_date, location, last_updated";

pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<InventoryItem>> {
    sqlx::query_as::<_, InventoryItem>(&format!(
        "SELECT {COLUMNS} FROM blood_inventory ORDER BY last_updated DESC"
    ))
    .fetch_all(db)
    .await
}

pub async fn create(
    db: &PgPool,
    blood_type: &str,
    units_available: i32,
    expiry_date: Date,
    location: &str,
) -> sqlx::Result<InventoryItem> {
    sqlx::query_as::<_, InventoryItem>(&format!(
        "INSERT INTO blood_inventory (blood_type, units_available, expiry_date, location) \
         VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
    ))
    .bind(blood_type)
    .bind(units_available)
    .bind(expiry_date)
    .bind(location)
    .fetch_one(db)
    .await
}

/// Merge-patch; any update refreshes `last_updated`.
pub async fn update(
    db: &PgPool,
    id: Uuid,
    blood_type: Option<&str>,
    units_available: Option<i32>,
    expiry_date: Option<Date>,
    location: Option<&str>,
) -> sqlx::Result<Option<InventoryItem>> {
    sqlx::query_as::<_, InventoryItem>(&format!(
        "UPDATE blood_inventory SET \
           blood_type = COALESCE($2, blood_type), \
           units_available = COALESCE($3, units_available), \
           expiry_date = COALESCE($4, expiry_date), \
           location = COALESCE($5, location), \
           last_updated = now() \
         WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(blood_type)
    .bind(units_available)
    .bind(expiry_date)
    .bind(location)
    .fetch_optional(db)
    .await
}

pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM blood_inventory WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn low_stock(db: &PgPool) -> sqlx::Result<Vec<InventoryItem>> {
    sqlx::query_as::<_, InventoryItem>(&format!(
        "SELECT {COLUMNS} FROM blood_inventory WHERE units_available < $1 \
         ORDER BY units_available ASC"
    ))
    .bind(LOW_STOCK_THRESHOLD)
    .fetch_all(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert!(is_low_stock(0));
        assert!(is_low_stock(9));
        assert!(!is_low_stock(10));
        assert!(!is_low_stock(11));
    }
}
