//! Restaurant Repository
//!
//! One row per restaurant; the whole menu tree lives in the `doc` JSON column.
//! Writes of an existing aggregate are conditional on the version that was
//! loaded (optimistic concurrency).

use super::RepoResult;
use shared::models::Restaurant;
use sqlx::SqlitePool;

const SELECT_DOC: &str = "SELECT doc, version FROM restaurants";

#[derive(Clone)]
pub struct RestaurantRepository {
    pool: SqlitePool,
}

impl RestaurantRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new aggregate unless the name is already taken
    ///
    /// The name check and the insert are one statement, so two concurrent
    /// creates with the same name cannot both land. Returns `false` on a
    /// taken name. Renames are not covered.
    pub async fn insert(&self, restaurant: &Restaurant) -> RepoResult<bool> {
        let doc = serde_json::to_string(restaurant)?;
        let result = sqlx::query(
            "INSERT INTO restaurants (id, restaurant_name, doc, version, created_at, updated_at) \
             SELECT ?1, ?2, ?3, ?4, ?5, ?6 \
             WHERE NOT EXISTS (SELECT 1 FROM restaurants WHERE restaurant_name = ?2)",
        )
        .bind(restaurant.id)
        .bind(&restaurant.restaurant_name)
        .bind(doc)
        .bind(restaurant.version)
        .bind(restaurant.created_at)
        .bind(restaurant.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Restaurant>> {
        let row: Option<(String, i64)> = sqlx::query_as(&format!("{SELECT_DOC} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(decode).transpose()
    }

    /// Find the restaurant embedding the given category
    pub async fn find_by_category_id(&self, category_id: i64) -> RepoResult<Option<Restaurant>> {
        let row: Option<(String, i64)> = sqlx::query_as(
            "SELECT r.doc, r.version FROM restaurants r, json_each(r.doc, '$.categories') AS c \
             WHERE json_extract(c.value, '$.id') = ?1 LIMIT 1",
        )
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(decode).transpose()
    }

    /// Exact, case-sensitive name lookup, optionally ignoring one restaurant
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i64>) -> RepoResult<bool> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM restaurants WHERE restaurant_name = ?1 AND (?2 IS NULL OR id != ?2) LIMIT 1",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(found.is_some())
    }

    /// Conditionally write back a loaded aggregate
    ///
    /// Succeeds only if the stored version still equals `restaurant.version`;
    /// on success the in-memory version is advanced. Returns `false` when
    /// another writer got there first.
    pub async fn save(&self, restaurant: &mut Restaurant) -> RepoResult<bool> {
        let expected = restaurant.version;
        restaurant.version = expected + 1;
        let doc = serde_json::to_string(restaurant);
        restaurant.version = expected;
        let doc = doc?;

        let result = sqlx::query(
            "UPDATE restaurants SET restaurant_name = ?1, doc = ?2, version = version + 1, updated_at = ?3 \
             WHERE id = ?4 AND version = ?5",
        )
        .bind(&restaurant.restaurant_name)
        .bind(doc)
        .bind(restaurant.updated_at)
        .bind(restaurant.id)
        .bind(expected)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }
        restaurant.version = expected + 1;
        Ok(true)
    }

    /// Delete an aggregate; returns whether a row was removed
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of restaurants, most recently updated first
    pub async fn find_page(
        &self,
        search: Option<&str>,
        limit: u32,
        offset: u64,
    ) -> RepoResult<Vec<Restaurant>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(&format!(
            "{SELECT_DOC} WHERE (?1 IS NULL OR instr(lower(restaurant_name), lower(?1)) > 0) \
             ORDER BY updated_at DESC, created_at DESC, id DESC LIMIT ?2 OFFSET ?3"
        ))
        .bind(search)
        .bind(i64::from(limit))
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(decode).collect()
    }

    /// All restaurants whose name contains the term (case-insensitive)
    pub async fn search_by_name(&self, term: &str) -> RepoResult<Vec<Restaurant>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(&format!(
            "{SELECT_DOC} WHERE instr(lower(restaurant_name), lower(?1)) > 0 \
             ORDER BY updated_at DESC, created_at DESC, id DESC"
        ))
        .bind(term)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(decode).collect()
    }

    /// Number of restaurants, optionally filtered by name
    /// Distinct logo references across all restaurants
    pub async fn logos(&self) -> RepoResult<Vec<String>> {
        let logos: Vec<Option<String>> = sqlx::query_scalar(
            "SELECT DISTINCT json_extract(doc, '$.logo') FROM restaurants",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(logos.into_iter().flatten().collect())
    }

    pub async fn count(&self, search: Option<&str>) -> RepoResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM restaurants \
             WHERE (?1 IS NULL OR instr(lower(restaurant_name), lower(?1)) > 0)",
        )
        .bind(search)
        .fetch_one(&self.pool)
        .await?;
        Ok(count as u64)
    }

    /// Every aggregate, for full scans
    pub async fn find_all(&self) -> RepoResult<Vec<Restaurant>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(SELECT_DOC).fetch_all(&self.pool).await?;
        rows.into_iter().map(decode).collect()
    }
}

/// The version column is authoritative over the copy inside the document
fn decode((doc, version): (String, i64)) -> RepoResult<Restaurant> {
    let mut restaurant: Restaurant = serde_json::from_str(&doc)?;
    restaurant.version = version;
    Ok(restaurant)
}
