/**
 * Location Storage
 *
 * Data access for the `locations` table. Two backends share one interface:
 * PostgreSQL through `sqlx` when a database is configured, and an in-memory
 * table otherwise (development and tests).
 *
 * Lookups return `Option`; turning a missing row into a failure is the
 * caller's decision. Writes report duplicate codes and unknown ids as
 * invalid-argument failures.
 */

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::backend::error::FailureEvent;
use crate::shared::location::{Location, NewLocation};
use crate::shared::page::{Direction, Page, PageRequest};

const SELECT_COLUMNS: &str = "id, name, country, city, location_code, created_at";

#[derive(sqlx::FromRow)]
struct LocationRow {
    id: i64,
    name: String,
    country: String,
    city: String,
    location_code: String,
    created_at: DateTime<Utc>,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            country: row.country,
            city: row.city,
            location_code: row.location_code,
            created_at: row.created_at,
        }
    }
}

/// Error for a missing location, keyed by id or code
pub fn not_found(key: impl std::fmt::Display) -> FailureEvent {
    FailureEvent::invalid_argument(format!("Location not found: {}", key))
}

fn duplicate_code(code: &str) -> FailureEvent {
    FailureEvent::invalid_argument(format!("Location with code '{}' already exists", code))
}

fn to_i64(value: u64) -> Result<i64, FailureEvent> {
    i64::try_from(value).map_err(|_| FailureEvent::invalid_argument("Page index is too large"))
}

/// Map a unique-constraint violation to the duplicate-code failure
fn map_write_error(err: sqlx::Error, code: &str) -> FailureEvent {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => duplicate_code(code),
        _ => err.into(),
    }
}

/// Rows of the in-memory backend
#[derive(Debug, Default)]
pub struct MemoryTable {
    next_id: i64,
    rows: BTreeMap<i64, Location>,
}

impl MemoryTable {
    fn code_taken(&self, code: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|row| row.location_code == code && Some(row.id) != except)
    }
}

/// Location repository
#[derive(Clone, Debug)]
pub enum LocationStore {
    Postgres(PgPool),
    Memory(Arc<RwLock<MemoryTable>>),
}

impl LocationStore {
    pub fn postgres(pool: PgPool) -> Self {
        Self::Postgres(pool)
    }

    pub fn in_memory() -> Self {
        Self::Memory(Arc::new(RwLock::new(MemoryTable::default())))
    }

    /// One page of locations, ordered by the request's sort property
    pub async fn find_all(&self, request: &PageRequest) -> Result<Page<Location>, FailureEvent> {
        let column = Location::sort_column(&request.sort().property)?;

        match self {
            Self::Postgres(pool) => {
                let sql = format!(
                    "SELECT {} FROM locations ORDER BY {} {}, id ASC LIMIT $1 OFFSET $2",
                    SELECT_COLUMNS,
                    column,
                    request.sort().direction.as_sql()
                );
                let rows = sqlx::query_as::<_, LocationRow>(&sql)
                    .bind(to_i64(request.size())?)
                    .bind(to_i64(request.offset())?)
                    .fetch_all(pool)
                    .await?;
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
                    .fetch_one(pool)
                    .await?;

                let content = rows.into_iter().map(Location::from).collect();
                Ok(Page::new(content, request, total.max(0) as u64))
            }
            Self::Memory(table) => {
                let table = table.read().await;
                let mut rows: Vec<Location> = table.rows.values().cloned().collect();
                rows.sort_by(|a, b| {
                    let ordering = match column {
                        "name" => a.name.cmp(&b.name),
                        "country" => a.country.cmp(&b.country),
                        "city" => a.city.cmp(&b.city),
                        "location_code" => a.location_code.cmp(&b.location_code),
                        _ => a.id.cmp(&b.id),
                    };
                    let directed = match request.sort().direction {
                        Direction::Asc => ordering,
                        Direction::Desc => ordering.reverse(),
                    };
                    directed.then(a.id.cmp(&b.id))
                });

                let total = rows.len() as u64;
                let content = rows
                    .into_iter()
                    .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
                    .take(usize::try_from(request.size()).unwrap_or(usize::MAX))
                    .collect();
                Ok(Page::new(content, request, total))
            }
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Location>, FailureEvent> {
        match self {
            Self::Postgres(pool) => {
                let sql = format!("SELECT {} FROM locations WHERE id = $1", SELECT_COLUMNS);
                let row = sqlx::query_as::<_, LocationRow>(&sql)
                    .bind(id)
                    .fetch_optional(pool)
                    .await?;
                Ok(row.map(Location::from))
            }
            Self::Memory(table) => Ok(table.read().await.rows.get(&id).cloned()),
        }
    }

    pub async fn find_by_location_code(
        &self,
        code: &str,
    ) -> Result<Option<Location>, FailureEvent> {
        match self {
            Self::Postgres(pool) => {
                let sql = format!(
                    "SELECT {} FROM locations WHERE location_code = $1",
                    SELECT_COLUMNS
                );
                let row = sqlx::query_as::<_, LocationRow>(&sql)
                    .bind(code)
                    .fetch_optional(pool)
                    .await?;
                Ok(row.map(Location::from))
            }
            Self::Memory(table) => Ok(table
                .read()
                .await
                .rows
                .values()
                .find(|row| row.location_code == code)
                .cloned()),
        }
    }

    pub async fn insert(&self, location: NewLocation) -> Result<Location, FailureEvent> {
        match self {
            Self::Postgres(pool) => {
                let sql = format!(
                    "INSERT INTO locations (name, country, city, location_code) \
                     VALUES ($1, $2, $3, $4) RETURNING {}",
                    SELECT_COLUMNS
                );
                let row = sqlx::query_as::<_, LocationRow>(&sql)
                    .bind(&location.name)
                    .bind(&location.country)
                    .bind(&location.city)
                    .bind(&location.location_code)
                    .fetch_one(pool)
                    .await
                    .map_err(|e| map_write_error(e, &location.location_code))?;
                Ok(row.into())
            }
            Self::Memory(table) => {
                let mut table = table.write().await;
                if table.code_taken(&location.location_code, None) {
                    return Err(duplicate_code(&location.location_code));
                }
                table.next_id += 1;
                let stored = Location {
                    id: table.next_id,
                    name: location.name,
                    country: location.country,
                    city: location.city,
                    location_code: location.location_code,
                    created_at: Utc::now(),
                };
                table.rows.insert(stored.id, stored.clone());
                Ok(stored)
            }
        }
    }

    pub async fn update(&self, id: i64, location: NewLocation) -> Result<Location, FailureEvent> {
        match self {
            Self::Postgres(pool) => {
                let sql = format!(
                    "UPDATE locations SET name = $1, country = $2, city = $3, location_code = $4 \
                     WHERE id = $5 RETURNING {}",
                    SELECT_COLUMNS
                );
                let row = sqlx::query_as::<_, LocationRow>(&sql)
                    .bind(&location.name)
                    .bind(&location.country)
                    .bind(&location.city)
                    .bind(&location.location_code)
                    .bind(id)
                    .fetch_optional(pool)
                    .await
                    .map_err(|e| map_write_error(e, &location.location_code))?;
                row.map(Location::from).ok_or_else(|| not_found(id))
            }
            Self::Memory(table) => {
                let mut table = table.write().await;
                if !table.rows.contains_key(&id) {
                    return Err(not_found(id));
                }
                if table.code_taken(&location.location_code, Some(id)) {
                    return Err(duplicate_code(&location.location_code));
                }
                let row = table.rows.get_mut(&id).ok_or_else(|| not_found(id))?;
                row.name = location.name;
                row.country = location.country;
                row.city = location.city;
                row.location_code = location.location_code;
                Ok(row.clone())
            }
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), FailureEvent> {
        let removed = match self {
            Self::Postgres(pool) => {
                sqlx::query("DELETE FROM locations WHERE id = $1")
                    .bind(id)
                    .execute(pool)
                    .await?
                    .rows_affected()
                    > 0
            }
            Self::Memory(table) => table.write().await.rows.remove(&id).is_some(),
        };

        if removed {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}
