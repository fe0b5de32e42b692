//! Single-slot SQLite store for the last searched city.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use std::{path::Path, sync::Arc};
use tokio::sync::watch;

use crate::{error::WeatherError, model::LastSearchedCity};

/// Persistence for the one remembered city.
///
/// Writes are serialized by the store itself. Observers always see the latest
/// committed record.
#[async_trait]
pub trait CityStore: Send + Sync {
    /// Emits the current value right away, then again on every change.
    fn observe_last_searched(&self) -> watch::Receiver<Option<LastSearchedCity>>;

    /// Insert or replace the record for `city_name`, stamped with the current time.
    async fn upsert(&self, city_name: &str) -> Result<(), WeatherError>;

    /// No-op when nothing matches.
    async fn delete(&self, city_name: &str) -> Result<(), WeatherError>;

    async fn delete_all(&self) -> Result<(), WeatherError>;
}

/// Local SQLite storage for the last searched city
pub struct SqliteCityStore {
    conn: Arc<Mutex<Connection>>,
    latest: Arc<watch::Sender<Option<LastSearchedCity>>>,
}

impl SqliteCityStore {
    /// Open or create the database, creating parent directories as needed.
    pub fn open(path: &Path) -> Result<Self, WeatherError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                WeatherError::Storage(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let conn = Connection::open(path)?;
        tracing::debug!("Opened city store at {}", path.display());
        Self::with_connection(conn)
    }

    /// Store that lives only as long as this value.
    pub fn in_memory() -> Result<Self, WeatherError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, WeatherError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS cities (
                name TEXT PRIMARY KEY,
                last_searched_at INTEGER NOT NULL
            );",
        )?;

        let current = query_latest(&conn)?;
        let (latest, _) = watch::channel(current);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            latest: Arc::new(latest),
        })
    }

    /// Run a write on the blocking pool, then publish the row that is now latest.
    async fn write<F>(&self, op: F) -> Result<(), WeatherError>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<()> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let latest = Arc::clone(&self.latest);

        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock();
            op(&mut *guard)?;
            let current = query_latest(&*guard)?;
            // Published under the connection lock so observers never see writes out of order.
            latest.send_if_modified(|slot| {
                if *slot == current {
                    return false;
                }
                *slot = current;
                true
            });
            Ok::<_, WeatherError>(())
        })
        .await
        .map_err(|e| WeatherError::Storage(format!("Storage task failed: {e}")))?
    }
}

#[async_trait]
impl CityStore for SqliteCityStore {
    fn observe_last_searched(&self) -> watch::Receiver<Option<LastSearchedCity>> {
        self.latest.subscribe()
    }

    async fn upsert(&self, city_name: &str) -> Result<(), WeatherError> {
        let name = city_name.to_string();
        let now = Utc::now().timestamp_millis();

        self.write(move |conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM cities WHERE name <> ?1", params![name])?;
            tx.execute(
                "INSERT OR REPLACE INTO cities (name, last_searched_at) VALUES (?1, ?2)",
                params![name, now],
            )?;
            tx.commit()
        })
        .await?;

        tracing::debug!("Saved last searched city: {}", city_name);
        Ok(())
    }

    async fn delete(&self, city_name: &str) -> Result<(), WeatherError> {
        let name = city_name.to_string();
        self.write(move |conn| {
            conn.execute("DELETE FROM cities WHERE name = ?1", params![name])?;
            Ok(())
        })
        .await?;

        tracing::debug!("Deleted city: {}", city_name);
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), WeatherError> {
        self.write(|conn| {
            conn.execute("DELETE FROM cities", [])?;
            Ok(())
        })
        .await
    }
}

fn query_latest(conn: &Connection) -> rusqlite::Result<Option<LastSearchedCity>> {
    conn.query_row(
        "SELECT name, last_searched_at FROM cities ORDER BY last_searched_at DESC LIMIT 1",
        [],
        |row| {
            Ok(LastSearchedCity {
                name: row.get(0)?,
                last_searched_at: row.get(1)?,
            })
        },
    )
    .optional()
}

#[cfg(test)]
impl SqliteCityStore {
    fn row_count(&self) -> i64 {
        self.conn
            .lock()
            .query_row("SELECT COUNT(*) FROM cities", [], |row| row.get(0))
            .unwrap()
    }
}
