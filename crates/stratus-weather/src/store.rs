//! Coordinate-keyed snapshot store.
//!
//! Keeps one fetched weather payload per exact latitude/longitude pair. A
//! snapshot is written once; later lookups of the same coordinates keep the
//! original row.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::WeatherError;
use crate::types::Coordinates;

/// Result of a store attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Inserted,
    /// A snapshot for these coordinates already exists; nothing was written.
    AlreadyExists,
}

pub struct SnapshotStore {
    conn: Connection,
}

impl SnapshotStore {
    /// Open (or create) the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, WeatherError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store (for testing).
    #[cfg(test)]
    pub fn in_memory() -> Result<Self, WeatherError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), WeatherError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS snapshots (
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                payload TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                PRIMARY KEY (latitude, longitude)
            );
            "#,
        )?;
        Ok(())
    }

    /// Store `payload` for `coords` unless a snapshot already exists there.
    pub fn insert_if_absent(
        &self,
        coords: Coordinates,
        payload: &str,
    ) -> Result<StoreOutcome, WeatherError> {
        let now = Utc::now().timestamp_millis();
        let changed = self.conn.execute(
            r#"
            INSERT OR IGNORE INTO snapshots (latitude, longitude, payload, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![coords.latitude, coords.longitude, payload, now],
        )?;

        Ok(if changed == 0 {
            StoreOutcome::AlreadyExists
        } else {
            StoreOutcome::Inserted
        })
    }

    /// Fetch the stored payload for `coords`, if any.
    pub fn get(&self, coords: Coordinates) -> Result<Option<String>, WeatherError> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM snapshots WHERE latitude = ?1 AND longitude = ?2",
                params![coords.latitude, coords.longitude],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn coords() -> Coordinates {
        Coordinates::new(18.52, 73.86).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let store = SnapshotStore::in_memory().unwrap();

        let outcome = store.insert_if_absent(coords(), r#"{"temp": 21.0}"#).unwrap();
        assert_eq!(outcome, StoreOutcome::Inserted);

        let payload = store.get(coords()).unwrap();
        assert_eq!(payload.as_deref(), Some(r#"{"temp": 21.0}"#));
    }

    #[test]
    fn test_existing_snapshot_is_not_replaced() {
        let store = SnapshotStore::in_memory().unwrap();

        store.insert_if_absent(coords(), "first").unwrap();
        let outcome = store.insert_if_absent(coords(), "second").unwrap();

        assert_eq!(outcome, StoreOutcome::AlreadyExists);
        assert_eq!(store.get(coords()).unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn test_missing_coordinates_return_none() {
        let store = SnapshotStore::in_memory().unwrap();
        let other = Coordinates::new(0.0, 0.0).unwrap();
        assert_eq!(store.get(other).unwrap(), None);
    }

    #[test]
    fn test_store_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshots.db");

        {
            let store = SnapshotStore::open(&path).unwrap();
            store.insert_if_absent(coords(), "persisted").unwrap();
        }

        let store = SnapshotStore::open(&path).unwrap();
        assert_eq!(store.get(coords()).unwrap().as_deref(), Some("persisted"));
    }
}
