//! Record store for garilink.
//!
//! This module provides the `SQLite`-backed per-entity-type record store.
//! Each entity type owns one namespace, persisted as a JSON-serialized array
//! under a single row; every mutation is a read-modify-rewrite of the whole
//! list. Callers are single-threaded and issue one operation at a time, so
//! the discipline is last-writer-wins on a full-list rewrite.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Default record count past which a namespace triggers a growth warning.
const DEFAULT_WARN_THRESHOLD: usize = 10_000;

/// A persistable entity owned by one record-store namespace.
///
/// Ids are opaque generated strings; a freshly constructed entity carries an
/// empty id until [`RecordStore::add`] assigns one.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    /// The storage key this entity type is persisted under.
    const NAMESPACE: &'static str;

    /// The entity's id (empty until assigned by the store).
    fn id(&self) -> &str;

    /// Assign a generated id to this entity.
    fn assign_id(&mut self, id: String);
}

/// Per-entity-type persisted record store.
///
/// Provides CRUD over JSON lists keyed by entity-type namespace:
/// - `add` assigns a generated id, appends, and rewrites the list
/// - `update` replaces in place by id and fails if the id is absent
/// - `remove` filters the entry out and no-ops if the id was absent
/// - `list`/`list_where` read the full list, preserving insertion order
#[derive(Debug)]
pub struct RecordStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
    /// List size past which mutations log a growth warning.
    warn_threshold: usize,
}

impl RecordStore {
    /// Open or create a record store database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        // Initialize schema
        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self {
            path,
            conn,
            warn_threshold: DEFAULT_WARN_THRESHOLD,
        })
    }

    /// Create an in-memory record store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
            warn_threshold: DEFAULT_WARN_THRESHOLD,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Override the list-size warning threshold.
    pub fn set_warn_threshold(&mut self, threshold: usize) {
        self.warn_threshold = threshold;
    }

    /// Read the full persisted list for a namespace.
    ///
    /// An absent namespace reads as an empty list.
    fn read_list<T: Entity>(&self) -> Result<Vec<T>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM records WHERE namespace = ?1",
                [T::NAMESPACE],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Rewrite the full persisted list for a namespace.
    ///
    /// Serialization happens before the write, so a serialization failure
    /// leaves the previously persisted value untouched.
    fn write_list<T: Entity>(&self, list: &[T]) -> Result<()> {
        if list.len() > self.warn_threshold {
            warn!(
                namespace = T::NAMESPACE,
                count = list.len(),
                "namespace has grown large; full-list rewrites will be slow"
            );
        }

        let json = serde_json::to_string(list)?;
        self.conn.execute(
            r"
            INSERT INTO records (namespace, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(namespace) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
            params![T::NAMESPACE, json],
        )?;
        Ok(())
    }

    /// List all records in the entity's namespace, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read or deserialization fails.
    pub fn list<T: Entity>(&self) -> Result<Vec<T>> {
        self.read_list()
    }

    /// List records matching a predicate, preserving insertion order.
    ///
    /// This is how foreign-key filtering is expressed (e.g., all maintenance
    /// records whose vehicle id matches a given parent id).
    ///
    /// # Errors
    ///
    /// Returns an error if the database read or deserialization fails.
    pub fn list_where<T, F>(&self, pred: F) -> Result<Vec<T>>
    where
        T: Entity,
        F: Fn(&T) -> bool,
    {
        let mut list = self.read_list::<T>()?;
        list.retain(|entry| pred(entry));
        Ok(list)
    }

    /// Get a record by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read or deserialization fails.
    pub fn get<T: Entity>(&self, id: &str) -> Result<Option<T>> {
        let list = self.read_list::<T>()?;
        Ok(list.into_iter().find(|entry| entry.id() == id))
    }

    /// Add a record: assign a generated id, append, rewrite the list.
    ///
    /// Returns the stored entry with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn add<T: Entity>(&self, mut entry: T) -> Result<T> {
        let mut list = self.read_list::<T>()?;

        entry.assign_id(ulid::Ulid::new().to_string());
        list.push(entry.clone());
        self.write_list(&list)?;

        debug!(
            namespace = T::NAMESPACE,
            id = entry.id(),
            "added record"
        );
        Ok(entry)
    }

    /// Update a record in place by id, rewriting the list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no entry with the given id exists;
    /// the persisted list is left unchanged. Also fails on database errors.
    pub fn update<T: Entity>(&self, entry: &T) -> Result<()> {
        let mut list = self.read_list::<T>()?;

        let Some(slot) = list.iter_mut().find(|e| e.id() == entry.id()) else {
            return Err(Error::record_not_found(T::NAMESPACE, entry.id()));
        };
        *slot = entry.clone();
        self.write_list(&list)?;

        debug!(
            namespace = T::NAMESPACE,
            id = entry.id(),
            "updated record"
        );
        Ok(())
    }

    /// Remove a record by id, rewriting the list.
    ///
    /// Returns `true` if a record was removed; removing an absent id is a
    /// no-op returning `false` (the persisted list is not rewritten).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn remove<T: Entity>(&self, id: &str) -> Result<bool> {
        let mut list = self.read_list::<T>()?;
        let before = list.len();
        list.retain(|entry| entry.id() != id);

        if list.len() == before {
            return Ok(false);
        }

        self.write_list(&list)?;
        debug!(namespace = T::NAMESPACE, id, "removed record");
        Ok(true)
    }

    /// Count records in the entity's namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read or deserialization fails.
    pub fn count<T: Entity>(&self) -> Result<usize> {
        Ok(self.read_list::<T>()?.len())
    }

    /// Remove all records in the entity's namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn clear<T: Entity>(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM records WHERE namespace = ?1", [T::NAMESPACE])?;
        info!(namespace = T::NAMESPACE, "cleared namespace");
        Ok(())
    }

    /// Get store statistics: per-namespace record counts and database size.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails.
    pub fn stats(&self) -> Result<StoreStats> {
        let mut stmt = self
            .conn
            .prepare("SELECT namespace, value FROM records ORDER BY namespace")?;

        let rows = stmt.query_map([], |row| {
            let namespace: String = row.get(0)?;
            let value: String = row.get(1)?;
            Ok((namespace, value))
        })?;

        let mut namespaces = Vec::new();
        for row in rows {
            let (namespace, value) = row?;
            let parsed: serde_json::Value = serde_json::from_str(&value)?;
            let count = parsed.as_array().map_or(0, Vec::len);
            namespaces.push(NamespaceCount { namespace, count });
        }

        // Get database file size
        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StoreStats {
            namespaces,
            db_size_bytes,
        })
    }
}

/// Record count for one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceCount {
    /// The entity-type namespace.
    pub namespace: String,
    /// Number of records in the namespace.
    pub count: usize,
}

/// Statistics about the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Per-namespace record counts, sorted by namespace.
    pub namespaces: Vec<NamespaceCount>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MaintenanceRecord, Vehicle};

    fn create_test_store() -> RecordStore {
        RecordStore::open_in_memory().expect("failed to create test store")
    }

    fn test_vehicle(make: &str) -> Vehicle {
        Vehicle::new("owner-1", make, "Corolla", 2018, "KDA 123A", 50_000)
    }

    fn test_maintenance(vehicle_id: &str, service_type: &str) -> MaintenanceRecord {
        MaintenanceRecord::new(vehicle_id, service_type, 48_000, 120.0)
    }

    #[test]
    fn test_open_in_memory() {
        let store = RecordStore::open_in_memory();
        assert!(store.is_ok());
    }

    #[test]
    fn test_add_assigns_nonempty_id() {
        let store = create_test_store();
        let added = store.add(test_vehicle("Toyota")).unwrap();
        assert!(!added.id.is_empty());
    }

    #[test]
    fn test_add_then_list_contains_record() {
        let store = create_test_store();
        let added = store.add(test_vehicle("Toyota")).unwrap();

        let all: Vec<Vehicle> = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, added.id);
        assert_eq!(all[0].make, "Toyota");
    }

    #[test]
    fn test_list_empty_namespace() {
        let store = create_test_store();
        let all: Vec<Vehicle> = store.list().unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = create_test_store();
        for make in ["Toyota", "Subaru", "Nissan"] {
            store.add(test_vehicle(make)).unwrap();
        }

        let all: Vec<Vehicle> = store.list().unwrap();
        let makes: Vec<&str> = all.iter().map(|v| v.make.as_str()).collect();
        assert_eq!(makes, ["Toyota", "Subaru", "Nissan"]);
    }

    #[test]
    fn test_list_where_foreign_key_filter() {
        let store = create_test_store();
        let vehicle = store.add(test_vehicle("Toyota")).unwrap();
        let other = store.add(test_vehicle("Subaru")).unwrap();

        let added = store
            .add(test_maintenance(&vehicle.id, "Oil Change"))
            .unwrap();
        store
            .add(test_maintenance(&other.id, "Brake Service"))
            .unwrap();

        let for_vehicle: Vec<MaintenanceRecord> = store
            .list_where(|r: &MaintenanceRecord| r.vehicle_id == vehicle.id)
            .unwrap();
        assert_eq!(for_vehicle.len(), 1);
        assert_eq!(for_vehicle[0].id, added.id);
        assert!(!for_vehicle[0].id.is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let store = create_test_store();
        let added = store.add(test_vehicle("Toyota")).unwrap();

        let fetched: Option<Vehicle> = store.get(&added.id).unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().make, "Toyota");
    }

    #[test]
    fn test_get_nonexistent() {
        let store = create_test_store();
        let fetched: Option<Vehicle> = store.get("no-such-id").unwrap();
        assert!(fetched.is_none());
    }

    #[test]
    fn test_update_replaces_in_place() {
        let store = create_test_store();
        let mut vehicle = store.add(test_vehicle("Toyota")).unwrap();

        vehicle.current_mileage = 51_000;
        store.update(&vehicle).unwrap();

        let fetched: Vehicle = store.get(&vehicle.id).unwrap().unwrap();
        assert_eq!(fetched.current_mileage, 51_000);

        // Position in the list is unchanged
        let all: Vec<Vehicle> = store.list().unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_update_nonexistent_fails_and_list_unchanged() {
        let store = create_test_store();
        store.add(test_vehicle("Toyota")).unwrap();

        let mut ghost = test_vehicle("Subaru");
        ghost.assign_id("no-such-id".to_string());

        let result = store.update(&ghost);
        assert!(result.is_err());
        assert!(result.unwrap_err().is_not_found());

        let all: Vec<Vehicle> = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].make, "Toyota");
    }

    #[test]
    fn test_remove() {
        let store = create_test_store();
        let added = store.add(test_vehicle("Toyota")).unwrap();

        assert!(store.remove::<Vehicle>(&added.id).unwrap());

        let all: Vec<Vehicle> = store.list().unwrap();
        assert!(all.iter().all(|v| v.id != added.id));
    }

    #[test]
    fn test_remove_nonexistent_is_noop() {
        let store = create_test_store();
        store.add(test_vehicle("Toyota")).unwrap();

        assert!(!store.remove::<Vehicle>("no-such-id").unwrap());

        let all: Vec<Vehicle> = store.list().unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let store = create_test_store();
        let vehicle = store.add(test_vehicle("Toyota")).unwrap();
        store
            .add(test_maintenance(&vehicle.id, "Oil Change"))
            .unwrap();

        assert_eq!(store.count::<Vehicle>().unwrap(), 1);
        assert_eq!(store.count::<MaintenanceRecord>().unwrap(), 1);

        store.clear::<Vehicle>().unwrap();
        assert_eq!(store.count::<Vehicle>().unwrap(), 0);
        assert_eq!(store.count::<MaintenanceRecord>().unwrap(), 1);
    }

    #[test]
    fn test_remove_vehicle_does_not_cascade() {
        let store = create_test_store();
        let vehicle = store.add(test_vehicle("Toyota")).unwrap();
        store
            .add(test_maintenance(&vehicle.id, "Oil Change"))
            .unwrap();

        store.remove::<Vehicle>(&vehicle.id).unwrap();

        // Maintenance records for the deleted vehicle are orphaned, not deleted
        let orphans: Vec<MaintenanceRecord> = store
            .list_where(|r: &MaintenanceRecord| r.vehicle_id == vehicle.id)
            .unwrap();
        assert_eq!(orphans.len(), 1);
    }

    #[test]
    fn test_stats_empty() {
        let store = create_test_store();
        let stats = store.stats().unwrap();
        assert!(stats.namespaces.is_empty());
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_stats_counts_per_namespace() {
        let store = create_test_store();
        let vehicle = store.add(test_vehicle("Toyota")).unwrap();
        store.add(test_vehicle("Subaru")).unwrap();
        store
            .add(test_maintenance(&vehicle.id, "Oil Change"))
            .unwrap();

        let stats = store.stats().unwrap();
        let get_count = |ns: &str| {
            stats
                .namespaces
                .iter()
                .find(|n| n.namespace == ns)
                .map(|n| n.count)
        };
        assert_eq!(get_count(Vehicle::NAMESPACE), Some(2));
        assert_eq!(get_count(MaintenanceRecord::NAMESPACE), Some(1));
    }

    #[test]
    fn test_path() {
        let store = create_test_store();
        assert_eq!(store.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_open_file_based_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("garilink.db");

        let added = {
            let store = RecordStore::open(&db_path).unwrap();
            store.add(test_vehicle("Toyota")).unwrap()
        };

        let store = RecordStore::open(&db_path).unwrap();
        let fetched: Option<Vehicle> = store.get(&added.id).unwrap();
        assert!(fetched.is_some());
        assert_eq!(store.path(), db_path);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested_path = dir.path().join("nested/deeper/garilink.db");

        let store = RecordStore::open(&nested_path).unwrap();
        assert!(nested_path.exists());
        drop(store);
    }

    #[test]
    fn test_stats_db_size_file_based() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("garilink.db");

        let store = RecordStore::open(&db_path).unwrap();
        store.add(test_vehicle("Toyota")).unwrap();

        let stats = store.stats().unwrap();
        assert!(stats.db_size_bytes > 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let store = create_test_store();
        let a = store.add(test_vehicle("Toyota")).unwrap();
        let b = store.add(test_vehicle("Toyota")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_unicode_fields_round_trip() {
        let store = create_test_store();
        let added = store
            .add(Vehicle::new("owner-1", "Toyota", "プリウス", 2020, "KDB 456B", 10_000))
            .unwrap();

        let fetched: Vehicle = store.get(&added.id).unwrap().unwrap();
        assert_eq!(fetched.model, "プリウス");
    }
}
