use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use ship_classes::{ClassStore, LogSink, ShippingClass, StoreError};

use crate::schema;

/// SQLite-backed shipping-class store.
///
/// The sole mutator of the `shipping_classes` table; the synchronizer only
/// ever requests create/update through the `ClassStore` trait.
pub struct SqliteClassStore {
    conn: Mutex<rusqlite::Connection>,
    log: Arc<dyn LogSink>,
}

impl SqliteClassStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path, log: Arc<dyn LogSink>) -> Result<Self, StoreError> {
        let conn = rusqlite::Connection::open(path)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Self::from_connection(conn, log)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory(log: Arc<dyn LogSink>) -> Result<Self, StoreError> {
        let conn = rusqlite::Connection::open_in_memory()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Self::from_connection(conn, log)
    }

    fn from_connection(
        mut conn: rusqlite::Connection,
        log: Arc<dyn LogSink>,
    ) -> Result<Self, StoreError> {
        schema::migrations()
            .to_latest(&mut conn)
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
            log,
        })
    }

    fn row_to_class(row: &rusqlite::Row) -> rusqlite::Result<ShippingClass> {
        Ok(ShippingClass {
            id: row.get(0)?,
            name: row.get(1)?,
            slug: row.get(2)?,
            description: row.get(3)?,
        })
    }

    fn fetch_by_id(conn: &rusqlite::Connection, id: i64) -> Result<ShippingClass, StoreError> {
        conn.query_row(
            "SELECT id, name, slug, description FROM shipping_classes WHERE id = ?1",
            [id],
            Self::row_to_class,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound(id),
            other => StoreError::Database(other.to_string()),
        })
    }
}

#[async_trait::async_trait]
impl ClassStore for SqliteClassStore {
    async fn list(&self) -> Result<HashMap<String, ShippingClass>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare("SELECT id, name, slug, description FROM shipping_classes")
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let classes = stmt
            .query_map([], Self::row_to_class)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .filter_map(|row| row.ok())
            .map(|class| (class.slug.clone(), class))
            .collect();

        Ok(classes)
    }

    async fn create(
        &self,
        name: &str,
        description: &str,
        slug: &str,
    ) -> Result<ShippingClass, StoreError> {
        let conn = self.conn.lock().unwrap();

        let inserted = conn.execute(
            "INSERT INTO shipping_classes (name, slug, description) VALUES (?1, ?2, ?3)",
            rusqlite::params![name, slug, description],
        );

        match inserted {
            Ok(_) => {
                self.log.info(&format!("Created shipping class: {name}"));
                Ok(ShippingClass {
                    id: conn.last_insert_rowid(),
                    name: name.to_owned(),
                    slug: slug.to_owned(),
                    description: description.to_owned(),
                })
            }
            Err(e) => {
                let error = if is_unique_violation(&e) {
                    StoreError::DuplicateSlug(slug.to_owned())
                } else {
                    StoreError::Database(e.to_string())
                };
                self.log
                    .error(&format!("Failed to create shipping class: {error}"));
                Err(error)
            }
        }
    }

    async fn update(
        &self,
        id: i64,
        name: &str,
        description: &str,
        slug: &str,
    ) -> Result<ShippingClass, StoreError> {
        let conn = self.conn.lock().unwrap();

        let changed = conn
            .execute(
                "UPDATE shipping_classes SET name = ?2, description = ?3, slug = ?4 WHERE id = ?1",
                rusqlite::params![id, name, description, slug],
            )
            .map_err(|e| {
                let error = if is_unique_violation(&e) {
                    StoreError::DuplicateSlug(slug.to_owned())
                } else {
                    StoreError::Database(e.to_string())
                };
                self.log
                    .error(&format!("Failed to update shipping class: {error}"));
                error
            })?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        self.log.info(&format!("Updated shipping class: {name}"));
        Self::fetch_by_id(&conn, id)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();

        let changed = conn
            .execute("DELETE FROM shipping_classes WHERE id = ?1", [id])
            .map_err(|e| {
                let error = StoreError::Database(e.to_string());
                self.log
                    .error(&format!("Failed to delete shipping class: {error}"));
                error
            })?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        self.log
            .info(&format!("Deleted shipping class with id {id}"));
        Ok(())
    }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
