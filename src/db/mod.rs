//! SQLite-backed JSON document store: one document per feature model.
//!
//! The engine never sees this module; it is handed a deserialized
//! [`FeatureModel`] and returns a new one. Every mutation is a
//! read-modify-write of the whole document, guarded by a revision number:
//! a concurrent writer makes the slower `put` fail with
//! [`StoreError::Conflict`] and the caller reloads.

mod schema;
pub mod seed;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{FeatureModel, FeatureModelSummary};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document {0} not found")]
    NotFound(String),

    #[error("document {0} was modified concurrently; reload and retry")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

pub struct DocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl DocumentStore {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "bmdl-modeler")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("models.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    /// Store a new document, assigning its id (unless pre-set by a seed)
    /// and revision 1.
    pub fn insert(&self, model: FeatureModel) -> Result<FeatureModel, StoreError> {
        let conn = self.conn.lock().expect("database lock poisoned");
        insert_document(&conn, model)
    }

    pub fn get(&self, id: &str) -> Result<FeatureModel, StoreError> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let body: Option<String> = conn
            .query_row("SELECT body FROM documents WHERE id = ?", [id], |row| {
                row.get(0)
            })
            .optional()?;

        let body = body.ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Replace a stored document wholesale.
    ///
    /// The update only lands if the stored revision still matches the
    /// revision the caller loaded; otherwise someone else wrote in between
    /// and the caller gets a `Conflict`.
    pub fn put(&self, model: FeatureModel) -> Result<FeatureModel, StoreError> {
        let conn = self.conn.lock().expect("database lock poisoned");

        let loaded_rev = model.rev;
        let mut model = model;
        model.rev = loaded_rev + 1;
        let body = serde_json::to_string(&model)?;

        let rows = conn.execute(
            "UPDATE documents SET rev = ?, name = ?, description = ?, body = ? \
             WHERE id = ? AND rev = ?",
            (
                model.rev,
                &model.name,
                &model.description,
                &body,
                &model.id,
                loaded_rev,
            ),
        )?;

        if rows == 0 {
            let exists: Option<i64> = conn
                .query_row("SELECT rev FROM documents WHERE id = ?", [&model.id], |row| {
                    row.get(0)
                })
                .optional()?;
            return Err(match exists {
                Some(_) => StoreError::Conflict(model.id.clone()),
                None => StoreError::NotFound(model.id.clone()),
            });
        }
        Ok(model)
    }

    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM documents WHERE id = ?", [id])?;
        Ok(rows > 0)
    }

    pub fn list(&self) -> Result<Vec<FeatureModelSummary>, StoreError> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt =
            conn.prepare("SELECT id, name, description FROM documents ORDER BY name")?;

        let summaries = stmt
            .query_map([], |row| {
                Ok(FeatureModelSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(summaries)
    }

    /// Drop every stored document and insert the given ones in their place.
    pub fn destroy_and_reseed(
        &self,
        seeds: Vec<FeatureModel>,
    ) -> Result<Vec<FeatureModel>, StoreError> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute("DELETE FROM documents", [])?;

        let mut inserted = Vec::with_capacity(seeds.len());
        for seed in seeds {
            inserted.push(insert_document(&conn, seed)?);
        }
        Ok(inserted)
    }
}

impl Clone for DocumentStore {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn insert_document(conn: &Connection, model: FeatureModel) -> Result<FeatureModel, StoreError> {
    let mut model = model;
    if model.id.is_empty() {
        model.id = Uuid::new_v4().to_string();
    }
    model.rev = 1;
    let body = serde_json::to_string(&model)?;

    conn.execute(
        "INSERT INTO documents (id, rev, name, description, body) VALUES (?, ?, ?, ?, ?)",
        (&model.id, model.rev, &model.name, &model.description, &body),
    )?;
    Ok(model)
}
