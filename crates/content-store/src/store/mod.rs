//! Typed CRUD over the content tables.
//!
//! One `ContentStore` wraps a single SQLite connection behind a mutex. Every
//! method takes the lock for the duration of one statement (or one
//! read-merge-write transaction for patches), so callers never hold it
//! across an `.await`.

mod faq;
mod pages;
mod services;
mod steps;
mod submissions;
mod testimonials;
mod tiers;
mod users;

pub(crate) use faq::insert_faq_item;
pub(crate) use pages::insert_page_content;
pub(crate) use services::insert_service;
pub(crate) use steps::insert_process_step;
pub(crate) use tiers::insert_solution_tier;

use rusqlite::types::Type;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::models::TableCounts;
use crate::schema;

#[derive(Clone)]
pub struct ContentStore {
    conn: Arc<Mutex<Connection>>,
    owner_open_id: Option<Arc<str>>,
}

impl ContentStore {
    /// Open (or create) the database file and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Invalid(format!(
                        "cannot create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))?;
        debug!("Opened content database at {}", path.display());
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute("PRAGMA foreign_keys=ON;", [])?;
        schema::apply(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            owner_open_id: None,
        })
    }

    /// Users signing in with this open id are promoted to admin unless a role
    /// is given explicitly.
    pub fn with_owner_open_id(mut self, owner: Option<String>) -> Self {
        self.owner_open_id = owner.filter(|o| !o.trim().is_empty()).map(Arc::from);
        self
    }

    pub(crate) fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    pub fn counts(&self) -> StoreResult<TableCounts> {
        let conn = self.conn()?;
        let count = |table: &str| -> StoreResult<i64> {
            Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?)
        };
        Ok(TableCounts {
            users: count("users")?,
            page_content: count("page_content")?,
            services: count("services")?,
            solution_tiers: count("solution_tiers")?,
            process_steps: count("process_steps")?,
            faq_items: count("faq_items")?,
            testimonials: count("testimonials")?,
            contact_submissions: count("contact_submissions")?,
        })
    }
}

/// Decode a JSON string-array column inside a row mapper.
pub(crate) fn json_list(raw: String, column: usize) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

pub(crate) fn active_clause(vis: crate::models::Visibility) -> &'static str {
    if vis.includes_inactive() {
        ""
    } else {
        "WHERE is_active = 1"
    }
}
