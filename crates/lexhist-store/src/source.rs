//! SQLite-backed [`LawSource`]

#![allow(clippy::result_large_err)]

use lexhist_core::{Amendment, DocumentId, LawSource, LegalDocument, Section, SectionChange};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;

use crate::errors::Result;
use crate::{db, migrations, queries};

/// Read-only [`LawSource`] over one SQLite connection
///
/// `rusqlite::Connection` is `Send` but not `Sync`; the mutex serializes
/// queries so the source can be shared across request threads.
pub struct SqliteLawSource {
    conn: Mutex<Connection>,
}

impl SqliteLawSource {
    /// Wrap an already-migrated connection
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Open an existing database file read-only
    ///
    /// # Errors
    ///
    /// `Persistence` if the file cannot be opened.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(db::open_read_only(path)?))
    }

    /// Open (or create) a database file and bring its schema up to date
    ///
    /// # Errors
    ///
    /// `Persistence` on open or migration failure.
    pub fn open_and_migrate<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = db::open(path)?;
        db::configure(&conn)?;
        migrations::apply_migrations(&mut conn)?;
        Ok(Self::new(conn))
    }

    /// Known document ids, in key order
    ///
    /// # Errors
    ///
    /// `Persistence` on query failure.
    pub fn list_documents(&self) -> Result<Vec<DocumentId>> {
        queries::list_documents(&self.conn.lock())
    }

    /// Run a closure against the underlying connection
    pub fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> T) -> T {
        f(&self.conn.lock())
    }
}

impl LawSource for SqliteLawSource {
    fn get_document(&self, id: &DocumentId) -> Result<LegalDocument> {
        queries::load_document(&self.conn.lock(), id)
    }

    fn get_current_sections(&self, id: &DocumentId) -> Result<Vec<Section>> {
        queries::current_sections(&self.conn.lock(), id)
    }

    fn get_amendments(&self, id: &DocumentId) -> Result<Vec<Amendment>> {
        queries::amendments(&self.conn.lock(), id)
    }

    fn get_section_changes(&self, id: &DocumentId) -> Result<Vec<SectionChange>> {
        queries::section_changes(&self.conn.lock(), id)
    }
}
