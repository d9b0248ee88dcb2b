//! Parse-once handle for a database

use std::sync::OnceLock;

use crate::Result;

/// A database that can be built from the text of an ID list
pub trait IdDatabase: Sized {
    /// Parse the complete text of the list
    fn parse(input: &str) -> Result<Self>;
}

/// Owns the text of an ID list and parses it on first use
///
/// All callers of [`SharedDb::get`] see the same instance. If two threads race
/// on the first call both may parse, but only one result is kept. A failed
/// parse is not cached, the next call reports the same error again.
pub struct SharedDb<D> {
    source: String,
    db: OnceLock<D>,
}

impl<D: IdDatabase> SharedDb<D> {
    pub fn new(source: String) -> Self {
        Self {
            source,
            db: OnceLock::new(),
        }
    }

    /// Get the parsed database, parsing it if needed
    pub fn get(&self) -> Result<&D> {
        if let Some(db) = self.db.get() {
            return Ok(db);
        }
        let parsed = D::parse(&self.source)?;
        Ok(self.db.get_or_init(|| parsed))
    }

    /// True once a parse has succeeded
    pub fn is_loaded(&self) -> bool {
        self.db.get().is_some()
    }
}

impl<D> std::fmt::Debug for SharedDb<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedDb")
            .field("source_len", &self.source.len())
            .field("loaded", &self.db.get().is_some())
            .finish()
    }
}
