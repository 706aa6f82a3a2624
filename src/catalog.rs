// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

//! The process-wide table registry.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use itertools::Itertools;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

use crate::storage::TableRef;

/// A mapping from table names to shared table handles.
///
/// The catalog is plain collaborator code: embedders usually construct one
/// per process (or use [`Catalog::global`]), tests construct one per case.
pub struct Catalog {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    tables: HashMap<String, TableRef>,
}

pub type CatalogRef = Arc<Catalog>;

/// The error type of catalog operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicated {0}: {1}")]
    Duplicated(&'static str, String),
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new()
    }
}

impl Catalog {
    pub fn new() -> Catalog {
        Catalog {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// The lazily-initialized process-wide catalog.
    pub fn global() -> &'static Catalog {
        static GLOBAL: Lazy<Catalog> = Lazy::new(Catalog::new);
        &GLOBAL
    }

    pub fn add_table(&self, name: impl Into<String>, table: TableRef) -> Result<(), CatalogError> {
        let name = name.into();
        let mut inner = self.inner.lock();
        if inner.tables.contains_key(&name) {
            return Err(CatalogError::Duplicated("table", name));
        }
        debug!(table = %name, "add table");
        inner.tables.insert(name, table);
        Ok(())
    }

    pub fn drop_table(&self, name: &str) -> Result<(), CatalogError> {
        let mut inner = self.inner.lock();
        inner
            .tables
            .remove(name)
            .map(|_| debug!(table = %name, "drop table"))
            .ok_or_else(|| CatalogError::NotFound("table", name.into()))
    }

    pub fn get_table(&self, name: &str) -> Result<TableRef, CatalogError> {
        let inner = self.inner.lock();
        inner
            .tables
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound("table", name.into()))
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.inner.lock().tables.contains_key(name)
    }

    /// All registered table names, in no particular order.
    pub fn table_names(&self) -> Vec<String> {
        self.inner.lock().tables.keys().cloned().collect()
    }

    /// Writes one line per table, in ascending name order.
    pub fn print(&self, out: &mut dyn io::Write) -> io::Result<()> {
        let inner = self.inner.lock();
        for name in inner.tables.keys().sorted() {
            let table = &inner.tables[name];
            writeln!(
                out,
                "Table Name: {}\t# Columns: {}\t# Rows: {}\t# Chunks: {}",
                name,
                table.column_count(),
                table.row_count(),
                table.chunk_count()
            )?;
        }
        Ok(())
    }

    /// Clears the catalog.
    pub fn reset(&self) {
        self.inner.lock().tables.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Table;

    fn catalog_with_two_tables() -> Catalog {
        let catalog = Catalog::new();
        catalog
            .add_table("first_table", Arc::new(Table::default()))
            .unwrap();
        catalog
            .add_table("second_table", Arc::new(Table::new(4)))
            .unwrap();
        catalog
    }

    #[test]
    fn test_get_table() {
        let catalog = catalog_with_two_tables();
        catalog.get_table("first_table").unwrap();
        catalog.get_table("second_table").unwrap();
        assert_eq!(
            catalog.get_table("third_table").unwrap_err(),
            CatalogError::NotFound("table", "third_table".into())
        );
    }

    #[test]
    fn test_add_duplicate_fails() {
        let catalog = catalog_with_two_tables();
        assert_eq!(
            catalog.add_table("first_table", Arc::new(Table::default())),
            Err(CatalogError::Duplicated("table", "first_table".into()))
        );
    }

    #[test]
    fn test_drop_table() {
        let catalog = catalog_with_two_tables();
        catalog.drop_table("first_table").unwrap();
        assert!(!catalog.has_table("first_table"));
        assert_eq!(
            catalog.drop_table("first_table"),
            Err(CatalogError::NotFound("table", "first_table".into()))
        );
    }

    #[test]
    fn test_has_table() {
        let catalog = catalog_with_two_tables();
        assert!(catalog.has_table("first_table"));
        assert!(!catalog.has_table("third_table"));
    }

    #[test]
    fn test_table_names() {
        let catalog = catalog_with_two_tables();
        let mut names = catalog.table_names();
        names.sort();
        assert_eq!(names, ["first_table", "second_table"]);
    }

    #[test]
    fn test_reset() {
        let catalog = catalog_with_two_tables();
        catalog.reset();
        assert!(catalog.table_names().is_empty());
        assert_eq!(
            catalog.get_table("first_table").unwrap_err(),
            CatalogError::NotFound("table", "first_table".into())
        );
    }

    #[test]
    fn test_print() {
        let catalog = catalog_with_two_tables();
        let mut out = Vec::new();
        catalog.print(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Table Name: first_table\t# Columns: 0\t# Rows: 0\t# Chunks: 1\n\
             Table Name: second_table\t# Columns: 0\t# Rows: 0\t# Chunks: 1\n"
        );
    }
}
