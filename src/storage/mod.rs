//! In-memory table storage

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    error::{Error, Result},
    sql::{engine::Catalog, relation::Relation, schema::TableSchema, types::Row},
};

pub mod sample;

/// In-memory database: a set of named relations
#[derive(Debug, Clone, Default)]
pub struct Database {
    tables: BTreeMap<String, Relation>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table. Column names should be unqualified; loading the table
    /// qualifies them with the table name.
    pub fn create_table(&mut self, table_name: impl Into<String>, schema: TableSchema) -> Result<()> {
        let table_name = table_name.into();
        if self.tables.contains_key(&table_name) {
            return Err(Error::TableExists(table_name));
        }
        debug!(table = %table_name, %schema, "created table");
        self.tables.insert(table_name, Relation::new(schema));
        Ok(())
    }

    /// Appends a row, checking it against the table's schema
    pub fn insert(&mut self, table_name: &str, row: Row) -> Result<()> {
        self.tables
            .get_mut(table_name)
            .ok_or_else(|| Error::TableNotFound(table_name.to_string()))?
            .insert(row)
    }

    /// Table names, in sorted order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl Catalog for Database {
    fn get_table(&self, table_name: &str) -> Option<&Relation> {
        self.tables.get(table_name)
    }
}
