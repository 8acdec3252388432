use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    sql::{
        schema::TableSchema,
        types::{Row, Value},
    },
};

/// A table, or the result of a query: a schema plus an ordered list of rows
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Relation {
    pub schema: TableSchema,
    pub rows: Vec<Row>,
}

impl Relation {
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Appends a row after checking it against the schema
    pub fn insert(&mut self, row: Row) -> Result<()> {
        self.schema.check(&row)?;
        self.rows.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns a view of the i-th row. Panics if out of range.
    pub fn row(&self, i: usize) -> RowRef<'_> {
        RowRef::new(&self.schema, &self.rows[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows.iter().map(|r| RowRef::new(&self.schema, r))
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.schema.columns.iter().map(|c| c.name.as_str()).collect();
        writeln!(f, "{}", names.join(" | "))?;
        for row in &self.rows {
            let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "{}", values.join(" | "))?;
        }
        Ok(())
    }
}

/// A borrowed view of one row together with the schema it conforms to
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    pub schema: &'a TableSchema,
    pub values: &'a [Value],
}

impl<'a> RowRef<'a> {
    pub fn new(schema: &'a TableSchema, values: &'a [Value]) -> Self {
        Self { schema, values }
    }

    pub fn get(&self, index: usize) -> &'a Value {
        &self.values[index]
    }
}
