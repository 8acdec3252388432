use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    sql::types::{Type, Value},
};

/// Column schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Plain (`id`) or qualified (`films.id`) column name
    pub name: String,
    pub datatype: Type,
    pub nullable: bool,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, datatype: Type, nullable: bool) -> Self {
        Self {
            name: name.into(),
            datatype,
            nullable,
        }
    }

    /// Checks that a value may be stored in this column
    pub fn check(&self, value: &Value) -> Result<()> {
        if value.datatype() != self.datatype {
            return Err(Error::TypeMismatch {
                column: self.name.clone(),
                expected: self.datatype,
                found: value.datatype(),
            });
        }
        if value.is_null() && !self.nullable {
            return Err(Error::NullConstraint(self.name.clone()));
        }
        Ok(())
    }
}

impl Display for ColumnSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let null = if self.nullable { "null" } else { "not null" };
        write!(f, "{} {} {}", self.name, self.datatype, null)
    }
}

/// Table schema definition: an ordered list of columns
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableSchema {
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    pub fn new(columns: Vec<ColumnSchema>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the index and type of the column with exactly this name
    pub fn column(&self, name: &str) -> Result<(usize, Type)> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .map(|i| (i, self.columns[i].datatype))
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Returns the indexes of all columns whose name ends with `.name`
    pub fn find_suffix(&self, name: &str) -> Vec<usize> {
        let suffix = format!(".{}", name);
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name.ends_with(&suffix))
            .map(|(i, _)| i)
            .collect()
    }

    /// Validates the shape, types and nullability of a row
    pub fn check(&self, row: &[Value]) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::WrongValueCount {
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.columns
            .iter()
            .zip(row)
            .try_for_each(|(column, value)| column.check(value))
    }

    /// Qualifies every column name with the table name, e.g. `id` -> `films.id`
    pub fn prefix(&self, table_name: &str) -> TableSchema {
        TableSchema {
            columns: self
                .columns
                .iter()
                .map(|c| ColumnSchema {
                    name: format!("{}.{}", table_name, c.name),
                    ..c.clone()
                })
                .collect(),
        }
    }

    /// Concatenates two schemas; name collisions are not detected here
    pub fn combine(&self, other: &TableSchema) -> TableSchema {
        TableSchema {
            columns: self.columns.iter().chain(&other.columns).cloned().collect(),
        }
    }

    /// Returns a copy with every column marked nullable
    pub fn nullable(&self) -> TableSchema {
        TableSchema {
            columns: self
                .columns
                .iter()
                .map(|c| ColumnSchema {
                    nullable: true,
                    ..c.clone()
                })
                .collect(),
        }
    }

    /// A row of typed nulls matching this schema
    pub fn null_row(&self) -> Vec<Value> {
        self.columns.iter().map(|c| Value::null(c.datatype)).collect()
    }
}

impl Display for TableSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let columns: Vec<String> = self.columns.iter().map(|c| c.to_string()).collect();
        write!(f, "TableSchema({})", columns.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnSchema, TableSchema};
    use crate::{
        error::{Error, Result},
        sql::types::{Type, Value},
    };

    fn schema() -> TableSchema {
        TableSchema::new(vec![
            ColumnSchema::new("id", Type::Decimal, false),
            ColumnSchema::new("name", Type::Text, true),
        ])
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ColumnSchema::new("name", Type::Text, false).to_string(),
            "name text not null"
        );
        assert_eq!(
            schema().to_string(),
            "TableSchema(id decimal not null, name text null)"
        );
    }

    #[test]
    fn test_check() -> Result<()> {
        let schema = schema();
        schema.check(&[Value::decimal("1".parse()?), Value::text("a")])?;
        schema.check(&[Value::decimal("1".parse()?), Value::null(Type::Text)])?;

        assert_eq!(
            schema.check(&[Value::decimal("1".parse()?)]),
            Err(Error::WrongValueCount { expected: 2, got: 1 })
        );
        assert!(matches!(
            schema.check(&[Value::text("1"), Value::text("a")]),
            Err(Error::TypeMismatch { .. })
        ));
        assert_eq!(
            schema.check(&[Value::null(Type::Decimal), Value::text("a")]),
            Err(Error::NullConstraint("id".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_prefix_and_lookup() -> Result<()> {
        let prefixed = schema().prefix("films");
        assert_eq!(prefixed.column("films.name")?, (1, Type::Text));
        assert!(prefixed.column("name").is_err());
        assert_eq!(prefixed.find_suffix("name"), vec![1]);
        assert!(prefixed.find_suffix("ame").is_empty());

        let combined = prefixed.combine(&schema().prefix("people"));
        assert_eq!(combined.len(), 4);
        assert_eq!(combined.columns[2].name, "people.id");
        assert_eq!(combined.find_suffix("id"), vec![0, 2]);
        Ok(())
    }

    #[test]
    fn test_nullable_and_null_row() {
        let nullable = schema().nullable();
        assert!(nullable.columns.iter().all(|c| c.nullable));
        assert_eq!(
            schema().null_row(),
            vec![Value::null(Type::Decimal), Value::null(Type::Text)]
        );
    }
}
