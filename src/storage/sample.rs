//! Sample data: a few silent films and their directors

use crate::{
    error::Result,
    sql::{
        schema::{ColumnSchema, TableSchema},
        types::{Date, Type, Value},
    },
    storage::Database,
};

/// Builds a database with two tables:
///
/// - `films (id decimal, name text, release_date date, director decimal)`
/// - `people (id decimal, name text)`
///
/// `films.director` refers to `people.id`. One person directed no film.
pub fn sample_database() -> Result<Database> {
    let mut db = Database::new();

    db.create_table(
        "films",
        TableSchema::new(vec![
            ColumnSchema::new("id", Type::Decimal, false),
            ColumnSchema::new("name", Type::Text, false),
            ColumnSchema::new("release_date", Type::Date, false),
            ColumnSchema::new("director", Type::Decimal, false),
        ]),
    )?;
    let films = [
        ("1", "The General", (1926, 12, 31), "1"),
        ("2", "The Kid", (1921, 1, 21), "2"),
        ("3", "Sherlock Jr.", (1924, 4, 21), "1"),
    ];
    for (id, name, (y, m, d), director) in films {
        db.insert(
            "films",
            vec![
                Value::decimal(id.parse()?),
                Value::text(name),
                Value::date(Date::new(y, m, d)?),
                Value::decimal(director.parse()?),
            ],
        )?;
    }

    db.create_table(
        "people",
        TableSchema::new(vec![
            ColumnSchema::new("id", Type::Decimal, false),
            ColumnSchema::new("name", Type::Text, false),
        ]),
    )?;
    for (id, name) in [("1", "Buster Keaton"), ("2", "Charlie Chaplin"), ("3", "Harold Lloyd")] {
        db.insert("people", vec![Value::decimal(id.parse()?), Value::text(name)])?;
    }

    Ok(db)
}
