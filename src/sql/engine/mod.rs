use tracing::debug;

use crate::error::{Error, Result};

use super::{parser::parse, plan::Plan, relation::Relation};

/// Read access to stored tables, by name
///
/// Planning and execution only ever read from the catalog; tables are registered by
/// whoever owns it (see [`crate::storage::Database`]).
pub trait Catalog {
    fn get_table(&self, table_name: &str) -> Option<&Relation>;

    /// Returns the table, or an error if it doesn't exist
    fn must_get_table(&self, table_name: &str) -> Result<&Relation> {
        self.get_table(table_name)
            .ok_or_else(|| Error::TableNotFound(table_name.to_string()))
    }
}

/// SQL session for running queries against a catalog
pub struct Session<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: Catalog + ?Sized> Session<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Parses and plans a query without running it
    pub fn plan(&self, sql: &str) -> Result<Plan> {
        let stmt = parse(sql)?;
        debug!(?stmt, "parsed statement");
        Plan::build(stmt, self.catalog)
    }

    /// Executes a query, returning its result
    pub fn execute(&self, sql: &str) -> Result<Relation> {
        Ok(self.plan(sql)?.execute(self.catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::{
        error::{Error, Result},
        sql::{
            relation::Relation,
            schema::{ColumnSchema, TableSchema},
            types::{Date, Type, Value},
        },
        storage::sample::sample_database,
    };

    #[test]
    fn test_join_end_to_end() -> Result<()> {
        let db = sample_database()?;
        let session = Session::new(&db);
        let got = session.execute("select films.name, people.name from films join people on films.director = people.id")?;
        let want = Relation {
            schema: TableSchema::new(vec![
                ColumnSchema::new("films.name", Type::Text, false),
                ColumnSchema::new("people.name", Type::Text, false),
            ]),
            rows: vec![
                vec![Value::text("The General"), Value::text("Buster Keaton")],
                vec![Value::text("The Kid"), Value::text("Charlie Chaplin")],
                vec![Value::text("Sherlock Jr."), Value::text("Buster Keaton")],
            ],
        };
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn test_queries() -> Result<()> {
        let db = sample_database()?;
        let session = Session::new(&db);

        let got = session.execute("SELECT name FROM films WHERE release_date < date '1925-01-01';")?;
        assert_eq!(
            got.rows,
            vec![vec![Value::text("The Kid")], vec![Value::text("Sherlock Jr.")]]
        );

        let got = session.execute("select id, 'x' from people where name = 'Harold Lloyd'")?;
        assert_eq!(got.rows, vec![vec![Value::decimal("3".parse()?), Value::text("x")]]);
        assert_eq!(got.schema.columns[1].name, "c2");

        let got = session.execute(
            "select people.name, films.name from people left join films on people.id = films.director \
             where films.name is null",
        )?;
        assert_eq!(
            got.rows,
            vec![vec![Value::text("Harold Lloyd"), Value::null(Type::Text)]]
        );
        assert!(got.schema.columns[1].nullable);

        let got = session.execute("select * from films where release_date = date '1926-12-31'")?;
        assert_eq!(got.len(), 1);
        assert_eq!(got.rows[0][2], Value::date(Date::new(1926, 12, 31)?));
        Ok(())
    }

    #[test]
    fn test_errors() -> Result<()> {
        let db = sample_database()?;
        let session = Session::new(&db);

        let err = session.execute("select * form films").err();
        assert!(err.as_ref().is_some_and(Error::is_syntax), "{:?}", err);
        assert_eq!(err.and_then(|e| e.position()), Some(9));

        let err = session.execute("select * from directors").err();
        assert_eq!(err, Some(Error::TableNotFound("directors".to_string())));
        assert!(err.is_some_and(|e| e.is_plan()));
        Ok(())
    }

    #[test]
    fn test_result_encodes() -> Result<()> {
        let db = sample_database()?;
        let got = Session::new(&db).execute("select name, release_date from films")?;
        let bytes = bincode::serialize(&got).map_err(|e| Error::Unsupported(e.to_string()))?;
        let decoded: Relation = bincode::deserialize(&bytes).map_err(|e| Error::Unsupported(e.to_string()))?;
        assert_eq!(decoded, got);
        Ok(())
    }
}
