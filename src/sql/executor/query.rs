use tracing::trace;

use crate::sql::{
    engine::Catalog,
    plan::{Expression, OutputColumn},
    relation::{Relation, RowRef},
    schema::TableSchema,
    types::Row,
};

/// Reads a stored table, relabeling its rows with the planned (qualified) schema
pub fn load<C: Catalog + ?Sized>(catalog: &C, table_name: &str, schema: &TableSchema) -> Relation {
    let Some(table) = catalog.get_table(table_name) else {
        panic!("table {} disappeared after planning", table_name);
    };
    trace!(table = table_name, rows = table.len(), "load");
    Relation {
        schema: schema.clone(),
        rows: table.rows.clone(),
    }
}

/// Keeps the rows for which the condition is true
pub fn select(source: Relation, condition: &Expression) -> Relation {
    let Relation { schema, rows } = source;
    let input = rows.len();
    // null conditions drop the row just like false ones
    let rows: Vec<Row> = rows
        .into_iter()
        .filter(|row| condition.evaluate(&RowRef::new(&schema, row)).is_true())
        .collect();
    trace!(input, output = rows.len(), "select");
    Relation { schema, rows }
}

/// Evaluates the output columns for every source row
pub fn project(source: Relation, columns: &[OutputColumn], schema: &TableSchema) -> Relation {
    let rows: Vec<Row> = source
        .iter()
        .map(|row| columns.iter().map(|c| c.expr.evaluate(&row)).collect())
        .collect();
    trace!(rows = rows.len(), columns = columns.len(), "project");
    Relation {
        schema: schema.clone(),
        rows,
    }
}
