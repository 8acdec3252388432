//! Resolves AST expressions against a schema

use tracing::trace;

use crate::{
    error::{Error, Result},
    sql::{
        parser::ast,
        plan::expression::Expression,
        schema::TableSchema,
        types::Value,
    },
};

/// Binds an AST expression to the columns of `schema`.
///
/// Qualified references (`films.name`) must match a column name exactly. Unqualified
/// references (`name`) match every column whose name ends in `.name` and must match
/// exactly one. Alongside the bound expression, returns the resolved column name when
/// the expression is a plain column reference.
pub fn bind(expr: &ast::Expression, schema: &TableSchema) -> Result<(Expression, Option<String>)> {
    Ok(match expr {
        ast::Expression::Column { relation, name } => {
            let index = resolve(relation.as_deref(), name, schema)?;
            let column = &schema.columns[index];
            trace!(column = %column.name, index, "bound column reference");
            (Expression::column(index, column.datatype), Some(column.name.clone()))
        }
        ast::Expression::String(s) => (Expression::constant(Value::text(s.clone())), None),
        ast::Expression::Number(n) => (Expression::constant(Value::decimal(n.clone())), None),
        ast::Expression::Boolean(b) => (Expression::constant(Value::boolean(*b)), None),
        ast::Expression::Date(d) => (Expression::constant(Value::date(*d)), None),
        ast::Expression::Binary {
            left,
            operator,
            right,
        } => {
            let (left, _) = bind(left, schema)?;
            let (right, _) = bind(right, schema)?;
            (Expression::binary(left, *operator, right)?, None)
        }
        ast::Expression::Unary { operand, operator } => {
            let (operand, _) = bind(operand, schema)?;
            (Expression::unary(operand, *operator), None)
        }
    })
}

fn resolve(relation: Option<&str>, name: &str, schema: &TableSchema) -> Result<usize> {
    match relation {
        Some(relation) => Ok(schema.column(&format!("{}.{}", relation, name))?.0),
        None => match schema.find_suffix(name).as_slice() {
            [] => Err(Error::ColumnNotFound(name.to_string())),
            [index] => Ok(*index),
            _ => Err(Error::AmbiguousColumn(name.to_string())),
        },
    }
}
