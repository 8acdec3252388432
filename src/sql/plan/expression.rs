//! Typed expressions evaluated against rows
//!
//! Plan expressions are produced by the binder. Every expression has a static type,
//! and column references are resolved to positions, so evaluation never fails for an
//! expression that passed [`Expression::check`] against the row's schema.

use std::fmt::Display;

use crate::{
    error::{Error, Result},
    sql::{
        parser::ast::{BinaryOperator, UnaryOperator},
        relation::RowRef,
        schema::TableSchema,
        types::{Compared, Type, Value},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(Value),
    /// Reference to the column at `index` of the input row
    Column { index: usize, datatype: Type },
    /// Comparison of two expressions of the same type
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    /// Null check
    Unary {
        operand: Box<Expression>,
        operator: UnaryOperator,
    },
}

impl Expression {
    pub fn constant(value: Value) -> Self {
        Expression::Constant(value)
    }

    pub fn column(index: usize, datatype: Type) -> Self {
        Expression::Column { index, datatype }
    }

    /// Builds a comparison, failing if the operand types differ
    pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Result<Self> {
        if left.datatype() != right.datatype() {
            return Err(Error::IncompatibleTypes {
                left: left.datatype(),
                right: right.datatype(),
            });
        }
        Ok(Expression::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    pub fn unary(operand: Expression, operator: UnaryOperator) -> Self {
        Expression::Unary {
            operand: Box::new(operand),
            operator,
        }
    }

    /// Static type of the expression
    pub fn datatype(&self) -> Type {
        match self {
            Expression::Constant(value) => value.datatype(),
            Expression::Column { datatype, .. } => *datatype,
            Expression::Binary { .. } | Expression::Unary { .. } => Type::Boolean,
        }
    }

    /// Whether the expression may evaluate to null for rows of the given schema
    pub fn nullable(&self, schema: &TableSchema) -> bool {
        match self {
            Expression::Constant(value) => value.is_null(),
            Expression::Column { index, .. } => schema.columns.get(*index).is_none_or(|c| c.nullable),
            Expression::Binary { left, right, .. } => left.nullable(schema) || right.nullable(schema),
            Expression::Unary { .. } => false,
        }
    }

    /// Checks that the expression can be evaluated against rows of the given schema
    pub fn check(&self, schema: &TableSchema) -> Result<()> {
        match self {
            Expression::Constant(_) => Ok(()),
            Expression::Column { index, datatype } => match schema.columns.get(*index) {
                None => Err(Error::ColumnNotFound(format!("#{}", index))),
                Some(column) if column.datatype != *datatype => Err(Error::TypeMismatch {
                    column: column.name.clone(),
                    expected: *datatype,
                    found: column.datatype,
                }),
                Some(_) => Ok(()),
            },
            Expression::Binary { left, right, .. } => {
                left.check(schema)?;
                right.check(schema)?;
                if left.datatype() != right.datatype() {
                    return Err(Error::IncompatibleTypes {
                        left: left.datatype(),
                        right: right.datatype(),
                    });
                }
                Ok(())
            }
            Expression::Unary { operand, .. } => operand.check(schema),
        }
    }

    /// Evaluates the expression for one row
    pub fn evaluate(&self, row: &RowRef<'_>) -> Value {
        match self {
            Expression::Constant(value) => value.clone(),
            Expression::Column { index, .. } => row.get(*index).clone(),
            Expression::Binary {
                left,
                operator,
                right,
            } => {
                let left = left.evaluate(row);
                let right = right.evaluate(row);
                match left.compare(&right) {
                    Compared::Null => Value::null(Type::Boolean),
                    Compared::Invalid => unreachable!(
                        "comparison of {} and {} passed type checking",
                        left.datatype(),
                        right.datatype()
                    ),
                    compared => Value::boolean(satisfies(*operator, compared)),
                }
            }
            Expression::Unary { operand, operator } => {
                let null = operand.evaluate(row).is_null();
                Value::boolean(match operator {
                    UnaryOperator::IsNull => null,
                    UnaryOperator::IsNotNull => !null,
                })
            }
        }
    }
}

/// Whether a comparison result satisfies the operator
fn satisfies(operator: BinaryOperator, compared: Compared) -> bool {
    match compared {
        Compared::Lt => matches!(operator, BinaryOperator::Lt | BinaryOperator::Le | BinaryOperator::Ne),
        Compared::Eq => matches!(operator, BinaryOperator::Eq | BinaryOperator::Le | BinaryOperator::Ge),
        Compared::Gt => matches!(operator, BinaryOperator::Gt | BinaryOperator::Ge | BinaryOperator::Ne),
        Compared::Null | Compared::Invalid => false,
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Constant(value) => write!(f, "Constant({})", value),
            Expression::Column { index, datatype } => write!(f, "ColumnReference({}, {})", index, datatype),
            Expression::Binary {
                left,
                operator,
                right,
            } => write!(f, "BinaryOperation({} {} {})", left, operator, right),
            Expression::Unary { operand, operator } => write!(f, "UnaryOperation({} {})", operand, operator),
        }
    }
}
