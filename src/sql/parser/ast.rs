use std::fmt::Display;

use crate::sql::types::{Date, Decimal};

/// Abstract Syntax Tree (AST) node definitions for SQL statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT statement
    Select {
        select: SelectList,
        from: FromItem,
        where_clause: Option<Expression>,
    },
}

/// What a SELECT statement returns
#[derive(Debug, Clone, PartialEq)]
pub enum SelectList {
    /// `*`: every column of the FROM clause
    Star,
    /// Possibly empty list of expressions
    Expressions(Vec<Expression>),
}

/// FROM clause item - represents a table or join expression
#[derive(Debug, Clone, PartialEq)]
pub enum FromItem {
    /// Single table reference
    Table { name: String },

    /// Join expression (two tables joined together)
    Join {
        left: Box<FromItem>,
        right: Box<FromItem>,
        join_type: JoinType,
        /// Join ON condition
        predicate: Expression,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    LeftOuter,
    RightOuter,
}

impl Display for JoinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            JoinType::Inner => "inner",
            JoinType::LeftOuter => "left outer",
            JoinType::RightOuter => "right outer",
        })
    }
}

/// Expression types (column refs, literals, comparisons, null checks)
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Column reference, optionally qualified with a table name
    Column {
        relation: Option<String>,
        name: String,
    },
    String(String),
    Number(Decimal),
    Boolean(bool),
    Date(Date),
    /// Comparison (e.g., `films.director = people.id`)
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    /// Null check (e.g., `name is not null`)
    Unary {
        operand: Box<Expression>,
        operator: UnaryOperator,
    },
}

impl Expression {
    pub fn column(name: &str) -> Self {
        Expression::Column {
            relation: None,
            name: name.to_string(),
        }
    }

    pub fn qualified_column(relation: &str, name: &str) -> Self {
        Expression::Column {
            relation: Some(relation.to_string()),
            name: name.to_string(),
        }
    }

    pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BinaryOperator::Eq => "eq",
            BinaryOperator::Ne => "ne",
            BinaryOperator::Lt => "lt",
            BinaryOperator::Gt => "gt",
            BinaryOperator::Le => "le",
            BinaryOperator::Ge => "ge",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    IsNull,
    IsNotNull,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            UnaryOperator::IsNull => "is null",
            UnaryOperator::IsNotNull => "is not null",
        })
    }
}
