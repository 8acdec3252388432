//! Query plans
//!
//! A plan is a tree of [`Node`]s. Every node carries the schema of the rows it produces,
//! and the constructors validate the node against its inputs, so a plan that was built
//! successfully can be executed without further checks.

use std::collections::HashSet;

use crate::{
    error::{Error, Result},
    sql::{
        engine::Catalog,
        parser::ast::{self, JoinType},
        relation::Relation,
        schema::{ColumnSchema, TableSchema},
        types::Type,
    },
};

pub use self::expression::Expression;
pub use self::planner::Planner;

pub mod binder;
pub mod expression;
mod planner;
mod printer;

/// One named output column of a projection
#[derive(Debug, Clone, PartialEq)]
pub struct OutputColumn {
    pub name: String,
    pub expr: Expression,
}

impl OutputColumn {
    pub fn new(name: impl Into<String>, expr: Expression) -> Self {
        Self {
            name: name.into(),
            expr,
        }
    }
}

/// Plan node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Reads every row of a stored table, with column names qualified by the table name
    Load { table_name: String, schema: TableSchema },
    /// Keeps the rows for which the condition is true
    Select { source: Box<Node>, condition: Expression },
    /// Computes one value per output column for each source row
    Project {
        source: Box<Node>,
        columns: Vec<OutputColumn>,
        schema: TableSchema,
    },
    /// Nested loop join of two inputs
    Join {
        join_type: JoinType,
        left: Box<Node>,
        right: Box<Node>,
        condition: Expression,
        schema: TableSchema,
    },
}

impl Node {
    /// Loads a table stored under `table_name` with the given (unqualified) schema
    pub fn load(table_name: impl Into<String>, schema: &TableSchema) -> Self {
        let table_name = table_name.into();
        let schema = schema.prefix(&table_name);
        Node::Load { table_name, schema }
    }

    pub fn select(source: Node, condition: Expression) -> Result<Self> {
        check_condition(&condition, source.schema())?;
        Ok(Node::Select {
            source: Box::new(source),
            condition,
        })
    }

    pub fn project(source: Node, columns: Vec<OutputColumn>) -> Result<Self> {
        let mut names = HashSet::new();
        let mut schema = Vec::with_capacity(columns.len());
        for column in &columns {
            if !names.insert(column.name.as_str()) {
                return Err(Error::DuplicateColumn(column.name.clone()));
            }
            column.expr.check(source.schema())?;
            schema.push(ColumnSchema::new(
                column.name.clone(),
                column.expr.datatype(),
                column.expr.nullable(source.schema()),
            ));
        }
        Ok(Node::Project {
            source: Box::new(source),
            columns,
            schema: TableSchema::new(schema),
        })
    }

    /// Joins two inputs. The output schema is the left columns followed by the right
    /// columns; the side that may be padded with nulls becomes nullable.
    pub fn join(join_type: JoinType, left: Node, right: Node, condition: Expression) -> Result<Self> {
        let schema = match join_type {
            JoinType::Inner => left.schema().combine(right.schema()),
            JoinType::LeftOuter => left.schema().combine(&right.schema().nullable()),
            JoinType::RightOuter => left.schema().nullable().combine(right.schema()),
        };
        check_condition(&condition, &schema)?;
        Ok(Node::Join {
            join_type,
            left: Box::new(left),
            right: Box::new(right),
            condition,
            schema,
        })
    }

    /// Schema of the rows this node produces
    pub fn schema(&self) -> &TableSchema {
        match self {
            Node::Load { schema, .. } | Node::Project { schema, .. } | Node::Join { schema, .. } => schema,
            Node::Select { source, .. } => source.schema(),
        }
    }
}

fn check_condition(condition: &Expression, schema: &TableSchema) -> Result<()> {
    if condition.datatype() != Type::Boolean {
        return Err(Error::InvalidCondition(condition.datatype()));
    }
    condition.check(schema)
}

/// Executable query plan
#[derive(Debug, Clone, PartialEq)]
pub struct Plan(pub Node);

impl Plan {
    /// Plans a statement against the tables of a catalog
    pub fn build<C: Catalog + ?Sized>(statement: ast::Statement, catalog: &C) -> Result<Self> {
        Planner::new(catalog).build(statement)
    }

    pub fn schema(&self) -> &TableSchema {
        self.0.schema()
    }

    /// Runs the plan, materializing the result
    pub fn execute<C: Catalog + ?Sized>(&self, catalog: &C) -> Relation {
        self.0.run(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::{Expression, Node, OutputColumn};
    use crate::{
        error::{Error, Result},
        sql::{
            parser::ast::{BinaryOperator, JoinType, UnaryOperator},
            schema::{ColumnSchema, TableSchema},
            types::{Type, Value},
        },
    };

    fn films() -> Node {
        Node::load(
            "films",
            &TableSchema::new(vec![
                ColumnSchema::new("id", Type::Decimal, false),
                ColumnSchema::new("name", Type::Text, false),
            ]),
        )
    }

    fn people() -> Node {
        Node::load(
            "people",
            &TableSchema::new(vec![
                ColumnSchema::new("id", Type::Decimal, false),
                ColumnSchema::new("name", Type::Text, true),
            ]),
        )
    }

    fn names(node: &Node) -> Vec<String> {
        node.schema().columns.iter().map(|c| c.name.clone()).collect()
    }

    fn nullable(node: &Node) -> Vec<bool> {
        node.schema().columns.iter().map(|c| c.nullable).collect()
    }

    fn ids_equal() -> Result<Expression> {
        Expression::binary(
            Expression::column(0, Type::Decimal),
            BinaryOperator::Eq,
            Expression::column(2, Type::Decimal),
        )
    }

    #[test]
    fn test_load() -> Result<()> {
        let node = films();
        assert_eq!(names(&node), vec!["films.id", "films.name"]);
        Ok(())
    }

    #[test]
    fn test_select() -> Result<()> {
        let condition = Expression::unary(Expression::column(1, Type::Text), UnaryOperator::IsNull);
        let node = Node::select(films(), condition)?;
        assert_eq!(node.schema(), films().schema());

        assert_eq!(
            Node::select(films(), Expression::column(1, Type::Text)),
            Err(Error::InvalidCondition(Type::Text))
        );
        assert!(Node::select(films(), Expression::column(2, Type::Boolean)).is_err());
        Ok(())
    }

    #[test]
    fn test_project() -> Result<()> {
        let columns = vec![
            OutputColumn::new("people.name", Expression::column(1, Type::Text)),
            OutputColumn::new("c2", Expression::constant(Value::null(Type::Date))),
            OutputColumn::new("c3", Expression::constant(Value::boolean(true))),
            OutputColumn::new(
                "c4",
                Expression::unary(Expression::column(1, Type::Text), UnaryOperator::IsNull),
            ),
        ];
        let node = Node::project(people(), columns)?;
        assert_eq!(names(&node), vec!["people.name", "c2", "c3", "c4"]);
        assert_eq!(nullable(&node), vec![true, true, false, false]);

        let duplicate = vec![
            OutputColumn::new("x", Expression::column(0, Type::Decimal)),
            OutputColumn::new("x", Expression::column(1, Type::Text)),
        ];
        assert_eq!(
            Node::project(people(), duplicate),
            Err(Error::DuplicateColumn("x".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_join_schemas() -> Result<()> {
        let inner = Node::join(JoinType::Inner, films(), people(), ids_equal()?)?;
        assert_eq!(names(&inner), vec!["films.id", "films.name", "people.id", "people.name"]);
        assert_eq!(nullable(&inner), vec![false, false, false, true]);

        let left = Node::join(JoinType::LeftOuter, films(), people(), ids_equal()?)?;
        assert_eq!(nullable(&left), vec![false, false, true, true]);

        let right = Node::join(JoinType::RightOuter, films(), people(), ids_equal()?)?;
        assert_eq!(nullable(&right), vec![true, true, false, true]);

        assert_eq!(
            Node::join(JoinType::Inner, films(), people(), Expression::column(0, Type::Decimal)),
            Err(Error::InvalidCondition(Type::Decimal))
        );
        Ok(())
    }
}
