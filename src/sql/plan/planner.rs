use tracing::debug;

use crate::{
    error::{Error, Result},
    sql::{
        engine::Catalog,
        parser::ast,
        plan::{Node, OutputColumn, Plan, binder::bind},
    },
};

/// Query planner - converts AST into plan nodes, resolving tables through a catalog
pub struct Planner<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: Catalog + ?Sized> Planner<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Builds an execution plan from an AST statement
    pub fn build(&self, stmt: ast::Statement) -> Result<Plan> {
        let plan = Plan(self.build_statement(stmt)?);
        debug!(columns = %plan.schema(), "built query plan");
        Ok(plan)
    }

    fn build_statement(&self, stmt: ast::Statement) -> Result<Node> {
        let ast::Statement::Select {
            select,
            from,
            where_clause,
        } = stmt;

        // FROM clause (single table or join result)
        let mut node = self.build_from_item(from)?;

        // WHERE
        if let Some(expr) = where_clause {
            let (condition, _) = bind(&expr, node.schema())?;
            node = Node::select(node, condition)?;
        }

        // projection
        match select {
            ast::SelectList::Star => Ok(node),
            ast::SelectList::Expressions(exprs) if exprs.is_empty() => Err(Error::EmptySelectList),
            ast::SelectList::Expressions(exprs) => {
                let columns = exprs
                    .iter()
                    .enumerate()
                    .map(|(i, expr)| {
                        let (expr, name) = bind(expr, node.schema())?;
                        Ok(OutputColumn::new(name.unwrap_or_else(|| format!("c{}", i + 1)), expr))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Node::project(node, columns)
            }
        }
    }

    fn build_from_item(&self, item: ast::FromItem) -> Result<Node> {
        Ok(match item {
            ast::FromItem::Table { name } => {
                let table = self.catalog.must_get_table(&name)?;
                Node::load(name, &table.schema)
            }
            ast::FromItem::Join {
                left,
                right,
                join_type,
                predicate,
            } => {
                // Recursively build join inputs (base case: single table)
                let left = self.build_from_item(*left)?;
                let right = self.build_from_item(*right)?;
                let (condition, _) = bind(&predicate, &left.schema().combine(right.schema()))?;
                Node::join(join_type, left, right, condition)?
            }
        })
    }
}
