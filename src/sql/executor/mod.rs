//! Plan execution
//!
//! Plans are validated when built, so execution itself cannot fail. Every node fully
//! materializes its output before its parent runs. A table that was present at planning
//! time but missing at execution time is a broken contract and panics.

use crate::sql::{engine::Catalog, plan::Node, relation::Relation};

mod join;
mod query;

impl Node {
    /// Runs the plan rooted at this node against a catalog
    pub fn run<C: Catalog + ?Sized>(&self, catalog: &C) -> Relation {
        match self {
            Node::Load { table_name, schema } => query::load(catalog, table_name, schema),
            Node::Select { source, condition } => query::select(source.run(catalog), condition),
            Node::Project {
                source,
                columns,
                schema,
            } => query::project(source.run(catalog), columns, schema),
            Node::Join {
                join_type,
                left,
                right,
                condition,
                schema,
            } => join::nested_loop_join(*join_type, left.run(catalog), right.run(catalog), condition, schema),
        }
    }
}
