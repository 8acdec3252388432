//! relquery - an in-memory relational query engine
//!
//! This crate provides:
//! - SQL parsing (lexer, parser, AST) for a small SELECT dialect
//! - Binding and planning into typed plan trees
//! - Materializing execution: load, select, project and nested loop joins
//! - Decimal, date, text and boolean values with SQL null semantics

pub mod error;
pub mod sql;
pub mod storage;

pub use error::{Error, Result};
pub use sql::engine::{Catalog, Session};
pub use sql::relation::Relation;
pub use storage::Database;
