//! SQL processing module
//!
//! This module provides:
//! - `types`: values, decimals and dates
//! - `schema`: table and column schema definitions
//! - `relation`: tables and query results
//! - `parser`: SQL lexer and parser
//! - `plan`: binding and plan construction
//! - `executor`: plan execution
//! - `engine`: catalog abstraction and query sessions

pub mod engine;
pub mod executor;
pub mod parser;
pub mod plan;
pub mod relation;
pub mod schema;
pub mod types;
