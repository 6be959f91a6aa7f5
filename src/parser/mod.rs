//! Parser module for building the syntax tree.
//!
//! This module turns the token stream produced by the lexer into a
//! [`Module`](crate::ast::statements::Module). Expressions are parsed with a
//! Pratt parser: every token kind may register a NUD (prefix) handler, a
//! LED (infix) handler with a binding power, or a statement handler.
//!
//! - `lookups`: binding powers and handler registration
//! - `expr`: expression handlers
//! - `stmt`: statement handlers and indented blocks
//! - `parser`: parser state and the `parse` entry point

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
