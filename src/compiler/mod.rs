//! Code generation module.
//!
//! Emits Rust source text from the IR. It handles:
//!
//! - Declarations and reassignments of variables
//! - Coercions between big integers, floats and strings per operator
//! - The `print` builtin
//! - Assembly of the program with the `use` lines it needs

pub mod builtins;
pub mod compiler;
pub mod expr;
pub mod stmt;

#[cfg(test)]
mod tests;
