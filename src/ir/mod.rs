//! Intermediate representation module.
//!
//! Lowers the syntax tree into a small typed IR. The builder infers a
//! `TypeKind` for every expression, tracks variable types in a single
//! environment, and rejects anything the emitter cannot translate:
//!
//! - Unsupported statements and expressions (`UnsupportedConstruct`)
//! - String operands mixed with other types (`TypeError`)

pub mod builder;
pub mod ir;
