/// AST (Abstract Syntax Tree) module
/// Contains the generic syntax tree produced by the parser
///
/// Submodules:
/// - expressions: Expression node kinds and literals
/// - statements: Statement node kinds and the root module
/// - operators: Operator enums shared by the parser and the IR
pub mod expressions;
pub mod operators;
pub mod statements;
