//! Lexical analysis module.
//!
//! Converts source text into a stream of tokens for the parser. It handles:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Keywords, identifiers, numeric and string literals, operators
//! - Significant indentation (`Newline`, `Indent` and `Dedent` tokens)
//! - Byte offset spans for error reporting

pub mod lexer;
pub mod tokens;
