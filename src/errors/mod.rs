//! Error types and error handling for the compiler.
//!
//! This module defines the positional error type shared by every compilation
//! phase. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for the front end, the IR builder and the emitter
//! - Helpful error messages and suggestions

pub mod errors;
