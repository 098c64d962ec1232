//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Positioned syntax errors raised by the lexer and parser
//! - Code generation errors, grouped by the stage that failed
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
