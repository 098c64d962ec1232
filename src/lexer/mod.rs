//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts Cylli source
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Parentheses, integer literals, string literals and symbols
//! - Token position tracking for error reporting
//! - `;` line comments and whitespace

pub mod lexer;
pub mod tokens;
