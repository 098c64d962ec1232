//! Parser module for building the expression tree.
//!
//! This module turns the token stream produced by the lexer into a single
//! `Expr`. Cylli is a plain S-expression language, so parsing is a small
//! recursive descent over atoms and parenthesised lists:
//!
//! - Atoms become `Number`, `String` or `Symbol` nodes
//! - `(` ... `)` becomes a `List` node
//! - Exactly one top-level form is accepted

pub mod parser;

#[cfg(test)]
mod tests;
