//! Code generation module for the compiler.
//!
//! This module contains the LLVM-based code generator that transforms
//! the expression tree into LLVM IR. It handles:
//!
//! - The compilation unit: context, module, builder and insertion cursor
//! - Function creation and entry blocks
//! - Expression generation and the `printf` special form
//! - Declarations of external C functions
//! - Printing the finished module as textual IR

pub mod compiler;
pub mod emit;
pub mod expr;
pub mod externals;
