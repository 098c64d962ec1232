//! Main compiler module.
//!
//! This module contains the `CompilationUnit`, which owns everything one
//! compilation mutates: the LLVM module, the IR builder and the explicit
//! insertion cursor. It also implements function assembly and the top-level
//! compile sequence for `main`.

use std::{io::Write, path::Path};

use inkwell::{
    basic_block::BasicBlock,
    builder::Builder,
    context::Context,
    module::{Linkage, Module},
    types::FunctionType,
    values::FunctionValue,
};
use tracing::debug;

use crate::{
    ast::ast::Expr,
    errors::errors::{CompileError, EmissionError, FunctionError, GenerationError},
};

use super::{emit, expr::generate, externals::declare_external_functions};

/// Name every Cylli module is tagged with.
pub const MODULE_NAME: &str = "CylliLLVM";

/// The current insertion point: instructions are appended to the end of
/// `block`, which belongs to `function`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    pub function: FunctionValue<'a>,
    pub block: BasicBlock<'a>,
}

/// The state of a single compilation.
///
/// One unit is created per compilation and never shared. It holds:
/// - A reference to the LLVM context (type and constant uniquing)
/// - The LLVM module receiving functions, declarations and constants
/// - The IR builder, kept in sync with `cursor`
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the LLVM context
pub struct CompilationUnit<'a> {
    /// Reference to the LLVM context
    pub context: &'a Context,
    /// The LLVM module being built
    pub module: Module<'a>,
    /// The LLVM IR builder
    pub builder: Builder<'a>,
    /// Where the builder currently appends, if anywhere
    cursor: Option<Cursor<'a>>,
}

impl<'a> CompilationUnit<'a> {
    /// Creates a fresh unit with an empty module and no cursor, then
    /// declares the external functions operators rely on.
    pub fn new(context: &'a Context) -> Result<Self, FunctionError> {
        let unit = CompilationUnit {
            context,
            module: context.create_module(MODULE_NAME),
            builder: context.create_builder(),
            cursor: None,
        };

        declare_external_functions(&unit)?;
        debug!(module = MODULE_NAME, "created compilation unit");

        Ok(unit)
    }

    /// Returns the current insertion point.
    pub fn cursor(&self) -> Option<Cursor<'a>> {
        self.cursor
    }

    /// Returns the current insertion point, failing if none is set.
    pub fn require_cursor(&self) -> Result<Cursor<'a>, GenerationError> {
        self.cursor.ok_or(GenerationError::NoCursor)
    }

    /// Declares a foreign function with external linkage.
    ///
    /// Declaring the same name again with the same signature returns the
    /// existing declaration; a different signature is rejected.
    pub fn declare_external(
        &self,
        name: &str,
        signature: FunctionType<'a>,
    ) -> Result<FunctionValue<'a>, FunctionError> {
        if let Some(existing) = self.module.get_function(name) {
            check_signature(name, existing, signature)?;
            return Ok(existing);
        }

        debug!(name, "declaring external function");
        Ok(self
            .module
            .add_function(name, signature, Some(Linkage::External)))
    }

    /// Looks up a function by name, or creates it if absent.
    ///
    /// A reused function must have exactly `signature`. New functions get
    /// external linkage and are verified before being returned.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the function
    /// * `signature` - LLVM function type signature
    pub fn get_or_create_function(
        &self,
        name: &str,
        signature: FunctionType<'a>,
    ) -> Result<FunctionValue<'a>, FunctionError> {
        if let Some(existing) = self.module.get_function(name) {
            check_signature(name, existing, signature)?;
            debug!(name, "reusing existing function");
            return Ok(existing);
        }

        let function = self
            .module
            .add_function(name, signature, Some(Linkage::External));

        if !function.verify(false) {
            return Err(FunctionError::VerificationFailed {
                name: name.to_string(),
            });
        }

        debug!(name, "created function");
        Ok(function)
    }

    /// Appends the `entry` block to `function` and moves the cursor there.
    ///
    /// Fails if the function already has a body, since a second entry block
    /// would be unreachable.
    pub fn open_entry(&mut self, function: FunctionValue<'a>) -> Result<Cursor<'a>, FunctionError> {
        if function.get_first_basic_block().is_some() {
            return Err(FunctionError::EntryAlreadyOpen {
                name: function_name(function),
            });
        }

        let entry = self.context.append_basic_block(function, "entry");

        Ok(self.reposition_to(function, entry))
    }

    /// Moves the cursor to the end of `block`.
    pub fn reposition_to(&mut self, function: FunctionValue<'a>, block: BasicBlock<'a>) -> Cursor<'a> {
        self.builder.position_at_end(block);

        let cursor = Cursor { function, block };
        self.cursor = Some(cursor);
        cursor
    }

    /// Compiles `ast` as the body of `main`.
    ///
    /// The program is evaluated for its effects: the value of `ast` is
    /// discarded and `main` always returns `0`.
    pub fn compile(&mut self, ast: &Expr) -> Result<FunctionValue<'a>, CompileError> {
        let main = self.get_or_create_function("main", self.context.i32_type().fn_type(&[], false))?;
        self.open_entry(main)?;

        generate(self, ast)?;

        self.require_cursor()?;
        self.builder
            .build_return(Some(&self.context.i32_type().const_zero()))
            .map_err(|error| GenerationError::Builder(error.to_string()))?;

        if !main.verify(false) {
            return Err(FunctionError::VerificationFailed {
                name: function_name(main),
            }
            .into());
        }

        debug!("compiled main");
        Ok(main)
    }

    /// Writes the module's textual IR to `stream`.
    pub fn print<W: Write>(&self, stream: &mut W) -> Result<(), EmissionError> {
        emit::print(self, stream)
    }

    /// Writes the module's textual IR to `path`, replacing its contents.
    pub fn save(&self, path: &Path) -> Result<(), EmissionError> {
        emit::save(self, path)
    }
}

fn function_name(function: FunctionValue) -> String {
    function.get_name().to_string_lossy().into_owned()
}

fn check_signature<'a>(
    name: &str,
    existing: FunctionValue<'a>,
    requested: FunctionType<'a>,
) -> Result<(), FunctionError> {
    if existing.get_type() == requested {
        return Ok(());
    }

    Err(FunctionError::SignatureMismatch {
        name: name.to_string(),
        existing: existing.get_type().print_to_string().to_string(),
        requested: requested.print_to_string().to_string(),
    })
}

/// Compiles an expression tree into a fresh compilation unit.
///
/// This is the primary entry point for code generation. It:
/// 1. Creates a new CompilationUnit (declaring external functions)
/// 2. Builds `main` with the program as its body
///
/// # Arguments
///
/// * `ast` - The top-level expression of the program
/// * `context` - Reference to the LLVM context
///
/// # Returns
///
/// The unit holding the finished module, ready to be printed or saved.
pub fn compile<'a>(ast: &Expr, context: &'a Context) -> Result<CompilationUnit<'a>, CompileError> {
    let mut unit = CompilationUnit::new(context)?;

    unit.compile(ast)?;

    Ok(unit)
}
