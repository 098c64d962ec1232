//! Foreign functions the generated code may call.
//!
//! Every entry is declared once when a compilation unit is created, before
//! any function body is built, so operator handlers can look their callee
//! up in the module by name.

use inkwell::{context::Context, types::FunctionType, AddressSpace};
use tracing::debug;

use crate::errors::errors::FunctionError;

use super::compiler::CompilationUnit;

/// Name of the C library formatted-output function.
pub const PRINTF: &str = "printf";

/// A foreign function: its symbol name and how to build its LLVM signature.
pub struct ExternalFunction {
    pub name: &'static str,
    pub signature: fn(&Context) -> FunctionType<'_>,
}

pub const EXTERNAL_FUNCTIONS: &[ExternalFunction] = &[ExternalFunction {
    name: PRINTF,
    signature: printf_type,
}];

/// `i32 printf(i8* format, ...)`
pub fn printf_type(context: &Context) -> FunctionType<'_> {
    let i8_ptr_type = context.i8_type().ptr_type(AddressSpace::default());

    context.i32_type().fn_type(&[i8_ptr_type.into()], true)
}

/// Declares every external function in the unit's module.
pub fn declare_external_functions(unit: &CompilationUnit) -> Result<(), FunctionError> {
    for external in EXTERNAL_FUNCTIONS {
        unit.declare_external(external.name, (external.signature)(unit.context))?;
    }

    debug!(count = EXTERNAL_FUNCTIONS.len(), "declared external functions");
    Ok(())
}
