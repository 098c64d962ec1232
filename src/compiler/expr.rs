use inkwell::values::{BasicMetadataValueEnum, BasicValueEnum};
use tracing::trace;

use crate::{ast::ast::Expr, errors::errors::GenerationError};

use super::{compiler::CompilationUnit, externals::PRINTF};

/// Generates LLVM IR for the given expression and returns its value.
///
/// Numbers become `i32` constants, strings become pointers to private
/// global buffers, and lists are dispatched on their operator symbol.
/// Symbols have no bindings to resolve to and are rejected.
pub fn generate<'a>(
    unit: &CompilationUnit<'a>,
    expression: &Expr,
) -> Result<BasicValueEnum<'a>, GenerationError> {
    trace!(kind = expression.get_kind_name(), %expression, "generating expression");

    match expression {
        Expr::Number(value) => Ok(unit
            .context
            .i32_type()
            .const_int(*value as u64, true)
            .into()),
        Expr::String(value) => {
            unit.require_cursor()?;

            Ok(unit
                .builder
                .build_global_string_ptr(&expand_escapes(value), "")
                .map_err(|error| GenerationError::Builder(error.to_string()))?
                .as_pointer_value()
                .into())
        }
        Expr::Symbol(name) => Err(GenerationError::UnresolvedSymbol { name: name.clone() }),
        Expr::List(elements) => gen_list(unit, expression, elements),
    }
}

/// Replaces each two-character `\n` escape with a line feed.
pub fn expand_escapes(value: &str) -> String {
    value.replace("\\n", "\n")
}

fn gen_list<'a>(
    unit: &CompilationUnit<'a>,
    expression: &Expr,
    elements: &[Expr],
) -> Result<BasicValueEnum<'a>, GenerationError> {
    let (head, arguments) = elements.split_first().ok_or(GenerationError::EmptyList)?;

    let Some(operator) = head.as_symbol() else {
        return Err(GenerationError::InvalidOperator {
            kind: head.get_kind_name(),
            node: expression.to_string(),
        });
    };

    match operator {
        PRINTF => gen_printf(unit, arguments),
        _ => Err(GenerationError::UnknownOperator {
            name: operator.to_string(),
            node: expression.to_string(),
        }),
    }
}

/// `(printf format args...)`: a variadic call to the C `printf`.
///
/// Arguments are generated strictly left to right and passed in that order.
fn gen_printf<'a>(
    unit: &CompilationUnit<'a>,
    arguments: &[Expr],
) -> Result<BasicValueEnum<'a>, GenerationError> {
    // Declared when the unit was created; missing means the registry is broken.
    let function = unit
        .module
        .get_function(PRINTF)
        .ok_or_else(|| GenerationError::MissingExternal {
            name: PRINTF.to_string(),
        })?;

    let param_types = function.get_type().get_param_types();
    let required = param_types.len();
    if arguments.len() < required {
        return Err(GenerationError::MissingArguments {
            name: PRINTF.to_string(),
            expected: required,
            received: arguments.len(),
        });
    }

    let mut args: Vec<BasicMetadataValueEnum<'a>> = Vec::with_capacity(arguments.len());
    for (index, argument) in arguments.iter().enumerate() {
        let value = generate(unit, argument)?;

        // Variadic arguments past the fixed parameters are passed as is.
        if let Some(expected) = param_types.get(index) {
            if value.get_type() != *expected {
                return Err(GenerationError::ArgumentTypeMismatch {
                    name: PRINTF.to_string(),
                    index,
                    expected: expected.print_to_string().to_string(),
                    received: value.get_type().print_to_string().to_string(),
                    node: argument.to_string(),
                });
            }
        }

        args.push(value.into());
    }

    unit.require_cursor()?;

    unit.builder
        .build_call(function, &args, "")
        .map_err(|error| GenerationError::Builder(error.to_string()))?
        .try_as_basic_value()
        .left()
        .ok_or_else(|| GenerationError::Builder(format!("call to {} produced no value", PRINTF)))
}
