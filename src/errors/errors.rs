use std::{fmt::Display, io, path::PathBuf};

use thiserror::Error;

use crate::Position;

/// A syntax error raised while lexing or parsing, tied to a source position.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEof => "UnexpectedEof",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::TrailingInput { .. } => "TrailingInput",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, is there an extra closing parenthesis?",
                token
            )),
            ErrorImpl::UnexpectedEof => ErrorTip::Suggestion(String::from(
                "Unexpected end of input, did you forget a closing parenthesis?",
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it outside the 32-bit integer range?",
                token
            )),
            ErrorImpl::TrailingInput { token } => ErrorTip::Suggestion(format!(
                "Unexpected `{}` after the program, only one top-level form is allowed",
                token
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.internal_error, self.position.1, self.position.0
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unexpected input after top-level form: {token:?}")]
    TrailingInput { token: String },
}

/// Failures while creating a function or opening its entry block.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    #[error("function {name:?} already exists with signature `{existing}`, requested `{requested}`")]
    SignatureMismatch {
        name: String,
        existing: String,
        requested: String,
    },
    #[error("function {name:?} failed verification")]
    VerificationFailed { name: String },
    #[error("function {name:?} already has an entry block")]
    EntryAlreadyOpen { name: String },
}

/// Failures while turning an expression into an IR value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("cannot compile an empty list")]
    EmptyList,
    #[error("list head must be an operator symbol, found {kind} in `{node}`")]
    InvalidOperator { kind: &'static str, node: String },
    #[error("unknown operator {name:?} in `{node}`")]
    UnknownOperator { name: String, node: String },
    #[error("symbol {name:?} cannot be resolved, variables are not supported")]
    UnresolvedSymbol { name: String },
    #[error("{name:?} expects at least {expected} arguments, received {received}")]
    MissingArguments {
        name: String,
        expected: usize,
        received: usize,
    },
    #[error("argument {index} of {name:?} must be `{expected}`, found `{received}` in `{node}`")]
    ArgumentTypeMismatch {
        name: String,
        index: usize,
        expected: String,
        received: String,
        node: String,
    },
    #[error("external function {name:?} was not declared")]
    MissingExternal { name: String },
    #[error("no insertion point is set")]
    NoCursor,
    #[error("IR builder error: {0}")]
    Builder(String),
}

/// Failures while rendering the module.
#[derive(Error, Debug)]
pub enum EmissionError {
    #[error("failed to write IR to {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write IR to stream: {0}")]
    Stream(#[source] io::Error),
}

/// A compilation failure, naming the stage that failed.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("function creation failed: {0}")]
    FunctionCreation(#[from] FunctionError),
    #[error("expression generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("emission failed: {0}")]
    Emission(#[from] EmissionError),
}

/// Everything `exec` can fail with.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("syntax error: {0}")]
    Syntax(#[from] Error),
    #[error(transparent)]
    Compile(#[from] CompileError),
}
