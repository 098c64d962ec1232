/// AST (Abstract Syntax Tree) module
/// Contains the expression tree produced by the parser and consumed by the compiler
///
/// Submodules:
/// - ast: The `Expr` sum type and its S-expression rendering
pub mod ast;
