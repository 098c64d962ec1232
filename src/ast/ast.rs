use std::fmt::Display;

/// Expression
///
/// A single node of a Cylli program. Every program is one top-level
/// expression; lists nest arbitrarily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A 32-bit signed integer literal.
    Number(i32),
    /// A string literal. Escapes are kept verbatim, so `\n` is still the
    /// two characters `\` and `n` at this point.
    String(String),
    /// A bare name, e.g. an operator tag.
    Symbol(String),
    /// A parenthesised list of expressions.
    List(Vec<Expr>),
}

impl Expr {
    /// Returns the kind name used in diagnostics.
    pub fn get_kind_name(&self) -> &'static str {
        match self {
            Expr::Number(_) => "number",
            Expr::String(_) => "string",
            Expr::Symbol(_) => "symbol",
            Expr::List(_) => "list",
        }
    }

    /// Returns the symbol name if this node is a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(name) => Some(name),
            _ => None,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(value) => write!(f, "{}", value),
            Expr::String(value) => write!(f, "\"{}\"", value),
            Expr::Symbol(name) => write!(f, "{}", name),
            Expr::List(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, ")")
            }
        }
    }
}
