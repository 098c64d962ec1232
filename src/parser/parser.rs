//! Parser implementation for building the expression tree.

use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::ast::Expr,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

/// The parser state: the token stream and the current position in it.
pub struct Parser {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// An `EOF` token is appended if the stream does not already end in one,
    /// so the parser never runs off the end of the stream.
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.0)
                .unwrap_or_default();
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: crate::Span {
                    start: Position(end, Rc::clone(&file)),
                    end: Position(end, file),
                },
            });
        }

        Parser { tokens, pos: 0 }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        self.pos += 1;
        token
    }

    fn error_here(&self, error: ErrorImpl) -> Error {
        Error::new(error, self.current_token().span.start.clone())
    }

    /// Parses one expression starting at the current token.
    pub fn parse_expr(&mut self) -> Result<Expr, Error> {
        match self.current_token_kind() {
            TokenKind::Number => {
                let token = self.advance();
                token.value.parse::<i32>().map(Expr::Number).map_err(|_| {
                    Error::new(
                        ErrorImpl::NumberParseError {
                            token: token.value.clone(),
                        },
                        token.span.start.clone(),
                    )
                })
            }
            TokenKind::String => Ok(Expr::String(self.advance().value)),
            TokenKind::Symbol => Ok(Expr::Symbol(self.advance().value)),
            TokenKind::OpenParen => self.parse_list(),
            TokenKind::CloseParen => Err(self.error_here(ErrorImpl::UnexpectedToken {
                token: self.current_token().value.clone(),
            })),
            TokenKind::EOF => Err(self.error_here(ErrorImpl::UnexpectedEof)),
        }
    }

    fn parse_list(&mut self) -> Result<Expr, Error> {
        self.advance();

        let mut elements = vec![];
        loop {
            match self.current_token_kind() {
                TokenKind::CloseParen => {
                    self.advance();
                    return Ok(Expr::List(elements));
                }
                TokenKind::EOF => return Err(self.error_here(ErrorImpl::UnexpectedEof)),
                _ => elements.push(self.parse_expr()?),
            }
        }
    }
}

/// Parses a token stream into exactly one top-level expression.
///
/// # Arguments
///
/// * `tokens` - Tokens produced by `tokenize`
/// * `file` - Name of the source file, used for error positions
///
/// # Returns
///
/// The expression tree, or a positioned syntax error.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Expr, Error> {
    let mut parser = Parser::new(tokens, file);

    let expr = parser.parse_expr()?;

    if parser.current_token_kind() != TokenKind::EOF {
        return Err(parser.error_here(ErrorImpl::TrailingInput {
            token: parser.current_token().value.clone(),
        }));
    }

    trace!(%expr, "parsed program");
    Ok(expr)
}
