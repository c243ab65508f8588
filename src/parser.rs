//! Recursive-descent parser with operator-precedence climbing.
//!
//! The grammar:
//!
//! ```text
//! query      := expr EOF
//! expr       := primary (binop primary)*
//! primary    := SET_NAME | ITEM | "{" [ expr ("," expr)* ] "}"
//! binop      := "|" | "&" | "-" | "^"
//! ```
//!
//! All four binary operators share one precedence level and associate to
//! the left, so `a | b & c - d` parses as `((a|b)&c)-d`. An assignment
//! `NAME = expr` is accepted only when the very first primary of the query
//! is a set name directly followed by `=`; a later `=` is left in the
//! stream and surfaces as a parse error.
//!
//! Inside a literal a trailing comma is tolerated when the closing brace
//! follows immediately; running out of input instead reports `expected '}'`.

use std::fmt;

use crate::ast::{Node, Operator};
use crate::error::{CantorError, Result};
use crate::lexer::{Lexer, Token, TokenKind};

// Every binary operator binds equally tightly.
const BINOP_PRECEDENCE: i32 = 10;

fn binary_operator(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Union => Some(Operator::Union),
        TokenKind::Intersection => Some(Operator::Intersection),
        TokenKind::Difference => Some(Operator::Difference),
        TokenKind::SymmetricDifference => Some(Operator::SymmetricDifference),
        _ => None,
    }
}

fn precedence(kind: TokenKind) -> i32 {
    if binary_operator(kind).is_some() {
        BINOP_PRECEDENCE
    } else {
        -1
    }
}

/// Parse error rendered as `[line:col] message, got: KIND (lexeme)`; the
/// lexeme is appended only when it adds information over the kind.
fn unexpected(token: &Token, message: impl fmt::Display) -> CantorError {
    let mut message = format!("{message}, got: {}", token.kind);
    if !token.text.is_empty() && token.text != token.kind.to_string() {
        message.push_str(&format!(" ({})", token.text));
    }
    CantorError::Parse {
        message,
        line: token.position.line,
        column: token.position.column,
    }
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: Option<Token>,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self { lexer, lookahead: None }
    }

    fn peek_token(&mut self) -> Token {
        let token = self.lookahead.take().unwrap_or_else(|| self.lexer.next_token());
        self.lookahead = Some(token.clone());
        token
    }

    fn read_token(&mut self) -> Token {
        self.lookahead.take().unwrap_or_else(|| self.lexer.next_token())
    }

    /// Parses one complete query; anything left over after the expression
    /// is an error.
    pub fn parse(&mut self) -> Result<Node> {
        let node = self.parse_query()?;
        let token = self.peek_token();
        if token.kind != TokenKind::Eof {
            return Err(unexpected(&token, "expected EOF"));
        }
        Ok(node)
    }

    fn parse_query(&mut self) -> Result<Node> {
        let lhs = self.parse_primary(true)?;
        if matches!(lhs, Node::Assign { .. }) {
            // the assignment already consumed the whole right-hand side
            return Ok(lhs);
        }
        self.parse_binop_rhs(0, lhs)
    }

    fn parse_expr(&mut self) -> Result<Node> {
        let lhs = self.parse_primary(false)?;
        self.parse_binop_rhs(0, lhs)
    }

    fn parse_primary(&mut self, allow_assign: bool) -> Result<Node> {
        let token = self.peek_token();
        match token.kind {
            TokenKind::SetName => self.parse_set(allow_assign),
            TokenKind::Item => self.parse_item(),
            TokenKind::SetOpen => self.parse_literal(),
            _ => Err(unexpected(&token, "unexpected token")),
        }
    }

    fn parse_set(&mut self, allow_assign: bool) -> Result<Node> {
        let token = self.read_token();
        if token.kind != TokenKind::SetName {
            return Err(unexpected(&token, "expected set name"));
        }
        let name = token.text;
        if allow_assign && self.peek_token().kind == TokenKind::Assign {
            self.read_token();
            let expr = self.parse_expr()?;
            return Ok(Node::Assign { name, expr: Box::new(expr) });
        }
        Ok(Node::SetRef { name })
    }

    fn parse_item(&mut self) -> Result<Node> {
        let token = self.read_token();
        if token.kind != TokenKind::Item {
            return Err(unexpected(&token, "expected item name"));
        }
        Ok(Node::Item { name: token.text })
    }

    fn parse_literal(&mut self) -> Result<Node> {
        let token = self.read_token();
        if token.kind != TokenKind::SetOpen {
            return Err(unexpected(&token, "expected '{'"));
        }

        let mut elements = Vec::new();
        let mut token;
        loop {
            token = self.peek_token();
            if token.kind == TokenKind::Eof || token.kind == TokenKind::SetClose {
                break;
            }
            elements.push(self.parse_expr()?);

            token = self.peek_token();
            if token.kind != TokenKind::SetClose {
                if token.kind != TokenKind::Comma {
                    return Err(unexpected(&token, "expected ','"));
                }
                self.read_token();
            }
        }
        if token.kind != TokenKind::SetClose {
            return Err(unexpected(&token, "expected '}'"));
        }
        self.read_token();

        Ok(Node::SetLiteral { elements })
    }

    fn parse_binop_rhs(&mut self, min_precedence: i32, mut lhs: Node) -> Result<Node> {
        loop {
            let current = self.peek_token();
            let current_precedence = precedence(current.kind);

            // either not a binop or it binds weaker than the operator above us
            if current_precedence < min_precedence {
                return Ok(lhs);
            }

            let op_token = self.read_token();
            let Some(op) = binary_operator(op_token.kind) else {
                return Err(unexpected(&op_token, "expected operator"));
            };

            let mut rhs = self.parse_primary(false)?;

            let next = self.peek_token();
            if current_precedence < precedence(next.kind) {
                rhs = self.parse_binop_rhs(current_precedence + 1, rhs)?;
            }

            lhs = Node::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
    }
}
