//! SQL parser
//!
//! Top down operator precedence (Pratt) parser. See https://tdop.github.io/
//! for the paper.
//!
//! Binding powers, loosest first:
//!
//! | token                      | precedence |
//! |----------------------------|------------|
//! | `AS`                       | 10         |
//! | `OR`                       | 20         |
//! | `AND`                      | 30         |
//! | `<` `<=` `=` `!=` `>=` `>` | 40         |
//! | `+` `-`                    | 50         |
//! | `*` `/`                    | 60         |
//!
//! Every other token has precedence 0 and ends the current expression.

use crate::ast::{SqlExpr, SqlSelect};
use crate::lexer::{Token, TokenKind, TokenStream};
use sqlplan_core::{Error, Result};
use tracing::{debug, trace};

/// Precedence-climbing expression parser
pub trait PrattParser {
    /// Parse the next expression whose operators bind tighter than `precedence`.
    ///
    /// Returns `None` when the input is exhausted before a prefix token.
    fn parse(&mut self, precedence: u8) -> Result<Option<SqlExpr>> {
        let Some(mut expr) = self.parse_prefix()? else {
            return Ok(None);
        };
        while precedence < self.next_precedence() {
            let next = self.next_precedence();
            expr = self.parse_infix(expr, next)?;
        }
        Ok(Some(expr))
    }

    /// Precedence of the next token, without consuming it
    fn next_precedence(&self) -> u8;

    /// Parse the next prefix expression
    fn parse_prefix(&mut self) -> Result<Option<SqlExpr>>;

    /// Parse the infix expression that continues `left`
    fn parse_infix(&mut self, left: SqlExpr, precedence: u8) -> Result<SqlExpr>;
}

/// Binding power of a token in infix position
pub fn token_precedence(token: &Token) -> u8 {
    match token.kind {
        TokenKind::Keyword => match token.text.as_str() {
            "AS" => 10,
            "OR" => 20,
            "AND" => 30,
            _ => 0,
        },
        TokenKind::Operator => match token.text.as_str() {
            "<" | "<=" | "=" | "!=" | ">=" | ">" => 40,
            "+" | "-" => 50,
            "*" | "/" => 60,
            _ => 0,
        },
        _ => 0,
    }
}

/// Pratt parser over a SQL token stream
pub struct SqlParser {
    tokens: TokenStream,
}

impl SqlParser {
    pub fn new(tokens: TokenStream) -> Self {
        Self { tokens }
    }

    /// Tokens not consumed so far
    pub fn remaining(&self) -> &TokenStream {
        &self.tokens
    }

    fn parse_expr(&mut self) -> Result<Option<SqlExpr>> {
        self.parse(0)
    }

    fn parse_select(&mut self) -> Result<SqlSelect> {
        let projection = self.parse_expr_list()?;

        if !self.tokens.consume_keyword("FROM") {
            return Err(Error::ExpectedKeyword {
                expected: "FROM".to_string(),
                found: describe(self.tokens.peek()),
            });
        }
        let table_name = self.parse_identifier("as table name")?;

        let selection = if self.tokens.consume_keyword("WHERE") {
            let predicate = self
                .parse_expr()?
                .ok_or_else(|| Error::UnexpectedEof("expected predicate after WHERE".to_string()))?;
            Some(Box::new(predicate))
        } else {
            None
        };

        let select = SqlSelect {
            projection,
            selection,
            table_name,
        };
        debug!(%select, "parsed SELECT");
        Ok(select)
    }

    /// Comma separated expressions; stops when no comma follows or the
    /// input runs out.
    fn parse_expr_list(&mut self) -> Result<Vec<SqlExpr>> {
        let mut list = Vec::new();
        let mut expr = self.parse_expr()?;
        while let Some(item) = expr {
            list.push(item);
            if self.tokens.peek().is_some_and(|t| t.is_punctuation(",")) {
                self.tokens.next();
            } else {
                break;
            }
            expr = self.parse_expr()?;
        }
        Ok(list)
    }

    fn parse_identifier(&mut self, context: &str) -> Result<String> {
        match self.tokens.next() {
            Some(Token {
                kind: TokenKind::Identifier,
                text,
            }) => Ok(text),
            other => Err(Error::ExpectedIdentifier(format!(
                "{} {}",
                describe(other.as_ref()),
                context
            ))),
        }
    }

    fn parse_binary(&mut self, left: SqlExpr, op: String, precedence: u8) -> Result<SqlExpr> {
        let right = self
            .parse(precedence)?
            .ok_or_else(|| Error::UnexpectedEof(format!("expected expression after '{}'", op)))?;
        Ok(SqlExpr::binary(left, op, right))
    }
}

impl PrattParser for SqlParser {
    fn next_precedence(&self) -> u8 {
        self.tokens.peek().map_or(0, token_precedence)
    }

    fn parse_prefix(&mut self) -> Result<Option<SqlExpr>> {
        trace!(next = ?self.tokens.peek(), "parse_prefix");
        let Some(token) = self.tokens.next() else {
            return Ok(None);
        };

        let expr = match token.kind {
            TokenKind::Keyword if token.text == "SELECT" => SqlExpr::Select(self.parse_select()?),
            TokenKind::Identifier => SqlExpr::Identifier(token.text),
            TokenKind::LiteralString => SqlExpr::LiteralString(token.text),
            TokenKind::LiteralLong => match token.text.parse() {
                Ok(value) => SqlExpr::LiteralLong(value),
                Err(_) => return Err(invalid_literal("integer", token.text)),
            },
            TokenKind::LiteralDouble => match token.text.parse() {
                Ok(value) => SqlExpr::LiteralDouble(value),
                Err(_) => return Err(invalid_literal("double", token.text)),
            },
            _ => {
                return Err(Error::UnexpectedToken {
                    token: token.to_string(),
                    context: "at start of expression".to_string(),
                });
            }
        };
        Ok(Some(expr))
    }

    fn parse_infix(&mut self, left: SqlExpr, precedence: u8) -> Result<SqlExpr> {
        trace!(next = ?self.tokens.peek(), precedence, "parse_infix");
        let Some(token) = self.tokens.next() else {
            return Err(Error::UnexpectedEof(format!(
                "expected operator after {}",
                left
            )));
        };

        match token.kind {
            TokenKind::Operator => self.parse_binary(left, token.text, precedence),
            TokenKind::Keyword if token.text == "AS" => {
                let alias = self.parse_identifier("after AS")?;
                Ok(SqlExpr::alias(left, alias))
            }
            TokenKind::Keyword if token.text == "AND" || token.text == "OR" => {
                self.parse_binary(left, token.text, precedence)
            }
            _ => Err(Error::UnexpectedToken {
                token: token.to_string(),
                context: format!("after {}", left),
            }),
        }
    }
}

fn describe(token: Option<&Token>) -> String {
    token.map_or_else(|| "end of input".to_string(), ToString::to_string)
}

fn invalid_literal(kind: &str, text: String) -> Error {
    Error::InvalidLiteral {
        kind: kind.to_string(),
        text,
    }
}

/// Parse one complete SQL statement.
///
/// Unlike [`PrattParser::parse`], this rejects empty input and anything
/// left over after the statement other than a single `;`.
pub fn parse_sql(sql: &str) -> Result<SqlExpr> {
    let mut parser = SqlParser::new(TokenStream::from_sql(sql)?);
    let expr = parser
        .parse(0)?
        .ok_or_else(|| Error::UnexpectedEof("empty statement".to_string()))?;

    if parser.tokens.peek().is_some_and(|t| t.is_punctuation(";")) {
        parser.tokens.next();
    }
    if let Some(token) = parser.tokens.peek() {
        return Err(Error::UnexpectedToken {
            token: token.to_string(),
            context: "after end of statement".to_string(),
        });
    }
    Ok(expr)
}

/// Parse a SQL string that must be a SELECT query
pub fn parse_select(sql: &str) -> Result<SqlSelect> {
    match parse_sql(sql)? {
        SqlExpr::Select(select) => Ok(select),
        other => Err(Error::NotAQuery(other.to_string())),
    }
}
