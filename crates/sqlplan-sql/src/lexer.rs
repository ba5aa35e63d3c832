//! SQL lexer using logos

use logos::Logos;
use serde::{Deserialize, Serialize};
use sqlplan_core::{Error, Result};
use std::collections::VecDeque;

/// Words that lex as keywords rather than identifiers
pub const KEYWORDS: &[&str] = &["SELECT", "FROM", "WHERE", "AS", "AND", "OR"];

/// Token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Operator,
    Punctuation,
    LiteralString,
    LiteralLong,
    LiteralDouble,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::LiteralString => "string literal",
            TokenKind::LiteralLong => "integer literal",
            TokenKind::LiteralDouble => "double literal",
        };
        write!(f, "{}", name)
    }
}

/// A typed SQL token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new<S: Into<String>>(kind: TokenKind, text: S) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn identifier<S: Into<String>>(text: S) -> Self {
        Self::new(TokenKind::Identifier, text)
    }

    pub fn keyword<S: Into<String>>(text: S) -> Self {
        Self::new(TokenKind::Keyword, text)
    }

    pub fn operator<S: Into<String>>(text: S) -> Self {
        Self::new(TokenKind::Operator, text)
    }

    pub fn punctuation<S: Into<String>>(text: S) -> Self {
        Self::new(TokenKind::Punctuation, text)
    }

    /// Check if this token is the given keyword
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text.eq_ignore_ascii_case(keyword)
    }

    /// Check if this token is the given punctuation symbol
    pub fn is_punctuation(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Punctuation && self.text == symbol
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}'", self.kind, self.text)
    }
}

/// Raw lexemes recognised by logos. Words are split into keywords and
/// identifiers afterwards against [`KEYWORDS`].
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Lexeme {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[regex(r"[0-9]+")]
    Long,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Double,

    #[regex(r"'([^'\\]|\\.|'')*'")]
    Quoted,

    #[token("=")]
    #[token("!=")]
    #[token("<>")]
    #[token("<")]
    #[token("<=")]
    #[token(">")]
    #[token(">=")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    Operator,

    #[token(",")]
    #[token("(")]
    #[token(")")]
    #[token(";")]
    Punctuation,

    #[regex(r"--[^\n]*", logos::skip)]
    LineComment,
}

/// Tokenize a SQL string
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    for (lexeme, span) in Lexeme::lexer(input).spanned() {
        let slice = &input[span.clone()];
        let lexeme = lexeme.map_err(|_| Error::Lex {
            position: span.start,
            fragment: slice.to_string(),
        })?;

        let token = match lexeme {
            Lexeme::Word => {
                let upper = slice.to_ascii_uppercase();
                if KEYWORDS.contains(&upper.as_str()) {
                    Token::keyword(upper)
                } else {
                    Token::identifier(slice)
                }
            }
            Lexeme::Long => Token::new(TokenKind::LiteralLong, slice),
            Lexeme::Double => Token::new(TokenKind::LiteralDouble, slice),
            Lexeme::Quoted => Token::new(TokenKind::LiteralString, unquote(slice)),
            // `<>` is the standard spelling of `!=`
            Lexeme::Operator if slice == "<>" => Token::operator("!="),
            Lexeme::Operator => Token::operator(slice),
            Lexeme::Punctuation => Token::punctuation(slice),
            Lexeme::LineComment => continue,
        };
        tokens.push(token);
    }
    Ok(tokens)
}

/// Strip the quotes of a string literal and decode `''`, `\'` and `\\`.
fn unquote(slice: &str) -> String {
    let inner = &slice[1..slice.len() - 1];
    let mut text = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' | '\'' => {
                // The regex only admits a quote here as the first half of `''`
                if let Some(escaped) = chars.next() {
                    text.push(escaped);
                }
            }
            _ => text.push(c),
        }
    }
    text
}

/// Forward-only cursor over a token list
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    /// Tokenize `sql` into a fresh stream
    pub fn from_sql(sql: &str) -> Result<Self> {
        tokenize(sql).map(Self::new)
    }

    /// Look at the next token without consuming it
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// Consume and return the next token
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Consume the next token only if it is the given keyword
    pub fn consume_keyword(&mut self, keyword: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_keyword(keyword)) {
            self.tokens.pop_front();
            true
        } else {
            false
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}
