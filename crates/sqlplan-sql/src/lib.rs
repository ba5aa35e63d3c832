//! sqlplan SQL front end
//!
//! Turns SQL text into an abstract syntax tree.
//!
//! # Overview
//!
//! - `lexer` - logos based tokenizer and token stream
//! - `ast` - SQL expression and SELECT nodes
//! - `parser` - Pratt parser producing the AST

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{SqlExpr, SqlSelect};
pub use lexer::{tokenize, Token, TokenKind, TokenStream};
pub use parser::{parse_select, parse_sql, PrattParser, SqlParser};
