//! Abstract Syntax Tree for SQL queries
//!
//! Nodes use source-level vocabulary: identifiers and raw operator text.
//! Children are owned, so a tree is never shared or mutated after parsing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlExpr {
    /// Table or column name
    Identifier(String),
    /// Binary operation, operator kept as written (`*`, `>=`, `AND`, ...)
    BinaryExpr {
        left: Box<SqlExpr>,
        op: String,
        right: Box<SqlExpr>,
    },
    /// String literal
    LiteralString(String),
    /// Integer literal
    LiteralLong(i64),
    /// Floating point literal
    LiteralDouble(f64),
    /// `expr AS alias`
    Alias { expr: Box<SqlExpr>, alias: String },
    /// SELECT statement
    Select(SqlSelect),
}

/// SELECT statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlSelect {
    /// Output expressions in user order
    pub projection: Vec<SqlExpr>,
    /// WHERE predicate
    pub selection: Option<Box<SqlExpr>>,
    /// Source table
    pub table_name: String,
}

impl SqlExpr {
    pub fn identifier<S: Into<String>>(name: S) -> Self {
        SqlExpr::Identifier(name.into())
    }

    pub fn binary<S: Into<String>>(left: SqlExpr, op: S, right: SqlExpr) -> Self {
        SqlExpr::BinaryExpr {
            left: Box::new(left),
            op: op.into(),
            right: Box::new(right),
        }
    }

    pub fn alias<S: Into<String>>(expr: SqlExpr, alias: S) -> Self {
        SqlExpr::Alias {
            expr: Box::new(expr),
            alias: alias.into(),
        }
    }

    /// Returns true for nodes that produce rows rather than values
    pub fn is_relation(&self) -> bool {
        matches!(self, SqlExpr::Select(_))
    }
}

impl fmt::Display for SqlExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlExpr::Identifier(id) => write!(f, "{}", id),
            SqlExpr::BinaryExpr { left, op, right } => write!(f, "{} {} {}", left, op, right),
            SqlExpr::LiteralString(value) => write!(f, "'{}'", value),
            SqlExpr::LiteralLong(value) => write!(f, "{}", value),
            SqlExpr::LiteralDouble(value) => write!(f, "{:?}", value),
            SqlExpr::Alias { expr, alias } => write!(f, "{} AS {}", expr, alias),
            SqlExpr::Select(select) => write!(f, "{}", select),
        }
    }
}

impl fmt::Display for SqlSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let projection: Vec<String> = self.projection.iter().map(ToString::to_string).collect();
        write!(f, "SELECT {} FROM {}", projection.join(", "), self.table_name)?;
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {}", selection)?;
        }
        Ok(())
    }
}
