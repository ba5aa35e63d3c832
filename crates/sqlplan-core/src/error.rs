//! Error types for sqlplan
//!
//! One error enum covers every phase of turning SQL text into a logical plan.
//! Variants are grouped by the phase that raises them so callers can report
//! precise diagnostics without string matching.

use thiserror::Error;

/// The main error type for sqlplan operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ========== Lex Errors ==========
    #[error("Lex error at offset {position}: unrecognised input '{fragment}'")]
    Lex { position: usize, fragment: String },

    #[error("Invalid {kind} literal: {text}")]
    InvalidLiteral { kind: String, text: String },

    // ========== Parse Errors ==========
    #[error("Unexpected {token} {context}")]
    UnexpectedToken { token: String, context: String },

    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    #[error("Expected keyword {expected}, found {found}")]
    ExpectedKeyword { expected: String, found: String },

    #[error("Expected identifier, found {0}")]
    ExpectedIdentifier(String),

    #[error("Statement is not a query: {0}")]
    NotAQuery(String),

    // ========== Planning Errors ==========
    #[error("No table named '{0}'")]
    TableNotFound(String),

    #[error("Unsupported binary operator: {0}")]
    UnsupportedOperator(String),

    #[error("Unsupported expression: {0}")]
    UnsupportedExpression(String),

    // ========== Resolution Errors ==========
    #[error("No column named '{name}' in schema {available:?}")]
    ColumnNotFound {
        name: String,
        available: Vec<String>,
    },

    // ========== Batch Errors ==========
    #[error("Invalid record batch: {0}")]
    InvalidBatch(String),

    // ========== Configuration Errors ==========
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ========== Execution Errors ==========
    #[error("Execution error: {0}")]
    Execution(String),
}

/// Result type alias for sqlplan operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns true if this error was raised while lexing or parsing SQL text
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::Lex { .. }
                | Error::InvalidLiteral { .. }
                | Error::UnexpectedToken { .. }
                | Error::UnexpectedEof(_)
                | Error::ExpectedKeyword { .. }
                | Error::ExpectedIdentifier(_)
                | Error::NotAQuery(_)
        )
    }

    /// Returns true if this error was raised while lowering an AST into a plan
    pub fn is_planning_error(&self) -> bool {
        matches!(
            self,
            Error::TableNotFound(_)
                | Error::UnsupportedOperator(_)
                | Error::UnsupportedExpression(_)
        )
    }

    /// Returns true if an expression could not be resolved against a schema
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, Error::ColumnNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::TableNotFound("employee".to_string());
        assert_eq!(err.to_string(), "No table named 'employee'");

        let err = Error::ExpectedKeyword {
            expected: "FROM".to_string(),
            found: "end of input".to_string(),
        };
        assert_eq!(err.to_string(), "Expected keyword FROM, found end of input");
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::UnexpectedEof("x".to_string()).is_parse_error());
        assert!(!Error::UnexpectedEof("x".to_string()).is_planning_error());
        assert!(Error::UnsupportedOperator("%".to_string()).is_planning_error());
        assert!(Error::ColumnNotFound {
            name: "c".to_string(),
            available: vec!["a".to_string()]
        }
        .is_resolution_error());
        assert!(!Error::Configuration("bad".to_string()).is_parse_error());
    }

    #[test]
    fn test_column_not_found_lists_available() {
        let err = Error::ColumnNotFound {
            name: "c".to_string(),
            available: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            err.to_string(),
            r#"No column named 'c' in schema ["a", "b"]"#
        );
    }
}
