//! sqlplan - SQL parsing and logical query planning
//!
//! This is the main library crate that re-exports all sqlplan components.

pub use sqlplan_core as core;
pub use sqlplan_logical as logical;
pub use sqlplan_query as query;
pub use sqlplan_sql as sql;

// Re-export commonly used types
pub use sqlplan_core::{DataType, Error, Field, RecordBatch, Result, ScalarValue, Schema};

pub use sqlplan_logical::{
    col, lit_double, lit_long, lit_str, DataFrame, DataSource, LogicalExpr, LogicalPlan,
    MemorySource,
};
pub use sqlplan_query::{ExecutionConfig, ExecutionContext, PhysicalPlan};
pub use sqlplan_sql::{parse_select, parse_sql, SqlExpr, SqlSelect};
