//! sqlplan Logical Layer
//!
//! Logical expressions, logical plans and the `DataFrame` builder used to
//! assemble them.

pub mod dataframe;
pub mod datasource;
pub mod expr;
pub mod plan;

pub use dataframe::DataFrame;
pub use datasource::{DataSource, MemorySource};
pub use expr::{
    col, lit_double, lit_long, lit_str, ArithmeticOp, BooleanOp, ComparisonOp, LogicalExpr,
};
pub use plan::LogicalPlan;
