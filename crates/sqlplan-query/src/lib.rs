//! sqlplan Query Engine
//!
//! Plans SQL SELECT statements into logical plans and defines the interface
//! physical plans implement.

pub mod config;
pub mod context;
pub mod physical;
pub mod planner;

pub use config::{ExecutionConfig, BATCH_SIZE_KEY, DEFAULT_BATCH_SIZE};
pub use context::ExecutionContext;
pub use physical::{collect, BatchStream, PhysicalPlan};
pub use planner::{create_logical_expr, referenced_columns, SqlPlanner, TableRegistry};
