//! sqlplan Core Library
//!
//! Fundamental types and error handling shared by every sqlplan crate.
//!
//! # Modules
//!
//! - `error` - Error types and result aliases
//! - `types` - Data types, fields and schemas
//! - `batch` - Columnar record batches

pub mod batch;
pub mod error;
pub mod types;

pub use batch::RecordBatch;
pub use error::{Error, Result};
pub use types::{DataType, Field, ScalarValue, Schema};
