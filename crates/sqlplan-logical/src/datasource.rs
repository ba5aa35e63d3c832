//! Data sources

use sqlplan_core::Schema;
use std::fmt::Debug;

/// A table that logical plans can scan
pub trait DataSource: Debug + Send + Sync {
    /// Schema of the rows this source produces
    fn schema(&self) -> &Schema;
}

/// Source described only by its schema; rows are supplied by the execution layer
#[derive(Debug, Clone)]
pub struct MemorySource {
    schema: Schema,
}

impl MemorySource {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }
}

impl DataSource for MemorySource {
    fn schema(&self) -> &Schema {
        &self.schema
    }
}
