//! Physical plan interface
//!
//! Physical plans are implemented by an execution layer outside this crate.

use sqlplan_core::{RecordBatch, Result};
use std::fmt::Debug;

/// Lazy, finite sequence of record batches. Once consumed it cannot be restarted.
pub type BatchStream<'a> = Box<dyn Iterator<Item = Result<RecordBatch>> + 'a>;

/// An executable plan that produces data
pub trait PhysicalPlan: Debug {
    /// Execute the plan and produce a series of record batches
    fn execute(&self) -> Result<BatchStream<'_>>;
}

/// Run `plan` to completion, stopping at the first failed batch
pub fn collect(plan: &dyn PhysicalPlan) -> Result<Vec<RecordBatch>> {
    plan.execute()?.collect()
}
