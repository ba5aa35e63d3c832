//! DataFrame builder
//!
//! A `DataFrame` wraps a logical plan. Each builder call returns a new frame
//! whose plan has the previous one as its input; frames are never modified.

use crate::datasource::DataSource;
use crate::expr::LogicalExpr;
use crate::plan::LogicalPlan;
use sqlplan_core::{Result, Schema};
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct DataFrame {
    plan: LogicalPlan,
}

impl DataFrame {
    pub fn new(plan: LogicalPlan) -> Self {
        Self { plan }
    }

    /// Frame reading every row of `source`
    pub fn scan<S: Into<String>>(table_name: S, source: Arc<dyn DataSource>) -> Self {
        Self::new(LogicalPlan::Scan {
            table_name: table_name.into(),
            source,
        })
    }

    /// Project `exprs`, resolving each against the current schema
    pub fn select(&self, exprs: Vec<LogicalExpr>) -> Result<DataFrame> {
        let input = self.plan.schema();
        let schema = exprs
            .iter()
            .map(|expr| expr.to_field(input))
            .collect::<Result<Schema>>()?;
        trace!(fields = ?schema.field_names(), "select");

        Ok(Self::new(LogicalPlan::Projection {
            input: Box::new(self.plan.clone()),
            exprs,
            schema,
        }))
    }

    /// Keep rows matching `predicate`, which must resolve against the current schema
    pub fn filter(&self, predicate: LogicalExpr) -> Result<DataFrame> {
        predicate.to_field(self.plan.schema())?;
        trace!(%predicate, "filter");

        Ok(Self::new(LogicalPlan::Selection {
            input: Box::new(self.plan.clone()),
            predicate,
        }))
    }

    pub fn schema(&self) -> &Schema {
        self.plan.schema()
    }

    pub fn logical_plan(&self) -> &LogicalPlan {
        &self.plan
    }

    /// Indented rendering of the plan
    pub fn explain(&self) -> String {
        self.plan.display()
    }
}
