//! Logical plans
//!
//! A logical plan is a tree of relational operators. Each node carries the
//! schema it produces so later builder steps can resolve expressions against it.

use crate::datasource::DataSource;
use crate::expr::LogicalExpr;
use sqlplan_core::Schema;
use std::fmt;
use std::sync::Arc;

/// Logical query plan nodes
#[derive(Debug, Clone)]
pub enum LogicalPlan {
    /// Read every row of a registered table
    Scan {
        table_name: String,
        source: Arc<dyn DataSource>,
    },

    /// Compute a new row from each input row
    Projection {
        input: Box<LogicalPlan>,
        exprs: Vec<LogicalExpr>,
        schema: Schema,
    },

    /// Keep the rows for which `predicate` holds
    Selection {
        input: Box<LogicalPlan>,
        predicate: LogicalExpr,
    },
}

impl LogicalPlan {
    /// Schema of the rows produced by this node
    pub fn schema(&self) -> &Schema {
        match self {
            LogicalPlan::Scan { source, .. } => source.schema(),
            LogicalPlan::Projection { schema, .. } => schema,
            LogicalPlan::Selection { input, .. } => input.schema(),
        }
    }

    /// Direct inputs of this node
    pub fn children(&self) -> Vec<&LogicalPlan> {
        match self {
            LogicalPlan::Scan { .. } => Vec::new(),
            LogicalPlan::Projection { input, .. } | LogicalPlan::Selection { input, .. } => {
                vec![input.as_ref()]
            }
        }
    }

    /// Render this plan as an indented tree, one node per line
    pub fn display(&self) -> String {
        let mut out = String::new();
        self.fmt_into(&mut out, 0);
        out
    }

    fn fmt_into(&self, out: &mut String, indent: usize) {
        let pad = "  ".repeat(indent);
        match self {
            LogicalPlan::Scan { table_name, .. } => {
                out.push_str(&format!("{pad}Scan: {table_name}\n"));
            }
            LogicalPlan::Projection { exprs, .. } => {
                let exprs: Vec<String> = exprs.iter().map(ToString::to_string).collect();
                out.push_str(&format!("{pad}Projection: {}\n", exprs.join(", ")));
            }
            LogicalPlan::Selection { predicate, .. } => {
                out.push_str(&format!("{pad}Selection: {predicate}\n"));
            }
        }
        for child in self.children() {
            child.fmt_into(out, indent + 1);
        }
    }
}

impl fmt::Display for LogicalPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
