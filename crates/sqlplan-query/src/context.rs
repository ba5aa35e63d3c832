//! Execution context
//!
//! Holds the configuration and the table registry, and turns SQL text into
//! a `DataFrame` by parsing and planning against the registered tables.

use crate::config::ExecutionConfig;
use crate::planner::{SqlPlanner, TableRegistry};
use sqlplan_core::{Error, Result};
use sqlplan_logical::{DataFrame, DataSource};
use sqlplan_sql::parse_select;
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point for planning SQL queries
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    /// Execution configuration
    config: ExecutionConfig,

    /// Registered tables by name
    tables: TableRegistry,

    planner: SqlPlanner,
}

impl ExecutionContext {
    /// Create a context with the given configuration and no tables
    pub fn new(config: ExecutionConfig) -> Self {
        Self {
            config,
            tables: TableRegistry::new(),
            planner: SqlPlanner::new(),
        }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Register `df` under `name`, replacing any table already registered there
    pub fn register<S: Into<String>>(&mut self, name: S, df: DataFrame) {
        let name = name.into();
        info!("Registered table '{}'", name);
        self.tables.insert(name, df);
    }

    /// Register a scan of `source` under `name`
    pub fn register_data_source<S: Into<String>>(&mut self, name: S, source: Arc<dyn DataSource>) {
        let name = name.into();
        let df = DataFrame::scan(name.clone(), source);
        self.register(name, df);
    }

    /// Look up a registered table
    pub fn table(&self, name: &str) -> Result<&DataFrame> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    pub fn tables(&self) -> &TableRegistry {
        &self.tables
    }

    /// Parse and plan a single SELECT statement
    pub fn sql(&self, sql: &str) -> Result<DataFrame> {
        let select = parse_select(sql)?;
        debug!(table = %select.table_name, "Planning query");
        self.planner.create_data_frame(&select, &self.tables)
    }
}
