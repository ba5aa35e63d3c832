//! Record batches
//!
//! A batch is a group of rows stored column by column. Execution layers
//! produce batches; this crate only defines their shape.

use crate::error::{Error, Result};
use crate::types::{Field, ScalarValue, Schema};

/// Columnar batch of rows sharing one schema
#[derive(Debug, Clone, PartialEq)]
pub struct RecordBatch {
    schema: Schema,
    columns: Vec<Vec<ScalarValue>>,
}

impl RecordBatch {
    /// Create a batch, checking that the columns agree with the schema
    pub fn try_new(schema: Schema, columns: Vec<Vec<ScalarValue>>) -> Result<Self> {
        if schema.len() != columns.len() {
            return Err(Error::InvalidBatch(format!(
                "schema has {} fields but {} columns were supplied",
                schema.len(),
                columns.len()
            )));
        }

        let rows = columns.first().map_or(0, Vec::len);
        for (field, column) in schema.fields.iter().zip(&columns) {
            if column.len() != rows {
                return Err(Error::InvalidBatch(format!(
                    "column '{}' has {} rows, expected {}",
                    field.name,
                    column.len(),
                    rows
                )));
            }
            check_column_type(field, column)?;
        }

        Ok(Self { schema, columns })
    }

    /// Schema shared by every row
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Values of the column at `index`
    pub fn column(&self, index: usize) -> Option<&[ScalarValue]> {
        self.columns.get(index).map(Vec::as_slice)
    }
}

fn check_column_type(field: &Field, column: &[ScalarValue]) -> Result<()> {
    match column
        .iter()
        .find(|v| v.data_type().is_some_and(|t| t != field.data_type))
    {
        Some(value) => Err(Error::InvalidBatch(format!(
            "column '{}' of type {} holds {:?}",
            field.name, field.data_type, value
        ))),
        None => Ok(()),
    }
}
