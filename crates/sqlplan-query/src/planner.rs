//! SQL Query Planner
//!
//! Lowers a parsed SELECT into `DataFrame` builder calls.
//!
//! The only rewrite performed is column pushdown for the WHERE clause: when the
//! predicate references columns that the projection does not output, an interim
//! projection carries those columns through the filter and a final projection
//! drops them again, so the output matches the SELECT list exactly.

use sqlplan_core::{Error, Result};
use sqlplan_logical::{ArithmeticOp, BooleanOp, ComparisonOp, DataFrame, LogicalExpr};
use sqlplan_sql::{SqlExpr, SqlSelect};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Tables visible to the planner, by name
pub type TableRegistry = HashMap<String, DataFrame>;

/// Query planner
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlPlanner;

impl SqlPlanner {
    /// Create a new query planner
    pub fn new() -> Self {
        Self
    }

    /// Create a logical plan from a parsed SELECT statement
    pub fn create_data_frame(
        &self,
        select: &SqlSelect,
        tables: &TableRegistry,
    ) -> Result<DataFrame> {
        let df = tables
            .get(&select.table_name)
            .ok_or_else(|| Error::TableNotFound(select.table_name.clone()))?;

        let projection = select
            .projection
            .iter()
            .map(create_logical_expr)
            .collect::<Result<Vec<_>>>()?;

        let Some(selection) = &select.selection else {
            return df.select(projection);
        };
        let filter_expr = create_logical_expr(selection)?;

        // Output names of the projection, resolved against the source. Aliased
        // expressions report their alias.
        let input = df.schema();
        let projected_names = projection
            .iter()
            .map(|expr| expr.to_field(input).map(|field| field.name))
            .collect::<Result<Vec<_>>>()?;
        let columns_in_projection: BTreeSet<&str> =
            projected_names.iter().map(String::as_str).collect();
        let columns_in_selection = referenced_columns(&filter_expr);

        let missing: Vec<String> = columns_in_selection
            .iter()
            .filter(|name| !columns_in_projection.contains(name.as_str()))
            .cloned()
            .collect();
        debug!(
            projection = ?columns_in_projection,
            selection = ?columns_in_selection,
            ?missing,
            "column analysis"
        );

        if missing.is_empty() {
            return df.select(projection)?.filter(filter_expr);
        }

        let mut interim = projection;
        interim.extend(missing.into_iter().map(LogicalExpr::Column));
        let output = projected_names.into_iter().map(LogicalExpr::Column).collect();

        df.select(interim)?.filter(filter_expr)?.select(output)
    }
}

/// Translate a SQL expression into a logical expression
pub fn create_logical_expr(expr: &SqlExpr) -> Result<LogicalExpr> {
    match expr {
        SqlExpr::Identifier(name) => Ok(LogicalExpr::Column(name.clone())),
        SqlExpr::LiteralString(value) => Ok(LogicalExpr::LiteralString(value.clone())),
        SqlExpr::LiteralLong(value) => Ok(LogicalExpr::LiteralLong(*value)),
        SqlExpr::LiteralDouble(value) => Ok(LogicalExpr::LiteralDouble(*value)),
        SqlExpr::BinaryExpr { left, op, right } => {
            if let Some(op) = ComparisonOp::from_sql(op) {
                Ok(LogicalExpr::Comparison {
                    op,
                    left: lower_boxed(left)?,
                    right: lower_boxed(right)?,
                })
            } else if let Some(op) = BooleanOp::from_sql(op) {
                Ok(LogicalExpr::Boolean {
                    op,
                    left: lower_boxed(left)?,
                    right: lower_boxed(right)?,
                })
            } else if let Some(op) = ArithmeticOp::from_sql(op) {
                Ok(LogicalExpr::Arithmetic {
                    op,
                    left: lower_boxed(left)?,
                    right: lower_boxed(right)?,
                })
            } else {
                Err(Error::UnsupportedOperator(op.clone()))
            }
        }
        SqlExpr::Alias { expr, alias } => Ok(LogicalExpr::Alias {
            expr: lower_boxed(expr)?,
            name: alias.clone(),
        }),
        SqlExpr::Select(select) => Err(Error::UnsupportedExpression(select.to_string())),
    }
}

fn lower_boxed(expr: &SqlExpr) -> Result<Box<LogicalExpr>> {
    create_logical_expr(expr).map(Box::new)
}

/// Names of every column referenced anywhere inside `expr`
pub fn referenced_columns(expr: &LogicalExpr) -> BTreeSet<String> {
    match expr {
        LogicalExpr::Column(name) => BTreeSet::from([name.clone()]),
        LogicalExpr::Alias { expr, .. } => referenced_columns(expr),
        LogicalExpr::Comparison { left, right, .. }
        | LogicalExpr::Boolean { left, right, .. }
        | LogicalExpr::Arithmetic { left, right, .. } => {
            let mut columns = referenced_columns(left);
            columns.extend(referenced_columns(right));
            columns
        }
        LogicalExpr::LiteralString(_)
        | LogicalExpr::LiteralLong(_)
        | LogicalExpr::LiteralDouble(_) => BTreeSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlplan_core::{DataType, Field, Schema};
    use sqlplan_logical::{col, lit_long, lit_str, MemorySource};
    use sqlplan_sql::parse_select;
    use std::sync::Arc;

    fn tables() -> TableRegistry {
        let mut tables = TableRegistry::new();
        tables.insert(
            "t".to_string(),
            DataFrame::scan(
                "t",
                Arc::new(MemorySource::new(Schema::new(vec![
                    Field::new("a", DataType::Int64),
                    Field::new("b", DataType::Int64),
                ]))),
            ),
        );
        tables.insert(
            "employee".to_string(),
            DataFrame::scan(
                "employee",
                Arc::new(MemorySource::new(Schema::new(vec![
                    Field::new("id", DataType::Int64),
                    Field::new("first_name", DataType::Utf8),
                    Field::new("state", DataType::Utf8),
                    Field::new("salary", DataType::Float64),
                ]))),
            ),
        );
        tables
    }

    fn plan(sql: &str) -> Result<DataFrame> {
        SqlPlanner::new().create_data_frame(&parse_select(sql)?, &tables())
    }

    #[test]
    fn test_projection_only() {
        let df = plan("SELECT a, b FROM t").unwrap();
        assert_eq!(df.explain(), "Projection: #a, #b\n  Scan: t\n");
    }

    #[test]
    fn test_selection_on_projected_column() {
        let df = plan("SELECT a FROM t WHERE a > 1").unwrap();
        assert_eq!(
            df.explain(),
            "Selection: #a > 1\n  Projection: #a\n    Scan: t\n"
        );
    }

    #[test]
    fn test_string_literal_output_shadows_column() {
        // The literal's output field is named `a`, so the filter sees it instead of column `a`
        let df = plan("SELECT 'a' FROM t WHERE a > 1").unwrap();
        assert_eq!(
            df.explain(),
            "Selection: #a > 1\n  Projection: 'a'\n    Scan: t\n"
        );
        assert_eq!(df.schema().field_with_name("a").unwrap().data_type, DataType::Utf8);
    }

    #[test]
    fn test_selection_on_missing_column() {
        let df = plan("SELECT a FROM t WHERE b > 1").unwrap();
        assert_eq!(
            df.explain(),
            "Projection: #a\n  Selection: #b > 1\n    Projection: #a, #b\n      Scan: t\n"
        );
        assert_eq!(df.schema().field_names(), vec!["a"]);
    }

    #[test]
    fn test_aliased_projection_with_missing_column() {
        let df = plan("SELECT a AS x FROM t WHERE b > 1").unwrap();
        assert_eq!(
            df.explain(),
            "Projection: #x\n  Selection: #b > 1\n    Projection: #a AS x, #b\n      Scan: t\n"
        );
        assert_eq!(df.schema().field_names(), vec!["x"]);
    }

    #[test]
    fn test_selection_on_alias() {
        let df = plan("SELECT a AS x FROM t WHERE x > 1").unwrap();
        assert_eq!(
            df.explain(),
            "Selection: #x > 1\n  Projection: #a AS x\n    Scan: t\n"
        );
    }

    #[test]
    fn test_selection_on_aliased_away_column() {
        // `a` is only output under its alias, so it must be carried through the filter.
        let df = plan("SELECT a AS x FROM t WHERE a > 1").unwrap();
        assert_eq!(
            df.explain(),
            "Projection: #x\n  Selection: #a > 1\n    Projection: #a AS x, #a\n      Scan: t\n"
        );
    }

    #[test]
    fn test_several_missing_columns() {
        let df = plan(
            "SELECT id, salary * 2 AS bonus FROM employee \
             WHERE state = 'CO' AND first_name != 'Bill'",
        )
        .unwrap();
        assert_eq!(
            df.explain(),
            "Projection: #id, #bonus\n\
             \x20 Selection: #state = 'CO' AND #first_name != 'Bill'\n\
             \x20   Projection: #id, #salary * 2 AS bonus, #first_name, #state\n\
             \x20     Scan: employee\n"
        );
        assert_eq!(df.schema().field_names(), vec!["id", "bonus"]);
    }

    #[test]
    fn test_unaliased_expression_output_name() {
        let df = plan("SELECT salary * 2 FROM employee WHERE id > 5").unwrap();
        assert_eq!(df.schema().field_names(), vec!["salary * 2"]);
        assert_eq!(
            df.explain(),
            "Projection: #salary * 2\n\
             \x20 Selection: #id > 5\n\
             \x20   Projection: #salary * 2, #id\n\
             \x20     Scan: employee\n"
        );
    }

    #[test]
    fn test_output_names_follow_projection_order() {
        let cases = [
            ("SELECT b, a FROM t", vec!["b", "a"]),
            ("SELECT a AS first, b AS second FROM t", vec!["first", "second"]),
            ("SELECT b, a AS z FROM t WHERE a = 2", vec!["b", "z"]),
            (
                "SELECT state, id FROM employee WHERE salary >= 100.5 OR first_name = 'x'",
                vec!["state", "id"],
            ),
        ];

        for (sql, expected) in cases {
            let df = plan(sql).unwrap();
            assert_eq!(df.schema().field_names(), expected, "{sql}");
        }
    }

    #[test]
    fn test_unknown_table() {
        let err = plan("SELECT a FROM missing").unwrap_err();
        assert_eq!(err, Error::TableNotFound("missing".to_string()));
        assert!(err.is_planning_error());
    }

    #[test]
    fn test_unknown_column_in_selection() {
        let err = plan("SELECT a FROM t WHERE c > 1").unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound { ref name, .. } if name == "c"));
    }

    #[test]
    fn test_unknown_column_in_projection() {
        let err = plan("SELECT c FROM t").unwrap_err();
        assert!(err.is_resolution_error());
    }

    #[test]
    fn test_unsupported_operator() {
        let expr = SqlExpr::binary(SqlExpr::identifier("a"), "%", SqlExpr::identifier("b"));
        assert_eq!(
            create_logical_expr(&expr).unwrap_err(),
            Error::UnsupportedOperator("%".to_string())
        );

        let err = plan("SELECT a + b FROM t").unwrap_err();
        assert_eq!(err, Error::UnsupportedOperator("+".to_string()));
    }

    #[test]
    fn test_nested_select_is_unsupported() {
        let inner = parse_select("SELECT a FROM t").unwrap();
        let select = SqlSelect {
            projection: vec![SqlExpr::Select(inner)],
            selection: None,
            table_name: "t".to_string(),
        };

        let err = SqlPlanner::new()
            .create_data_frame(&select, &tables())
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedExpression("SELECT a FROM t".to_string())
        );
    }

    #[test]
    fn test_lowering() {
        let select = parse_select("SELECT a * 2 AS d FROM t WHERE a = 'x' OR b <= 3").unwrap();

        assert_eq!(
            create_logical_expr(&select.projection[0]).unwrap(),
            col("a").mult(lit_long(2)).alias("d")
        );
        assert_eq!(
            create_logical_expr(select.selection.as_deref().unwrap()).unwrap(),
            col("a").eq(lit_str("x")).or(col("b").lt_eq(lit_long(3)))
        );
    }

    #[test]
    fn test_referenced_columns() {
        let expr = col("a")
            .mult(lit_long(3))
            .alias("x")
            .gt(col("b"))
            .and(col("a").neq(lit_str("a")));

        assert_eq!(
            referenced_columns(&expr),
            BTreeSet::from(["a".to_string(), "b".to_string()])
        );
        assert!(referenced_columns(&lit_long(1)).is_empty());
    }
}
