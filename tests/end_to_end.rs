//! End to end planning through the public API

use sqlplan::{
    col, lit_long, DataFrame, DataType, Error, ExecutionConfig, ExecutionContext, Field,
    LogicalPlan, MemorySource, Schema,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn employee_schema() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("first_name", DataType::Utf8),
        Field::new("last_name", DataType::Utf8),
        Field::new("state", DataType::Utf8),
        Field::new("salary", DataType::Float64),
    ])
}

fn context() -> ExecutionContext {
    init_tracing();
    let mut ctx = ExecutionContext::new(ExecutionConfig::default());
    ctx.register_data_source("employee", Arc::new(MemorySource::new(employee_schema())));
    ctx
}

#[test]
fn test_filter_on_projected_column() {
    let ctx = context();
    let df = ctx
        .sql("SELECT id, first_name, salary FROM employee WHERE salary > 1000")
        .unwrap();

    assert_eq!(
        df.explain(),
        "Selection: #salary > 1000\n\
         \x20 Projection: #id, #first_name, #salary\n\
         \x20   Scan: employee\n"
    );
}

#[test]
fn test_filter_on_column_not_projected() {
    let ctx = context();
    let df = ctx
        .sql(
            "SELECT first_name, last_name, salary * 2 AS bonus \
             FROM employee WHERE state = 'CO' AND id >= 10",
        )
        .unwrap();

    assert_eq!(
        df.schema().field_names(),
        vec!["first_name", "last_name", "bonus"]
    );
    assert_eq!(
        df.explain(),
        "Projection: #first_name, #last_name, #bonus\n\
         \x20 Selection: #state = 'CO' AND #id >= 10\n\
         \x20   Projection: #first_name, #last_name, #salary * 2 AS bonus, #id, #state\n\
         \x20     Scan: employee\n"
    );
    assert_eq!(df.schema().field_with_name("bonus").unwrap().data_type, DataType::Float64);
}

#[test]
fn test_plan_shape() {
    let ctx = context();
    let df = ctx.sql("SELECT last_name FROM employee WHERE id = 1;").unwrap();

    let LogicalPlan::Projection { input, .. } = df.logical_plan() else {
        panic!("expected projection at the root");
    };
    let LogicalPlan::Selection { input, .. } = &**input else {
        panic!("expected selection under the final projection");
    };
    assert_eq!(input.schema().field_names(), vec!["last_name", "id"]);
    assert!(matches!(input.children()[0], LogicalPlan::Scan { .. }));
}

#[test]
fn test_query_over_registered_data_frame() {
    let mut ctx = context();
    let senior = DataFrame::scan("employee", Arc::new(MemorySource::new(employee_schema())))
        .filter(col("id").lt(lit_long(100)))
        .unwrap();
    ctx.register("senior", senior);

    let df = ctx.sql("SELECT first_name FROM senior").unwrap();
    assert_eq!(
        df.explain(),
        "Projection: #first_name\n\
         \x20 Selection: #id < 100\n\
         \x20   Scan: employee\n"
    );
}

#[test]
fn test_errors_by_stage() {
    let ctx = context();

    let err = ctx.sql("SELECT id FROM").unwrap_err();
    assert!(err.is_parse_error(), "{err}");

    let err = ctx.sql("SELECT id, FROM employee").unwrap_err();
    assert!(err.is_parse_error(), "{err}");

    let err = ctx.sql("SELECT id FROM employee WHERE").unwrap_err();
    assert!(matches!(err, Error::UnexpectedEof(_)), "{err}");

    let err = ctx.sql("SELECT id FROM department").unwrap_err();
    assert_eq!(err.to_string(), "No table named 'department'");

    let err = ctx.sql("SELECT id FROM employee WHERE salary + 100 > 5000").unwrap_err();
    assert!(err.is_planning_error(), "{err}");

    let err = ctx.sql("SELECT age FROM employee").unwrap_err();
    assert!(err.is_resolution_error(), "{err}");
}
