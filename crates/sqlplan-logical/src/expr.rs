//! Logical expressions
//!
//! The planner's typed vocabulary. Every expression can describe the field it
//! would produce for a given input schema without being evaluated.

use serde::{Deserialize, Serialize};
use sqlplan_core::{DataType, Field, Result, Schema};
use std::fmt;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    Eq,
    Neq,
    Gt,
    GtEq,
    Lt,
    LtEq,
}

impl ComparisonOp {
    /// Map SQL operator text to a comparison
    pub fn from_sql(op: &str) -> Option<Self> {
        match op {
            "=" => Some(ComparisonOp::Eq),
            "!=" => Some(ComparisonOp::Neq),
            ">" => Some(ComparisonOp::Gt),
            ">=" => Some(ComparisonOp::GtEq),
            "<" => Some(ComparisonOp::Lt),
            "<=" => Some(ComparisonOp::LtEq),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Neq => "!=",
            ComparisonOp::Gt => ">",
            ComparisonOp::GtEq => ">=",
            ComparisonOp::Lt => "<",
            ComparisonOp::LtEq => "<=",
        }
    }
}

/// Boolean connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanOp {
    And,
    Or,
}

impl BooleanOp {
    pub fn from_sql(op: &str) -> Option<Self> {
        match op {
            "AND" => Some(BooleanOp::And),
            "OR" => Some(BooleanOp::Or),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BooleanOp::And => "AND",
            BooleanOp::Or => "OR",
        }
    }
}

/// Arithmetic operators. Only multiplication is supported so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    Mult,
}

impl ArithmeticOp {
    pub fn from_sql(op: &str) -> Option<Self> {
        match op {
            "*" => Some(ArithmeticOp::Mult),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOp::Mult => "*",
        }
    }
}

/// Logical expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogicalExpr {
    /// Reference to an input column by name
    Column(String),
    /// Renames the output of `expr`
    Alias { expr: Box<LogicalExpr>, name: String },
    LiteralString(String),
    LiteralLong(i64),
    LiteralDouble(f64),
    Comparison {
        op: ComparisonOp,
        left: Box<LogicalExpr>,
        right: Box<LogicalExpr>,
    },
    Boolean {
        op: BooleanOp,
        left: Box<LogicalExpr>,
        right: Box<LogicalExpr>,
    },
    Arithmetic {
        op: ArithmeticOp,
        left: Box<LogicalExpr>,
        right: Box<LogicalExpr>,
    },
}

/// Reference a column by name
pub fn col<S: Into<String>>(name: S) -> LogicalExpr {
    LogicalExpr::Column(name.into())
}

pub fn lit_str<S: Into<String>>(value: S) -> LogicalExpr {
    LogicalExpr::LiteralString(value.into())
}

pub fn lit_long(value: i64) -> LogicalExpr {
    LogicalExpr::LiteralLong(value)
}

pub fn lit_double(value: f64) -> LogicalExpr {
    LogicalExpr::LiteralDouble(value)
}

impl LogicalExpr {
    /// Describe the field this expression produces when evaluated against `input`.
    ///
    /// Every column the expression references must exist in `input`.
    pub fn to_field(&self, input: &Schema) -> Result<Field> {
        match self {
            LogicalExpr::Column(name) => input.field_with_name(name).cloned(),
            LogicalExpr::Alias { expr, name } => {
                Ok(Field::new(name.clone(), expr.to_field(input)?.data_type))
            }
            LogicalExpr::LiteralString(_) => Ok(Field::new(self.output_name(), DataType::Utf8)),
            LogicalExpr::LiteralLong(_) => Ok(Field::new(self.output_name(), DataType::Int64)),
            LogicalExpr::LiteralDouble(_) => Ok(Field::new(self.output_name(), DataType::Float64)),
            LogicalExpr::Comparison { left, right, .. }
            | LogicalExpr::Boolean { left, right, .. } => {
                left.to_field(input)?;
                right.to_field(input)?;
                Ok(Field::new(self.output_name(), DataType::Boolean))
            }
            LogicalExpr::Arithmetic { left, right, .. } => {
                let data_type = left.to_field(input)?.data_type;
                right.to_field(input)?;
                Ok(Field::new(self.output_name(), data_type))
            }
        }
    }

    /// Name of the output column, as reported by [`LogicalExpr::to_field`]
    pub fn output_name(&self) -> String {
        match self {
            LogicalExpr::Column(name) | LogicalExpr::Alias { name, .. } => name.clone(),
            LogicalExpr::LiteralString(value) => value.clone(),
            LogicalExpr::LiteralLong(value) => value.to_string(),
            LogicalExpr::LiteralDouble(value) => format!("{:?}", value),
            LogicalExpr::Comparison { op, left, right } => binary_name(left, op.symbol(), right),
            LogicalExpr::Boolean { op, left, right } => binary_name(left, op.symbol(), right),
            LogicalExpr::Arithmetic { op, left, right } => binary_name(left, op.symbol(), right),
        }
    }

    /// Rename the output of this expression
    pub fn alias<S: Into<String>>(self, name: S) -> LogicalExpr {
        LogicalExpr::Alias {
            expr: Box::new(self),
            name: name.into(),
        }
    }

    fn comparison(self, op: ComparisonOp, rhs: LogicalExpr) -> LogicalExpr {
        LogicalExpr::Comparison {
            op,
            left: Box::new(self),
            right: Box::new(rhs),
        }
    }

    fn boolean(self, op: BooleanOp, rhs: LogicalExpr) -> LogicalExpr {
        LogicalExpr::Boolean {
            op,
            left: Box::new(self),
            right: Box::new(rhs),
        }
    }

    pub fn eq(self, rhs: LogicalExpr) -> LogicalExpr {
        self.comparison(ComparisonOp::Eq, rhs)
    }

    pub fn neq(self, rhs: LogicalExpr) -> LogicalExpr {
        self.comparison(ComparisonOp::Neq, rhs)
    }

    pub fn gt(self, rhs: LogicalExpr) -> LogicalExpr {
        self.comparison(ComparisonOp::Gt, rhs)
    }

    pub fn gt_eq(self, rhs: LogicalExpr) -> LogicalExpr {
        self.comparison(ComparisonOp::GtEq, rhs)
    }

    pub fn lt(self, rhs: LogicalExpr) -> LogicalExpr {
        self.comparison(ComparisonOp::Lt, rhs)
    }

    pub fn lt_eq(self, rhs: LogicalExpr) -> LogicalExpr {
        self.comparison(ComparisonOp::LtEq, rhs)
    }

    pub fn and(self, rhs: LogicalExpr) -> LogicalExpr {
        self.boolean(BooleanOp::And, rhs)
    }

    pub fn or(self, rhs: LogicalExpr) -> LogicalExpr {
        self.boolean(BooleanOp::Or, rhs)
    }

    pub fn mult(self, rhs: LogicalExpr) -> LogicalExpr {
        LogicalExpr::Arithmetic {
            op: ArithmeticOp::Mult,
            left: Box::new(self),
            right: Box::new(rhs),
        }
    }
}

fn binary_name(left: &LogicalExpr, op: &str, right: &LogicalExpr) -> String {
    format!("{} {} {}", left.output_name(), op, right.output_name())
}

impl fmt::Display for LogicalExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalExpr::Column(name) => write!(f, "#{}", name),
            LogicalExpr::Alias { expr, name } => write!(f, "{} AS {}", expr, name),
            LogicalExpr::LiteralString(value) => write!(f, "'{}'", value),
            LogicalExpr::LiteralLong(value) => write!(f, "{}", value),
            LogicalExpr::LiteralDouble(value) => write!(f, "{:?}", value),
            LogicalExpr::Comparison { op, left, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
            LogicalExpr::Boolean { op, left, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
            LogicalExpr::Arithmetic { op, left, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
        }
    }
}
