//! Operation identifiers
//!
//! Operation names arrive as free-form strings from HTTP clients. Parsing is
//! case-insensitive and accepts a handful of aliases so that `SQRT`,
//! `square_root` and `sqrt` all resolve to [`Operation::Sqrt`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;

use super::CalcError;

/// Supported calculator operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Sqrt,
    Cbrt,
    /// Base-10 logarithm
    Log,
    /// Natural logarithm
    Ln,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    /// Definite integral of `f(x) = x` over `[a, b]`
    Integrate,
}

impl Operation {
    pub const ALL: [Operation; 16] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Power,
        Operation::Sqrt,
        Operation::Cbrt,
        Operation::Log,
        Operation::Ln,
        Operation::Sin,
        Operation::Cos,
        Operation::Tan,
        Operation::Asin,
        Operation::Acos,
        Operation::Atan,
        Operation::Integrate,
    ];

    /// Canonical lowercase name (used in responses and log records)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Integrate => "integrate",
        }
    }

    /// Number of operands the operation consumes
    pub fn arity(self) -> usize {
        match self {
            Self::Add
            | Self::Subtract
            | Self::Multiply
            | Self::Divide
            | Self::Power
            | Self::Integrate => 2,
            Self::Sqrt
            | Self::Cbrt
            | Self::Log
            | Self::Ln
            | Self::Sin
            | Self::Cos
            | Self::Tan
            | Self::Asin
            | Self::Acos
            | Self::Atan => 1,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim().to_ascii_lowercase().as_str() {
            "add" | "plus" => Self::Add,
            "subtract" | "minus" => Self::Subtract,
            "multiply" | "times" => Self::Multiply,
            "divide" => Self::Divide,
            "power" | "pow" => Self::Power,
            "sqrt" | "square_root" | "square-root" => Self::Sqrt,
            "cbrt" | "cube_root" => Self::Cbrt,
            "log" | "log10" | "logarithm" => Self::Log,
            "ln" => Self::Ln,
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "integrate" | "integration" => Self::Integrate,
            _ => return Err(CalcError::InvalidOperation(s.to_string())),
        };
        Ok(op)
    }
}
