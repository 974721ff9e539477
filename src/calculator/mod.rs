//! Arithmetic evaluator
//!
//! Pure functions from `(Operation, operands)` to a finite `f64`. Nothing in
//! here touches shared state, so evaluation is safe from any task.
//!
//! Error policy:
//! - unknown operation name -> [`CalcError::InvalidOperation`]
//! - wrong operand count or non-finite operand -> [`CalcError::InvalidInput`]
//! - mathematically undefined -> [`CalcError::Domain`]

pub mod operation;

pub use operation::Operation;

use thiserror::Error;

/// Evaluator failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("{0}")]
    Domain(&'static str),

    #[error("unknown operation: {0}")]
    InvalidOperation(String),

    #[error("{0}")]
    InvalidInput(String),
}

/// Evaluate `op` over `operands`.
pub fn evaluate(op: Operation, operands: &[f64]) -> Result<f64, CalcError> {
    if operands.len() != op.arity() {
        return Err(CalcError::InvalidInput(format!(
            "{} expects {} operand(s), got {}",
            op,
            op.arity(),
            operands.len()
        )));
    }
    if operands.iter().any(|v| !v.is_finite()) {
        return Err(CalcError::InvalidInput(
            "operands must be finite numbers".to_string(),
        ));
    }

    let result = match (op, operands) {
        (Operation::Add, [a, b]) => a + b,
        (Operation::Subtract, [a, b]) => a - b,
        (Operation::Multiply, [a, b]) => a * b,
        (Operation::Divide, [a, b]) => {
            if *b == 0.0 {
                return Err(CalcError::Domain("division by zero"));
            }
            a / b
        }
        (Operation::Power, [a, b]) => a.powf(*b),
        (Operation::Sqrt, [x]) => {
            if *x < 0.0 {
                return Err(CalcError::Domain("undefined for negative input"));
            }
            x.sqrt()
        }
        (Operation::Cbrt, [x]) => x.cbrt(),
        (Operation::Log, [x]) => check_log_domain(*x)?.log10(),
        (Operation::Ln, [x]) => check_log_domain(*x)?.ln(),
        (Operation::Sin, [x]) => x.sin(),
        (Operation::Cos, [x]) => x.cos(),
        (Operation::Tan, [x]) => x.tan(),
        (Operation::Asin, [x]) => check_unit_interval(*x)?.asin(),
        (Operation::Acos, [x]) => check_unit_interval(*x)?.acos(),
        (Operation::Atan, [x]) => x.atan(),
        // ∫ₐᵇ x dx
        (Operation::Integrate, [a, b]) => (b * b - a * a) / 2.0,
        // arity was checked above
        _ => {
            return Err(CalcError::InvalidInput(format!(
                "{} received a malformed operand list",
                op
            )));
        }
    };

    if !result.is_finite() {
        return Err(CalcError::Domain("result is not a finite number"));
    }
    Ok(result)
}

/// Parse `name` and evaluate it in one step.
pub fn evaluate_named(name: &str, operands: &[f64]) -> Result<(Operation, f64), CalcError> {
    let op: Operation = name.parse()?;
    evaluate(op, operands).map(|result| (op, result))
}

fn check_log_domain(x: f64) -> Result<f64, CalcError> {
    if x < 0.0 {
        Err(CalcError::Domain("undefined for negative input"))
    } else if x == 0.0 {
        Err(CalcError::Domain("undefined for zero input"))
    } else {
        Ok(x)
    }
}

fn check_unit_interval(x: f64) -> Result<f64, CalcError> {
    if (-1.0..=1.0).contains(&x) {
        Ok(x)
    } else {
        Err(CalcError::Domain("undefined outside [-1, 1]"))
    }
}
