//! Error types for pricing and sweeping.
//!
//! Both errors are local validation failures and are never retried internally.
//! Domain checks run before any pricing arithmetic; range checks reject inputs
//! whose intermediates leave double precision instead of returning NaN or inf.

use std::fmt;

use thiserror::Error;

use crate::models::bs::Parameter;

/// Which domain constraint a pricing input broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// NaN or infinite.
    NonFinite,
    /// Zero or negative where a strictly positive value is required.
    NonPositive,
    /// Valid on its own, but together with the other inputs drives an
    /// intermediate (σ√T, the discount factor, d1) outside double precision.
    OutOfRange,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::NonFinite => f.write_str("must be finite"),
            Constraint::NonPositive => f.write_str("must be > 0"),
            Constraint::OutOfRange => f.write_str("out of numerical range"),
        }
    }
}

/// A single offending field of a [`PricingInputs`](crate::PricingInputs).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldViolation {
    pub parameter: Parameter,
    pub value: f64,
    pub constraint: Constraint,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} ({})", self.parameter, self.value, self.constraint)
    }
}

/// Pricing inputs outside the Black-Scholes domain.
///
/// Every violated field is reported, not only the first one found.
///
/// # Examples
///
/// ```
/// use bs_surface::{Parameter, PricingInputs};
///
/// let err = PricingInputs::new(0.0, 100.0, 100.0, 0.2, 0.05).unwrap_err();
/// assert_eq!(err.violations[0].parameter, Parameter::TimeToMaturity);
/// assert!(err.to_string().contains("time_to_maturity"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid pricing inputs: {}", join_violations(.violations))]
pub struct InvalidInputError {
    pub violations: Vec<FieldViolation>,
}

impl InvalidInputError {
    pub fn single(parameter: Parameter, value: f64, constraint: Constraint) -> Self {
        Self {
            violations: vec![FieldViolation {
                parameter,
                value,
                constraint,
            }],
        }
    }

    /// Returns true if `parameter` is among the offending fields.
    pub fn involves(&self, parameter: Parameter) -> bool {
        self.violations.iter().any(|v| v.parameter == parameter)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Identifies one of the two axes of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisId {
    /// First axis, indexes matrix rows (varies slowest).
    Rows,
    /// Second axis, indexes matrix columns (varies fastest).
    Columns,
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisId::Rows => f.write_str("row axis"),
            AxisId::Columns => f.write_str("column axis"),
        }
    }
}

/// A malformed [`SweepSpec`](crate::SweepSpec), or a cell that failed to price.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidSweepError {
    #[error("{axis}: need at least 2 points, got {count}")]
    TooFewPoints { axis: AxisId, count: usize },

    #[error("{axis}: bounds must be finite, got [{min}, {max}]")]
    NonFiniteBound { axis: AxisId, min: f64, max: f64 },

    #[error("{axis}: min must be below max, got [{min}, {max}]")]
    EmptyRange { axis: AxisId, min: f64, max: f64 },

    #[error("{axis}: {parameter} must stay > 0, range starts at {min}")]
    OutOfDomain {
        axis: AxisId,
        parameter: Parameter,
        min: f64,
    },

    #[error("both axes sweep {parameter}")]
    DuplicateParameter { parameter: Parameter },

    #[error("cell ({row}, {column}) failed to price: {source}")]
    Evaluation {
        row: usize,
        column: usize,
        #[source]
        source: InvalidInputError,
    },
}

impl InvalidSweepError {
    /// The axis at fault, if the error is attributable to one.
    pub fn axis(&self) -> Option<AxisId> {
        match self {
            InvalidSweepError::TooFewPoints { axis, .. }
            | InvalidSweepError::NonFiniteBound { axis, .. }
            | InvalidSweepError::EmptyRange { axis, .. }
            | InvalidSweepError::OutOfDomain { axis, .. } => Some(*axis),
            InvalidSweepError::DuplicateParameter { .. }
            | InvalidSweepError::Evaluation { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_lists_every_violation() {
        let err = InvalidInputError {
            violations: vec![
                FieldViolation {
                    parameter: Parameter::Strike,
                    value: 0.0,
                    constraint: Constraint::NonPositive,
                },
                FieldViolation {
                    parameter: Parameter::InterestRate,
                    value: f64::NAN,
                    constraint: Constraint::NonFinite,
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("strike = 0 (must be > 0)"), "{msg}");
        assert!(msg.contains("interest_rate = NaN (must be finite)"), "{msg}");
        assert!(err.involves(Parameter::Strike));
        assert!(!err.involves(Parameter::Volatility));
    }

    #[test]
    fn test_sweep_error_axis() {
        let err = InvalidSweepError::EmptyRange {
            axis: AxisId::Columns,
            min: 1.0,
            max: 1.0,
        };
        assert_eq!(err.axis(), Some(AxisId::Columns));
        assert!(err.to_string().starts_with("column axis"));

        let err = InvalidSweepError::Evaluation {
            row: 2,
            column: 3,
            source: InvalidInputError::single(
                Parameter::Volatility,
                -0.1,
                Constraint::NonPositive,
            ),
        };
        assert_eq!(err.axis(), None);
        assert!(err.to_string().contains("cell (2, 3)"));
    }
}
