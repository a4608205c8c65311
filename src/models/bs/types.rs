use std::fmt;

use crate::error::{Constraint, FieldViolation, InvalidInputError};

/// One of the five Black-Scholes inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Parameter {
    TimeToMaturity,
    Strike,
    CurrentPrice,
    Volatility,
    InterestRate,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::TimeToMaturity,
        Parameter::Strike,
        Parameter::CurrentPrice,
        Parameter::Volatility,
        Parameter::InterestRate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Parameter::TimeToMaturity => "time_to_maturity",
            Parameter::Strike => "strike",
            Parameter::CurrentPrice => "current_price",
            Parameter::Volatility => "volatility",
            Parameter::InterestRate => "interest_rate",
        }
    }

    /// Whether the model is only defined for strictly positive values.
    pub fn requires_positive(self) -> bool {
        !matches!(self, Parameter::InterestRate)
    }

    fn check(self, value: f64) -> Option<FieldViolation> {
        let constraint = if !value.is_finite() {
            Constraint::NonFinite
        } else if self.requires_positive() && value <= 0.0 {
            Constraint::NonPositive
        } else {
            return None;
        };
        Some(FieldViolation {
            parameter: self,
            value,
            constraint,
        })
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Market and contract inputs for a European option.
///
/// Values can only be built through [`PricingInputs::new`] (or deserialised, which
/// runs the same checks), so a `PricingInputs` in hand is always inside the model
/// domain: time to maturity, strike, spot and volatility strictly positive, every
/// field finite.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawPricingInputs")
)]
pub struct PricingInputs {
    time_to_maturity: f64,
    strike: f64,
    current_price: f64,
    volatility: f64,
    interest_rate: f64,
}

impl PricingInputs {
    /// Validates and builds a set of inputs.
    ///
    /// # Errors
    ///
    /// [`InvalidInputError`] listing every field that is non-finite or, for the
    /// four positive-only fields, not strictly positive.
    pub fn new(
        time_to_maturity: f64,
        strike: f64,
        current_price: f64,
        volatility: f64,
        interest_rate: f64,
    ) -> Result<Self, InvalidInputError> {
        let inputs = Self {
            time_to_maturity,
            strike,
            current_price,
            volatility,
            interest_rate,
        };
        inputs.validate()?;
        Ok(inputs)
    }

    pub fn time_to_maturity(&self) -> f64 {
        self.time_to_maturity
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::TimeToMaturity => self.time_to_maturity,
            Parameter::Strike => self.strike,
            Parameter::CurrentPrice => self.current_price,
            Parameter::Volatility => self.volatility,
            Parameter::InterestRate => self.interest_rate,
        }
    }

    /// Copy of `self` with one field replaced.
    pub fn with(&self, parameter: Parameter, value: f64) -> Result<Self, InvalidInputError> {
        if let Some(violation) = parameter.check(value) {
            return Err(InvalidInputError {
                violations: vec![violation],
            });
        }
        let mut next = *self;
        match parameter {
            Parameter::TimeToMaturity => next.time_to_maturity = value,
            Parameter::Strike => next.strike = value,
            Parameter::CurrentPrice => next.current_price = value,
            Parameter::Volatility => next.volatility = value,
            Parameter::InterestRate => next.interest_rate = value,
        }
        Ok(next)
    }

    /// Re-checks the domain constraints.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let violations: Vec<FieldViolation> = Parameter::ALL
            .into_iter()
            .filter_map(|p| p.check(self.get(p)))
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(InvalidInputError { violations })
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPricingInputs {
    time_to_maturity: f64,
    strike: f64,
    current_price: f64,
    volatility: f64,
    interest_rate: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPricingInputs> for PricingInputs {
    type Error = InvalidInputError;

    fn try_from(raw: RawPricingInputs) -> Result<Self, Self::Error> {
        PricingInputs::new(
            raw.time_to_maturity,
            raw.strike,
            raw.current_price,
            raw.volatility,
            raw.interest_rate,
        )
    }
}

/// Prices and Greeks for the call and the put sharing one set of inputs.
///
/// Theta is per year and vega/rho are per unit (not per percentage point) of
/// volatility and rate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingOutputs {
    pub call_price: f64,
    pub put_price: f64,
    pub call_delta: f64,
    pub put_delta: f64,
    pub call_gamma: f64,
    pub put_gamma: f64,
    pub vega: f64,
    pub call_theta: f64,
    pub put_theta: f64,
    pub call_rho: f64,
    pub put_rho: f64,
}

impl PricingOutputs {
    /// True when no price or Greek is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        [
            self.call_price,
            self.put_price,
            self.call_delta,
            self.put_delta,
            self.call_gamma,
            self.put_gamma,
            self.vega,
            self.call_theta,
            self.put_theta,
            self.call_rho,
            self.put_rho,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Selects which [`PricingOutputs`] field a sweep records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum OutputField {
    #[default]
    CallPrice,
    PutPrice,
    CallDelta,
    PutDelta,
    CallGamma,
    PutGamma,
    Vega,
    CallTheta,
    PutTheta,
    CallRho,
    PutRho,
}

impl OutputField {
    pub fn extract(self, outputs: &PricingOutputs) -> f64 {
        match self {
            OutputField::CallPrice => outputs.call_price,
            OutputField::PutPrice => outputs.put_price,
            OutputField::CallDelta => outputs.call_delta,
            OutputField::PutDelta => outputs.put_delta,
            OutputField::CallGamma => outputs.call_gamma,
            OutputField::PutGamma => outputs.put_gamma,
            OutputField::Vega => outputs.vega,
            OutputField::CallTheta => outputs.call_theta,
            OutputField::PutTheta => outputs.put_theta,
            OutputField::CallRho => outputs.call_rho,
            OutputField::PutRho => outputs.put_rho,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputField::CallPrice => "call_price",
            OutputField::PutPrice => "put_price",
            OutputField::CallDelta => "call_delta",
            OutputField::PutDelta => "put_delta",
            OutputField::CallGamma => "call_gamma",
            OutputField::PutGamma => "put_gamma",
            OutputField::Vega => "vega",
            OutputField::CallTheta => "call_theta",
            OutputField::PutTheta => "put_theta",
            OutputField::CallRho => "call_rho",
            OutputField::PutRho => "put_rho",
        }
    }
}

impl fmt::Display for OutputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the put delta is reported.
///
/// `Compat` keeps the historical `1 - Φ(d2)` formula, which is what existing
/// heatmaps built on this engine show. `Textbook` is the analytic derivative of
/// the put price with respect to spot, `Φ(d1) - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PutDeltaConvention {
    #[default]
    Compat,
    Textbook,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_valid_and_negative_rate() {
        let inputs = PricingInputs::new(0.5, 90.0, 100.0, 0.3, -0.01).unwrap();
        assert_eq!(inputs.get(Parameter::InterestRate), -0.01);
        assert_eq!(inputs.strike(), 90.0);
    }

    #[test]
    fn test_new_collects_all_violations() {
        let err = PricingInputs::new(0.0, -1.0, f64::INFINITY, 0.2, f64::NAN).unwrap_err();
        let params: Vec<Parameter> = err.violations.iter().map(|v| v.parameter).collect();
        assert_eq!(
            params,
            vec![
                Parameter::TimeToMaturity,
                Parameter::Strike,
                Parameter::CurrentPrice,
                Parameter::InterestRate
            ]
        );
        assert_eq!(err.violations[2].constraint, Constraint::NonFinite);
        assert_eq!(err.violations[1].constraint, Constraint::NonPositive);
    }

    #[test]
    fn test_with_overrides_single_field() {
        let base = PricingInputs::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
        let bumped = base.with(Parameter::Volatility, 0.35).unwrap();
        assert_eq!(bumped.volatility(), 0.35);
        assert_eq!(bumped.current_price(), base.current_price());
        assert_eq!(base.volatility(), 0.2);

        let err = base.with(Parameter::CurrentPrice, 0.0).unwrap_err();
        assert!(err.involves(Parameter::CurrentPrice));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        const DOC: &str = r#"
            time_to_maturity = 1.0
            strike = 100.0
            current_price = 100.0
            volatility = 0.2
            interest_rate = 0.05
        "#;
        let ok: PricingInputs = toml::from_str(DOC).unwrap();
        assert_eq!(ok.volatility(), 0.2);

        let bad: Result<PricingInputs, _> =
            toml::from_str(&DOC.replace("volatility = 0.2", "volatility = 0.0"));
        let msg = bad.unwrap_err().to_string();
        assert!(msg.contains("volatility"), "{msg}");
    }
}
