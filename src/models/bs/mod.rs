// Closed-form Black-Scholes pricing for European calls and puts on a
// non-dividend-paying underlying, with first and second order Greeks.

pub mod types;

pub use types::*;

use crate::error::{Constraint, FieldViolation, InvalidInputError};
use crate::models::traits::Pricer;
use crate::models::utils::{norm_cdf, norm_pdf};

/// Black-Scholes pricer.
///
/// Stateless apart from the put delta convention; cheap to copy and safe to share
/// between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackScholes {
    pub put_delta: PutDeltaConvention,
}

impl BlackScholes {
    pub fn new(put_delta: PutDeltaConvention) -> Self {
        Self { put_delta }
    }
}

impl Pricer for BlackScholes {
    fn price(&self, inputs: &PricingInputs) -> Result<PricingOutputs, InvalidInputError> {
        price_with(inputs, self.put_delta)
    }
}

/// Price a call and a put and compute their Greeks, using the compat put delta.
///
/// # Examples
///
/// ```
/// use bs_surface::{price, PricingInputs};
///
/// let inputs = PricingInputs::new(1.0, 100.0, 100.0, 0.2, 0.05)?;
/// let out = price(&inputs)?;
/// assert!((out.call_price - 10.4506).abs() < 1e-3);
/// assert!((out.put_price - 5.5735).abs() < 1e-3);
/// # Ok::<(), bs_surface::InvalidInputError>(())
/// ```
pub fn price(inputs: &PricingInputs) -> Result<PricingOutputs, InvalidInputError> {
    price_with(inputs, PutDeltaConvention::Compat)
}

/// Same as [`price`] with an explicit put delta convention.
#[allow(non_snake_case)]
pub fn price_with(
    inputs: &PricingInputs,
    put_delta: PutDeltaConvention,
) -> Result<PricingOutputs, InvalidInputError> {
    inputs.validate()?;

    let S = inputs.current_price();
    let K = inputs.strike();
    let T = inputs.time_to_maturity();
    let sigma = inputs.volatility();
    let r = inputs.interest_rate();

    let sqrt_t = T.sqrt();
    let sig_sqrt_t = sigma * sqrt_t;
    if sig_sqrt_t <= 0.0 || !sig_sqrt_t.is_finite() {
        return Err(out_of_range(Parameter::Volatility, sigma));
    }
    let discount = (-r * T).exp();
    if !discount.is_finite() {
        return Err(out_of_range(Parameter::InterestRate, r));
    }
    let d1 = ((S / K).ln() + (r + 0.5 * sigma.powi(2)) * T) / sig_sqrt_t;
    if !d1.is_finite() {
        return Err(out_of_range(Parameter::CurrentPrice, S));
    }
    let d2 = d1 - sig_sqrt_t;

    let nd1 = norm_cdf(d1);
    let nd2 = norm_cdf(d2);
    let n_minus_d1 = norm_cdf(-d1);
    let n_minus_d2 = norm_cdf(-d2);
    let pdf_d1 = norm_pdf(d1);

    let call_price = S * nd1 - K * discount * nd2;
    let put_price = K * discount * n_minus_d2 - S * n_minus_d1;

    let put_delta = match put_delta {
        PutDeltaConvention::Compat => 1.0 - nd2,
        PutDeltaConvention::Textbook => nd1 - 1.0,
    };

    let gamma = pdf_d1 / (S * sig_sqrt_t);
    let time_decay = -S * pdf_d1 * sigma / (2.0 * sqrt_t);

    let outputs = PricingOutputs {
        call_price,
        put_price,
        call_delta: nd1,
        put_delta,
        call_gamma: gamma,
        put_gamma: gamma,
        vega: S * pdf_d1 * sqrt_t,
        call_theta: time_decay - r * K * discount * nd2,
        put_theta: time_decay + r * K * discount * n_minus_d2,
        call_rho: K * T * discount * nd2,
        put_rho: -K * T * discount * n_minus_d2,
    };

    // Prices and Greeks scale with spot and strike, so any remaining overflow
    // is down to their magnitude.
    if !outputs.is_finite() {
        return Err(InvalidInputError {
            violations: vec![
                FieldViolation {
                    parameter: Parameter::CurrentPrice,
                    value: S,
                    constraint: Constraint::OutOfRange,
                },
                FieldViolation {
                    parameter: Parameter::Strike,
                    value: K,
                    constraint: Constraint::OutOfRange,
                },
            ],
        });
    }
    Ok(outputs)
}

fn out_of_range(parameter: Parameter, value: f64) -> InvalidInputError {
    InvalidInputError::single(parameter, value, Constraint::OutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm() -> PricingInputs {
        PricingInputs::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap()
    }

    #[test]
    fn test_reference_values() {
        let out = price(&atm()).unwrap();
        assert!((out.call_price - 10.450_583_572_185_565).abs() < 1e-9);
        assert!((out.put_price - 5.573_526_022_256_971).abs() < 1e-9);
        assert!((out.call_delta - 0.636_830_651_175_619).abs() < 1e-12);
        assert!((out.call_gamma - 0.018_762_017_345_846_9).abs() < 1e-12);
        assert!((out.vega - 37.524_034_691_693_8).abs() < 1e-9);
    }

    #[test]
    fn test_put_delta_conventions() {
        let compat = price_with(&atm(), PutDeltaConvention::Compat).unwrap();
        let textbook = price_with(&atm(), PutDeltaConvention::Textbook).unwrap();
        assert!(compat.put_delta > 0.0 && compat.put_delta < 1.0);
        assert!(textbook.put_delta < 0.0 && textbook.put_delta > -1.0);
        // Textbook put delta obeys delta parity; everything else is unaffected.
        assert!((textbook.call_delta - textbook.put_delta - 1.0).abs() < 1e-15);
        assert_eq!(compat.call_price, textbook.call_price);
        assert_eq!(compat.put_gamma, textbook.put_gamma);
    }

    #[test]
    fn test_textbook_put_delta_matches_finite_difference() {
        let h = 1e-4;
        let base = atm();
        let up = base.with(Parameter::CurrentPrice, 100.0 + h).unwrap();
        let down = base.with(Parameter::CurrentPrice, 100.0 - h).unwrap();
        let fd = (price(&up).unwrap().put_price - price(&down).unwrap().put_price) / (2.0 * h);
        let analytic = price_with(&base, PutDeltaConvention::Textbook)
            .unwrap()
            .put_delta;
        assert!((fd - analytic).abs() < 1e-6, "fd={fd} analytic={analytic}");
    }

    #[test]
    fn test_theta_and_rho_match_finite_differences() {
        let h = 1e-5;
        let base = atm();
        let out = price(&base).unwrap();

        let t_up = price(&base.with(Parameter::TimeToMaturity, 1.0 + h).unwrap()).unwrap();
        let t_dn = price(&base.with(Parameter::TimeToMaturity, 1.0 - h).unwrap()).unwrap();
        // Theta is the decay as calendar time passes, i.e. -dV/dT.
        let call_theta_fd = -(t_up.call_price - t_dn.call_price) / (2.0 * h);
        let put_theta_fd = -(t_up.put_price - t_dn.put_price) / (2.0 * h);
        assert!((out.call_theta - call_theta_fd).abs() < 1e-5);
        assert!((out.put_theta - put_theta_fd).abs() < 1e-5);

        let r_up = price(&base.with(Parameter::InterestRate, 0.05 + h).unwrap()).unwrap();
        let r_dn = price(&base.with(Parameter::InterestRate, 0.05 - h).unwrap()).unwrap();
        assert!((out.call_rho - (r_up.call_price - r_dn.call_price) / (2.0 * h)).abs() < 1e-4);
        assert!((out.put_rho - (r_up.put_price - r_dn.put_price) / (2.0 * h)).abs() < 1e-4);
    }

    #[test]
    fn test_vanishing_sigma_sqrt_t_is_rejected() {
        // σ√T = 1e-325 underflows to zero, which would make d1 = 0/0.
        let inputs = PricingInputs::new(1e-250, 100.0, 100.0, 1e-200, 0.0).unwrap();
        let err = price(&inputs).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].parameter, Parameter::Volatility);
        assert_eq!(err.violations[0].constraint, Constraint::OutOfRange);
    }

    #[test]
    fn test_overflowing_discount_is_rejected() {
        // exp(800) overflows the discount factor.
        let inputs = PricingInputs::new(1.0, 100.0, 100.0, 0.2, -800.0).unwrap();
        let err = price_with(&inputs, PutDeltaConvention::Textbook).unwrap_err();
        assert_eq!(err.violations[0].parameter, Parameter::InterestRate);
        assert_eq!(err.violations[0].constraint, Constraint::OutOfRange);
        assert!(err.to_string().contains("out of numerical range"));
    }

    #[test]
    fn test_overflowing_outputs_are_rejected() {
        // Prices and d1 are finite, but rho needs K * T = 4e308.
        let inputs = PricingInputs::new(4.0, 1e308, 1e308, 0.2, -0.1).unwrap();
        let err = price(&inputs).unwrap_err();
        assert!(err.involves(Parameter::CurrentPrice));
        assert!(err.involves(Parameter::Strike));
    }

    #[test]
    fn test_pricer_trait_uses_convention() {
        let pricer = BlackScholes::new(PutDeltaConvention::Textbook);
        let out = pricer.price(&atm()).unwrap();
        assert!(out.put_delta < 0.0);
        assert_eq!(BlackScholes::default().put_delta, PutDeltaConvention::Compat);
    }
}
