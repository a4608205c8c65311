pub mod bs;

/// Common traits used by pricing models
pub mod traits {
    use crate::error::InvalidInputError;
    use crate::models::bs::{PricingInputs, PricingOutputs};

    /// A model that turns one set of market/contract inputs into prices and Greeks.
    ///
    /// The sweep only talks to this trait, so alternative or instrumented pricers
    /// can be swapped in without touching the grid code.
    pub trait Pricer {
        fn price(&self, inputs: &PricingInputs) -> Result<PricingOutputs, InvalidInputError>;
    }

    impl<P: Pricer + ?Sized> Pricer for &P {
        fn price(&self, inputs: &PricingInputs) -> Result<PricingOutputs, InvalidInputError> {
            (**self).price(inputs)
        }
    }
}

/// Standard normal distribution helpers
pub mod utils {
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    /// Standard normal cumulative distribution function.
    ///
    /// Written as `0.5 * erfc(-x / sqrt(2))` so both tails saturate towards 0 and 1
    /// without the cancellation `0.5 * (1 + erf(x))` suffers for large negative `x`.
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * libm::erfc(-x * FRAC_1_SQRT_2)
    }

    /// Standard normal probability density function.
    pub fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

}
