//! # BS-Surface: Black-Scholes Pricing and Sensitivity Heatmaps
//!
//! `bs-surface` prices European calls and puts under Black-Scholes and sweeps the
//! model over two of its inputs to produce sensitivity matrices for heatmaps.
//! Everything here is a pure function of its inputs: there is no global state,
//! no I/O in the core, and identical inputs always give identical outputs.
//!
//! ## Core Features
//!
//! - **Pricing**: call/put prices, delta, gamma, vega, theta and rho
//! - **Sweeps**: Cartesian sweeps of any two inputs, serial or on the rayon pool
//! - **Config**: TOML-loadable sweep settings with the usual heatmap defaults
//! - **Export**: CSV and SVG heatmap output for finished matrices
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_surface::{price, sweep, OutputField, PricingInputs, SweepSpec};
//!
//! let inputs = PricingInputs::new(1.0, 100.0, 100.0, 0.2, 0.05)?;
//!
//! // Single evaluation
//! let out = price(&inputs)?;
//! println!("call {:.4}  put {:.4}", out.call_price, out.put_price);
//!
//! // 10 x 10 spot/volatility grid of call prices
//! let spec = SweepSpec::spot_volatility(inputs, OutputField::CallPrice)?;
//! let matrix = sweep(&spec)?;
//! assert_eq!(matrix.shape(), (10, 10));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Configuration Presets
//!
//! With the default `serde` feature, [`default_configs`] provides:
//! - `standard()`: 10 × 10, spot ±20%, volatility ±50%
//! - `quick()`: 5 × 5 preview
//! - `high_resolution()`: 50 × 50, evaluated in parallel

// ================================================================================================
// MODULES
// ================================================================================================

pub mod error;
pub mod models;
pub mod sweep;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Errors
pub use error::{AxisId, Constraint, FieldViolation, InvalidInputError, InvalidSweepError};

// Pricing model
pub use models::bs::{
    price, price_with, BlackScholes, OutputField, Parameter, PricingInputs, PricingOutputs,
    PutDeltaConvention,
};
pub use models::traits::Pricer;
pub use models::utils::{norm_cdf, norm_pdf};

// Sensitivity sweeps
pub use sweep::{
    export::{render_heatmap_svg, write_csv, HeatmapStyle},
    grid::{par_sweep, par_sweep_with, sweep, sweep_with},
    types::{
        Axis, SensitivityMatrix, SweepSpec, DEFAULT_RESOLUTION, DEFAULT_SPOT_RANGE,
        DEFAULT_VOLATILITY_RANGE,
    },
};

#[cfg(feature = "serde")]
pub use sweep::config::{Scenario, SweepConfig};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured sweep settings for common heatmaps.
///
/// # Available Configurations
///
/// - [`standard()`](default_configs::standard): the default 10 × 10 heatmap
/// - [`quick()`](default_configs::quick): coarse preview
/// - [`high_resolution()`](default_configs::high_resolution): dense grid for export
#[cfg(feature = "serde")]
pub mod default_configs {
    use crate::sweep::config::SweepConfig;

    /// Standard spot/volatility heatmap.
    ///
    /// **Characteristics:**
    /// - 10 points per axis
    /// - Spot from 80% to 120% of the base spot
    /// - Volatility from 50% to 150% of the base volatility
    /// - Serial evaluation
    ///
    /// # Example
    ///
    /// ```rust
    /// use bs_surface::default_configs;
    ///
    /// let config = default_configs::standard();
    /// assert_eq!(config.resolution, 10);
    /// ```
    pub fn standard() -> SweepConfig {
        SweepConfig::standard()
    }

    /// Coarse 5 × 5 grid, useful for previews and tests.
    pub fn quick() -> SweepConfig {
        SweepConfig::quick()
    }

    /// Dense 50 × 50 grid evaluated on the rayon pool.
    ///
    /// **Use Cases:**
    /// - Exported heatmaps
    /// - Smooth surfaces for reports
    pub fn high_resolution() -> SweepConfig {
        SweepConfig::high_resolution()
    }
}
