use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InvalidSweepError;
use crate::models::bs::{OutputField, PricingInputs, PutDeltaConvention};
use crate::sweep::export::HeatmapStyle;
use crate::sweep::grid::{par_sweep, sweep};
use crate::sweep::types::{
    SensitivityMatrix, SweepSpec, DEFAULT_RESOLUTION, DEFAULT_SPOT_RANGE,
    DEFAULT_VOLATILITY_RANGE,
};

/// Spot/volatility heatmap settings, loadable from TOML.
///
/// Ranges are multipliers applied to the base spot and volatility, so one config
/// can be reused across underlyings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Points per axis
    #[serde(default = "default_resolution")]
    pub resolution: usize,

    /// `[low, high]` multipliers of the base spot
    #[serde(default = "default_spot_range")]
    pub spot_range: (f64, f64),

    /// `[low, high]` multipliers of the base volatility
    #[serde(default = "default_volatility_range")]
    pub volatility_range: (f64, f64),

    #[serde(default)]
    pub output: OutputField,

    #[serde(default)]
    pub put_delta: PutDeltaConvention,

    /// Evaluate cells on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,

    #[serde(default)]
    pub heatmap: HeatmapStyle,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl SweepConfig {
    /// 10 × 10 grid over `[0.8, 1.2]` spot and `[0.5, 1.5]` volatility.
    pub fn standard() -> Self {
        Self {
            resolution: default_resolution(),
            spot_range: default_spot_range(),
            volatility_range: default_volatility_range(),
            output: OutputField::CallPrice,
            put_delta: PutDeltaConvention::Compat,
            parallel: false,
            heatmap: HeatmapStyle::default(),
        }
    }

    /// Coarse 5 × 5 grid for previews
    pub fn quick() -> Self {
        Self {
            resolution: 5,
            ..Self::standard()
        }
    }

    /// 50 × 50 grid evaluated in parallel, with a larger image
    pub fn high_resolution() -> Self {
        Self {
            resolution: 50,
            parallel: true,
            heatmap: HeatmapStyle {
                width: 1000,
                height: 1000,
                ..HeatmapStyle::default()
            },
            ..Self::standard()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).context("failed to parse sweep config")?;
        debug!(
            resolution = config.resolution,
            output = %config.output,
            parallel = config.parallel,
            "loaded sweep config"
        );
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// Builds the validated spot/volatility spec around `base`.
    pub fn spec_for(&self, base: PricingInputs) -> Result<SweepSpec, InvalidSweepError> {
        SweepSpec::spot_volatility_with(
            base,
            self.output,
            self.spot_range,
            self.volatility_range,
            self.resolution,
        )
        .map(|spec| spec.with_put_delta(self.put_delta))
    }

    pub fn run(&self, base: PricingInputs) -> Result<SensitivityMatrix, InvalidSweepError> {
        let spec = self.spec_for(base)?;
        if self.parallel {
            par_sweep(&spec)
        } else {
            sweep(&spec)
        }
    }
}

/// Base inputs plus the sweep to run around them.
///
/// ```toml
/// [inputs]
/// time_to_maturity = 1.0
/// strike = 100.0
/// current_price = 100.0
/// volatility = 0.2
/// interest_rate = 0.05
///
/// [sweep]
/// resolution = 20
/// output = "put_price"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub inputs: PricingInputs,
    #[serde(default)]
    pub sweep: SweepConfig,
}

impl Scenario {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to parse scenario")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    pub fn run(&self) -> Result<SensitivityMatrix, InvalidSweepError> {
        self.sweep.run(self.inputs)
    }
}

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

fn default_spot_range() -> (f64, f64) {
    DEFAULT_SPOT_RANGE
}

fn default_volatility_range() -> (f64, f64) {
    DEFAULT_VOLATILITY_RANGE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AxisId;

    #[test]
    fn test_empty_toml_gives_standard() {
        let config = SweepConfig::from_toml_str("").unwrap();
        assert_eq!(config, SweepConfig::standard());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = SweepConfig::from_toml_str(
            r#"
            resolution = 4
            volatility_range = [0.25, 2.0]
            output = "put_delta"
            put_delta = "textbook"

            [heatmap]
            width = 200
            "#,
        )
        .unwrap();
        assert_eq!(config.resolution, 4);
        assert_eq!(config.spot_range, (0.8, 1.2));
        assert_eq!(config.volatility_range, (0.25, 2.0));
        assert_eq!(config.output, OutputField::PutDelta);
        assert_eq!(config.put_delta, PutDeltaConvention::Textbook);
        assert_eq!(config.heatmap.width, 200);
        assert_eq!(config.heatmap.height, 480);
    }

    #[test]
    fn test_unknown_output_is_rejected() {
        assert!(SweepConfig::from_toml_str("output = \"charm\"").is_err());
    }

    #[test]
    fn test_bad_resolution_surfaces_sweep_error() {
        let base = PricingInputs::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
        let config = SweepConfig {
            resolution: 1,
            ..SweepConfig::standard()
        };
        let err = config.run(base).unwrap_err();
        assert_eq!(err.axis(), Some(AxisId::Rows));
    }
}
