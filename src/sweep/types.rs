use crate::error::{AxisId, InvalidSweepError};
use crate::models::bs::{OutputField, Parameter, PricingInputs, PutDeltaConvention};

/// Default fraction of spot used for the lower and upper spot bounds.
pub const DEFAULT_SPOT_RANGE: (f64, f64) = (0.8, 1.2);
/// Default fraction of volatility used for the lower and upper volatility bounds.
pub const DEFAULT_VOLATILITY_RANGE: (f64, f64) = (0.5, 1.5);
/// Default number of points on each axis.
pub const DEFAULT_RESOLUTION: usize = 10;

/// One linearly spaced sweep axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axis {
    pub parameter: Parameter,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl Axis {
    pub fn new(parameter: Parameter, min: f64, max: f64, count: usize) -> Self {
        Self {
            parameter,
            min,
            max,
            count,
        }
    }

    /// `count` evenly spaced values from `min` to `max` inclusive.
    ///
    /// `value[i] = min + i * (max - min) / (count - 1)`. Only meaningful once the
    /// axis has been validated.
    pub fn values(&self) -> Vec<f64> {
        if self.count < 2 {
            return vec![self.min; self.count];
        }
        let step = (self.max - self.min) / (self.count - 1) as f64;
        (0..self.count)
            .map(|i| self.min + i as f64 * step)
            .collect()
    }

    pub fn validate(&self, axis: AxisId) -> Result<(), InvalidSweepError> {
        if self.count < 2 {
            return Err(InvalidSweepError::TooFewPoints {
                axis,
                count: self.count,
            });
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(InvalidSweepError::NonFiniteBound {
                axis,
                min: self.min,
                max: self.max,
            });
        }
        if self.min >= self.max {
            return Err(InvalidSweepError::EmptyRange {
                axis,
                min: self.min,
                max: self.max,
            });
        }
        // Axes are ascending, so checking the lower bound covers every point.
        if self.parameter.requires_positive() && self.min <= 0.0 {
            return Err(InvalidSweepError::OutOfDomain {
                axis,
                parameter: self.parameter,
                min: self.min,
            });
        }
        Ok(())
    }
}

/// Everything needed to run one sweep.
///
/// `rows` varies slowest and `columns` fastest. On each cell the two axis values
/// replace the matching fields of `base`; the remaining three fields come from
/// `base` unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepSpec {
    pub rows: Axis,
    pub columns: Axis,
    pub base: PricingInputs,
    #[cfg_attr(feature = "serde", serde(default))]
    pub output: OutputField,
    #[cfg_attr(feature = "serde", serde(default))]
    pub put_delta: PutDeltaConvention,
}

impl SweepSpec {
    /// Builds and validates a sweep spec using the compat put delta.
    pub fn new(
        rows: Axis,
        columns: Axis,
        base: PricingInputs,
        output: OutputField,
    ) -> Result<Self, InvalidSweepError> {
        let spec = Self {
            rows,
            columns,
            base,
            output,
            put_delta: PutDeltaConvention::default(),
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Spot on the rows, volatility on the columns, using the usual heatmap
    /// defaults: spot in `[0.8 S, 1.2 S]`, volatility in `[0.5 σ, 1.5 σ]`, 10 × 10.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_surface::{OutputField, PricingInputs, SweepSpec};
    ///
    /// let base = PricingInputs::new(1.0, 100.0, 100.0, 0.2, 0.05)?;
    /// let spec = SweepSpec::spot_volatility(base, OutputField::CallPrice)?;
    /// assert_eq!((spec.rows.min, spec.rows.max), (80.0, 120.0));
    /// assert_eq!(spec.columns.count, 10);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn spot_volatility(
        base: PricingInputs,
        output: OutputField,
    ) -> Result<Self, InvalidSweepError> {
        Self::spot_volatility_with(
            base,
            output,
            DEFAULT_SPOT_RANGE,
            DEFAULT_VOLATILITY_RANGE,
            DEFAULT_RESOLUTION,
        )
    }

    /// Spot/volatility sweep with custom multipliers and resolution.
    pub fn spot_volatility_with(
        base: PricingInputs,
        output: OutputField,
        spot_range: (f64, f64),
        volatility_range: (f64, f64),
        resolution: usize,
    ) -> Result<Self, InvalidSweepError> {
        let spot = base.current_price();
        let vol = base.volatility();
        Self::new(
            Axis::new(
                Parameter::CurrentPrice,
                spot * spot_range.0,
                spot * spot_range.1,
                resolution,
            ),
            Axis::new(
                Parameter::Volatility,
                vol * volatility_range.0,
                vol * volatility_range.1,
                resolution,
            ),
            base,
            output,
        )
    }

    pub fn with_put_delta(mut self, put_delta: PutDeltaConvention) -> Self {
        self.put_delta = put_delta;
        self
    }

    /// Checks both axes and their combination. Runs before any cell is priced.
    pub fn validate(&self) -> Result<(), InvalidSweepError> {
        self.rows.validate(AxisId::Rows)?;
        self.columns.validate(AxisId::Columns)?;
        if self.rows.parameter == self.columns.parameter {
            return Err(InvalidSweepError::DuplicateParameter {
                parameter: self.rows.parameter,
            });
        }
        Ok(())
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows.count, self.columns.count)
    }
}

/// Row-major grid of one pricing output over two swept parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SensitivityMatrix {
    output: OutputField,
    row_parameter: Parameter,
    column_parameter: Parameter,
    row_values: Vec<f64>,
    column_values: Vec<f64>,
    values: Vec<f64>,
}

impl SensitivityMatrix {
    pub(crate) fn new(
        spec: &SweepSpec,
        row_values: Vec<f64>,
        column_values: Vec<f64>,
        values: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(values.len(), row_values.len() * column_values.len());
        Self {
            output: spec.output,
            row_parameter: spec.rows.parameter,
            column_parameter: spec.columns.parameter,
            row_values,
            column_values,
            values,
        }
    }

    pub fn output(&self) -> OutputField {
        self.output
    }

    pub fn row_parameter(&self) -> Parameter {
        self.row_parameter
    }

    pub fn column_parameter(&self) -> Parameter {
        self.column_parameter
    }

    pub fn row_values(&self) -> &[f64] {
        &self.row_values
    }

    pub fn column_values(&self) -> &[f64] {
        &self.column_values
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_values.len(), self.column_values.len())
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        let (rows, cols) = self.shape();
        if row >= rows || column >= cols {
            return None;
        }
        Some(self.values[row * cols + column])
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        let cols = self.column_values.len();
        self.values.get(row * cols..(row + 1) * cols)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.column_values.len().max(1))
    }

    /// All cells in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }
}
