use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::InvalidSweepError;
use crate::models::bs::{BlackScholes, PricingInputs};
use crate::models::traits::Pricer;
use crate::sweep::types::{SensitivityMatrix, SweepSpec};

/// Sweep `spec` with the Black-Scholes pricer, one cell at a time.
///
/// # Examples
///
/// ```
/// use bs_surface::{sweep, OutputField, PricingInputs, SweepSpec};
///
/// let base = PricingInputs::new(1.0, 100.0, 100.0, 0.2, 0.05)?;
/// let spec = SweepSpec::spot_volatility(base, OutputField::CallPrice)?;
/// let matrix = sweep(&spec)?;
/// assert_eq!(matrix.shape(), (10, 10));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn sweep(spec: &SweepSpec) -> Result<SensitivityMatrix, InvalidSweepError> {
    sweep_with(&BlackScholes::new(spec.put_delta), spec)
}

/// Sweep `spec` with the Black-Scholes pricer on the rayon thread pool.
///
/// Produces exactly the same matrix as [`sweep`].
pub fn par_sweep(spec: &SweepSpec) -> Result<SensitivityMatrix, InvalidSweepError> {
    par_sweep_with(&BlackScholes::new(spec.put_delta), spec)
}

/// Serial sweep with a caller-supplied pricer.
///
/// The spec is validated in full before `pricer` is called for the first time. The
/// first failing cell in row-major order aborts the sweep; no partial matrix is
/// returned.
pub fn sweep_with<P: Pricer>(
    pricer: &P,
    spec: &SweepSpec,
) -> Result<SensitivityMatrix, InvalidSweepError> {
    let plan = Plan::new(spec)?;
    let mut values = Vec::with_capacity(plan.len());
    for idx in 0..plan.len() {
        values.push(plan.evaluate(pricer, idx).map_err(aborted)?);
    }
    Ok(plan.finish(values))
}

/// Parallel sweep with a caller-supplied pricer.
///
/// Every cell is evaluated independently. When several cells fail, the reported
/// one is still the first in row-major order, so the error matches [`sweep_with`].
pub fn par_sweep_with<P: Pricer + Sync>(
    pricer: &P,
    spec: &SweepSpec,
) -> Result<SensitivityMatrix, InvalidSweepError> {
    let plan = Plan::new(spec)?;
    let results: Vec<Result<f64, InvalidSweepError>> = (0..plan.len())
        .into_par_iter()
        .map(|idx| plan.evaluate(pricer, idx))
        .collect();
    let values = results
        .into_iter()
        .collect::<Result<Vec<f64>, _>>()
        .map_err(aborted)?;
    Ok(plan.finish(values))
}

/// Logs the cell a sweep stopped on. Called once per sweep, on the reported error.
fn aborted(err: InvalidSweepError) -> InvalidSweepError {
    if let InvalidSweepError::Evaluation {
        row,
        column,
        source,
    } = &err
    {
        warn!(row, column, error = %source, "sweep aborted on cell");
    }
    err
}

/// A validated spec with its axis values materialised.
struct Plan<'a> {
    spec: &'a SweepSpec,
    row_values: Vec<f64>,
    column_values: Vec<f64>,
}

impl<'a> Plan<'a> {
    fn new(spec: &'a SweepSpec) -> Result<Self, InvalidSweepError> {
        spec.validate()?;
        let (rows, cols) = spec.shape();
        debug!(
            rows,
            cols,
            row_parameter = %spec.rows.parameter,
            column_parameter = %spec.columns.parameter,
            output = %spec.output,
            "starting sweep"
        );
        Ok(Self {
            spec,
            row_values: spec.rows.values(),
            column_values: spec.columns.values(),
        })
    }

    fn len(&self) -> usize {
        self.row_values.len() * self.column_values.len()
    }

    fn inputs_at(&self, row: usize, column: usize) -> Result<PricingInputs, InvalidSweepError> {
        let (rows, columns) = (&self.spec.rows, &self.spec.columns);
        self.spec
            .base
            .with(rows.parameter, self.row_values[row])
            .and_then(|inputs| inputs.with(columns.parameter, self.column_values[column]))
            .map_err(|source| InvalidSweepError::Evaluation {
                row,
                column,
                source,
            })
    }

    fn evaluate<P: Pricer>(&self, pricer: &P, idx: usize) -> Result<f64, InvalidSweepError> {
        let row = idx / self.column_values.len();
        let column = idx % self.column_values.len();
        let inputs = self.inputs_at(row, column)?;
        pricer
            .price(&inputs)
            .map(|outputs| self.spec.output.extract(&outputs))
            .map_err(|source| InvalidSweepError::Evaluation {
                row,
                column,
                source,
            })
    }

    fn finish(self, values: Vec<f64>) -> SensitivityMatrix {
        debug!(cells = values.len(), "sweep finished");
        SensitivityMatrix::new(self.spec, self.row_values, self.column_values, values)
    }
}
