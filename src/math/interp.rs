//! Grid generation and interpolation.
//!
//! The spectrum pipeline works almost entirely in log space: time grids span
//! ~40 decades and both the GW signal and detector sensitivities are close to
//! power laws, so log-log linear interpolation is the natural representation.

use crate::error::AppError;

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
pub fn log_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0 && max > min) {
        return Err(AppError::config(format!(
            "Invalid log-space range: min={min}, max={max} (must be finite, >0, and max>min)."
        )));
    }
    if steps < 2 {
        return Err(AppError::config("Log-space steps must be >= 2."));
    }

    let ln_min = min.ln();
    let ln_max = max.ln();
    let step = (ln_max - ln_min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push((ln_min + step * i as f64).exp());
    }
    Ok(out)
}

/// Piecewise-linear interpolation over strictly increasing abscissae.
#[derive(Debug, Clone)]
pub struct LinearInterp {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterp {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, AppError> {
        if xs.len() != ys.len() {
            return Err(AppError::domain(
                "Interpolation abscissae and ordinates differ in length.",
            ));
        }
        if xs.len() < 2 {
            return Err(AppError::domain(
                "Interpolation needs at least two samples.",
            ));
        }
        for w in xs.windows(2) {
            if !(w[1] > w[0]) {
                return Err(AppError::domain(format!(
                    "Interpolation abscissae must be strictly increasing (got {} then {}).",
                    w[0], w[1]
                )));
            }
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(AppError::domain("Interpolation samples must be finite."));
        }
        Ok(Self { xs, ys })
    }

    pub fn x_min(&self) -> f64 {
        self.xs[0]
    }

    pub fn x_max(&self) -> f64 {
        *self.xs.last().unwrap_or(&f64::NAN)
    }

    /// Evaluate at `x`, failing outside `[x_min, x_max]`.
    pub fn eval(&self, x: f64) -> Result<f64, AppError> {
        if !x.is_finite() || x < self.x_min() || x > self.x_max() {
            return Err(AppError::domain(format!(
                "Query {x:e} outside interpolation range [{:e}, {:e}].",
                self.x_min(),
                self.x_max()
            )));
        }
        // Index of the segment containing x.
        let i = self.xs.partition_point(|&v| v <= x).min(self.xs.len() - 1);
        let i = i.max(1);
        let (x0, x1) = (self.xs[i - 1], self.xs[i]);
        let (y0, y1) = (self.ys[i - 1], self.ys[i]);
        let u = (x - x0) / (x1 - x0);
        Ok(y0 + u * (y1 - y0))
    }
}

/// Log-log linear interpolation of a positive curve.
///
/// Stores `log10` of both columns; evaluation returns
/// `10^interp(log10 x)`, i.e. piecewise power-law interpolation.
#[derive(Debug, Clone)]
pub struct LogLogInterp {
    inner: LinearInterp,
}

impl LogLogInterp {
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self, AppError> {
        if xs.iter().chain(ys.iter()).any(|&v| v <= 0.0) {
            return Err(AppError::domain(
                "Log-log interpolation requires strictly positive samples.",
            ));
        }
        let lx: Vec<f64> = xs.iter().map(|v| v.log10()).collect();
        let ly: Vec<f64> = ys.iter().map(|v| v.log10()).collect();
        Ok(Self {
            inner: LinearInterp::new(lx, ly)?,
        })
    }

    pub fn x_min(&self) -> f64 {
        10f64.powf(self.inner.x_min())
    }

    pub fn x_max(&self) -> f64 {
        10f64.powf(self.inner.x_max())
    }

    pub fn eval(&self, x: f64) -> Result<f64, AppError> {
        Ok(10f64.powf(self.inner.eval(x.log10())?))
    }
}
