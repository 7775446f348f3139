//! Bracketed root-finding via Brent's method.
//!
//! The formation-time solver calls this with a residual whose evaluation runs
//! a full adaptive quadrature, so every saved iteration matters. Brent's
//! combination of bisection, secant, and inverse quadratic interpolation gives
//! superlinear convergence while keeping the bisection bracket guarantee.
//!
//! Failure modes are kept distinct on purpose:
//! - [`RootFindError::InvalidBracket`]: the endpoints do not straddle a root.
//! - [`RootFindError::IterationLimit`]: the bracket was valid but the cap was
//!   reached before the tolerance was met.
//!
//! Callers apply different policies to the two (see the formation solver).

/// Tolerances and iteration cap for [`brent_root`].
#[derive(Debug, Clone, Copy)]
pub struct BrentParams {
    /// Absolute convergence tolerance on the root location.
    pub xtol: f64,
    /// Relative convergence tolerance on the root location.
    pub rtol: f64,
    /// Iteration cap; exceeding it is an error, not a silent best-effort.
    pub max_iter: usize,
}

impl Default for BrentParams {
    fn default() -> Self {
        Self {
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iter: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootFindError {
    /// `f(a)` and `f(b)` have the same sign (or are non-finite).
    InvalidBracket,
    /// The iteration cap was reached inside a valid bracket.
    IterationLimit,
}

/// Find a root of `f` in `[a, b]`.
///
/// Requires `f(a)` and `f(b)` to have opposite signs. An endpoint that is
/// already an exact zero is returned immediately.
pub fn brent_root<F>(f: F, a: f64, b: f64, params: BrentParams) -> Result<f64, RootFindError>
where
    F: Fn(f64) -> f64,
{
    let mut xa = a;
    let mut xb = b;
    let mut fa = f(xa);
    let mut fb = f(xb);

    if !(fa.is_finite() && fb.is_finite()) {
        return Err(RootFindError::InvalidBracket);
    }
    if fa == 0.0 {
        return Ok(xa);
    }
    if fb == 0.0 {
        return Ok(xb);
    }
    if fa.signum() == fb.signum() {
        return Err(RootFindError::InvalidBracket);
    }

    // xc carries the previous iterate; d/e track the step sizes used to decide
    // between interpolation and bisection.
    let mut xc = xa;
    let mut fc = fa;
    let mut d = xb - xa;
    let mut e = d;

    for _ in 0..params.max_iter {
        if fb.signum() == fc.signum() {
            xc = xa;
            fc = fa;
            d = xb - xa;
            e = d;
        }
        if fc.abs() < fb.abs() {
            xa = xb;
            xb = xc;
            xc = xa;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * params.rtol * xb.abs() + 0.5 * params.xtol;
        let xm = 0.5 * (xc - xb);

        if xm.abs() <= tol || fb == 0.0 {
            return Ok(xb);
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            // Attempt inverse quadratic interpolation (secant when xa == xc).
            let s = fb / fa;
            let (mut p, mut q) = if xa == xc {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (xb - xa) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * xm * q - (tol * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                // Interpolation accepted.
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        xa = xb;
        fa = fb;
        if d.abs() > tol {
            xb += d;
        } else {
            xb += tol.copysign(xm);
        }
        fb = f(xb);
        if !fb.is_finite() {
            return Err(RootFindError::InvalidBracket);
        }
    }

    Err(RootFindError::IterationLimit)
}
