//! Numerical integration.
//!
//! Two integrators cover the crate's needs:
//!
//! - [`adaptive_simpson`]: error-controlled quadrature of a smooth function,
//!   used inside the formation-time residual (stiff near the lower limit) and
//!   the SNR band integral. It runs thousands of times per spectral point, so
//!   it is recursive and allocation-free.
//! - [`trapezoid`]: exact integration of the piecewise-linear interpolant of
//!   tabulated samples, used for the log-time spectrum integral.

/// Recursion depth cap for [`adaptive_simpson`].
///
/// Depth d allows up to 2^d segments; 40 comfortably exceeds the ~100-segment
/// budget stiff integrands need near a small-ratio lower limit.
const MAX_DEPTH: u32 = 40;

/// Adaptive Simpson quadrature of `f` over `[a, b]` with relative tolerance
/// `rel_tol`.
///
/// Returns 0 for an empty interval. `a > b` integrates with a sign flip.
pub fn adaptive_simpson<F>(f: &F, a: f64, b: f64, rel_tol: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    if a == b {
        return 0.0;
    }
    if a > b {
        return -adaptive_simpson(f, b, a, rel_tol);
    }

    let m = 0.5 * (a + b);
    let fa = f(a);
    let fm = f(m);
    let fb = f(b);
    let whole = simpson(a, b, fa, fm, fb);

    // The single whole-interval estimate can overshoot the true magnitude by
    // orders of magnitude on stiff integrands, which would silently loosen
    // the absolute tolerance by the same factor. First pass against that
    // crude estimate, then rescale the tolerance to the refined result and
    // run again if it came out tighter.
    let crude_tol = rel_tol * whole.abs().max(f64::MIN_POSITIVE);
    let first = refine(f, a, b, fa, fm, fb, whole, crude_tol, MAX_DEPTH);

    let tol = rel_tol * first.abs().max(f64::MIN_POSITIVE);
    if tol >= crude_tol {
        return first;
    }
    refine(f, a, b, fa, fm, fb, whole, tol, MAX_DEPTH)
}

fn simpson(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

#[allow(clippy::too_many_arguments)]
fn refine<F>(f: &F, a: f64, b: f64, fa: f64, fm: f64, fb: f64, whole: f64, tol: f64, depth: u32) -> f64
where
    F: Fn(f64) -> f64,
{
    let m = 0.5 * (a + b);
    let lm = 0.5 * (a + m);
    let rm = 0.5 * (m + b);
    let flm = f(lm);
    let frm = f(rm);

    let left = simpson(a, m, fa, flm, fm);
    let right = simpson(m, b, fm, frm, fb);
    let delta = left + right - whole;

    // Standard Richardson criterion: Simpson's rule error shrinks 16x per
    // halving, so delta/15 estimates the remaining error.
    if depth == 0 || delta.abs() <= 15.0 * tol {
        return left + right + delta / 15.0;
    }

    refine(f, a, m, fa, flm, fm, left, 0.5 * tol, depth - 1)
        + refine(f, m, b, fm, frm, fb, right, 0.5 * tol, depth - 1)
}

/// Trapezoid integration over tabulated `(x, y)` samples with ascending `x`.
///
/// This is the exact integral of the linear interpolant through the samples.
pub fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let mut total = 0.0;
    for i in 1..xs.len() {
        total += 0.5 * (ys[i] + ys[i - 1]) * (xs[i] - xs[i - 1]);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrates_polynomial_exactly() {
        // Simpson's rule is exact for cubics.
        let f = |x: f64| x * x * x - 2.0 * x + 1.0;
        let got = adaptive_simpson(&f, 0.0, 2.0, 1e-10);
        assert!((got - 2.0).abs() < 1e-12, "got {got}");
    }

    #[test]
    fn integrates_exponential() {
        let f = |x: f64| x.exp();
        let exact = 1.0_f64.exp() - 1.0;
        let got = adaptive_simpson(&f, 0.0, 1.0, 1e-12);
        assert!((got / exact - 1.0).abs() < 1e-10);
    }

    #[test]
    fn handles_stiff_inverse_integrand() {
        // 1/x over many decades, analytically ln(b/a).
        let f = |x: f64| 1.0 / x;
        let got = adaptive_simpson(&f, 1e-6, 1e2, 1e-10);
        let exact = (1e2_f64 / 1e-6).ln();
        assert!((got / exact - 1.0).abs() < 1e-8, "got {got}, exact {exact}");
    }

    #[test]
    fn tolerance_tracks_refined_magnitude_not_initial_estimate() {
        // The crude whole-interval Simpson estimate of this integrand is
        // ~0.167 against a true value of ~1e-3, a 170x overshoot. The
        // tolerance must follow the refined magnitude or the result comes
        // out orders of magnitude looser than requested.
        let f = |x: f64| (-1000.0 * x).exp();
        let exact = (1.0 - (-1000.0f64).exp()) / 1000.0;
        let got = adaptive_simpson(&f, 0.0, 1.0, 1e-10);
        assert!(
            (got / exact - 1.0).abs() < 1e-8,
            "got {got:e}, exact {exact:e}"
        );
    }

    #[test]
    fn reversed_limits_flip_sign() {
        let f = |x: f64| x;
        let fwd = adaptive_simpson(&f, 0.0, 3.0, 1e-10);
        let rev = adaptive_simpson(&f, 3.0, 0.0, 1e-10);
        assert!((fwd + rev).abs() < 1e-12);
    }

    #[test]
    fn trapezoid_matches_linear_data() {
        let xs = [0.0, 1.0, 3.0];
        let ys = [0.0, 2.0, 6.0];
        // y = 2x, integral over [0,3] is 9.
        assert!((trapezoid(&xs, &ys) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn trapezoid_empty_and_single_point() {
        assert_eq!(trapezoid(&[], &[]), 0.0);
        assert_eq!(trapezoid(&[1.0], &[5.0]), 0.0);
    }
}
