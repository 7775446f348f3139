//! Signal-to-noise aggregation against detector sensitivity curves.
//!
//! For each detector the signal and noise curves are interpolated in log-log
//! space (both are close to piecewise power laws) and
//!
//! ```text
//! SNR = sqrt(4 · ∫ (Ω_signal / Ω_noise)² d(ln f))
//! ```
//!
//! is integrated over the overlap of the detector band and the nonzero
//! support of the spectrum. No overlap, or a spectrum with no nonzero
//! entries, yields SNR 0; that is an absent signal, not an error.

use crate::domain::{NoiseCurve, SnrReport, Spectrum};
use crate::error::AppError;
use crate::math::{LogLogInterp, adaptive_simpson};

/// Shrink factors keeping the integration band strictly inside the tabulated
/// detector band, so interpolation never lands on the edge samples.
const BAND_LO_GUARD: f64 = 1.00001;
const BAND_HI_GUARD: f64 = 0.9999;

/// Relative tolerance of the band integral.
const QUAD_REL_TOL: f64 = 1e-8;

/// Integrated SNR of `spectrum` seen by one detector.
pub fn snr_for_curve(spectrum: &Spectrum, noise: &NoiseCurve) -> Result<f64, AppError> {
    let support = spectrum.nonzero_points();
    if support.len() < 2 {
        return Ok(0.0);
    }

    let signal_freqs: Vec<f64> = support.iter().map(|p| p.freq_hz).collect();
    let signal_omegas: Vec<f64> = support.iter().map(|p| p.omega_h2).collect();
    let signal = LogLogInterp::new(&signal_freqs, &signal_omegas)?;
    let noise_interp = LogLogInterp::new(&noise.freqs_hz, &noise.omegas)?;

    let lo = (noise_interp.x_min() * BAND_LO_GUARD).max(signal.x_min());
    let hi = (noise_interp.x_max() * BAND_HI_GUARD).min(signal.x_max());
    if !(hi > lo) {
        return Ok(0.0);
    }

    let integrand = |ln_f: f64| {
        let f = ln_f.exp();
        // Both interpolants cover [lo, hi] by construction; a failed query
        // inside the clipped band would be a bug, not a data condition.
        match (signal.eval(f), noise_interp.eval(f)) {
            (Ok(s), Ok(n)) => {
                let r = s / n;
                r * r
            }
            _ => 0.0,
        }
    };
    let integral = adaptive_simpson(&integrand, lo.ln(), hi.ln(), QUAD_REL_TOL);

    Ok((4.0 * integral).max(0.0).sqrt())
}

/// SNR per named detector.
pub fn snr_report(spectrum: &Spectrum, curves: &[NoiseCurve]) -> Result<SnrReport, AppError> {
    let mut report = SnrReport::default();
    for curve in curves {
        let snr = snr_for_curve(spectrum, curve)?;
        report.entries.insert(curve.detector.clone(), snr);
    }
    Ok(report)
}
