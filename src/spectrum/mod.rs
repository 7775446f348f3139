//! GW spectrum computation: formation-time solver + spectral integrator.

pub mod formation;
pub mod integrator;

use rayon::prelude::*;

use crate::background::Cosmology;
use crate::domain::{DefectModel, Spectrum, SpectrumPoint};
use crate::error::AppError;
use crate::math::log_space;

pub use formation::{FormationOutcome, FormationSolver};
pub use integrator::{ModeDiagnostics, OmegaIntegrator};

/// Aggregate solver diagnostics over a whole spectrum run.
///
/// Causal skips are expected physics (no loop small enough to radiate at the
/// requested mode/frequency). Non-convergence inside a valid bracket is not
/// expected anywhere in the valid regime; it is counted separately so it can
/// be surfaced instead of silently becoming a zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectrumDiagnostics {
    pub causal_skips: u64,
    pub non_converged: u64,
    /// Grid points that produced a nonzero integrand.
    pub contributing: u64,
}

impl SpectrumDiagnostics {
    fn absorb(&mut self, mode: ModeDiagnostics) {
        self.causal_skips += mode.causal_skips;
        self.non_converged += mode.non_converged;
        self.contributing += mode.contributing;
    }
}

/// Evaluation knobs for [`compute_spectrum`].
#[derive(Debug, Clone, Copy)]
pub struct EvalParams {
    /// Harmonic modes summed per frequency (k = 1..=kmax).
    pub kmax: u32,
    /// Log-time grid samples per (frequency, mode) integral.
    pub time_samples: usize,
    /// Root-finder iteration cap.
    pub max_iter: usize,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            kmax: 2,
            time_samples: 300,
            max_iter: 1000,
        }
    }
}

/// Compute Ω_GW·h² over `freqs_hz` (ascending, Hz) for one defect model.
///
/// Every (frequency, mode) cell is an independent pure evaluation over the
/// shared immutable `Cosmology`, so the cross product fans out on the rayon
/// pool; the k-sum per frequency is reduced afterwards in deterministic
/// order.
pub fn compute_spectrum(
    cosmo: &Cosmology,
    model: &DefectModel,
    params: &EvalParams,
    freqs_hz: &[f64],
) -> Result<(Spectrum, SpectrumDiagnostics), AppError> {
    if params.kmax == 0 {
        return Err(AppError::config("kmax must be >= 1."));
    }
    if params.time_samples < 2 {
        return Err(AppError::config("Time grid needs at least 2 samples."));
    }

    let decay = model.decay_model(cosmo)?;
    let integrator = OmegaIntegrator::new(cosmo, model, &decay, params);

    let cells: Vec<(usize, u32)> = (0..freqs_hz.len())
        .flat_map(|i| (1..=params.kmax).map(move |k| (i, k)))
        .collect();

    let results: Vec<(usize, f64, ModeDiagnostics)> = cells
        .par_iter()
        .map(|&(i, k)| {
            integrator
                .omega_mode(freqs_hz[i], k)
                .map(|(value, diag)| (i, value, diag))
        })
        .collect::<Result<_, AppError>>()?;

    let mut totals = vec![0.0f64; freqs_hz.len()];
    let mut diagnostics = SpectrumDiagnostics::default();
    for (i, value, diag) in results {
        totals[i] += value;
        diagnostics.absorb(diag);
    }

    let points = freqs_hz
        .iter()
        .zip(totals)
        .map(|(&freq_hz, omega_h2)| SpectrumPoint { freq_hz, omega_h2 })
        .collect();
    Ok((Spectrum::new(points)?, diagnostics))
}

/// Log-spaced frequency grid for a scan band.
pub fn frequency_grid(f_min_hz: f64, f_max_hz: f64, bins: usize) -> Result<Vec<f64>, AppError> {
    log_space(f_min_hz, f_max_hz, bins)
}
