//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can
//! be:
//!
//! - used in-memory during spectrum evaluation
//! - exported to two-column text / JSON artifacts
//! - reloaded later for SNR comparisons against detector curves

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::background::{Cosmology, G_NEWTON, M_PLANCK};
use crate::error::AppError;
use crate::models::DecayRateModel;

/// Which defect sources the GW background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DefectKind {
    /// Gauged cosmic strings (single symmetry-breaking scale).
    Gauge,
    /// Domain walls bounded by cosmic strings (two breaking scales).
    WallBounded,
}

/// A fully specified defect model: kind plus its breaking scales (GeV).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DefectModel {
    GaugeString { lambda: f64 },
    WallBounded { lambda: f64, v: f64 },
}

impl DefectModel {
    pub fn from_kind(kind: DefectKind, lambda: f64, v: Option<f64>) -> Result<Self, AppError> {
        if !(lambda.is_finite() && lambda > 0.0) {
            return Err(AppError::config(format!(
                "Symmetry-breaking scale must be positive, got {lambda:e}."
            )));
        }
        match kind {
            DefectKind::Gauge => Ok(Self::GaugeString { lambda }),
            DefectKind::WallBounded => {
                let v = v.ok_or_else(|| {
                    AppError::config("The wall-bounded model requires --v <GeV>.")
                })?;
                if !(v.is_finite() && v > 0.0 && v < lambda) {
                    return Err(AppError::config(format!(
                        "Secondary breaking scale must satisfy 0 < v < lambda, got v={v:e}."
                    )));
                }
                Ok(Self::WallBounded { lambda, v })
            }
        }
    }

    pub fn kind(&self) -> DefectKind {
        match self {
            Self::GaugeString { .. } => DefectKind::Gauge,
            Self::WallBounded { .. } => DefectKind::WallBounded,
        }
    }

    pub fn lambda(&self) -> f64 {
        match *self {
            Self::GaugeString { lambda } | Self::WallBounded { lambda, .. } => lambda,
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GaugeString { .. } => "gauged cosmic strings",
            Self::WallBounded { .. } => "walls bounded by strings",
        }
    }

    /// Derived length/time scales for this parameter point.
    pub fn scales(&self, cosmo: &Cosmology) -> DefectScales {
        match *self {
            Self::GaugeString { lambda } => DefectScales {
                g_mu: G_NEWTON * lambda * lambda,
                // A pure string has no wall to curve it: the curvature scale
                // and the wall cut are pushed to infinity.
                rc: f64::INFINITY,
                t_dw: None,
                t_star: f64::INFINITY,
            },
            Self::WallBounded { lambda, v } => {
                let rc = lambda * lambda / (v * v * v);
                let t_dw = M_PLANCK * cosmo.c_c / (v * v);
                DefectScales {
                    g_mu: G_NEWTON * lambda * lambda,
                    rc,
                    t_dw: Some(t_dw),
                    t_star: rc.max(t_dw),
                }
            }
        }
    }

    /// Decay-rate model matching this defect kind.
    pub fn decay_model(&self, cosmo: &Cosmology) -> Result<DecayRateModel, AppError> {
        match self {
            Self::GaugeString { .. } => Ok(DecayRateModel::constant(cosmo.gamma_s)),
            Self::WallBounded { .. } => DecayRateModel::quadratic_fit(cosmo.gamma_s),
        }
    }
}

/// Derived quantities of a defect parameter point (all in GeV units).
#[derive(Debug, Clone, Copy)]
pub struct DefectScales {
    /// String tension Gμ (dimensionless).
    pub g_mu: f64,
    /// Defect curvature scale Rc; infinite for pure strings.
    pub rc: f64,
    /// Wall formation time; `None` for pure strings.
    pub t_dw: Option<f64>,
    /// Critical comparison time t* = max(Rc, tDW); infinite for pure strings.
    pub t_star: f64,
}

/// One computed spectrum sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPoint {
    /// Observation frequency in Hz.
    pub freq_hz: f64,
    /// Ω_GW·h² at that frequency; 0 means "no causally valid loop".
    pub omega_h2: f64,
}

/// Computed GW spectrum, ascending in frequency.
///
/// Zero-valued entries are preserved (they are meaningful and round-trip
/// through the output artifact); consumers that interpolate in log-log space
/// must use [`Spectrum::nonzero_points`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    points: Vec<SpectrumPoint>,
}

impl Spectrum {
    pub fn new(points: Vec<SpectrumPoint>) -> Result<Self, AppError> {
        for p in &points {
            if !(p.freq_hz.is_finite() && p.freq_hz > 0.0) {
                return Err(AppError::domain(format!(
                    "Spectrum frequency must be positive, got {:e}.",
                    p.freq_hz
                )));
            }
            if !(p.omega_h2.is_finite() && p.omega_h2 >= 0.0) {
                return Err(AppError::domain(format!(
                    "Spectrum amplitude must be finite and non-negative, got {:e}.",
                    p.omega_h2
                )));
            }
        }
        for w in points.windows(2) {
            if !(w[1].freq_hz > w[0].freq_hz) {
                return Err(AppError::domain(
                    "Spectrum frequencies must be strictly ascending.",
                ));
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[SpectrumPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points with nonzero amplitude (the log-log interpolable support).
    pub fn nonzero_points(&self) -> Vec<SpectrumPoint> {
        self.points
            .iter()
            .copied()
            .filter(|p| p.omega_h2 > 0.0)
            .collect()
    }
}

/// One detector's sensitivity curve, ascending in frequency.
#[derive(Debug, Clone)]
pub struct NoiseCurve {
    pub detector: String,
    pub freqs_hz: Vec<f64>,
    pub omegas: Vec<f64>,
}

impl NoiseCurve {
    pub fn new(detector: String, mut samples: Vec<(f64, f64)>) -> Result<Self, AppError> {
        if samples.len() < 2 {
            return Err(AppError::domain(format!(
                "Noise curve '{detector}' needs at least two samples."
            )));
        }
        samples.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        for &(f, o) in &samples {
            if !(f.is_finite() && f > 0.0 && o.is_finite() && o > 0.0) {
                return Err(AppError::domain(format!(
                    "Noise curve '{detector}' has a non-positive sample ({f:e}, {o:e})."
                )));
            }
        }
        for w in samples.windows(2) {
            if w[1].0 <= w[0].0 {
                return Err(AppError::domain(format!(
                    "Noise curve '{detector}' has duplicate frequency {:e}.",
                    w[1].0
                )));
            }
        }
        let (freqs_hz, omegas) = samples.into_iter().unzip();
        Ok(Self {
            detector,
            freqs_hz,
            omegas,
        })
    }
}

/// Detector name → integrated SNR.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnrReport {
    pub entries: BTreeMap<String, f64>,
}

/// A spectrum run's configuration as understood by the pipeline.
#[derive(Debug, Clone)]
pub struct SpectrumConfig {
    pub model: DefectModel,
    /// Scanned frequency band in Hz.
    pub f_min_hz: f64,
    pub f_max_hz: f64,
    /// Number of frequency bins (log-spaced).
    pub bins: usize,
    /// Harmonic modes summed per frequency.
    pub kmax: u32,
    /// Log-time grid samples per (frequency, mode) integral.
    pub time_samples: usize,
    /// Root-finder iteration cap.
    pub max_iter: usize,
    pub table_path: PathBuf,
    pub out: Option<PathBuf>,
    pub write_debug: bool,
}

/// An SNR comparison run's configuration.
#[derive(Debug, Clone)]
pub struct SnrConfig {
    pub spectrum_path: PathBuf,
    pub noise_dir: PathBuf,
    /// Detector names to compare against; empty means every curve in the dir.
    pub detectors: Vec<String>,
    pub json_out: Option<PathBuf>,
}
