//! Cosmological background: scale factor and shared physical constants.
//!
//! The scale factor `a(t)` comes from an externally tabulated evolution (time
//! in GeV^-1 against dimensionless `a`), linearly interpolated. Every other
//! quantity the defect models need (unit conversions, critical density,
//! network constants) lives on an immutable [`Cosmology`] context constructed
//! once and shared by reference, so several parameter scans can run
//! concurrently without cross-contamination.

use crate::error::AppError;
use crate::math::LinearInterp;

/// 1/cm expressed in GeV.
pub const CM_INV_TO_GEV: f64 = 1.98e-14;
/// 1/s (Hz) expressed in GeV.
pub const HZ_TO_GEV: f64 = 6.58e-25;
/// Newton's constant in GeV^-2.
pub const G_NEWTON: f64 = 6.70883e-39;
/// Dimensionless Hubble parameter.
pub const HUBBLE_H: f64 = 0.679;
/// Reduced Planck mass in GeV.
pub const M_PLANCK: f64 = 2.4e18;
/// Riemann zeta at 4/3, normalizing the mode power distribution k^(-4/3).
pub const ZETA_4_3: f64 = 3.600_937_750_458_862_4;

/// Tabulated scale factor `a(t)` with strictly increasing times.
///
/// Queries outside the sampled range are domain errors: the table is an
/// external input and extrapolating it would silently fabricate cosmology.
#[derive(Debug, Clone)]
pub struct ScaleFactorTable {
    interp: LinearInterp,
}

impl ScaleFactorTable {
    pub fn new(times: Vec<f64>, scale: Vec<f64>) -> Result<Self, AppError> {
        if times.iter().any(|&t| t <= 0.0) {
            return Err(AppError::domain(
                "Scale-factor table times must be positive.",
            ));
        }
        if scale.iter().any(|&a| a <= 0.0) {
            return Err(AppError::domain(
                "Scale-factor table values must be positive.",
            ));
        }
        let interp = LinearInterp::new(times, scale)
            .map_err(|e| AppError::domain(format!("Invalid scale-factor table: {e}")))?;
        Ok(Self { interp })
    }

    pub fn t_min(&self) -> f64 {
        self.interp.x_min()
    }

    pub fn t_max(&self) -> f64 {
        self.interp.x_max()
    }

    /// Scale factor at time `t` (GeV^-1).
    pub fn value(&self, t: f64) -> Result<f64, AppError> {
        self.interp.eval(t).map_err(|_| {
            AppError::domain(format!(
                "Scale-factor query t={t:e} outside table range [{:e}, {:e}].",
                self.t_min(),
                self.t_max()
            ))
        })
    }
}

/// Immutable cosmological context shared by every spectral evaluation.
#[derive(Debug, Clone)]
pub struct Cosmology {
    table: ScaleFactorTable,

    /// Critical energy density in GeV^4.
    pub rho_crit: f64,
    /// Present time in GeV^-1.
    pub t0: f64,
    /// Defect network formation time in GeV^-1.
    pub t_f: f64,
    /// Matter-radiation equality time in GeV^-1.
    pub t_eq: f64,

    /// Effective loop number density during radiation domination.
    pub c_eff_radiation: f64,
    /// Effective loop number density during matter domination.
    pub c_eff_matter: f64,

    /// Fraction of network energy going into loops.
    pub f_loop: f64,
    /// Loop size at formation as a fraction of horizon time.
    pub alpha: f64,
    /// Gravitational decay constant of a gauge-string loop.
    pub gamma_s: f64,
    /// Loop circumference-to-size factor.
    pub xi: f64,

    /// Radiation-era time constant 1/sqrt(8 pi^3 g*/90) with g* = 106.75.
    pub c_c: f64,
}

impl Cosmology {
    /// Build the standard context around a loaded scale-factor table.
    pub fn new(table: ScaleFactorTable) -> Result<Self, AppError> {
        let z_eq: f64 = 3360.0;
        let t0 = 13.8e9 * 365.25 * 24.0 * 60.0 * 60.0 / HZ_TO_GEV;
        let cosmo = Self {
            table,
            rho_crit: 1.053672e-5 * HUBBLE_H * HUBBLE_H * CM_INV_TO_GEV.powi(3),
            t0,
            t_f: 1e-22 / HZ_TO_GEV,
            t_eq: t0 / (1.0 + z_eq).powf(1.5),
            c_eff_radiation: 5.7,
            c_eff_matter: 0.5,
            f_loop: 0.1,
            alpha: 0.1,
            gamma_s: 50.0,
            xi: 2.0,
            c_c: 1.0 / (8.0 * std::f64::consts::PI.powi(3) * 106.75 / 90.0).sqrt(),
        };

        // The pipeline queries a(t) across [tF, t0]; fail at construction
        // rather than mid-scan if the table cannot cover that span.
        if cosmo.table.t_min() > cosmo.t_f || cosmo.table.t_max() < cosmo.t0 {
            return Err(AppError::domain(format!(
                "Scale-factor table range [{:e}, {:e}] does not cover [tF={:e}, t0={:e}].",
                cosmo.table.t_min(),
                cosmo.table.t_max(),
                cosmo.t_f,
                cosmo.t0
            )));
        }
        Ok(cosmo)
    }

    /// Scale factor at time `t`.
    pub fn scale_factor(&self, t: f64) -> Result<f64, AppError> {
        self.table.value(t)
    }

    /// Effective loop number: a step across matter-radiation equality.
    pub fn c_eff(&self, t: f64) -> f64 {
        if t < self.t_eq {
            self.c_eff_radiation
        } else {
            self.c_eff_matter
        }
    }
}
