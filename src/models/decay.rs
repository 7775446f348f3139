//! Loop power decay rate Γ as a function of the loop-size to curvature-scale
//! ratio.
//!
//! Two variants:
//!
//! - `Constant`: a gauge-string loop radiates at a fixed Γ_S regardless of
//!   size.
//! - `Quadratic`: a wall-bounded loop transitions from string-like radiation
//!   at small ratio to wall-tension-dominated collapse at large ratio. The
//!   quadratic q·x² + r·x + s is pinned by three physical conditions and its
//!   coefficients are solved exactly once at construction; evaluation is then
//!   a two-multiply polynomial, which matters because `decay_rate` sits inside
//!   the innermost quadrature loop.

use nalgebra::{Matrix3, Vector3};

use crate::error::AppError;

/// Anchor ratio where the quadratic matches Γ_S with zero slope.
const ANCHOR_RATIO: f64 = 1e-3;
/// Large-ratio reference point.
const FAR_RATIO: f64 = 100.0;
/// Asymptotic coefficient: Γ → 3.7·ratio² for wall-dominated loops.
const FAR_COEFF: f64 = 3.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecayRateModel {
    /// Pure cosmic string: Γ(x) = Γ_S.
    Constant { gamma_s: f64 },
    /// Hybrid wall-bounded string: Γ(x) = q·x² + r·x + s.
    Quadratic { q: f64, r: f64, s: f64 },
}

impl DecayRateModel {
    pub fn constant(gamma_s: f64) -> Self {
        Self::Constant { gamma_s }
    }

    /// Fit the hybrid quadratic to its three boundary conditions:
    ///
    /// - Γ(1e-3) = Γ_S               (string-like anchor value)
    /// - Γ'(1e-3) = 0                (stationary at the anchor)
    /// - Γ(100)  = 3.7·100²          (wall-dominated asymptote)
    ///
    /// The system is linear in (q, r, s); it is solved in closed form via LU
    /// on the 3x3 design matrix. A singular system cannot happen with the
    /// fixed physical anchors but is still a fatal configuration error.
    pub fn quadratic_fit(gamma_s: f64) -> Result<Self, AppError> {
        Self::quadratic_fit_at(gamma_s, ANCHOR_RATIO, FAR_RATIO)
    }

    fn quadratic_fit_at(gamma_s: f64, anchor: f64, far: f64) -> Result<Self, AppError> {
        let design = Matrix3::new(
            anchor * anchor, anchor, 1.0, // value at the anchor
            2.0 * anchor,    1.0,    0.0, // derivative at the anchor
            far * far,       far,    1.0, // value at the far point
        );
        let rhs = Vector3::new(gamma_s, 0.0, FAR_COEFF * far * far);

        let coeffs = design.lu().solve(&rhs).ok_or_else(|| {
            AppError::numerical(format!(
                "Degenerate decay-rate fit system (anchor={anchor}, far={far})."
            ))
        })?;
        if coeffs.iter().any(|v| !v.is_finite()) {
            return Err(AppError::numerical(
                "Decay-rate fit produced non-finite coefficients.",
            ));
        }

        Ok(Self::Quadratic {
            q: coeffs[0],
            r: coeffs[1],
            s: coeffs[2],
        })
    }

    /// Γ at the given loop-size to curvature-scale ratio.
    pub fn decay_rate(&self, ratio: f64) -> f64 {
        match *self {
            Self::Constant { gamma_s } => gamma_s,
            Self::Quadratic { q, r, s } => (q * ratio + r) * ratio + s,
        }
    }
}
