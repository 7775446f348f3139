//! Detector noise-curve loading.
//!
//! Each detector ships as one two-column file (frequency in Hz, Ω
//! sensitivity) in a shared directory; the detector name is the file stem.

use std::path::{Path, PathBuf};

use crate::domain::NoiseCurve;
use crate::error::AppError;
use crate::io::columns::load_two_columns;

/// Extensions recognized as noise-curve data.
const CURVE_EXTENSIONS: [&str; 3] = ["csv", "dat", "txt"];

/// Load one detector curve; the detector name is the file stem.
pub fn load_noise_curve(path: &Path) -> Result<NoiseCurve, AppError> {
    let detector = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            AppError::config(format!("Bad noise-curve file name '{}'.", path.display()))
        })?
        .to_string();
    let (freqs, omegas) = load_two_columns(path)?;
    NoiseCurve::new(detector, freqs.into_iter().zip(omegas).collect())
        .map_err(|e| AppError::domain(format!("'{}': {e}", path.display())))
}

/// Load every noise curve in `dir`, sorted by detector name.
///
/// When `detectors` is non-empty, only those names are loaded and a missing
/// name is an error (silently comparing against fewer detectors than asked
/// for would misreport coverage).
pub fn load_noise_curves(dir: &Path, detectors: &[String]) -> Result<Vec<NoiseCurve>, AppError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| {
            AppError::config(format!(
                "Failed to read noise-curve directory '{}': {e}",
                dir.display()
            ))
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| CURVE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        })
        .collect();
    paths.sort();

    let mut curves = Vec::new();
    if detectors.is_empty() {
        for path in &paths {
            curves.push(load_noise_curve(path)?);
        }
    } else {
        for name in detectors {
            let path = paths
                .iter()
                .find(|p| p.file_stem().and_then(|s| s.to_str()) == Some(name.as_str()))
                .ok_or_else(|| {
                    AppError::config(format!(
                        "No noise curve named '{name}' in '{}'.",
                        dir.display()
                    ))
                })?;
            curves.push(load_noise_curve(path)?);
        }
    }

    if curves.is_empty() {
        return Err(AppError::config(format!(
            "No noise curves found in '{}'.",
            dir.display()
        )));
    }
    Ok(curves)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gwd-noise-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_curves_by_file_stem() {
        let dir = temp_dir("stem");
        std::fs::write(dir.join("LISA.csv"), "1e-4,1e-9\n1e-2,1e-11\n").unwrap();
        std::fs::write(dir.join("ET.dat"), "1e0 1e-10\n1e3 1e-12\n").unwrap();
        std::fs::write(dir.join("README.md"), "not data").unwrap();

        let curves = load_noise_curves(&dir, &[]).unwrap();
        std::fs::remove_dir_all(&dir).ok();
        let names: Vec<&str> = curves.iter().map(|c| c.detector.as_str()).collect();
        assert_eq!(names, vec!["ET", "LISA"]);
    }

    #[test]
    fn missing_requested_detector_is_an_error() {
        let dir = temp_dir("missing");
        std::fs::write(dir.join("LISA.csv"), "1e-4,1e-9\n1e-2,1e-11\n").unwrap();
        let err = load_noise_curves(&dir, &["BBO".to_string()]).unwrap_err();
        std::fs::remove_dir_all(&dir).ok();
        assert_eq!(err.exit_code(), 2);
    }
}
