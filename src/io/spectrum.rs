//! Spectrum artifact read/write.
//!
//! The output artifact is a plain two-column text file (frequency in Hz,
//! Ω_GW·h²), one row per scanned frequency. Zero-amplitude rows are
//! preserved: they are meaningful ("no causally valid loop") and downstream
//! consumers filter them before log-log work. Floats are written with `{:e}`,
//! which round-trips exactly through `parse::<f64>()`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::background::ScaleFactorTable;
use crate::domain::{Spectrum, SpectrumPoint};
use crate::error::AppError;
use crate::io::columns::load_two_columns;

/// Write a spectrum as two-column text.
pub fn write_spectrum(path: &Path, spectrum: &Spectrum) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::config(format!(
            "Failed to create spectrum file '{}': {e}",
            path.display()
        ))
    })?;
    for p in spectrum.points() {
        writeln!(file, "{:e} {:e}", p.freq_hz, p.omega_h2).map_err(|e| {
            AppError::config(format!(
                "Failed to write spectrum file '{}': {e}",
                path.display()
            ))
        })?;
    }
    Ok(())
}

/// Read a spectrum written by [`write_spectrum`] (or any two-column file).
pub fn read_spectrum(path: &Path) -> Result<Spectrum, AppError> {
    let (freqs, omegas) = load_two_columns(path)?;
    let points = freqs
        .into_iter()
        .zip(omegas)
        .map(|(freq_hz, omega_h2)| SpectrumPoint { freq_hz, omega_h2 })
        .collect();
    Spectrum::new(points)
        .map_err(|e| AppError::domain(format!("'{}': {e}", path.display())))
}

/// Load the scale-factor evolution table (time in GeV^-1, dimensionless a).
pub fn load_scale_factor_table(path: &Path) -> Result<ScaleFactorTable, AppError> {
    let (times, scale) = load_two_columns(path)?;
    ScaleFactorTable::new(times, scale)
        .map_err(|e| AppError::domain(format!("'{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("gwd-spectrum-{name}-{}", std::process::id()))
    }

    #[test]
    fn round_trip_preserves_pairs_exactly() {
        let original = Spectrum::new(vec![
            SpectrumPoint { freq_hz: 1e-9, omega_h2: 0.0 },
            SpectrumPoint { freq_hz: 3.1622776601683794e-3, omega_h2: 4.829629131445341e-12 },
            SpectrumPoint { freq_hz: 1e5, omega_h2: 7.071067811865476e-18 },
        ])
        .unwrap();

        let path = temp_path("roundtrip");
        write_spectrum(&path, &original).unwrap();
        let reloaded = read_spectrum(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(original, reloaded);
    }

    #[test]
    fn scale_factor_table_loads_from_whitespace_file() {
        let path = temp_path("table");
        std::fs::write(&path, "1.0e0 1.0e-20\n1.0e20 1.0e-10\n1.0e42 1.0e0\n").unwrap();
        let table = load_scale_factor_table(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(table.t_min(), 1.0);
        assert_eq!(table.t_max(), 1e42);
    }

    #[test]
    fn non_monotonic_table_is_rejected() {
        let path = temp_path("badtable");
        std::fs::write(&path, "2.0 0.1\n1.0 0.2\n").unwrap();
        let err = load_scale_factor_table(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert_eq!(err.exit_code(), 3);
    }
}
