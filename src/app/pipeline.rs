//! The pure pipeline behind every subcommand.
//!
//! Command handlers in `app` do argument plumbing and printing; the functions
//! here do the actual work and return plain data, which keeps them testable
//! without a terminal.

use crate::background::Cosmology;
use crate::domain::{DefectModel, DefectScales, SnrConfig, SnrReport, Spectrum, SpectrumConfig};
use crate::error::AppError;
use crate::io::noise::load_noise_curves;
use crate::io::spectrum::{load_scale_factor_table, read_spectrum};
use crate::snr::snr_report;
use crate::spectrum::{EvalParams, SpectrumDiagnostics, compute_spectrum, frequency_grid};

/// Everything a spectrum run produces.
#[derive(Debug, Clone)]
pub struct SpectrumRun {
    pub scales: DefectScales,
    pub spectrum: Spectrum,
    pub diagnostics: SpectrumDiagnostics,
}

/// Load the scale-factor table and build the cosmological context.
pub fn load_cosmology(config: &SpectrumConfig) -> Result<Cosmology, AppError> {
    let table = load_scale_factor_table(&config.table_path)?;
    Cosmology::new(table)
}

/// Evaluate one parameter point against an already-loaded cosmology.
///
/// Scans share the loaded table across parameter points through this entry.
pub fn evaluate(
    cosmo: &Cosmology,
    model: &DefectModel,
    config: &SpectrumConfig,
) -> Result<SpectrumRun, AppError> {
    let freqs = frequency_grid(config.f_min_hz, config.f_max_hz, config.bins)?;
    let params = EvalParams {
        kmax: config.kmax,
        time_samples: config.time_samples,
        max_iter: config.max_iter,
    };
    let (spectrum, diagnostics) = compute_spectrum(cosmo, model, &params, &freqs)?;
    Ok(SpectrumRun {
        scales: model.scales(cosmo),
        spectrum,
        diagnostics,
    })
}

/// Full single-point run: load the table, then evaluate.
pub fn run_spectrum(config: &SpectrumConfig) -> Result<SpectrumRun, AppError> {
    let cosmo = load_cosmology(config)?;
    evaluate(&cosmo, &config.model, config)
}

/// Everything an SNR comparison produces.
#[derive(Debug, Clone)]
pub struct SnrRun {
    pub spectrum: Spectrum,
    pub report: SnrReport,
}

/// Reload a spectrum artifact and integrate it against detector curves.
pub fn run_snr(config: &SnrConfig) -> Result<SnrRun, AppError> {
    let spectrum = read_spectrum(&config.spectrum_path)?;
    let curves = load_noise_curves(&config.noise_dir, &config.detectors)?;
    let report = snr_report(&spectrum, &curves)?;
    Ok(SnrRun { spectrum, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::testsupport::synthetic_cosmology;
    use std::path::PathBuf;

    fn quick_config(model: DefectModel) -> SpectrumConfig {
        SpectrumConfig {
            model,
            f_min_hz: 1e-4,
            f_max_hz: 1e2,
            bins: 4,
            kmax: 1,
            time_samples: 60,
            max_iter: 1000,
            table_path: PathBuf::from("unused"),
            out: None,
            write_debug: false,
        }
    }

    #[test]
    fn evaluate_produces_one_point_per_bin() {
        let cosmo = synthetic_cosmology();
        let model = DefectModel::GaugeString { lambda: 1e13 };
        let run = evaluate(&cosmo, &model, &quick_config(model)).unwrap();
        assert_eq!(run.spectrum.len(), 4);
        assert!(run.scales.t_star.is_infinite());
    }

    #[test]
    fn snr_run_round_trips_through_artifacts() {
        let cosmo = synthetic_cosmology();
        let model = DefectModel::GaugeString { lambda: 1e13 };
        let run = evaluate(&cosmo, &model, &quick_config(model)).unwrap();

        let dir = std::env::temp_dir().join(format!("gwd-pipeline-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let spec_path = dir.join("spectrum.txt");
        crate::io::spectrum::write_spectrum(&spec_path, &run.spectrum).unwrap();

        let noise_dir = dir.join("noise");
        std::fs::create_dir_all(&noise_dir).unwrap();
        std::fs::write(noise_dir.join("FLAT.dat"), "1e-4 1e-10\n1e2 1e-10\n").unwrap();

        let snr = run_snr(&SnrConfig {
            spectrum_path: spec_path,
            noise_dir,
            detectors: vec![],
            json_out: None,
        })
        .unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(snr.spectrum, run.spectrum);
        assert!(snr.report.entries.contains_key("FLAT"));
    }
}
