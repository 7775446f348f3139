//! Reporting utilities: formatted terminal output for runs and comparisons.
//!
//! We keep formatting code in one place so:
//! - the physics/solver code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{DefectScales, SnrReport, Spectrum, SpectrumConfig};
use crate::spectrum::SpectrumDiagnostics;

/// Format the full run summary (model, derived scales, band, diagnostics).
pub fn format_run_summary(
    config: &SpectrumConfig,
    scales: &DefectScales,
    spectrum: &Spectrum,
    diag: &SpectrumDiagnostics,
) -> String {
    let mut out = String::new();

    out.push_str("=== gwd - Defect GW Spectrum ===\n");
    out.push_str(&format!("Model: {}\n", config.model.display_name()));
    out.push_str(&format!("Lambda: {:e} GeV\n", config.model.lambda()));
    out.push_str(&format!("G mu: {:e}\n", scales.g_mu));
    if let Some(t_dw) = scales.t_dw {
        out.push_str(&format!("Rc: {:e} GeV^-1 | tDW: {t_dw:e} GeV^-1\n", scales.rc));
        out.push_str(&format!("Wall cut t*: {:e} GeV^-1\n", scales.t_star));
    }
    out.push_str(&format!(
        "Band: [{:e}, {:e}] Hz | bins={} | kmax={}\n",
        config.f_min_hz, config.f_max_hz, config.bins, config.kmax
    ));

    let nonzero = spectrum.nonzero_points();
    out.push_str(&format!(
        "Support: {}/{} bins nonzero\n",
        nonzero.len(),
        spectrum.len()
    ));
    if let Some(peak) = nonzero
        .iter()
        .max_by(|a, b| a.omega_h2.total_cmp(&b.omega_h2))
    {
        out.push_str(&format!(
            "Peak: {:e} at {:e} Hz\n",
            peak.omega_h2, peak.freq_hz
        ));
    }

    out.push_str("\nSolver diagnostics:\n");
    out.push_str(&format!(
        "- contributing cells: {}\n- causal skips: {}\n",
        diag.contributing, diag.causal_skips
    ));
    if diag.non_converged > 0 {
        out.push_str(&format!(
            "- WARNING: {} root-finds did not converge (treated as zero)\n",
            diag.non_converged
        ));
    }
    out.push('\n');

    out
}

/// Format the per-detector SNR table.
pub fn format_snr_table(report: &SnrReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:<16} {:>14}\n", "detector", "SNR"));
    out.push_str(&format!("{:-<16} {:-<14}\n", "", ""));
    for (detector, snr) in &report.entries {
        out.push_str(&format!("{:<16} {:>14.6e}\n", truncate(detector, 16), snr));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DefectModel, SpectrumPoint};
    use std::path::PathBuf;

    fn sample_config() -> SpectrumConfig {
        SpectrumConfig {
            model: DefectModel::WallBounded {
                lambda: 1e13,
                v: 246.0,
            },
            f_min_hz: 1e-9,
            f_max_hz: 1e5,
            bins: 30,
            kmax: 2,
            time_samples: 300,
            max_iter: 1000,
            table_path: PathBuf::from("table.dat"),
            out: None,
            write_debug: false,
        }
    }

    #[test]
    fn summary_names_model_and_flags_anomalies() {
        let config = sample_config();
        let scales = config.model.scales(&crate::background::testsupport::synthetic_cosmology());
        let spectrum = Spectrum::new(vec![
            SpectrumPoint { freq_hz: 1e-3, omega_h2: 0.0 },
            SpectrumPoint { freq_hz: 1.0, omega_h2: 3e-12 },
        ])
        .unwrap();
        let diag = SpectrumDiagnostics {
            causal_skips: 7,
            non_converged: 2,
            contributing: 40,
        };

        let summary = format_run_summary(&config, &scales, &spectrum, &diag);
        assert!(summary.contains("walls bounded by strings"));
        assert!(summary.contains("1/2 bins nonzero"));
        assert!(summary.contains("WARNING: 2 root-finds"));
    }

    #[test]
    fn summary_omits_warning_when_clean() {
        let config = sample_config();
        let scales = config.model.scales(&crate::background::testsupport::synthetic_cosmology());
        let spectrum = Spectrum::new(vec![SpectrumPoint { freq_hz: 1.0, omega_h2: 3e-12 }]).unwrap();
        let diag = SpectrumDiagnostics::default();
        let summary = format_run_summary(&config, &scales, &spectrum, &diag);
        assert!(!summary.contains("WARNING"));
    }

    #[test]
    fn snr_table_lists_every_detector() {
        let mut report = SnrReport::default();
        report.entries.insert("LISA".to_string(), 12.5);
        report.entries.insert("ET".to_string(), 0.0);
        let table = format_snr_table(&report);
        assert!(table.contains("LISA"));
        assert!(table.contains("ET"));
    }
}
