//! Debug bundle writer for inspecting a spectrum run end to end.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::{DefectScales, Spectrum, SpectrumConfig};
use crate::error::AppError;
use crate::spectrum::SpectrumDiagnostics;

pub fn write_debug_bundle(
    dir: &Path,
    config: &SpectrumConfig,
    scales: &DefectScales,
    spectrum: &Spectrum,
    diag: &SpectrumDiagnostics,
) -> Result<PathBuf, AppError> {
    create_dir_all(dir)
        .map_err(|e| AppError::config(format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!(
        "gwd_debug_lambda{:.0}_{ts}.md",
        config.model.lambda().log10()
    ));

    let mut file = File::create(&path)
        .map_err(|e| AppError::config(format!("Failed to create debug file: {e}")))?;

    writeln!(file, "# gwd debug bundle")
        .map_err(|e| AppError::config(format!("Failed to write debug header: {e}")))?;
    writeln!(file, "- generated: {}", Local::now().to_rfc3339())
        .map_err(|e| AppError::config(format!("Failed to write debug header: {e}")))?;
    writeln!(file, "- model: {}", config.model.display_name())
        .map_err(|e| AppError::config(format!("Failed to write debug header: {e}")))?;
    writeln!(file, "- lambda: {:e} GeV", config.model.lambda())
        .map_err(|e| AppError::config(format!("Failed to write debug header: {e}")))?;
    writeln!(file, "- G mu: {:e}", scales.g_mu)
        .map_err(|e| AppError::config(format!("Failed to write debug header: {e}")))?;
    if let Some(t_dw) = scales.t_dw {
        writeln!(
            file,
            "- Rc: {:e} GeV^-1 | tDW: {t_dw:e} GeV^-1 | t*: {:e} GeV^-1",
            scales.rc, scales.t_star
        )
        .map_err(|e| AppError::config(format!("Failed to write debug header: {e}")))?;
    }
    writeln!(
        file,
        "- band: [{:e}, {:e}] Hz, bins={}, kmax={}, samples={}, max_iter={}",
        config.f_min_hz,
        config.f_max_hz,
        config.bins,
        config.kmax,
        config.time_samples,
        config.max_iter
    )
    .map_err(|e| AppError::config(format!("Failed to write debug header: {e}")))?;
    writeln!(file, "- table: {}", config.table_path.display())
        .map_err(|e| AppError::config(format!("Failed to write debug header: {e}")))?;

    writeln!(file, "\n## Solver diagnostics")
        .map_err(|e| AppError::config(format!("Failed to write debug: {e}")))?;
    writeln!(file, "- contributing cells: {}", diag.contributing)
        .map_err(|e| AppError::config(format!("Failed to write debug: {e}")))?;
    writeln!(file, "- causal skips: {}", diag.causal_skips)
        .map_err(|e| AppError::config(format!("Failed to write debug: {e}")))?;
    writeln!(file, "- non-converged root-finds: {}", diag.non_converged)
        .map_err(|e| AppError::config(format!("Failed to write debug: {e}")))?;

    writeln!(file, "\n## Spectrum")
        .map_err(|e| AppError::config(format!("Failed to write debug: {e}")))?;
    writeln!(file, "| freq_hz | omega_h2 |")
        .map_err(|e| AppError::config(format!("Failed to write debug: {e}")))?;
    writeln!(file, "| - | - |")
        .map_err(|e| AppError::config(format!("Failed to write debug: {e}")))?;
    for p in spectrum.points() {
        writeln!(file, "| {:e} | {:e} |", p.freq_hz, p.omega_h2)
            .map_err(|e| AppError::config(format!("Failed to write debug: {e}")))?;
    }

    Ok(path)
}
