//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` overrides and parses CLI arguments
//! - builds the cosmological context from the evolution table
//! - runs the spectrum / SNR / scan pipelines
//! - prints reports and writes optional artifacts

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::{Command, EvalArgs, ScanArgs, SnrArgs, SpectrumArgs};
use crate::domain::{DefectModel, SnrConfig, SpectrumConfig};
use crate::error::AppError;

pub mod pipeline;

/// Bundled scale-factor evolution for standard cosmology.
const DEFAULT_TABLE: &str = "a_evolution_in_Standard_cosmology.dat";
/// Environment override for the evolution table path.
const TABLE_ENV: &str = "GWD_TABLE";

/// Entry point for the `gwd` binary.
pub fn run() -> Result<(), AppError> {
    // Optional .env next to the binary; absence is not an error.
    dotenvy::dotenv().ok();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Spectrum(args) => handle_spectrum(args),
        Command::Snr(args) => handle_snr(args),
        Command::Scan(args) => handle_scan(args),
    }
}

fn handle_spectrum(args: SpectrumArgs) -> Result<(), AppError> {
    let model = DefectModel::from_kind(args.eval.model, args.lambda, args.v)?;
    let config = spectrum_config(model, &args.eval, args.out.clone(), args.debug);
    let run = pipeline::run_spectrum(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&config, &run.scales, &run.spectrum, &run.diagnostics)
    );

    if let Some(path) = &config.out {
        crate::io::spectrum::write_spectrum(path, &run.spectrum)?;
        println!("Wrote spectrum: {}", path.display());
    }
    if config.write_debug {
        let path = crate::debug::write_debug_bundle(
            Path::new("debug"),
            &config,
            &run.scales,
            &run.spectrum,
            &run.diagnostics,
        )?;
        println!("Wrote debug bundle: {}", path.display());
    }

    Ok(())
}

fn handle_snr(args: SnrArgs) -> Result<(), AppError> {
    let config = SnrConfig {
        spectrum_path: args.spectrum,
        noise_dir: args.noise_dir,
        detectors: args.detectors,
        json_out: args.json,
    };
    let run = pipeline::run_snr(&config)?;

    println!("{}", crate::report::format_snr_table(&run.report));

    if let Some(path) = &config.json_out {
        crate::io::report::write_report_json(path, &run.report)?;
        println!("Wrote report: {}", path.display());
    }

    Ok(())
}

fn handle_scan(args: ScanArgs) -> Result<(), AppError> {
    if args.lambda_exps.is_empty() {
        return Err(AppError::config("Scan needs at least one exponent."));
    }

    std::fs::create_dir_all(&args.out_dir).map_err(|e| {
        AppError::config(format!(
            "Failed to create scan dir '{}': {e}",
            args.out_dir.display()
        ))
    })?;

    // One table load serves every parameter point.
    let probe = DefectModel::from_kind(args.eval.model, 10f64.powf(args.lambda_exps[0]), args.v)?;
    let base = spectrum_config(probe, &args.eval, None, false);
    let cosmo = pipeline::load_cosmology(&base)?;

    for &exp in &args.lambda_exps {
        let model = DefectModel::from_kind(args.eval.model, 10f64.powf(exp), args.v)?;
        let config = SpectrumConfig {
            model,
            ..base.clone()
        };
        let run = pipeline::evaluate(&cosmo, &model, &config)?;

        let path = args.out_dir.join(scan_file_name(&model, exp));
        crate::io::spectrum::write_spectrum(&path, &run.spectrum)?;
        println!(
            "lambda=1e{exp}: {}/{} bins nonzero, wrote {}",
            run.spectrum.nonzero_points().len(),
            run.spectrum.len(),
            path.display()
        );
        if run.diagnostics.non_converged > 0 {
            println!(
                "  WARNING: {} root-finds did not converge (treated as zero)",
                run.diagnostics.non_converged
            );
        }
    }

    Ok(())
}

fn spectrum_config(
    model: DefectModel,
    eval: &EvalArgs,
    out: Option<PathBuf>,
    write_debug: bool,
) -> SpectrumConfig {
    SpectrumConfig {
        model,
        f_min_hz: eval.f_min,
        f_max_hz: eval.f_max,
        bins: eval.bins,
        kmax: eval.kmax,
        time_samples: eval.samples,
        max_iter: eval.max_iter,
        table_path: resolve_table_path(eval.table.clone()),
        out,
        write_debug,
    }
}

/// Table path resolution: explicit flag, then $GWD_TABLE, then the bundled
/// standard-cosmology file in the working directory.
fn resolve_table_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var(TABLE_ENV).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TABLE))
}

fn scan_file_name(model: &DefectModel, exp: f64) -> String {
    match *model {
        DefectModel::GaugeString { .. } => format!("CSGW_{exp}.txt"),
        DefectModel::WallBounded { v, .. } => format!("DWCSGW_{exp}_{v}.txt"),
    }
}
