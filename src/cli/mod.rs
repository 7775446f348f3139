//! Command-line parsing for the defect GW spectrum tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the physics/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::DefectKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "gwd",
    version,
    about = "Stochastic GW spectra from cosmic-string and wall-bounded defect networks"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute Ω_GW·h² over a frequency band for one parameter point.
    Spectrum(SpectrumArgs),
    /// Integrate a computed spectrum against detector sensitivity curves.
    Snr(SnrArgs),
    /// Compute spectra for a list of symmetry-breaking scales.
    Scan(ScanArgs),
}

/// Options shared by every spectrum evaluation.
#[derive(Debug, Parser, Clone)]
pub struct EvalArgs {
    /// Defect kind sourcing the background.
    #[arg(long, value_enum, default_value = "wall-bounded")]
    pub model: DefectKind,

    /// Lower edge of the scanned band (Hz).
    #[arg(long, default_value_t = 1e-9)]
    pub f_min: f64,

    /// Upper edge of the scanned band (Hz).
    #[arg(long, default_value_t = 1e5)]
    pub f_max: f64,

    /// Number of log-spaced frequency bins.
    #[arg(long, default_value_t = 30)]
    pub bins: usize,

    /// Harmonic modes summed per frequency.
    #[arg(long, default_value_t = 2)]
    pub kmax: u32,

    /// Log-time grid samples per (frequency, mode) integral.
    #[arg(long, default_value_t = 300)]
    pub samples: usize,

    /// Root-finder iteration cap.
    #[arg(long, default_value_t = 1000)]
    pub max_iter: usize,

    /// Scale-factor evolution table (two columns: t in GeV^-1, a).
    /// Defaults to $GWD_TABLE, then to the bundled standard-cosmology file.
    #[arg(long)]
    pub table: Option<PathBuf>,
}

/// Options for a single spectrum run.
#[derive(Debug, Parser, Clone)]
pub struct SpectrumArgs {
    /// Primary symmetry-breaking scale Λ (GeV).
    #[arg(long, default_value_t = 1e13)]
    pub lambda: f64,

    /// Secondary breaking scale v (GeV); required for wall-bounded defects.
    #[arg(long)]
    pub v: Option<f64>,

    #[command(flatten)]
    pub eval: EvalArgs,

    /// Write the spectrum as two-column text.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Write a markdown debug bundle under debug/.
    #[arg(long)]
    pub debug: bool,
}

/// Options for comparing a spectrum against detector curves.
#[derive(Debug, Parser)]
pub struct SnrArgs {
    /// Spectrum file produced by `gwd spectrum --out`.
    #[arg(long)]
    pub spectrum: PathBuf,

    /// Directory of detector sensitivity curves (name taken from file stem).
    #[arg(long)]
    pub noise_dir: PathBuf,

    /// Detector name to compare against (repeatable); default is every
    /// curve in the directory.
    #[arg(long = "detector")]
    pub detectors: Vec<String>,

    /// Write the SNR report as JSON.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Options for a multi-scale scan.
#[derive(Debug, Parser)]
pub struct ScanArgs {
    /// Base-10 exponents of the scales Λ to scan (e.g. 11,12,13).
    #[arg(long, value_delimiter = ',', required = true)]
    pub lambda_exps: Vec<f64>,

    /// Secondary breaking scale v (GeV); required for wall-bounded defects.
    #[arg(long)]
    pub v: Option<f64>,

    #[command(flatten)]
    pub eval: EvalArgs,

    /// Directory receiving one spectrum file per scale.
    #[arg(long, default_value = "scans")]
    pub out_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spectrum_defaults_parse() {
        let cli = Cli::try_parse_from(["gwd", "spectrum"]).unwrap();
        let Command::Spectrum(args) = cli.command else {
            panic!("expected spectrum subcommand");
        };
        assert_eq!(args.lambda, 1e13);
        assert_eq!(args.eval.model, DefectKind::WallBounded);
        assert_eq!(args.eval.bins, 30);
        assert_eq!(args.eval.kmax, 2);
        assert!(args.v.is_none());
        assert!(!args.debug);
    }

    #[test]
    fn scan_splits_exponent_list() {
        let cli = Cli::try_parse_from([
            "gwd",
            "scan",
            "--lambda-exps",
            "11,12.5,13",
            "--v",
            "246",
        ])
        .unwrap();
        let Command::Scan(args) = cli.command else {
            panic!("expected scan subcommand");
        };
        assert_eq!(args.lambda_exps, vec![11.0, 12.5, 13.0]);
        assert_eq!(args.v, Some(246.0));
    }

    #[test]
    fn snr_collects_repeated_detectors() {
        let cli = Cli::try_parse_from([
            "gwd",
            "snr",
            "--spectrum",
            "spec.txt",
            "--noise-dir",
            "curves",
            "--detector",
            "LISA",
            "--detector",
            "ET",
        ])
        .unwrap();
        let Command::Snr(args) = cli.command else {
            panic!("expected snr subcommand");
        };
        assert_eq!(args.detectors, vec!["LISA", "ET"]);
        assert!(args.json.is_none());
    }
}
