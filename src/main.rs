mod barcode;
mod cli;
mod compare;
mod error;
mod fingerprint;
mod model;
mod reader;

use crate::error::Result;
use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;
use std::path::PathBuf;

/// Generate and compare genetic barcode fingerprints from VCF files.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the fingerprint of a single VCF file, optionally rendering
    /// it as a barcode image.
    Barcode {
        /// Path to the VCF file (.vcf or .vcf.gz).
        file: PathBuf,

        /// Render and save the fingerprint as a barcode PNG.
        #[arg(long)]
        image: bool,

        /// Name of the output barcode image file.
        #[arg(long)]
        output_filename: Option<String>,

        /// Directory to save the output image.
        #[arg(long, value_hint = clap::ValueHint::DirPath)]
        output_path: Option<PathBuf>,

        /// Module columns per barcode row.
        #[arg(long, default_value_t = barcode::DEFAULT_COLUMNS)]
        columns: usize,

        /// Number of checksum codewords appended to the barcode.
        #[arg(long, default_value_t = barcode::DEFAULT_SECURITY_LEVEL)]
        security_level: usize,

        /// Permutation seed. Fingerprints computed with different seeds
        /// are not comparable.
        #[arg(long, default_value_t = fingerprint::DEFAULT_SEED)]
        seed: u64,
    },

    /// Compare two inputs, each either a VCF file or a previously
    /// generated fingerprint string.
    Compare {
        /// First input: a .vcf/.vcf.gz path or a literal fingerprint.
        input1: String,

        /// Second input, same forms as the first.
        input2: String,

        /// Append the comparison record to this CSV file.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Permutation seed used for any input that is a VCF file.
        #[arg(long, default_value_t = fingerprint::DEFAULT_SEED)]
        seed: u64,
    },
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    match args.command {
        Command::Barcode {
            file,
            image,
            output_filename,
            output_path,
            columns,
            security_level,
            seed,
        } => cli::run_barcode(cli::BarcodeOpts {
            file,
            image,
            output_filename,
            output_path,
            columns,
            security_level,
            seed,
        }),
        Command::Compare {
            input1,
            input2,
            output,
            seed,
        } => cli::run_compare(&input1, &input2, seed, output.as_deref()),
    }
}

fn main() -> miette::Result<()> {
    try_main().into_diagnostic()
}
