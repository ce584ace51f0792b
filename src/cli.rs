use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

use crate::barcode;
use crate::compare::{Comparison, compare};
use crate::error::{CustomError, Result};
use crate::fingerprint::{self, Fingerprint};
use crate::reader::{self, vcf::VcfReader};

/// One operand of the compare command, auto-detected by filename suffix:
/// `.vcf`/`.vcf.gz` means a variant file, anything else is validated as a
/// literal fingerprint string.
#[derive(Debug)]
pub enum FingerprintInput {
    File(PathBuf),
    Literal(Fingerprint),
}

impl FingerprintInput {
    pub fn detect(input: &str) -> Result<Self> {
        if reader::is_variant_path(input) {
            Ok(Self::File(PathBuf::from(input)))
        } else {
            Ok(Self::Literal(Fingerprint::parse(input)?))
        }
    }

    fn resolve(&self, seed: u64) -> Result<Fingerprint> {
        match self {
            Self::File(path) => fingerprint::compute(VcfReader::open(path)?, seed),
            Self::Literal(fp) => Ok(fp.clone()),
        }
    }
}

pub struct BarcodeOpts {
    pub file: PathBuf,
    pub image: bool,
    pub output_filename: Option<String>,
    pub output_path: Option<PathBuf>,
    pub columns: usize,
    pub security_level: usize,
    pub seed: u64,
}

pub fn run_barcode(opts: BarcodeOpts) -> Result<()> {
    let reader = VcfReader::open(&opts.file)?;
    eprintln!("VCF   : {}", opts.file.display());
    eprintln!("Sample: {}", reader.samples()[0]);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("[{elapsed_precise}] {pos} variants").unwrap());
    let fp = fingerprint::compute(reader.inspect(|_| pb.inc(1)), opts.seed)?;
    pb.abandon();

    println!("{fp}");

    // Image output is implied when a destination is spelled out
    if opts.image || opts.output_filename.is_some() || opts.output_path.is_some() {
        let dir = opts
            .output_path
            .unwrap_or_else(|| barcode::default_image_dir(&opts.file));
        fs::create_dir_all(&dir).map_err(|e| CustomError::OutputDir { source: e })?;
        let name = opts
            .output_filename
            .unwrap_or_else(|| barcode::default_image_name(&opts.file));
        let image_path = dir.join(name);
        barcode::render_png(&fp, &image_path, opts.columns, opts.security_level)?;
        println!("Barcode image saved to {}", image_path.display());
    }
    Ok(())
}

pub fn run_compare(input1: &str, input2: &str, seed: u64, output: Option<&Path>) -> Result<()> {
    let first = FingerprintInput::detect(input1)?;
    let second = FingerprintInput::detect(input2)?;

    // The two computations share no state; a failure in either is terminal
    let (first, second) = rayon::join(|| first.resolve(seed), || second.resolve(seed));
    let result = compare(&first?, &second?);

    println!("{}", serde_json::to_string(&result)?);

    if let Some(path) = output {
        write_comparison_csv(path, input1, input2, &result)?;
    }
    Ok(())
}

/// Append one comparison record, writing the header only when the file is
/// new. Batch runs over many pairs accumulate into one table.
fn write_comparison_csv(
    path: &Path,
    input1: &str,
    input2: &str,
    result: &Comparison,
) -> Result<()> {
    let exists = path.exists();
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CustomError::Write {
            source: e,
            path: path.to_path_buf(),
        })?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if !exists {
        wtr.write_record(["input1", "input2", "similarity", "coverage"])?;
    }
    wtr.serialize((input1, input2, result.similarity, result.coverage))?;
    wtr.flush().map_err(|e| CustomError::Write {
        source: e,
        path: path.to_path_buf(),
    })?;
    Ok(())
}
