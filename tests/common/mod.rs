use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

pub struct Dataset {
    pub dir: PathBuf,
}

pub fn create_dataset(label: &str) -> io::Result<Dataset> {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join("gtbarcode-tests").join(format!(
        "{}-{}-{}",
        std::process::id(),
        id,
        label
    ));
    fs::create_dir_all(&dir)?;
    Ok(Dataset { dir })
}

const HEADER: &str = "##fileformat=VCFv4.2\n\
    #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tSample1\n";

pub fn vcf_text(genotypes: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for (idx, gt) in genotypes.iter().enumerate() {
        text.push_str(&format!(
            "1\t{}\t.\tA\tG\t.\tPASS\t.\tGT\t{}\n",
            (idx + 1) * 100,
            gt
        ));
    }
    text
}

pub fn write_vcf(dataset: &Dataset, name: &str, genotypes: &[&str]) -> io::Result<PathBuf> {
    let path = dataset.dir.join(name);
    fs::write(&path, vcf_text(genotypes))?;
    Ok(path)
}

pub fn write_vcf_gz(dataset: &Dataset, name: &str, genotypes: &[&str]) -> io::Result<PathBuf> {
    let path = dataset.dir.join(name);
    let file = File::create(&path)?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(vcf_text(genotypes).as_bytes())?;
    encoder.finish()?;
    Ok(path)
}

/// Nine hom-ref calls: recodes to "1111", chunks to "111" + "1", so the
/// fingerprint is independent of the shuffle.
pub fn uniform_hom_ref() -> Vec<&'static str> {
    vec!["0/0"; 9]
}

pub const UNIFORM_HOM_REF_FINGERPRINT: &str = "6c";

/// Nine missing calls: every chunk is masked.
pub fn uniform_missing() -> Vec<&'static str> {
    vec!["./."; 9]
}

pub const UNIFORM_MISSING_FINGERPRINT: &str = "..";

/// A spread of call shapes: biallelic, phased, multi-allelic, haploid and
/// missing.
pub fn mixed_genotypes() -> Vec<&'static str> {
    vec![
        "0/0", "0/1", "1/1", "./.", "0|1", "1|0", "1/2", "0/2", "2/2", "1", "0/0", "0/1", "0/0",
        "1/1", "0|0", "./.", "1/0", "0/1", "0/0", "1/1",
    ]
}

/// Fingerprint of [`mixed_genotypes`] under the default seed. Sensitive
/// to every stage of the pipeline, the permutation included.
pub const MIXED_FINGERPRINT: &str = "...c";
