use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{CustomError, Result};
use crate::model::{GenotypeCall, Variant};

// CHROM POS ID REF ALT QUAL FILTER INFO
const FIXED_FIELDS: usize = 8;
// Fixed fields plus FORMAT plus at least one sample column
const MIN_RECORD_FIELDS: usize = 10;

/// Streaming line-oriented VCF reader. One pass, file order, first sample
/// only. Records are reduced to `Variant` on the fly; nothing is buffered
/// beyond the current line.
#[derive(Debug)]
pub struct VcfReader<R: BufRead> {
    reader: R,
    samples: Vec<String>,
    line_num: usize,
    done: bool,
}

impl VcfReader<Box<dyn BufRead>> {
    /// Open a `.vcf` or `.vcf.gz` file. bgzip-compressed VCFs are
    /// concatenated gzip members, so decompression goes through
    /// `MultiGzDecoder`.
    pub fn open(path: &impl AsRef<Path>) -> Result<Self> {
        let f = File::open(path).map_err(|e| CustomError::ReadWithPath {
            source: e,
            path: path.as_ref().to_path_buf(),
        })?;
        let reader: Box<dyn BufRead> = if super::is_gzipped(path.as_ref()) {
            Box::new(BufReader::new(MultiGzDecoder::new(BufReader::new(f))))
        } else {
            Box::new(BufReader::new(f))
        };
        Self::new(reader)
    }
}

impl<R: BufRead> VcfReader<R> {
    /// Consume the meta and column headers, leaving the reader positioned
    /// at the first data line.
    pub fn new(mut reader: R) -> Result<Self> {
        let mut line = String::new();
        let mut line_num = 0;
        loop {
            line.clear();
            let n = reader
                .read_line(&mut line)
                .map_err(|e| CustomError::ReadWithoutPath { source: e })?;
            if n == 0 {
                return Err(CustomError::VcfMissingHeader);
            }
            line_num += 1;
            let trimmed = line.trim_end();
            if trimmed.is_empty() || trimmed.starts_with("##") {
                continue;
            }
            if let Some(header) = trimmed.strip_prefix('#') {
                let fields: Vec<&str> = header.split('\t').collect();
                if fields.len() < FIXED_FIELDS {
                    return Err(CustomError::VcfHeaderFields {
                        n_fields: fields.len(),
                        expected: FIXED_FIELDS,
                    });
                }
                // Sample columns follow CHROM..INFO and FORMAT
                let samples: Vec<String> = fields
                    .iter()
                    .skip(FIXED_FIELDS + 1)
                    .map(|s| s.to_string())
                    .collect();
                if samples.is_empty() {
                    return Err(CustomError::VcfNoSamples);
                }
                return Ok(Self {
                    reader,
                    samples,
                    line_num,
                    done: false,
                });
            }
            return Err(CustomError::VcfDataBeforeHeader { line_num });
        }
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    fn parse_record(&self, line: &str) -> Result<Variant> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < MIN_RECORD_FIELDS {
            return Err(CustomError::VcfRecordFields {
                line_num: self.line_num,
                n_fields: fields.len(),
                expected: MIN_RECORD_FIELDS,
            });
        }

        let ref_allele = fields[3].to_string();
        let alt_alleles: Vec<String> = match fields[4] {
            "." | "" => Vec::new(),
            alts => alts.split(',').map(|s| s.to_string()).collect(),
        };

        let call = match fields[8].split(':').position(|key| key == "GT") {
            Some(gt_idx) => fields[9]
                .split(':')
                .nth(gt_idx)
                .map_or(GenotypeCall::MISSING, parse_call),
            None => GenotypeCall::MISSING,
        };

        Ok(Variant {
            ref_allele,
            alt_alleles,
            call,
        })
    }
}

impl<R: BufRead> Iterator for VcfReader<R> {
    type Item = Result<Variant>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    // Poison iterator to prevent further reads
                    self.done = true;
                    return Some(Err(CustomError::ReadWithoutPath { source: e }));
                }
            }
            self.line_num += 1;
            let trimmed = line.trim_end();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let record = self.parse_record(trimmed);
            if record.is_err() {
                self.done = true;
            }
            return Some(record);
        }
    }
}

/// Parse a GT field value into the first two allele indices. Phased and
/// unphased separators are equivalent here; extra ploidy is ignored.
fn parse_call(gt: &str) -> GenotypeCall {
    let mut alleles = gt.split(['/', '|']).map(|token| token.parse::<u8>().ok());
    let first = alleles.next().flatten();
    let second = alleles.next().flatten();
    GenotypeCall::new(first, second)
}
