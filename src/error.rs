use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("could not read {path}")]
    ReadWithPath {
        #[source]
        source: std::io::Error,
        path: std::path::PathBuf,
    },

    #[error("could not read input file")]
    ReadWithoutPath {
        #[source]
        source: std::io::Error,
    },

    #[error("could not write to {path}")]
    Write {
        #[source]
        source: std::io::Error,
        path: std::path::PathBuf,
    },

    #[error("could not write to CSV")]
    CsvWrite(#[from] csv::Error),

    #[error("could not render barcode image")]
    Render {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("could not create output directory")]
    OutputDir {
        #[source]
        source: std::io::Error,
    },

    #[error("data line {line_num} appears before the #CHROM column header")]
    VcfDataBeforeHeader { line_num: usize },

    #[error("no #CHROM column header found")]
    VcfMissingHeader,

    #[error("expected at least {expected} fields (got {n_fields}) in #CHROM header")]
    VcfHeaderFields { n_fields: usize, expected: usize },

    #[error("no sample columns in VCF header (need at least 1)")]
    VcfNoSamples,

    #[error("expected at least {expected} fields (got {n_fields}) in line {line_num}")]
    VcfRecordFields {
        line_num: usize,
        n_fields: usize,
        expected: usize,
    },

    #[error("invalid fingerprint character {ch:?} (expected hex digit or '.')")]
    FingerprintChar { ch: char },

    #[error("could not serialize comparison result")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CustomError>;
