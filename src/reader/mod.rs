pub mod vcf;

use std::path::Path;

/// True if the path looks like a variant file rather than a literal
/// fingerprint string. Matches the suffixes the CLI auto-detects.
pub fn is_variant_path(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    lower.ends_with(".vcf") || lower.ends_with(".vcf.gz")
}

/// True if the path is gzip-compressed, by filename suffix.
pub(crate) fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
