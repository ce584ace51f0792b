//! The fingerprint pipeline: genotype encoding, seeded permutation,
//! pairwise recoding and chunked hashing. Every stage consumes its
//! predecessor's full output; the whole pipeline is a pure function of
//! (records, seed).

use itertools::Itertools;
use std::fmt;

use crate::error::{CustomError, Result};
use crate::model::Variant;

/// Historical permutation seed. Kept as the default so freshly computed
/// fingerprints stay comparable with previously persisted ones.
pub const DEFAULT_SEED: u64 = 42;

/// Marks a fingerprint position whose underlying data was ambiguous or
/// missing. Excluded from similarity scoring on either side.
pub const PLACEHOLDER: char = '.';

const CHUNK_SIZE: usize = 3;

/// A genetic barcode fingerprint: one character per chunk, lowercase hex
/// digits and `'.'` only. Opaque printable ASCII; equality of two
/// fingerprints is only meaningful through [`crate::compare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Validate a caller-supplied signature string. Uppercase hex digits
    /// are accepted and folded to the lowercase form the pipeline emits,
    /// so the same literal compares equal regardless of casing.
    pub fn parse(s: &str) -> Result<Self> {
        for ch in s.chars() {
            if !ch.is_ascii_hexdigit() && ch != PLACEHOLDER {
                return Err(CustomError::FingerprintChar { ch });
            }
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Run the full pipeline over a stream of variant records.
pub fn compute(
    records: impl IntoIterator<Item = Result<Variant>>,
    seed: u64,
) -> Result<Fingerprint> {
    let symbols = encode_symbols(records)?;
    Ok(hash_chunks(&recode_pairs(&permute(&symbols, seed))))
}

/// Encode one symbol per record over the alphabet {0,1,2,N}, first sample
/// only. A read error terminates the computation; no partial output.
pub fn encode_symbols(records: impl IntoIterator<Item = Result<Variant>>) -> Result<Vec<u8>> {
    records
        .into_iter()
        .map(|record| record.map(|v| v.call.symbol()))
        .collect()
}

/// Seeded permutation of the symbol sequence: each position is ranked by
/// the MD5 digest of (seed, index) and the symbols are emitted in rank
/// order. Decorrelates physical genomic adjacency before pairwise
/// recoding; purely a diffusion step, not a security measure. MD5 gives a
/// fixed ordering for a given seed, so persisted fingerprints stay
/// comparable across tool versions.
pub fn permute(symbols: &[u8], seed: u64) -> Vec<u8> {
    let mut order: Vec<(u128, usize)> = (0..symbols.len())
        .map(|idx| (position_rank(seed, idx), idx))
        .collect();
    order.sort_unstable();
    order.into_iter().map(|(_, idx)| symbols[idx]).collect()
}

fn position_rank(seed: u64, idx: usize) -> u128 {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&seed.to_le_bytes());
    key[8..].copy_from_slice(&(idx as u64).to_le_bytes());
    u128::from_be_bytes(md5::compute(key).0)
}

/// Collapse consecutive symbol pairs into one symbol over {0,1,2,3}. A
/// trailing odd element is dropped. The table is order-sensitive on
/// purpose: `01` and `10` land in different classes.
pub fn recode_pairs(symbols: &[u8]) -> Vec<u8> {
    symbols
        .iter()
        .copied()
        .tuples()
        .map(|(a, b)| recode_pair(a, b))
        .collect()
}

fn recode_pair(a: u8, b: u8) -> u8 {
    match (a, b) {
        (b'0', b'0') | (b'1', b'1') | (b'2', b'2') => b'1',
        (b'0', b'1') | (b'1', b'2') | (b'2', b'0') => b'2',
        (b'0', b'2') | (b'1', b'0') | (b'2', b'1') => b'3',
        _ => b'0',
    }
}

/// Reduce each 3-symbol chunk to one character: the first hex digit of its
/// MD5 digest, or the placeholder when the chunk was touched by ambiguous
/// data. The final chunk may be 1-2 symbols wide.
pub fn hash_chunks(recoded: &[u8]) -> Fingerprint {
    let mut out = String::with_capacity(recoded.len().div_ceil(CHUNK_SIZE));
    for chunk in recoded.chunks(CHUNK_SIZE) {
        if chunk.contains(&b'0') {
            out.push(PLACEHOLDER);
        } else {
            let digest = format!("{:x}", md5::compute(chunk));
            out.push(digest.as_bytes()[0] as char);
        }
    }
    Fingerprint(out)
}
