/// One allele index of a diploid genotype call. `None` means the allele was
/// not called (`.` in the GT field).
pub type AlleleIndex = Option<u8>;

/// Genotype call for one sample at one site: the first two allele indices
/// from the GT field, in file order. Any trailing ploidy is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenotypeCall {
    pub first: AlleleIndex,
    pub second: AlleleIndex,
}

impl GenotypeCall {
    pub const MISSING: Self = Self {
        first: None,
        second: None,
    };

    pub fn new(first: AlleleIndex, second: AlleleIndex) -> Self {
        Self { first, second }
    }

    /// Classify the unordered pair of allele indices into a fingerprint
    /// symbol. Partial calls, missing calls and multi-allelic combinations
    /// all fall through to `'N'`.
    pub fn symbol(self) -> u8 {
        match (self.first, self.second) {
            (Some(0), Some(0)) => b'0',
            (Some(0), Some(1)) | (Some(1), Some(0)) => b'1',
            (Some(1), Some(1)) => b'2',
            _ => b'N',
        }
    }
}

/// One VCF record, reduced to what fingerprinting needs: the alleles at the
/// site and the first sample's genotype call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub ref_allele: String,
    pub alt_alleles: Vec<String>,
    pub call: GenotypeCall,
}
