// =============================================================================
// Codons
// =============================================================================

/// Length of a codon in base pairs
pub const CODON_LENGTH: usize = 3;

/// Number of distinct codons over {A,C,G,T}
pub const NUM_CODONS: usize = 64;

/// Number of amino acids in the standard code, counting stop as one
pub const NUM_AMINO_ACIDS: usize = 21;

/// Largest synonymous family in the standard code (Leu, Ser, Arg)
pub const MAX_FAMILY_SIZE: usize = 6;

/// Nucleotides in the order used to index codons (TCAG, as in the NCBI tables)
pub const NUCLEOTIDES: [u8; 4] = *b"TCAG";

/// Symbol for an ambiguous base. Tolerated in input, never counted.
pub const AMBIGUOUS_BASE: u8 = b'N';

/// Amino acid one-letter codes for codon indices 0..64 in TCAG order.
///
/// This is NCBI translation table 1, which table 11 shares for codon to
/// residue assignment.
pub const STANDARD_CODE: &[u8; NUM_CODONS] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

// =============================================================================
// Scoring
// =============================================================================

/// Genes with fewer counted codons than this are flagged low confidence
pub const DEFAULT_MIN_CODON_COUNT: usize = 100;

/// Absolute tolerance used when comparing floating point usage values in tests
pub const FLOAT_TOLERANCE: f64 = 1e-9;
