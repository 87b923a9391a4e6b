//! Codons, amino acids and the standard genetic code.
//!
//! A [`Codon`] is stored as its index 0..64 in TCAG order, so per-codon data
//! lives in plain fixed-size arrays. The genetic code itself is the
//! [`CodonTable`] built at compile time; see [`table`].

pub mod table;

use std::fmt;

use serde::{Serialize, Serializer};

use crate::constants::{CODON_LENGTH, NUCLEOTIDES, NUM_CODONS};

pub use table::{AminoAcid, CodonTable, SynonymousFamily};

/// A nucleotide triplet over {A,C,G,T}.
///
/// # Examples
///
/// ```rust
/// use dcb_core::codon::Codon;
///
/// let codon = Codon::from_triplet(b"gct").unwrap();
/// assert_eq!(codon.to_string(), "GCT");
/// assert!(Codon::from_triplet(b"GNT").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codon(u8);

impl Codon {
    /// Codon for an index in 0..64, TCAG order
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < NUM_CODONS {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Parse a triplet, case-insensitive. `None` for anything that is not
    /// exactly three unambiguous bases.
    #[must_use]
    pub fn from_triplet(triplet: &[u8]) -> Option<Self> {
        if triplet.len() != CODON_LENGTH {
            return None;
        }
        let mut index = 0usize;
        for &base in triplet {
            index = index * 4 + nucleotide_index(base)?;
        }
        Some(Self(index as u8))
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The three bases, upper case
    #[must_use]
    pub const fn bases(self) -> [u8; CODON_LENGTH] {
        let i = self.0 as usize;
        [
            NUCLEOTIDES[i >> 4],
            NUCLEOTIDES[(i >> 2) & 3],
            NUCLEOTIDES[i & 3],
        ]
    }

    /// All 64 codons in index order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_CODONS as u8).map(Self)
    }
}

fn nucleotide_index(base: u8) -> Option<usize> {
    match base.to_ascii_uppercase() {
        b'T' => Some(0),
        b'C' => Some(1),
        b'A' => Some(2),
        b'G' => Some(3),
        _ => None,
    }
}

impl fmt::Display for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.bases();
        write!(f, "{}{}{}", a as char, b as char, c as char)
    }
}

impl Serialize for Codon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
