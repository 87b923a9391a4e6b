//! Validated coding sequences for one genome.
//!
//! The gene predictor hands over an ordered list of (gene identifier,
//! nucleotide string) pairs. [`SequenceStore`] validates each one into a
//! [`CodingSequence`] and sets aside the malformed ones as
//! [`SkippedGene`] diagnostics instead of failing the whole genome.
//!
//! ## Modules
//!
//! - [`io`]: reading the predictor's CDS FASTA output
//!
//! ## Examples
//!
//! ```rust
//! use dcb_core::sequence::SequenceStore;
//!
//! let store = SequenceStore::from_records([
//!     ("gene_1", "ATGGCTGCTTAA"),
//!     ("gene_2", "ATGGC"), // not a whole number of codons
//! ]);
//!
//! assert_eq!(store.len(), 1);
//! assert_eq!(store.skipped_genes()[0].gene_id, "gene_2");
//! ```

pub mod io;

use std::collections::HashSet;

use crate::constants::{AMBIGUOUS_BASE, CODON_LENGTH};
use crate::types::{DcbError, SkippedGene};

/// One gene's nucleotide sequence, upper case, a whole number of codons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodingSequence {
    id: String,
    bases: Vec<u8>,
}

impl CodingSequence {
    /// Validate and normalise a predicted coding sequence.
    ///
    /// # Errors
    ///
    /// Returns [`DcbError::MalformedSequence`] if a character outside
    /// {A,C,G,T,N} (any case) appears, or if the length is not a multiple of
    /// three.
    pub fn new(id: impl Into<String>, bases: impl AsRef<[u8]>) -> Result<Self, DcbError> {
        let id = id.into();
        let bases = bases.as_ref();

        if let Some(position) = bases.iter().position(|&b| !is_allowed_base(b)) {
            return Err(SkippedGene::new(
                id,
                format!(
                    "invalid character {:?} at position {}",
                    bases[position] as char, position
                ),
            )
            .into());
        }

        if bases.len() % CODON_LENGTH != 0 {
            return Err(SkippedGene::new(
                id,
                format!("length {} is not a multiple of 3", bases.len()),
            )
            .into());
        }

        Ok(Self {
            id,
            bases: bases.to_ascii_uppercase(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    /// Number of triplets, ambiguous ones included
    #[must_use]
    pub fn codon_len(&self) -> usize {
        self.bases.len() / CODON_LENGTH
    }

    /// Consecutive non-overlapping triplets from offset 0
    pub fn triplets(&self) -> impl Iterator<Item = &[u8]> {
        self.bases.chunks_exact(CODON_LENGTH)
    }
}

const fn is_allowed_base(base: u8) -> bool {
    matches!(
        base.to_ascii_uppercase(),
        b'A' | b'C' | b'G' | b'T' | AMBIGUOUS_BASE
    )
}

/// Validated coding sequences of one genome, in input order.
///
/// Backed by a `Vec`, so iterating is repeatable and free of side effects.
#[derive(Debug, Clone, Default)]
pub struct SequenceStore {
    sequences: Vec<CodingSequence>,
    skipped: Vec<SkippedGene>,
    seen_ids: HashSet<String>,
}

impl SequenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from (gene identifier, sequence) pairs.
    ///
    /// Malformed records are skipped and listed in
    /// [`skipped_genes`](Self::skipped_genes).
    pub fn from_records<I, S, B>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, B)>,
        S: Into<String>,
        B: AsRef<[u8]>,
    {
        let mut store = Self::new();
        for (id, bases) in records {
            // Rejected records are already recorded as skipped
            let _ = store.push(id, bases);
        }
        store
    }

    /// Validate and append one gene.
    ///
    /// # Errors
    ///
    /// Returns [`DcbError::MalformedSequence`] when the record is rejected. The
    /// gene is also recorded as skipped, so callers may ignore the error.
    pub fn push(&mut self, id: impl Into<String>, bases: impl AsRef<[u8]>) -> Result<(), DcbError> {
        let id = id.into();
        if self.seen_ids.contains(&id) {
            return Err(self.skip(SkippedGene::new(id, "duplicate gene identifier")));
        }

        match CodingSequence::new(id.clone(), bases) {
            Ok(sequence) => {
                self.seen_ids.insert(id);
                self.sequences.push(sequence);
                Ok(())
            }
            Err(DcbError::MalformedSequence { gene_id, reason }) => {
                self.seen_ids.insert(id);
                Err(self.skip(SkippedGene::new(gene_id, reason)))
            }
            Err(other) => Err(other),
        }
    }

    fn skip(&mut self, skipped: SkippedGene) -> DcbError {
        log::warn!("Skipping gene {}", skipped);
        self.skipped.push(skipped.clone());
        skipped.into()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CodingSequence> {
        self.sequences.iter()
    }

    #[must_use]
    pub fn sequences(&self) -> &[CodingSequence] {
        &self.sequences
    }

    #[must_use]
    pub fn skipped_genes(&self) -> &[SkippedGene] {
        &self.skipped
    }

    /// Number of accepted genes
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<CodingSequence>, Vec<SkippedGene>) {
        (self.sequences, self.skipped)
    }
}

impl<'a> IntoIterator for &'a SequenceStore {
    type Item = &'a CodingSequence;
    type IntoIter = std::slice::Iter<'a, CodingSequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
