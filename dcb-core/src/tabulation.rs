//! Codon counting per gene and across the genome.
//!
//! Phase 1 of an analysis run. Every gene is tabulated independently, so the
//! work is spread over the Rayon pool; the genome-wide table is a parallel
//! reduce of the per-gene tables. Addition of [`CodonCounts`] is associative
//! and commutative, which makes the aggregate independent of gene order.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rayon::prelude::*;

use crate::codon::{Codon, SynonymousFamily};
use crate::constants::{AMBIGUOUS_BASE, CODON_LENGTH, NUM_CODONS};
use crate::sequence::CodingSequence;
use crate::types::DcbError;

/// Count of each of the 64 codons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodonCounts {
    counts: [u64; NUM_CODONS],
}

impl Default for CodonCounts {
    fn default() -> Self {
        Self::new()
    }
}

impl CodonCounts {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: [0; NUM_CODONS],
        }
    }

    #[must_use]
    pub const fn get(&self, codon: Codon) -> u64 {
        self.counts[codon.index()]
    }

    pub fn add_count(&mut self, codon: Codon, count: u64) {
        self.counts[codon.index()] += count;
    }

    pub fn increment(&mut self, codon: Codon) {
        self.add_count(codon, 1);
    }

    /// Total codons counted
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Total codons counted within one synonymous family
    #[must_use]
    pub fn family_total(&self, family: &SynonymousFamily<'_>) -> u64 {
        family.codons().iter().map(|&codon| self.get(codon)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// (codon, count) pairs in codon index order
    pub fn iter(&self) -> impl Iterator<Item = (Codon, u64)> + '_ {
        Codon::all().map(move |codon| (codon, self.get(codon)))
    }
}

impl AddAssign<&CodonCounts> for CodonCounts {
    fn add_assign(&mut self, other: &CodonCounts) {
        for (count, &other_count) in self.counts.iter_mut().zip(other.counts.iter()) {
            *count += other_count;
        }
    }
}

impl Add for CodonCounts {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += &other;
        self
    }
}

impl Sum for CodonCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), Add::add)
    }
}

impl<'a> Sum<&'a CodonCounts> for CodonCounts {
    fn sum<I: Iterator<Item = &'a CodonCounts>>(iter: I) -> Self {
        iter.fold(Self::new(), |mut acc, counts| {
            acc += counts;
            acc
        })
    }
}

/// Codon counts of one gene plus the number of ambiguous triplets left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tabulation {
    pub gene_id: String,
    pub counts: CodonCounts,
    pub skipped_triplets: u64,
}

impl Tabulation {
    /// Codons that made it into the table
    #[must_use]
    pub fn counted_codons(&self) -> u64 {
        self.counts.total()
    }
}

/// Count the codons of one gene, reading non-overlapping triplets from
/// offset 0.
///
/// # Errors
///
/// Returns [`DcbError::UnknownCodon`] if a triplet holds a symbol other than
/// A, C, G, T or N. Validated sequences never do; reaching this is a defect.
pub fn tabulate(sequence: &CodingSequence) -> Result<Tabulation, DcbError> {
    let (counts, skipped_triplets) = tabulate_bases(sequence.bases())?;
    Ok(Tabulation {
        gene_id: sequence.id().to_string(),
        counts,
        skipped_triplets,
    })
}

/// Count codons in raw bases. Triplets with an `N` are skipped and counted;
/// a trailing partial triplet is ignored.
pub fn tabulate_bases(bases: &[u8]) -> Result<(CodonCounts, u64), DcbError> {
    let mut counts = CodonCounts::new();
    let mut skipped = 0u64;

    for triplet in bases.chunks_exact(CODON_LENGTH) {
        if triplet
            .iter()
            .any(|base| base.to_ascii_uppercase() == AMBIGUOUS_BASE)
        {
            skipped += 1;
            continue;
        }
        let codon = Codon::from_triplet(triplet).ok_or_else(|| {
            DcbError::UnknownCodon(String::from_utf8_lossy(triplet).into_owned())
        })?;
        counts.increment(codon);
    }

    Ok((counts, skipped))
}

/// Genome-wide table: element-wise sum of the given tables
pub fn aggregate<'a, I>(tables: I) -> CodonCounts
where
    I: IntoIterator<Item = &'a CodonCounts>,
{
    tables.into_iter().sum()
}

/// Tabulate every gene in parallel. Output order follows input order.
pub fn tabulate_all(sequences: &[CodingSequence]) -> Result<Vec<Tabulation>, DcbError> {
    sequences.par_iter().map(tabulate).collect()
}

/// Parallel reduce of per-gene tables into the genome-wide table
#[must_use]
pub fn aggregate_tabulations(tabulations: &[Tabulation]) -> CodonCounts {
    tabulations
        .par_iter()
        .map(|tabulation| tabulation.counts)
        .reduce(CodonCounts::new, Add::add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codon::{AminoAcid, CodonTable};

    fn codon(triplet: &[u8]) -> Codon {
        Codon::from_triplet(triplet).unwrap()
    }

    fn sequence(id: &str, bases: &str) -> CodingSequence {
        CodingSequence::new(id, bases).unwrap()
    }

    #[test]
    fn test_tabulate_counts_triplets() {
        let tabulation = tabulate(&sequence("g", "ATGGCTGCTGCCTAA")).unwrap();
        assert_eq!(tabulation.gene_id, "g");
        assert_eq!(tabulation.counts.get(codon(b"ATG")), 1);
        assert_eq!(tabulation.counts.get(codon(b"GCT")), 2);
        assert_eq!(tabulation.counts.get(codon(b"GCC")), 1);
        assert_eq!(tabulation.counts.get(codon(b"TAA")), 1);
        assert_eq!(tabulation.counted_codons(), 5);
        assert_eq!(tabulation.skipped_triplets, 0);
    }

    #[test]
    fn test_tabulate_skips_ambiguous_triplets() {
        let tabulation = tabulate(&sequence("g", "ATGNNNGCNgctTAA")).unwrap();
        assert_eq!(tabulation.skipped_triplets, 2);
        assert_eq!(tabulation.counted_codons(), 3);
        assert_eq!(tabulation.counts.get(codon(b"GCT")), 1);
    }

    #[test]
    fn test_tabulate_bases_rejects_unknown_symbols() {
        match tabulate_bases(b"ATGGXT") {
            Err(DcbError::UnknownCodon(triplet)) => assert_eq!(triplet, "GXT"),
            other => panic!("Expected UnknownCodon, got {:?}", other),
        }
    }

    #[test]
    fn test_tabulate_empty_sequence() {
        let tabulation = tabulate(&sequence("empty", "")).unwrap();
        assert!(tabulation.counts.is_empty());
        assert_eq!(tabulation.counted_codons(), 0);
    }

    #[test]
    fn test_family_total() {
        let tabulation = tabulate(&sequence("g", "GCTGCCGCAGCGATG")).unwrap();
        let table = CodonTable::standard();
        assert_eq!(tabulation.counts.family_total(&table.family(AminoAcid::Ala)), 4);
        assert_eq!(tabulation.counts.family_total(&table.family(AminoAcid::Met)), 1);
        assert_eq!(tabulation.counts.family_total(&table.family(AminoAcid::Gly)), 0);
    }

    #[test]
    fn test_aggregate_is_elementwise_sum() {
        let a = tabulate(&sequence("a", "GCTGCTATG")).unwrap().counts;
        let b = tabulate(&sequence("b", "GCCATGTAA")).unwrap().counts;
        let total = aggregate([&a, &b]);

        for c in Codon::all() {
            assert_eq!(total.get(c), a.get(c) + b.get(c));
        }
        assert_eq!(total.total(), 6);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let genes = [
            sequence("a", "ATGGCTGCTGCTTAA"),
            sequence("b", "ATGGCCGCCAAATGA"),
            sequence("c", "ATGCTGCTGCTTCTATAG"),
            sequence("d", "ATGNNNAGAAGGCGTTAA"),
        ];
        let tables: Vec<CodonCounts> = genes
            .iter()
            .map(|gene| tabulate(gene).unwrap().counts)
            .collect();

        let expected = aggregate(&tables);
        let orders: [[usize; 4]; 6] = [
            [3, 2, 1, 0],
            [1, 0, 3, 2],
            [2, 3, 0, 1],
            [0, 2, 1, 3],
            [3, 0, 2, 1],
            [1, 3, 2, 0],
        ];
        for order in orders {
            let permuted = aggregate(order.iter().map(|&i| &tables[i]));
            assert_eq!(permuted, expected);
        }

        // Grouping must not matter either
        let left = (tables[0] + tables[1]) + (tables[2] + tables[3]);
        let right = tables[0] + (tables[1] + (tables[2] + tables[3]));
        assert_eq!(left, expected);
        assert_eq!(right, expected);
    }

    #[test]
    fn test_parallel_aggregate_matches_sequential() {
        let genes: Vec<CodingSequence> = (0..64)
            .map(|i| {
                let bases = Codon::from_index(i).unwrap().bases();
                let repeated = bases.repeat(i + 1);
                CodingSequence::new(format!("g{i}"), repeated).unwrap()
            })
            .collect();

        let tabulations = tabulate_all(&genes).unwrap();
        let ids: Vec<&str> = tabulations.iter().map(|t| t.gene_id.as_str()).collect();
        assert_eq!(ids[0], "g0");
        assert_eq!(ids[63], "g63");

        let parallel = aggregate_tabulations(&tabulations);
        let sequential = aggregate(tabulations.iter().map(|t| &t.counts));
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.total(), (1..=64).sum::<u64>());
    }

    #[test]
    fn test_aggregate_of_nothing_is_empty() {
        assert!(aggregate(std::iter::empty()).is_empty());
        assert!(aggregate_tabulations(&[]).is_empty());
    }
}
