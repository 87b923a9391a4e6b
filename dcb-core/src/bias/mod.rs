//! Per-gene codon bias scoring.
//!
//! Phase 2 of an analysis run. For every synonymous family present in a gene,
//! the gene's relative usage of each codon is compared with the genome
//! reference. The family deviation is
//!
//! ```text
//! d_F = Σ |RU_gene(c) - RU_ref(c)|      (absolute)
//! d_F = Σ (RU_gene(c) - RU_ref(c))²     (squared)
//! ```
//!
//! and the gene score is the weighted mean of `d_F` over the families the gene
//! uses, weighted by the family's codon count in the gene (or uniformly).
//! Met and Trp offer no synonymous choice; their deviation is always zero and
//! they are left out of the mean.
//!
//! ## Examples
//!
//! ```rust
//! use dcb_core::bias::{BiasCalculator, GenomeReference};
//! use dcb_core::codon::CodonTable;
//! use dcb_core::config::DcbConfig;
//! use dcb_core::sequence::CodingSequence;
//! use dcb_core::tabulation::{aggregate, tabulate};
//!
//! let gene_a = tabulate(&CodingSequence::new("a", "GCTGCTGCT")?)?;
//! let gene_b = tabulate(&CodingSequence::new("b", "GCCGCCGCC")?)?;
//!
//! let table = CodonTable::standard();
//! let reference = GenomeReference::new(aggregate([&gene_a.counts, &gene_b.counts]), table);
//! let calculator = BiasCalculator::new(&reference, &DcbConfig::default());
//!
//! let score = calculator.score(&gene_a);
//! assert!((score.score - 1.0).abs() < 1e-9);
//! # Ok::<(), dcb_core::types::DcbError>(())
//! ```

pub mod usage;

use rayon::prelude::*;
use serde::Serialize;

use crate::codon::{AminoAcid, CodonTable};
use crate::config::{DcbConfig, DeviationMetric, FamilyWeighting};
use crate::tabulation::Tabulation;

pub use usage::{rscu, GenomeReference, RelativeUsage};

/// Deviation of one synonymous family within one gene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyDeviation {
    pub amino_acid: AminoAcid,
    /// Codons of this family counted in the gene
    pub codon_count: u64,
    pub deviation: f64,
}

/// Bias score of one gene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneBias {
    pub gene_id: String,
    /// Weighted mean family deviation, never negative and never NaN
    pub score: f64,
    /// Codons counted in the gene, ambiguous triplets excluded
    pub codon_count: u64,
    /// Ambiguous triplets left out of the counts
    pub skipped_triplets: u64,
    /// Set when `codon_count` is below the configured minimum
    pub low_confidence: bool,
    /// Contribution of each family the gene uses, in family order
    pub family_deviations: Vec<FamilyDeviation>,
}

/// Scores genes against a completed genome reference.
///
/// Borrowing the [`GenomeReference`] is what enforces the two-phase order:
/// the reference only exists once every gene has been tabulated.
#[derive(Debug, Clone, Copy)]
pub struct BiasCalculator<'a> {
    reference: &'a GenomeReference,
    table: &'static CodonTable,
    metric: DeviationMetric,
    weighting: FamilyWeighting,
    min_codon_count: u64,
}

impl<'a> BiasCalculator<'a> {
    #[must_use]
    pub fn new(reference: &'a GenomeReference, config: &DcbConfig) -> Self {
        Self {
            reference,
            table: CodonTable::standard(),
            metric: config.deviation_metric,
            weighting: config.family_weighting,
            min_codon_count: config.min_codon_count as u64,
        }
    }

    #[must_use]
    pub const fn reference(&self) -> &'a GenomeReference {
        self.reference
    }

    /// Score one gene
    #[must_use]
    pub fn score(&self, tabulation: &Tabulation) -> GeneBias {
        let counts = &tabulation.counts;
        let gene_usage = RelativeUsage::from_counts(counts, self.table);
        let reference_usage = self.reference.relative_usage();

        let mut family_deviations = Vec::new();
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for family in self.table.families() {
            let family_count = counts.family_total(&family);
            if family_count == 0 || !family.has_synonyms() {
                continue;
            }

            let deviation: f64 = family
                .codons()
                .iter()
                .map(|&codon| {
                    self.metric
                        .codon_deviation(gene_usage.get(codon), reference_usage.get(codon))
                })
                .sum();

            let weight = self.weighting.weight(family_count);
            weighted_sum += weight * deviation;
            weight_total += weight;

            family_deviations.push(FamilyDeviation {
                amino_acid: family.amino_acid,
                codon_count: family_count,
                deviation,
            });
        }

        let score = if weight_total > 0.0 {
            weighted_sum / weight_total
        } else {
            0.0
        };

        let codon_count = tabulation.counted_codons();
        GeneBias {
            gene_id: tabulation.gene_id.clone(),
            score,
            codon_count,
            skipped_triplets: tabulation.skipped_triplets,
            low_confidence: codon_count < self.min_codon_count,
            family_deviations,
        }
    }

    /// Score every gene in parallel, keeping input order
    #[must_use]
    pub fn score_all(&self, tabulations: &[Tabulation]) -> Vec<GeneBias> {
        tabulations
            .par_iter()
            .map(|tabulation| self.score(tabulation))
            .collect()
    }
}
