use crate::codon::{Codon, CodonTable};
use crate::constants::NUM_CODONS;
use crate::tabulation::CodonCounts;

/// Usage of each codon relative to its synonymous family, in [0, 1].
///
/// `RU(c) = T[c] / Σ T[f]` over the family of `c`. Families with no counts
/// have usage 0 for every member rather than NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeUsage {
    values: [f64; NUM_CODONS],
}

impl RelativeUsage {
    #[must_use]
    pub fn from_counts(counts: &CodonCounts, table: &CodonTable) -> Self {
        let mut values = [0.0; NUM_CODONS];
        for family in table.families() {
            let family_total = counts.family_total(&family);
            if family_total == 0 {
                continue;
            }
            for &codon in family.codons() {
                values[codon.index()] = counts.get(codon) as f64 / family_total as f64;
            }
        }
        Self { values }
    }

    #[must_use]
    pub const fn get(&self, codon: Codon) -> f64 {
        self.values[codon.index()]
    }
}

/// Relative synonymous codon usage: observed count over the count expected
/// if all synonyms were used equally.
///
/// `RSCU(c) = T[c] / (Σ T[f] / k)` for a family of `k` codons; 0 for an
/// unused family. A value of 1 means no preference.
#[must_use]
pub fn rscu(counts: &CodonCounts, table: &CodonTable) -> [f64; NUM_CODONS] {
    let mut values = [0.0; NUM_CODONS];
    for family in table.families() {
        let family_total = counts.family_total(&family);
        if family_total == 0 {
            continue;
        }
        let expected = family_total as f64 / family.len() as f64;
        for &codon in family.codons() {
            values[codon.index()] = counts.get(codon) as f64 / expected;
        }
    }
    values
}

/// The genome-wide reference every gene is scored against.
///
/// Built once, after every gene has been tabulated, and read-only from then
/// on. Holding one is what allows Phase 2 to start.
#[derive(Debug, Clone)]
pub struct GenomeReference {
    counts: CodonCounts,
    relative_usage: RelativeUsage,
    rscu: [f64; NUM_CODONS],
}

impl GenomeReference {
    #[must_use]
    pub fn new(counts: CodonCounts, table: &CodonTable) -> Self {
        Self {
            relative_usage: RelativeUsage::from_counts(&counts, table),
            rscu: rscu(&counts, table),
            counts,
        }
    }

    #[must_use]
    pub const fn counts(&self) -> &CodonCounts {
        &self.counts
    }

    #[must_use]
    pub const fn relative_usage(&self) -> &RelativeUsage {
        &self.relative_usage
    }

    #[must_use]
    pub const fn rscu(&self, codon: Codon) -> f64 {
        self.rscu[codon.index()]
    }
}
