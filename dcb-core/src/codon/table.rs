use std::fmt;

use serde::Serialize;

use crate::{
    codon::Codon,
    constants::{MAX_FAMILY_SIZE, NUM_AMINO_ACIDS, NUM_CODONS, STANDARD_CODE},
    types::DcbError,
};

/// The standard genetic code. Built at compile time and never mutated, so it
/// can be shared by reference across concurrent runs.
pub static STANDARD: CodonTable = CodonTable::from_code(STANDARD_CODE);

/// Amino acids of the standard code plus the stop marker.
///
/// Variants are declared in the order each residue first appears in the
/// TCAG-ordered codon table, which is also the order synonymous families are
/// reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AminoAcid {
    Phe,
    Leu,
    Ser,
    Tyr,
    Stop,
    Cys,
    Trp,
    Pro,
    His,
    Gln,
    Arg,
    Ile,
    Met,
    Thr,
    Asn,
    Lys,
    Val,
    Ala,
    Asp,
    Glu,
    Gly,
}

impl AminoAcid {
    /// Every variant, in family order
    pub const ALL: [Self; NUM_AMINO_ACIDS] = [
        Self::Phe,
        Self::Leu,
        Self::Ser,
        Self::Tyr,
        Self::Stop,
        Self::Cys,
        Self::Trp,
        Self::Pro,
        Self::His,
        Self::Gln,
        Self::Arg,
        Self::Ile,
        Self::Met,
        Self::Thr,
        Self::Asn,
        Self::Lys,
        Self::Val,
        Self::Ala,
        Self::Asp,
        Self::Glu,
        Self::Gly,
    ];

    /// Residue for an IUPAC one-letter code, `*` being stop
    #[must_use]
    pub const fn from_one_letter(code: u8) -> Option<Self> {
        Some(match code {
            b'F' => Self::Phe,
            b'L' => Self::Leu,
            b'S' => Self::Ser,
            b'Y' => Self::Tyr,
            b'*' => Self::Stop,
            b'C' => Self::Cys,
            b'W' => Self::Trp,
            b'P' => Self::Pro,
            b'H' => Self::His,
            b'Q' => Self::Gln,
            b'R' => Self::Arg,
            b'I' => Self::Ile,
            b'M' => Self::Met,
            b'T' => Self::Thr,
            b'N' => Self::Asn,
            b'K' => Self::Lys,
            b'V' => Self::Val,
            b'A' => Self::Ala,
            b'D' => Self::Asp,
            b'E' => Self::Glu,
            b'G' => Self::Gly,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn one_letter(self) -> char {
        match self {
            Self::Phe => 'F',
            Self::Leu => 'L',
            Self::Ser => 'S',
            Self::Tyr => 'Y',
            Self::Stop => '*',
            Self::Cys => 'C',
            Self::Trp => 'W',
            Self::Pro => 'P',
            Self::His => 'H',
            Self::Gln => 'Q',
            Self::Arg => 'R',
            Self::Ile => 'I',
            Self::Met => 'M',
            Self::Thr => 'T',
            Self::Asn => 'N',
            Self::Lys => 'K',
            Self::Val => 'V',
            Self::Ala => 'A',
            Self::Asp => 'D',
            Self::Glu => 'E',
            Self::Gly => 'G',
        }
    }

    #[must_use]
    pub const fn to_index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn is_stop(self) -> bool {
        matches!(self, Self::Stop)
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Codons that encode the same amino acid.
///
/// Relative codon usage is only defined within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynonymousFamily<'a> {
    pub amino_acid: AminoAcid,
    codons: &'a [Codon],
}

impl<'a> SynonymousFamily<'a> {
    #[must_use]
    pub const fn codons(&self) -> &'a [Codon] {
        self.codons
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.codons.len()
    }

    /// Never true for a family of the standard code
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.codons.is_empty()
    }

    #[must_use]
    pub fn contains(&self, codon: Codon) -> bool {
        self.codons.contains(&codon)
    }

    /// Whether the family offers a synonymous choice at all (not Met or Trp)
    #[must_use]
    pub const fn has_synonyms(&self) -> bool {
        self.codons.len() > 1
    }
}

/// Codon to amino acid lookup with synonymous family classification.
///
/// # Examples
///
/// ```rust
/// use dcb_core::codon::{AminoAcid, Codon, CodonTable};
///
/// let table = CodonTable::standard();
/// assert_eq!(table.amino_acid_of(b"GCT")?, AminoAcid::Ala);
///
/// let family = table.family_of(Codon::from_triplet(b"TAA").unwrap());
/// assert_eq!(family.amino_acid, AminoAcid::Stop);
/// assert_eq!(family.len(), 3);
/// # Ok::<(), dcb_core::types::DcbError>(())
/// ```
#[derive(Debug)]
pub struct CodonTable {
    amino_acids: [AminoAcid; NUM_CODONS],
    family_codons: [[Codon; MAX_FAMILY_SIZE]; NUM_AMINO_ACIDS],
    family_sizes: [usize; NUM_AMINO_ACIDS],
}

impl CodonTable {
    /// Build a table from 64 one-letter residue codes in TCAG codon order.
    ///
    /// Evaluated at compile time for [`STANDARD`]; an invalid code there is a
    /// build error.
    #[must_use]
    pub const fn from_code(code: &[u8; NUM_CODONS]) -> Self {
        let mut amino_acids = [AminoAcid::Stop; NUM_CODONS];
        let mut family_codons = [[Codon(0); MAX_FAMILY_SIZE]; NUM_AMINO_ACIDS];
        let mut family_sizes = [0usize; NUM_AMINO_ACIDS];

        let mut i = 0;
        while i < NUM_CODONS {
            let amino_acid = match AminoAcid::from_one_letter(code[i]) {
                Some(amino_acid) => amino_acid,
                None => panic!("invalid amino acid code in genetic code table"),
            };
            amino_acids[i] = amino_acid;

            let family = amino_acid.to_index();
            let size = family_sizes[family];
            if size == MAX_FAMILY_SIZE {
                panic!("synonymous family larger than MAX_FAMILY_SIZE");
            }
            family_codons[family][size] = Codon(i as u8);
            family_sizes[family] = size + 1;
            i += 1;
        }

        Self {
            amino_acids,
            family_codons,
            family_sizes,
        }
    }

    /// The standard bacterial code
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Amino acid encoded by a codon. Total over all 64 codons.
    #[must_use]
    pub const fn translate(&self, codon: Codon) -> AminoAcid {
        self.amino_acids[codon.index()]
    }

    /// Amino acid encoded by a raw triplet.
    ///
    /// # Errors
    ///
    /// Returns [`DcbError::UnknownCodon`] if the triplet is not one of the 64
    /// valid codons.
    pub fn amino_acid_of(&self, triplet: &[u8]) -> Result<AminoAcid, DcbError> {
        Codon::from_triplet(triplet)
            .map(|codon| self.translate(codon))
            .ok_or_else(|| DcbError::UnknownCodon(String::from_utf8_lossy(triplet).into_owned()))
    }

    /// The synonymous family of a codon, which always contains the codon
    #[must_use]
    pub fn family_of(&self, codon: Codon) -> SynonymousFamily<'_> {
        self.family(self.translate(codon))
    }

    #[must_use]
    pub fn family(&self, amino_acid: AminoAcid) -> SynonymousFamily<'_> {
        let index = amino_acid.to_index();
        SynonymousFamily {
            amino_acid,
            codons: &self.family_codons[index][..self.family_sizes[index]],
        }
    }

    /// All families in [`AminoAcid`] order
    pub fn families(&self) -> impl Iterator<Item = SynonymousFamily<'_>> + '_ {
        AminoAcid::ALL
            .into_iter()
            .map(move |amino_acid| self.family(amino_acid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codon(triplet: &[u8]) -> Codon {
        Codon::from_triplet(triplet).unwrap()
    }

    #[test]
    fn test_amino_acid_of_is_total() {
        let table = CodonTable::standard();
        for codon in Codon::all() {
            let bases = codon.bases();
            let amino_acid = table.amino_acid_of(&bases).unwrap();
            assert_eq!(amino_acid, table.translate(codon));
        }
    }

    #[test]
    fn test_known_assignments() {
        let table = CodonTable::standard();
        assert_eq!(table.amino_acid_of(b"ATG").unwrap(), AminoAcid::Met);
        assert_eq!(table.amino_acid_of(b"TGG").unwrap(), AminoAcid::Trp);
        assert_eq!(table.amino_acid_of(b"GCT").unwrap(), AminoAcid::Ala);
        assert_eq!(table.amino_acid_of(b"AGA").unwrap(), AminoAcid::Arg);
        assert_eq!(table.amino_acid_of(b"AGT").unwrap(), AminoAcid::Ser);
        assert_eq!(table.amino_acid_of(b"ata").unwrap(), AminoAcid::Ile);
        for stop in [b"TAA", b"TAG", b"TGA"] {
            assert_eq!(table.amino_acid_of(stop).unwrap(), AminoAcid::Stop);
        }
    }

    #[test]
    fn test_amino_acid_of_unknown_codon() {
        let table = CodonTable::standard();
        match table.amino_acid_of(b"AXG") {
            Err(DcbError::UnknownCodon(triplet)) => assert_eq!(triplet, "AXG"),
            other => panic!("Expected UnknownCodon, got {:?}", other),
        }
        assert!(table.amino_acid_of(b"NNN").is_err());
        assert!(table.amino_acid_of(b"AT").is_err());
    }

    #[test]
    fn test_family_of_contains_codon() {
        let table = CodonTable::standard();
        for codon in Codon::all() {
            let family = table.family_of(codon);
            assert!(family.contains(codon));
            assert!(family
                .codons()
                .iter()
                .all(|&member| table.translate(member) == family.amino_acid));
        }
    }

    #[test]
    fn test_family_sizes() {
        let table = CodonTable::standard();
        assert_eq!(table.family(AminoAcid::Leu).len(), 6);
        assert_eq!(table.family(AminoAcid::Ser).len(), 6);
        assert_eq!(table.family(AminoAcid::Arg).len(), 6);
        assert_eq!(table.family(AminoAcid::Ala).len(), 4);
        assert_eq!(table.family(AminoAcid::Ile).len(), 3);
        assert_eq!(table.family(AminoAcid::Stop).len(), 3);
        assert_eq!(table.family(AminoAcid::Met).len(), 1);
        assert_eq!(table.family(AminoAcid::Trp).len(), 1);
        assert!(!table.family(AminoAcid::Met).has_synonyms());
        assert!(table.family(AminoAcid::Stop).has_synonyms());
    }

    #[test]
    fn test_families_partition_codons() {
        let table = CodonTable::standard();
        let families: Vec<_> = table.families().collect();
        assert_eq!(families.len(), NUM_AMINO_ACIDS);
        assert_eq!(families.iter().map(SynonymousFamily::len).sum::<usize>(), NUM_CODONS);
        assert!(families.iter().all(|family| !family.is_empty()));
        assert_eq!(families[0].amino_acid, AminoAcid::Phe);
        assert_eq!(families[NUM_AMINO_ACIDS - 1].amino_acid, AminoAcid::Gly);
    }

    #[test]
    fn test_alanine_family_members() {
        let table = CodonTable::standard();
        let family = table.family_of(codon(b"GCC"));
        let members: Vec<String> = family.codons().iter().map(ToString::to_string).collect();
        assert_eq!(members, vec!["GCT", "GCC", "GCA", "GCG"]);
    }

    #[test]
    fn test_one_letter_round_trip() {
        for amino_acid in AminoAcid::ALL {
            let code = amino_acid.one_letter() as u8;
            assert_eq!(AminoAcid::from_one_letter(code), Some(amino_acid));
        }
        assert!(AminoAcid::Stop.is_stop());
        assert_eq!(AminoAcid::Ala.to_string(), "Ala");
    }
}
