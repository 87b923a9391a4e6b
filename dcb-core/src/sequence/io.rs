use std::fs::File;
use std::io::Read;
use std::path::Path;

use bio::io::fasta;

use crate::sequence::SequenceStore;
use crate::types::DcbError;

/// Gene identifier and nucleotide sequence of one FASTA record
pub type FastaRecord = (String, Vec<u8>);

/// Read every record from a FASTA stream using rust-bio
pub fn read_fasta_records<R: Read>(reader: R) -> Result<Vec<FastaRecord>, DcbError> {
    let reader = fasta::Reader::new(reader);
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| DcbError::Parse(e.to_string()))?;
        records.push((record.id().to_string(), record.seq().to_vec()));
    }

    Ok(records)
}

impl SequenceStore {
    /// Load the gene predictor's CDS FASTA output. The record id is used as the
    /// gene identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DcbError::Io`] if the file cannot be opened and
    /// [`DcbError::Parse`] if it is not valid FASTA. Malformed sequences are
    /// not errors; they end up in [`skipped_genes`](Self::skipped_genes).
    pub fn from_fasta_file<P: AsRef<Path>>(path: P) -> Result<Self, DcbError> {
        let file = File::open(path)?;
        Self::from_fasta_reader(file)
    }

    /// Same as [`from_fasta_file`](Self::from_fasta_file) for any reader.
    pub fn from_fasta_reader<R: Read>(reader: R) -> Result<Self, DcbError> {
        let records = read_fasta_records(reader)?;
        log::debug!("Read {} CDS records", records.len());
        Ok(Self::from_records(records))
    }
}
