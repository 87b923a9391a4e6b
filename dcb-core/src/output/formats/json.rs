use std::io::Write;

use crate::{report::Report, types::DcbError};

/// Write the full report as pretty-printed JSON followed by a newline
pub fn write_json_format<W: Write>(writer: &mut W, report: &Report) -> Result<(), DcbError> {
    serde_json::to_writer_pretty(&mut *writer, report)
        .map_err(|e| DcbError::Serialization(e.to_string()))?;
    writeln!(writer)?;
    Ok(())
}
