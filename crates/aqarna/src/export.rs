//! CSV export helper shared by the reporting surfaces.
//!
//! Exports match what spreadsheet tools expect from the portal: UTF-8 with
//! a byte-order-mark prefix, every field quoted, header row first in the
//! on-screen column order.

use csv::{QuoteStyle, WriterBuilder};

const UTF8_BOM: &str = "\u{feff}";

/// Error raised while assembling a CSV document.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv writer: {0}")]
    Flush(String),
    #[error("csv output was not valid UTF-8")]
    Encoding,
}

/// Render a header row plus data rows as a BOM-prefixed CSV document.
pub fn csv_with_bom<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(headers.iter().map(AsRef::as_ref))?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.to_string()))?;
    let body = String::from_utf8(bytes).map_err(|_| ExportError::Encoding)?;

    Ok(format!("{UTF8_BOM}{body}"))
}
