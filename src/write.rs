use crate::data::{ResultRow, REPORT_HEADER};

/// Basic CSV exporter for the report. Fields are never quoted; borders and crossing
/// types don't contain commas.
pub(crate) fn write_report<W: std::io::Write>(
    writer: W,
    rows: &[ResultRow],
) -> Result<(), anyhow::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);
    wtr.write_record(REPORT_HEADER)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
