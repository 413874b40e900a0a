use crate::data::CrossingRecord;
use tracing::debug;

/// Trait for doing something with a `CrossingRecord` read from a CSV file
/// (or received from elsewhere). Used to feed the `Crossings` store, but also
/// used for mock tests to check we get the correct records from reading a CSV stream.
pub(crate) trait RecordUser {
    fn use_record(&mut self, record: CrossingRecord);
}

/// Simple CSV importer for `CrossingRecord`s. Rows may carry more fields than the
/// header names, those are ignored. Stops at the first row that can't be decoded; the
/// error tells which line and which field.
pub(crate) fn read_crossings<R: std::io::Read, U: RecordUser>(
    reader: R,
    user: &mut U,
) -> Result<usize, anyhow::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut count = 0;
    for result in rdr.deserialize() {
        let record: CrossingRecord = result?;
        user.use_record(record);
        count += 1;
    }
    debug!(count, "Decoded crossing records");
    Ok(count)
}
