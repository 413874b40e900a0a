use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Crossing counts are never negative and a yearly sum of them fits comfortably in 64 bits.
pub type Count = u64;

/// Format of every date in the input file and in the report, e.g. `03/01/2019 12:00:00 AM`.
pub const DATE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Header line of the report. Written even when the report has no rows.
pub const REPORT_HEADER: [&str; 5] = ["Border", "Date", "Measure", "Value", "Average"];

/// One decoded input row. Columns are matched by header name; the port columns
/// (`Port Name`, `State`, `Port Code`) and any other column play no part in the report
/// and are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct CrossingRecord {
    #[serde(rename = "Border")]
    pub border: String,
    #[serde(rename = "Date", deserialize_with = "deserialize_date")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "Measure")]
    pub measure: String,
    #[serde(rename = "Value")]
    pub value: Count,
}

/// One line of the report: the monthly total of a crossing type at a border, along with
/// the running average of the previous months of the same year.
///
/// The date is only turned back into text when serializing, see `ReportLine`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ReportLine")]
pub(crate) struct ResultRow {
    pub border: String,
    pub timestamp: NaiveDateTime,
    pub measure: String,
    pub total: Count,
    pub running_average: Count,
}

/// Serialization proxy for `ResultRow`, in report column order.
#[derive(Serialize)]
pub(crate) struct ReportLine {
    pub border: String,
    pub date: String,
    pub measure: String,
    pub value: Count,
    pub average: Count,
}

impl From<ResultRow> for ReportLine {
    fn from(row: ResultRow) -> Self {
        Self {
            date: row.timestamp.format(DATE_FORMAT).to_string(),
            border: row.border,
            measure: row.measure,
            value: row.total,
            average: row.running_average,
        }
    }
}

fn deserialize_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let value = String::deserialize(deserializer)?;
    match NaiveDateTime::parse_from_str(&value, DATE_FORMAT) {
        Ok(timestamp) => Ok(timestamp),
        Err(source) => Err(de::Error::custom(Error::InvalidDate { value, source })),
    }
}

/// Decoding errors. The aggregation itself has no error path: anything that reaches it has
/// already been decoded successfully.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid date {value:?}, expected MM/DD/YYYY HH:MM:SS AM/PM: {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::{ReportLine, ResultRow, DATE_FORMAT};
    use chrono::NaiveDateTime;

    #[test]
    fn report_line_formats_date() {
        let timestamp = NaiveDateTime::parse_from_str("03/01/2019 04:05:06 PM", DATE_FORMAT).unwrap();
        let line = ReportLine::from(ResultRow {
            border: "US-Mexico Border".into(),
            timestamp,
            measure: "Pedestrians".into(),
            total: 42,
            running_average: 7,
        });
        assert_eq!(line.date, "03/01/2019 04:05:06 PM");
        assert_eq!(line.border, "US-Mexico Border");
        assert_eq!(line.measure, "Pedestrians");
        assert_eq!((line.value, line.average), (42, 7));
    }

    #[test]
    fn midnight_is_twelve_am() {
        let timestamp = NaiveDateTime::parse_from_str("01/15/2019 12:00:00 AM", DATE_FORMAT).unwrap();
        assert_eq!(timestamp.format(DATE_FORMAT).to_string(), "01/15/2019 12:00:00 AM");
        assert_eq!(timestamp.format("%H").to_string(), "00");
    }
}
