use crate::data::CrossingRecord;
use chrono::Datelike;
use std::collections::BTreeSet;

/// Distinct borders, crossing types and years found in the input.
///
/// Borders and crossing types keep the order in which they were first seen, since that
/// order drives the order rows are produced in (and so the order of rows that tie when
/// sorting). Years are kept sorted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct GroupingIndex {
    pub borders: Vec<String>,
    pub measures: Vec<String>,
    pub years: BTreeSet<i32>,
}

impl GroupingIndex {
    #[cfg(test)]
    pub fn from_records(records: &[CrossingRecord]) -> Self {
        let mut index = Self::default();
        for record in records {
            index.observe(record);
        }
        index
    }

    /// Registers the border, crossing type and year of `record`.
    pub fn observe(&mut self, record: &CrossingRecord) {
        if !self.borders.contains(&record.border) {
            self.borders.push(record.border.clone());
        }
        if !self.measures.contains(&record.measure) {
            self.measures.push(record.measure.clone());
        }
        self.years.insert(record.timestamp.year());
    }

    /// Position of a crossing type in first-seen order.
    pub fn measure_slot(&self, measure: &str) -> Option<usize> {
        self.measures.iter().position(|m| m == measure)
    }
}

#[cfg(test)]
mod tests {
    use super::GroupingIndex;
    use crate::data::{CrossingRecord, DATE_FORMAT};
    use chrono::NaiveDateTime;

    fn record(border: &str, date: &str, measure: &str, value: u64) -> CrossingRecord {
        CrossingRecord {
            border: border.into(),
            timestamp: NaiveDateTime::parse_from_str(date, DATE_FORMAT).unwrap(),
            measure: measure.into(),
            value,
        }
    }

    #[test]
    fn empty_input() {
        let index = GroupingIndex::from_records(&[]);
        assert!(index.borders.is_empty());
        assert!(index.measures.is_empty());
        assert!(index.years.is_empty());
    }

    #[test]
    fn first_seen_order() {
        let index = GroupingIndex::from_records(&[
            record("US-Mexico Border", "03/01/2019 12:00:00 AM", "Pedestrians", 1),
            record("US-Canada Border", "03/01/2017 12:00:00 AM", "Trucks", 2),
            record("US-Mexico Border", "01/01/2018 12:00:00 AM", "Pedestrians", 3),
            record("US-Canada Border", "02/01/2019 12:00:00 AM", "Buses", 4),
        ]);
        assert_eq!(index.borders, ["US-Mexico Border", "US-Canada Border"]);
        assert_eq!(index.measures, ["Pedestrians", "Trucks", "Buses"]);
        assert_eq!(index.years.iter().copied().collect::<Vec<_>>(), [2017, 2018, 2019]);
        assert_eq!(index.measure_slot("Buses"), Some(2));
        assert_eq!(index.measure_slot("Trains"), None);
    }
}
