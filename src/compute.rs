use crate::{
    data::{Count, CrossingRecord, ResultRow},
    index::GroupingIndex,
    read::RecordUser,
};
use chrono::{Datelike, NaiveDateTime};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::collections::HashMap;
use tracing::debug;

/// This is where decoded records are stored; the grouping index is built on the fly
/// while reading them, so the whole input is only walked once before aggregating.
/// Single-threaded, the whole input lives in memory.
#[derive(Debug, Default)]
pub(crate) struct Crossings {
    records: Vec<CrossingRecord>,
    index: GroupingIndex,
}

impl Crossings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Monthly totals with their running averages, in report order.
    pub fn report(&self) -> Vec<ResultRow> {
        let mut rows = aggregate(&self.records, &self.index);
        sort_results(&mut rows);
        rows
    }
}

impl RecordUser for Crossings {
    fn use_record(&mut self, record: CrossingRecord) {
        self.index.observe(&record);
        self.records.push(record);
    }
}

/// Monthly totals seen so far for one crossing type, at one border, during one year.
///
/// Only months with crossings get pushed; an empty month leaves the history untouched.
#[derive(Debug, Default, Clone)]
pub(crate) struct RunningAverage {
    history: Vec<Count>,
}

impl RunningAverage {
    /// Records `total` and returns the average to report next to it. The current total
    /// stays out of its own average but counts for every following month:
    /// `[5, 7, 9, 2]` yields `0, 5, 6, 7`.
    pub fn push(&mut self, total: Count) -> Count {
        self.history.push(total);
        match self.history.as_slice() {
            [] | [_] => 0,
            [first, _] => *first,
            [prior @ .., _] => {
                let mean = prior_mean(prior).ceil();
                mean.to_u64()
                    .unwrap_or_else(|| panic!("running average {mean} is not a count"))
            }
        }
    }
}

fn prior_mean(totals: &[Count]) -> Decimal {
    let sum: Decimal = totals.iter().map(|&total| Decimal::from(total)).sum();
    sum / Decimal::from(totals.len())
}

/// Crossing sums of one border during one calendar month, one slot per crossing type.
#[derive(Debug)]
struct MonthBucket {
    last_seen: NaiveDateTime,
    sums: Vec<Count>,
}

type MonthKey<'a> = (&'a str, i32, u32);

/// Sums every record into its (border, year, month) bucket. A bucket reports the
/// timestamp of the last record that fell into it, whatever its crossing type.
fn bucket_records<'a>(
    records: &'a [CrossingRecord],
    index: &GroupingIndex,
) -> HashMap<MonthKey<'a>, MonthBucket> {
    let mut buckets = HashMap::new();
    for record in records {
        let year = record.timestamp.year();
        assert!(
            index.borders.contains(&record.border) && index.years.contains(&year),
            "border {:?} or year {year} missing from the grouping index",
            record.border
        );
        let slot = index.measure_slot(&record.measure).unwrap_or_else(|| {
            panic!(
                "crossing type {:?} missing from the grouping index",
                record.measure
            )
        });
        let bucket = buckets
            .entry((record.border.as_str(), year, record.timestamp.month()))
            .or_insert_with(|| MonthBucket {
                last_seen: record.timestamp,
                sums: vec![0; index.measures.len()],
            });
        bucket.last_seen = record.timestamp;
        let sum = &mut bucket.sums[slot];
        *sum = sum.checked_add(record.value).unwrap_or_else(|| {
            panic!(
                "{} crossings overflow at {:?} in {year}-{:02}",
                record.measure,
                record.border,
                record.timestamp.month()
            )
        });
    }
    buckets
}

/// Walks every border, year and month (in index order) and produces one row per
/// crossing type that had crossings that month. Running averages restart with each
/// (border, year) pair. Rows come out unsorted, see `sort_results`.
pub(crate) fn aggregate(records: &[CrossingRecord], index: &GroupingIndex) -> Vec<ResultRow> {
    let buckets = bucket_records(records, index);
    debug!(
        records = records.len(),
        borders = index.borders.len(),
        measures = index.measures.len(),
        years = index.years.len(),
        buckets = buckets.len(),
        "Bucketed records by border and month"
    );

    let mut rows = Vec::new();
    for border in &index.borders {
        for &year in &index.years {
            let mut averages = vec![RunningAverage::default(); index.measures.len()];
            for month in 1..=12 {
                let Some(bucket) = buckets.get(&(border.as_str(), year, month)) else {
                    continue;
                };
                for (slot, &total) in bucket.sums.iter().enumerate() {
                    if total == 0 {
                        continue;
                    }
                    rows.push(ResultRow {
                        border: border.clone(),
                        timestamp: bucket.last_seen,
                        measure: index.measures[slot].clone(),
                        total,
                        running_average: averages[slot].push(total),
                    });
                }
            }
        }
    }
    rows
}

fn sort_key(row: &ResultRow) -> (NaiveDateTime, &str, Count, &str) {
    (row.timestamp, &row.measure, row.total, &row.border)
}

/// Report order: date, crossing type, total and border, all descending. The sort is
/// stable so fully tied rows keep the order `aggregate` produced them in.
pub(crate) fn sort_results(rows: &mut [ResultRow]) {
    rows.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
}
