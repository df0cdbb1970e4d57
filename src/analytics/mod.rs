/// Launch statistics for the analytics view
use crate::domain::{LaunchRecord, Outcome};
use serde::Serialize;
use std::collections::BTreeMap;

/// How many of the most recent launch years the yearly series keeps
pub const RECENT_YEARS: usize = 10;

/// Fixed inclusive year ranges for the period chart
pub const PERIOD_RANGES: [(i32, i32); 5] = [
    (2010, 2012),
    (2013, 2015),
    (2016, 2018),
    (2019, 2021),
    (2022, 2024),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeDistribution {
    pub succeeded: usize,
    pub failed: usize,
    pub pending: usize,
}

impl OutcomeDistribution {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.pending
    }

    /// Labelled pie-chart slices in display order, each with its rounded
    /// share of the total (0 when there are no launches)
    pub fn slices(&self) -> Vec<OutcomeSlice> {
        let total = self.total();
        [
            ("Success", self.succeeded),
            ("Failed", self.failed),
            ("Pending", self.pending),
        ]
        .into_iter()
        .map(|(name, value)| OutcomeSlice {
            name,
            value,
            percent: percent_of(value, total),
        })
        .collect()
    }
}

fn percent_of(value: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (value as f64 * 100.0 / total as f64).round() as u32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeSlice {
    pub name: &'static str,
    pub value: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearlyCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodBucket {
    pub range: String,
    pub start: i32,
    pub end: i32,
    pub count: usize,
}

impl PeriodBucket {
    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

/// Count launches per outcome
pub fn compute_outcome_distribution(records: &[LaunchRecord]) -> OutcomeDistribution {
    records
        .iter()
        .fold(OutcomeDistribution::default(), |mut acc, r| {
            match r.outcome {
                Outcome::Succeeded => acc.succeeded += 1,
                Outcome::Failed => acc.failed += 1,
                Outcome::Pending => acc.pending += 1,
            }
            acc
        })
}

/// Launches per year, ascending, limited to the most recent years that had launches.
/// Years without launches are not zero-filled.
pub fn compute_yearly_counts(records: &[LaunchRecord]) -> Vec<YearlyCount> {
    let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
    for year in records.iter().filter_map(LaunchRecord::year) {
        *per_year.entry(year).or_insert(0) += 1;
    }

    let skip = per_year.len().saturating_sub(RECENT_YEARS);
    per_year
        .into_iter()
        .skip(skip)
        .map(|(year, count)| YearlyCount { year, count })
        .collect()
}

/// Launch counts for each fixed period; years outside every range are dropped.
pub fn compute_period_distribution(records: &[LaunchRecord]) -> Vec<PeriodBucket> {
    let years: Vec<i32> = records.iter().filter_map(LaunchRecord::year).collect();

    PERIOD_RANGES
        .iter()
        .map(|&(start, end)| {
            let mut bucket = PeriodBucket {
                range: format!("{}-{}", start, end),
                start,
                end,
                count: 0,
            };
            bucket.count = years.iter().filter(|&&y| bucket.contains(y)).count();
            bucket
        })
        .collect()
}

/// Everything the analytics view charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchAnalytics {
    pub total: usize,
    pub distribution: OutcomeDistribution,
    pub outcomes: Vec<OutcomeSlice>,
    pub by_year: Vec<YearlyCount>,
    pub by_period: Vec<PeriodBucket>,
}

impl LaunchAnalytics {
    pub fn from_records(records: &[LaunchRecord]) -> Self {
        let distribution = compute_outcome_distribution(records);
        Self {
            total: records.len(),
            distribution,
            outcomes: distribution.slices(),
            by_year: compute_yearly_counts(records),
            by_period: compute_period_distribution(records),
        }
    }
}
