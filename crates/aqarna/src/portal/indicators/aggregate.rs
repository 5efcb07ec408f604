use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::domain::{NationalRow, PeriodKey, Quarter, RegionScope};

/// Period and region selection applied to the national dataset.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct IndicatorFilter {
    pub year: i32,
    pub quarter: Quarter,
    #[serde(default)]
    pub region: RegionScope,
}

impl IndicatorFilter {
    pub fn admits(&self, row: &NationalRow) -> bool {
        row.month.year == self.year
            && self.quarter.months().contains(&row.month.month)
            && self.region.admits(row.region)
    }
}

/// Rows of the dataset matching the filter, in input order.
pub fn filter_rows<'a>(rows: &'a [NationalRow], filter: &IndicatorFilter) -> Vec<&'a NationalRow> {
    rows.iter().filter(|row| filter.admits(row)).collect()
}

/// One month of the aggregated series.
///
/// Mean-valued metrics are `None` when no region reported for the month;
/// they serialize as 0 so tables keep their familiar shape, but only
/// reported months participate in the KPI roll-up. This replaces the old
/// convention of writing a literal 0 and filtering zeros back out, which
/// could not tell "no data" from a genuine zero reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyAggregate {
    pub month: PeriodKey,
    #[serde(serialize_with = "zero_when_absent")]
    pub owner_satisfaction: Option<u32>,
    #[serde(serialize_with = "zero_when_absent")]
    pub payment_rate: Option<u32>,
    #[serde(serialize_with = "zero_when_absent")]
    pub compliance_rate: Option<u32>,
    pub objections_open: u32,
}

impl MonthlyAggregate {
    pub fn has_data(&self) -> bool {
        self.owner_satisfaction.is_some()
    }
}

fn zero_when_absent<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u32(value.unwrap_or(0))
}

/// Roll the filtered rows up into one aggregate per month of the quarter.
pub fn aggregate(rows: &[NationalRow], filter: &IndicatorFilter) -> Vec<MonthlyAggregate> {
    let matching = filter_rows(rows, filter);

    filter
        .quarter
        .months()
        .into_iter()
        .map(|month| {
            let of_month: Vec<&NationalRow> = matching
                .iter()
                .copied()
                .filter(|row| row.month.month == month)
                .collect();

            MonthlyAggregate {
                month: PeriodKey {
                    year: filter.year,
                    month,
                },
                owner_satisfaction: rounded_mean(of_month.iter().map(|r| r.owner_satisfaction)),
                payment_rate: rounded_mean(of_month.iter().map(|r| r.payment_rate)),
                compliance_rate: rounded_mean(of_month.iter().map(|r| r.compliance_rate)),
                objections_open: of_month.iter().map(|r| r.objections_open).sum(),
            }
        })
        .collect()
}

/// KPI roll-up across a monthly series. Means skip no-data months;
/// `objections` is a plain sum over the whole range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KpiSet {
    pub satisfaction: u32,
    pub payment: u32,
    pub compliance: u32,
    pub objections: u32,
}

pub fn kpis(series: &[MonthlyAggregate]) -> KpiSet {
    KpiSet {
        satisfaction: rounded_mean(series.iter().filter_map(|m| m.owner_satisfaction))
            .unwrap_or(0),
        payment: rounded_mean(series.iter().filter_map(|m| m.payment_rate)).unwrap_or(0),
        compliance: rounded_mean(series.iter().filter_map(|m| m.compliance_rate)).unwrap_or(0),
        objections: series.iter().map(|m| m.objections_open).sum(),
    }
}

fn rounded_mean(values: impl Iterator<Item = u32>) -> Option<u32> {
    let collected: Vec<u32> = values.collect();
    if collected.is_empty() {
        return None;
    }
    let sum: u64 = collected.iter().map(|&v| u64::from(v)).sum();
    Some((sum as f64 / collected.len() as f64).round() as u32)
}
