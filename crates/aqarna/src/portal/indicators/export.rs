use crate::export::{csv_with_bom, ExportError};

use super::aggregate::{filter_rows, IndicatorFilter};
use super::domain::NationalRow;

/// Column headers as the authority table shows them, in the same order.
const NATIONAL_HEADERS: [&str; 8] = [
    "السنة",
    "الربع",
    "المنطقة",
    "الشهر",
    "رضا الملاك",
    "نسبة التحصيل",
    "اعتراضات مفتوحة",
    "التزام المعايير",
];

/// Render the filtered national rows as a BOM-prefixed CSV document.
pub fn national_index_csv(
    rows: &[NationalRow],
    filter: &IndicatorFilter,
) -> Result<String, ExportError> {
    let records: Vec<Vec<String>> = filter_rows(rows, filter)
        .into_iter()
        .map(|row| {
            vec![
                row.month.year.to_string(),
                filter.quarter.label().to_string(),
                row.region.label().to_string(),
                row.month.to_string(),
                row.owner_satisfaction.to_string(),
                row.payment_rate.to_string(),
                row.objections_open.to_string(),
                row.compliance_rate.to_string(),
            ]
        })
        .collect();

    csv_with_bom(&NATIONAL_HEADERS, &records)
}

pub fn national_index_file_name(filter: &IndicatorFilter) -> String {
    format!(
        "national-index-{}-{}.csv",
        filter.year,
        filter.quarter.label()
    )
}
