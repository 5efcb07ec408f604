use super::*;

fn row(month: &str, region: Region, satisfaction: u32, payment: u32, open: u32, compliance: u32) -> NationalRow {
    NationalRow {
        month: PeriodKey::parse(month).expect("valid month key"),
        region,
        owner_satisfaction: satisfaction,
        payment_rate: payment,
        objections_open: open,
        compliance_rate: compliance,
    }
}

fn q2_riyadh_filter() -> IndicatorFilter {
    IndicatorFilter {
        year: 2025,
        quarter: Quarter::Q2,
        region: RegionScope::Only(Region::Riyadh),
    }
}

#[test]
fn every_month_belongs_to_exactly_one_quarter() {
    for month in 1..=12u32 {
        let owners: Vec<Quarter> = Quarter::ordered()
            .into_iter()
            .filter(|quarter| quarter.months().contains(&month))
            .collect();
        assert_eq!(owners.len(), 1, "month {month} must live in one quarter");
        assert_eq!(Quarter::containing(month), Some(owners[0]));
    }
    assert_eq!(Quarter::containing(0), None);
    assert_eq!(Quarter::containing(13), None);
}

#[test]
fn quarter_filter_returns_all_and_only_matching_rows() {
    let rows = vec![
        row("2025-03", Region::Riyadh, 80, 85, 10, 90),
        row("2025-04", Region::Riyadh, 82, 87, 98, 91),
        row("2025-05", Region::Eastern, 79, 84, 63, 88),
        row("2024-05", Region::Riyadh, 70, 75, 12, 80),
    ];
    let filter = IndicatorFilter {
        year: 2025,
        quarter: Quarter::Q2,
        region: RegionScope::All,
    };

    let matched = filter_rows(&rows, &filter);
    assert_eq!(matched.len(), 2);
    assert!(matched.iter().all(|r| filter.quarter.months().contains(&r.month.month)));
    assert!(matched.iter().all(|r| r.month.year == 2025));
}

#[test]
fn aggregates_riyadh_q2_with_absent_june_excluded_from_kpis() {
    let rows = vec![
        row("2025-04", Region::Riyadh, 82, 87, 98, 91),
        row("2025-05", Region::Riyadh, 83, 88, 96, 92),
        row("2025-05", Region::Eastern, 79, 84, 63, 88),
    ];

    let series = aggregate(&rows, &q2_riyadh_filter());
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].owner_satisfaction, Some(82));
    assert_eq!(series[1].owner_satisfaction, Some(83));
    assert_eq!(series[2].owner_satisfaction, None, "june has no data");
    assert!(!series[2].has_data());

    let summary = kpis(&series);
    assert_eq!(summary.satisfaction, 83, "mean of 82 and 83, rounded");
    assert_eq!(summary.payment, 88);
    assert_eq!(summary.objections, 98 + 96);
}

#[test]
fn per_month_means_average_across_regions_and_sum_objections() {
    let rows = vec![
        row("2025-04", Region::Riyadh, 80, 90, 10, 90),
        row("2025-04", Region::Eastern, 70, 80, 5, 88),
    ];
    let filter = IndicatorFilter {
        year: 2025,
        quarter: Quarter::Q2,
        region: RegionScope::All,
    };

    let series = aggregate(&rows, &filter);
    assert_eq!(series[0].owner_satisfaction, Some(75));
    assert_eq!(series[0].payment_rate, Some(85));
    assert_eq!(series[0].objections_open, 15);
}

#[test]
fn kpi_rollup_is_idempotent_on_a_single_aggregate() {
    let rows = vec![
        row("2025-04", Region::Riyadh, 82, 87, 98, 91),
        row("2025-05", Region::Riyadh, 83, 88, 96, 92),
    ];
    let series = aggregate(&rows, &q2_riyadh_filter());
    let first = kpis(&series);

    let rewrapped = vec![MonthlyAggregate {
        month: PeriodKey::new(2025, 4).expect("valid"),
        owner_satisfaction: Some(first.satisfaction),
        payment_rate: Some(first.payment),
        compliance_rate: Some(first.compliance),
        objections_open: first.objections,
    }];
    let second = kpis(&rewrapped);

    assert_eq!(first, second);
}

#[test]
fn no_data_months_serialize_as_zero() {
    let series = aggregate(&[], &q2_riyadh_filter());
    let json = serde_json::to_value(&series).expect("series serializes");
    assert_eq!(json[0]["owner_satisfaction"], 0);
    assert_eq!(json[0]["month"], "2025-04");
}

#[test]
fn region_scope_parses_labels() {
    assert_eq!(RegionScope::from_label("الكل"), Some(RegionScope::All));
    assert_eq!(
        RegionScope::from_label("الرياض"),
        Some(RegionScope::Only(Region::Riyadh))
    );
    assert_eq!(RegionScope::from_label("nowhere"), None);
}

#[test]
fn period_key_round_trips() {
    let key = PeriodKey::parse("2025-06").expect("parses");
    assert_eq!(key.to_string(), "2025-06");
    assert_eq!(PeriodKey::parse("2025-13"), None);
    assert_eq!(PeriodKey::parse("junk"), None);
}

#[test]
fn national_csv_carries_bom_headers_and_rows() {
    let rows = vec![row("2025-04", Region::Riyadh, 82, 87, 98, 91)];
    let csv = national_index_csv(&rows, &q2_riyadh_filter()).expect("csv renders");

    assert!(csv.starts_with('\u{feff}'));
    let mut lines = csv.trim_start_matches('\u{feff}').lines();
    assert_eq!(
        lines.next().expect("header row"),
        "\"السنة\",\"الربع\",\"المنطقة\",\"الشهر\",\"رضا الملاك\",\"نسبة التحصيل\",\"اعتراضات مفتوحة\",\"التزام المعايير\""
    );
    assert_eq!(
        lines.next().expect("data row"),
        "\"2025\",\"Q2\",\"الرياض\",\"2025-04\",\"82\",\"87\",\"98\",\"91\""
    );
    assert_eq!(
        national_index_file_name(&q2_riyadh_filter()),
        "national-index-2025-Q2.csv"
    );
}

#[test]
fn maps_link_is_query_encoded() {
    let site = UnionSite {
        name: "اتحاد برج الندى".to_string(),
        region: Region::Riyadh,
        units: 96,
        open_objections: 3,
        satisfaction: 84,
        collection: 88,
    };
    let url = site.maps_search_url();
    assert!(url.starts_with("https://www.google.com/maps/search/?api=1&query="));
    assert!(!url.contains(' '), "spaces must be percent-encoded");

    let sites = vec![site];
    assert_eq!(sites_in_scope(&sites, RegionScope::Only(Region::Makkah)).len(), 0);
    assert_eq!(sites_in_scope(&sites, RegionScope::All).len(), 1);
}
