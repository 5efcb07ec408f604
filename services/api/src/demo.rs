use crate::infra::{
    parse_date, seed_cost_breakdown, seed_invoice_book, seed_monthly_rows, seed_national_rows,
    seed_union_directory, InMemoryKeyValueStore, InMemoryObjectionRepository,
};
use aqarna::error::AppError;
use aqarna::portal::billing::{self, CardDetails, PaymentMethod};
use aqarna::portal::indicators::{
    aggregate, kpis, national_index_csv, national_index_file_name, IndicatorFilter, Quarter,
    RegionScope,
};
use aqarna::portal::objections::{
    ObjectionService, ObjectionServiceError, ReviewDecision, UnionObjectionDraft,
};
use aqarna::portal::risk::RiskEngine;
use aqarna::session::SessionStore;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the reporting date (defaults to today).
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the objection lifecycle portion of the demo.
    #[arg(long)]
    pub(crate) skip_objections: bool,
}

#[derive(Args, Debug)]
pub(crate) struct NationalReportArgs {
    /// Reporting year, e.g. 2025
    #[arg(long)]
    pub(crate) year: i32,
    /// Reporting quarter: Q1, Q2, Q3, or Q4
    #[arg(long, value_parser = parse_quarter)]
    pub(crate) quarter: Quarter,
    /// Region label to scope to (defaults to all regions)
    #[arg(long, value_parser = parse_region_scope)]
    pub(crate) region: Option<RegionScope>,
    /// Write the filtered rows as CSV to this path
    #[arg(long)]
    pub(crate) csv_out: Option<PathBuf>,
}

fn parse_quarter(raw: &str) -> Result<Quarter, String> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "Q1" => Ok(Quarter::Q1),
        "Q2" => Ok(Quarter::Q2),
        "Q3" => Ok(Quarter::Q3),
        "Q4" => Ok(Quarter::Q4),
        other => Err(format!("unknown quarter '{other}', expected Q1..Q4")),
    }
}

fn parse_region_scope(raw: &str) -> Result<RegionScope, String> {
    RegionScope::from_label(raw).ok_or_else(|| format!("unknown region '{raw}'"))
}

pub(crate) fn run_national_report(args: NationalReportArgs) -> Result<(), AppError> {
    let NationalReportArgs {
        year,
        quarter,
        region,
        csv_out,
    } = args;

    let filter = IndicatorFilter {
        year,
        quarter,
        region: region.unwrap_or_default(),
    };

    let rows = seed_national_rows();
    let series = aggregate(&rows, &filter);
    let summary = kpis(&series);

    println!(
        "National index: {} {} ({})",
        filter.year,
        filter.quarter.label(),
        filter.region.label()
    );
    println!("{:<10} {:>12} {:>10} {:>12} {:>12}", "month", "satisfaction", "payment", "objections", "compliance");
    for month in &series {
        println!(
            "{:<10} {:>12} {:>10} {:>12} {:>12}",
            month.month.to_string(),
            display_metric(month.owner_satisfaction),
            display_metric(month.payment_rate),
            month.objections_open,
            display_metric(month.compliance_rate),
        );
    }
    println!(
        "KPIs: satisfaction {}%, payment {}%, compliance {}%, open objections {}",
        summary.satisfaction, summary.payment, summary.compliance, summary.objections
    );

    if let Some(path) = csv_out {
        let csv = national_index_csv(&rows, &filter).map_err(AppError::Export)?;
        std::fs::write(&path, csv)?;
        println!(
            "Wrote {} ({})",
            path.display(),
            national_index_file_name(&filter)
        );
    }

    Ok(())
}

fn display_metric(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "—".to_string())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        skip_objections,
    } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    println!("Aqarna portal demo ({today})");

    let monthly = seed_monthly_rows();
    let invoices = seed_invoice_book();

    let totals = billing::totals(&monthly);
    println!(
        "\nOwner ledger: charged {} SAR, paid {} SAR, overdue {} SAR ({}% collected)",
        totals.charges, totals.paid, totals.overdue, totals.payment_rate
    );
    let usage = billing::usage_summary(&monthly);
    println!(
        "Trailing-6 average payment rate {}%; best month {}, highest arrears {}",
        usage.average_payment_rate,
        usage.best_month.as_deref().unwrap_or("—"),
        usage.worst_arrears_month.as_deref().unwrap_or("—"),
    );
    let breakdown = seed_cost_breakdown();
    let breakdown_export = billing::breakdown_csv(&breakdown).map_err(AppError::Export)?;
    println!(
        "Cost breakdown export: {} line(s) including the total row",
        breakdown_export.lines().count().saturating_sub(1)
    );

    let assessment = RiskEngine::default().assess(&monthly, invoices.invoices(), today);
    println!(
        "\nRisk assessment: score {}/100, level {}",
        assessment.score,
        assessment.level.label()
    );
    for signal in &assessment.signals {
        println!("  [{}] {} ({})", if signal.ok { "ok" } else { "!!" }, signal.label, signal.value);
    }
    for action in &assessment.recommended_actions {
        println!("  -> {action}");
    }

    if let Some(open) = invoices.first_unpaid() {
        let card = CardDetails {
            holder: "Raneem A.".to_string(),
            number: "4242 4242 4242 4242".to_string(),
            expiry: "12/27".to_string(),
            cvc: "123".to_string(),
        };
        let (receipt, card_summary) =
            billing::process(open, PaymentMethod::Card, true, Some(&card))
                .expect("demo card passes validation");
        println!(
            "\nPaid {} via {}: {} SAR + {} SAR fee = {} SAR",
            receipt.invoice_id,
            receipt.method.label(),
            receipt.amount,
            receipt.fee,
            receipt.total
        );

        let session = SessionStore::new(Arc::new(InMemoryKeyValueStore::default()));
        if let Some(summary) = card_summary {
            session.save_last_card(&summary);
        }
        if let Some(saved) = session.last_card() {
            println!("Saved card for next time: {} (...{})", saved.masked, saved.last4);
        }
    }

    if !skip_objections {
        run_objection_walkthrough(today)?;
    }

    let filter = IndicatorFilter {
        year: 2025,
        quarter: Quarter::Q2,
        region: RegionScope::All,
    };
    let summary = kpis(&aggregate(&seed_national_rows(), &filter));
    println!(
        "\nNational Q2 2025: satisfaction {}%, payment {}%, compliance {}%, {} open objections",
        summary.satisfaction, summary.payment, summary.compliance, summary.objections
    );

    let directory = seed_union_directory();
    let roster = directory.members_csv("", None).map_err(AppError::Export)?;
    println!(
        "Union roster export: {} member row(s)",
        roster.lines().count().saturating_sub(1)
    );

    Ok(())
}

fn run_objection_walkthrough(today: NaiveDate) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryObjectionRepository::seeded());
    let service = ObjectionService::new(repository);

    let draft = UnionObjectionDraft {
        title: "مراجعة احتساب رسوم التشغيل".to_string(),
        details: "فرق واضح بين النسبة المتفق عليها والفاتورة الأخيرة.".to_string(),
    };
    let objection = service
        .submit_union(
            draft,
            "اتحاد برج الندى".to_string(),
            aqarna::portal::indicators::Region::Riyadh,
            today,
        )
        .map_err(AppError::Objection)?;
    println!(
        "\nFiled objection {} ({})",
        objection.id,
        objection.status.label()
    );

    let accepted = service
        .review(&objection.id, ReviewDecision::Accepted)
        .map_err(AppError::Objection)?;
    println!("Reviewed {} -> {}", accepted.id, accepted.status.label());

    match service.review(&accepted.id, ReviewDecision::Rejected) {
        Err(ObjectionServiceError::Transition(err)) => {
            println!("Re-review blocked as expected: {err}");
        }
        other => {
            println!("Unexpected outcome flipping a decided objection: {other:?}");
        }
    }

    Ok(())
}
