use chrono::Local;
use clap::Args;
use predial::config::AppConfig;
use predial::error::AppError;
use predial::telemetry;
use predial::workflows::ingest::PredialImporter;
use predial::workflows::predial::report::{format_currency, PropertyRow, SummaryKpis};
use predial::workflows::predial::{analyze, AnalysisOptions, FilterSelection, PredialAnalysis};
use std::io::Write;
use std::path::PathBuf;

/// Rows listed per table in the text report.
const PREVIEW_ROWS: usize = 10;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Predial CSV export to analyze
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Keep only records in this sector (e.g. URBANO, RURAL)
    #[arg(long)]
    pub(crate) zone: Option<String>,
    /// Keep only records in this urban subzone
    #[arg(long)]
    pub(crate) urban_subzone: Option<String>,
    /// Keep only records in this rural district (vereda)
    #[arg(long)]
    pub(crate) rural_district: Option<String>,
    /// Keep only records with this land use
    #[arg(long)]
    pub(crate) land_use: Option<String>,
    /// Keep only records with this horizontal-property flag (Sí / No)
    #[arg(long)]
    pub(crate) horizontal_property: Option<String>,
    /// Emit the full analysis as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

impl ReportArgs {
    pub(crate) fn selection(&self) -> FilterSelection {
        FilterSelection {
            zone: self.zone.clone(),
            urban_subzone: self.urban_subzone.clone(),
            rural_district: self.rural_district.clone(),
            land_use: self.land_use.clone(),
            horizontal_property: self.horizontal_property.clone(),
        }
    }
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let options = AnalysisOptions::from(&config.analysis);

    let table = PredialImporter::from_path(&args.csv)?;
    let analysis = analyze(&table, &args.selection(), &options);

    if args.json {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &analysis).map_err(std::io::Error::from)?;
        writeln!(stdout)?;
    } else {
        render_analysis(&args, &analysis);
    }

    Ok(())
}

fn render_analysis(args: &ReportArgs, analysis: &PredialAnalysis) {
    println!("Predial portfolio report");
    println!(
        "Source: {} (evaluated {})",
        args.csv.display(),
        Local::now().date_naive()
    );
    println!(
        "Records: {} of {} match the selection",
        analysis.filtered_records, analysis.total_records
    );

    if analysis.is_empty() {
        println!("\nNo records match the selected filters.");
        return;
    }

    println!("\nGeneral information");
    render_kpis("Total", &analysis.general.total);
    render_kpis("Urban", &analysis.general.urban);
    render_kpis("Rural", &analysis.general.rural);

    let compliance = &analysis.compliance;
    println!("\nTax compliance");
    println!(
        "- {} paid, {} unpaid ({:.1}% compliance)",
        compliance.paid_count, compliance.unpaid_count, compliance.compliance_rate_pct
    );
    println!(
        "- Collected over billed: {:.1}%",
        compliance.collected_over_billed_pct
    );

    let delinquency = &analysis.delinquency;
    println!("\nDelinquent portfolio");
    println!(
        "- {} unpaid properties owing {}",
        delinquency.unpaid_count,
        format_currency(delinquency.unpaid_tax_total)
    );

    let opportunities = &analysis.opportunities;
    println!("\nCadastral-update opportunities");
    println!(
        "- {} properties ({} without construction above median value, {} high delinquency)",
        opportunities.count,
        opportunities.zero_construction_count,
        opportunities.high_delinquency_count
    );
    render_rows(&opportunities.rows);

    let collection = &analysis.collection;
    println!(
        "\nCollection strategy (top {} unpaid)",
        collection.target_limit
    );
    render_rows(&collection.rows);

    let scenarios = &analysis.scenarios;
    println!("\nRecovery scenarios");
    println!("- Total unpaid: {}", format_currency(scenarios.total_unpaid));
    for scenario in &scenarios.scenarios {
        println!(
            "- {}% recovery: {}",
            scenario.coverage_pct,
            format_currency(scenario.recoverable)
        );
    }

    println!("\nGeospatial risk");
    for row in analysis.risk.rows.iter().take(PREVIEW_ROWS) {
        println!(
            "- {} total {:.2} (fiscal {}, cadastral {}, behavioral {})",
            row.property.cadastral_code,
            row.total_risk,
            row.fiscal_risk,
            row.cadastral_risk,
            row.behavioral_risk
        );
    }
}

fn render_kpis(label: &str, kpis: &SummaryKpis) {
    println!(
        "- {}: {} properties, assessed {}, tax {}, collected {}, discounts {}, balance {}",
        label,
        kpis.properties,
        format_currency(kpis.assessed_total),
        format_currency(kpis.tax_total),
        format_currency(kpis.collected_total),
        format_currency(kpis.discount_total),
        format_currency(kpis.balance_total)
    );
}

fn render_rows(rows: &[PropertyRow]) {
    if rows.is_empty() {
        println!("- none");
        return;
    }

    for row in rows.iter().take(PREVIEW_ROWS) {
        println!(
            "- {} ({}), tax {}, balance {}",
            row.cadastral_code,
            row.land_use,
            format_currency(row.tax_due),
            format_currency(row.balance)
        );
    }
    if rows.len() > PREVIEW_ROWS {
        println!("- ... {} more", rows.len() - PREVIEW_ROWS);
    }
}
