use crate::infra::{parse_bedrooms, parse_cents};
use clap::{ArgAction, Args};
use homelord::error::AppError;
use homelord::underwriting::{
    analyze_batch, analyze_sheet, format_percent, format_usd, BatchOutcome, BedroomCategory,
    FactSheet, FactSheetImporter, RiskNotes,
};
use rust_decimal::Decimal;
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Purchase price in dollars
    #[arg(long = "price", value_parser = parse_cents)]
    pub(crate) price_cents: i64,
    /// Bedrooms in the rentable unit (studio, 1, 2, 3)
    #[arg(long, value_parser = parse_bedrooms)]
    pub(crate) bedrooms: BedroomCategory,
    /// Whether the basement has its own entrance
    #[arg(long, action = ArgAction::Set)]
    pub(crate) separate_entrance: bool,
    /// Down payment as a fraction of price (default 0.035)
    #[arg(long)]
    pub(crate) down_payment_rate: Option<Decimal>,
    /// Annual interest rate as a fraction (default 0.065)
    #[arg(long)]
    pub(crate) interest_rate: Option<Decimal>,
    /// Annual PMI rate on the loan amount (default 0.005)
    #[arg(long)]
    pub(crate) pmi_rate: Option<Decimal>,
    /// Annual property tax rate on the price (default 0.006)
    #[arg(long)]
    pub(crate) tax_rate: Option<Decimal>,
    /// Monthly home insurance in dollars (default 100)
    #[arg(long = "insurance", value_parser = parse_cents)]
    pub(crate) insurance_cents: Option<i64>,
    /// Monthly HOA dues in dollars (default 0)
    #[arg(long = "hoa", value_parser = parse_cents)]
    pub(crate) hoa_cents: Option<i64>,
    /// Expected rehab budget in dollars (default 5000)
    #[arg(long = "rehab", value_parser = parse_cents)]
    pub(crate) rehab_cents: Option<i64>,
    /// Basement ceiling height in feet, if known
    #[arg(long)]
    pub(crate) ceiling_feet: Option<Decimal>,
    /// A strength of the listing; repeat for several
    #[arg(long = "pro")]
    pub(crate) pros: Vec<String>,
    /// A weakness of the listing; repeat for several
    #[arg(long = "con")]
    pub(crate) cons: Vec<String>,
    /// Print the analysis as JSON instead of the markdown report
    #[arg(long)]
    pub(crate) json: bool,
}

impl AnalyzeArgs {
    fn fact_sheet(&self) -> FactSheet {
        let mut sheet = FactSheet::new(self.price_cents, self.bedrooms, self.separate_entrance);
        sheet.down_payment_rate = self.down_payment_rate;
        sheet.interest_rate_annual = self.interest_rate;
        sheet.pmi_rate_annual = self.pmi_rate;
        sheet.property_tax_rate_annual = self.tax_rate;
        sheet.home_insurance_monthly_cents = self.insurance_cents;
        sheet.hoa_monthly_cents = self.hoa_cents;
        sheet.rehab_cost_cents = self.rehab_cents;
        sheet.ceiling_height_feet = self.ceiling_feet;
        sheet
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Fact sheet CSV export to underwrite
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print results as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let deal = analyze_sheet(args.fact_sheet())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&deal)?);
        return Ok(());
    }

    let notes = RiskNotes {
        pros: args.pros,
        cons: args.cons,
    };
    println!("{}", deal.report(&notes));
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let sheets = FactSheetImporter::from_path(&args.csv)?;
    let outcomes = analyze_batch(sheets);

    if args.json {
        let rows: Vec<serde_json::Value> = outcomes.iter().map(outcome_json).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Underwrote {} listing(s) from {}", outcomes.len(), args.csv.display());
    for outcome in &outcomes {
        println!("{}", summary_line(outcome));
    }
    Ok(())
}

fn outcome_json(outcome: &BatchOutcome) -> serde_json::Value {
    match &outcome.result {
        Ok(deal) => json!({
            "label": outcome.label,
            "analysis": deal.analysis,
            "defaults_applied": deal.facts.defaults_applied,
        }),
        Err(err) => json!({
            "label": outcome.label,
            "error": err.to_string(),
        }),
    }
}

pub(crate) fn summary_line(outcome: &BatchOutcome) -> String {
    match &outcome.result {
        Ok(deal) => {
            let analysis = &deal.analysis;
            format!(
                "- {}: {} ({}) | PITI {} | offset {} | net {} | buying power {}",
                outcome.label,
                analysis.grade,
                analysis.status.label(),
                format_usd(analysis.monthly_piti_cents),
                format_percent(analysis.offset_ratio),
                format_usd(analysis.net_cost_to_live_cents),
                format_usd(analysis.standard_buying_power_price_cents),
            )
        }
        Err(err) => format!("- {}: rejected ({})", outcome.label, err),
    }
}
