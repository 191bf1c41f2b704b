use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::amortization::{self, PaymentModel};
use super::domain::{DealAnalysis, FactField, ListingFacts};
use super::error::InvalidFactsError;
use super::facts::{FactSheet, ResolvedFacts};
use super::rules;

/// Resolved facts together with the verdict computed from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnderwrittenDeal {
    pub facts: ResolvedFacts,
    pub analysis: DealAnalysis,
}

/// Resolves defaults on a fact sheet, then underwrites it.
pub fn analyze_sheet(sheet: FactSheet) -> Result<UnderwrittenDeal, InvalidFactsError> {
    let facts = sheet.resolve()?;
    let analysis = analyze(&facts.facts)?;
    Ok(UnderwrittenDeal { facts, analysis })
}

/// Underwrites a listing with the HomeLord Method.
///
/// Pure and deterministic: identical facts always produce an identical analysis,
/// and nothing is produced unless every figure could be computed.
pub fn analyze(facts: &ListingFacts) -> Result<DealAnalysis, InvalidFactsError> {
    facts.validate()?;

    let model = PaymentModel::from_facts(facts)?;
    let payment = model.monthly_payment(facts.purchase_price_cents);
    let monthly_piti_cents = amortization::round_cents(payment.total(), FactField::PurchasePrice)?;
    if monthly_piti_cents <= 0 {
        return Err(InvalidFactsError::ZeroPayment);
    }

    let projected_basement_income_cents =
        rules::projected_income_cents(facts.rentable_unit_bedrooms);
    let offset_ratio =
        Decimal::from(projected_basement_income_cents) / Decimal::from(monthly_piti_cents);
    let net_cost_to_live_cents = monthly_piti_cents - projected_basement_income_cents;
    let standard_buying_power_price_cents = model.price_for_payment(net_cost_to_live_cents)?;

    let (grade, fail_reasons) = rules::grade_deal(facts, offset_ratio);
    let payment_breakdown = amortization::breakdown(&payment, facts.purchase_price_cents)?;

    debug!(
        price_cents = facts.purchase_price_cents,
        piti_cents = monthly_piti_cents,
        %offset_ratio,
        %grade,
        "listing underwritten"
    );

    Ok(DealAnalysis {
        monthly_piti_cents,
        projected_basement_income_cents,
        offset_ratio,
        net_cost_to_live_cents,
        standard_buying_power_price_cents,
        grade,
        status: grade.status(),
        payment_breakdown,
        fail_reasons,
    })
}
