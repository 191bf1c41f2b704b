use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::{DealAnalysis, FactField, ListingFacts};
use super::engine::UnderwrittenDeal;

const DISCLAIMER: &str = "*Analysis based on listing data. Deep investigation required.*";

/// Qualitative observations supplied alongside the facts by the research step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskNotes {
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
}

/// Markdown verdict in the fixed HomeLord layout.
#[derive(Debug, Clone, Copy)]
pub struct DealReport<'a> {
    facts: &'a ListingFacts,
    analysis: &'a DealAnalysis,
    notes: Option<&'a RiskNotes>,
    defaults_applied: &'a [FactField],
}

impl<'a> DealReport<'a> {
    pub fn new(facts: &'a ListingFacts, analysis: &'a DealAnalysis) -> Self {
        Self {
            facts,
            analysis,
            notes: None,
            defaults_applied: &[],
        }
    }

    pub fn with_notes(mut self, notes: &'a RiskNotes) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn with_defaults_applied(mut self, fields: &'a [FactField]) -> Self {
        self.defaults_applied = fields;
        self
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl UnderwrittenDeal {
    pub fn report<'a>(&'a self, notes: &'a RiskNotes) -> DealReport<'a> {
        DealReport::new(&self.facts.facts, &self.analysis)
            .with_notes(notes)
            .with_defaults_applied(&self.facts.defaults_applied)
    }
}

impl fmt::Display for DealReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.analysis;
        let list_price = format_usd(self.facts.purchase_price_cents);
        let net_cost = format_usd(analysis.net_cost_to_live_cents);
        let buying_power = format_usd(analysis.standard_buying_power_price_cents);

        writeln!(f, "---")?;
        writeln!(f, "**HOMELORD DEAL SCORE: {}**", analysis.grade)?;
        writeln!(f, "**Status:** {}", analysis.status.label())?;
        writeln!(f)?;

        writeln!(f, "**THE NUMBERS**")?;
        writeln!(f, "* **List Price:** {list_price}")?;
        writeln!(
            f,
            "* **Total Monthly Payment (PITI):** {}",
            format_usd(analysis.monthly_piti_cents)
        )?;
        writeln!(
            f,
            "* **Est. Basement Rent:** {}",
            format_usd(analysis.projected_basement_income_cents)
        )?;
        if analysis.net_cost_to_live_cents >= 0 {
            writeln!(
                f,
                "* **Net Cost to Live:** {net_cost} *(You save {}/mo)*",
                format_usd(analysis.monthly_savings_cents())
            )?;
        } else {
            writeln!(
                f,
                "* **Net Cost to Live:** {net_cost} *(The rent covers PITI with {}/mo to spare)*",
                format_usd(-analysis.net_cost_to_live_cents)
            )?;
        }
        writeln!(f, "* **Offset:** {}", format_percent(analysis.offset_ratio))?;
        writeln!(f)?;

        writeln!(f, "**THE \"WHY\"**")?;
        writeln!(f, "* **Standard Buying Power:** {buying_power}")?;
        if analysis.standard_buying_power_price_cents > 0 {
            writeln!(
                f,
                "  *(Note: Without house hacking, a monthly payment of {net_cost} would only allow \
                 you to buy a house at this price point. This deal gives you {list_price} of value \
                 for {buying_power} of payment.)*"
            )?;
        } else {
            writeln!(
                f,
                "  *(Note: A monthly payment of {net_cost} does not support a conventional purchase \
                 on its own. This deal gives you {list_price} of value without that payment.)*"
            )?;
        }
        writeln!(f)?;

        writeln!(f, "**RISK ANALYSIS**")?;
        let (pros, cons) = match self.notes {
            Some(notes) => (notes.pros.as_slice(), notes.cons.as_slice()),
            None => (&[][..], &[][..]),
        };
        write_list(f, "Pros", pros.iter().map(String::as_str))?;
        let disqualifiers: Vec<String> = analysis
            .fail_reasons
            .iter()
            .map(|reason| format!("Disqualified: {}", reason.summary()))
            .collect();
        write_list(
            f,
            "Cons",
            disqualifiers
                .iter()
                .map(String::as_str)
                .chain(cons.iter().map(String::as_str)),
        )?;
        writeln!(f)?;

        if !self.defaults_applied.is_empty() {
            let labels: Vec<&str> = self
                .defaults_applied
                .iter()
                .map(|field| field.label())
                .collect();
            writeln!(f, "**ASSUMPTIONS:** defaults used for {}", labels.join(", "))?;
            writeln!(f)?;
        }

        writeln!(f, "**DISCLAIMER:**")?;
        writeln!(f, "{DISCLAIMER}")?;
        write!(f, "---")
    }
}

fn write_list<'a>(
    f: &mut fmt::Formatter<'_>,
    heading: &str,
    items: impl Iterator<Item = &'a str>,
) -> fmt::Result {
    writeln!(f, "* **{heading}:**")?;
    let mut empty = true;
    for item in items {
        empty = false;
        writeln!(f, "  * {item}")?;
    }
    if empty {
        writeln!(f, "  * None noted")?;
    }
    Ok(())
}

/// Formats cents as dollars with thousands separators, e.g. `-$1,234.56`.
pub fn format_usd(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    let dollars = (magnitude / 100).to_string();
    let remainder = magnitude % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (index, digit) in dollars.chars().enumerate() {
        if index > 0 && (dollars.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{remainder:02}")
}

/// Formats a ratio as a percentage with one decimal, e.g. `0.7044` as `70.4%`.
pub fn format_percent(ratio: Decimal) -> String {
    let percent = (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{percent:.1}%")
}
