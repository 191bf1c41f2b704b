//! Fixed-rate mortgage payment model.
//!
//! For a fixed down-payment rate every monthly cost is either proportional to the
//! purchase price or a flat amount, so the whole payment is affine in price:
//! `payment(price) = price * price_coefficient + fixed_monthly`. The forward
//! payment and the buying-power solve both read from that one model.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

use super::domain::{FactField, ListingFacts, PaymentBreakdown};
use super::error::InvalidFactsError;

pub const TERM_MONTHS: i64 = 360;
const MONTHS_PER_YEAR: i64 = 12;

/// Monthly cost of a listing, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyPayment {
    pub loan_amount: Decimal,
    pub principal_interest: Decimal,
    pub property_tax: Decimal,
    pub home_insurance: Decimal,
    pub pmi: Decimal,
    pub hoa: Decimal,
}

impl MonthlyPayment {
    pub fn total(&self) -> Decimal {
        self.principal_interest + self.property_tax + self.home_insurance + self.pmi + self.hoa
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentModel {
    loan_to_price: Decimal,
    amortization_factor: Decimal,
    monthly_tax_rate: Decimal,
    monthly_pmi_rate: Decimal,
    home_insurance: Decimal,
    hoa: Decimal,
}

impl PaymentModel {
    pub fn from_facts(facts: &ListingFacts) -> Result<Self, InvalidFactsError> {
        let months = Decimal::from(MONTHS_PER_YEAR);
        Ok(Self {
            loan_to_price: Decimal::ONE - facts.down_payment_rate,
            amortization_factor: amortization_factor(facts.interest_rate_annual)?,
            monthly_tax_rate: facts.property_tax_rate_annual / months,
            monthly_pmi_rate: facts.pmi_rate_annual / months,
            home_insurance: Decimal::from(facts.home_insurance_monthly_cents),
            hoa: Decimal::from(facts.hoa_monthly_cents),
        })
    }

    /// Monthly payment added per cent of purchase price.
    pub fn price_coefficient(&self) -> Decimal {
        self.loan_to_price * self.amortization_factor
            + self.monthly_tax_rate
            + self.loan_to_price * self.monthly_pmi_rate
    }

    /// Portion of the payment that does not scale with price.
    pub fn fixed_monthly(&self) -> Decimal {
        self.home_insurance + self.hoa
    }

    pub fn monthly_payment(&self, purchase_price_cents: i64) -> MonthlyPayment {
        let price = Decimal::from(purchase_price_cents);
        let loan_amount = price * self.loan_to_price;
        MonthlyPayment {
            loan_amount,
            principal_interest: loan_amount * self.amortization_factor,
            property_tax: price * self.monthly_tax_rate,
            home_insurance: self.home_insurance,
            pmi: loan_amount * self.monthly_pmi_rate,
            hoa: self.hoa,
        }
    }

    /// Purchase price whose full monthly payment equals `payment_cents`.
    ///
    /// Zero when the payment cannot even cover the flat costs, or when the
    /// payment does not depend on price at all.
    pub fn price_for_payment(&self, payment_cents: i64) -> Result<i64, InvalidFactsError> {
        if payment_cents <= 0 {
            return Ok(0);
        }

        let available = Decimal::from(payment_cents) - self.fixed_monthly();
        let coefficient = self.price_coefficient();
        if available <= Decimal::ZERO || coefficient.is_zero() {
            return Ok(0);
        }

        let price = available
            .checked_div(coefficient)
            .ok_or(InvalidFactsError::Overflow {
                field: FactField::PurchasePrice,
            })?;
        round_cents(price, FactField::PurchasePrice)
    }
}

/// Monthly rates below this are amortized with the first-order expansion of the
/// annuity factor; the closed form loses too many digits to the 28 digit mantissa.
fn small_rate_cutoff() -> Decimal {
    Decimal::new(1, 12)
}

/// P&I per dollar borrowed for a 360 month fixed-rate loan.
fn amortization_factor(interest_rate_annual: Decimal) -> Result<Decimal, InvalidFactsError> {
    let term = Decimal::from(TERM_MONTHS);
    let monthly_rate = interest_rate_annual / Decimal::from(MONTHS_PER_YEAR);
    if monthly_rate < small_rate_cutoff() {
        // 1/n + r(n + 1)/2n
        return Ok(Decimal::ONE / term
            + monthly_rate * (term + Decimal::ONE) / (term * Decimal::TWO));
    }

    let overflow = || InvalidFactsError::Overflow {
        field: FactField::InterestRateAnnual,
    };
    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(TERM_MONTHS)
        .ok_or_else(overflow)?;

    // r / (1 - (1 + r)^-n) == r * g / (g - 1) with g = (1 + r)^n
    monthly_rate
        .checked_mul(growth)
        .and_then(|scaled| scaled.checked_div(growth - Decimal::ONE))
        .ok_or_else(overflow)
}

pub(crate) fn round_cents(value: Decimal, field: FactField) -> Result<i64, InvalidFactsError> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(InvalidFactsError::Overflow { field })
}

pub(crate) fn breakdown(
    payment: &MonthlyPayment,
    purchase_price_cents: i64,
) -> Result<PaymentBreakdown, InvalidFactsError> {
    let loan_amount_cents = round_cents(payment.loan_amount, FactField::PurchasePrice)?;
    Ok(PaymentBreakdown {
        loan_amount_cents,
        down_payment_cents: purchase_price_cents - loan_amount_cents,
        principal_interest_cents: round_cents(
            payment.principal_interest,
            FactField::InterestRateAnnual,
        )?,
        property_tax_cents: round_cents(payment.property_tax, FactField::PropertyTaxRateAnnual)?,
        home_insurance_cents: round_cents(payment.home_insurance, FactField::HomeInsuranceMonthly)?,
        pmi_cents: round_cents(payment.pmi, FactField::PmiRateAnnual)?,
        hoa_cents: round_cents(payment.hoa, FactField::HoaMonthly)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::underwriting::domain::BedroomCategory;

    fn facts(price_dollars: i64) -> ListingFacts {
        ListingFacts::with_defaults(price_dollars * 100, BedroomCategory::TwoBr, true)
    }

    #[test]
    fn forward_payment_matches_amortization_table() {
        let model = PaymentModel::from_facts(&facts(300_000)).expect("model builds");
        let payment = model.monthly_payment(30_000_000);

        assert_eq!(payment.loan_amount, Decimal::from(28_950_000));
        assert_eq!(round_cents(payment.principal_interest, FactField::InterestRateAnnual), Ok(182_984));
        assert_eq!(payment.property_tax, Decimal::from(15_000));
        assert_eq!(payment.pmi, Decimal::new(1_206_250, 2));
        assert_eq!(round_cents(payment.total(), FactField::PurchasePrice), Ok(220_046));
    }

    #[test]
    fn zero_rate_spreads_principal_evenly() {
        let mut listing = facts(360_000);
        listing.interest_rate_annual = Decimal::ZERO;
        let model = PaymentModel::from_facts(&listing).expect("model builds");
        let payment = model.monthly_payment(36_000_000);

        assert_eq!(payment.loan_amount, Decimal::from(34_740_000));
        assert_eq!(
            round_cents(payment.principal_interest, FactField::InterestRateAnnual),
            Ok(96_500)
        );
    }

    #[test]
    fn vanishing_rates_amortize_like_a_zero_rate_loan() {
        let zero_rate = amortization_factor(Decimal::ZERO).expect("factor computes");
        for rate in [Decimal::new(1, 28), Decimal::new(1, 20), Decimal::new(1, 14)] {
            let factor = amortization_factor(rate).expect("factor computes");
            assert!(factor >= zero_rate, "factor for {rate} fell below 1/360");
            assert!(factor - zero_rate < Decimal::new(1, 12), "factor for {rate} drifted");
        }
    }

    #[test]
    fn small_rate_expansion_meets_closed_form_at_cutoff() {
        let cutoff_annual = small_rate_cutoff() * Decimal::from(MONTHS_PER_YEAR);
        let below = amortization_factor(cutoff_annual - Decimal::new(1, 24)).expect("expansion");
        let above = amortization_factor(cutoff_annual).expect("closed form");
        let drift = ((above - below) / below).abs();
        assert!(drift < Decimal::new(1, 9), "relative drift {drift} at cutoff");
    }

    #[test]
    fn reverse_solve_inverts_forward_payment() {
        let model = PaymentModel::from_facts(&facts(300_000)).expect("model builds");
        let price = model.price_for_payment(65_046).expect("solve succeeds");
        assert_eq!(price, 7_861_985);

        let payment = model.monthly_payment(price).total();
        let diff = (payment - Decimal::from(65_046)).abs();
        assert!(diff < Decimal::ONE, "round trip drifted by {diff} cents");
    }

    #[test]
    fn reverse_solve_is_zero_when_flat_costs_are_not_covered() {
        let model = PaymentModel::from_facts(&facts(300_000)).expect("model builds");
        assert_eq!(model.price_for_payment(0), Ok(0));
        assert_eq!(model.price_for_payment(-12_000), Ok(0));
        assert_eq!(model.price_for_payment(10_000), Ok(0));
        assert!(model.price_for_payment(10_001).expect("solve succeeds") > 0);
    }

    #[test]
    fn reverse_solve_is_zero_when_payment_ignores_price() {
        let mut listing = facts(300_000);
        listing.down_payment_rate = Decimal::ONE;
        listing.property_tax_rate_annual = Decimal::ZERO;
        let model = PaymentModel::from_facts(&listing).expect("model builds");
        assert!(model.price_coefficient().is_zero());
        assert_eq!(model.price_for_payment(50_000), Ok(0));
    }
}
