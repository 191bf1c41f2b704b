use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::{BedroomCategory, FactField, ListingFacts};
use super::error::InvalidFactsError;

/// Assumptions substituted for any fact the research step could not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactDefaults {
    pub down_payment_rate: Decimal,
    pub interest_rate_annual: Decimal,
    pub pmi_rate_annual: Decimal,
    pub property_tax_rate_annual: Decimal,
    pub home_insurance_monthly_cents: i64,
    pub hoa_monthly_cents: i64,
    pub rehab_cost_cents: i64,
}

impl FactDefaults {
    /// FHA down payment, Utah property tax, and cosmetic rehab assumptions.
    pub fn homelord() -> Self {
        Self {
            down_payment_rate: Decimal::new(35, 3),
            interest_rate_annual: Decimal::new(65, 3),
            pmi_rate_annual: Decimal::new(5, 3),
            property_tax_rate_annual: Decimal::new(6, 3),
            home_insurance_monthly_cents: 10_000,
            hoa_monthly_cents: 0,
            rehab_cost_cents: 500_000,
        }
    }
}

impl Default for FactDefaults {
    fn default() -> Self {
        Self::homelord()
    }
}

impl ListingFacts {
    /// Builds facts for a listing where only the required facts are known.
    pub fn with_defaults(
        purchase_price_cents: i64,
        rentable_unit_bedrooms: BedroomCategory,
        has_separate_basement_entrance: bool,
    ) -> Self {
        let defaults = FactDefaults::homelord();
        Self {
            purchase_price_cents,
            rentable_unit_bedrooms,
            down_payment_rate: defaults.down_payment_rate,
            interest_rate_annual: defaults.interest_rate_annual,
            pmi_rate_annual: defaults.pmi_rate_annual,
            property_tax_rate_annual: defaults.property_tax_rate_annual,
            home_insurance_monthly_cents: defaults.home_insurance_monthly_cents,
            hoa_monthly_cents: defaults.hoa_monthly_cents,
            rehab_cost_cents: defaults.rehab_cost_cents,
            has_separate_basement_entrance,
            ceiling_height_feet: None,
        }
    }

    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), InvalidFactsError> {
        if self.purchase_price_cents <= 0 {
            return Err(InvalidFactsError::NonPositivePrice {
                purchase_price_cents: self.purchase_price_cents,
            });
        }

        let rates = [
            (FactField::DownPaymentRate, self.down_payment_rate),
            (FactField::InterestRateAnnual, self.interest_rate_annual),
            (FactField::PmiRateAnnual, self.pmi_rate_annual),
            (FactField::PropertyTaxRateAnnual, self.property_tax_rate_annual),
        ];
        for (field, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(InvalidFactsError::RateOutOfRange { field, rate });
            }
        }

        let amounts = [
            (
                FactField::HomeInsuranceMonthly,
                self.home_insurance_monthly_cents,
            ),
            (FactField::HoaMonthly, self.hoa_monthly_cents),
            (FactField::RehabCost, self.rehab_cost_cents),
        ];
        for (field, cents) in amounts {
            if cents < 0 {
                return Err(InvalidFactsError::NegativeAmount { field, cents });
            }
        }

        if let Some(feet) = self.ceiling_height_feet {
            if feet <= Decimal::ZERO {
                return Err(InvalidFactsError::NonPositiveCeiling { feet });
            }
        }

        Ok(())
    }
}

/// Fact sheet as produced by the research step or typed in by hand.
///
/// `None` means the fact was not found and the documented default applies;
/// `Some(0)` is a genuine zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactSheet {
    pub purchase_price_cents: i64,
    pub rentable_unit_bedrooms: BedroomCategory,
    pub has_separate_basement_entrance: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_payment_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate_annual: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmi_rate_annual: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_tax_rate_annual: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_insurance_monthly_cents: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoa_monthly_cents: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rehab_cost_cents: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling_height_feet: Option<Decimal>,
}

impl FactSheet {
    pub fn new(
        purchase_price_cents: i64,
        rentable_unit_bedrooms: BedroomCategory,
        has_separate_basement_entrance: bool,
    ) -> Self {
        Self {
            purchase_price_cents,
            rentable_unit_bedrooms,
            has_separate_basement_entrance,
            down_payment_rate: None,
            interest_rate_annual: None,
            pmi_rate_annual: None,
            property_tax_rate_annual: None,
            home_insurance_monthly_cents: None,
            hoa_monthly_cents: None,
            rehab_cost_cents: None,
            ceiling_height_feet: None,
        }
    }

    /// Substitutes defaults for absent facts and validates the result.
    pub fn resolve(self) -> Result<ResolvedFacts, InvalidFactsError> {
        let defaults = FactDefaults::homelord();
        let mut defaults_applied = Vec::new();

        let mut pick = |field: FactField, value: Option<Decimal>, default: Decimal| {
            value.unwrap_or_else(|| {
                defaults_applied.push(field);
                default
            })
        };
        let down_payment_rate = pick(
            FactField::DownPaymentRate,
            self.down_payment_rate,
            defaults.down_payment_rate,
        );
        let interest_rate_annual = pick(
            FactField::InterestRateAnnual,
            self.interest_rate_annual,
            defaults.interest_rate_annual,
        );
        let pmi_rate_annual = pick(
            FactField::PmiRateAnnual,
            self.pmi_rate_annual,
            defaults.pmi_rate_annual,
        );
        let property_tax_rate_annual = pick(
            FactField::PropertyTaxRateAnnual,
            self.property_tax_rate_annual,
            defaults.property_tax_rate_annual,
        );

        let mut pick_cents = |field: FactField, value: Option<i64>, default: i64| {
            value.unwrap_or_else(|| {
                defaults_applied.push(field);
                default
            })
        };
        let home_insurance_monthly_cents = pick_cents(
            FactField::HomeInsuranceMonthly,
            self.home_insurance_monthly_cents,
            defaults.home_insurance_monthly_cents,
        );
        let hoa_monthly_cents = pick_cents(
            FactField::HoaMonthly,
            self.hoa_monthly_cents,
            defaults.hoa_monthly_cents,
        );
        let rehab_cost_cents = pick_cents(
            FactField::RehabCost,
            self.rehab_cost_cents,
            defaults.rehab_cost_cents,
        );

        let facts = ListingFacts {
            purchase_price_cents: self.purchase_price_cents,
            rentable_unit_bedrooms: self.rentable_unit_bedrooms,
            down_payment_rate,
            interest_rate_annual,
            pmi_rate_annual,
            property_tax_rate_annual,
            home_insurance_monthly_cents,
            hoa_monthly_cents,
            rehab_cost_cents,
            has_separate_basement_entrance: self.has_separate_basement_entrance,
            ceiling_height_feet: self.ceiling_height_feet,
        };
        facts.validate()?;

        Ok(ResolvedFacts {
            facts,
            defaults_applied,
        })
    }
}

/// Validated facts plus the audit trail of which defaults were substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFacts {
    pub facts: ListingFacts,
    pub defaults_applied: Vec<FactField>,
}

impl ResolvedFacts {
    pub fn used_default(&self, field: FactField) -> bool {
        self.defaults_applied.contains(&field)
    }
}
