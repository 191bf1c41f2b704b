use super::common::*;
use rust_decimal::Decimal;
use serde_json::json;

use crate::underwriting::domain::{BedroomCategory, FactField, ListingFacts};
use crate::underwriting::error::InvalidFactsError;
use crate::underwriting::facts::{FactDefaults, FactSheet};

#[test]
fn absent_facts_resolve_to_documented_defaults() {
    let sheet = FactSheet::new(dollars(300_000), BedroomCategory::TwoBr, true);

    let resolved = sheet.resolve().expect("sheet resolves");

    assert_eq!(
        resolved.facts,
        ListingFacts::with_defaults(dollars(300_000), BedroomCategory::TwoBr, true)
    );
    assert_eq!(
        resolved.defaults_applied,
        vec![
            FactField::DownPaymentRate,
            FactField::InterestRateAnnual,
            FactField::PmiRateAnnual,
            FactField::PropertyTaxRateAnnual,
            FactField::HomeInsuranceMonthly,
            FactField::HoaMonthly,
            FactField::RehabCost,
        ]
    );
    assert_eq!(resolved.facts.ceiling_height_feet, None);
}

#[test]
fn defaults_match_the_homelord_assumptions() {
    let defaults = FactDefaults::default();

    assert_eq!(defaults.down_payment_rate, rate("0.035"));
    assert_eq!(defaults.interest_rate_annual, rate("0.065"));
    assert_eq!(defaults.pmi_rate_annual, rate("0.005"));
    assert_eq!(defaults.property_tax_rate_annual, rate("0.006"));
    assert_eq!(defaults.home_insurance_monthly_cents, dollars(100));
    assert_eq!(defaults.hoa_monthly_cents, 0);
    assert_eq!(defaults.rehab_cost_cents, dollars(5_000));
}

#[test]
fn explicit_zero_is_kept_and_not_reported_as_default() {
    let mut sheet = FactSheet::new(dollars(250_000), BedroomCategory::ThreeBr, true);
    sheet.home_insurance_monthly_cents = Some(0);
    sheet.interest_rate_annual = Some(Decimal::ZERO);
    sheet.rehab_cost_cents = Some(dollars(40_000));

    let resolved = sheet.resolve().expect("sheet resolves");

    assert_eq!(resolved.facts.home_insurance_monthly_cents, 0);
    assert_eq!(resolved.facts.interest_rate_annual, Decimal::ZERO);
    assert_eq!(resolved.facts.rehab_cost_cents, dollars(40_000));
    assert!(!resolved.used_default(FactField::HomeInsuranceMonthly));
    assert!(!resolved.used_default(FactField::InterestRateAnnual));
    assert!(!resolved.used_default(FactField::RehabCost));
    assert!(resolved.used_default(FactField::HoaMonthly));
}

#[test]
fn resolution_rejects_out_of_range_overrides() {
    let mut sheet = FactSheet::new(dollars(250_000), BedroomCategory::ThreeBr, true);
    sheet.property_tax_rate_annual = Some(rate("-0.01"));

    assert_eq!(
        sheet.resolve(),
        Err(InvalidFactsError::RateOutOfRange {
            field: FactField::PropertyTaxRateAnnual,
            rate: rate("-0.01"),
        })
    );

    let mut sheet = FactSheet::new(dollars(250_000), BedroomCategory::ThreeBr, true);
    sheet.rehab_cost_cents = Some(-500);
    assert!(matches!(
        sheet.resolve(),
        Err(InvalidFactsError::NegativeAmount {
            field: FactField::RehabCost,
            ..
        })
    ));
}

#[test]
fn fact_sheet_deserializes_from_research_json() {
    let payload = json!({
        "purchase_price_cents": 41_500_000,
        "rentable_unit_bedrooms": "2br",
        "has_separate_basement_entrance": true,
        "interest_rate_annual": 0.0625,
        "hoa_monthly_cents": 0,
        "ceiling_height_feet": "7.25"
    });

    let sheet: FactSheet = serde_json::from_value(payload).expect("sheet deserializes");

    assert_eq!(sheet.rentable_unit_bedrooms, BedroomCategory::TwoBr);
    assert_eq!(sheet.interest_rate_annual, Some(rate("0.0625")));
    assert_eq!(sheet.hoa_monthly_cents, Some(0));
    assert_eq!(sheet.down_payment_rate, None);
    assert_eq!(sheet.ceiling_height_feet, Some(rate("7.25")));
}

#[test]
fn bedroom_category_accepts_numeric_counts() {
    let sheet: FactSheet = serde_json::from_value(json!({
        "purchase_price_cents": 30_000_000,
        "rentable_unit_bedrooms": 3,
        "has_separate_basement_entrance": false
    }))
    .expect("sheet deserializes");
    assert_eq!(sheet.rentable_unit_bedrooms, BedroomCategory::ThreeBr);

    let err = serde_json::from_value::<FactSheet>(json!({
        "purchase_price_cents": 30_000_000,
        "rentable_unit_bedrooms": "penthouse",
        "has_separate_basement_entrance": true
    }))
    .expect_err("unknown category rejected");
    assert!(err.to_string().contains("penthouse"));
}

#[test]
fn bedroom_category_parses_aliases() {
    let cases = [
        ("studio", BedroomCategory::StudioOr1Br),
        ("1BR", BedroomCategory::StudioOr1Br),
        ("studio_or_1br", BedroomCategory::StudioOr1Br),
        ("2 bed", BedroomCategory::TwoBr),
        ("two_br", BedroomCategory::TwoBr),
        ("3-br", BedroomCategory::ThreeBr),
    ];
    for (raw, expected) in cases {
        assert_eq!(raw.parse::<BedroomCategory>(), Ok(expected), "alias {raw}");
    }

    assert_eq!(BedroomCategory::from_count(0), Ok(BedroomCategory::StudioOr1Br));
    assert!(matches!(
        BedroomCategory::from_count(4),
        Err(InvalidFactsError::UnknownBedroomCategory { .. })
    ));
    assert!("half".parse::<BedroomCategory>().is_err());
}

#[test]
fn bedroom_category_round_trips_its_canonical_name() {
    for category in BedroomCategory::ordered() {
        let encoded = serde_json::to_value(category).expect("serializes");
        assert_eq!(encoded, json!(category.as_str()));
        let decoded: BedroomCategory = serde_json::from_value(encoded).expect("deserializes");
        assert_eq!(decoded, category);
    }
}
