use super::common::*;
use rust_decimal::Decimal;

use crate::underwriting::domain::{BedroomCategory, DealStatus, FailReason, Grade};
use crate::underwriting::rules::{
    fail_reasons, grade_deal, grade_for_offset, offset_bands, projected_income_cents,
    BASEMENT_RENT_CENTS,
};

#[test]
fn rent_table_covers_every_category_in_order() {
    let categories: Vec<BedroomCategory> =
        BASEMENT_RENT_CENTS.iter().map(|(category, _)| *category).collect();
    assert_eq!(categories, BedroomCategory::ordered().to_vec());

    assert_eq!(projected_income_cents(BedroomCategory::StudioOr1Br), dollars(1_100));
    assert_eq!(projected_income_cents(BedroomCategory::TwoBr), dollars(1_550));
    assert_eq!(projected_income_cents(BedroomCategory::ThreeBr), dollars(1_800));
}

#[test]
fn offset_bands_are_ordered_best_first() {
    let bands = offset_bands();
    for pair in bands.windows(2) {
        assert!(pair[0].floor > pair[1].floor);
        assert!(pair[0].grade > pair[1].grade);
    }
}

#[test]
fn lowest_band_catches_every_offset() {
    let lowest = offset_bands()[offset_bands().len() - 1];
    assert_eq!(lowest.floor, Decimal::MIN);
    assert_eq!(lowest.grade, Grade::C);
    assert_eq!(grade_for_offset(Decimal::MIN), Grade::C);
}

#[test]
fn band_floors_are_inclusive() {
    let cases = [
        ("0", Grade::C),
        ("0.2999", Grade::C),
        ("0.30", Grade::B),
        ("0.3999", Grade::B),
        ("0.40", Grade::A),
        ("0.4999", Grade::A),
        ("0.50", Grade::APlus),
        ("0.90", Grade::APlus),
        ("1.75", Grade::APlus),
    ];
    for (offset, expected) in cases {
        assert_eq!(grade_for_offset(rate(offset)), expected, "offset {offset}");
    }
}

#[test]
fn disqualifiers_are_reported_together_in_rubric_order() {
    let mut facts = maple_street();
    facts.has_separate_basement_entrance = false;
    facts.hoa_monthly_cents = 15_001;
    facts.ceiling_height_feet = Some(rate("6.5"));

    let reasons = fail_reasons(&facts);

    assert!(matches!(
        reasons.as_slice(),
        [
            FailReason::NoSeparateEntrance,
            FailReason::HoaAboveLimit { .. },
            FailReason::CeilingTooLow { .. }
        ]
    ));
    let (grade, _) = grade_deal(&facts, rate("0.90"));
    assert_eq!(grade, Grade::F);
}

#[test]
fn failing_takes_precedence_over_offset() {
    let mut facts = maple_street();
    facts.has_separate_basement_entrance = false;

    let (grade, reasons) = grade_deal(&facts, Decimal::ONE);

    assert_eq!(grade, Grade::F);
    assert_eq!(grade.status(), DealStatus::NotViable);
    assert_eq!(reasons, vec![FailReason::NoSeparateEntrance]);
}

#[test]
fn grades_expose_symbols_and_status() {
    assert_eq!(Grade::APlus.to_string(), "A+");
    assert_eq!(Grade::APlus.label(), "UNICORN");
    assert_eq!(Grade::F.label(), "FAIL");
    assert_eq!(Grade::C.status(), DealStatus::Viable);
    assert_eq!(
        serde_json::to_value(Grade::APlus).expect("serializes"),
        serde_json::json!("A_PLUS")
    );
    assert_eq!(
        serde_json::to_value(DealStatus::NotViable).expect("serializes"),
        serde_json::json!("NOT_VIABLE")
    );
}
