use rust_decimal::Decimal;

use super::domain::{BedroomCategory, FailReason, Grade, ListingFacts};

/// Highest HOA the rubric tolerates before failing the deal outright.
pub const HOA_LIMIT_CENTS: i64 = 15_000;

/// Policy rent for the rentable unit, indexed in [`BedroomCategory::ordered`] order.
pub const BASEMENT_RENT_CENTS: [(BedroomCategory, i64); 3] = [
    (BedroomCategory::StudioOr1Br, 110_000),
    (BedroomCategory::TwoBr, 155_000),
    (BedroomCategory::ThreeBr, 180_000),
];

pub fn minimum_ceiling_feet() -> Decimal {
    Decimal::from(7)
}

pub fn projected_income_cents(category: BedroomCategory) -> i64 {
    BASEMENT_RENT_CENTS[category.index()].1
}

/// Lower bound of an offset band, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetBand {
    pub floor: Decimal,
    pub grade: Grade,
}

/// Offset bands from best to worst; the first band whose floor is met wins.
pub fn offset_bands() -> [OffsetBand; 4] {
    [
        OffsetBand {
            floor: Decimal::new(50, 2),
            grade: Grade::APlus,
        },
        OffsetBand {
            floor: Decimal::new(40, 2),
            grade: Grade::A,
        },
        OffsetBand {
            floor: Decimal::new(30, 2),
            grade: Grade::B,
        },
        OffsetBand {
            floor: Decimal::MIN,
            grade: Grade::C,
        },
    ]
}

pub fn grade_for_offset(offset_ratio: Decimal) -> Grade {
    offset_bands()
        .into_iter()
        .find(|band| offset_ratio >= band.floor)
        .map_or(Grade::C, |band| band.grade)
}

/// Every disqualifier the listing trips, in rubric order.
pub fn fail_reasons(facts: &ListingFacts) -> Vec<FailReason> {
    let mut reasons = Vec::new();

    if !facts.has_separate_basement_entrance {
        reasons.push(FailReason::NoSeparateEntrance);
    }

    if facts.hoa_monthly_cents > HOA_LIMIT_CENTS {
        reasons.push(FailReason::HoaAboveLimit {
            hoa_monthly_cents: facts.hoa_monthly_cents,
            limit_cents: HOA_LIMIT_CENTS,
        });
    }

    // unknown height passes
    if let Some(feet) = facts.ceiling_height_feet {
        let minimum = minimum_ceiling_feet();
        if feet < minimum {
            reasons.push(FailReason::CeilingTooLow {
                ceiling_height_feet: feet,
                minimum_feet: minimum,
            });
        }
    }

    reasons
}

pub fn grade_deal(facts: &ListingFacts, offset_ratio: Decimal) -> (Grade, Vec<FailReason>) {
    let reasons = fail_reasons(facts);
    if reasons.is_empty() {
        (grade_for_offset(offset_ratio), reasons)
    } else {
        (Grade::F, reasons)
    }
}
