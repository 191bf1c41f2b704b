use axum::body::to_bytes;
use axum::response::Response;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::underwriting::domain::{BedroomCategory, ListingFacts};

pub(super) fn dollars(amount: i64) -> i64 {
    amount * 100
}

pub(super) fn rate(raw: &str) -> Decimal {
    raw.parse().expect("valid decimal literal")
}

/// $300,000 listing with a two bedroom basement, an entrance, and 7.5ft ceilings.
pub(super) fn maple_street() -> ListingFacts {
    let mut facts = ListingFacts::with_defaults(dollars(300_000), BedroomCategory::TwoBr, true);
    facts.ceiling_height_feet = Some(rate("7.5"));
    facts
}

pub(super) fn listing(price_dollars: i64, bedrooms: BedroomCategory) -> ListingFacts {
    ListingFacts::with_defaults(dollars(price_dollars), bedrooms, true)
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}
