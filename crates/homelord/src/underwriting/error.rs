use rust_decimal::Decimal;

use super::domain::FactField;

/// Malformed listing facts. Always fatal for the request that carried them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidFactsError {
    #[error("purchase price must be positive (found {purchase_price_cents} cents)")]
    NonPositivePrice { purchase_price_cents: i64 },
    #[error("{field} cannot be negative (found {cents} cents)")]
    NegativeAmount { field: FactField, cents: i64 },
    #[error("{field} must be between 0 and 1 (found {rate})")]
    RateOutOfRange { field: FactField, rate: Decimal },
    #[error("ceiling height must be positive when known (found {feet}ft)")]
    NonPositiveCeiling { feet: Decimal },
    #[error("unrecognized rentable unit bedroom category '{value}'")]
    UnknownBedroomCategory { value: String },
    #[error("monthly payment resolves to zero; the listing facts cannot describe a real deal")]
    ZeroPayment,
    #[error("{field} produces a payment outside the representable range")]
    Overflow { field: FactField },
}
