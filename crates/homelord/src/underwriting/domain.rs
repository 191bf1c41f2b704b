use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::error::InvalidFactsError;
use super::report::format_usd;

/// Bedroom count of the rentable (basement) unit only, never the whole house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BedroomCategory {
    StudioOr1Br,
    TwoBr,
    ThreeBr,
}

impl BedroomCategory {
    pub fn ordered() -> [BedroomCategory; 3] {
        [
            BedroomCategory::StudioOr1Br,
            BedroomCategory::TwoBr,
            BedroomCategory::ThreeBr,
        ]
    }

    /// Position of the category in [`BedroomCategory::ordered`].
    pub(crate) fn index(self) -> usize {
        match self {
            BedroomCategory::StudioOr1Br => 0,
            BedroomCategory::TwoBr => 1,
            BedroomCategory::ThreeBr => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BedroomCategory::StudioOr1Br => "studio_or_1br",
            BedroomCategory::TwoBr => "two_br",
            BedroomCategory::ThreeBr => "three_br",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BedroomCategory::StudioOr1Br => "Studio/1 Bed",
            BedroomCategory::TwoBr => "2 Bed",
            BedroomCategory::ThreeBr => "3 Bed",
        }
    }

    /// Maps a literal bedroom count; studios count as zero.
    pub fn from_count(count: u64) -> Result<Self, InvalidFactsError> {
        match count {
            0 | 1 => Ok(BedroomCategory::StudioOr1Br),
            2 => Ok(BedroomCategory::TwoBr),
            3 => Ok(BedroomCategory::ThreeBr),
            other => Err(InvalidFactsError::UnknownBedroomCategory {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for BedroomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BedroomCategory {
    type Err = InvalidFactsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "studio_or_1br" | "studio" | "1" | "1br" | "1_br" | "1_bed" => {
                Ok(BedroomCategory::StudioOr1Br)
            }
            "two_br" | "2" | "2br" | "2_br" | "2_bed" => Ok(BedroomCategory::TwoBr),
            "three_br" | "3" | "3br" | "3_br" | "3_bed" => Ok(BedroomCategory::ThreeBr),
            _ => Err(InvalidFactsError::UnknownBedroomCategory {
                value: raw.to_string(),
            }),
        }
    }
}

impl Serialize for BedroomCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BedroomCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoryVisitor;

        impl<'de> Visitor<'de> for CategoryVisitor {
            type Value = BedroomCategory;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a bedroom category such as \"studio_or_1br\", \"2br\", or 3")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                BedroomCategory::from_count(value).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                let count = u64::try_from(value).map_err(|_| {
                    E::custom(InvalidFactsError::UnknownBedroomCategory {
                        value: value.to_string(),
                    })
                })?;
                self.visit_u64(count)
            }
        }

        deserializer.deserialize_any(CategoryVisitor)
    }
}

/// Names each listing fact, used to audit defaults and attribute validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactField {
    PurchasePrice,
    DownPaymentRate,
    InterestRateAnnual,
    PmiRateAnnual,
    PropertyTaxRateAnnual,
    HomeInsuranceMonthly,
    HoaMonthly,
    RehabCost,
    CeilingHeightFeet,
}

impl FactField {
    pub fn label(self) -> &'static str {
        match self {
            FactField::PurchasePrice => "purchase price",
            FactField::DownPaymentRate => "down payment rate",
            FactField::InterestRateAnnual => "interest rate",
            FactField::PmiRateAnnual => "PMI rate",
            FactField::PropertyTaxRateAnnual => "property tax rate",
            FactField::HomeInsuranceMonthly => "home insurance",
            FactField::HoaMonthly => "HOA dues",
            FactField::RehabCost => "rehab cost",
            FactField::CeilingHeightFeet => "ceiling height",
        }
    }
}

impl fmt::Display for FactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Listing facts consumed by the engine. Rates are annual fractions; money is in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFacts {
    pub purchase_price_cents: i64,
    pub rentable_unit_bedrooms: BedroomCategory,
    pub down_payment_rate: Decimal,
    pub interest_rate_annual: Decimal,
    pub pmi_rate_annual: Decimal,
    pub property_tax_rate_annual: Decimal,
    pub home_insurance_monthly_cents: i64,
    pub hoa_monthly_cents: i64,
    pub rehab_cost_cents: i64,
    pub has_separate_basement_entrance: bool,
    pub ceiling_height_feet: Option<Decimal>,
}

/// Letter grade assigned by the HomeLord rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grade {
    F,
    C,
    B,
    A,
    APlus,
}

impl Grade {
    pub fn symbol(self) -> &'static str {
        match self {
            Grade::F => "F",
            Grade::C => "C",
            Grade::B => "B",
            Grade::A => "A",
            Grade::APlus => "A+",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::F => "FAIL",
            Grade::C => "PASS",
            Grade::B => "GOOD",
            Grade::A => "GREAT",
            Grade::APlus => "UNICORN",
        }
    }

    pub fn status(self) -> DealStatus {
        if self == Grade::F {
            DealStatus::NotViable
        } else {
            DealStatus::Viable
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DealStatus {
    Viable,
    NotViable,
}

impl DealStatus {
    pub fn label(self) -> &'static str {
        match self {
            DealStatus::Viable => "Viable",
            DealStatus::NotViable => "Not Viable",
        }
    }
}

/// Disqualifying condition that forces an `F` regardless of offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailReason {
    NoSeparateEntrance,
    HoaAboveLimit {
        hoa_monthly_cents: i64,
        limit_cents: i64,
    },
    CeilingTooLow {
        ceiling_height_feet: Decimal,
        minimum_feet: Decimal,
    },
}

impl FailReason {
    pub fn summary(&self) -> String {
        match self {
            FailReason::NoSeparateEntrance => "no separate basement entrance".to_string(),
            FailReason::HoaAboveLimit {
                hoa_monthly_cents,
                limit_cents,
            } => format!(
                "HOA of {}/mo exceeds the {} limit",
                format_usd(*hoa_monthly_cents),
                format_usd(*limit_cents)
            ),
            FailReason::CeilingTooLow {
                ceiling_height_feet,
                minimum_feet,
            } => format!(
                "ceiling height {}ft below the {}ft minimum",
                ceiling_height_feet, minimum_feet
            ),
        }
    }
}

/// Monthly payment components, each rounded to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub loan_amount_cents: i64,
    pub down_payment_cents: i64,
    pub principal_interest_cents: i64,
    pub property_tax_cents: i64,
    pub home_insurance_cents: i64,
    pub pmi_cents: i64,
    pub hoa_cents: i64,
}

/// Underwriting verdict, fully derived from a [`ListingFacts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealAnalysis {
    pub monthly_piti_cents: i64,
    pub projected_basement_income_cents: i64,
    pub offset_ratio: Decimal,
    pub net_cost_to_live_cents: i64,
    pub standard_buying_power_price_cents: i64,
    pub grade: Grade,
    pub status: DealStatus,
    pub payment_breakdown: PaymentBreakdown,
    pub fail_reasons: Vec<FailReason>,
}

impl DealAnalysis {
    /// Monthly amount the rentable unit saves relative to carrying the full PITI.
    pub fn monthly_savings_cents(&self) -> i64 {
        self.monthly_piti_cents - self.net_cost_to_live_cents
    }
}
