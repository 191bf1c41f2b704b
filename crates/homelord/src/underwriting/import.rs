//! CSV import of fact sheets for batch underwriting.
//!
//! Headers use the fact-sheet field names plus an optional `label` column. Empty
//! cells are absent facts and resolve to defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::domain::BedroomCategory;
use super::engine::{analyze_sheet, UnderwrittenDeal};
use super::error::InvalidFactsError;
use super::facts::FactSheet;

#[derive(Debug, thiserror::Error)]
pub enum FactSheetImportError {
    #[error("failed to read fact sheet export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid fact sheet CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: missing required column '{column}'")]
    MissingValue { row: usize, column: &'static str },
    #[error("row {row}: column '{column}' has unparseable value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("row {row}: {source}")]
    Facts {
        row: usize,
        #[source]
        source: InvalidFactsError,
    },
}

/// Fact sheet plus the caller's name for the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledFactSheet {
    pub label: String,
    pub sheet: FactSheet,
}

/// Per-listing result of a batch run; one bad listing never aborts the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub label: String,
    pub result: Result<UnderwrittenDeal, InvalidFactsError>,
}

pub struct FactSheetImporter;

impl FactSheetImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<LabeledFactSheet>, FactSheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LabeledFactSheet>, FactSheetImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut sheets = Vec::new();

        for (index, record) in csv_reader.deserialize::<FactSheetRow>().enumerate() {
            let row = index + 1;
            sheets.push(record?.into_sheet(row)?);
        }

        Ok(sheets)
    }
}

pub fn analyze_batch(sheets: Vec<LabeledFactSheet>) -> Vec<BatchOutcome> {
    sheets
        .into_iter()
        .map(|LabeledFactSheet { label, sheet }| BatchOutcome {
            label,
            result: analyze_sheet(sheet),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct FactSheetRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    label: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    purchase_price_cents: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rentable_unit_bedrooms: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_separate_basement_entrance: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    down_payment_rate: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    interest_rate_annual: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pmi_rate_annual: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    property_tax_rate_annual: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    home_insurance_monthly_cents: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    hoa_monthly_cents: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rehab_cost_cents: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    ceiling_height_feet: Option<String>,
}

impl FactSheetRow {
    fn into_sheet(self, row: usize) -> Result<LabeledFactSheet, FactSheetImportError> {
        let purchase_price_cents = parse(
            row,
            "purchase_price_cents",
            required(row, "purchase_price_cents", self.purchase_price_cents)?,
        )?;
        let bedrooms = required(row, "rentable_unit_bedrooms", self.rentable_unit_bedrooms)?;
        let rentable_unit_bedrooms = BedroomCategory::from_str(&bedrooms)
            .map_err(|source| FactSheetImportError::Facts { row, source })?;
        let entrance = required(
            row,
            "has_separate_basement_entrance",
            self.has_separate_basement_entrance,
        )?;
        let has_separate_basement_entrance = parse_flag(&entrance).ok_or_else(|| {
            FactSheetImportError::InvalidValue {
                row,
                column: "has_separate_basement_entrance",
                value: entrance.clone(),
            }
        })?;

        let sheet = FactSheet {
            purchase_price_cents,
            rentable_unit_bedrooms,
            has_separate_basement_entrance,
            down_payment_rate: optional::<Decimal>(row, "down_payment_rate", self.down_payment_rate)?,
            interest_rate_annual: optional(row, "interest_rate_annual", self.interest_rate_annual)?,
            pmi_rate_annual: optional(row, "pmi_rate_annual", self.pmi_rate_annual)?,
            property_tax_rate_annual: optional(
                row,
                "property_tax_rate_annual",
                self.property_tax_rate_annual,
            )?,
            home_insurance_monthly_cents: optional(
                row,
                "home_insurance_monthly_cents",
                self.home_insurance_monthly_cents,
            )?,
            hoa_monthly_cents: optional(row, "hoa_monthly_cents", self.hoa_monthly_cents)?,
            rehab_cost_cents: optional(row, "rehab_cost_cents", self.rehab_cost_cents)?,
            ceiling_height_feet: optional(row, "ceiling_height_feet", self.ceiling_height_feet)?,
        };

        Ok(LabeledFactSheet {
            label: self.label.unwrap_or_else(|| format!("row {row}")),
            sheet,
        })
    }
}

fn required(
    row: usize,
    column: &'static str,
    value: Option<String>,
) -> Result<String, FactSheetImportError> {
    value.ok_or(FactSheetImportError::MissingValue { row, column })
}

fn parse<T: FromStr>(row: usize, column: &'static str, value: String) -> Result<T, FactSheetImportError> {
    value
        .parse()
        .map_err(|_| FactSheetImportError::InvalidValue { row, column, value })
}

fn optional<T: FromStr>(
    row: usize,
    column: &'static str,
    value: Option<String>,
) -> Result<Option<T>, FactSheetImportError> {
    value.map(|value| parse(row, column, value)).transpose()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::underwriting::domain::{FactField, Grade};

    const HEADER: &str = "label,purchase_price_cents,rentable_unit_bedrooms,has_separate_basement_entrance,hoa_monthly_cents,ceiling_height_feet\n";

    #[test]
    fn importer_reads_labels_and_treats_blank_cells_as_absent() {
        let csv = format!("{HEADER}Maple St,30000000,2br,yes,,7.5\n,45000000,3,false,0,\n");
        let sheets = FactSheetImporter::from_reader(csv.as_bytes()).expect("import succeeds");

        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].label, "Maple St");
        assert_eq!(sheets[0].sheet.rentable_unit_bedrooms, BedroomCategory::TwoBr);
        assert_eq!(sheets[0].sheet.hoa_monthly_cents, None);
        assert_eq!(sheets[0].sheet.ceiling_height_feet, Some(Decimal::new(75, 1)));

        assert_eq!(sheets[1].label, "row 2");
        assert_eq!(sheets[1].sheet.rentable_unit_bedrooms, BedroomCategory::ThreeBr);
        assert!(!sheets[1].sheet.has_separate_basement_entrance);
        assert_eq!(sheets[1].sheet.hoa_monthly_cents, Some(0));
    }

    #[test]
    fn importer_reports_row_of_unparseable_value() {
        let csv = format!("{HEADER}ok,30000000,2,yes,,\nbad,three hundred,2,yes,,\n");
        let err = FactSheetImporter::from_reader(csv.as_bytes()).expect_err("import fails");

        match err {
            FactSheetImportError::InvalidValue { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "purchase_price_cents");
                assert_eq!(value, "three hundred");
            }
            other => panic!("expected invalid value, got {other:?}"),
        }
    }

    #[test]
    fn importer_rejects_unknown_bedroom_category() {
        let csv = format!("{HEADER}loft,30000000,5br,yes,,\n");
        let err = FactSheetImporter::from_reader(csv.as_bytes()).expect_err("import fails");
        assert!(matches!(
            err,
            FactSheetImportError::Facts {
                row: 1,
                source: InvalidFactsError::UnknownBedroomCategory { .. }
            }
        ));
    }

    #[test]
    fn importer_requires_entrance_column() {
        let csv = "purchase_price_cents,rentable_unit_bedrooms\n30000000,2\n";
        let err = FactSheetImporter::from_reader(csv.as_bytes()).expect_err("import fails");
        assert!(matches!(
            err,
            FactSheetImportError::MissingValue {
                row: 1,
                column: "has_separate_basement_entrance"
            }
        ));
    }

    #[test]
    fn batch_keeps_going_past_invalid_listings() {
        let csv = format!("{HEADER}good,30000000,2,yes,,\nfree,0,2,yes,,\nhoa,20000000,1,yes,20000,\n");
        let sheets = FactSheetImporter::from_reader(csv.as_bytes()).expect("import succeeds");
        let outcomes = analyze_batch(sheets);

        assert_eq!(outcomes.len(), 3);
        let good = outcomes[0].result.as_ref().expect("first listing analyzes");
        assert_eq!(good.analysis.grade, Grade::APlus);
        assert!(good.facts.used_default(FactField::HoaMonthly));

        assert!(matches!(
            outcomes[1].result,
            Err(InvalidFactsError::NonPositivePrice { .. })
        ));

        let hoa = outcomes[2].result.as_ref().expect("third listing analyzes");
        assert_eq!(hoa.analysis.grade, Grade::F);
    }
}
