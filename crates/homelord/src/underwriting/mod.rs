//! The HomeLord Method: mortgage and cash-flow underwriting for house hacks, where a
//! rentable basement unit offsets the owner's monthly payment.

pub mod amortization;
pub mod domain;
mod engine;
pub mod error;
pub mod facts;
pub mod import;
pub mod report;
pub mod router;
pub mod rules;

#[cfg(test)]
mod tests;

pub use domain::{
    BedroomCategory, DealAnalysis, DealStatus, FactField, FailReason, Grade, ListingFacts,
    PaymentBreakdown,
};
pub use engine::{analyze, analyze_sheet, UnderwrittenDeal};
pub use error::InvalidFactsError;
pub use facts::{FactDefaults, FactSheet, ResolvedFacts};
pub use import::{analyze_batch, BatchOutcome, FactSheetImportError, FactSheetImporter, LabeledFactSheet};
pub use report::{format_percent, format_usd, DealReport, RiskNotes};
pub use router::{deal_router, AnalyzeDealRequest, AnalyzeDealResponse};
