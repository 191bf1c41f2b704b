use homelord::underwriting::BedroomCategory;
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Parses a dollar amount such as `300000`, `1,250.50`, or `$99` into cents.
pub(crate) fn parse_cents(raw: &str) -> Result<i64, String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();
    let dollars: Decimal = cleaned
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a dollar amount ({err})"))?;

    (dollars * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| format!("dollar amount '{raw}' is out of range"))
}

pub(crate) fn parse_bedrooms(raw: &str) -> Result<BedroomCategory, String> {
    raw.parse::<BedroomCategory>().map_err(|err| err.to_string())
}
