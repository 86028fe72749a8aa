//! Static collaborator tables: industry growth rates and field payment ceilings.

use crate::error::{BargainError, Result};

/// Annual salary growth rate assumed when an industry key is unrecognized.
pub const DEFAULT_INDUSTRY_GROWTH: f64 = 0.03;

/// Reference salary unit used by the scorer: 100,000,000 KRW (1억원).
pub const SALARY_REFERENCE_UNIT: f64 = 100_000_000.0;

const INDUSTRY_GROWTH: &[(&str, f64)] = &[
    ("service", 0.011),
    ("manufacturing_chem", 0.03),
    ("retail", 0.043),
    ("healthcare", 0.027),
    ("it_telecom", 0.043),
];

const FIELD_CEILINGS: &[(&str, f64)] = &[
    ("service", 60_000_000.0),
    ("manufacturing_chem", 75_000_000.0),
    ("retail", 70_000_000.0),
    ("healthcare", 80_000_000.0),
    ("it_telecom", 90_000_000.0),
];

/// Looks up the annual growth rate for an industry key.
///
/// Unrecognized keys fall back to [`DEFAULT_INDUSTRY_GROWTH`]; this lookup
/// never fails because the scorer treats the table as best-effort data.
pub fn industry_growth(industry: &str) -> f64 {
    INDUSTRY_GROWTH
        .iter()
        .find(|(key, _)| *key == industry)
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_INDUSTRY_GROWTH)
}

/// Iterates over the industry keys the growth table enumerates.
pub fn known_industries() -> impl Iterator<Item = &'static str> {
    INDUSTRY_GROWTH.iter().map(|(key, _)| *key)
}

/// Resolves the assumed employer payment ceiling for a job category.
///
/// Unlike the growth table, a miss here is an error: the negotiation engine
/// cannot invent a ceiling for a category it knows nothing about.
pub fn field_ceiling(field: &str) -> Result<f64> {
    FIELD_CEILINGS
        .iter()
        .find(|(key, _)| *key == field)
        .map(|(_, ceiling)| *ceiling)
        .ok_or_else(|| BargainError::unknown_category("field ceiling", field))
}
