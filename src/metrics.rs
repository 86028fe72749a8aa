//! Company financial metrics and the external provider seam.
//!
//! The HTTP call that fetches metrics lives outside this crate; the scorer
//! only consumes its output. Everything here is written so that a failed or
//! malformed fetch degrades to an empty metrics record plus a carried
//! warning, never an error: missing company data must not abort scoring.

use log::warn;
use serde::{Deserialize, Serialize};

/// Externally supplied financial snapshot of a company.
///
/// Absent fields are filled in at scoring time: missing sales growth falls
/// back to the industry-average rate and missing assets yield a neutral
/// size multiplier, so an unknown company is never penalized.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyMetrics {
    /// Company-reported annual sales growth rate, e.g. `0.05` for 5%.
    #[serde(rename = "salesGrowth")]
    pub sales_growth: Option<f64>,
    /// Total assets in raw currency units.
    pub assets: Option<f64>,
}

impl CompanyMetrics {
    /// Growth component of the company factor: `1 + growth`, where growth is
    /// the reported sales growth if present and finite, else `fallback`.
    pub fn growth_component(&self, fallback: f64) -> f64 {
        let growth = match self.sales_growth {
            Some(rate) if rate.is_finite() => rate,
            _ => fallback,
        };
        1.0 + growth
    }

    /// Size component of the company factor: `log10(assets) / 12` when assets
    /// are present and positive, else a neutral `1.0`.
    pub fn size_component(&self) -> f64 {
        match self.assets {
            Some(assets) if assets > 0.0 => assets.log10() / 12.0,
            _ => 1.0,
        }
    }

    /// The combined company factor used by the scorer.
    pub fn factor(&self, fallback_growth: f64) -> f64 {
        self.growth_component(fallback_growth) * self.size_component()
    }
}

/// Wire shape of the metrics provider's JSON response.
#[derive(Debug, Deserialize)]
struct MetricsEnvelope {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    metrics: Option<CompanyMetrics>,
    #[serde(default)]
    error: Option<String>,
}

/// Outcome of a metrics fetch: always usable, possibly degraded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FetchOutcome {
    /// The decoded metrics; empty when the fetch was degraded.
    pub metrics: CompanyMetrics,
    /// A non-fatal warning describing why the metrics are degraded, if any.
    pub warning: Option<String>,
}

impl FetchOutcome {
    fn degraded(warning: String) -> Self {
        warn!("metrics fetch degraded: {warning}");
        Self {
            metrics: CompanyMetrics::default(),
            warning: Some(warning),
        }
    }
}

/// Decodes a raw provider response body into a [`FetchOutcome`].
///
/// Total function: malformed JSON, `ok: false`, or a missing `metrics`
/// object all yield empty metrics plus a warning.
pub fn decode_envelope(company: &str, raw: &str) -> FetchOutcome {
    let envelope: MetricsEnvelope = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(err) => {
            return FetchOutcome::degraded(format!(
                "malformed metrics response for `{company}`: {err}"
            ));
        }
    };

    if !envelope.ok {
        let reason = envelope
            .error
            .unwrap_or_else(|| "provider reported failure".to_string());
        return FetchOutcome::degraded(format!("metrics unavailable for `{company}`: {reason}"));
    }

    match envelope.metrics {
        Some(metrics) => FetchOutcome {
            metrics,
            warning: None,
        },
        None => FetchOutcome::degraded(format!(
            "metrics response for `{company}` carried no metrics object"
        )),
    }
}

/// Seam for the external company-metrics collaborator.
///
/// Implementations must be total: transport failures, timeouts, and empty
/// company names are reported through [`FetchOutcome::warning`], never by
/// panicking or returning an error.
pub trait CompanyMetricsProvider {
    /// Fetches the best-effort metrics record for `company`.
    fn fetch(&self, company: &str) -> FetchOutcome;
}

/// In-memory provider backed by a fixed list of companies.
///
/// Ships for tests and offline use; any real HTTP provider lives with the
/// caller and decodes its response body through [`decode_envelope`].
#[derive(Clone, Debug, Default)]
pub struct StaticProvider {
    entries: Vec<(String, CompanyMetrics)>,
}

impl StaticProvider {
    /// Creates an empty provider; every lookup degrades with a warning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers metrics for a company name.
    pub fn with_company(mut self, name: impl Into<String>, metrics: CompanyMetrics) -> Self {
        self.entries.push((name.into(), metrics));
        self
    }
}

impl CompanyMetricsProvider for StaticProvider {
    fn fetch(&self, company: &str) -> FetchOutcome {
        let trimmed = company.trim();
        if trimmed.is_empty() {
            return FetchOutcome::degraded("company name is empty".to_string());
        }
        match self
            .entries
            .iter()
            .find(|(name, _)| name == trimmed)
            .map(|(_, metrics)| metrics.clone())
        {
            Some(metrics) => FetchOutcome {
                metrics,
                warning: None,
            },
            None => {
                FetchOutcome::degraded(format!("no metrics on record for `{trimmed}`"))
            }
        }
    }
}
