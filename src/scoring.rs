//! Job-change scoring: comparable workplace indices for two employers.
//!
//! Each side receives a base score from salary, tenure, and its industry's
//! growth rate, multiplied by a company factor built from reported sales
//! growth and total assets. The verdict is an ordering of the two raw
//! scores; display rounding never feeds back into the comparison.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BargainError, Result};
use crate::metrics::{CompanyMetrics, CompanyMetricsProvider};
use crate::tables::{industry_growth, SALARY_REFERENCE_UNIT};

/// Validated inputs for a single job-change evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobChangeInput {
    years_of_experience: f64,
    current_annual_salary: f64,
    current_industry: String,
    target_industry: String,
}

impl JobChangeInput {
    /// Validates and constructs the scorer inputs.
    ///
    /// Fails fast: negative tenure, non-positive salary, or an empty
    /// industry key is rejected before any scoring arithmetic runs.
    pub fn new(
        years_of_experience: f64,
        current_annual_salary: f64,
        current_industry: impl Into<String>,
        target_industry: impl Into<String>,
    ) -> Result<Self> {
        if !years_of_experience.is_finite() || years_of_experience < 0.0 {
            return Err(BargainError::invalid_input(
                "years of experience",
                years_of_experience,
            ));
        }
        if !current_annual_salary.is_finite() || current_annual_salary <= 0.0 {
            return Err(BargainError::invalid_input(
                "current annual salary",
                current_annual_salary,
            ));
        }
        let current_industry = current_industry.into();
        let target_industry = target_industry.into();
        if current_industry.trim().is_empty() {
            return Err(BargainError::invalid_input("current industry key", "``"));
        }
        if target_industry.trim().is_empty() {
            return Err(BargainError::invalid_input("target industry key", "``"));
        }
        Ok(Self {
            years_of_experience,
            current_annual_salary,
            current_industry,
            target_industry,
        })
    }

    /// Tenure in years.
    pub fn years_of_experience(&self) -> f64 {
        self.years_of_experience
    }

    /// Current annual salary in raw currency units.
    pub fn current_annual_salary(&self) -> f64 {
        self.current_annual_salary
    }

    /// Industry key of the current employer.
    pub fn current_industry(&self) -> &str {
        &self.current_industry
    }

    /// Industry key of the prospective employer.
    pub fn target_industry(&self) -> &str {
        &self.target_industry
    }
}

/// Categorical recommendation from comparing the two workplace indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The prospective employer scores strictly higher.
    Move,
    /// The current employer scores strictly higher.
    Stay,
    /// The two raw scores are numerically equal.
    Indifferent,
    /// At least one score is non-finite; no recommendation is possible.
    Indeterminate,
}

/// Intermediate components retained per side for audit and explanation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SideBreakdown {
    /// Industry growth rate used for this side.
    pub industry_growth: f64,
    /// Base score `(salary / reference) × (1 + growth)^years`.
    pub base_score: f64,
    /// Company factor `(1 + growth component) × size component`.
    pub company_factor: f64,
}

/// Outcome of a single job-change evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobChangeResult {
    /// Workplace index of the current employer.
    pub wp: f64,
    /// Workplace index of the prospective employer.
    pub wk: f64,
    /// Categorical recommendation.
    pub verdict: Verdict,
    /// Per-side intermediates for the current employer.
    pub current: SideBreakdown,
    /// Per-side intermediates for the prospective employer.
    pub target: SideBreakdown,
    /// Non-fatal warnings carried from the metrics provider.
    pub warnings: Vec<String>,
}

/// Scores a job change given both companies' metrics.
///
/// Missing metrics never abort the evaluation: an empty record falls back
/// to the side's industry growth and a neutral size multiplier.
pub fn evaluate(
    input: &JobChangeInput,
    current_metrics: &CompanyMetrics,
    target_metrics: &CompanyMetrics,
) -> JobChangeResult {
    evaluate_with_warnings(input, current_metrics, target_metrics, Vec::new())
}

/// Scores a job change, fetching both companies' metrics through `provider`.
///
/// Provider warnings (unknown company, degraded response) are accumulated
/// on the result rather than raised.
pub fn evaluate_with_provider<P: CompanyMetricsProvider>(
    input: &JobChangeInput,
    current_company: &str,
    target_company: &str,
    provider: &P,
) -> JobChangeResult {
    let current = provider.fetch(current_company);
    let target = provider.fetch(target_company);
    let warnings = current
        .warning
        .into_iter()
        .chain(target.warning)
        .collect();
    evaluate_with_warnings(input, &current.metrics, &target.metrics, warnings)
}

fn evaluate_with_warnings(
    input: &JobChangeInput,
    current_metrics: &CompanyMetrics,
    target_metrics: &CompanyMetrics,
    warnings: Vec<String>,
) -> JobChangeResult {
    let current = score_side(input, input.current_industry(), current_metrics);
    let target = score_side(input, input.target_industry(), target_metrics);

    let wp = current.base_score * current.company_factor;
    let wk = target.base_score * target.company_factor;
    debug!("scored wp={wp} wk={wk}");

    let verdict = if !(wp.is_finite() && wk.is_finite()) {
        Verdict::Indeterminate
    } else if wk > wp {
        Verdict::Move
    } else if wp > wk {
        Verdict::Stay
    } else {
        Verdict::Indifferent
    };

    JobChangeResult {
        wp,
        wk,
        verdict,
        current,
        target,
        warnings,
    }
}

fn score_side(input: &JobChangeInput, industry: &str, metrics: &CompanyMetrics) -> SideBreakdown {
    let growth = industry_growth(industry);
    let base_score = (input.current_annual_salary() / SALARY_REFERENCE_UNIT)
        * (1.0 + growth).powf(input.years_of_experience());
    SideBreakdown {
        industry_growth: growth,
        base_score,
        company_factor: metrics.factor(growth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::metrics::StaticProvider;

    fn input() -> JobChangeInput {
        JobChangeInput::new(3.0, 50_000_000.0, "it_telecom", "healthcare").unwrap()
    }

    #[test]
    fn rejects_malformed_inputs() {
        assert!(JobChangeInput::new(-1.0, 50_000_000.0, "it_telecom", "retail").is_err());
        assert!(JobChangeInput::new(3.0, 0.0, "it_telecom", "retail").is_err());
        assert!(JobChangeInput::new(3.0, 50_000_000.0, "  ", "retail").is_err());
        assert!(JobChangeInput::new(3.0, 50_000_000.0, "it_telecom", "").is_err());
    }

    #[test]
    fn base_score_uses_each_sides_industry_growth() {
        let result = evaluate(&input(), &CompanyMetrics::default(), &CompanyMetrics::default());
        assert_relative_eq!(
            result.current.base_score,
            0.5 * 1.043_f64.powf(3.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            result.target.base_score,
            0.5 * 1.027_f64.powf(3.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn missing_metrics_fall_back_to_industry_growth_only() {
        let result = evaluate(&input(), &CompanyMetrics::default(), &CompanyMetrics::default());
        assert!(result.wp.is_finite() && result.wk.is_finite());
        // With neutral size components the comparison reduces to industry
        // growth alone; it_telecom (4.3%) beats healthcare (2.7%).
        assert_eq!(result.verdict, Verdict::Stay);
        assert_relative_eq!(result.current.company_factor, 1.043, epsilon = 1e-12);
        assert_relative_eq!(result.target.company_factor, 1.027, epsilon = 1e-12);
    }

    #[test]
    fn identical_sides_are_indifferent() {
        let input = JobChangeInput::new(5.0, 60_000_000.0, "retail", "retail").unwrap();
        let metrics = CompanyMetrics {
            sales_growth: Some(0.05),
            assets: Some(1e11),
        };
        let result = evaluate(&input, &metrics, &metrics);
        assert_eq!(result.verdict, Verdict::Indifferent);
        assert_eq!(result.wp, result.wk);
    }

    #[test]
    fn stronger_company_metrics_flip_the_verdict_to_move() {
        let input = JobChangeInput::new(3.0, 50_000_000.0, "retail", "retail").unwrap();
        let weak = CompanyMetrics::default();
        let strong = CompanyMetrics {
            sales_growth: Some(0.20),
            assets: Some(1e13),
        };
        let result = evaluate(&input, &weak, &strong);
        assert_eq!(result.verdict, Verdict::Move);
        assert!(result.wk > result.wp);
    }

    #[test]
    fn non_finite_score_downgrades_to_indeterminate() {
        let input = JobChangeInput::new(3.0, 50_000_000.0, "retail", "retail").unwrap();
        // The growth and size components multiply out past f64::MAX, so the
        // factor overflows to infinity and the verdict must degrade rather
        // than propagate the non-finite score into an ordering.
        let poisoned = CompanyMetrics {
            sales_growth: Some(f64::MAX),
            assets: Some(f64::MAX),
        };
        let result = evaluate(&input, &poisoned, &poisoned);
        assert_eq!(result.verdict, Verdict::Indeterminate);
    }

    #[test]
    fn provider_warnings_are_carried_not_raised() {
        let provider = StaticProvider::new();
        let result = evaluate_with_provider(&input(), "acme", "", &provider);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.wp.is_finite());
        assert_ne!(result.verdict, Verdict::Indeterminate);
    }
}
