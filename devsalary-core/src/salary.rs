//! Salary normalisation: reading a salary range off a vacancy and turning it
//! into a single rouble estimate.

use serde_json::Value;

use crate::config::{HEADHUNTER_CURRENCY, SUPERJOB_CURRENCY};
use crate::contract::{Platform, SalaryRange, VacancyRecord};

/// Reads the salary range out of one platform's vacancy record.
pub trait SalaryAdapter: Send + Sync {
    /// Bounds for `record`, or [`SalaryRange::UNUSABLE`] when it is not paid in roubles.
    fn extract(&self, record: &VacancyRecord) -> SalaryRange;
}

/// HeadHunter keeps the range in a nested `salary` object.
pub struct HeadHunterSalary;

impl SalaryAdapter for HeadHunterSalary {
    fn extract(&self, record: &VacancyRecord) -> SalaryRange {
        let Some(salary) = record.get("salary").filter(|s| s.is_object()) else {
            return SalaryRange::UNUSABLE;
        };
        if salary.get("currency").and_then(Value::as_str) != Some(HEADHUNTER_CURRENCY) {
            return SalaryRange::UNUSABLE;
        }
        SalaryRange {
            lower: amount(salary.get("from")),
            upper: amount(salary.get("to")),
        }
    }
}

/// SuperJob puts `payment_from` / `payment_to` directly on the vacancy.
pub struct SuperJobSalary;

impl SalaryAdapter for SuperJobSalary {
    fn extract(&self, record: &VacancyRecord) -> SalaryRange {
        if record.get("currency").and_then(Value::as_str) != Some(SUPERJOB_CURRENCY) {
            return SalaryRange::UNUSABLE;
        }
        SalaryRange {
            lower: amount(record.get("payment_from")),
            upper: amount(record.get("payment_to")),
        }
    }
}

impl Platform {
    pub fn salary_adapter(&self) -> &'static dyn SalaryAdapter {
        match self {
            Platform::HeadHunter => &HeadHunterSalary,
            Platform::SuperJob => &SuperJobSalary,
        }
    }
}

// Platforms send integers, but tolerate a float amount by truncating it.
// Floats outside the u64 range are dropped rather than saturated.
fn amount(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.is_finite() && *v >= 0.0 && *v < u64::MAX as f64)
            .map(|v| v as u64)
    })
}

/// Single salary estimate for a range.
///
/// A midpoint when both bounds are known, otherwise the lone bound scaled by
/// 1.2 (lower) or 0.8 (upper). Zero bounds mean "not specified" and a zero
/// estimate is no estimate.
pub fn estimate(lower: Option<u64>, upper: Option<u64>) -> Option<u64> {
    let lower = lower.filter(|v| *v > 0);
    let upper = upper.filter(|v| *v > 0);
    let salary = match (lower, upper) {
        (Some(lower), Some(upper)) => ((u128::from(lower) + u128::from(upper)) / 2) as u64,
        (Some(lower), None) => (lower as f64 * 1.2) as u64,
        (None, Some(upper)) => (upper as f64 * 0.8) as u64,
        (None, None) => return None,
    };
    Some(salary).filter(|s| *s > 0)
}

/// Adapter lookup plus [`estimate`] for one record.
pub fn estimate_record(platform: Platform, record: &VacancyRecord) -> Option<u64> {
    let range = platform.salary_adapter().extract(record);
    estimate(range.lower, range.upper)
}
