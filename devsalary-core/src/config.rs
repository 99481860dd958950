//! Named settings for both platforms, with the defaults the reports are built on.
//!
//! Every struct here deserializes with `#[serde(default)]`, so a config file only
//! needs to mention the values it overrides.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Currency marker HeadHunter uses for roubles, both as a search filter and on salaries.
pub const HEADHUNTER_CURRENCY: &str = "RUR";
/// Currency marker SuperJob puts on vacancies paid in roubles.
pub const SUPERJOB_CURRENCY: &str = "rub";

/// Languages reported on when no list is configured.
pub const DEFAULT_LANGUAGES: &[&str] = &[
    "JavaScript",
    "Java",
    "Python",
    "Ruby",
    "PHP",
    "C++",
    "C#",
    "C",
    "Go",
    "Objective-C",
    "Scala",
    "Swift",
    "TypeScript",
    "1С",
];

pub fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect()
}

/// Search filter for the HeadHunter vacancies endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadHunterSettings {
    pub base_url: String,
    /// "Programmer, developer" professional role.
    pub professional_role: u32,
    /// Moscow.
    pub area: u32,
    pub currency: String,
    pub period_days: u32,
    pub per_page: u32,
}

impl Default for HeadHunterSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.hh.ru".to_string(),
            professional_role: 96,
            area: 1,
            currency: HEADHUNTER_CURRENCY.to_string(),
            period_days: 30,
            per_page: 100,
        }
    }
}

/// Search filter for the SuperJob vacancies endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperJobSettings {
    pub base_url: String,
    /// "Development, programming" catalogue.
    pub catalogue: u32,
    /// Moscow.
    pub town: u32,
    pub period_days: u32,
    pub count: u32,
}

impl Default for SuperJobSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.superjob.ru".to_string(),
            catalogue: 48,
            town: 4,
            period_days: 30,
            count: 100,
        }
    }
}

/// How often a single page is requested before the fetch gives up.
///
/// `max_attempts: None` keeps retrying the same page forever, which can stall a
/// run indefinitely against a platform that stays down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub const fn unbounded() -> Self {
        Self { max_attempts: None }
    }

    pub const fn attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    /// True once `failed_attempts` failures have used up the budget for one page.
    pub fn is_exhausted(&self, failed_attempts: u32) -> bool {
        match self.max_attempts {
            Some(max) => failed_attempts >= max.max(1),
            None => false,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::attempts(5)
    }
}

impl HeadHunterSettings {
    pub fn trace_loaded(&self) {
        info!(
            base_url = %self.base_url,
            area = self.area,
            professional_role = self.professional_role,
            "Loaded HeadHunter settings"
        );
        debug!(?self, "HeadHunter settings (full debug)");
    }
}

impl SuperJobSettings {
    pub fn trace_loaded(&self) {
        info!(
            base_url = %self.base_url,
            town = self.town,
            catalogue = self.catalogue,
            "Loaded SuperJob settings"
        );
        debug!(?self, "SuperJob settings (full debug)");
    }
}
