//! # contract: shared data model and the fetcher interface
//!
//! The types here are the only things that cross module boundaries in the
//! pipeline: raw vacancy records coming out of a fetcher, the salary range an
//! adapter derives from one record, and the per-language summaries handed to
//! callers.
//!
//! ## Mocking & Testing
//! - [`VacancyFetcher`] is annotated for `mockall`, so pipeline tests can script
//!   fetch results without a network (`MockVacancyFetcher`).

use std::fmt;

use async_trait::async_trait;
use mockall::automock;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One job posting exactly as the platform's search API returned it.
pub type VacancyRecord = serde_json::Value;

/// The job boards devsalary knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    HeadHunter,
    SuperJob,
}

impl Platform {
    /// Report title for this platform's statistics.
    pub fn title(&self) -> &'static str {
        match self {
            Platform::HeadHunter => "HeadHunter Moscow",
            Platform::SuperJob => "SuperJob Moscow",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::HeadHunter => f.write_str("hh"),
            Platform::SuperJob => f.write_str("sj"),
        }
    }
}

/// Salary bounds read from a single vacancy, already filtered on currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalaryRange {
    pub lower: Option<u64>,
    pub upper: Option<u64>,
}

impl SalaryRange {
    pub const UNUSABLE: SalaryRange = SalaryRange {
        lower: None,
        upper: None,
    };
}

/// Everything a fetcher collected for one language query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedVacancies {
    /// Match count the platform reported on the last page it served.
    pub reported_total: u64,
    pub records: Vec<VacancyRecord>,
}

/// Aggregated statistics for one language on one platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSummary {
    pub vacancies_found: u64,
    pub vacancies_processed: u64,
    pub average_salary: u64,
}

/// Language → summary, kept in the order languages were inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformResultSet {
    entries: Vec<(String, LanguageSummary)>,
}

impl PlatformResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the summary for `language`. A replaced entry keeps its position.
    pub fn insert(&mut self, language: impl Into<String>, summary: LanguageSummary) {
        let language = language.into();
        match self.entries.iter_mut().find(|(name, _)| *name == language) {
            Some((_, existing)) => *existing = summary,
            None => self.entries.push((language, summary)),
        }
    }

    pub fn get(&self, language: &str) -> Option<&LanguageSummary> {
        self.entries
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, summary)| summary)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageSummary)> {
        self.entries
            .iter()
            .map(|(name, summary)| (name.as_str(), summary))
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PlatformResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (language, summary) in &self.entries {
            map.serialize_entry(language, summary)?;
        }
        map.end()
    }
}

/// Failures surfaced by a fetcher.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("platform answered with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("could not decode search response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{platform} page {page} still failing after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        platform: Platform,
        page: u32,
        attempts: u32,
        last_error: String,
    },
}

/// Trait for retrieving every vacancy matching a language on one platform.
///
/// Implementations page through the platform's search endpoint until it is
/// exhausted; credentials are owned by the implementor.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait VacancyFetcher: Send + Sync {
    /// Platform tag, used to pick the matching salary adapter.
    fn platform(&self) -> Platform;

    /// Fetch all pages of vacancies for `language`.
    async fn fetch(&self, language: &str) -> Result<FetchedVacancies, FetchError>;
}
