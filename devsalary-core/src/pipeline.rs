//! Per-platform pipeline: fetch → normalise → aggregate, one language at a time.
//!
//! # Responsibilities
//! - Query the fetcher for each configured language, strictly in order
//! - Run every fetched vacancy through the salary adapter for the fetcher's platform
//! - Summarise the estimates and collect them into a [`PlatformResultSet`]
//!
//! # Error Handling
//! A fetch failure that survives the fetcher's retry policy aborts the whole run;
//! no language is dropped from the result on its own.

use tracing::{error, info};

use crate::contract::{FetchError, PlatformResultSet, VacancyFetcher};
use crate::salary::estimate_record;
use crate::statistics::summarize;

pub async fn collect_statistics<F>(
    languages: &[String],
    fetcher: &F,
) -> Result<PlatformResultSet, FetchError>
where
    F: VacancyFetcher + ?Sized,
{
    let platform = fetcher.platform();
    info!(%platform, languages = languages.len(), "Collecting vacancy statistics");

    let mut results = PlatformResultSet::new();
    for language in languages {
        let fetched = match fetcher.fetch(language).await {
            Ok(fetched) => fetched,
            Err(e) => {
                error!(%platform, language = %language, error = %e, "Fetch failed, aborting run");
                return Err(e);
            }
        };

        let estimates: Vec<Option<u64>> = fetched
            .records
            .iter()
            .map(|record| estimate_record(platform, record))
            .collect();
        let summary = summarize(fetched.reported_total, &estimates);

        info!(
            %platform,
            language = %language,
            found = summary.vacancies_found,
            processed = summary.vacancies_processed,
            average = summary.average_salary,
            "Language summarised"
        );
        results.insert(language.clone(), summary);
    }

    Ok(results)
}
