use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use super::{build_client, get_json, search_text, with_retry};
use crate::config::{HeadHunterSettings, RetryPolicy};
use crate::contract::{FetchError, FetchedVacancies, Platform, VacancyFetcher, VacancyRecord};

/// One page of `GET /vacancies`. Missing keys read as an empty last page.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    items: Vec<VacancyRecord>,
    #[serde(default)]
    found: u64,
    #[serde(default = "single_page")]
    pages: u64,
}

fn single_page() -> u64 {
    1
}

/// Fetcher for the public HeadHunter API. No credentials needed.
pub struct HeadHunterFetcher {
    client: reqwest::Client,
    settings: HeadHunterSettings,
    retry: RetryPolicy,
}

impl HeadHunterFetcher {
    pub fn new(settings: HeadHunterSettings, retry: RetryPolicy) -> Result<Self, FetchError> {
        settings.trace_loaded();
        Ok(Self {
            client: build_client()?,
            settings,
            retry,
        })
    }

    async fn fetch_page(&self, text: &str, page: u32) -> Result<SearchPage, FetchError> {
        let url = format!("{}/vacancies", self.settings.base_url.trim_end_matches('/'));
        let request = self.client.get(&url).query(&[
            ("professional_role", self.settings.professional_role.to_string()),
            ("area", self.settings.area.to_string()),
            ("currency", self.settings.currency.clone()),
            ("period", self.settings.period_days.to_string()),
            ("text", text.to_string()),
            ("per_page", self.settings.per_page.to_string()),
            ("page", page.to_string()),
        ]);
        get_json(request).await
    }
}

#[async_trait]
impl VacancyFetcher for HeadHunterFetcher {
    fn platform(&self) -> Platform {
        Platform::HeadHunter
    }

    async fn fetch(&self, language: &str) -> Result<FetchedVacancies, FetchError> {
        let text = search_text(language);
        info!(language, text = %text, "Fetching HeadHunter vacancies");

        let mut records = Vec::new();
        let mut page = 0u32;
        loop {
            let response = with_retry(&self.retry, Platform::HeadHunter, page, || {
                self.fetch_page(&text, page)
            })
            .await?;
            debug!(
                language,
                page,
                items = response.items.len(),
                pages = response.pages,
                found = response.found,
                "Received HeadHunter page"
            );
            records.extend(response.items);

            if u64::from(page) + 1 >= response.pages {
                info!(language, found = response.found, fetched = records.len(), "HeadHunter search exhausted");
                return Ok(FetchedVacancies {
                    reported_total: response.found,
                    records,
                });
            }
            page += 1;
        }
    }
}
