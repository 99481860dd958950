use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use super::{build_client, get_json, search_text, with_retry};
use crate::config::{RetryPolicy, SuperJobSettings};
use crate::contract::{FetchError, FetchedVacancies, Platform, VacancyFetcher, VacancyRecord};

const API_KEY_HEADER: &str = "X-Api-App-Id";

/// One page of `GET /2.0/vacancies/`. Missing keys read as an empty last page.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    objects: Vec<VacancyRecord>,
    #[serde(default)]
    total: u64,
    #[serde(default)]
    more: bool,
}

/// Fetcher for the SuperJob API, authenticated with an application secret key.
pub struct SuperJobFetcher {
    client: reqwest::Client,
    settings: SuperJobSettings,
    api_key: String,
    retry: RetryPolicy,
}

impl SuperJobFetcher {
    pub fn new(
        settings: SuperJobSettings,
        api_key: impl Into<String>,
        retry: RetryPolicy,
    ) -> Result<Self, FetchError> {
        settings.trace_loaded();
        Ok(Self {
            client: build_client()?,
            settings,
            api_key: api_key.into(),
            retry,
        })
    }

    async fn fetch_page(&self, keyword: &str, page: u32) -> Result<SearchPage, FetchError> {
        let url = format!(
            "{}/2.0/vacancies/",
            self.settings.base_url.trim_end_matches('/')
        );
        let request = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[
                ("period", self.settings.period_days.to_string()),
                ("town", self.settings.town.to_string()),
                ("keyword", keyword.to_string()),
                ("catalogues", self.settings.catalogue.to_string()),
                ("count", self.settings.count.to_string()),
                ("page", page.to_string()),
            ]);
        get_json(request).await
    }
}

#[async_trait]
impl VacancyFetcher for SuperJobFetcher {
    fn platform(&self) -> Platform {
        Platform::SuperJob
    }

    async fn fetch(&self, language: &str) -> Result<FetchedVacancies, FetchError> {
        let keyword = search_text(language);
        info!(language, keyword = %keyword, "Fetching SuperJob vacancies");

        let mut records = Vec::new();
        let mut page = 0u32;
        loop {
            let response = with_retry(&self.retry, Platform::SuperJob, page, || {
                self.fetch_page(&keyword, page)
            })
            .await?;
            debug!(
                language,
                page,
                objects = response.objects.len(),
                more = response.more,
                total = response.total,
                "Received SuperJob page"
            );
            records.extend(response.objects);

            if !response.more {
                info!(language, total = response.total, fetched = records.len(), "SuperJob search exhausted");
                return Ok(FetchedVacancies {
                    reported_total: response.total,
                    records,
                });
            }
            page += 1;
        }
    }
}
