//! Paginated vacancy retrieval for HeadHunter and SuperJob.
//!
//! Both fetchers walk the search endpoint page by page, sequentially, and retry
//! a failed page according to their [`RetryPolicy`] before moving on.

mod headhunter;
mod superjob;

pub use headhunter::HeadHunterFetcher;
pub use superjob::SuperJobFetcher;

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{error, warn};

use crate::config::RetryPolicy;
use crate::contract::{FetchError, Platform};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("devsalary/", env!("CARGO_PKG_VERSION"));

/// Full-text query for a language.
///
/// Quoted verbatim, except bare `C`, which would otherwise match every
/// C-family language and 1C as well.
pub fn search_text(language: &str) -> String {
    if language == "C" {
        r#"!"C" NOT "C++" NOT "C#" NOT "Objective-C" NOT "1C""#.to_string()
    } else {
        format!("\"{language}\"")
    }
}

fn build_client() -> Result<reqwest::Client, FetchError> {
    Ok(reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?)
}

/// Sends a prepared request and decodes a successful JSON body.
async fn get_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, FetchError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(FetchError::Status { status, body });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Runs `request` until it succeeds or `policy` runs out of attempts for `page`.
async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    platform: Platform,
    page: u32,
    mut request: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut failed_attempts = 0u32;
    loop {
        match request().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                failed_attempts = failed_attempts.saturating_add(1);
                if policy.is_exhausted(failed_attempts) {
                    error!(%platform, page, attempts = failed_attempts, error = %e, "Giving up on search page");
                    return Err(FetchError::RetriesExhausted {
                        platform,
                        page,
                        attempts: failed_attempts,
                        last_error: e.to_string(),
                    });
                }
                warn!(%platform, page, attempt = failed_attempts, error = %e, "Search request failed, retrying same page");
            }
        }
    }
}
