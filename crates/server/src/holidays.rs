// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! National holiday lookup.
//!
//! Holidays come from a BrasilAPI-compatible endpoint
//! (`GET {base_url}/{year}` returning `[{date, name, type}]`). A lookup that
//! fails or exceeds its timeout yields an empty set: the request is then
//! validated against weekends only.

use ferias_domain::{NationalHolidays, parse_date};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default endpoint for Brazilian national holidays.
pub const DEFAULT_HOLIDAY_API_URL: &str = "https://brasilapi.com.br/api/feriados/v1";

/// Errors from a single holiday lookup.
#[derive(Debug, thiserror::Error)]
pub enum HolidayError {
    #[error("failed to build holiday client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("holiday request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("holiday lookup timed out after {0:?}")]
    Timeout(Duration),
    #[error("holiday service returned an invalid date '{date}'")]
    InvalidDate { date: String },
}

#[derive(Debug, Deserialize)]
struct HolidayEntry {
    date: String,
    #[serde(default)]
    name: String,
}

/// Remote holiday source.
#[derive(Debug, Clone)]
pub struct RemoteHolidays {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl RemoteHolidays {
    /// Creates a client for `base_url` with a per-lookup `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HolidayError> {
        let client: reqwest::Client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HolidayError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    async fn fetch(&self, year: i32) -> Result<NationalHolidays, HolidayError> {
        let url: String = format!("{}/{year}", self.base_url);

        let request = async {
            self.client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<Vec<HolidayEntry>>()
                .await
        };

        let entries: Vec<HolidayEntry> = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| HolidayError::Timeout(self.timeout))??;

        entries
            .into_iter()
            .map(|entry| {
                debug!(date = %entry.date, name = %entry.name, "National holiday");
                parse_date(&entry.date).map_err(|_| HolidayError::InvalidDate { date: entry.date })
            })
            .collect()
    }
}

/// Where national holidays come from.
#[derive(Debug, Clone)]
pub enum HolidayProvider {
    /// Looked up per year from a remote service.
    Remote(RemoteHolidays),
    /// A fixed set, used offline and in tests.
    Fixed(NationalHolidays),
}

impl HolidayProvider {
    /// Returns the national holidays for `year`.
    ///
    /// Never fails: lookup errors are logged and produce an empty set.
    pub async fn national_holidays(&self, year: i32) -> NationalHolidays {
        match self {
            Self::Fixed(holidays) => holidays.clone(),
            Self::Remote(remote) => match remote.fetch(year).await {
                Ok(holidays) => {
                    debug!(year, count = holidays.len(), "Fetched national holidays");
                    holidays
                }
                Err(e) => {
                    warn!(year, error = %e, "Holiday lookup failed, continuing without holidays");
                    NationalHolidays::empty()
                }
            },
        }
    }
}
