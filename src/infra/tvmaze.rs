use chrono::NaiveDate;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{Catalog, CatalogError, CatalogResult};
use crate::domain::models::{Episode, ScheduleEntry, SearchResult, Show, ShowId};

pub const TVMAZE_API_BASE: &str = "https://api.tvmaze.com";

const USER_AGENT: &str = concat!("showtrackr/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct TvMazeClient {
    base_url: String,
    http: Client,
}

impl TvMazeClient {
    pub fn new(base_url: &str) -> Self {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn search_request(&self, query: &str) -> RequestBuilder {
        self.http
            .get(format!("{}/search/shows", self.base_url))
            .query(&[("q", query)])
    }

    fn show_request(&self, id: ShowId) -> RequestBuilder {
        self.http.get(format!("{}/shows/{}", self.base_url, id))
    }

    fn episodes_request(&self, id: ShowId) -> RequestBuilder {
        self.http
            .get(format!("{}/shows/{}/episodes", self.base_url, id))
    }

    fn schedule_request(&self, country: &str, date: Option<NaiveDate>) -> RequestBuilder {
        let mut params = vec![("country", country.to_string())];
        if let Some(date) = date {
            params.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        self.http
            .get(format!("{}/schedule", self.base_url))
            .query(&params)
    }

    fn web_schedule_request(
        &self,
        date: Option<NaiveDate>,
        country: Option<&str>,
    ) -> RequestBuilder {
        let mut params = Vec::new();
        if let Some(date) = date {
            params.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(country) = country {
            params.push(("country", country.to_string()));
        }
        self.http
            .get(format!("{}/schedule/web", self.base_url))
            .query(&params)
    }

    fn fetch<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> CatalogResult<T> {
        let response = request
            .send()
            .map_err(|source| CatalogError::Transport { operation, source })?;

        let status = response.status();
        debug!(operation, %status, url = %response.url(), "catalog response");
        if !status.is_success() {
            return Err(CatalogError::Status { operation, status });
        }

        let body = response
            .text()
            .map_err(|source| CatalogError::Transport { operation, source })?;
        serde_json::from_str(&body).map_err(|source| CatalogError::Decode { operation, source })
    }
}

impl Catalog for TvMazeClient {
    fn search_shows(&self, query: &str) -> CatalogResult<Vec<SearchResult>> {
        self.fetch("show search", self.search_request(query))
    }

    fn get_show(&self, id: ShowId) -> CatalogResult<Show> {
        self.fetch("show lookup", self.show_request(id))
    }

    fn get_show_episodes(&self, id: ShowId) -> CatalogResult<Vec<Episode>> {
        self.fetch("episode list", self.episodes_request(id))
    }

    fn get_schedule(
        &self,
        country: &str,
        date: Option<NaiveDate>,
    ) -> CatalogResult<Vec<ScheduleEntry>> {
        self.fetch("schedule", self.schedule_request(country, date))
    }

    fn get_web_schedule(
        &self,
        date: Option<NaiveDate>,
        country: Option<&str>,
    ) -> CatalogResult<Vec<ScheduleEntry>> {
        self.fetch("web schedule", self.web_schedule_request(date, country))
    }
}
