#[cfg(test)]
pub mod fake;
pub mod tvmaze;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::models::{Episode, ScheduleEntry, SearchResult, Show, ShowId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request to {operation} failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} failed: HTTP {status}")]
    Status {
        operation: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("could not decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Read-only access to the show catalog.
pub trait Catalog {
    fn search_shows(&self, query: &str) -> CatalogResult<Vec<SearchResult>>;

    fn get_show(&self, id: ShowId) -> CatalogResult<Show>;

    fn get_show_episodes(&self, id: ShowId) -> CatalogResult<Vec<Episode>>;

    /// Broadcast schedule for one country.
    fn get_schedule(
        &self,
        country: &str,
        date: Option<NaiveDate>,
    ) -> CatalogResult<Vec<ScheduleEntry>>;

    /// Streaming schedule. Without a country the catalog returns every region.
    fn get_web_schedule(
        &self,
        date: Option<NaiveDate>,
        country: Option<&str>,
    ) -> CatalogResult<Vec<ScheduleEntry>>;
}
