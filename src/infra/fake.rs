//! In-memory catalog for workflow tests.

use chrono::NaiveDate;
use reqwest::StatusCode;
use std::cell::RefCell;
use std::collections::HashMap;

use super::{Catalog, CatalogError, CatalogResult};
use crate::domain::models::{Episode, ScheduleEntry, SearchResult, Show, ShowId};

#[derive(Debug, Default)]
pub struct FakeCatalog {
    shows: HashMap<ShowId, Show>,
    episodes: HashMap<ShowId, Vec<Episode>>,
    search_results: Vec<SearchResult>,
    schedule: Vec<ScheduleEntry>,
    failing: bool,
    calls: RefCell<Vec<String>>,
}

impl FakeCatalog {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn with_show(mut self, show: Show, episodes: Vec<Episode>) -> Self {
        self.search_results.push(SearchResult {
            score: 1.0,
            show: show.clone(),
        });
        self.episodes.insert(show.id, episodes);
        self.shows.insert(show.id, show);
        self
    }

    /// Adds `count` schedule entries numbered from 1.
    pub fn with_schedule(mut self, count: u64) -> Self {
        self.schedule = (1..=count)
            .map(|id| ScheduleEntry {
                episode: Episode {
                    id,
                    name: format!("Airing {id}"),
                    ..Default::default()
                },
                ..Default::default()
            })
            .collect();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, operation: &'static str, call: String) -> CatalogResult<()> {
        self.calls.borrow_mut().push(call);
        if self.failing {
            return Err(CatalogError::Status {
                operation,
                status: StatusCode::SERVICE_UNAVAILABLE,
            });
        }
        Ok(())
    }
}

fn day(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

impl Catalog for FakeCatalog {
    fn search_shows(&self, query: &str) -> CatalogResult<Vec<SearchResult>> {
        self.record("show search", format!("search {query}"))?;
        let query = query.to_lowercase();
        Ok(self
            .search_results
            .iter()
            .filter(|r| r.show.name.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    fn get_show(&self, id: ShowId) -> CatalogResult<Show> {
        self.record("show lookup", format!("show {id}"))?;
        self.shows.get(&id).cloned().ok_or(CatalogError::Status {
            operation: "show lookup",
            status: StatusCode::NOT_FOUND,
        })
    }

    fn get_show_episodes(&self, id: ShowId) -> CatalogResult<Vec<Episode>> {
        self.record("episode list", format!("episodes {id}"))?;
        Ok(self.episodes.get(&id).cloned().unwrap_or_default())
    }

    fn get_schedule(
        &self,
        country: &str,
        date: Option<NaiveDate>,
    ) -> CatalogResult<Vec<ScheduleEntry>> {
        self.record("schedule", format!("schedule {country} {}", day(date)))?;
        Ok(self.schedule.clone())
    }

    fn get_web_schedule(
        &self,
        date: Option<NaiveDate>,
        country: Option<&str>,
    ) -> CatalogResult<Vec<ScheduleEntry>> {
        self.record(
            "web schedule",
            format!("web {} {}", day(date), country.unwrap_or("-")),
        )?;
        Ok(self.schedule.clone())
    }
}
