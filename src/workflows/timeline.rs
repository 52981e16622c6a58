use chrono::NaiveDate;
use tracing::{error, info};

use crate::domain::models::ScheduleEntry;
use crate::infra::{Catalog, CatalogResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScheduleKind {
    #[default]
    Tv,
    Web,
}

impl ScheduleKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleKind::Tv => "TV",
            ScheduleKind::Web => "Streaming",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "tv" => Some(ScheduleKind::Tv),
            "web" | "streaming" => Some(ScheduleKind::Web),
            _ => None,
        }
    }
}

/// Fetches one day of the schedule and keeps the first `limit` entries.
pub fn fetch_day(
    catalog: &dyn Catalog,
    kind: ScheduleKind,
    country: &str,
    date: NaiveDate,
    limit: usize,
) -> CatalogResult<Vec<ScheduleEntry>> {
    let mut entries = match kind {
        ScheduleKind::Tv => catalog.get_schedule(country, Some(date))?,
        // The streaming schedule is requested for every region.
        ScheduleKind::Web => catalog.get_web_schedule(Some(date), None)?,
    };
    info!(kind = kind.label(), %date, count = entries.len(), "schedule loaded");
    entries.truncate(limit);
    Ok(entries)
}

/// Like [`fetch_day`], but a failed fetch is logged and shown as an empty day.
pub fn load_day(
    catalog: &dyn Catalog,
    kind: ScheduleKind,
    country: &str,
    date: NaiveDate,
    limit: usize,
) -> Vec<ScheduleEntry> {
    fetch_day(catalog, kind, country, date, limit).unwrap_or_else(|e| {
        error!("Failed to fetch {} schedule: {e}", kind.label());
        Vec::new()
    })
}
