use tracing::{debug, error};

use crate::domain::calendar::{group_by_day, CalendarDay, Week};
use crate::domain::models::{Episode, Show, ShowId};
use crate::infra::Catalog;

/// Episode list of one show; a failed fetch is logged and yields no episodes.
pub fn load_episodes(catalog: &dyn Catalog, show_id: ShowId) -> Vec<Episode> {
    match catalog.get_show_episodes(show_id) {
        Ok(episodes) => {
            debug!(show_id, count = episodes.len(), "episodes loaded");
            episodes
        }
        Err(e) => {
            error!("Failed to fetch episodes for show {show_id}: {e}");
            Vec::new()
        }
    }
}

/// Builds the calendar for `week` from the episode lists of `shows`.
///
/// Episodes are re-fetched on every call. A show whose episodes cannot be
/// fetched simply contributes nothing.
pub fn load_week(catalog: &dyn Catalog, shows: &[Show], week: Week) -> Vec<CalendarDay> {
    let with_episodes: Vec<(Show, Vec<Episode>)> = shows
        .iter()
        .map(|show| (show.clone(), load_episodes(catalog, show.id)))
        .collect();
    group_by_day(week, &with_episodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::fake::FakeCatalog;
    use chrono::NaiveDate;

    fn show(id: u64) -> Show {
        Show {
            id,
            name: format!("Show {id}"),
            ..Default::default()
        }
    }

    fn episode(id: u64, airdate: &str) -> Episode {
        Episode {
            id,
            airdate: airdate.to_string(),
            ..Default::default()
        }
    }

    fn week() -> Week {
        Week::containing(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()).unwrap()
    }

    #[test]
    fn test_no_tracked_shows_skips_fetching() {
        let catalog = FakeCatalog::default();
        let days = load_week(&catalog, &[], week());
        assert_eq!(days.len(), 7);
        assert!(catalog.calls().is_empty());
    }

    #[test]
    fn test_load_week_fetches_each_show() {
        let catalog = FakeCatalog::default()
            .with_show(show(1), vec![episode(10, "2026-10-13"), episode(11, "2026-10-20")])
            .with_show(show(2), vec![episode(20, "2026-10-13")]);

        let days = load_week(&catalog, &[show(1), show(2)], week());
        assert_eq!(
            catalog.calls(),
            vec!["episodes 1".to_string(), "episodes 2".to_string()]
        );
        let tuesday: Vec<u64> = days[1].episodes.iter().map(|e| e.episode.id).collect();
        assert_eq!(tuesday, vec![10, 20]);
    }

    #[test]
    fn test_failed_fetch_yields_empty_calendar() {
        let catalog = FakeCatalog::failing();
        let days = load_week(&catalog, &[show(1)], week());
        assert!(days.iter().all(|d| d.episodes.is_empty()));
        assert!(load_episodes(&catalog, 1).is_empty());
    }
}
