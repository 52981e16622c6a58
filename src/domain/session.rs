//! In-memory state for one tracking session.
//!
//! Nothing here outlives the process: tracked shows and watched episodes are
//! created on start-up, mutated by user commands and dropped on exit.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::domain::calendar::Week;
use crate::domain::models::{Episode, EpisodeId, SearchResult, Show, ShowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Search,
    Tracked,
    Calendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackChange {
    Tracked,
    Untracked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchChange {
    Watched,
    Unwatched,
    /// The episode has not aired yet and cannot be marked.
    NotAired,
}

#[derive(Debug)]
pub struct Session {
    tracked: Vec<Show>,
    watched: HashSet<EpisodeId>,
    tab: Tab,
    selected: Option<Show>,
    search_results: Vec<SearchResult>,
    has_searched: bool,
    week: Week,
}

impl Session {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tracked: Vec::new(),
            watched: HashSet::new(),
            tab: Tab::default(),
            selected: None,
            search_results: Vec::new(),
            has_searched: false,
            week: Week::containing(today).unwrap_or_default(),
        }
    }

    pub fn toggle_track(&mut self, show: &Show) -> TrackChange {
        if let Some(pos) = self.tracked.iter().position(|s| s.id == show.id) {
            self.tracked.remove(pos);
            TrackChange::Untracked
        } else {
            self.tracked.push(show.clone());
            TrackChange::Tracked
        }
    }

    pub fn is_tracked(&self, id: ShowId) -> bool {
        self.tracked.iter().any(|s| s.id == id)
    }

    pub fn tracked_ids(&self) -> HashSet<ShowId> {
        self.tracked.iter().map(|s| s.id).collect()
    }

    pub fn tracked_shows(&self) -> &[Show] {
        &self.tracked
    }

    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    pub fn toggle_watched(&mut self, episode_id: EpisodeId) -> WatchChange {
        if self.watched.remove(&episode_id) {
            WatchChange::Unwatched
        } else {
            self.watched.insert(episode_id);
            WatchChange::Watched
        }
    }

    /// Like [`Session::toggle_watched`], but refuses episodes that air after `today`.
    pub fn toggle_watched_episode(&mut self, episode: &Episode, today: NaiveDate) -> WatchChange {
        if !crate::domain::calendar::has_aired(episode, today) {
            return WatchChange::NotAired;
        }
        self.toggle_watched(episode.id)
    }

    pub fn is_watched(&self, episode_id: EpisodeId) -> bool {
        self.watched.contains(&episode_id)
    }

    pub fn watched_count(&self, episodes: &[Episode]) -> usize {
        episodes.iter().filter(|e| self.is_watched(e.id)).count()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn selected(&self) -> Option<&Show> {
        self.selected.as_ref()
    }

    pub fn select(&mut self, show: Show) {
        self.selected = Some(show);
    }

    pub fn back(&mut self) {
        self.selected = None;
    }

    /// Normalises a search query. Returns `None` for blank input, which
    /// leaves the session untouched.
    pub fn begin_search(&mut self, query: &str) -> Option<String> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.has_searched = true;
        self.tab = Tab::Search;
        Some(query.to_string())
    }

    pub fn set_search_results(&mut self, results: Vec<SearchResult>) {
        self.search_results = results;
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    /// Shows listed by the active tab.
    pub fn displayed_shows(&self) -> Vec<&Show> {
        match self.tab {
            Tab::Tracked => self.tracked.iter().collect(),
            Tab::Search => self.search_results.iter().map(|r| &r.show).collect(),
            Tab::Calendar => Vec::new(),
        }
    }

    pub fn empty_listing_message(&self) -> &'static str {
        match self.tab {
            Tab::Tracked => "No tracked shows yet. Search and add some!",
            _ if self.has_searched() => "No results found",
            _ => "Search for a TV show to get started",
        }
    }

    pub fn week(&self) -> Week {
        self.week
    }

    /// Moves the calendar back a week. Returns `false`, leaving the week as
    /// is, when there is no earlier week.
    pub fn previous_week(&mut self) -> bool {
        self.move_week(self.week.previous())
    }

    pub fn next_week(&mut self) -> bool {
        self.move_week(self.week.next())
    }

    pub fn reset_week(&mut self, today: NaiveDate) -> bool {
        self.move_week(Week::containing(today))
    }

    fn move_week(&mut self, week: Option<Week>) -> bool {
        match week {
            Some(week) => {
                self.week = week;
                true
            }
            None => false,
        }
    }
}
