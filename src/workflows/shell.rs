//! The interactive tracking session.

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::HashSet;
use tracing::{debug, error, info};

use crate::config::Settings;
use crate::domain::calendar::CalendarDay;
use crate::domain::models::{Episode, EpisodeId, Show};
use crate::domain::session::{Session, Tab, TrackChange, WatchChange};
use crate::infra::Catalog;
use crate::workflows::commands::{EpisodeRef, ShellCommand, HELP};
use crate::workflows::timeline::{self, ScheduleKind};
use crate::workflows::{views, weekly};

pub struct Shell<'a> {
    catalog: &'a dyn Catalog,
    settings: &'a Settings,
    session: Session,
    /// Episodes of the selected show, fetched when it is opened.
    episodes: Vec<Episode>,
    calendar: Vec<CalendarDay>,
}

impl<'a> Shell<'a> {
    pub fn new(catalog: &'a dyn Catalog, settings: &'a Settings, today: NaiveDate) -> Self {
        Self {
            catalog,
            settings,
            session: Session::new(today),
            episodes: Vec::new(),
            calendar: Vec::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        let today = Local::now().date_naive();

        println!("{}", views::header(self.session.tracked_count()));
        println!("{}", self.schedule(ScheduleKind::Tv, today));
        println!("Type 'help' for commands.");

        loop {
            let readline = rl.readline(&self.prompt());
            let line = match readline {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            };
            if !line.trim().is_empty() {
                if let Err(e) = rl.add_history_entry(line.as_str()) {
                    debug!("Could not record history entry: {e}");
                }
            }

            let command = match ShellCommand::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            };

            // The date can roll over during a long session.
            let today = Local::now().date_naive();
            match self.execute(command, today) {
                Ok(Some(output)) => {
                    if !output.is_empty() {
                        println!("{}", output.trim_end());
                    }
                }
                Ok(None) => break,
                Err(e) => eprintln!("{e}"),
            }
        }

        info!(
            tracked = self.session.tracked_count(),
            "session ended, tracked shows discarded"
        );
        Ok(())
    }

    pub fn prompt(&self) -> String {
        match self.session.selected() {
            Some(show) => format!("[{}]> ", show.name),
            None => {
                let tab = match self.session.tab() {
                    Tab::Search => "search",
                    Tab::Tracked => "tracked",
                    Tab::Calendar => "calendar",
                };
                format!("[{tab}] {} tracked> ", self.session.tracked_count())
            }
        }
    }

    /// Applies one command and returns what to print, or `None` to quit.
    pub fn execute(&mut self, command: ShellCommand, today: NaiveDate) -> Result<Option<String>> {
        let output = match command {
            ShellCommand::Empty => String::new(),
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Quit => return Ok(None),
            ShellCommand::Search(query) => self.search(&query),
            ShellCommand::Tracked => {
                self.session.back();
                self.session.set_tab(Tab::Tracked);
                self.listing()
            }
            ShellCommand::Calendar => self.show_calendar(today),
            ShellCommand::NextWeek => {
                if !self.session.next_week() {
                    bail!("No later week to show");
                }
                self.show_calendar(today)
            }
            ShellCommand::PreviousWeek => {
                if !self.session.previous_week() {
                    bail!("No earlier week to show");
                }
                self.show_calendar(today)
            }
            ShellCommand::ThisWeek => {
                if !self.session.reset_week(today) {
                    bail!("No calendar week contains {today}");
                }
                self.show_calendar(today)
            }
            ShellCommand::Track(n) => self.track(n)?,
            ShellCommand::Open(n) => self.open(n, today)?,
            ShellCommand::Watch(episode) => self.watch(episode, today)?,
            ShellCommand::Back => {
                self.session.back();
                self.episodes.clear();
                self.current_view(today)
            }
            ShellCommand::Schedule(kind) => self.schedule(kind, today),
        };
        Ok(Some(output))
    }

    fn search(&mut self, query: &str) -> String {
        let Some(query) = self.session.begin_search(query) else {
            return String::new();
        };
        self.session.back();
        let results = match self.catalog.search_shows(&query) {
            Ok(results) => results,
            Err(e) => {
                error!("Failed to search shows: {e}");
                Vec::new()
            }
        };
        info!(%query, count = results.len(), "search finished");
        self.session.set_search_results(results);
        self.listing()
    }

    fn listing(&self) -> String {
        let shows = self.session.displayed_shows();
        views::show_listing(
            &shows,
            &self.session.tracked_ids(),
            self.session.empty_listing_message(),
        )
    }

    fn show_calendar(&mut self, today: NaiveDate) -> String {
        self.session.back();
        self.session.set_tab(Tab::Calendar);
        self.refresh_calendar(today)
    }

    fn refresh_calendar(&mut self, today: NaiveDate) -> String {
        let week = self.session.week();
        if self.session.tracked_count() == 0 {
            self.calendar.clear();
            return format!(
                "Weekly Calendar  {}\n  Track some shows to see their episodes here\n",
                views::week_range(week)
            );
        }
        self.calendar = weekly::load_week(self.catalog, self.session.tracked_shows(), week);
        views::weekly_calendar(week, &self.calendar, today)
    }

    fn current_view(&mut self, today: NaiveDate) -> String {
        match self.session.tab() {
            Tab::Calendar => self.refresh_calendar(today),
            _ => self.listing(),
        }
    }

    /// The show a 1-based listing number refers to on the current screen.
    fn show_at(&self, n: usize) -> Result<Show> {
        let Some(index) = n.checked_sub(1) else {
            bail!("Items are numbered from 1");
        };
        let show = match self.session.tab() {
            Tab::Calendar => self
                .calendar
                .iter()
                .flat_map(|day| day.episodes.iter())
                .nth(index)
                .map(|item| item.show.clone()),
            _ => self
                .session
                .displayed_shows()
                .get(index)
                .map(|show| (*show).clone()),
        };
        match show {
            Some(show) => Ok(show),
            None => bail!("No item {n} in the current list"),
        }
    }

    fn track(&mut self, n: usize) -> Result<String> {
        let show = match self.session.selected() {
            Some(selected) if n == 1 => selected.clone(),
            Some(_) => bail!("Only the open show (1) can be tracked from here"),
            None => self.show_at(n)?,
        };
        let change = self.session.toggle_track(&show);
        info!(
            show_id = show.id,
            tracked = self.session.is_tracked(show.id),
            "tracking toggled"
        );
        let verb = match change {
            TrackChange::Tracked => "Now tracking",
            TrackChange::Untracked => "Stopped tracking",
        };
        Ok(format!(
            "{verb} {}\n{}",
            show.name,
            views::header(self.session.tracked_count())
        ))
    }

    fn open(&mut self, n: usize, today: NaiveDate) -> Result<String> {
        if self.session.selected().is_some() {
            bail!("Go 'back' before opening another show");
        }
        let show = self.show_at(n)?;
        self.episodes = weekly::load_episodes(self.catalog, show.id);
        self.session.select(show);
        Ok(self.detail(today))
    }

    fn detail(&self, today: NaiveDate) -> String {
        let Some(show) = self.session.selected() else {
            return String::new();
        };
        let watched: HashSet<EpisodeId> = self
            .episodes
            .iter()
            .filter(|e| self.session.is_watched(e.id))
            .map(|e| e.id)
            .collect();
        views::show_detail(show, &self.episodes, &watched, today)
    }

    fn watch(&mut self, episode_ref: EpisodeRef, today: NaiveDate) -> Result<String> {
        if self.session.selected().is_none() {
            bail!("Open a show first");
        }
        let Some(episode) = episode_ref.find(&self.episodes).cloned() else {
            bail!("No such episode in this show");
        };
        match self.session.toggle_watched_episode(&episode, today) {
            WatchChange::NotAired => bail!("{} has not aired yet", episode.code()),
            change => info!(episode_id = episode.id, ?change, "watched toggled"),
        }
        let position = self
            .episodes
            .iter()
            .position(|e| e.id == episode.id)
            .unwrap_or_default();
        Ok(format!(
            "{}\n{}/{} episodes watched",
            views::episode_row(
                position + 1,
                &episode,
                self.session.is_watched(episode.id),
                today
            ),
            self.session.watched_count(&self.episodes),
            self.episodes.len()
        ))
    }

    fn schedule(&self, kind: ScheduleKind, today: NaiveDate) -> String {
        let entries = timeline::load_day(
            self.catalog,
            kind,
            &self.settings.country,
            today,
            self.settings.schedule_limit,
        );
        views::timeline(kind, today, today, &entries)
    }
}
