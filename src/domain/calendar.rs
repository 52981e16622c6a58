use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::models::{Episode, Show};

pub const DAYS_PER_WEEK: i64 = 7;

/// Seven consecutive days starting on a Monday.
///
/// Every day of a `Week` is a representable date, so `end` and `days` never
/// overflow. Constructors return `None` near the ends of the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    start: NaiveDate,
}

impl Week {
    fn starting(start: NaiveDate) -> Option<Self> {
        start.checked_add_signed(Duration::days(DAYS_PER_WEEK - 1))?;
        Some(Self { start })
    }

    pub fn containing(date: NaiveDate) -> Option<Self> {
        let offset = date.weekday().num_days_from_monday() as i64;
        Self::starting(date.checked_sub_signed(Duration::days(offset))?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(DAYS_PER_WEEK - 1)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..DAYS_PER_WEEK).map(move |i| start + Duration::days(i))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    pub fn previous(&self) -> Option<Self> {
        Self::starting(self.start.checked_sub_signed(Duration::days(DAYS_PER_WEEK))?)
    }

    pub fn next(&self) -> Option<Self> {
        Self::starting(self.start.checked_add_signed(Duration::days(DAYS_PER_WEEK))?)
    }
}

impl Default for Week {
    /// The week of 1970-01-01.
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(1969, 12, 29).unwrap_or_default(),
        }
    }
}

pub fn has_aired(episode: &Episode, today: NaiveDate) -> bool {
    episode.air_date().is_some_and(|date| date <= today)
}

pub fn airs_today(episode: &Episode, today: NaiveDate) -> bool {
    episode.air_date() == Some(today)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEpisode {
    pub episode: Episode,
    pub show: Show,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub episodes: Vec<CalendarEpisode>,
}

/// Buckets the in-week episodes of each show by air date.
///
/// Every day of `week` gets a bucket, in order, even when empty. Within a
/// day entries keep the order of `shows` and then of each show's episodes.
pub fn group_by_day(week: Week, shows: &[(Show, Vec<Episode>)]) -> Vec<CalendarDay> {
    let mut days: Vec<CalendarDay> = week
        .days()
        .map(|date| CalendarDay {
            date,
            episodes: Vec::new(),
        })
        .collect();

    for (show, episodes) in shows {
        for episode in episodes {
            let Some(date) = episode.air_date() else {
                continue;
            };
            if !week.contains(date) {
                continue;
            }
            let index = (date - week.start()).num_days() as usize;
            days[index].episodes.push(CalendarEpisode {
                episode: episode.clone(),
                show: show.clone(),
            });
        }
    }

    days
}
