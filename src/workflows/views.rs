//! Plain-text renderings of the tracker screens.
//!
//! Every function returns a `String` so the shell and the one-shot commands
//! share the same output, and so layouts can be asserted in tests.

use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt::Write;

use crate::domain::calendar::{airs_today, has_aired, CalendarDay, Week};
use crate::domain::models::{Episode, EpisodeId, ScheduleEntry, Show, ShowId};
use crate::domain::text::{image_url, network_name, strip_html, truncate};
use crate::workflows::timeline::ScheduleKind;

const PROGRESS_WIDTH: usize = 30;
const SUMMARY_WIDTH: usize = 240;
const CALENDAR_LINE_WIDTH: usize = 48;

pub fn header(tracked_count: usize) -> String {
    format!("ShowTrackr · Tracking {tracked_count} shows")
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn status_badge(status: &str) -> String {
    let marker = match status {
        "Running" => "●",
        "To Be Determined" | "In Development" => "◐",
        // Anything else is styled like an ended show.
        _ => "○",
    };
    if status.is_empty() {
        format!("{marker} Unknown")
    } else {
        format!("{marker} {status}")
    }
}

pub fn show_card(index: usize, show: &Show, tracked: bool) -> String {
    let mut line = format!(
        "{:>3}. [{}] {}  {}  {}",
        index,
        if tracked { "✓" } else { "+" },
        show.name,
        status_badge(&show.status),
        network_name(show),
    );
    if !show.genres.is_empty() {
        let genres: Vec<&str> = show.genres.iter().take(2).map(String::as_str).collect();
        let _ = write!(line, " · {}", genres.join(", "));
    }
    if let Some(average) = show.rating.average {
        let _ = write!(line, "  ★ {average}");
    }
    line
}

pub fn show_listing(shows: &[&Show], tracked: &HashSet<ShowId>, empty_message: &str) -> String {
    if shows.is_empty() {
        return format!("  {empty_message}\n");
    }
    let mut out = String::new();
    for (i, show) in shows.iter().enumerate() {
        let _ = writeln!(out, "{}", show_card(i + 1, show, tracked.contains(&show.id)));
    }
    out
}

pub fn progress_bar(watched: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (watched * width / total).min(width)
    };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn episode_row(
    index: usize,
    episode: &Episode,
    watched: bool,
    today: NaiveDate,
) -> String {
    let marker = if watched {
        "✓"
    } else if has_aired(episode, today) {
        " "
    } else {
        "·"
    };
    let mut line = format!("{:>4}. ({marker}) {:<8}", index, episode.code());
    if airs_today(episode, today) {
        line.push_str(" TODAY");
    }
    let _ = write!(line, " {}", episode.name);
    if let Some(date) = episode.air_date() {
        let _ = write!(line, "  {}", format_date(date));
    }
    line
}

pub fn show_detail(
    show: &Show,
    episodes: &[Episode],
    watched: &HashSet<EpisodeId>,
    today: NaiveDate,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", show.name);
    let _ = writeln!(out, "{} · {}", show.genres.join(", "), network_name(show));
    if let Some(url) = image_url(show) {
        let _ = writeln!(out, "Poster: {url}");
    }
    let summary = strip_html(show.summary.as_deref());
    if !summary.is_empty() {
        let _ = writeln!(out, "{}", truncate(&summary, SUMMARY_WIDTH));
    }

    if !episodes.is_empty() {
        let watched_count = episodes.iter().filter(|e| watched.contains(&e.id)).count();
        let _ = writeln!(
            out,
            "{}/{} episodes watched {}",
            watched_count,
            episodes.len(),
            progress_bar(watched_count, episodes.len(), PROGRESS_WIDTH)
        );
    }
    out.push('\n');

    if episodes.is_empty() {
        out.push_str("  No episodes listed\n");
        return out;
    }
    for (i, episode) in episodes.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}",
            episode_row(i + 1, episode, watched.contains(&episode.id), today)
        );
    }
    out
}

pub fn timeline(
    kind: ScheduleKind,
    date: NaiveDate,
    today: NaiveDate,
    entries: &[ScheduleEntry],
) -> String {
    let mut out = if date == today {
        format!("Today's Schedule ({})\n", kind.label())
    } else {
        format!("Schedule for {} ({})\n", format_date(date), kind.label())
    };
    if entries.is_empty() {
        if date == today {
            out.push_str("  No episodes airing today\n");
        } else {
            out.push_str("  No episodes airing that day\n");
        }
        return out;
    }
    for entry in entries {
        let mut line = format!("  {}", entry.episode.code());
        if !entry.episode.airtime.is_empty() {
            let _ = write!(line, " {}", entry.episode.airtime);
        }
        let _ = write!(line, "  {}", entry.episode.name);
        if let Some(show) = entry.owning_show() {
            let _ = write!(line, " — {}", show.name);
        }
        let _ = writeln!(out, "{line}");
    }
    out
}

pub fn week_range(week: Week) -> String {
    format!(
        "{} – {}",
        week.start().format("%b %-d"),
        format_date(week.end())
    )
}

/// Weekly calendar. Entries are numbered across the whole week so they can
/// be opened by number.
pub fn weekly_calendar(week: Week, days: &[CalendarDay], today: NaiveDate) -> String {
    let mut out = format!("Weekly Calendar  {}\n", week_range(week));
    let mut number = 0;
    for day in days {
        let marker = if day.date == today { " ◀ today" } else { "" };
        let _ = writeln!(
            out,
            "\n{} {}{}",
            day.date.format("%a"),
            day.date.format("%-d"),
            marker
        );
        if day.episodes.is_empty() {
            out.push_str("       —\n");
            continue;
        }
        for item in &day.episodes {
            number += 1;
            let line = format!(
                "{} {} · {}",
                item.episode.code(),
                item.show.name,
                item.episode.name
            );
            let _ = writeln!(
                out,
                "{:>4}. {}",
                number,
                truncate(&line, CALENDAR_LINE_WIDTH)
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::CalendarEpisode;
    use crate::domain::models::{Channel, Embedded, Rating};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_show() -> Show {
        Show {
            id: 82,
            name: "Game of Thrones".to_string(),
            status: "Ended".to_string(),
            genres: vec![
                "Drama".to_string(),
                "Adventure".to_string(),
                "Fantasy".to_string(),
            ],
            network: Some(Channel {
                name: "HBO".to_string(),
                ..Default::default()
            }),
            rating: Rating { average: Some(8.9) },
            summary: Some("<p>Nine noble families.</p>".to_string()),
            ..Default::default()
        }
    }

    fn episode(id: u64, number: u32, airdate: &str) -> Episode {
        Episode {
            id,
            season: 1,
            number: Some(number),
            name: format!("Episode {number}"),
            airdate: airdate.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_header_counts_tracked_shows() {
        assert_eq!(header(0), "ShowTrackr · Tracking 0 shows");
        assert_eq!(header(1), "ShowTrackr · Tracking 1 shows");
        assert_eq!(header(3), "ShowTrackr · Tracking 3 shows");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2011, 4, 17)), "Apr 17, 2011");
        assert_eq!(format_date(date(2026, 1, 5)), "Jan 5, 2026");
    }

    #[test]
    fn test_status_badge_falls_back_to_ended_style() {
        assert_eq!(status_badge("Running"), "● Running");
        assert_eq!(status_badge("In Development"), "◐ In Development");
        assert_eq!(status_badge("Ended"), "○ Ended");
        assert_eq!(status_badge("Cancelled"), "○ Cancelled");
    }

    #[test]
    fn test_show_card() {
        let show = sample_show();
        assert_eq!(
            show_card(1, &show, true),
            "  1. [✓] Game of Thrones  ○ Ended  HBO · Drama, Adventure  ★ 8.9"
        );

        let bare = Show {
            name: "Bare".to_string(),
            status: "Running".to_string(),
            ..Default::default()
        };
        assert_eq!(show_card(12, &bare, false), " 12. [+] Bare  ● Running  Unknown");
    }

    #[test]
    fn test_show_listing_empty_message() {
        let listing = show_listing(&[], &HashSet::new(), "No results found");
        assert_eq!(listing, "  No results found\n");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 4, 4), "[----]");
        assert_eq!(progress_bar(2, 4, 4), "[##--]");
        assert_eq!(progress_bar(4, 4, 4), "[####]");
        assert_eq!(progress_bar(0, 0, 2), "[--]");
    }

    #[test]
    fn test_episode_row_markers() {
        let today = date(2026, 10, 16);
        assert_eq!(
            episode_row(1, &episode(1, 1, "2026-10-09"), true, today),
            "   1. (✓) S1E1     Episode 1  Oct 9, 2026"
        );
        assert_eq!(
            episode_row(2, &episode(2, 2, "2026-10-16"), false, today),
            "   2. ( ) S1E2     TODAY Episode 2  Oct 16, 2026"
        );
        assert_eq!(
            episode_row(3, &episode(3, 3, ""), false, today),
            "   3. (·) S1E3     Episode 3"
        );
    }

    #[test]
    fn test_show_detail_progress() {
        let today = date(2026, 10, 16);
        let episodes = vec![episode(1, 1, "2026-10-01"), episode(2, 2, "2026-10-08")];
        let watched: HashSet<EpisodeId> = [1].into_iter().collect();

        let detail = show_detail(&sample_show(), &episodes, &watched, today);
        assert!(detail.starts_with("Game of Thrones\nDrama, Adventure, Fantasy · HBO\nNine noble families.\n"));
        assert!(detail.contains("1/2 episodes watched"));
        assert!(detail.contains("(✓) S1E1"));
    }

    #[test]
    fn test_timeline_uses_embedded_show() {
        let entry = ScheduleEntry {
            episode: Episode {
                season: 2,
                number: None,
                name: "Special".to_string(),
                airtime: "20:00".to_string(),
                ..Default::default()
            },
            show: None,
            embedded: Some(Embedded {
                show: Some(sample_show()),
            }),
        };
        let today = date(2026, 10, 16);
        let text = timeline(ScheduleKind::Web, today, today, &[entry]);
        assert_eq!(
            text,
            "Today's Schedule (Streaming)\n  S2E? 20:00  Special — Game of Thrones\n"
        );

        let empty = timeline(ScheduleKind::Tv, today, today, &[]);
        assert!(empty.ends_with("No episodes airing today\n"));

        let other_day = timeline(ScheduleKind::Tv, date(2026, 10, 17), today, &[]);
        assert_eq!(
            other_day,
            "Schedule for Oct 17, 2026 (TV)\n  No episodes airing that day\n"
        );
    }

    #[test]
    fn test_weekly_calendar_layout() {
        let today = date(2026, 10, 16);
        let week = Week::containing(today).unwrap();
        let mut days: Vec<CalendarDay> = week
            .days()
            .map(|date| CalendarDay {
                date,
                episodes: Vec::new(),
            })
            .collect();
        days[4].episodes.push(CalendarEpisode {
            episode: episode(7, 5, "2026-10-16"),
            show: sample_show(),
        });

        let text = weekly_calendar(week, &days, today);
        assert!(text.starts_with("Weekly Calendar  Oct 12 – Oct 18, 2026\n"));
        assert!(text.contains("\nMon 12\n       —\n"));
        assert!(text.contains("\nFri 16 ◀ today\n   1. S1E5 Game of Thrones · Episode 5\n"));
    }
}
