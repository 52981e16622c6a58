use anyhow::{anyhow, bail, Result};
use regex::Regex;
use std::sync::OnceLock;

use crate::domain::models::Episode;
use crate::workflows::timeline::ScheduleKind;

pub const HELP: &str = "\
Commands:
  search <query>     search the catalog
  tracked            list tracked shows
  calendar           weekly calendar of tracked shows
  next | prev        move the calendar one week
  today              back to the current week
  track <n>          track or untrack show number n
  open <n>           show the episodes of show number n
  watch <n|SxxEyy>   mark an episode of the open show watched or unwatched
  back               close the open show
  schedule [tv|web]  today's broadcast or streaming schedule
  help               this message
  quit               leave (tracked shows are not kept)";

/// Identifies an episode of the open show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeRef {
    /// 1-based row number in the episode list.
    Position(usize),
    Code { season: u32, number: u32 },
}

impl EpisodeRef {
    pub fn find<'a>(&self, episodes: &'a [Episode]) -> Option<&'a Episode> {
        match *self {
            EpisodeRef::Position(n) => n.checked_sub(1).and_then(|i| episodes.get(i)),
            EpisodeRef::Code { season, number } => episodes
                .iter()
                .find(|e| e.season == season && e.number == Some(number)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    Search(String),
    Tracked,
    Calendar,
    NextWeek,
    PreviousWeek,
    ThisWeek,
    Track(usize),
    Open(usize),
    Watch(EpisodeRef),
    Back,
    Schedule(ScheduleKind),
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "" => ShellCommand::Empty,
            "search" | "s" => {
                if rest.is_empty() {
                    bail!("Usage: search <query>");
                }
                ShellCommand::Search(rest.to_string())
            }
            "tracked" | "tracking" => ShellCommand::Tracked,
            "calendar" | "cal" => ShellCommand::Calendar,
            "next" => ShellCommand::NextWeek,
            "prev" | "previous" => ShellCommand::PreviousWeek,
            "today" => ShellCommand::ThisWeek,
            "track" | "t" => ShellCommand::Track(parse_position(rest, "track <n>")?),
            "open" | "o" => ShellCommand::Open(parse_position(rest, "open <n>")?),
            "watch" | "w" => ShellCommand::Watch(parse_episode_ref(rest)?),
            "back" | "b" => ShellCommand::Back,
            "schedule" => {
                let kind = if rest.is_empty() {
                    ScheduleKind::Tv
                } else {
                    ScheduleKind::parse(rest)
                        .ok_or_else(|| anyhow!("Usage: schedule [tv|web]"))?
                };
                ShellCommand::Schedule(kind)
            }
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => bail!("Unknown command '{other}'. Type 'help' for a list."),
        };
        Ok(command)
    }
}

fn parse_position(input: &str, usage: &str) -> Result<usize> {
    match input.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => bail!("Usage: {usage}"),
    }
}

fn parse_episode_ref(input: &str) -> Result<EpisodeRef> {
    if let Ok(n) = input.parse::<usize>() {
        if n > 0 {
            return Ok(EpisodeRef::Position(n));
        }
    }
    let (season, number) = parse_sxxexx(input)?;
    Ok(EpisodeRef::Code { season, number })
}

fn episode_code_pattern() -> &'static Regex {
    static CODE: OnceLock<Regex> = OnceLock::new();
    CODE.get_or_init(|| {
        Regex::new(r"(?i)^s(\d{1,2})e(\d{1,3})$").expect("episode code pattern is valid")
    })
}

fn parse_sxxexx(input: &str) -> Result<(u32, u32)> {
    let caps = episode_code_pattern()
        .captures(input)
        .ok_or(anyhow!("Usage: watch <n|SxxEyy>"))?;
    let season: u32 = caps
        .get(1)
        .ok_or(anyhow!("Invalid SXXEXX format"))?
        .as_str()
        .parse()?;
    let episode: u32 = caps
        .get(2)
        .ok_or(anyhow!("Invalid SXXEXX format"))?
        .as_str()
        .parse()?;
    Ok((season, episode))
}
