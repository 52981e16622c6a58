use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "showtrackr")]
#[command(version)]
#[command(about = "Search TV shows, track what you follow and see when new episodes air")]
pub struct Cli {
    /// Base URL of the TVMaze API
    #[arg(long = "api-url", global = true, env = "SHOWTRACKR_API_URL")]
    pub api_url: Option<String>,

    /// Country code for the broadcast schedule
    #[arg(long, global = true, env = "SHOWTRACKR_COUNTRY")]
    pub country: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Start an interactive tracking session (default)
    Shell,

    /// Search the catalog for shows
    Search {
        /// Words to search for
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show details and the episode list of a show
    Show {
        /// TVMaze show ID
        id: u64,
    },

    /// Episodes airing on one day
    Schedule {
        /// Streaming releases instead of broadcast TV
        #[arg(long)]
        web: bool,

        /// Day to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Weekly calendar for the given shows
    Calendar {
        /// TVMaze show IDs
        #[arg(required = true)]
        ids: Vec<u64>,

        /// Any day of the week to display (YYYY-MM-DD), defaults to this week
        #[arg(long)]
        week: Option<NaiveDate>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_shell() {
        let cli = Cli::try_parse_from(["showtrackr"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_search_words() {
        let cli = Cli::try_parse_from(["showtrackr", "search", "the", "wire"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Search {
                query: vec!["the".to_string(), "wire".to_string()]
            })
        );
    }

    #[test]
    fn test_parse_schedule_options() {
        let cli = Cli::try_parse_from([
            "showtrackr",
            "schedule",
            "--web",
            "--date",
            "2026-10-16",
            "--country",
            "GB",
        ])
        .unwrap();
        assert_eq!(cli.country.as_deref(), Some("GB"));
        assert_eq!(
            cli.command,
            Some(Command::Schedule {
                web: true,
                date: NaiveDate::from_ymd_opt(2026, 10, 16),
            })
        );
    }

    #[test]
    fn test_calendar_requires_ids() {
        assert!(Cli::try_parse_from(["showtrackr", "calendar"]).is_err());
        let cli = Cli::try_parse_from(["showtrackr", "calendar", "82", "169"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Calendar {
                ids: vec![82, 169],
                week: None
            })
        );
    }

    #[test]
    fn test_rejects_bad_date() {
        assert!(Cli::try_parse_from(["showtrackr", "schedule", "--date", "16/10/2026"]).is_err());
    }
}
