mod cli;
mod config;
mod domain;
mod infra;
mod workflows;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::collections::HashSet;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::{Overrides, Settings};
use domain::calendar::{group_by_day, Week};
use domain::models::{Episode, Show, ShowId};
use infra::tvmaze::TvMazeClient;
use infra::Catalog;
use workflows::shell::Shell;
use workflows::timeline::{self, ScheduleKind};
use workflows::views;

const DEFAULT_LOG_FILTER: &str = "showtrackr=warn";

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(Overrides {
        api_base_url: cli.api_url.clone(),
        country: cli.country.clone(),
    })?;
    init_tracing(cli.verbose, settings.log_level.as_deref());
    debug!(?settings, config = %config::get_config_path().display(), "settings loaded");

    let client = TvMazeClient::new(&settings.api_base_url);
    let today = Local::now().date_naive();

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => Shell::new(&client, &settings, today).run(),
        Command::Search { query } => print_search(&client, &query.join(" ")),
        Command::Show { id } => print_show(&client, id, today),
        Command::Schedule { web, date } => {
            let kind = if web { ScheduleKind::Web } else { ScheduleKind::Tv };
            print_schedule(&client, &settings, kind, date.unwrap_or(today), today)
        }
        Command::Calendar { ids, week } => {
            print_calendar(&client, &ids, week.unwrap_or(today), today)
        }
    }
}

fn init_tracing(verbose: bool, configured: Option<&str>) {
    let fallback = if verbose {
        "showtrackr=debug"
    } else {
        configured.unwrap_or(DEFAULT_LOG_FILTER)
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_search(catalog: &dyn Catalog, query: &str) -> Result<()> {
    let results = catalog.search_shows(query)?;
    info!(query, count = results.len(), "search finished");
    let shows: Vec<&Show> = results.iter().map(|r| &r.show).collect();
    print!(
        "{}",
        views::show_listing(&shows, &HashSet::new(), "No results found")
    );
    Ok(())
}

fn print_show(catalog: &dyn Catalog, id: ShowId, today: NaiveDate) -> Result<()> {
    let show = catalog
        .get_show(id)
        .with_context(|| format!("Could not load show {id}"))?;
    let episodes = catalog.get_show_episodes(id)?;
    print!(
        "{}",
        views::show_detail(&show, &episodes, &HashSet::new(), today)
    );
    Ok(())
}

fn print_schedule(
    catalog: &dyn Catalog,
    settings: &Settings,
    kind: ScheduleKind,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<()> {
    let entries = timeline::fetch_day(
        catalog,
        kind,
        &settings.country,
        date,
        settings.schedule_limit,
    )?;
    print!("{}", views::timeline(kind, date, today, &entries));
    Ok(())
}

fn print_calendar(
    catalog: &dyn Catalog,
    ids: &[ShowId],
    date: NaiveDate,
    today: NaiveDate,
) -> Result<()> {
    let Some(week) = Week::containing(date) else {
        bail!("No calendar week contains {date}");
    };
    let mut shows: Vec<(Show, Vec<Episode>)> = Vec::new();
    for &id in ids {
        if shows.iter().any(|(show, _)| show.id == id) {
            continue;
        }
        let show = catalog
            .get_show(id)
            .with_context(|| format!("Could not load show {id}"))?;
        let episodes = catalog.get_show_episodes(id)?;
        shows.push((show, episodes));
    }
    let days = group_by_day(week, &shows);
    print!("{}", views::weekly_calendar(week, &days, today));
    Ok(())
}
