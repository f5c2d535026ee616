use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{NaiveDateTime, TimeDelta, TimeZone};
use clap::{Parser, Subcommand};
use kalends_core::config::{Settings, load_config};
use kalends_model::{CalendarTime, VCalendar, VEvent};
use kalends_rfc::rfc::ical::TimezoneDatabase;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

/// Inspect and produce iCalendar data.
#[derive(Parser)]
#[command(name = "kalends")]
#[command(about = "iCalendar inspection and generation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the PRODID, VERSION and METHOD of a calendar file
    Inspect {
        /// Path to an .ics file
        path: PathBuf,
    },
    /// Print the VTIMEZONE definition of an IANA zone
    Zone {
        /// Zone name, bare or with the configured TZID prefix
        name: String,
        /// First year the observances cover
        #[arg(long)]
        year: Option<i32>,
        /// Last year the observances cover, defaults to the first
        #[arg(long)]
        until: Option<i32>,
    },
    /// Render a calendar holding a single event
    Event {
        /// Event summary
        summary: String,
        /// Local start time, e.g. 2020-05-09T11:00:00
        #[arg(long)]
        start: NaiveDateTime,
        /// Zone the start time is in
        #[arg(long, default_value = "UTC")]
        zone: String,
        /// Length of the event in minutes
        #[arg(long, default_value = "60")]
        minutes: u32,
    },
}

fn inspect(path: &Path) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let calendar = VCalendar::parse(&text)?;

    let method = calendar
        .method
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    Ok(format!(
        "PRODID: {}\nVERSION: {}\nMETHOD: {method}\n",
        calendar.prodid,
        kalends_core::constants::ICALENDAR_VERSION
    ))
}

fn single_event(
    settings: &Settings,
    tzdb: &TimezoneDatabase,
    summary: &str,
    start: NaiveDateTime,
    zone: &str,
    minutes: u32,
) -> anyhow::Result<String> {
    let tz = tzdb.resolve(zone)?;
    let dtstart = tz
        .from_local_datetime(&start)
        .earliest()
        .with_context(|| format!("{start} does not exist in {zone}"))?;
    let dtend = dtstart + TimeDelta::minutes(i64::from(minutes));

    let event = VEvent::new(summary, CalendarTime::from(dtstart))
        .with_dtend(CalendarTime::from(dtend))
        .with_tzid_prefix(settings.timezone.use_prefix);
    let calendar =
        VCalendar::from_config(&settings.calendar, &settings.timezone).with_event(event);
    Ok(calendar.to_ical_string(tzdb)?)
}

fn run(command: &Commands, settings: &Settings, tzdb: &TimezoneDatabase) -> anyhow::Result<String> {
    match command {
        Commands::Inspect { path } => inspect(path),
        Commands::Zone { name, year, until } => {
            let tz = tzdb.resolve(name)?;
            let first = year.unwrap_or(tzdb.reference_year());
            let years = first..=until.unwrap_or(first);
            Ok(tzdb.definition_string(tz, settings.timezone.use_prefix, Some(years))?)
        }
        Commands::Event {
            summary,
            start,
            zone,
            minutes,
        } => single_event(settings, tzdb, summary, *start, zone, *minutes),
    }
}

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config()?;

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let tzdb = TimezoneDatabase::install(TimezoneDatabase::from_config(&config.timezone)?);

    let output = run(&cli.command, &config, tzdb)?;
    print!("{output}");
    Ok(())
}
