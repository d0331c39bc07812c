use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use time::macros::time;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, Time};

use crate::app::{App, AppState};
use crate::config::{parse_date, AppConfig, ConfigPaths};
use crate::timeline::boundaries::{items_on_day, week_boundaries, week_items};
use crate::timeline::{sample, TimelineStore};
use crate::views::labels::clock_time;
use crate::views::{
    generate_day_view, generate_two_day_view, generate_week_view, DaySummary, DayView,
    MeetingEntry, StandoutRules, TwoDayView, WeekView,
};

const REFERENCE_TIME: Time = time!(12:00);

#[derive(Args, Debug, Clone, Default)]
pub struct AgendaArgs {
    /// Date to summarise as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
    /// Summarise the Monday-Sunday week containing the date
    #[arg(long, conflicts_with = "two_day")]
    pub week: bool,
    /// Summarise the date and the following day side by side
    #[arg(long)]
    pub two_day: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Output file (stdout when omitted)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run_tui(config: &AppConfig, paths: &ConfigPaths, reference: PrimitiveDateTime) -> Result<()> {
    let store = load_store(config, paths, reference)?;
    let mut app = App::new(AppState::new(store, reference, config));
    app.run()
}

/// The injected "now": `--today` beats `reference_date` in config, which
/// beats the local clock. Fixed dates resolve to noon.
pub fn resolve_reference(today: Option<&str>, config: &AppConfig) -> Result<PrimitiveDateTime> {
    if let Some(raw) = today {
        let date = parse_date(raw).ok_or_else(|| anyhow!("--today expects YYYY-MM-DD, got {raw:?}"))?;
        return Ok(date.with_time(REFERENCE_TIME));
    }
    if let Some(date) = config.reference_date() {
        return Ok(date.with_time(REFERENCE_TIME));
    }
    let now = OffsetDateTime::now_local().unwrap_or_else(|err| {
        tracing::warn!(%err, "local offset unavailable, using UTC");
        OffsetDateTime::now_utc()
    });
    Ok(PrimitiveDateTime::new(now.date(), now.time()))
}

/// Configured `data_file`, else `timeline.json` in the data directory, else
/// generated sample data around `reference`.
pub fn load_store(
    config: &AppConfig,
    paths: &ConfigPaths,
    reference: PrimitiveDateTime,
) -> Result<TimelineStore> {
    if let Some(path) = &config.data_file {
        return TimelineStore::load_json(path)
            .with_context(|| format!("loading timeline {}", path.display()));
    }
    if paths.timeline_file.exists() {
        return TimelineStore::load_json(&paths.timeline_file)
            .with_context(|| format!("loading timeline {}", paths.timeline_file.display()));
    }
    tracing::info!(seed = config.sample.seed, "no timeline file, using sample data");
    TimelineStore::new(sample::generate(reference, &config.sample))
        .context("building sample timeline")
}

pub fn render_agenda(
    store: &TimelineStore,
    config: &AppConfig,
    reference: PrimitiveDateTime,
    args: &AgendaArgs,
) -> Result<String> {
    let date = match args.date.as_deref() {
        Some(raw) => {
            parse_date(raw).ok_or_else(|| anyhow!("--date expects YYYY-MM-DD, got {raw:?}"))?
        }
        None => reference.date(),
    };
    let rules = StandoutRules::from_config(&config.standouts);

    if args.week {
        let bounds = week_boundaries(date);
        let view = generate_week_view(week_items(date, store.items()), bounds, reference, &rules);
        return Ok(format_week(&view));
    }
    if args.two_day {
        let next = date
            .checked_add(Duration::days(1))
            .ok_or_else(|| anyhow!("no day follows {date}"))?;
        let items: Vec<_> = items_on_day(date, store.items())
            .iter()
            .chain(items_on_day(next, store.items()))
            .cloned()
            .collect();
        let Some(view) = generate_two_day_view(&items) else {
            bail!("two-day agenda needs items on both {date} and {next}");
        };
        return Ok(format_two_day(&view));
    }
    let view = generate_day_view(date, items_on_day(date, store.items()), reference, &rules);
    Ok(format_day(&view))
}

pub fn export_sample(config: &AppConfig, reference: PrimitiveDateTime, args: &ExportArgs) -> Result<()> {
    let store = TimelineStore::new(sample::generate(reference, &config.sample))
        .context("building sample timeline")?;
    let json = store.to_json_pretty().context("serializing sample timeline")?;
    match &args.out {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), items = store.len(), "exported sample timeline");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn write_header(out: &mut String, header: &str, sub_header: &str) {
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{sub_header}");
    let _ = writeln!(out);
}

fn write_standouts(out: &mut String, standouts: &[String]) {
    let _ = writeln!(out, "What stands out:");
    if standouts.is_empty() {
        let _ = writeln!(out, "  (nothing)");
    }
    for standout in standouts {
        let _ = writeln!(out, "  * {standout}");
    }
}

fn write_meeting(out: &mut String, entry: &MeetingEntry) {
    let _ = write!(out, "  {:>8}  {}", clock_time(entry.at), entry.title);
    if !entry.location.is_empty() {
        let _ = write!(out, " ({})", entry.location);
    }
    let _ = writeln!(out);
}

fn format_day(view: &DayView) -> String {
    let mut out = String::new();
    write_header(&mut out, &view.header, &view.sub_header);
    write_standouts(&mut out, &view.standouts);
    let _ = writeln!(out, "Calendar:");
    for entry in &view.calendar_events {
        write_meeting(&mut out, entry);
    }
    let _ = writeln!(
        out,
        "Emails received: {}  Notes created: {}  Tasks completed: {}",
        view.stats.emails_received, view.stats.notes_created, view.stats.tasks_completed
    );
    out
}

fn format_week(view: &WeekView) -> String {
    let mut out = String::new();
    write_header(&mut out, &view.header, &view.sub_header);
    write_standouts(&mut out, &view.standouts);
    let _ = writeln!(out, "Key meetings:");
    for entry in &view.key_meetings {
        write_meeting(&mut out, entry);
    }
    let _ = writeln!(
        out,
        "Tasks: {} pending, {} completed",
        view.pending_tasks.len(),
        view.completed_tasks.len()
    );
    for task in &view.pending_tasks {
        let _ = writeln!(out, "  [ ] {}", task.title);
    }
    let _ = writeln!(
        out,
        "Emails: {}  Notes: {}",
        view.stats.total_emails, view.stats.total_notes
    );
    out
}

fn write_summary(out: &mut String, title: &str, summary: &DaySummary) {
    let _ = writeln!(out, "{title} ({})", summary.date);
    for entry in &summary.meetings {
        write_meeting(out, entry);
    }
    let _ = writeln!(
        out,
        "  tasks: {}  emails: {}  notes: {}",
        summary.tasks, summary.emails, summary.notes
    );
}

fn format_two_day(view: &TwoDayView) -> String {
    let mut out = String::new();
    write_header(&mut out, &view.header, &view.sub_header);
    write_summary(&mut out, "Look Back", &view.earlier);
    let _ = writeln!(out);
    write_summary(&mut out, "Look Ahead", &view.later);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::fixtures::{email, meeting, note, task};
    use tempfile::TempDir;
    use time::macros::{date, datetime};

    type TestResult<T = ()> = Result<T>;

    fn store() -> TestResult<TimelineStore> {
        Ok(TimelineStore::new(vec![
            meeting(1, datetime!(2025-07-03 10:00), "Client Call: Acme", 2),
            email(2, datetime!(2025-07-03 11:00), "URGENT: renewal", "maria@client.com"),
            note(3, datetime!(2025-07-04 09:00), "Idea"),
            task(4, datetime!(2025-07-04 10:00), "Finalize budget", datetime!(2025-07-04 17:00), false),
        ])?)
    }

    const REFERENCE: PrimitiveDateTime = datetime!(2025-07-04 12:00);

    #[test]
    fn cli_agenda_day_prints_standouts_and_stats() -> TestResult {
        let args = AgendaArgs {
            date: Some("2025-07-03".into()),
            ..AgendaArgs::default()
        };
        let out = render_agenda(&store()?, &AppConfig::default(), REFERENCE, &args)?;
        assert!(out.starts_with("Thursday\nJul 3, 2025\n"));
        assert!(out.contains("  * Important email from maria: \"URGENT: renewal\""));
        assert!(out.contains("10:00 AM  Client Call: Acme (Room 1)"));
        assert!(out.contains("Emails received: 1"));
        Ok(())
    }

    #[test]
    fn cli_agenda_defaults_to_the_reference_day() -> TestResult {
        let out = render_agenda(&store()?, &AppConfig::default(), REFERENCE, &AgendaArgs::default())?;
        assert!(out.starts_with("Today\n"));
        assert!(out.contains("  * Due today: Finalize budget"));
        Ok(())
    }

    #[test]
    fn cli_agenda_week_and_two_day() -> TestResult {
        let store = store()?;
        let week = AgendaArgs {
            week: true,
            ..AgendaArgs::default()
        };
        let out = render_agenda(&store, &AppConfig::default(), REFERENCE, &week)?;
        assert!(out.starts_with("This Week\nJun 30 - Jul 6, 2025\n"));
        assert!(out.contains("Key meeting: Client Call: Acme on Thu"));
        assert!(out.contains("High-priority task: Finalize budget"));

        let two_day = AgendaArgs {
            date: Some("2025-07-03".into()),
            two_day: true,
            ..AgendaArgs::default()
        };
        let out = render_agenda(&store, &AppConfig::default(), REFERENCE, &two_day)?;
        assert!(out.starts_with("Thursday & Friday\nJul 3 - Jul 4, 2025\n"));
        assert!(out.contains("Look Back (2025-07-03)"));
        assert!(out.contains("Look Ahead (2025-07-04)"));
        Ok(())
    }

    #[test]
    fn cli_agenda_rejects_bad_dates_and_half_empty_pairs() -> TestResult {
        let store = store()?;
        let bad = AgendaArgs {
            date: Some("03/07/2025".into()),
            ..AgendaArgs::default()
        };
        assert!(render_agenda(&store, &AppConfig::default(), REFERENCE, &bad).is_err());
        let lonely = AgendaArgs {
            date: Some("2025-07-04".into()),
            two_day: true,
            ..AgendaArgs::default()
        };
        assert!(render_agenda(&store, &AppConfig::default(), REFERENCE, &lonely).is_err());
        Ok(())
    }

    #[test]
    fn reference_prefers_flag_then_config() -> TestResult {
        let config = AppConfig {
            reference_date: Some("2025-07-01".into()),
            ..AppConfig::default()
        };
        assert_eq!(
            resolve_reference(Some("2025-07-04"), &config)?,
            datetime!(2025-07-04 12:00)
        );
        assert_eq!(resolve_reference(None, &config)?, datetime!(2025-07-01 12:00));
        assert!(resolve_reference(Some("tomorrow"), &config).is_err());
        Ok(())
    }

    #[test]
    fn load_store_prefers_data_dir_file_over_sample() -> TestResult {
        let temp = TempDir::new()?;
        let paths = ConfigPaths::rooted_at(temp.path());
        paths.ensure_directories()?;
        let config = AppConfig::default();

        let sample = load_store(&config, &paths, REFERENCE)?;
        assert!(sample.len() > 50);

        fs::write(&paths.timeline_file, store()?.to_json_pretty()?)?;
        let loaded = load_store(&config, &paths, REFERENCE)?;
        assert_eq!(loaded.len(), 4);
        Ok(())
    }

    #[test]
    fn missing_data_file_is_reported() -> TestResult {
        let temp = TempDir::new()?;
        let paths = ConfigPaths::rooted_at(temp.path());
        let config = AppConfig {
            data_file: Some(temp.path().join("absent.json")),
            ..AppConfig::default()
        };
        let err = load_store(&config, &paths, REFERENCE).expect_err("missing file");
        assert!(format!("{err:#}").contains("absent.json"));
        Ok(())
    }

    #[test]
    fn export_sample_writes_reloadable_json() -> TestResult {
        let temp = TempDir::new()?;
        let out = temp.path().join("sample.json");
        export_sample(
            &AppConfig::default(),
            REFERENCE,
            &ExportArgs {
                out: Some(out.clone()),
            },
        )?;
        let reloaded = TimelineStore::load_json(&out)?;
        assert_eq!(
            reloaded.date_span(),
            Some((date!(2025-06-27), date!(2025-07-10)))
        );
        Ok(())
    }
}
