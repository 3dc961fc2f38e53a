pub mod cli;
pub mod config;
pub mod day;
pub mod event;
pub mod layout;
pub mod locale;
pub mod month;
pub mod render;

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::{
  debug,
  info
};

pub use crate::config::CalendarConfig;
pub use crate::day::{
  CellOutput,
  DayCell,
  DayRender
};
pub use crate::event::{
  CalendarEvent,
  Event,
  events_for_day
};
pub use crate::layout::{
  GridCell,
  GridLayout,
  HeadingStyle,
  OmitDays,
  WeekdayHeading,
  days_in_week,
  handle_omitted_days
};
pub use crate::locale::Locale;
pub use crate::month::CalendarMonth;

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli = cli::GlobalCli::parse_from(
    raw_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting monthly CLI"
  );

  let mut cfg = CalendarConfig::load(
    cli.config.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .overrides
      .iter()
      .map(|kv| (kv.key.clone(), kv.value.clone()))
  )?;
  if let Some(code) = &cli.locale {
    cfg.locale =
      config::LocaleSetting::Code(
        code.clone()
      );
  }
  if cli.compact {
    cfg.grid.compact_headings = true;
  }

  let locale = cfg.resolve_locale();
  let timezone = cfg.resolve_timezone();
  let today = month::today_in(timezone);
  let month = cli.month.map_or_else(
    || CalendarMonth::new(today),
    CalendarMonth::new
  );
  let omit = cli.omit.or_else(|| {
    cfg.omit_days()
  });
  debug!(
    month = %month.current_month(),
    locale = %locale.code,
    omit = ?omit.map(|o| o.to_string()),
    "resolved calendar view"
  );

  let events = match &cli.events {
    | Some(path) => load_events(path)?,
    | None => Vec::new()
  };

  let layout = handle_omitted_days(
    month.days(),
    omit.as_ref(),
    &locale
  );

  let mut day_render =
    render::Renderer::default_day_render();
  if cli.plain {
    day_render = day_render
      .with_custom_render(|_, number| {
        number.to_string()
      });
  }

  let renderer =
    render::Renderer::new(&cfg);
  renderer.print_month(
    &render::MonthView {
      month: &month,
      layout: &layout,
      events: &events,
      locale: &locale,
      style: cfg.heading_style(),
      today: Some(today),
      agenda: !cli.no_agenda
    },
    &day_render
  )?;

  info!("done");
  Ok(())
}

/// Reads a JSON array of events.
#[tracing::instrument]
pub fn load_events(
  path: &Path
) -> anyhow::Result<Vec<Event>> {
  let text = fs::read_to_string(path)
    .with_context(|| {
      format!(
        "failed to read events file {}",
        path.display()
      )
    })?;
  let events: Vec<Event> =
    serde_json::from_str(&text)
      .with_context(|| {
        format!(
          "failed to parse events file {}",
          path.display()
        )
      })?;
  info!(count = events.len(), "loaded events");
  Ok(events)
}
