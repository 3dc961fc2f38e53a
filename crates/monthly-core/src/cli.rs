use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{
  Context,
  anyhow
};
use chrono::NaiveDate;
use clap::{
  ArgAction,
  Parser
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::layout::OmitDays;

#[derive(Debug, Clone)]
pub struct KeyVal {
  pub key:   String,
  pub value: String
}

impl std::str::FromStr for KeyVal {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let (k, v) =
      s.split_once('=').ok_or_else(|| {
        anyhow!(
          "expected KEY=VALUE, got: {s}"
        )
      })?;
    Ok(Self {
      key:   k.trim().to_string(),
      value: v.trim().to_string()
    })
  }
}

#[derive(Parser, Debug, Clone)]
#[command(
  name = "monthly",
  version,
  about = "Print a month calendar grid \
           with events"
)]
pub struct GlobalCli {
  #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
  pub verbose: u8,

  #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
  pub quiet: u8,

  /// Month to show, `YYYY-MM`. Defaults
  /// to the current month.
  #[arg(short = 'm', long = "month", value_parser = parse_month)]
  pub month: Option<NaiveDate>,

  /// JSON array of events.
  #[arg(short = 'e', long = "events")]
  pub events: Option<PathBuf>,

  /// Weekdays to hide, e.g. `0,6` or
  /// `sun,sat`.
  #[arg(long = "omit")]
  pub omit: Option<OmitDays>,

  #[arg(short = 'l', long = "locale")]
  pub locale: Option<String>,

  /// One-letter weekday headings.
  #[arg(long = "compact")]
  pub compact: bool,

  /// Bare day numbers without event
  /// markers.
  #[arg(long = "plain")]
  pub plain: bool,

  /// Skip the event list below the grid.
  #[arg(long = "no-agenda")]
  pub no_agenda: bool,

  #[arg(long = "config")]
  pub config: Option<PathBuf>,

  #[arg(
    long = "set",
    value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
    action = ArgAction::Append
  )]
  pub overrides: Vec<KeyVal>
}

/// Accepts `YYYY-MM` or a full
/// `YYYY-MM-DD`.
pub fn parse_month(
  raw: &str
) -> anyhow::Result<NaiveDate> {
  let raw = raw.trim();
  NaiveDate::parse_from_str(
    raw, "%Y-%m-%d"
  )
  .or_else(|_| {
    NaiveDate::parse_from_str(
      &format!("{raw}-01"),
      "%Y-%m-%d"
    )
  })
  .with_context(|| {
    format!(
      "invalid month (expected \
       YYYY-MM): {raw}"
    )
  })
}

pub fn init_tracing(
  verbose: u8,
  quiet: u8
) -> anyhow::Result<()> {
  let default_level = if quiet >= 2 {
    "error"
  } else if quiet == 1 {
    "warn"
  } else if verbose >= 3 {
    "trace"
  } else if verbose == 2 {
    "debug"
  } else if verbose == 1 {
    "info"
  } else {
    "warn"
  };

  let env_filter =
    EnvFilter::try_from_default_env()
      .or_else(|_| {
        EnvFilter::try_new(default_level)
      })
      .map_err(|e| {
        anyhow!(
          "invalid RUST_LOG / log filter: \
           {e}"
        )
      })?;

  let init_result =
    tracing_subscriber::fmt()
      .with_env_filter(env_filter)
      .with_target(true)
      .with_level(true)
      .with_writer(std::io::stderr)
      .with_ansi(
        std::io::stderr().is_terminal()
      )
      .try_init();

  if let Err(err) = init_result {
    debug!(error = %err, "tracing subscriber already set, continuing");
  }

  Ok(())
}
