use std::io::{
  self,
  IsTerminal,
  Write
};

use chrono::NaiveDate;
use unicode_width::UnicodeWidthStr;

use crate::config::CalendarConfig;
use crate::day::{
  CellOutput,
  DayCell,
  DayRender
};
use crate::event::Event;
use crate::layout::{
  GridCell,
  GridLayout,
  HeadingStyle
};
use crate::locale::Locale;
use crate::month::CalendarMonth;

/// Inputs for one text rendering of a
/// month.
pub struct MonthView<'a> {
  pub month:   &'a CalendarMonth,
  pub layout:  &'a GridLayout,
  pub events:  &'a [Event],
  pub locale:  &'a Locale,
  pub style:   HeadingStyle,
  pub today:   Option<NaiveDate>,
  pub agenda:  bool
}

#[derive(Debug, Clone)]
pub struct Renderer {
  color: bool
}

impl Renderer {
  #[must_use]
  pub fn new(cfg: &CalendarConfig) -> Self {
    let color = cfg.color.unwrap_or_else(
      || io::stdout().is_terminal()
    );
    Self { color }
  }

  #[must_use]
  pub fn plain() -> Self {
    Self { color: false }
  }

  /// Default cell text: the day number
  /// followed by `+N` when events fall on
  /// that day.
  #[must_use]
  pub fn default_day_render<'f>()
  -> DayRender<'f, Event, String> {
    DayRender::new(|events: &[&Event]| {
      if events.is_empty() {
        String::new()
      } else {
        format!("+{}", events.len())
      }
    })
  }

  #[tracing::instrument(skip_all)]
  pub fn print_month(
    &self,
    view: &MonthView<'_>,
    day_render: &DayRender<'_, Event, String>
  ) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    self.write_month(
      &mut out, view, day_render
    )?;
    out.flush()?;
    Ok(())
  }

  pub fn write_month<W: Write>(
    &self,
    out: &mut W,
    view: &MonthView<'_>,
    day_render: &DayRender<'_, Event, String>
  ) -> anyhow::Result<()> {
    let layout = view.layout;
    let title = view.month.label(view.locale);

    if layout.columns() == 0 {
      writeln!(out, "{title}")?;
      writeln!(out, "(every weekday omitted)")?;
      return Ok(());
    }

    let headings = layout
      .headings
      .iter()
      .map(|heading| view.style.label(heading))
      .collect::<Vec<_>>();

    let rows = layout
      .rows()
      .into_iter()
      .map(|row| {
        row
          .into_iter()
          .map(|cell| {
            self.cell_text(
              cell, view, day_render
            )
          })
          .collect::<Vec<_>>()
      })
      .collect::<Vec<_>>();

    let width = headings
      .iter()
      .map(|label| label.width())
      .chain(rows.iter().flatten().map(
        |cell| cell.text.width()
      ))
      .max()
      .unwrap_or(2);

    let total = layout.columns() * (width + 1);
    let title_pad =
      total.saturating_sub(title.width()) / 2;
    writeln!(
      out,
      "{}{}",
      " ".repeat(title_pad),
      self.paint(&title, "1")
    )?;

    let header_line = headings
      .iter()
      .map(|label| pad_left(label, width))
      .collect::<Vec<_>>()
      .join(" ");
    writeln!(out, " {header_line}")?;

    for row in &rows {
      let line = row
        .iter()
        .map(|cell| {
          let padded =
            pad_left(&cell.text, width);
          match cell.kind {
            | CellKind::Padding => {
              self.paint(&padded, "2")
            }
            | CellKind::Today => {
              self.paint(&padded, "7")
            }
            | CellKind::Day => padded
          }
        })
        .collect::<Vec<_>>()
        .join(" ");
      writeln!(out, " {line}")?;
    }

    if view.agenda {
      self.write_agenda(out, view)?;
    }

    Ok(())
  }

  fn write_agenda<W: Write>(
    &self,
    out: &mut W,
    view: &MonthView<'_>
  ) -> anyhow::Result<()> {
    let mut wrote_header = false;
    for day in &view.layout.days_to_render {
      let cell = DayCell::build(
        *day,
        view.events,
        view.locale,
        view.today
      );
      if cell.events.is_empty() {
        continue;
      }
      if !wrote_header {
        writeln!(out)?;
        wrote_header = true;
      }
      let weekday = view.locale.weekday_name(
        crate::month::weekday_index(*day)
      );
      let label = format!(
        "{} {}",
        weekday.chars().take(3).collect::<String>(),
        cell.padded_day_number()
      );
      for event in &cell.events {
        writeln!(
          out,
          "{}  {} ({} -> {})",
          self.paint(&label, "33"),
          event.display_title(),
          event.start_date.format("%Y-%m-%d %H:%M"),
          event.end_date.format("%Y-%m-%d %H:%M")
        )?;
      }
    }
    Ok(())
  }

  fn cell_text(
    &self,
    cell: GridCell,
    view: &MonthView<'_>,
    day_render: &DayRender<'_, Event, String>
  ) -> RenderedCell {
    match cell {
      | GridCell::Padding(value) => {
        RenderedCell {
          text: format!("{value:02}"),
          kind: CellKind::Padding
        }
      }
      | GridCell::Day(day) => {
        let cell = DayCell::build(
          day,
          view.events,
          view.locale,
          view.today
        );
        let is_today = cell.is_today;
        let text =
          match day_render.render(&cell) {
            | CellOutput::Custom(text) => text,
            | CellOutput::Default {
              day_number,
              events,
              ..
            } => format!("{day_number}{events}")
          };
        RenderedCell {
          text,
          kind: if is_today {
            CellKind::Today
          } else {
            CellKind::Day
          }
        }
      }
    }
  }

  fn paint(
    &self,
    s: &str,
    code: &str
  ) -> String {
    if self.color {
      format!("\x1b[{code}m{s}\x1b[0m")
    } else {
      s.to_string()
    }
  }
}

#[derive(Debug, Clone, Copy)]
enum CellKind {
  Padding,
  Day,
  Today
}

#[derive(Debug, Clone)]
struct RenderedCell {
  text: String,
  kind: CellKind
}

fn pad_left(s: &str, width: usize) -> String {
  let pad = width.saturating_sub(s.width());
  format!("{}{}", " ".repeat(pad), s)
}
