use chrono::{
  Datelike,
  NaiveDate
};

use crate::event::{
  CalendarEvent,
  events_for_day
};
use crate::locale::Locale;

/// Everything a single day cell gets to
/// draw with.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a, E> {
  pub day:        NaiveDate,
  pub day_number: String,
  pub events:     Vec<&'a E>,
  pub is_today:   bool
}

impl<'a, E: CalendarEvent> DayCell<'a, E> {
  #[must_use]
  pub fn build(
    day: NaiveDate,
    events: &'a [E],
    locale: &Locale,
    today: Option<NaiveDate>
  ) -> Self {
    Self {
      day,
      day_number: locale
        .format_day_number(day.day()),
      events: events_for_day(day, events),
      is_today: today == Some(day)
    }
  }
}

impl<E> DayCell<'_, E> {
  /// Two-digit day number (`"09"`).
  #[must_use]
  pub fn padded_day_number(
    &self
  ) -> String {
    pad_day_number(&self.day_number)
  }
}

#[must_use]
pub fn pad_day_number(
  day_number: &str
) -> String {
  match day_number.parse::<u32>() {
    | Ok(value) if value < 10 => {
      format!("0{day_number}")
    }
    | _ => day_number.to_string()
  }
}

/// What a cell renders to.
#[derive(Debug, Clone, PartialEq)]
pub enum CellOutput<O> {
  /// The caller drew the whole cell.
  Custom(O),
  /// Day number header above the
  /// caller's event list.
  Default {
    day_number: String,
    is_today:   bool,
    events:     O
  }
}

impl<O> CellOutput<O> {
  #[must_use]
  pub fn into_inner(self) -> O {
    match self {
      | Self::Custom(output) => output,
      | Self::Default {
        events, ..
      } => events
    }
  }
}

type RenderDayFn<'f, E, O> =
  Box<dyn Fn(&[&E]) -> O + 'f>;
type CustomRenderFn<'f, O> =
  Box<dyn Fn(NaiveDate, &str) -> O + 'f>;

/// Caller-supplied presentation for day
/// cells. A custom renderer, when set,
/// replaces the default layout outright.
pub struct DayRender<'f, E, O> {
  render_day:    RenderDayFn<'f, E, O>,
  custom_render: Option<CustomRenderFn<'f, O>>
}

impl<'f, E, O> DayRender<'f, E, O> {
  pub fn new<F>(render_day: F) -> Self
  where
    F: Fn(&[&E]) -> O + 'f
  {
    Self {
      render_day:    Box::new(render_day),
      custom_render: None
    }
  }

  #[must_use]
  pub fn with_custom_render<F>(
    mut self,
    custom_render: F
  ) -> Self
  where
    F: Fn(NaiveDate, &str) -> O + 'f
  {
    self.custom_render =
      Some(Box::new(custom_render));
    self
  }

  /// Calls exactly one of the two
  /// strategies.
  pub fn render(
    &self,
    cell: &DayCell<'_, E>
  ) -> CellOutput<O> {
    match &self.custom_render {
      | Some(custom) => CellOutput::Custom(
        custom(cell.day, &cell.day_number)
      ),
      | None => CellOutput::Default {
        day_number: cell.padded_day_number(),
        is_today:   cell.is_today,
        events:     (self.render_day)(
          &cell.events
        )
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use chrono::NaiveDate;

  use super::{
    CellOutput,
    DayCell,
    DayRender,
    pad_day_number
  };
  use crate::event::{
    Event,
    flexible_datetime
  };
  use crate::locale::Locale;

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 5, d)
      .expect("valid date")
  }

  fn events() -> Vec<Event> {
    let at = |raw: &str| {
      flexible_datetime::parse(raw)
        .expect("valid datetime")
    };
    vec![Event {
      id:         "1".to_string(),
      date:       at("2022-05-09"),
      start_date: at("2022-05-09"),
      end_date:   at("2022-05-10"),
      data:       serde_json::Map::new()
    }]
  }

  #[test]
  fn default_layout_pads_and_lists_events()
  {
    let events = events();
    let cell = DayCell::build(
      day(9),
      &events,
      &Locale::en_us(),
      Some(day(9))
    );
    let render = DayRender::new(
      |items: &[&Event]| items.len()
    );
    assert_eq!(
      render.render(&cell),
      CellOutput::Default {
        day_number: "09".to_string(),
        is_today:   true,
        events:     1
      }
    );
  }

  #[test]
  fn custom_render_wins_and_default_is_skipped()
  {
    let default_calls = Cell::new(0);
    let custom_calls = Cell::new(0);
    let events = events();
    let render = DayRender::new(
      |_: &[&Event]| {
        default_calls
          .set(default_calls.get() + 1);
        String::new()
      }
    )
    .with_custom_render(|d, number| {
      custom_calls
        .set(custom_calls.get() + 1);
      format!("{d}:{number}")
    });

    for d in 1..=31 {
      let cell = DayCell::build(
        day(d),
        &events,
        &Locale::en_us(),
        None
      );
      let _ = render.render(&cell);
    }

    assert_eq!(default_calls.get(), 0);
    assert_eq!(custom_calls.get(), 31);

    let cell = DayCell::build(
      day(3),
      &events,
      &Locale::en_us(),
      None
    );
    assert_eq!(
      render.render(&cell).into_inner(),
      "2022-05-03:3"
    );
  }

  #[test]
  fn pads_single_digits_only() {
    assert_eq!(pad_day_number("7"), "07");
    assert_eq!(pad_day_number("17"), "17");
  }
}
