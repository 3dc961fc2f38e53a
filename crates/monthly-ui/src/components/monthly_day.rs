use chrono::{
  Datelike,
  NaiveDate
};
use monthly_core::{
  CellOutput,
  DayCell,
  DayRender,
  Event
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::monthly_body::use_monthly_body;
use super::monthly_calendar::use_monthly_calendar;

#[derive(Properties, PartialEq)]
pub struct MonthlyDayProps<T>
where
  T: Clone + PartialEq + 'static
{
  /// Draws the events of one day below
  /// the day number.
  pub render_day:
    Callback<Vec<Event<T>>, Html>,
  /// Replaces the whole cell body; gets
  /// the date and its day number.
  #[prop_or_default]
  pub custom_render:
    Option<Callback<(NaiveDate, String), Html>>
}

#[function_component(MonthlyDay)]
pub fn monthly_day<T>(
  props: &MonthlyDayProps<T>
) -> Html
where
  T: Clone + PartialEq + 'static
{
  let calendar = use_monthly_calendar();
  let Some(body) = use_monthly_body::<T>()
  else {
    tracing::error!(
      "MonthlyDay rendered outside \
       MonthlyBody"
    );
    return html! {};
  };

  let cell = DayCell {
    day:        body.day,
    day_number: calendar
      .locale
      .format_day_number(body.day.day()),
    events:     body.events.iter().collect(),
    is_today:   calendar.today
      == Some(body.day)
  };

  let render_day = props.render_day.clone();
  let mut day_render = DayRender::new(
    move |events: &[&Event<T>]| {
      render_day.emit(
        events
          .iter()
          .map(|event| (*event).clone())
          .collect()
      )
    }
  );
  if let Some(custom) =
    props.custom_render.clone()
  {
    day_render = day_render
      .with_custom_render(
        move |day, day_number| {
          custom.emit((
            day,
            day_number.to_string()
          ))
        }
      );
  }

  let (header, content) =
    match day_render.render(&cell) {
      | CellOutput::Custom(content) => {
        (html! {}, content)
      }
      | CellOutput::Default {
        day_number,
        is_today,
        events
      } => {
        (
          html! {
              <div class="monthly-day-header">
                  <div class={classes!(
                      "monthly-day-number",
                      is_today.then_some("today")
                  )}>
                      { day_number }
                  </div>
              </div>
          },
          events
        )
      }
    };

  html! {
      <div
          class="monthly-day"
          aria-label={day_aria_label(&cell.day_number)}
      >
          <div class="monthly-day-top">
              { header }
          </div>
          <ul class="monthly-day-events">
              { content }
          </ul>
      </div>
  }
}

fn day_aria_label(
  day_number: &str
) -> String {
  format!("Events for day {day_number}")
}

#[cfg(test)]
mod tests {
  use super::day_aria_label;

  #[test]
  fn aria_label_uses_unpadded_number() {
    assert_eq!(
      day_aria_label("9"),
      "Events for day 9"
    );
  }
}
