use chrono::NaiveDate;
use monthly_core::{
  Event,
  HeadingStyle,
  OmitDays,
  events_for_day,
  handle_omitted_days
};
use yew::{
  ContextProvider,
  Html,
  Properties,
  function_component,
  html,
  use_context
};

use super::monthly_calendar::use_monthly_calendar;

/// The day a [`super::MonthlyDay`] is
/// drawing and the events that cover it.
#[derive(Clone, PartialEq)]
pub struct MonthlyBodyContext<T>
where
  T: Clone + PartialEq + 'static
{
  pub day:    NaiveDate,
  pub events: Vec<Event<T>>
}

#[derive(Properties, PartialEq)]
pub struct MonthlyBodyProps<T>
where
  T: Clone + PartialEq + 'static
{
  pub events: Vec<Event<T>>,
  /// Weekdays (Sunday = 0) to hide, e.g.
  /// `OmitDays::weekends()`.
  #[prop_or_default]
  pub omit_days: Option<OmitDays>,
  /// One-letter headings for narrow
  /// viewports. Chosen by the embedding
  /// app.
  #[prop_or_default]
  pub compact: bool,
  #[prop_or(3)]
  pub heading_chars: usize,
  #[prop_or(1)]
  pub compact_heading_chars: usize,
  #[prop_or_default]
  pub children: Html
}

#[function_component(MonthlyBody)]
pub fn monthly_body<T>(
  props: &MonthlyBodyProps<T>
) -> Html
where
  T: Clone + PartialEq + 'static
{
  let calendar = use_monthly_calendar();
  let layout = handle_omitted_days(
    calendar.days(),
    props.omit_days.as_ref(),
    &calendar.locale
  );
  let style = HeadingStyle {
    compact:       props.compact,
    full_chars:    props.heading_chars,
    compact_chars: props
      .compact_heading_chars
  };

  html! {
      <div class="monthly-body">
          <div class="monthly-grid" style={grid_template_style(layout.columns())}>
              {
                  for layout.headings.iter().map(|heading| html! {
                      <div
                          key={format!("heading-{}", heading.day)}
                          class="monthly-heading"
                          aria-label="Day of Week"
                      >
                          { style.label(heading) }
                      </div>
                  })
              }
              {
                  for layout.padding.iter().enumerate().map(|(index, value)| html! {
                      <div
                          key={format!("padding-{index}")}
                          class="monthly-padding"
                          aria-label="Empty Day"
                      >
                          { value.to_string() }
                      </div>
                  })
              }
              {
                  for layout.days_to_render.iter().map(|day| {
                      let context = MonthlyBodyContext {
                          day:    *day,
                          events: events_for_day(*day, &props.events)
                              .into_iter()
                              .cloned()
                              .collect()
                      };
                      html! {
                          <ContextProvider<MonthlyBodyContext<T>>
                              key={day.to_string()}
                              context={context}
                          >
                              { props.children.clone() }
                          </ContextProvider<MonthlyBodyContext<T>>>
                      }
                  })
              }
          </div>
      </div>
  }
}

#[yew::hook]
pub(crate) fn use_monthly_body<T>()
-> Option<MonthlyBodyContext<T>>
where
  T: Clone + PartialEq + 'static
{
  use_context::<MonthlyBodyContext<T>>()
}

/// Column count follows the visible
/// headings so omitted weekdays do not
/// leave empty columns.
pub(crate) fn grid_template_style(
  columns: usize
) -> String {
  format!(
    "grid-template-columns: repeat({}, \
     minmax(0, 1fr));",
    columns.max(1)
  )
}
