use std::rc::Rc;

use chrono::{
  NaiveDate,
  Utc
};
use monthly_core::{
  CalendarMonth,
  Locale
};
use yew::{
  Callback,
  ContextProvider,
  Html,
  Properties,
  function_component,
  html,
  use_context
};

/// Month state shared with every
/// calendar component below
/// [`MonthlyCalendar`].
#[derive(Clone, PartialEq)]
pub struct MonthlyCalendarContext {
  pub month: CalendarMonth,
  pub locale: Rc<Locale>,
  pub today: Option<NaiveDate>,
  pub on_current_month_change:
    Callback<NaiveDate>
}

impl MonthlyCalendarContext {
  #[must_use]
  pub fn days(&self) -> &[NaiveDate] {
    self.month.days()
  }

  pub fn go_to(&self, month: &CalendarMonth) {
    tracing::debug!(
      from = %self.month.current_month(),
      to = %month.current_month(),
      "changing displayed month"
    );
    self
      .on_current_month_change
      .emit(month.current_month());
  }
}

#[derive(Properties, PartialEq)]
pub struct MonthlyCalendarProps {
  /// Any date inside the month to show.
  pub current_month: NaiveDate,
  pub on_current_month_change:
    Callback<NaiveDate>,
  #[prop_or_default]
  pub locale: Option<Locale>,
  /// Highlighted date; `None` disables the
  /// highlight.
  #[prop_or_default]
  pub today: Option<NaiveDate>,
  #[prop_or_default]
  pub children: Html
}

#[function_component(MonthlyCalendar)]
pub fn monthly_calendar(
  props: &MonthlyCalendarProps
) -> Html {
  let context = MonthlyCalendarContext {
    month: CalendarMonth::new(
      props.current_month
    ),
    locale: Rc::new(
      props.locale.clone().unwrap_or_default()
    ),
    today: props.today,
    on_current_month_change: props
      .on_current_month_change
      .clone()
  };

  html! {
      <ContextProvider<MonthlyCalendarContext> context={context}>
          <div class="monthly-calendar">
              { props.children.clone() }
          </div>
      </ContextProvider<MonthlyCalendarContext>>
  }
}

/// Reads the enclosing calendar context.
///
/// Falls back to the current month in
/// `en-US` when rendered outside a
/// [`MonthlyCalendar`], logging an error.
#[yew::hook]
pub(crate) fn use_monthly_calendar()
-> MonthlyCalendarContext {
  use_context::<MonthlyCalendarContext>()
    .unwrap_or_else(|| {
      tracing::error!(
        "calendar component rendered \
         outside MonthlyCalendar"
      );
      MonthlyCalendarContext {
        month: CalendarMonth::new(
          Utc::now().date_naive()
        ),
        locale: Rc::new(Locale::en_us()),
        today: None,
        on_current_month_change:
          Callback::noop()
      }
    })
}
