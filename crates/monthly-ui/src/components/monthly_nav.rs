use yew::{
  Callback,
  Html,
  MouseEvent,
  function_component,
  html
};

use super::monthly_calendar::use_monthly_calendar;

#[function_component(MonthlyNav)]
pub fn monthly_nav() -> Html {
  let calendar = use_monthly_calendar();

  let on_prev = {
    let calendar = calendar.clone();
    Callback::from(move |_: MouseEvent| {
      calendar.go_to(&calendar.month.previous());
    })
  };
  let on_next = {
    let calendar = calendar.clone();
    Callback::from(move |_: MouseEvent| {
      calendar.go_to(&calendar.month.next());
    })
  };

  html! {
      <div class="monthly-nav">
          <button
              type="button"
              class="btn monthly-nav-btn"
              aria-label="Previous month"
              onclick={on_prev}
          >
              { calendar.locale.previous.clone() }
          </button>
          <div class="monthly-nav-title" aria-label="Current Month">
              { calendar.month.label(&calendar.locale) }
          </div>
          <button
              type="button"
              class="btn monthly-nav-btn"
              aria-label="Next month"
              onclick={on_next}
          >
              { calendar.locale.next.clone() }
          </button>
      </div>
  }
}
