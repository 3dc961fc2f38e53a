use chrono::NaiveDate;
use monthly_core::month::today_in;
use monthly_core::{
  CalendarConfig,
  Event
};
use monthly_ui::{
  DefaultMonthlyEventItem,
  MonthlyBody,
  MonthlyCalendar,
  MonthlyDay,
  MonthlyNav
};
use serde::{
  Deserialize,
  Serialize
};
use serde_json::json;
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  TargetCast,
  function_component,
  html,
  use_memo,
  use_state
};

const CALENDAR_CONFIG_TOML: &str =
  include_str!("../calendar.toml");
const COMPACT_VIEWPORT_MAX_PX: f64 =
  640.0;

/// Extra fields the demo attaches to each
/// event.
#[derive(
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
struct Meeting {
  name:       String,
  start_time: String,
  end_time:   String
}

fn sample_events() -> Vec<Event<Meeting>> {
  let raw = json!([
    {
      "id": "1",
      "name": "meeting requirement 01",
      "description": "meeting di kantor",
      "startTime": "09:00",
      "endTime": "11:30",
      "startDate": "2022-05-09T00:00:00",
      "endDate": "2022-05-10T00:00:00",
      "date": "2022-05-09T00:00:00"
    },
    {
      "id": "2",
      "name": "meeting requirement 02",
      "description": "meeting di kantor",
      "startTime": "09:00",
      "endTime": "11:30",
      "startDate": "2022-05-10T00:00:00",
      "endDate": "2022-05-10T00:00:00",
      "date": "2022-05-09T00:00:00"
    },
    {
      "id": "3",
      "name": "meeting requirement 03",
      "description": "meeting di kantor",
      "startTime": "09:00",
      "endTime": "11:30",
      "startDate": "2022-05-10T00:00:00",
      "endDate": "2022-05-11T00:00:00",
      "date": "2022-05-09T00:00:00"
    }
  ]);

  serde_json::from_value(raw)
    .unwrap_or_else(|error| {
      tracing::error!(%error, "failed parsing sample events");
      Vec::new()
    })
}

fn viewport_is_compact() -> bool {
  web_sys::window()
    .and_then(|window| {
      window.inner_width().ok()
    })
    .and_then(|width| width.as_f64())
    .is_some_and(|width| {
      width < COMPACT_VIEWPORT_MAX_PX
    })
}

#[function_component(App)]
pub fn app() -> Html {
  let config = use_memo((), |_| {
    CalendarConfig::from_toml_or_default(
      CALENDAR_CONFIG_TOML
    )
  });
  let events = use_memo((), |_| {
    sample_events()
  });
  let current_month = use_state(|| {
    NaiveDate::from_ymd_opt(2022, 5, 1)
      .unwrap_or_default()
  });
  let custom_cells = use_state(|| false);

  let today =
    today_in(config.resolve_timezone());
  let style = config.heading_style();
  let compact =
    style.compact || viewport_is_compact();

  let on_month_change = {
    let current_month =
      current_month.clone();
    Callback::from(
      move |month: NaiveDate| {
        tracing::info!(%month, "month changed");
        current_month.set(month);
      }
    )
  };

  let on_toggle_custom = {
    let custom_cells = custom_cells.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        custom_cells.set(input.checked());
      }
    )
  };

  let render_day = Callback::from(
    |events: Vec<Event<Meeting>>| {
      events
        .iter()
        .map(|event| {
          html! {
              <DefaultMonthlyEventItem
                  title={event.data.name.clone()}
                  date={format!(
                      "{} - {}",
                      event.data.start_time,
                      event.data.end_time
                  )}
              />
          }
        })
        .collect::<Html>()
    }
  );

  let custom_render = (*custom_cells).then(|| {
    Callback::from(
      |(day, day_number): (NaiveDate, String)| {
        html! {
            <p
                class="demo-custom-cell"
                onclick={move |_| tracing::info!(%day, "clicked day")}
            >
                { day_number }
            </p>
        }
      }
    )
  });

  html! {
      <div class="demo">
          <div class="demo-toolbar">
              <label>
                  <input
                      type="checkbox"
                      checked={*custom_cells}
                      onchange={on_toggle_custom}
                  />
                  { " Custom day cells" }
              </label>
          </div>
          <MonthlyCalendar
              current_month={*current_month}
              on_current_month_change={on_month_change}
              locale={Some(config.resolve_locale())}
              today={Some(today)}
          >
              <MonthlyNav />
              <MonthlyBody<Meeting>
                  events={(*events).clone()}
                  omit_days={config.omit_days()}
                  compact={compact}
                  heading_chars={style.full_chars}
                  compact_heading_chars={style.compact_chars}
              >
                  <MonthlyDay<Meeting>
                      render_day={render_day}
                      custom_render={custom_render}
                  />
              </MonthlyBody<Meeting>>
          </MonthlyCalendar>
      </div>
  }
}
