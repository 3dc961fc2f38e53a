use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct DefaultMonthlyEventItemProps {
  pub title: String,
  /// Already formatted by the caller.
  pub date:  String
}

#[function_component(DefaultMonthlyEventItem)]
pub fn default_monthly_event_item(
  props: &DefaultMonthlyEventItemProps
) -> Html {
  html! {
      <li class="monthly-event-item">
          <div class="monthly-event-row">
              <h3 class="monthly-event-title">{ props.title.clone() }</h3>
              <p class="monthly-event-date">{ props.date.clone() }</p>
          </div>
      </li>
  }
}
