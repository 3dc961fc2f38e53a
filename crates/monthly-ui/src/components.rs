mod event_item;
mod monthly_body;
mod monthly_calendar;
mod monthly_day;
mod monthly_nav;

pub use event_item::{
  DefaultMonthlyEventItem,
  DefaultMonthlyEventItemProps
};
pub use monthly_body::{
  MonthlyBody,
  MonthlyBodyContext,
  MonthlyBodyProps
};
pub use monthly_calendar::{
  MonthlyCalendar,
  MonthlyCalendarContext,
  MonthlyCalendarProps
};
pub use monthly_day::{
  MonthlyDay,
  MonthlyDayProps
};
pub use monthly_nav::MonthlyNav;
