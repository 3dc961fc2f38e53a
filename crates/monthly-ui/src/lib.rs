//! Yew components for a month-view
//! calendar built on `monthly_core`.

pub mod components;

pub use components::{
  DefaultMonthlyEventItem,
  MonthlyBody,
  MonthlyBodyContext,
  MonthlyCalendar,
  MonthlyCalendarContext,
  MonthlyDay,
  MonthlyNav
};
