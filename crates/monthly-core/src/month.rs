use chrono::{
  Datelike,
  Duration,
  NaiveDate,
  Utc
};
use chrono_tz::Tz;

use crate::locale::Locale;

/// The month a calendar is showing,
/// together with every date in it.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct CalendarMonth {
  current_month: NaiveDate,
  days:          Vec<NaiveDate>
}

impl CalendarMonth {
  /// Any date inside the month works;
  /// it is normalized to the 1st.
  #[must_use]
  pub fn new(date: NaiveDate) -> Self {
    let current_month =
      first_day_of_month(
        date.year(),
        date.month()
      );
    let last = last_day_of_month(
      current_month.year(),
      current_month.month()
    );
    let days = current_month
      .iter_days()
      .take_while(|day| *day <= last)
      .collect();

    Self {
      current_month,
      days
    }
  }

  #[must_use]
  pub fn current_month(
    &self
  ) -> NaiveDate {
    self.current_month
  }

  #[must_use]
  pub fn days(&self) -> &[NaiveDate] {
    &self.days
  }

  #[must_use]
  pub fn year(&self) -> i32 {
    self.current_month.year()
  }

  #[must_use]
  pub fn month(&self) -> u32 {
    self.current_month.month()
  }

  #[must_use]
  pub fn shifted(
    &self,
    months: i32
  ) -> Self {
    Self::new(shift_months(
      self.current_month,
      months
    ))
  }

  #[must_use]
  pub fn previous(&self) -> Self {
    self.shifted(-1)
  }

  #[must_use]
  pub fn next(&self) -> Self {
    self.shifted(1)
  }

  #[must_use]
  pub fn label(
    &self,
    locale: &Locale
  ) -> String {
    format!(
      "{} {}",
      locale.month_name(self.month()),
      self.year()
    )
  }
}

#[must_use]
pub fn today_in(
  timezone: Tz
) -> NaiveDate {
  Utc::now()
    .with_timezone(&timezone)
    .date_naive()
}

#[must_use]
pub fn first_day_of_month(
  year: i32,
  month: u32
) -> NaiveDate {
  NaiveDate::from_ymd_opt(
    year, month, 1
  )
  .unwrap_or(NaiveDate::MIN)
}

#[must_use]
pub fn last_day_of_month(
  year: i32,
  month: u32
) -> NaiveDate {
  let (next_year, next_month) =
    if month >= 12 {
      (year.saturating_add(1), 1_u32)
    } else {
      (year, month + 1)
    };
  add_days(
    first_day_of_month(
      next_year, next_month
    ),
    -1
  )
}

#[must_use]
pub fn days_in_month(
  year: i32,
  month: u32
) -> u32 {
  last_day_of_month(year, month).day()
}

/// Day count of the month before the
/// one containing `day`.
#[must_use]
pub fn days_in_previous_month(
  day: NaiveDate
) -> u32 {
  let previous = shift_months(
    first_day_of_month(
      day.year(),
      day.month()
    ),
    -1
  );
  days_in_month(
    previous.year(),
    previous.month()
  )
}

#[must_use]
pub fn shift_months(
  date: NaiveDate,
  months: i32
) -> NaiveDate {
  let mut year = date.year();
  let mut month =
    date.month() as i32 + months;

  while month < 1 {
    month += 12;
    year = year.saturating_sub(1);
  }
  while month > 12 {
    month -= 12;
    year = year.saturating_add(1);
  }

  let month = month as u32;
  let day = date
    .day()
    .min(days_in_month(year, month));
  NaiveDate::from_ymd_opt(
    year, month, day
  )
  .unwrap_or(date)
}

#[must_use]
pub fn add_days(
  date: NaiveDate,
  days: i64
) -> NaiveDate {
  date
    .checked_add_signed(Duration::days(
      days
    ))
    .unwrap_or(date)
}

/// Weekday of a date with Sunday = 0.
#[must_use]
pub fn weekday_index(
  day: NaiveDate
) -> u8 {
  day.weekday().num_days_from_sunday()
    as u8
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::{
    CalendarMonth,
    days_in_month,
    days_in_previous_month,
    shift_months,
    weekday_index
  };
  use crate::locale::Locale;

  fn ymd(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn normalizes_to_first_and_lists_days()
  {
    let month =
      CalendarMonth::new(ymd(2022, 6, 17));
    assert_eq!(
      month.current_month(),
      ymd(2022, 6, 1)
    );
    assert_eq!(month.days().len(), 30);
    assert_eq!(
      month.days().last().copied(),
      Some(ymd(2022, 6, 30))
    );
  }

  #[test]
  fn navigation_wraps_years() {
    let jan =
      CalendarMonth::new(ymd(2023, 1, 1));
    assert_eq!(
      jan.previous().current_month(),
      ymd(2022, 12, 1)
    );
    let dec =
      CalendarMonth::new(ymd(2022, 12, 9));
    assert_eq!(
      dec.next().current_month(),
      ymd(2023, 1, 1)
    );
    assert_eq!(
      dec.shifted(-14).current_month(),
      ymd(2021, 10, 1)
    );
  }

  #[test]
  fn month_lengths() {
    assert_eq!(days_in_month(2024, 2), 29);
    assert_eq!(days_in_month(2023, 2), 28);
    assert_eq!(
      days_in_previous_month(ymd(
        2022, 6, 1
      )),
      31
    );
    assert_eq!(
      days_in_previous_month(ymd(
        2023, 1, 1
      )),
      31
    );
    assert_eq!(
      shift_months(ymd(2022, 3, 31), -1),
      ymd(2022, 2, 28)
    );
  }

  #[test]
  fn sunday_is_zero() {
    assert_eq!(
      weekday_index(ymd(2022, 5, 1)),
      0
    );
    assert_eq!(
      weekday_index(ymd(2022, 6, 1)),
      3
    );
  }

  #[test]
  fn label_uses_locale_month_name() {
    let month =
      CalendarMonth::new(ymd(2022, 5, 1));
    let locale =
      Locale::by_code("id").expect("id");
    assert_eq!(
      month.label(&locale),
      "Mei 2022"
    );
  }
}
