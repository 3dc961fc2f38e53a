use std::fmt;
use std::str::FromStr;

use anyhow::{
  anyhow,
  bail
};
use chrono::{
  NaiveDate,
  Weekday
};
use serde::{
  Deserialize,
  Serialize
};
use tracing::trace;

use crate::locale::Locale;
use crate::month::{
  days_in_previous_month,
  weekday_index
};

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct WeekdayHeading {
  pub day:   u8,
  pub label: String
}

impl WeekdayHeading {
  /// First `chars` characters of the
  /// label (not bytes, so `miércoles`
  /// stays intact).
  #[must_use]
  pub fn short_label(
    &self,
    chars: usize
  ) -> String {
    self.label.chars().take(chars).collect()
  }
}

/// Heading text width chosen by the
/// embedding application, typically from
/// viewport size.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct HeadingStyle {
  pub compact:       bool,
  pub full_chars:    usize,
  pub compact_chars: usize
}

impl Default for HeadingStyle {
  fn default() -> Self {
    Self {
      compact:       false,
      full_chars:    3,
      compact_chars: 1
    }
  }
}

impl HeadingStyle {
  #[must_use]
  pub fn chars(&self) -> usize {
    if self.compact {
      self.compact_chars
    } else {
      self.full_chars
    }
  }

  #[must_use]
  pub fn label(
    &self,
    heading: &WeekdayHeading
  ) -> String {
    heading.short_label(self.chars())
  }
}

/// Weekday indices (Sunday = 0) left
/// out of the grid.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
)]
pub struct OmitDays(u8);

impl OmitDays {
  #[must_use]
  pub fn none() -> Self {
    Self(0)
  }

  #[must_use]
  pub fn weekends() -> Self {
    Self(0b100_0001)
  }

  /// Indices above 6 are ignored.
  pub fn from_indices<I>(
    indices: I
  ) -> Self
  where
    I: IntoIterator<Item = u8>
  {
    let mut omit = Self::none();
    for index in indices {
      omit.insert(index);
    }
    omit
  }

  pub fn try_from_indices<I>(
    indices: I
  ) -> anyhow::Result<Self>
  where
    I: IntoIterator<Item = u8>
  {
    let mut omit = Self::none();
    for index in indices {
      if index > 6 {
        bail!(
          "weekday index {index} out of \
           range 0..=6"
        );
      }
      omit.insert(index);
    }
    Ok(omit)
  }

  pub fn insert(
    &mut self,
    index: u8
  ) -> bool {
    if index > 6 {
      return false;
    }
    let fresh = !self.contains(index);
    self.0 |= 1 << index;
    fresh
  }

  #[must_use]
  pub fn contains(
    &self,
    index: u8
  ) -> bool {
    index <= 6 && self.0 & (1 << index) != 0
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.0.count_ones() as usize
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0 == 0
  }

  #[must_use]
  pub fn is_all(&self) -> bool {
    self.len() == 7
  }

  /// How many omitted indices sit
  /// strictly before `index`.
  #[must_use]
  pub fn count_before(
    &self,
    index: u8
  ) -> usize {
    self.iter().filter(|day| *day < index).count()
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = u8> + '_ {
    (0_u8..7).filter(|day| self.contains(*day))
  }
}

impl FromIterator<Weekday> for OmitDays {
  fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = Weekday>
  {
    Self::from_indices(iter.into_iter().map(
      |weekday| {
        weekday.num_days_from_sunday() as u8
      }
    ))
  }
}

impl FromStr for OmitDays {
  type Err = anyhow::Error;

  /// Accepts `0,6`, `sun,sat` or a mix.
  /// An empty string omits nothing.
  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let mut omit = Self::none();
    for token in s
      .split([',', ' '])
      .map(str::trim)
      .filter(|token| !token.is_empty())
    {
      let index = match token.parse::<u8>()
      {
        | Ok(index) if index <= 6 => index,
        | Ok(index) => {
          bail!(
            "weekday index {index} out of \
             range 0..=6"
          )
        }
        | Err(_) => {
          token
            .parse::<Weekday>()
            .map_err(|_| {
              anyhow!(
                "invalid weekday: {token}"
              )
            })?
            .num_days_from_sunday()
            as u8
        }
      };
      omit.insert(index);
    }
    Ok(omit)
  }
}

impl fmt::Display for OmitDays {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    let parts = self
      .iter()
      .map(|day| day.to_string())
      .collect::<Vec<_>>();
    f.write_str(&parts.join(","))
  }
}

/// Weekday headings for a locale, Sunday
/// first.
#[must_use]
pub fn days_in_week(
  locale: &Locale
) -> Vec<WeekdayHeading> {
  (0_u8..7)
    .map(|day| WeekdayHeading {
      day,
      label: locale
        .weekday_name(day)
        .to_string()
    })
    .collect()
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum GridCell {
  /// Leading cell showing a day number
  /// from the previous month.
  Padding(u32),
  Day(NaiveDate)
}

/// One render pass worth of grid data.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct GridLayout {
  pub headings:       Vec<WeekdayHeading>,
  pub days_to_render: Vec<NaiveDate>,
  pub padding:        Vec<u32>
}

impl GridLayout {
  #[must_use]
  pub fn columns(&self) -> usize {
    self.headings.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.headings.is_empty()
      && self.days_to_render.is_empty()
  }

  pub fn cells(
    &self
  ) -> impl Iterator<Item = GridCell> + '_
  {
    self
      .padding
      .iter()
      .copied()
      .map(GridCell::Padding)
      .chain(
        self
          .days_to_render
          .iter()
          .copied()
          .map(GridCell::Day)
      )
  }

  /// Cells chunked into rows of
  /// [`GridLayout::columns`]; the last row
  /// may be short.
  #[must_use]
  pub fn rows(&self) -> Vec<Vec<GridCell>> {
    let columns = self.columns();
    if columns == 0 {
      return Vec::new();
    }
    self
      .cells()
      .collect::<Vec<_>>()
      .chunks(columns)
      .map(<[GridCell]>::to_vec)
      .collect()
  }
}

/// Lays out a month.
///
/// Omitted weekdays drop out of both the
/// headings and the rendered days. The
/// leading padding is sized from the first
/// rendered day's weekday, shrunk by the
/// omitted weekdays before it, and filled
/// with the closing day numbers of the
/// previous month in ascending order.
#[tracing::instrument(
  skip(days, locale),
  fields(day_count = days.len())
)]
#[must_use]
pub fn handle_omitted_days(
  days: &[NaiveDate],
  omit_days: Option<&OmitDays>,
  locale: &Locale
) -> GridLayout {
  let mut headings = days_in_week(locale);
  let mut days_to_render = days.to_vec();

  if let Some(omit) = omit_days {
    headings.retain(|heading| {
      !omit.contains(heading.day)
    });
    days_to_render.retain(|day| {
      !omit.contains(weekday_index(*day))
    });
  }

  let padding_len = days_to_render
    .first()
    .map_or(0, |first| {
      let first_day = weekday_index(*first);
      let skipped = omit_days.map_or(0, |omit| {
        omit.count_before(first_day)
      });
      usize::from(first_day)
        .saturating_sub(skipped)
    });

  let padding = days.first().map_or_else(
    Vec::new,
    |first| {
      trailing_days_of_previous_month(
        *first,
        padding_len
      )
    }
  );

  trace!(
    headings = headings.len(),
    days_to_render = days_to_render.len(),
    padding = padding.len(),
    "computed month grid"
  );

  GridLayout {
    headings,
    days_to_render,
    padding
  }
}

/// The last `count` day numbers of the
/// month before `day`, ascending.
#[must_use]
pub fn trailing_days_of_previous_month(
  day: NaiveDate,
  count: usize
) -> Vec<u32> {
  let total = days_in_previous_month(day);
  let mut values = (0..count)
    .map(|index| {
      total.saturating_sub(index as u32)
    })
    .collect::<Vec<_>>();
  values.reverse();
  values
}

#[cfg(test)]
mod tests {
  use chrono::{
    NaiveDate,
    Weekday
  };

  use super::{
    GridCell,
    HeadingStyle,
    OmitDays,
    WeekdayHeading,
    handle_omitted_days
  };
  use crate::locale::Locale;
  use crate::month::CalendarMonth;

  fn month(
    y: i32,
    m: u32
  ) -> CalendarMonth {
    CalendarMonth::new(
      NaiveDate::from_ymd_opt(y, m, 1)
        .expect("valid date")
    )
  }

  #[test]
  fn may_2022_has_no_padding() {
    let layout = handle_omitted_days(
      month(2022, 5).days(),
      None,
      &Locale::en_us()
    );
    assert!(layout.padding.is_empty());
    assert_eq!(layout.headings.len(), 7);
    assert_eq!(
      layout.days_to_render.len(),
      31
    );
  }

  #[test]
  fn june_2022_pads_with_end_of_may() {
    let layout = handle_omitted_days(
      month(2022, 6).days(),
      None,
      &Locale::en_us()
    );
    assert_eq!(
      layout.padding,
      vec![29, 30, 31]
    );
  }

  #[test]
  fn omitted_weekends_shrink_padding_and_columns()
  {
    let omit = OmitDays::weekends();
    let layout = handle_omitted_days(
      month(2022, 6).days(),
      Some(&omit),
      &Locale::en_us()
    );
    let labels = layout
      .headings
      .iter()
      .map(|heading| heading.label.as_str())
      .collect::<Vec<_>>();
    assert_eq!(
      labels,
      vec![
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday"
      ]
    );
    // Wednesday the 1st lands in the third
    // of five columns.
    assert_eq!(layout.padding, vec![30, 31]);
    assert_eq!(layout.columns(), 5);
    assert_eq!(
      layout.days_to_render.len(),
      22
    );
  }

  #[test]
  fn omitting_every_weekday_gives_empty_grid()
  {
    let omit =
      OmitDays::from_indices(0..7);
    let layout = handle_omitted_days(
      month(2022, 6).days(),
      Some(&omit),
      &Locale::en_us()
    );
    assert!(layout.is_empty());
    assert!(layout.padding.is_empty());
    assert!(layout.rows().is_empty());
  }

  #[test]
  fn empty_days_give_empty_padding() {
    let layout = handle_omitted_days(
      &[],
      None,
      &Locale::en_us()
    );
    assert!(layout.padding.is_empty());
    assert!(
      layout.days_to_render.is_empty()
    );
    assert_eq!(layout.headings.len(), 7);
  }

  #[test]
  fn omit_days_parse_numbers_and_names() {
    let omit = "0, sat"
      .parse::<OmitDays>()
      .expect("parse");
    assert_eq!(omit, OmitDays::weekends());
    assert_eq!(omit.to_string(), "0,6");
    assert!("7".parse::<OmitDays>().is_err());
    assert!(
      "funday".parse::<OmitDays>().is_err()
    );
    assert!(
      ""
        .parse::<OmitDays>()
        .expect("empty")
        .is_empty()
    );
    assert!(
      OmitDays::try_from_indices([1, 9])
        .is_err()
    );
  }

  #[test]
  fn omit_days_from_weekdays() {
    let omit = [Weekday::Sun, Weekday::Sat]
      .into_iter()
      .collect::<OmitDays>();
    assert_eq!(omit, OmitDays::weekends());
    assert_eq!(omit.len(), 2);
    assert_eq!(omit.count_before(3), 1);
  }

  #[test]
  fn rows_chunk_by_column_count() {
    let layout = handle_omitted_days(
      month(2022, 6).days(),
      None,
      &Locale::en_us()
    );
    let rows = layout.rows();
    assert_eq!(rows.len(), 5);
    assert_eq!(
      rows[0][..4],
      [
        GridCell::Padding(29),
        GridCell::Padding(30),
        GridCell::Padding(31),
        GridCell::Day(
          NaiveDate::from_ymd_opt(
            2022, 6, 1
          )
          .expect("valid date")
        )
      ]
    );
    assert!(rows.iter().all(|row| row.len() <= 7));
  }

  #[test]
  fn heading_style_truncates_by_chars() {
    let heading = WeekdayHeading {
      day:   3,
      label: "miércoles".to_string()
    };
    let mut style = HeadingStyle::default();
    assert_eq!(style.label(&heading), "mié");
    style.compact = true;
    assert_eq!(style.label(&heading), "m");
  }
}
