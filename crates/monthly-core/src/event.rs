use chrono::{
  NaiveDate,
  NaiveDateTime,
  NaiveTime
};
use serde::{
  Deserialize,
  Serialize
};
use serde_json::{
  Map,
  Value
};

/// Anything with an inclusive date range
/// the month grid can place.
pub trait CalendarEvent {
  fn start_date(&self) -> NaiveDateTime;
  fn end_date(&self) -> NaiveDateTime;
}

/// A calendar entry. `T` carries whatever
/// extra fields the caller attaches; they
/// are flattened next to the dates when
/// (de)serialized.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Event<T = Map<String, Value>> {
  pub id:         String,
  #[serde(with = "flexible_datetime")]
  pub date:       NaiveDateTime,
  #[serde(with = "flexible_datetime")]
  pub start_date: NaiveDateTime,
  #[serde(with = "flexible_datetime")]
  pub end_date:   NaiveDateTime,
  #[serde(flatten)]
  pub data:       T
}

impl<T> CalendarEvent for Event<T> {
  fn start_date(&self) -> NaiveDateTime {
    self.start_date
  }

  fn end_date(&self) -> NaiveDateTime {
    self.end_date
  }
}

impl Event {
  /// Text to show for an event carrying
  /// free-form JSON fields: `name`, then
  /// `title`, then the id.
  #[must_use]
  pub fn display_title(&self) -> &str {
    ["name", "title"]
      .iter()
      .find_map(|key| {
        self
          .data
          .get(*key)
          .and_then(Value::as_str)
      })
      .unwrap_or(self.id.as_str())
  }
}

#[must_use]
pub fn start_of_day(
  day: NaiveDate
) -> NaiveDateTime {
  day.and_time(NaiveTime::MIN)
}

/// True when midnight of `day` falls
/// within `[start_date, end_date]`.
///
/// Bounds keep their time of day, so an
/// event starting at 09:00 does not cover
/// its own first day. Pass midnight
/// values for whole-day matching.
#[must_use]
pub fn occurs_on<E: CalendarEvent>(
  event: &E,
  day: NaiveDate
) -> bool {
  let day = start_of_day(day);
  day >= event.start_date()
    && day <= event.end_date()
}

/// Events whose range covers `day`, in
/// their original order.
#[must_use]
pub fn events_for_day<'a, E>(
  day: NaiveDate,
  events: &'a [E]
) -> Vec<&'a E>
where
  E: CalendarEvent
{
  events
    .iter()
    .filter(|event| occurs_on(*event, day))
    .collect()
}

pub mod flexible_datetime {
  //! `YYYY-MM-DDTHH:MM:SS[.f]`,
  //! `YYYY-MM-DD HH:MM:SS` or a bare
  //! `YYYY-MM-DD` (read as midnight).

  use chrono::{
    NaiveDate,
    NaiveDateTime
  };
  use serde::de::Error as _;
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

  pub fn parse(
    raw: &str
  ) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    let raw = raw
      .strip_suffix('Z')
      .unwrap_or(raw);
    NaiveDateTime::parse_from_str(
      raw,
      "%Y-%m-%dT%H:%M:%S%.f"
    )
    .or_else(|_| {
      NaiveDateTime::parse_from_str(
        raw,
        "%Y-%m-%d %H:%M:%S%.f"
      )
    })
    .ok()
    .or_else(|| {
      NaiveDate::parse_from_str(
        raw, "%Y-%m-%d"
      )
      .ok()
      .map(super::start_of_day)
    })
  }

  pub fn serialize<S>(
    value: &NaiveDateTime,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    serializer.serialize_str(
      &value.format(FORMAT).to_string()
    )
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<NaiveDateTime, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw =
      String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| {
      D::Error::custom(format!(
        "invalid date or datetime: {raw}"
      ))
    })
  }
}
