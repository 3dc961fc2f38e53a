use serde::{
  Deserialize,
  Serialize
};
use tracing::warn;

pub const DEFAULT_LOCALE_CODE: &str =
  "en-US";

/// Names used to label a month grid.
///
/// Weekday names are stored Sunday
/// first; grid indexing is Sunday = 0
/// no matter where a locale
/// conventionally starts its week.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct Locale {
  pub code:     String,
  pub weekdays: [String; 7],
  pub months:   [String; 12],
  #[serde(default = "default_previous_label")]
  pub previous: String,
  #[serde(default = "default_next_label")]
  pub next:     String
}

fn default_previous_label() -> String {
  "Previous".to_string()
}

fn default_next_label() -> String {
  "Next".to_string()
}

struct BuiltinLocale {
  code:     &'static str,
  weekdays: [&'static str; 7],
  months:   [&'static str; 12],
  previous: &'static str,
  next:     &'static str
}

const BUILTIN_LOCALES: &[BuiltinLocale] = &[
  BuiltinLocale {
    code:     "en-US",
    weekdays: [
      "Sunday",
      "Monday",
      "Tuesday",
      "Wednesday",
      "Thursday",
      "Friday",
      "Saturday"
    ],
    months:   [
      "January",
      "February",
      "March",
      "April",
      "May",
      "June",
      "July",
      "August",
      "September",
      "October",
      "November",
      "December"
    ],
    previous: "Previous",
    next:     "Next"
  },
  BuiltinLocale {
    code:     "es",
    weekdays: [
      "domingo",
      "lunes",
      "martes",
      "miércoles",
      "jueves",
      "viernes",
      "sábado"
    ],
    months:   [
      "enero",
      "febrero",
      "marzo",
      "abril",
      "mayo",
      "junio",
      "julio",
      "agosto",
      "septiembre",
      "octubre",
      "noviembre",
      "diciembre"
    ],
    previous: "Anterior",
    next:     "Siguiente"
  },
  BuiltinLocale {
    code:     "fr",
    weekdays: [
      "dimanche", "lundi", "mardi",
      "mercredi", "jeudi", "vendredi",
      "samedi"
    ],
    months:   [
      "janvier",
      "février",
      "mars",
      "avril",
      "mai",
      "juin",
      "juillet",
      "août",
      "septembre",
      "octobre",
      "novembre",
      "décembre"
    ],
    previous: "Précédent",
    next:     "Suivant"
  },
  BuiltinLocale {
    code:     "de",
    weekdays: [
      "Sonntag",
      "Montag",
      "Dienstag",
      "Mittwoch",
      "Donnerstag",
      "Freitag",
      "Samstag"
    ],
    months:   [
      "Januar",
      "Februar",
      "März",
      "April",
      "Mai",
      "Juni",
      "Juli",
      "August",
      "September",
      "Oktober",
      "November",
      "Dezember"
    ],
    previous: "Zurück",
    next:     "Weiter"
  },
  BuiltinLocale {
    code:     "id",
    weekdays: [
      "Minggu", "Senin", "Selasa",
      "Rabu", "Kamis", "Jumat", "Sabtu"
    ],
    months:   [
      "Januari",
      "Februari",
      "Maret",
      "April",
      "Mei",
      "Juni",
      "Juli",
      "Agustus",
      "September",
      "Oktober",
      "November",
      "Desember"
    ],
    previous: "Sebelumnya",
    next:     "Berikutnya"
  }
];

impl BuiltinLocale {
  fn to_locale(&self) -> Locale {
    Locale {
      code:     self.code.to_string(),
      weekdays: self
        .weekdays
        .map(str::to_string),
      months:   self
        .months
        .map(str::to_string),
      previous: self.previous.to_string(),
      next:     self.next.to_string()
    }
  }
}

impl Default for Locale {
  fn default() -> Self {
    Self::en_us()
  }
}

impl Locale {
  #[must_use]
  pub fn en_us() -> Self {
    BUILTIN_LOCALES[0].to_locale()
  }

  /// Looks up a built-in locale. Matching
  /// ignores case and also accepts the
  /// bare language of a region tag, so
  /// `es-MX` resolves to `es`.
  #[must_use]
  pub fn by_code(
    code: &str
  ) -> Option<Self> {
    let wanted = code.trim();
    if wanted.is_empty() {
      return None;
    }

    let exact = BUILTIN_LOCALES
      .iter()
      .find(|locale| {
        locale
          .code
          .eq_ignore_ascii_case(wanted)
      });
    if let Some(locale) = exact {
      return Some(locale.to_locale());
    }

    let language = wanted
      .split(['-', '_'])
      .next()
      .unwrap_or(wanted);
    BUILTIN_LOCALES
      .iter()
      .find(|locale| {
        locale
          .code
          .split('-')
          .next()
          .is_some_and(|lang| {
            lang.eq_ignore_ascii_case(
              language
            )
          })
      })
      .map(BuiltinLocale::to_locale)
  }

  /// Like [`Locale::by_code`] but falls
  /// back to `en-US`.
  #[must_use]
  pub fn resolve(code: &str) -> Self {
    Self::by_code(code).unwrap_or_else(
      || {
        warn!(
          locale = %code,
          fallback = DEFAULT_LOCALE_CODE,
          "unknown locale; using fallback"
        );
        Self::en_us()
      }
    )
  }

  /// Full weekday name for a Sunday = 0
  /// index. Indices wrap modulo 7.
  #[must_use]
  pub fn weekday_name(
    &self,
    index: u8
  ) -> &str {
    &self.weekdays
      [usize::from(index % 7)]
  }

  /// Month name for a 1-based month.
  #[must_use]
  pub fn month_name(
    &self,
    month: u32
  ) -> &str {
    let idx =
      (month.clamp(1, 12) - 1) as usize;
    &self.months[idx]
  }

  /// Day-of-month as the locale writes
  /// it. Every built-in locale uses
  /// plain Arabic numerals.
  #[must_use]
  pub fn format_day_number(
    &self,
    day: u32
  ) -> String {
    day.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::Locale;

  #[test]
  fn resolves_exact_and_language_codes()
  {
    assert_eq!(
      Locale::by_code("fr")
        .expect("fr")
        .weekday_name(1),
      "lundi"
    );
    assert_eq!(
      Locale::by_code("es-MX")
        .expect("language fallback")
        .code,
      "es"
    );
    assert_eq!(
      Locale::by_code("EN-us")
        .expect("case insensitive")
        .code,
      "en-US"
    );
    assert!(
      Locale::by_code("xx").is_none()
    );
  }

  #[test]
  fn unknown_code_resolves_to_default()
  {
    assert_eq!(
      Locale::resolve("klingon"),
      Locale::en_us()
    );
  }

  #[test]
  fn weekday_names_start_on_sunday() {
    let locale = Locale::by_code("de")
      .expect("de");
    assert_eq!(
      locale.weekday_name(0),
      "Sonntag"
    );
    assert_eq!(
      locale.weekday_name(6),
      "Samstag"
    );
    assert_eq!(
      locale.month_name(3),
      "März"
    );
  }
}
