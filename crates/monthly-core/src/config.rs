use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow,
  bail
};
use chrono_tz::Tz;
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::layout::{
  HeadingStyle,
  OmitDays
};
use crate::locale::{
  DEFAULT_LOCALE_CODE,
  Locale
};

pub const CONFIG_FILE_NAME: &str =
  "calendar.toml";
pub const CONFIG_ENV_VAR: &str =
  "MONTHLY_CONFIG";
const CONFIG_DIR_NAME: &str = "monthly";
const DEFAULT_TIMEZONE: &str = "UTC";

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct CalendarConfig {
  #[serde(default = "config_version")]
  pub version:  u32,
  #[serde(default)]
  pub locale:   LocaleSetting,
  #[serde(default)]
  pub timezone: Option<String>,
  #[serde(default)]
  pub color:    Option<bool>,
  #[serde(default)]
  pub grid:     GridConfig
}

/// Either a built-in locale code or a
/// full table of names.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(untagged)]
pub enum LocaleSetting {
  Code(String),
  Custom(Locale)
}

impl Default for LocaleSetting {
  fn default() -> Self {
    Self::Code(
      DEFAULT_LOCALE_CODE.to_string()
    )
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct GridConfig {
  #[serde(default)]
  pub omit_days:             Vec<u8>,
  #[serde(default)]
  pub compact_headings:      bool,
  #[serde(default = "grid_heading_chars")]
  pub heading_chars:         usize,
  #[serde(
    default = "grid_compact_heading_chars"
  )]
  pub compact_heading_chars: usize
}

fn config_version() -> u32 {
  1
}

fn grid_heading_chars() -> usize {
  3
}

fn grid_compact_heading_chars() -> usize
{
  1
}

impl Default for GridConfig {
  fn default() -> Self {
    Self {
      omit_days:             Vec::new(),
      compact_headings:      false,
      heading_chars:         grid_heading_chars(),
      compact_heading_chars:
        grid_compact_heading_chars()
    }
  }
}

impl Default for CalendarConfig {
  fn default() -> Self {
    Self {
      version:  config_version(),
      locale:   LocaleSetting::default(),
      timezone: None,
      color:    None,
      grid:     GridConfig::default()
    }
  }
}

impl CalendarConfig {
  /// Loads from `override_path`, then
  /// `$MONTHLY_CONFIG`, then the user
  /// config dir. No file at all means
  /// defaults.
  #[tracing::instrument(skip(
    override_path
  ))]
  pub fn load(
    override_path: Option<&Path>
  ) -> anyhow::Result<Self> {
    match resolve_config_path(
      override_path
    )? {
      | Some(path) => {
        info!(config = %path.display(), "loading calendar config");
        Self::load_file(&path)
      }
      | None => {
        warn!(
          "no calendar config found; \
           using defaults"
        );
        Ok(Self::default())
      }
    }
  }

  pub fn load_file(
    path: &Path
  ) -> anyhow::Result<Self> {
    let text = fs::read_to_string(path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;
    Self::from_toml_str(&text)
      .with_context(|| {
        format!(
          "failed to parse {}",
          path.display()
        )
      })
  }

  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<Self>(text)?;
    config.sanitize();
    debug!(
      version = config.version,
      timezone = ?config.timezone,
      omit_days = ?config.grid.omit_days,
      "parsed calendar config"
    );
    Ok(config)
  }

  /// Parses an embedded config string,
  /// falling back to defaults when it is
  /// malformed.
  #[must_use]
  pub fn from_toml_or_default(
    text: &str
  ) -> Self {
    match Self::from_toml_str(text) {
      | Ok(config) => config,
      | Err(error) => {
        error!(%error, "failed parsing calendar config; using defaults");
        Self::default()
      }
    }
  }

  pub fn sanitize(&mut self) {
    if self.grid.heading_chars == 0 {
      self.grid.heading_chars =
        grid_heading_chars();
    }
    if self.grid.compact_heading_chars
      == 0
    {
      self.grid.compact_heading_chars =
        grid_compact_heading_chars();
    }

    let before = self.grid.omit_days.len();
    self
      .grid
      .omit_days
      .retain(|day| *day <= 6);
    if self.grid.omit_days.len() != before {
      warn!(
        dropped =
          before - self.grid.omit_days.len(),
        "ignoring omit_days entries \
         outside 0..=6"
      );
    }
    self.grid.omit_days.sort_unstable();
    self.grid.omit_days.dedup();

    if self
      .timezone
      .as_deref()
      .is_some_and(|tz| tz.trim().is_empty())
    {
      self.timezone = None;
    }
  }

  /// Applies `key=value` overrides by
  /// dotted path, e.g.
  /// `grid.compact_headings=true`.
  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) -> anyhow::Result<()>
  where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      debug!(key = %key, value = %value, "applying override");
      let value = value.trim();
      match key.trim() {
        | "locale" => {
          self.locale =
            LocaleSetting::Code(
              value.to_string()
            );
        }
        | "timezone" => {
          self.timezone =
            Some(value.to_string());
        }
        | "color" => {
          self.color =
            Some(parse_bool(value)?);
        }
        | "grid.omit_days" => {
          self.grid.omit_days = value
            .parse::<OmitDays>()?
            .iter()
            .collect();
        }
        | "grid.compact_headings" => {
          self.grid.compact_headings =
            parse_bool(value)?;
        }
        | "grid.heading_chars" => {
          self.grid.heading_chars =
            parse_usize(&key, value)?;
        }
        | "grid.compact_heading_chars" => {
          self
            .grid
            .compact_heading_chars =
            parse_usize(&key, value)?;
        }
        | other => {
          bail!(
            "unknown config key: {other}"
          )
        }
      }
    }
    self.sanitize();
    Ok(())
  }

  #[must_use]
  pub fn resolve_locale(&self) -> Locale {
    match &self.locale {
      | LocaleSetting::Code(code) => {
        Locale::resolve(code)
      }
      | LocaleSetting::Custom(locale) => {
        locale.clone()
      }
    }
  }

  #[must_use]
  pub fn resolve_timezone(&self) -> Tz {
    let raw = self
      .timezone
      .as_deref()
      .unwrap_or(DEFAULT_TIMEZONE);
    parse_timezone(raw).unwrap_or(
      chrono_tz::UTC
    )
  }

  /// `None` when nothing is omitted.
  #[must_use]
  pub fn omit_days(
    &self
  ) -> Option<OmitDays> {
    let omit = OmitDays::from_indices(
      self.grid.omit_days.iter().copied()
    );
    (!omit.is_empty()).then_some(omit)
  }

  #[must_use]
  pub fn heading_style(
    &self
  ) -> HeadingStyle {
    HeadingStyle {
      compact:       self
        .grid
        .compact_headings,
      full_chars:    self.grid.heading_chars,
      compact_chars: self
        .grid
        .compact_heading_chars
    }
  }
}

fn parse_timezone(raw: &str) -> Option<Tz> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }

  match trimmed.parse::<Tz>() {
    | Ok(tz) => Some(tz),
    | Err(error) => {
      error!(
        timezone = %trimmed,
        error = %error,
        "invalid timezone id"
      );
      None
    }
  }
}

fn parse_bool(
  value: &str
) -> anyhow::Result<bool> {
  match value
    .to_ascii_lowercase()
    .as_str()
  {
    | "on" | "yes" | "true" | "1" => {
      Ok(true)
    }
    | "off" | "no" | "false" | "0" => {
      Ok(false)
    }
    | other => {
      Err(anyhow!(
        "invalid boolean: {other}"
      ))
    }
  }
}

fn parse_usize(
  key: &str,
  value: &str
) -> anyhow::Result<usize> {
  value.parse::<usize>().with_context(
    || {
      format!(
        "invalid number for {key}: \
         {value}"
      )
    }
  )
}

fn resolve_config_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    if !path.exists() {
      bail!(
        "config file does not exist: {}",
        path.display()
      );
    }
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(raw) =
    std::env::var(CONFIG_ENV_VAR)
    && !raw.trim().is_empty()
  {
    let path = PathBuf::from(raw.trim());
    if path.exists() {
      return Ok(Some(path));
    }
    warn!(
      config = %path.display(),
      "{CONFIG_ENV_VAR} points to a missing file; ignoring"
    );
  }

  Ok(dirs::config_dir()
    .map(|dir| {
      dir
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
    })
    .filter(|path| path.exists()))
}

#[cfg(test)]
mod tests {
  use super::{
    CalendarConfig,
    LocaleSetting
  };
  use crate::layout::OmitDays;

  #[test]
  fn empty_file_gives_defaults() {
    let config =
      CalendarConfig::from_toml_str("")
        .expect("parse empty");
    assert_eq!(
      config,
      CalendarConfig::default()
    );
    assert!(config.omit_days().is_none());
    assert_eq!(
      config.resolve_timezone(),
      chrono_tz::UTC
    );
  }

  #[test]
  fn sanitize_repairs_values() {
    let config =
      CalendarConfig::from_toml_str(
        r#"
timezone = "  "
[grid]
omit_days = [6, 0, 9, 6]
heading_chars = 0
"#
      )
      .expect("parse");
    assert_eq!(
      config.grid.omit_days,
      vec![0, 6]
    );
    assert_eq!(config.grid.heading_chars, 3);
    assert_eq!(config.timezone, None);
    assert_eq!(
      config.omit_days(),
      Some(OmitDays::weekends())
    );
  }

  #[test]
  fn custom_locale_table() {
    let config =
      CalendarConfig::from_toml_str(
        r#"
[locale]
code = "nl"
weekdays = ["zondag", "maandag", "dinsdag", "woensdag", "donderdag", "vrijdag", "zaterdag"]
months = ["januari", "februari", "maart", "april", "mei", "juni", "juli", "augustus", "september", "oktober", "november", "december"]
"#
      )
      .expect("parse");
    assert!(matches!(
      config.locale,
      LocaleSetting::Custom(_)
    ));
    let locale = config.resolve_locale();
    assert_eq!(locale.weekday_name(3), "woensdag");
    assert_eq!(locale.previous, "Previous");
  }

  #[test]
  fn overrides_apply_by_dotted_key() {
    let mut config =
      CalendarConfig::default();
    config
      .apply_overrides([
        (
          "grid.omit_days".to_string(),
          "sun,sat".to_string()
        ),
        (
          "grid.compact_headings"
            .to_string(),
          "yes".to_string()
        ),
        ("locale".to_string(), "fr".to_string()),
      ])
      .expect("apply overrides");
    assert_eq!(
      config.grid.omit_days,
      vec![0, 6]
    );
    assert!(config.heading_style().compact);
    assert_eq!(
      config.resolve_locale().code,
      "fr"
    );

    assert!(
      config
        .apply_overrides([(
          "grid.nope".to_string(),
          "1".to_string()
        )])
        .is_err()
    );
  }

  #[test]
  fn invalid_timezone_falls_back_to_utc() {
    let config =
      CalendarConfig::from_toml_str(
        "timezone = \"Mars/Olympus\"",
      )
      .expect("parse");
    assert_eq!(
      config.resolve_timezone(),
      chrono_tz::UTC
    );
  }
}
