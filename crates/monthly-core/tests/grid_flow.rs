use std::fs;

use chrono::{Datelike, NaiveDate};
use monthly_core::config::CalendarConfig;
use monthly_core::month::weekday_index;
use monthly_core::{
    CalendarMonth, Locale, OmitDays, events_for_day, handle_omitted_days, load_events,
};
use tempfile::tempdir;

fn first_of(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid date")
}

#[test]
fn padding_matches_weekday_of_the_first_for_every_month() {
    let locale = Locale::en_us();
    for year in 1999..=2031 {
        for m in 1..=12 {
            let month = CalendarMonth::new(first_of(year, m));
            let layout = handle_omitted_days(month.days(), None, &locale);

            assert_eq!(
                layout.padding.len(),
                usize::from(weekday_index(first_of(year, m))),
                "{year}-{m:02}"
            );
            assert_eq!(layout.days_to_render.len(), month.days().len());

            let prev = month.previous();
            let prev_len = prev.days().len() as u32;
            let expected: Vec<u32> = (prev_len + 1 - layout.padding.len() as u32..=prev_len)
                .collect();
            if !layout.padding.is_empty() {
                assert_eq!(layout.padding, expected, "{year}-{m:02}");
            }
        }
    }
}

#[test]
fn headings_drop_exactly_the_omitted_weekdays() {
    let locale = Locale::by_code("es").expect("es locale");
    let month = CalendarMonth::new(first_of(2022, 6));

    for mask in 0_u8..128 {
        let omit = OmitDays::from_indices((0..7).filter(|i| mask & (1 << i) != 0));
        let layout = handle_omitted_days(month.days(), Some(&omit), &locale);

        assert_eq!(layout.headings.len(), 7 - omit.len());
        assert!(layout.headings.iter().all(|h| !omit.contains(h.day)));
        assert!(
            layout
                .days_to_render
                .iter()
                .all(|d| !omit.contains(weekday_index(*d)))
        );

        if let Some(first) = layout.days_to_render.first() {
            let column = layout.padding.len();
            let heading = &layout.headings[column];
            assert_eq!(heading.day, weekday_index(*first), "mask {mask:07b}");
        } else {
            assert!(omit.is_all());
            assert!(layout.padding.is_empty());
            assert!(layout.headings.is_empty());
        }
    }
}

#[test]
fn layout_is_idempotent_and_leaves_inputs_alone() {
    let locale = Locale::en_us();
    let month = CalendarMonth::new(first_of(2022, 6));
    let days = month.days().to_vec();
    let omit = OmitDays::weekends();

    let first = handle_omitted_days(&days, Some(&omit), &locale);
    let second = handle_omitted_days(&days, Some(&omit), &locale);

    assert_eq!(first, second);
    assert_eq!(days, month.days());
}

#[test]
fn events_file_drives_per_day_filtering() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("events.json");
    fs::write(
        &path,
        r#"[
  {"id": "1", "name": "meeting requirement 01", "startTime": "09:00",
   "date": "2022-05-09T00:00:00", "startDate": "2022-05-09T00:00:00", "endDate": "2022-05-10T00:00:00"},
  {"id": "2", "name": "meeting requirement 02",
   "date": "2022-05-09T00:00:00", "startDate": "2022-05-10T00:00:00", "endDate": "2022-05-10T00:00:00"},
  {"id": "3", "name": "meeting requirement 03",
   "date": "2022-05-09T00:00:00", "startDate": "2022-05-10T00:00:00", "endDate": "2022-05-11T00:00:00"}
]"#,
    )
    .expect("write events");

    let events = load_events(&path).expect("load events");
    let before = events.clone();
    let month = CalendarMonth::new(first_of(2022, 5));

    let ids_on = |day: u32| -> Vec<String> {
        let date = month.days()[(day - 1) as usize];
        assert_eq!(date.day(), day);
        events_for_day(date, &events)
            .into_iter()
            .map(|e| e.id.clone())
            .collect()
    };

    assert_eq!(ids_on(8), Vec::<String>::new());
    assert_eq!(ids_on(9), vec!["1"]);
    assert_eq!(ids_on(10), vec!["1", "2", "3"]);
    assert_eq!(ids_on(11), vec!["3"]);
    assert_eq!(ids_on(12), Vec::<String>::new());
    assert_eq!(events, before);
}

#[test]
fn broken_events_file_reports_path() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("broken.json");
    fs::write(&path, "{ not json").expect("write file");

    let err = load_events(&path).expect_err("should fail");
    assert!(format!("{err:#}").contains("broken.json"));
}

#[test]
fn config_file_on_disk_sets_up_layout() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("calendar.toml");
    fs::write(
        &path,
        r#"
version = 1
locale = "id"
timezone = "Asia/Jakarta"

[grid]
omit_days = [0, 6]
compact_headings = true
"#,
    )
    .expect("write config");

    let cfg = CalendarConfig::load(Some(&path)).expect("load config");
    assert_eq!(cfg.resolve_timezone(), chrono_tz::Asia::Jakarta);

    let locale = cfg.resolve_locale();
    let month = CalendarMonth::new(first_of(2022, 6));
    let layout = handle_omitted_days(month.days(), cfg.omit_days().as_ref(), &locale);
    let style = cfg.heading_style();

    let labels: Vec<String> = layout.headings.iter().map(|h| style.label(h)).collect();
    assert_eq!(labels, vec!["S", "S", "R", "K", "J"]);
    assert_eq!(layout.padding, vec![30, 31]);
}

#[test]
fn missing_explicit_config_is_an_error() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("absent.toml");
    assert!(CalendarConfig::load(Some(&path)).is_err());
}
