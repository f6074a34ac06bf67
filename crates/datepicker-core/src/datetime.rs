use std::sync::OnceLock;

use chrono::{
  Datelike,
  NaiveDate
};
use regex::Regex;

use crate::calendar::days_in_month;

/// Why a piece of input text is not a
/// date.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  thiserror::Error,
)]
pub enum DateTextError {
  #[error(
    "expected DD-MM-YYYY, got {0:?}"
  )]
  Malformed(String),
  #[error("month {0} is not in 1-12")]
  MonthOutOfRange(u32),
  #[error(
    "day {day} is not in 1-{max} for \
     {month:02}-{year:04}"
  )]
  DayOutOfRange {
    day:   u32,
    month: u32,
    year:  i32,
    max:   u32
  }
}

fn date_text_regex()
-> Option<&'static Regex> {
  static DATE_TEXT: OnceLock<
    Option<Regex>
  > = OnceLock::new();
  DATE_TEXT
    .get_or_init(|| {
      // ASCII only; `\d` would accept
      // other scripts' digits.
      Regex::new(
        r"^(?P<day>[0-9]{2})-(?P<month>[0-9]{2})-(?P<year>[0-9]{4})$"
      )
      .ok()
    })
    .as_ref()
}

#[must_use]
pub fn format_date<D>(date: &D) -> String
where
  D: Datelike
{
  format!(
    "{:02}-{:02}-{:04}",
    date.day(),
    date.month(),
    date.year()
  )
}

pub fn parse_date(
  text: &str
) -> Result<NaiveDate, DateTextError> {
  let malformed = || {
    DateTextError::Malformed(
      text.to_string()
    )
  };
  let caps = date_text_regex()
    .and_then(|re| re.captures(text))
    .ok_or_else(malformed)?;

  let field = |name: &str| {
    caps
      .name(name)
      .and_then(|m| {
        m.as_str().parse::<u32>().ok()
      })
      .ok_or_else(malformed)
  };
  let day = field("day")?;
  let month = field("month")?;
  let year = field("year")? as i32;

  if !(1..=12).contains(&month) {
    return Err(
      DateTextError::MonthOutOfRange(
        month
      )
    );
  }

  let max = days_in_month(year, month);
  if day < 1 || day > max {
    return Err(
      DateTextError::DayOutOfRange {
        day,
        month,
        year,
        max
      }
    );
  }

  NaiveDate::from_ymd_opt(
    year, month, day
  )
  .ok_or_else(malformed)
}

/// Drops any time-of-day component.
pub fn to_calendar_date<D>(
  date: &D
) -> Option<NaiveDate>
where
  D: Datelike
{
  NaiveDate::from_ymd_opt(
    date.year(),
    date.month(),
    date.day()
  )
}

pub fn is_same_day<A, B>(
  a: &A,
  b: &B
) -> bool
where
  A: Datelike,
  B: Datelike
{
  a.year() == b.year()
    && a.month() == b.month()
    && a.day() == b.day()
}

#[cfg(test)]
mod tests {
  use chrono::{
    NaiveDate,
    NaiveDateTime
  };

  use super::*;

  fn date(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn formats_zero_padded() {
    assert_eq!(
      format_date(&date(2022, 8, 1)),
      "01-08-2022"
    );
    assert_eq!(
      format_date(&date(987, 12, 31)),
      "31-12-0987"
    );
  }

  #[test]
  fn parses_valid_text() {
    assert_eq!(
      parse_date("15-08-2022"),
      Ok(date(2022, 8, 15))
    );
    assert_eq!(
      parse_date("29-02-2020"),
      Ok(date(2020, 2, 29))
    );
  }

  #[test]
  fn rejects_impossible_days_and_months(
  ) {
    assert!(matches!(
      parse_date("32-08-2022"),
      Err(
        DateTextError::DayOutOfRange {
          day: 32,
          ..
        }
      )
    ));
    assert_eq!(
      parse_date("15-13-2022"),
      Err(
        DateTextError::MonthOutOfRange(
          13
        )
      )
    );
    assert_eq!(
      parse_date("15-00-2022"),
      Err(
        DateTextError::MonthOutOfRange(0)
      )
    );
    assert!(matches!(
      parse_date("29-02-2021"),
      Err(
        DateTextError::DayOutOfRange {
          max: 28,
          ..
        }
      )
    ));
    assert!(matches!(
      parse_date("00-08-2022"),
      Err(
        DateTextError::DayOutOfRange {
          day: 0,
          ..
        }
      )
    ));
  }

  #[test]
  fn rejects_malformed_text() {
    for raw in [
      "",
      "1-08-2022",
      "01-8-2022",
      "01-08-22",
      "01/08/2022",
      "2022-08-01",
      " 01-08-2022",
      "01-08-2022x",
      "٠١-08-2022"
    ] {
      assert!(
        matches!(
          parse_date(raw),
          Err(DateTextError::Malformed(_))
        ),
        "{raw:?} should be malformed"
      );
    }
  }

  #[test]
  fn same_day_ignores_time_of_day() {
    let morning =
      NaiveDateTime::parse_from_str(
        "2022-08-02 07:15",
        "%Y-%m-%d %H:%M"
      )
      .expect("valid datetime");
    assert!(is_same_day(
      &morning,
      &date(2022, 8, 2)
    ));
    assert!(!is_same_day(
      &morning,
      &date(2022, 8, 3)
    ));
    assert_eq!(
      to_calendar_date(&morning),
      Some(date(2022, 8, 2))
    );
  }
}
