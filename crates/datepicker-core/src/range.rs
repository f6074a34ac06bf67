use chrono::{
  Datelike,
  NaiveDate
};

use crate::datetime::to_calendar_date;

/// Inclusive `[min, max]` bounds at date
/// granularity. Either side may be open.
///
/// An inverted range (`min > max`) is
/// accepted as-is and simply contains no
/// dates.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub struct DateRange {
  pub min: Option<NaiveDate>,
  pub max: Option<NaiveDate>
}

impl DateRange {
  pub const UNBOUNDED: Self = Self {
    min: None,
    max: None
  };

  pub fn new(
    min: Option<NaiveDate>,
    max: Option<NaiveDate>
  ) -> Self {
    Self { min, max }
  }

  pub fn contains<D>(
    &self,
    date: &D
  ) -> bool
  where
    D: Datelike
  {
    is_in_range(date, self.min, self.max)
  }

  pub fn is_inverted(&self) -> bool {
    matches!(
      (self.min, self.max),
      (Some(min), Some(max)) if min > max
    )
  }
}

pub fn is_in_range<D>(
  date: &D,
  min: Option<NaiveDate>,
  max: Option<NaiveDate>
) -> bool
where
  D: Datelike
{
  let Some(day) = to_calendar_date(date)
  else {
    return false;
  };

  min.is_none_or(|min| day >= min)
    && max.is_none_or(|max| day <= max)
}
