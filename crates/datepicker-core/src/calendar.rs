//! Month grid arithmetic for the popup panel.
//!
//! The panel always shows six Monday-first weeks: the tail of the
//! previous month, every day of the displayed month, and enough days of
//! the following month to reach 42 cells.

use chrono::{
  Datelike,
  Duration,
  NaiveDate
};

pub const VISIBLE_CELLS: usize = 6 * 7;

pub const WEEKDAY_LABELS: [&str; 7] = [
  "Mon", "Tue", "Wed", "Thu", "Fri",
  "Sat", "Sun"
];

// Indexed by days-from-Sunday.
const SUNDAY_TO_MONDAY_WEEK: [u32; 7] =
  [6, 0, 1, 2, 3, 4, 5];

/// Which month a grid cell belongs to,
/// relative to the displayed month.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CellMonth {
  Previous,
  Current,
  Next
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct DateCell {
  pub date:  NaiveDate,
  pub month: CellMonth
}

impl DateCell {
  pub fn day(&self) -> u32 {
    self.date.day()
  }
}

fn first_day_of_month(
  year: i32,
  month: u32
) -> NaiveDate {
  NaiveDate::from_ymd_opt(
    year, month, 1
  )
  .unwrap_or(NaiveDate::MIN)
}

fn add_days(
  date: NaiveDate,
  days: i64
) -> NaiveDate {
  date
    .checked_add_signed(Duration::days(
      days
    ))
    .unwrap_or(date)
}

fn previous_month_of(
  year: i32,
  month: u32
) -> (i32, u32) {
  if month <= 1 {
    (year.saturating_sub(1), 12)
  } else {
    (year, month - 1)
  }
}

fn next_month_of(
  year: i32,
  month: u32
) -> (i32, u32) {
  if month >= 12 {
    (year.saturating_add(1), 1)
  } else {
    (year, month + 1)
  }
}

/// Number of days in `month` (1-12) of
/// `year`, taken from the day before the
/// first of the following month.
pub fn days_in_month(
  year: i32,
  month: u32
) -> u32 {
  let (next_year, next_month) =
    next_month_of(year, month);
  add_days(
    first_day_of_month(
      next_year, next_month
    ),
    -1
  )
  .day()
}

/// Monday = 0 ... Sunday = 6.
pub fn weekday_monday_indexed<D>(
  date: &D
) -> u32
where
  D: Datelike
{
  let from_sunday = date
    .weekday()
    .num_days_from_sunday()
    as usize;
  SUNDAY_TO_MONDAY_WEEK[from_sunday]
}

fn leading_filler_count(
  year: i32,
  month: u32
) -> u32 {
  weekday_monday_indexed(
    &first_day_of_month(year, month)
  )
}

pub fn previous_month_tail_cells(
  year: i32,
  month: u32
) -> Vec<DateCell> {
  let filler =
    leading_filler_count(year, month);
  if filler == 0 {
    return Vec::new();
  }

  let (cell_year, cell_month) =
    previous_month_of(year, month);
  let last =
    days_in_month(cell_year, cell_month);

  (0..filler)
    .rev()
    .filter_map(|back| {
      NaiveDate::from_ymd_opt(
        cell_year,
        cell_month,
        last - back
      )
    })
    .map(|date| {
      DateCell {
        date,
        month: CellMonth::Previous
      }
    })
    .collect()
}

pub fn current_month_cells(
  year: i32,
  month: u32,
  count: u32
) -> Vec<DateCell> {
  (1..=count)
    .filter_map(|day| {
      NaiveDate::from_ymd_opt(
        year, month, day
      )
    })
    .map(|date| {
      DateCell {
        date,
        month: CellMonth::Current
      }
    })
    .collect()
}

pub fn next_month_tail_cells(
  year: i32,
  month: u32
) -> Vec<DateCell> {
  let used = days_in_month(year, month)
    + leading_filler_count(year, month);
  let remaining =
    (VISIBLE_CELLS as u32)
      .saturating_sub(used);

  let (cell_year, cell_month) =
    next_month_of(year, month);

  (1..=remaining)
    .filter_map(|day| {
      NaiveDate::from_ymd_opt(
        cell_year, cell_month, day
      )
    })
    .map(|date| {
      DateCell {
        date,
        month: CellMonth::Next
      }
    })
    .collect()
}

/// The (year, month) the popup panel is
/// showing. Carries no day, so year steps
/// never need clamping.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct PanelCursor {
  year:  i32,
  month: u32
}

impl PanelCursor {
  /// `month` outside 1-12 is clamped.
  pub fn new(
    year: i32,
    month: u32
  ) -> Self {
    Self {
      year,
      month: month.clamp(1, 12)
    }
  }

  pub fn from_date<D>(date: &D) -> Self
  where
    D: Datelike
  {
    Self::new(date.year(), date.month())
  }

  pub fn year(&self) -> i32 {
    self.year
  }

  pub fn month(&self) -> u32 {
    self.month
  }

  pub fn next_month(self) -> Self {
    let (year, month) =
      next_month_of(self.year, self.month);
    Self { year, month }
  }

  pub fn prev_month(self) -> Self {
    let (year, month) =
      previous_month_of(
        self.year, self.month
      );
    Self { year, month }
  }

  pub fn next_year(self) -> Self {
    Self {
      year:  self.year.saturating_add(1),
      month: self.month
    }
  }

  pub fn prev_year(self) -> Self {
    Self {
      year:  self.year.saturating_sub(1),
      month: self.month
    }
  }
}

/// "Aug 2022".
pub fn month_label(
  cursor: PanelCursor
) -> String {
  first_day_of_month(
    cursor.year(),
    cursor.month()
  )
  .format("%b %Y")
  .to_string()
}

/// The 42 cells for one cursor position.
/// Built wholesale; never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
  cursor: PanelCursor,
  cells:  Vec<DateCell>
}

impl MonthGrid {
  pub fn for_month(
    cursor: PanelCursor
  ) -> Self {
    let (year, month) =
      (cursor.year(), cursor.month());
    let mut cells =
      previous_month_tail_cells(
        year, month
      );
    cells.extend(current_month_cells(
      year,
      month,
      days_in_month(year, month)
    ));
    cells.extend(next_month_tail_cells(
      year, month
    ));

    tracing::trace!(
      year,
      month,
      cells = cells.len(),
      "built month grid"
    );
    Self { cursor, cells }
  }

  pub fn cursor(&self) -> PanelCursor {
    self.cursor
  }

  pub fn cells(&self) -> &[DateCell] {
    &self.cells
  }
}
