use chrono::NaiveDate;

use crate::calendar::{
  CellMonth,
  DateCell,
  MonthGrid,
  PanelCursor,
  month_label
};
use crate::datetime::is_same_day;
use crate::range::DateRange;

/// One decorated day cell, ready to
/// render.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct PanelCell {
  pub date:        NaiveDate,
  pub day:         u32,
  pub selected:    bool,
  pub today:       bool,
  pub not_current: bool,
  pub disabled:    bool
}

impl PanelCell {
  fn decorate(
    cell: &DateCell,
    value: NaiveDate,
    today: NaiveDate,
    bounds: &DateRange
  ) -> Self {
    Self {
      date:        cell.date,
      day:         cell.day(),
      selected:    is_same_day(
        &cell.date, &value
      ),
      today:       is_same_day(
        &cell.date, &today
      ),
      not_current: cell.month
        != CellMonth::Current,
      disabled:    !bounds
        .contains(&cell.date)
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
  pub cursor: PanelCursor,
  pub label:  String,
  pub cells:  Vec<PanelCell>
}

impl PanelView {
  pub fn build(
    grid: &MonthGrid,
    value: NaiveDate,
    today: NaiveDate,
    bounds: &DateRange
  ) -> Self {
    Self {
      cursor: grid.cursor(),
      label:  month_label(grid.cursor()),
      cells:  grid
        .cells()
        .iter()
        .map(|cell| {
          PanelCell::decorate(
            cell, value, today, bounds
          )
        })
        .collect()
    }
  }

  pub fn selected_cells(
    &self
  ) -> impl Iterator<Item = &PanelCell>
  {
    self
      .cells
      .iter()
      .filter(|cell| cell.selected)
  }

  pub fn today_cells(
    &self
  ) -> impl Iterator<Item = &PanelCell>
  {
    self
      .cells
      .iter()
      .filter(|cell| cell.today)
  }

  /// First cell of the displayed month
  /// with the given day number.
  pub fn current_cell(
    &self,
    day: u32
  ) -> Option<&PanelCell> {
    self.cells.iter().find(|cell| {
      !cell.not_current && cell.day == day
    })
  }
}
