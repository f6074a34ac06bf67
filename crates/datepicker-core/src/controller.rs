//! The per-instance interaction state
//! machine.
//!
//! The controller never talks to the
//! host directly. Every trigger returns
//! what happened, and a committed date
//! is handed back to the caller, which is
//! responsible for forwarding it to the
//! host's change callback exactly once.
//!
//! Two date-like states are kept apart on
//! purpose: the host's authoritative
//! value and the popup's panel cursor.
//! The text buffer follows the value; the
//! cursor follows the text buffer when it
//! parses to an allowed date. Nothing
//! else links them.
//!
//! A commit does not touch the buffer.
//! Until the host re-renders, the
//! emitted date is remembered so the same
//! edit is never handed out twice, and
//! the next render resyncs the buffer to
//! whatever value the host settled on.

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::{
  MonthGrid,
  PanelCursor
};
use crate::datetime::{
  format_date,
  parse_date
};
use crate::panel::PanelView;
use crate::range::DateRange;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum PickerState {
  Closed,
  /// Popup open, text matches the value.
  OpenClean,
  /// Popup open, text differs from the
  /// value (invalid or unconfirmed).
  OpenDirty
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum PanelNavigation {
  PrevYear,
  PrevMonth,
  NextMonth,
  NextYear
}

impl PanelNavigation {
  pub const ALL: [Self; 4] = [
    Self::PrevYear,
    Self::PrevMonth,
    Self::NextMonth,
    Self::NextYear
  ];

  pub fn label(self) -> &'static str {
    match self {
      | Self::PrevYear => "Prev Year",
      | Self::PrevMonth => "Prev Month",
      | Self::NextMonth => "Next Month",
      | Self::NextYear => "Next Year"
    }
  }

  fn apply(
    self,
    cursor: PanelCursor
  ) -> PanelCursor {
    match self {
      | Self::PrevYear => {
        cursor.prev_year()
      }
      | Self::PrevMonth => {
        cursor.prev_month()
      }
      | Self::NextMonth => {
        cursor.next_month()
      }
      | Self::NextYear => {
        cursor.next_year()
      }
    }
  }
}

/// Result of evaluating the text buffer
/// on Enter or on an outside click.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CommitOutcome {
  /// Host must be notified with this
  /// date.
  Committed(NaiveDate),
  /// Text did not parse; buffer reset to
  /// the current value.
  RolledBack,
  /// Text parsed but is outside the
  /// bounds; buffer left as typed.
  OutOfRange,
  /// Popup closed without an edit to
  /// evaluate; host is not notified.
  Dismissed,
  /// Nothing to evaluate.
  Ignored
}

impl CommitOutcome {
  pub fn committed(
    self
  ) -> Option<NaiveDate> {
    match self {
      | Self::Committed(date) => {
        Some(date)
      }
      | _ => None
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Popup {
  grid:  MonthGrid,
  today: NaiveDate
}

impl Popup {
  fn open(
    cursor: PanelCursor,
    today: NaiveDate
  ) -> Self {
    Self {
      grid: MonthGrid::for_month(cursor),
      today
    }
  }

  fn cursor(&self) -> PanelCursor {
    self.grid.cursor()
  }

  fn move_to(
    &mut self,
    cursor: PanelCursor
  ) {
    if cursor != self.grid.cursor() {
      self.grid =
        MonthGrid::for_month(cursor);
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePickerController {
  value:   NaiveDate,
  bounds:  DateRange,
  text:    String,
  popup:   Option<Popup>,
  /// Handed to the host, not yet seen
  /// back through `sync_value`.
  emitted: Option<NaiveDate>
}

impl DatePickerController {
  pub fn new(
    value: NaiveDate,
    bounds: DateRange
  ) -> Self {
    Self {
      value,
      bounds,
      text: format_date(&value),
      popup: None,
      emitted: None
    }
  }

  pub fn value(&self) -> NaiveDate {
    self.value
  }

  pub fn bounds(&self) -> DateRange {
    self.bounds
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn is_open(&self) -> bool {
    self.popup.is_some()
  }

  pub fn cursor(
    &self
  ) -> Option<PanelCursor> {
    self.popup.as_ref().map(Popup::cursor)
  }

  pub fn is_dirty(&self) -> bool {
    self.text != format_date(&self.value)
  }

  /// Dirty, and not already emitted.
  pub fn has_pending_edit(&self) -> bool {
    self.emitted.is_none()
      && self.is_dirty()
  }

  pub fn state(&self) -> PickerState {
    match (self.is_open(), self.is_dirty())
    {
      | (false, _) => PickerState::Closed,
      | (true, false) => {
        PickerState::OpenClean
      }
      | (true, true) => {
        PickerState::OpenDirty
      }
    }
  }

  /// Drives the input's invalid marker.
  pub fn is_invalid(&self) -> bool {
    self.parsed_in_range().is_none()
  }

  fn parsed_in_range(
    &self
  ) -> Option<NaiveDate> {
    parse_date(&self.text)
      .ok()
      .filter(|date| {
        self.bounds.contains(date)
      })
  }

  /// Click or focus on the input.
  pub fn activate(
    &mut self,
    today: NaiveDate
  ) {
    if self.popup.is_some() {
      return;
    }

    let seed = self
      .parsed_in_range()
      .unwrap_or(self.value);
    let cursor =
      PanelCursor::from_date(&seed);
    debug!(
      text = %self.text,
      year = cursor.year(),
      month = cursor.month(),
      %today,
      "opening date picker popup"
    );
    self.popup =
      Some(Popup::open(cursor, today));
  }

  pub fn type_text(&mut self, raw: &str) {
    let trimmed = raw.trim();
    if trimmed == self.text {
      return;
    }
    self.text = trimmed.to_string();
    self.emitted = None;

    let snapped = self.parsed_in_range();
    if let (Some(date), Some(popup)) =
      (snapped, self.popup.as_mut())
    {
      popup.move_to(
        PanelCursor::from_date(&date)
      );
    }
    debug!(
      text = %self.text,
      snapped = ?snapped,
      "date picker text changed"
    );
  }

  /// Enter key.
  pub fn confirm(
    &mut self
  ) -> CommitOutcome {
    self.commit_text("confirm")
  }

  /// A click that landed outside the
  /// widget. Only a pending edit is
  /// evaluated, whether or not the popup
  /// is open; without one an open popup
  /// is just dismissed.
  pub fn click_outside(
    &mut self
  ) -> CommitOutcome {
    if self.has_pending_edit() {
      return self
        .commit_text("outside_click");
    }
    if self.popup.take().is_some() {
      debug!(
        "date picker popup dismissed"
      );
      return CommitOutcome::Dismissed;
    }
    CommitOutcome::Ignored
  }

  #[tracing::instrument(
    level = "debug",
    skip(self),
    fields(text = %self.text)
  )]
  fn commit_text(
    &mut self,
    trigger: &'static str
  ) -> CommitOutcome {
    let outcome =
      match parse_date(&self.text) {
        | Err(error) => {
          debug!(
            %error,
            "rolling back unparseable \
             date text"
          );
          self.text =
            format_date(&self.value);
          CommitOutcome::RolledBack
        }
        | Ok(date)
          if !self.bounds.contains(&date) =>
        {
          debug!(
            %date,
            "keeping out-of-range date \
             text"
          );
          CommitOutcome::OutOfRange
        }
        | Ok(date) => {
          self.emitted = Some(date);
          CommitOutcome::Committed(date)
        }
      };

    self.popup = None;
    debug!(
      ?outcome,
      "date picker text evaluated"
    );
    outcome
  }

  /// Click on a day cell. Returns the
  /// date to send to the host, or `None`
  /// when the cell is disabled.
  pub fn select_cell(
    &mut self,
    date: NaiveDate
  ) -> Option<NaiveDate> {
    if !self.bounds.contains(&date) {
      debug!(
        %date,
        "ignoring disabled date cell"
      );
      return None;
    }

    self.popup = None;
    self.emitted = Some(date);
    debug!(%date, "date cell selected");
    Some(date)
  }

  pub fn navigate(
    &mut self,
    step: PanelNavigation
  ) {
    let Some(popup) = self.popup.as_mut()
    else {
      return;
    };
    let next = step.apply(popup.cursor());
    popup.move_to(next);
    debug!(
      ?step,
      year = next.year(),
      month = next.month(),
      "date picker panel moved"
    );
  }

  /// The host re-rendered with `value`.
  /// Returns whether it differed from
  /// the previous value.
  pub fn sync_value(
    &mut self,
    value: NaiveDate
  ) -> bool {
    let emitted = self.emitted.take();
    if value == self.value {
      if let Some(date) = emitted {
        debug!(
          %date,
          %value,
          "host kept its value; \
           resyncing date text"
        );
        self.text = format_date(&value);
      }
      return false;
    }
    debug!(
      previous = %self.value,
      %value,
      discarded_edit = self.is_dirty(),
      "authoritative date changed"
    );
    self.value = value;
    self.text = format_date(&value);
    true
  }

  pub fn set_bounds(
    &mut self,
    bounds: DateRange
  ) {
    self.bounds = bounds;
  }

  /// `None` while the popup is closed.
  pub fn panel(
    &self
  ) -> Option<PanelView> {
    self.popup.as_ref().map(|popup| {
      PanelView::build(
        &popup.grid,
        self.value,
        popup.today,
        &self.bounds
      )
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  fn picker() -> DatePickerController {
    DatePickerController::new(
      date(2022, 8, 1),
      DateRange::UNBOUNDED
    )
  }

  #[test]
  fn starts_closed_with_formatted_text() {
    let picker = picker();
    assert_eq!(picker.text(), "01-08-2022");
    assert_eq!(
      picker.state(),
      PickerState::Closed
    );
    assert!(picker.panel().is_none());
    assert!(!picker.is_invalid());
  }

  #[test]
  fn activation_preserves_buffer() {
    let mut picker = picker();
    picker.type_text("garbage");
    picker.activate(date(2022, 8, 2));
    assert_eq!(picker.text(), "garbage");
    assert_eq!(
      picker.state(),
      PickerState::OpenDirty
    );
    assert_eq!(
      picker.cursor(),
      Some(PanelCursor::new(2022, 8))
    );
  }

  #[test]
  fn typing_trims_and_snaps_cursor() {
    let mut picker = picker();
    picker.activate(date(2022, 8, 2));
    picker.type_text("  15-11-2023 ");
    assert_eq!(picker.text(), "15-11-2023");
    assert_eq!(
      picker.cursor(),
      Some(PanelCursor::new(2023, 11))
    );
    assert!(!picker.is_invalid());
  }

  #[test]
  fn unchanged_text_does_not_resnap() {
    let mut picker = picker();
    picker.activate(date(2022, 8, 2));
    picker.type_text("15-11-2023");
    picker
      .navigate(PanelNavigation::NextYear);
    picker.type_text("15-11-2023 ");
    assert_eq!(
      picker.cursor(),
      Some(PanelCursor::new(2024, 11))
    );
  }

  #[test]
  fn out_of_range_text_does_not_snap() {
    let mut picker =
      DatePickerController::new(
        date(2022, 8, 1),
        DateRange::new(
          None,
          Some(date(2022, 8, 31))
        )
      );
    picker.activate(date(2022, 8, 2));
    picker.type_text("01-12-2022");
    assert!(picker.is_invalid());
    assert_eq!(
      picker.cursor(),
      Some(PanelCursor::new(2022, 8))
    );
  }

  #[test]
  fn confirm_rolls_back_garbage() {
    let mut picker = picker();
    picker.activate(date(2022, 8, 2));
    picker.type_text("32-08-2022");
    assert!(picker.is_invalid());

    assert_eq!(
      picker.confirm(),
      CommitOutcome::RolledBack
    );
    assert_eq!(picker.text(), "01-08-2022");
    assert!(!picker.is_open());
  }

  #[test]
  fn confirm_keeps_out_of_range_text() {
    let mut picker =
      DatePickerController::new(
        date(2022, 8, 1),
        DateRange::new(
          Some(date(2022, 7, 31)),
          Some(date(2022, 9, 30))
        )
      );
    picker.activate(date(2022, 8, 2));
    picker.type_text("01-10-2022");

    assert_eq!(
      picker.confirm(),
      CommitOutcome::OutOfRange
    );
    assert_eq!(picker.text(), "01-10-2022");
    assert!(picker.is_invalid());
    assert!(!picker.is_open());
  }

  #[test]
  fn outside_click_while_closed_and_clean_is_ignored(
  ) {
    let mut picker = picker();
    assert_eq!(
      picker.click_outside(),
      CommitOutcome::Ignored
    );
  }

  #[test]
  fn outside_click_commits_pending_edit_when_closed(
  ) {
    let mut picker = picker();
    picker.type_text("20-08-2022");
    assert!(!picker.is_open());
    assert_eq!(
      picker.click_outside(),
      CommitOutcome::Committed(date(
        2022, 8, 20
      ))
    );
  }

  #[test]
  fn disabled_cell_is_a_no_op() {
    let mut picker =
      DatePickerController::new(
        date(2022, 8, 1),
        DateRange::new(
          Some(date(2022, 8, 1)),
          None
        )
      );
    picker.activate(date(2022, 8, 2));
    assert_eq!(
      picker.select_cell(date(2022, 7, 31)),
      None
    );
    assert!(picker.is_open());
    assert_eq!(picker.text(), "01-08-2022");
  }

  #[test]
  fn navigation_only_moves_cursor() {
    let mut picker = picker();
    picker.activate(date(2022, 8, 2));
    picker.type_text("abc");
    for step in PanelNavigation::ALL {
      picker.navigate(step);
    }
    assert_eq!(
      picker.cursor(),
      Some(PanelCursor::new(2022, 8))
    );
    assert_eq!(picker.text(), "abc");
    assert_eq!(
      picker.value(),
      date(2022, 8, 1)
    );
    assert!(picker.is_open());
  }

  #[test]
  fn navigation_while_closed_is_ignored() {
    let mut picker = picker();
    picker
      .navigate(PanelNavigation::NextMonth);
    assert!(picker.cursor().is_none());
  }

  #[test]
  fn external_value_overwrites_edit_but_not_cursor(
  ) {
    let mut picker = picker();
    picker.activate(date(2022, 8, 2));
    picker.type_text("05-0");
    assert!(picker.sync_value(date(
      2023, 1, 9
    )));
    assert_eq!(picker.text(), "09-01-2023");
    assert_eq!(
      picker.cursor(),
      Some(PanelCursor::new(2022, 8))
    );
    assert!(!picker.sync_value(date(
      2023, 1, 9
    )));
  }

  #[test]
  fn reopening_reseeds_from_value() {
    let mut picker = picker();
    picker.activate(date(2022, 8, 2));
    picker
      .navigate(PanelNavigation::NextYear);
    assert_eq!(
      picker.click_outside(),
      CommitOutcome::Dismissed
    );
    picker.sync_value(date(2021, 3, 3));
    picker.activate(date(2022, 8, 2));
    assert_eq!(
      picker.cursor(),
      Some(PanelCursor::new(2021, 3))
    );
  }

  #[test]
  fn reopening_prefers_valid_buffer() {
    let mut picker = picker();
    picker.type_text("10-05-2024");
    picker.activate(date(2022, 8, 2));
    assert_eq!(
      picker.cursor(),
      Some(PanelCursor::new(2024, 5))
    );
  }

  #[test]
  fn dismissing_without_edit_does_not_commit(
  ) {
    let mut picker = picker();
    picker.activate(date(2022, 8, 2));
    assert_eq!(
      picker.click_outside(),
      CommitOutcome::Dismissed
    );
    assert!(!picker.is_open());
    assert_eq!(
      picker.click_outside(),
      CommitOutcome::Ignored
    );
  }

  #[test]
  fn commit_leaves_buffer_until_host_answers(
  ) {
    let mut picker = picker();
    picker.activate(date(2022, 8, 2));
    picker.type_text("20-08-2022");
    assert_eq!(
      picker.confirm(),
      CommitOutcome::Committed(date(
        2022, 8, 20
      ))
    );
    assert_eq!(picker.text(), "20-08-2022");
    assert!(picker.is_dirty());
    assert!(!picker.has_pending_edit());
    assert_eq!(
      picker.click_outside(),
      CommitOutcome::Ignored
    );
  }

  #[test]
  fn host_keeping_its_value_resyncs_buffer(
  ) {
    let mut picker = picker();
    picker.activate(date(2022, 8, 2));
    assert_eq!(
      picker.select_cell(date(2022, 8, 15)),
      Some(date(2022, 8, 15))
    );
    assert!(!picker.sync_value(date(
      2022, 8, 1
    )));
    assert_eq!(picker.text(), "01-08-2022");
    assert!(!picker.is_dirty());
    for _ in 0..3 {
      assert_eq!(
        picker.click_outside(),
        CommitOutcome::Ignored
      );
    }
  }

  #[test]
  fn selecting_current_value_clears_garbage(
  ) {
    let mut picker = picker();
    picker.activate(date(2022, 8, 2));
    picker.type_text("garbage");
    assert_eq!(
      picker.select_cell(date(2022, 8, 1)),
      Some(date(2022, 8, 1))
    );
    picker.sync_value(date(2022, 8, 1));
    assert_eq!(picker.text(), "01-08-2022");
  }

  #[test]
  fn typing_after_commit_is_a_new_edit() {
    let mut picker = picker();
    picker.type_text("20-08-2022");
    picker.confirm();
    picker.type_text("21-08-2022");
    assert!(picker.has_pending_edit());
    assert_eq!(
      picker.click_outside(),
      CommitOutcome::Committed(date(
        2022, 8, 21
      ))
    );
  }
}
