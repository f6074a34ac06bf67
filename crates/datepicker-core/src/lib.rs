//! Core of the date picker widget: month
//! grid arithmetic, `DD-MM-YYYY` text
//! handling, bounds, and the interaction
//! state machine that reconciles typing,
//! panel navigation and commits.
//!
//! Nothing here touches the DOM; the Yew
//! front end forwards events to
//! [`controller::DatePickerController`]
//! and renders [`panel::PanelView`].

pub mod calendar;
pub mod config;
pub mod controller;
pub mod datetime;
pub mod logging;
pub mod panel;
pub mod range;

pub use calendar::{
  CellMonth,
  DateCell,
  MonthGrid,
  PanelCursor,
  WEEKDAY_LABELS
};
pub use controller::{
  CommitOutcome,
  DatePickerController,
  PanelNavigation,
  PickerState
};
pub use datetime::{
  DateTextError,
  format_date,
  is_same_day,
  parse_date
};
pub use panel::{
  PanelCell,
  PanelView
};
pub use range::{
  DateRange,
  is_in_range
};
