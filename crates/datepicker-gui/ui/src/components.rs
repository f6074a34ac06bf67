mod calendar_nav_actions;
mod date_cell;
mod date_picker;
mod date_picker_popup;

pub use calendar_nav_actions::CalendarNavActions;
pub use date_cell::DateCellButton;
pub use date_picker::DatePicker;
pub use date_picker_popup::DatePickerPopup;
