use chrono::NaiveDate;
use datepicker_core::{
  PanelNavigation,
  PanelView,
  WEEKDAY_LABELS
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::{
  CalendarNavActions,
  DateCellButton
};

#[derive(Properties, PartialEq)]
pub struct DatePickerPopupProps {
  pub panel:       PanelView,
  pub on_select:   Callback<NaiveDate>,
  pub on_navigate:
    Callback<PanelNavigation>
}

#[function_component(DatePickerPopup)]
pub fn date_picker_popup(
  props: &DatePickerPopupProps
) -> Html {
  html! {
      <div class="date-picker-popup" data-testid="date-picker-popup">
          <div class="date-picker-label" data-testid="date-picker-popup-label">
              { props.panel.label.clone() }
          </div>
          <CalendarNavActions on_navigate={props.on_navigate.clone()} />
          <div class="date-picker-panel">
              {
                  for WEEKDAY_LABELS.iter().map(|label| html! {
                      <div class="date-picker-weekday">{ *label }</div>
                  })
              }
              {
                  for props.panel.cells.iter().map(|cell| html! {
                      <DateCellButton
                          key={cell.date.to_string()}
                          cell={*cell}
                          on_select={props.on_select.clone()}
                      />
                  })
              }
          </div>
      </div>
  }
}
