use chrono::NaiveDate;
use datepicker_core::PanelCell;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct DateCellButtonProps {
  pub cell:      PanelCell,
  pub on_select: Callback<NaiveDate>
}

#[function_component(DateCellButton)]
pub fn date_cell_button(
  props: &DateCellButtonProps
) -> Html {
  let cell = props.cell;
  let onclick = {
    let on_select =
      props.on_select.clone();
    Callback::from(move |_: MouseEvent| {
      if !cell.disabled {
        on_select.emit(cell.date);
      }
    })
  };

  html! {
      <button
          type="button"
          data-testid="date-picker-popup-cell"
          class={classes!(
              "date-picker-cell",
              cell.selected.then_some("selected"),
              cell.today.then_some("today"),
              cell.not_current.then_some("not-current"),
              cell.disabled.then_some("disabled")
          )}
          disabled={cell.disabled}
          {onclick}
      >
          { cell.day.to_string() }
      </button>
  }
}
