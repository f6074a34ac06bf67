use chrono::{
  Local,
  NaiveDate
};
use datepicker_core::config::PickerConfig;
use datepicker_core::format_date;
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_state
};

use crate::components::DatePicker;

const PICKER_CONFIG_TOML: &str =
  include_str!("../datepicker.toml");

fn load_picker_config() -> PickerConfig
{
  match PickerConfig::from_toml_str(
    PICKER_CONFIG_TOML
  ) {
    | Ok(config) => config,
    | Err(error) => {
      tracing::error!(
        error = %format!("{error:#}"),
        "failed parsing date picker \
         config; using defaults"
      );
      PickerConfig::default()
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let config =
    use_state(load_picker_config);
  let value = {
    let config_snapshot =
      (*config).clone();
    use_state(move || {
      config_snapshot.initial_value(
        Local::now().date_naive()
      )
    })
  };
  let bounds = config.bounds();

  let on_change = {
    let value = value.clone();
    Callback::from(
      move |next: NaiveDate| {
        let previous = *value;
        tracing::info!(
          previous = %previous,
          next = %next,
          "host date value changed"
        );
        value.set(next);
      }
    )
  };

  html! {
      <div class="app">
          <DatePicker
              value={*value}
              {on_change}
              min={bounds.min}
              max={bounds.max}
          />
          <div class="app-value">
              { format!("Selected: {}", format_date(&*value)) }
          </div>
      </div>
  }
}
