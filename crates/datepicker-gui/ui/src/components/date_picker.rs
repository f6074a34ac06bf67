use chrono::{
  Local,
  NaiveDate
};
use datepicker_core::{
  CommitOutcome,
  DatePickerController,
  DateRange,
  PanelNavigation
};
use gloo::events::{
  EventListener,
  EventListenerOptions
};
use wasm_bindgen::JsCast;
use web_sys::{
  HtmlInputElement,
  Node
};
use yew::{
  Callback,
  FocusEvent,
  Html,
  InputEvent,
  KeyboardEvent,
  MouseEvent,
  Properties,
  TargetCast,
  classes,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref,
  use_node_ref
};

use super::DatePickerPopup;

#[derive(Properties, PartialEq)]
pub struct DatePickerProps {
  pub value:     NaiveDate,
  pub on_change: Callback<NaiveDate>,
  #[prop_or_default]
  pub min:       Option<NaiveDate>,
  #[prop_or_default]
  pub max:       Option<NaiveDate>
}

fn local_today() -> NaiveDate {
  Local::now().date_naive()
}

#[function_component(DatePicker)]
pub fn date_picker(
  props: &DatePickerProps
) -> Html {
  let bounds =
    DateRange::new(props.min, props.max);
  let controller = {
    let initial = props.value;
    use_mut_ref(move || {
      DatePickerController::new(
        initial, bounds
      )
    })
  };
  // Read by the document listener, which
  // outlives any single render.
  let latest_on_change = {
    let on_change =
      props.on_change.clone();
    use_mut_ref(move || on_change)
  };
  let force_update = use_force_update();
  let wrapper = use_node_ref();

  {
    let mut picker =
      controller.borrow_mut();
    picker.set_bounds(bounds);
    if picker.sync_value(props.value) {
      tracing::debug!(
        value = %props.value,
        "date picker resynced to host \
         value"
      );
    }
  }
  *latest_on_change.borrow_mut() =
    props.on_change.clone();

  {
    let controller = controller.clone();
    let latest_on_change =
      latest_on_change.clone();
    let force_update =
      force_update.clone();
    let wrapper = wrapper.clone();
    use_effect_with((), move |_| {
      let listener = web_sys::window()
        .and_then(|window| {
          window.document()
        })
        .map(|document| {
          // Capture phase: sees the
          // clicked node before handlers
          // inside the widget re-render.
          EventListener::new_with_options(
            &document,
            "click",
            EventListenerOptions::run_in_capture_phase(),
            move |event| {
              let inside = event
                .target()
                .and_then(|target| {
                  target
                    .dyn_into::<Node>()
                    .ok()
                })
                .zip(wrapper.get())
                .is_some_and(
                  |(target, root)| {
                    root.contains(Some(
                      &target
                    ))
                  }
                );
              if inside {
                return;
              }

              let outcome = controller
                .borrow_mut()
                .click_outside();
              if outcome
                == CommitOutcome::Ignored
              {
                return;
              }
              if let Some(date) =
                outcome.committed()
              {
                let on_change =
                  latest_on_change
                    .borrow()
                    .clone();
                on_change.emit(date);
              }
              force_update.force_update();
            }
          )
        });

      if listener.is_none() {
        tracing::warn!(
          "no document available; \
           outside clicks will not \
           commit the date picker"
        );
      }

      move || drop(listener)
    });
  }

  let activate = {
    let controller = controller.clone();
    let force_update =
      force_update.clone();
    move || {
      let opened = {
        let mut picker =
          controller.borrow_mut();
        let was_open = picker.is_open();
        picker.activate(local_today());
        !was_open
      };
      if opened {
        force_update.force_update();
      }
    }
  };

  let onclick = {
    let activate = activate.clone();
    Callback::from(move |_: MouseEvent| {
      activate()
    })
  };

  let onfocus =
    Callback::from(move |_: FocusEvent| {
      activate()
    });

  let oninput = {
    let controller = controller.clone();
    let force_update =
      force_update.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      controller
        .borrow_mut()
        .type_text(&input.value());
      force_update.force_update();
    })
  };

  let onkeydown = {
    let controller = controller.clone();
    let latest_on_change =
      latest_on_change.clone();
    let force_update =
      force_update.clone();
    Callback::from(
      move |e: KeyboardEvent| {
        if e.key() != "Enter" {
          return;
        }
        let outcome =
          controller.borrow_mut().confirm();
        if let Some(date) =
          outcome.committed()
        {
          let on_change =
            latest_on_change
              .borrow()
              .clone();
          on_change.emit(date);
        }
        force_update.force_update();
      }
    )
  };

  let on_select = {
    let controller = controller.clone();
    let latest_on_change =
      latest_on_change.clone();
    let force_update =
      force_update.clone();
    Callback::from(
      move |date: NaiveDate| {
        let selected = controller
          .borrow_mut()
          .select_cell(date);
        let Some(date) = selected else {
          return;
        };
        let on_change = latest_on_change
          .borrow()
          .clone();
        on_change.emit(date);
        force_update.force_update();
      }
    )
  };

  let on_navigate = {
    let controller = controller.clone();
    let force_update =
      force_update.clone();
    Callback::from(
      move |step: PanelNavigation| {
        controller
          .borrow_mut()
          .navigate(step);
        force_update.force_update();
      }
    )
  };

  let (text, invalid, panel) = {
    let picker = controller.borrow();
    (
      picker.text().to_string(),
      picker.is_invalid(),
      picker.panel()
    )
  };

  html! {
      <div ref={wrapper} class="date-picker">
          <input
              type="text"
              data-testid="date-picker-input"
              class={classes!("date-picker-input", invalid.then_some("invalid"))}
              value={text}
              {onclick}
              {onfocus}
              {oninput}
              {onkeydown}
          />
          {
              if let Some(panel) = panel {
                  html! {
                      <DatePickerPopup
                          {panel}
                          {on_select}
                          {on_navigate}
                      />
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
