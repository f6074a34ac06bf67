use datepicker_core::PanelNavigation;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct CalendarNavActionsProps {
  pub on_navigate:
    Callback<PanelNavigation>
}

#[function_component(CalendarNavActions)]
pub fn calendar_nav_actions(
  props: &CalendarNavActionsProps
) -> Html {
  html! {
      <div class="actions calendar-nav-actions">
          {
              for PanelNavigation::ALL.into_iter().map(|step| {
                  let on_navigate = props.on_navigate.clone();
                  html! {
                      <button
                          type="button"
                          class="btn"
                          onclick={Callback::from(move |_: MouseEvent| on_navigate.emit(step))}
                      >
                          { step.label() }
                      </button>
                  }
              })
          }
      </div>
  }
}
