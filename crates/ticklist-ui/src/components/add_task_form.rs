use gloo::timers::callback::Timeout;
use ticklist_core::{
  Action,
  Labels
};
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  MouseEvent,
  NodeRef,
  Properties,
  SubmitEvent,
  classes,
  function_component,
  html,
  use_effect_with,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct AddTaskFormProps {
  pub visible:             bool,
  pub labels:              Labels,
  pub transition_delay_ms: u32,
  pub input_ref:           NodeRef,
  pub on_action:           Callback<Action>
}

#[function_component(AddTaskForm)]
pub fn add_task_form(
  props: &AddTaskFormProps
) -> Html {
  let visible = props.visible;
  // Trails `visible` by the transition
  // delay so the class flips after the
  // display change has been painted.
  let settled = use_state(|| visible);

  {
    let settled = settled.clone();
    let delay = props.transition_delay_ms;
    use_effect_with(
      visible,
      move |visible| {
        let visible = *visible;
        Timeout::new(delay, move || {
          settled.set(visible);
        })
        .forget();
        || ()
      }
    );
  }

  {
    let input_ref = props.input_ref.clone();
    use_effect_with(
      visible,
      move |visible| {
        if *visible
          && let Some(input) = input_ref
            .cast::<HtmlInputElement>()
          && let Err(err) = input.focus()
        {
          tracing::debug!(
            ?err,
            "could not focus add input"
          );
        }
        || ()
      }
    );
  }

  let on_toggle = {
    let on_action =
      props.on_action.clone();
    Callback::from(move |_: MouseEvent| {
      on_action.emit(Action::ToggleForm)
    })
  };

  let on_submit = {
    let on_action =
      props.on_action.clone();
    let input_ref = props.input_ref.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        let text = input_ref
          .cast::<HtmlInputElement>()
          .map(|input| input.value())
          .unwrap_or_default();
        on_action
          .emit(Action::Submit(text));
      }
    )
  };

  let trigger_style = if visible {
    "display:none;"
  } else {
    "display:block;"
  };
  let form_style = if visible {
    "display:flex;"
  } else {
    "display:none;"
  };

  html! {
      <section class="add-task">
          <button
              id="add-todo-btn"
              type="button"
              class={classes!((*settled).then_some("hidden"))}
              style={trigger_style}
              onclick={on_toggle.clone()}
          >
              { &props.labels.add }
          </button>
          <div
              id="todo-form-container"
              class={classes!((!*settled).then_some("hidden"))}
              style={form_style}
          >
              <form id="todo-form" onsubmit={on_submit}>
                  <input
                      id="add-todo-input"
                      type="text"
                      ref={props.input_ref.clone()}
                      placeholder={props.labels.placeholder.clone()}
                  />
                  <button type="submit">{ &props.labels.submit }</button>
                  <button
                      id="cancel-add-todo-btn"
                      type="button"
                      onclick={on_toggle}
                  >
                      { &props.labels.cancel }
                  </button>
              </form>
          </div>
      </section>
  }
}
