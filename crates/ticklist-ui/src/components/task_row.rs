use ticklist_core::{
  Action,
  Labels,
  RowView
};
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Event,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html,
  use_effect_with,
  use_node_ref
};

#[derive(Properties, PartialEq)]
pub struct TaskRowProps {
  pub row:       RowView,
  pub labels:    Labels,
  pub on_action: Callback<Action>
}

fn emit_on_click(
  on_action: &Callback<Action>,
  action: Action
) -> Callback<MouseEvent> {
  let on_action = on_action.clone();
  Callback::from(move |_| {
    on_action.emit(action.clone())
  })
}

#[function_component(TaskRow)]
pub fn task_row(
  props: &TaskRowProps
) -> Html {
  let id = props.row.id;
  let editing = props.row.is_editing();
  let edit_ref = use_node_ref();

  {
    let edit_ref = edit_ref.clone();
    use_effect_with(
      editing,
      move |editing| {
        if *editing
          && let Some(input) = edit_ref
            .cast::<HtmlInputElement>()
          && let Err(err) = input.focus()
        {
          tracing::debug!(
            ?err,
            "could not focus edit input"
          );
        }
        || ()
      }
    );
  }

  if editing {
    let on_save = {
      let on_action =
        props.on_action.clone();
      let edit_ref = edit_ref.clone();
      Callback::from(
        move |_: MouseEvent| {
          let text = edit_ref
            .cast::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default();
          on_action.emit(
            Action::SaveEdit { id, text }
          );
        }
      )
    };

    return html! {
        <li class="todo-item editing">
            <input
                type="checkbox"
                class="checkbox"
                checked={props.row.completed}
                disabled={true}
            />
            <input
                type="text"
                class="edit-input"
                ref={edit_ref}
                value={props.row.text.clone()}
            />
            <div class="edit-buttons">
                <button type="button" onclick={on_save}>
                    { &props.labels.save }
                </button>
                <button
                    type="button"
                    onclick={emit_on_click(&props.on_action, Action::CancelEdit(id))}
                >
                    { &props.labels.cancel }
                </button>
            </div>
        </li>
    };
  }

  let on_toggle = {
    let on_action =
      props.on_action.clone();
    Callback::from(move |_: Event| {
      on_action.emit(
        Action::ToggleCompleted(id)
      )
    })
  };

  html! {
      <li class="todo-item">
          <input
              type="checkbox"
              class="checkbox"
              checked={props.row.completed}
              onchange={on_toggle}
          />
          <span class={classes!("todo-text", props.row.completed.then_some("completed"))}>
              { &props.row.text }
          </span>
          <div class="edit-buttons">
              <button
                  type="button"
                  onclick={emit_on_click(&props.on_action, Action::BeginEdit(id))}
              >
                  { &props.labels.edit }
              </button>
              <button
                  type="button"
                  onclick={emit_on_click(&props.on_action, Action::Delete(id))}
              >
                  { &props.labels.delete }
              </button>
          </div>
      </li>
  }
}
