use ticklist_core::{
  Action,
  Labels,
  Rows
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub rows:      Rows,
  pub labels:    Labels,
  pub on_action: Callback<Action>
}

/// Rows are keyed by task id, so a row
/// whose props did not change is not
/// redrawn.
#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  html! {
      <ul id="todo-list">
          {
              for props.rows.iter().map(|row| html! {
                  <TaskRow
                      key={row.id.to_string()}
                      row={row.clone()}
                      labels={props.labels.clone()}
                      on_action={props.on_action.clone()}
                  />
              })
          }
      </ul>
  }
}
