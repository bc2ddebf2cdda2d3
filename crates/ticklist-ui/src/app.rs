use gloo::events::EventListener;
use ticklist_core::{
  Action,
  AppError,
  Config,
  Dispatch,
  Labels,
  Outcome,
  Rejection,
  Rows,
  TodoApp
};
use web_sys::HtmlInputElement;
use yew::{
  Html,
  NodeRef,
  classes,
  function_component,
  html,
  use_callback,
  use_effect_with,
  use_force_update,
  use_memo,
  use_mut_ref,
  use_node_ref
};

use crate::components::{
  AddTaskForm,
  TaskList
};
use crate::storage::BrowserStore;

const CONFIG_TOML: &str =
  include_str!("../ticklist.toml");

#[derive(Clone, PartialEq)]
enum Notice {
  Warning(String),
  Error(String)
}

struct Session {
  app:          TodoApp<BrowserStore>,
  rows:         Rows,
  form_visible: bool,
  notice:       Option<Notice>
}

impl Session {
  fn open(config: &Config) -> Self {
    let app = TodoApp::open(
      BrowserStore::open(),
      config
    );
    let notice = app.discarded().map(
      |_| {
        Notice::Warning(
          config
            .labels
            .discarded_data
            .clone()
        )
      }
    );
    let rows = app.rows();
    let form_visible = app
      .form_visibility()
      .is_visible();

    Self {
      app,
      rows,
      form_visible,
      notice
    }
  }

  fn handle(
    &mut self,
    action: Action,
    labels: &Labels
  ) -> Option<Dispatch> {
    match self.app.dispatch(action) {
      | Ok(dispatch) => {
        self.app.refresh(
          &mut self.rows,
          dispatch.render
        );
        if let Some(form) = dispatch.form
        {
          self.form_visible =
            form.show_form;
        }
        self.notice =
          match dispatch.outcome {
            | Outcome::Applied => None,
            | Outcome::Rejected(
              Rejection::BlankText
            ) => Some(Notice::Warning(
              labels.blank_text.clone()
            ))
          };
        Some(dispatch)
      }
      | Err(AppError::Storage(error)) => {
        tracing::error!(
          %error,
          "task change was not saved"
        );
        self.notice =
          Some(Notice::Error(format!(
            "{} ({error})",
            labels.save_failed
          )));
        None
      }
      | Err(
        error @ AppError::UnknownTask(_)
      ) => {
        tracing::warn!(
          %error,
          "dropping action for a row \
           that no longer exists"
        );
        self.rows = self.app.rows();
        None
      }
    }
  }
}

fn load_config() -> Config {
  match Config::from_toml_str(
    CONFIG_TOML
  ) {
    | Ok(config) => config,
    | Err(error) => {
      tracing::error!(
        error = %format!("{error:#}"),
        "invalid embedded config; \
         using defaults"
      );
      Config::default()
    }
  }
}

fn clear_input(input_ref: &NodeRef) {
  if let Some(input) = input_ref
    .cast::<HtmlInputElement>()
  {
    input.set_value("");
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let config =
    use_memo((), |_| load_config());
  let session = {
    let config_snapshot =
      (*config).clone();
    use_mut_ref(move || {
      Session::open(&config_snapshot)
    })
  };
  let trigger = use_force_update();
  let input_ref = use_node_ref();

  {
    let session = session.clone();
    use_effect_with((), move |_| {
      let listener =
        web_sys::window().map(|window| {
          EventListener::new(
            &window,
            "pagehide",
            move |_| {
              if let Err(error) = session
                .borrow_mut()
                .app
                .flush()
              {
                tracing::error!(
                  %error,
                  "failed flushing tasks \
                   on page hide"
                );
              }
            }
          )
        });
      tracing::debug!(
        "ticklist mounted"
      );
      move || drop(listener)
    });
  }

  let on_action = {
    let session = session.clone();
    let trigger = trigger.clone();
    let input_ref = input_ref.clone();
    let labels = config.labels.clone();
    use_callback(
      (),
      move |action: Action, _| {
        let dispatch = session
          .borrow_mut()
          .handle(action, &labels);
        if dispatch
          .is_some_and(|d| d.clear_input)
        {
          clear_input(&input_ref);
        }
        trigger.force_update();
      }
    )
  };

  let state = session.borrow();
  let notice = match &state.notice {
    | Some(Notice::Warning(text)) => {
      html! {
          <div class="notice" role="status">{ text }</div>
      }
    }
    | Some(Notice::Error(text)) => {
      html! {
          <div class={classes!("notice", "error")} role="alert">{ text }</div>
      }
    }
    | None => html! {}
  };

  html! {
      <main class="todo-app">
          { notice }
          <AddTaskForm
              visible={state.form_visible}
              labels={config.labels.clone()}
              transition_delay_ms={config.transition_delay_ms}
              input_ref={input_ref.clone()}
              on_action={on_action.clone()}
          />
          <TaskList
              rows={state.rows.clone()}
              labels={config.labels.clone()}
              on_action={on_action}
          />
      </main>
  }
}

#[cfg(test)]
mod app_tests {
  use super::*;

  #[test]
  fn embedded_config_parses() {
    let config =
      Config::from_toml_str(CONFIG_TOML)
        .expect("embedded config");
    assert_eq!(
      config.storage_key,
      "todos"
    );
    assert_eq!(
      config.transition_delay_ms,
      10
    );
    assert_eq!(
      config.labels.blank_text,
      Labels::default().blank_text
    );
  }
}
