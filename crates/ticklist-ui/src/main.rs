mod app;
mod components;
mod storage;

use app::App;

const MOUNT_ID: &str = "app";

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  match gloo::utils::document()
    .get_element_by_id(MOUNT_ID)
  {
    | Some(root) => {
      tracing::info!(
        mount = MOUNT_ID,
        "mounting ticklist"
      );
      yew::Renderer::<App>::with_root(
        root
      )
      .render();
    }
    | None => {
      tracing::warn!(
        mount = MOUNT_ID,
        "mount element missing; \
         rendering into body"
      );
      yew::Renderer::<App>::new()
        .render();
    }
  }
}
