mod app;
mod components;

const MOUNT_ID: &str = "app";

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  let Some(mount) = web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| {
      document.get_element_by_id(MOUNT_ID)
    })
  else {
    tracing::error!(
      mount = MOUNT_ID,
      "mount element missing; date \
       picker demo not started"
    );
    return;
  };

  tracing::info!(
    "starting date picker demo"
  );
  yew::Renderer::<app::App>::with_root(
    mount
  )
  .render();
}
