use ticklist_core::{
  KeyValueStore,
  MemoryStore,
  StorageError
};
use wasm_bindgen::JsValue;

/// `localStorage` for the page origin,
/// or an in-memory map when the browser
/// refuses access.
#[derive(Debug)]
pub enum BrowserStore {
  Local(web_sys::Storage),
  Memory(MemoryStore)
}

impl BrowserStore {
  pub fn open() -> Self {
    let storage = web_sys::window()
      .and_then(|window| {
        window
          .local_storage()
          .ok()
          .flatten()
      });

    match storage {
      | Some(storage) => {
        Self::Local(storage)
      }
      | None => {
        tracing::error!(
          "local storage unavailable; \
           tasks will not survive a \
           reload"
        );
        Self::Memory(MemoryStore::new())
      }
    }
  }
}

impl KeyValueStore for BrowserStore {
  fn get(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    match self {
      | Self::Local(storage) => storage
        .get_item(key)
        .map_err(|err| {
          StorageError::Read {
            key:    key.to_string(),
            reason: js_reason(&err)
          }
        }),
      | Self::Memory(store) => {
        store.get(key)
      }
    }
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    match self {
      | Self::Local(storage) => storage
        .set_item(key, value)
        .map_err(|err| {
          StorageError::Write {
            key:    key.to_string(),
            reason: js_reason(&err)
          }
        }),
      | Self::Memory(store) => {
        store.set(key, value)
      }
    }
  }
}

fn js_reason(err: &JsValue) -> String {
  err
    .as_string()
    .unwrap_or_else(|| format!("{err:?}"))
}
