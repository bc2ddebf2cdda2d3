use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info};

pub const DEFAULT_STORAGE_KEY: &str = "todos";
pub const DEFAULT_TRANSITION_DELAY_MS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub storage_key:         String,
  pub transition_delay_ms: u32,
  pub labels:              Labels
}

impl Default for Config {
  fn default() -> Self {
    Self {
      storage_key:         DEFAULT_STORAGE_KEY
        .to_string(),
      transition_delay_ms:
        DEFAULT_TRANSITION_DELAY_MS,
      labels:              Labels::default()
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Labels {
  pub add:            String,
  pub submit:         String,
  pub cancel:         String,
  pub edit:           String,
  pub delete:         String,
  pub save:           String,
  pub placeholder:    String,
  pub blank_text:     String,
  pub save_failed:    String,
  pub discarded_data: String
}

impl Default for Labels {
  fn default() -> Self {
    Self {
      add:            "Add task"
        .to_string(),
      submit:         "Add".to_string(),
      cancel:         "Cancel"
        .to_string(),
      edit:           "Edit".to_string(),
      delete:         "Delete"
        .to_string(),
      save:           "Save".to_string(),
      placeholder:    "What needs doing?"
        .to_string(),
      blank_text:     "Task text cannot \
                       be empty."
        .to_string(),
      save_failed:    "Could not save \
                       your tasks."
        .to_string(),
      discarded_data: "Saved tasks could \
                       not be read and \
                       were reset."
        .to_string()
    }
  }
}

impl Config {
  #[tracing::instrument(skip(text))]
  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    let cfg: Config =
      toml::from_str(text).context(
        "failed to parse ticklist \
         config"
      )?;
    cfg.validate()?;
    debug!(?cfg, "parsed config");
    info!(
      storage_key = %cfg.storage_key,
      "loaded config"
    );
    Ok(cfg)
  }

  fn validate(
    &self
  ) -> anyhow::Result<()> {
    if self.storage_key.trim().is_empty()
    {
      anyhow::bail!(
        "storage_key cannot be empty"
      );
    }
    Ok(())
  }
}
