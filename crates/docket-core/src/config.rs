use anyhow::Context;
use serde::Deserialize;
use tracing::{
  debug,
  warn
};

pub const DEFAULT_BACKEND_URL: &str =
  "http://localhost:3000";

fn default_title_limit() -> usize {
  15
}

fn default_description_limit() -> usize
{
  30
}

fn default_warn_below() -> usize {
  5
}

fn default_empty_description() -> String
{
  "No description given".to_string()
}

fn default_year_window() -> u32 {
  12
}

fn default_years_back() -> u32 {
  6
}

fn default_dismiss_ms() -> u32 {
  4_000
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct ClientConfig {
  pub backend_url: String,
  pub limits:      Limits,
  pub tasks:       TaskDefaults,
  pub picker:      PickerConfig,
  pub toasts:      ToastConfig
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct Limits {
  pub title:       usize,
  pub description: usize,
  pub warn_below:  usize
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct TaskDefaults {
  pub empty_description: String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct PickerConfig {
  pub year_window: u32,
  pub years_back:  u32
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct ToastConfig {
  pub dismiss_ms: u32
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      backend_url: DEFAULT_BACKEND_URL
        .to_string(),
      limits:      Limits::default(),
      tasks:       TaskDefaults::default(),
      picker:      PickerConfig::default(),
      toasts:      ToastConfig::default()
    }
  }
}

impl Default for Limits {
  fn default() -> Self {
    Self {
      title:       default_title_limit(),
      description:
        default_description_limit(),
      warn_below:  default_warn_below()
    }
  }
}

impl Default for TaskDefaults {
  fn default() -> Self {
    Self {
      empty_description:
        default_empty_description()
    }
  }
}

impl Default for PickerConfig {
  fn default() -> Self {
    Self {
      year_window: default_year_window(),
      years_back:  default_years_back()
    }
  }
}

impl Default for ToastConfig {
  fn default() -> Self {
    Self {
      dismiss_ms: default_dismiss_ms()
    }
  }
}

impl ClientConfig {
  #[tracing::instrument(skip_all)]
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<ClientConfig>(raw)
        .context(
          "failed to parse client config"
        )?;
    config.sanitize();
    debug!(
      backend_url = %config.backend_url,
      title_limit = config.limits.title,
      description_limit = config.limits.description,
      "loaded client config"
    );
    Ok(config)
  }

  pub fn with_backend_url(
    mut self,
    url: &str
  ) -> Self {
    self.backend_url = url.to_string();
    self.sanitize();
    self
  }

  /// Puts zeroed or blank values back to their defaults.
  pub fn sanitize(&mut self) {
    let url = self
      .backend_url
      .trim()
      .trim_end_matches('/')
      .to_string();
    if url.is_empty() {
      warn!(
        "empty backend_url; using \
         default"
      );
      self.backend_url =
        DEFAULT_BACKEND_URL.to_string();
    } else {
      self.backend_url = url;
    }

    if self.limits.title == 0 {
      warn!("title limit was 0; using default");
      self.limits.title =
        default_title_limit();
    }
    if self.limits.description == 0 {
      warn!("description limit was 0; using default");
      self.limits.description =
        default_description_limit();
    }
    if self
      .tasks
      .empty_description
      .trim()
      .is_empty()
    {
      self.tasks.empty_description =
        default_empty_description();
    }
    if self.picker.year_window == 0 {
      warn!("picker year_window was 0; using default");
      self.picker.year_window =
        default_year_window();
    }
    if self.toasts.dismiss_ms == 0 {
      self.toasts.dismiss_ms =
        default_dismiss_ms();
    }
  }
}
