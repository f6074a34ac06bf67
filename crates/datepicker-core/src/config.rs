use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{
  info,
  warn
};

use crate::datetime::parse_date;
use crate::range::DateRange;

const INITIAL_TODAY: &str = "today";
const SUPPORTED_VERSION: u32 = 1;

fn config_default_version() -> u32 {
  SUPPORTED_VERSION
}

fn config_default_initial() -> String {
  INITIAL_TODAY.to_string()
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Deserialize,
)]
pub struct PickerConfig {
  #[serde(
    default = "config_default_version"
  )]
  pub version: u32,
  #[serde(default)]
  pub bounds:  BoundsConfig,
  #[serde(default)]
  pub initial: InitialConfig
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Deserialize,
)]
pub struct BoundsConfig {
  pub min: Option<String>,
  pub max: Option<String>
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Deserialize,
)]
pub struct InitialConfig {
  #[serde(
    default = "config_default_initial"
  )]
  pub value: String
}

impl Default for InitialConfig {
  fn default() -> Self {
    Self {
      value: config_default_initial()
    }
  }
}

impl Default for PickerConfig {
  fn default() -> Self {
    Self {
      version: config_default_version(),
      bounds:  BoundsConfig::default(),
      initial: InitialConfig::default()
    }
  }
}

impl PickerConfig {
  #[tracing::instrument(skip_all)]
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<PickerConfig>(raw)
        .context(
          "failed to parse date picker \
           config"
        )?;
    anyhow::ensure!(
      config.version == SUPPORTED_VERSION,
      "unsupported date picker config \
       version {} (expected {})",
      config.version,
      SUPPORTED_VERSION
    );
    config.sanitize();

    info!(
      version = config.version,
      min = ?config.bounds.min,
      max = ?config.bounds.max,
      initial = %config.initial.value,
      "loaded date picker config"
    );
    Ok(config)
  }

  fn sanitize(&mut self) {
    sanitize_bound(
      &mut self.bounds.min,
      "bounds.min"
    );
    sanitize_bound(
      &mut self.bounds.max,
      "bounds.max"
    );

    let initial = self
      .initial
      .value
      .trim()
      .to_string();
    if initial.is_empty()
      || (!initial
        .eq_ignore_ascii_case(
          INITIAL_TODAY
        )
        && parse_date(&initial).is_err())
    {
      warn!(
        initial = %self.initial.value,
        "invalid initial date; using \
         today"
      );
      self.initial.value =
        config_default_initial();
    } else {
      self.initial.value = initial;
    }

    // Left as-is: every date ends up
    // disabled.
    if self.bounds().is_inverted() {
      warn!(
        min = ?self.bounds.min,
        max = ?self.bounds.max,
        "date picker bounds are \
         inverted; no date will be \
         selectable"
      );
    }
  }

  pub fn bounds(&self) -> DateRange {
    let parse = |raw: &Option<String>| {
      raw
        .as_deref()
        .and_then(|text| {
          parse_date(text).ok()
        })
    };
    DateRange::new(
      parse(&self.bounds.min),
      parse(&self.bounds.max)
    )
  }

  pub fn initial_value(
    &self,
    today: NaiveDate
  ) -> NaiveDate {
    if self
      .initial
      .value
      .eq_ignore_ascii_case(INITIAL_TODAY)
    {
      return today;
    }
    parse_date(&self.initial.value)
      .unwrap_or(today)
  }
}

fn sanitize_bound(
  bound: &mut Option<String>,
  key: &str
) {
  let Some(raw) = bound.take() else {
    return;
  };
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return;
  }

  match parse_date(trimmed) {
    | Ok(_) => {
      *bound = Some(trimmed.to_string());
    }
    | Err(error) => {
      warn!(
        key,
        value = %raw,
        %error,
        "dropping invalid date picker \
         bound"
      );
    }
  }
}
