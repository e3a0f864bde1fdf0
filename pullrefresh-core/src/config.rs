//! Pull-refresh configuration and host attributes

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Loader template used when no override is configured
pub const DEFAULT_TEMPLATE: &str = "template/pullrefresh/pullrefresh.html";

/// Gesture configuration, fixed once the instance is activated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Loader offset in px. `None` means "measure the loader element".
    pub content_offset: Option<f64>,
    /// Raw drag distance (px) that arms the refresh
    pub threshold: f64,
    /// Divisor applied to the raw drag distance
    pub resistance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_offset: None,
            threshold: 70.0,
            resistance: 2.5,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "threshold must be a non-negative number, got {}",
                self.threshold
            )));
        }

        if !self.resistance.is_finite() || self.resistance <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "resistance must be greater than zero, got {}",
                self.resistance
            )));
        }

        if let Some(offset) = self.content_offset {
            if !offset.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "content offset must be finite, got {}",
                    offset
                )));
            }
        }

        Ok(())
    }
}

/// Everything the host binds onto a pull-refresh instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    #[serde(flatten)]
    pub config: Config,
    /// Keep the loader pinned above the fold while the content moves
    pub hide_loader: bool,
    /// Selector of the element receiving the `ptr-*` classes (body if unset)
    pub root_selector: Option<String>,
    /// Loader template override
    pub template: Option<String>,
    /// Checked once at activation; a disabled instance attaches nothing
    pub disabled: bool,
}

impl Options {
    /// Build options from string attributes as a host template would pass them.
    ///
    /// Recognised keys: `threshold`, `resistance`, `content-offset`,
    /// `hide-loader`, `element`, `template`, `disabled`. Empty values fall
    /// back to the defaults. `disabled` only switches on for the literal `"true"`.
    pub fn from_attributes(attrs: &HashMap<String, String>) -> Result<Self> {
        let defaults = Config::default();

        let config = Config {
            content_offset: parse_number(attrs, "content-offset")?,
            threshold: parse_number(attrs, "threshold")?.unwrap_or(defaults.threshold),
            resistance: parse_number(attrs, "resistance")?.unwrap_or(defaults.resistance),
        };
        config.validate()?;

        Ok(Self {
            config,
            hide_loader: parse_flag(attrs, "hide-loader")?,
            root_selector: attr(attrs, "element").map(str::to_string),
            template: attr(attrs, "template").map(str::to_string),
            disabled: attr(attrs, "disabled") == Some("true"),
        })
    }

    /// Loader template path, honouring the override
    pub fn template_url(&self) -> &str {
        self.template.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }
}

/// Resolve the pull-refresh root: the first element matching `selector`,
/// or `fallback` (the document body) when there is no selector or no match.
pub fn resolve_root<R>(
    selector: Option<&str>,
    query_first: impl FnOnce(&str) -> Option<R>,
    fallback: impl FnOnce() -> R,
) -> R {
    selector
        .filter(|s| !s.trim().is_empty())
        .and_then(query_first)
        .unwrap_or_else(fallback)
}

fn attr<'a>(attrs: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    attrs
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn parse_number(attrs: &HashMap<String, String>, name: &str) -> Result<Option<f64>> {
    attr(attrs, name)
        .map(|value| {
            value.parse::<f64>().map_err(|_| Error::InvalidAttribute {
                name: name.to_string(),
                value: value.to_string(),
            })
        })
        .transpose()
}

fn parse_flag(attrs: &HashMap<String, String>, name: &str) -> Result<bool> {
    match attr(attrs, name) {
        None | Some("false") => Ok(false),
        Some("true") => Ok(true),
        Some(other) => Err(Error::InvalidAttribute {
            name: name.to_string(),
            value: other.to_string(),
        }),
    }
}
