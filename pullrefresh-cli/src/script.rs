//! Gesture script format
//!
//! ```toml
//! supports = ["touchstart", "touchmove", "touchend"]
//! loader_height = 40
//!
//! [options]
//! threshold = "70"
//!
//! [refresh]
//! mode = "after"
//! after_ms = 500
//!
//! [[steps]]
//! at_ms = 0
//! action = "start"
//! y = 0
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Host attributes, as `Options::from_attributes` takes them
    #[serde(default)]
    pub options: HashMap<String, String>,
    /// Event names the simulated environment supports
    #[serde(default = "default_supports")]
    pub supports: Vec<String>,
    /// Rendered loader height, used when no content offset is configured
    #[serde(default)]
    pub loader_height: f64,
    #[serde(default)]
    pub refresh: RefreshPlan,
    pub steps: Vec<Step>,
}

fn default_supports() -> Vec<String> {
    vec![
        "touchstart".to_string(),
        "touchmove".to_string(),
        "touchend".to_string(),
    ]
}

/// How the simulated refresh callback behaves
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum RefreshPlan {
    /// No callback configured
    #[default]
    None,
    /// Callback returns without pending work
    Done,
    /// Callback returns work settling after `after_ms`
    After {
        after_ms: u64,
        #[serde(default)]
        fail: bool,
    },
    /// Callback fails before returning
    FailSync { message: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    /// Offset from the start of the replay
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action {
    Start { y: f64 },
    Move { y: f64 },
    End,
    TransitionEnd,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let script = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&contents)?,
            _ => Self::from_toml(&contents)?,
        };
        script.validate()?;

        Ok(script)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid TOML script")
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("invalid JSON script")
    }

    /// Steps must be in time order
    pub fn validate(&self) -> Result<()> {
        if let Some(pair) = self.steps.windows(2).find(|w| w[1].at_ms < w[0].at_ms) {
            bail!(
                "step at {} ms comes after step at {} ms",
                pair[1].at_ms,
                pair[0].at_ms
            );
        }
        Ok(())
    }

    pub fn duration_ms(&self) -> u64 {
        self.steps.last().map(|s| s.at_ms).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PULL: &str = r#"
supports = ["pointerdown", "pointermove", "pointerup"]

[options]
threshold = "70"
content-offset = "40"

[refresh]
mode = "after"
after_ms = 500

[[steps]]
at_ms = 0
action = "start"
y = 0

[[steps]]
at_ms = 50
action = "move"
y = 100.0

[[steps]]
at_ms = 100
action = "end"
"#;

    #[test]
    fn test_parse_toml_script() {
        let script = Script::from_toml(PULL).unwrap();
        assert_eq!(script.supports.len(), 3);
        assert_eq!(script.options.get("content-offset").unwrap(), "40");
        assert_eq!(
            script.refresh,
            RefreshPlan::After {
                after_ms: 500,
                fail: false
            }
        );
        assert_eq!(script.steps[0].action, Action::Start { y: 0.0 });
        assert_eq!(script.steps[2].action, Action::End);
        assert_eq!(script.duration_ms(), 100);
        script.validate().unwrap();
    }

    #[test]
    fn test_parse_json_script_with_defaults() {
        let script = Script::from_json(
            r#"{"steps": [{"at_ms": 0, "action": "transition-end"}]}"#,
        )
        .unwrap();
        assert_eq!(script.refresh, RefreshPlan::None);
        assert_eq!(script.supports, default_supports());
        assert_eq!(script.steps[0].action, Action::TransitionEnd);
    }

    #[test]
    fn test_out_of_order_steps_are_rejected() {
        let script = Script::from_json(
            r#"{"steps": [{"at_ms": 10, "action": "end"}, {"at_ms": 5, "action": "end"}]}"#,
        )
        .unwrap();
        assert!(script.validate().is_err());
    }
}
