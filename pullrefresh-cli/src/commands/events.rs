use anyhow::Result;
use pullrefresh_core::{CapabilityProbe, EventCategory};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_output, OutputFormat};
use crate::recorder::ListProbe;

#[derive(Tabled, Serialize)]
struct BindingRow {
    category: String,
    event: String,
    /// Nothing matched, the last candidate is bound anyway
    fallback: bool,
}

pub fn events(supports: &[String], format: OutputFormat) -> Result<()> {
    let probe = ListProbe(supports.to_vec());
    print_output(bindings(&probe), format)
}

fn bindings(probe: &ListProbe) -> Vec<BindingRow> {
    EventCategory::ALL
        .iter()
        .map(|category| {
            let event = category.event_name(probe);
            BindingRow {
                category: format!("{:?}", category).to_lowercase(),
                event: event.to_string(),
                fallback: !probe.supports(event),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_mark_fallbacks() {
        let probe = ListProbe(vec!["touchstart".to_string(), "touchmove".to_string()]);
        let rows = bindings(&probe);

        assert_eq!(rows[0].event, "touchstart");
        assert!(!rows[0].fallback);
        assert_eq!(rows[1].event, "touchmove");
        assert_eq!(rows[2].category, "end");
        assert_eq!(rows[2].event, "pointercancel");
        assert!(rows[2].fallback);
    }
}
