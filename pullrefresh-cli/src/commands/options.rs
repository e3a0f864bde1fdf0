use std::collections::HashMap;

use anyhow::{bail, Result};
use pullrefresh_core::Options;
use serde::Serialize;

use crate::output::{print_single, OutputFormat};

#[derive(Serialize)]
struct Resolved {
    #[serde(flatten)]
    options: Options,
    template_url: String,
}

pub fn options(attributes: &[String], format: OutputFormat) -> Result<()> {
    let attrs = parse_attributes(attributes)?;
    let options = Options::from_attributes(&attrs)?;

    let resolved = Resolved {
        template_url: options.template_url().to_string(),
        options,
    };
    print_single(&resolved, format)
}

/// Parse `key=value` arguments
fn parse_attributes(args: &[String]) -> Result<HashMap<String, String>> {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((key, value)) => Ok((key.trim().to_string(), value.trim().to_string())),
            None => bail!("expected key=value, got {:?}", arg),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attributes() {
        let attrs = parse_attributes(&[
            "threshold=90".to_string(),
            "element = #feed".to_string(),
        ])
        .unwrap();

        assert_eq!(attrs["threshold"], "90");
        assert_eq!(attrs["element"], "#feed");
    }

    #[test]
    fn test_parse_attributes_rejects_bare_words() {
        assert!(parse_attributes(&["disabled".to_string()]).is_err());
    }
}
