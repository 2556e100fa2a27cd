//! Reader for the INI-like configuration text
//!
//! ```text
//! ; comment
//! [loggers]
//! root = INFO, console
//!
//! [console]
//! type = console
//! stream = stderr
//! format = [$level] $msg
//! ```
//!
//! Keys before the first header land in the anonymous section `""`. A key
//! repeated within a section keeps its last value.

use crate::core::{LoggerError, Options, Result};
use std::collections::BTreeMap;

pub(crate) fn parse(text: &str) -> Result<BTreeMap<String, Options>> {
    let mut sections: BTreeMap<String, Options> = BTreeMap::new();
    let mut current = String::new();

    for (idx, raw) in text.trim_start_matches('\u{feff}').lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or_else(|| LoggerError::config_parse(line_no, "unterminated section header"))?;
            current = name.trim().to_string();
            sections.entry(current.clone()).or_default();
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| {
            LoggerError::config_parse(line_no, format!("expected 'key = value', found '{}'", line))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(LoggerError::config_parse(line_no, "empty key"));
        }
        sections
            .entry(current.clone())
            .or_default()
            .insert(key.to_string(), value.trim().to_string());
    }

    Ok(sections)
}
