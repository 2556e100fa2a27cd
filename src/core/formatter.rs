//! Template formatting for log messages
//!
//! A template is literal text with `$name` variables; `$$` produces a
//! literal `$`. Known variables:
//!
//! - `level`: the message level, e.g. `WARN` or `LEVEL:450`
//! - `msg`: the message text
//! - `file`: base name of the source file of the log call
//! - `line`: line number of the log call
//! - `logger`: full name of the logger the call was made on
//! - `date`, `time`, `datetime`: the message timestamp (see [`BasicFormatter::with_date_var`])
//!
//! Unknown variables render as the empty string.

use super::error::{LoggerError, Result};
use super::message::Message;
use super::timestamp::{default_date_vars, TimestampFormat};

/// Converts a message into its text representation.
pub trait Formatter: Send + Sync {
    fn format(&self, msg: &Message) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplatePart {
    Literal(String),
    Var(String),
}

/// Formatter driven by a `$variable` template.
///
/// # Examples
///
/// ```
/// use rust_logger_hierarchy::core::{BasicFormatter, Formatter, LogLevel, Message};
///
/// let formatter = BasicFormatter::new("[$level] $msg").unwrap();
/// let msg = Message::new(LogLevel::WARN, "oh no".to_string(), "root".into());
/// assert_eq!(formatter.format(&msg), "[WARN] oh no");
/// ```
#[derive(Debug, Clone)]
pub struct BasicFormatter {
    template: Vec<TemplatePart>,
    date_vars: Vec<(String, TimestampFormat)>,
    colored_level: bool,
}

impl BasicFormatter {
    pub fn new(template: &str) -> Result<Self> {
        Ok(Self {
            template: parse_template(template)?,
            date_vars: default_date_vars(),
            colored_level: false,
        })
    }

    /// Define (or redefine) a date variable.
    #[must_use]
    pub fn with_date_var(mut self, name: impl Into<String>, format: TimestampFormat) -> Self {
        let name = name.into();
        match self.date_vars.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = format,
            None => self.date_vars.push((name, format)),
        }
        self
    }

    /// Render `$level` with terminal colours.
    #[cfg(feature = "color")]
    #[must_use]
    pub fn with_colored_level(mut self, enable: bool) -> Self {
        self.colored_level = enable;
        self
    }

    fn write_var(&self, out: &mut String, name: &str, msg: &Message) {
        if let Some((_, format)) = self.date_vars.iter().find(|(var, _)| var == name) {
            out.push_str(&format.format(&msg.timestamp));
            return;
        }
        match name {
            "level" => self.write_level(out, msg),
            "msg" => out.push_str(&msg.text),
            "file" => out.push_str(msg.file_name().unwrap_or_default()),
            "line" => {
                if let Some(line) = msg.line {
                    out.push_str(&line.to_string());
                }
            }
            "logger" => out.push_str(&msg.logger),
            _ => {}
        }
    }

    #[cfg(feature = "color")]
    fn write_level(&self, out: &mut String, msg: &Message) {
        if self.colored_level {
            use colored::Colorize;
            let level = msg.level.to_string();
            out.push_str(&level.color(msg.level.color_code()).to_string());
        } else {
            out.push_str(&msg.level.to_string());
        }
    }

    #[cfg(not(feature = "color"))]
    fn write_level(&self, out: &mut String, msg: &Message) {
        let _ = self.colored_level;
        out.push_str(&msg.level.to_string());
    }
}

impl Formatter for BasicFormatter {
    fn format(&self, msg: &Message) -> String {
        let mut out = String::with_capacity(msg.text.len() + 32);
        for part in &self.template {
            match part {
                TemplatePart::Literal(text) => out.push_str(text),
                TemplatePart::Var(name) => self.write_var(&mut out, name, msg),
            }
        }
        out
    }
}

fn parse_template(template: &str) -> Result<Vec<TemplatePart>> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c != '$' {
            literal.push(c);
            continue;
        }
        match chars.peek() {
            Some((_, '$')) => {
                chars.next();
                literal.push('$');
            }
            Some((start, next)) if next.is_ascii_alphabetic() => {
                let start = *start;
                let mut end = start;
                while let Some((idx, ch)) = chars.peek() {
                    if !ch.is_ascii_alphabetic() {
                        break;
                    }
                    end = idx + ch.len_utf8();
                    chars.next();
                }
                if !literal.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                }
                parts.push(TemplatePart::Var(template[start..end].to_string()));
            }
            _ => {
                return Err(LoggerError::invalid_template(
                    template,
                    "'$' must be followed by a variable name or '$'",
                ))
            }
        }
    }
    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(literal));
    }
    Ok(parts)
}
