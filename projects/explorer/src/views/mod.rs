//! Server-rendered HTML pages.
//!
//! Templates are compiled into the binary and filled in a single pass, so a
//! value that happens to contain `{{name}}` is never substituted again.

mod pages;

pub use pages::{commits_page, issues_page, repos_page};

use chrono::{DateTime, Utc};

const LAYOUT: &str = include_str!("../../templates/layout.html");

/// Wraps `content` in the shared page chrome. `title` and `heading` are
/// escaped here, `content` must already be HTML.
pub fn layout(title: &str, heading: &str, content: &str) -> String {
    let title = escape(title);
    let heading = escape(heading);
    fill(
        LAYOUT,
        &[
            ("title", title.as_str()),
            ("heading", heading.as_str()),
            ("content", content),
        ],
    )
}

/// Replaces every `{{key}}` in `template` with its value. Unknown keys are
/// left as they are.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        let Some(close) = after_open.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = after_open[..close].trim();
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after_open[close + 2..];
    }

    out.push_str(rest);
    out
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `2011-04-14T16:00:49Z` becomes `2011-04-14 16:00 UTC`. Anything that is
/// not RFC 3339 is shown as received.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M UTC")
            .to_string(),
        Err(_) => raw.to_owned(),
    }
}
