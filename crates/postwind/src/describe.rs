//! Plain-text listing of everything a compile can see.
//!
//! Reads the same live tables the compiler does, so a listing produced after
//! `add_shortcut` or `add_keyword` includes the new entries.

use minijinja::Environment;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::config::Context;

const LISTING: &str = "\
{% for section in sections %}
{{ section.title }}
{% for row in section.rows %}
  {{ row.name | pad(section.width) }}  {{ row.value }}
{% else %}
  (none)
{% endfor %}
{% endfor %}";

#[derive(Debug, Serialize)]
struct Row {
    name: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct Section {
    title: &'static str,
    width: usize,
    rows: Vec<Row>,
}

impl Section {
    fn new(title: &'static str, rows: Vec<Row>) -> Self {
        let width = rows.iter().map(|r| r.name.width()).max().unwrap_or(0);
        Self { title, width, rows }
    }
}

/// Pads `s` with spaces to `width` display columns.
fn pad_to_width(s: &str, width: usize) -> String {
    let mut padded = s.to_string();
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(s.width())));
    padded
}

fn rows<'a>(entries: impl Iterator<Item = (&'a str, String)>) -> Vec<Row> {
    entries
        .map(|(name, value)| Row {
            name: name.to_string(),
            value,
        })
        .collect()
}

/// Renders breakpoints, properties, keywords and shortcuts, one per line.
pub fn describe(ctx: &Context) -> Result<String, minijinja::Error> {
    let breakpoints = rows(ctx.breakpoints.iter().map(|(k, v)| (k.as_str(), v.clone())));
    let properties = rows(ctx.properties.names().map(|name| {
        let value = ctx.properties.get(name).unwrap_or_default().join(", ");
        (name, value)
    }));
    let keywords = rows(
        ctx.keywords
            .names()
            .map(|name| (name, ctx.keywords.get(name).unwrap_or_default().to_string())),
    );
    let shortcuts = rows(ctx.shortcuts.iter().map(|(k, v)| (k.as_str(), v.clone())));

    let sections = vec![
        Section::new("Breakpoints", breakpoints),
        Section::new("Properties", properties),
        Section::new("Keywords", keywords),
        Section::new("Shortcuts", shortcuts),
    ];

    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("pad", |value: String, width: usize| pad_to_width(&value, width));
    env.add_template("listing", LISTING)?;
    env.get_template("listing")?
        .render(minijinja::context! { sections => sections })
}
