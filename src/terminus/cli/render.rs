//! Terminal output for command results.
//!
//! Every function returns a `String` so rendering can be tested without
//! capturing stdout; the handlers in `commands.rs` print it.

use colored::Colorize;
use terminus::api::{CmdMessage, ListedItem, MessageLevel};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
const INDEX_WIDTH: usize = 5;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut output = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        output.push_str(&format!("{}\n", line));
    }
    output
}

/// One line per item: index, bold name, then as much of the summary as fits.
pub fn render_listing(items: &[ListedItem]) -> String {
    let mut output = String::new();
    for item in items {
        let idx = format!("{:>width$}. ", item.index, width = INDEX_WIDTH - 2);
        let name_width = item.name.width();
        let available = LINE_WIDTH.saturating_sub(INDEX_WIDTH + name_width + 3);
        let summary = truncate_to_width(&item.summary, available);

        if summary.is_empty() {
            output.push_str(&format!("{}{}\n", idx.yellow(), item.name.bold()));
        } else {
            output.push_str(&format!(
                "{}{}  {}\n",
                idx.yellow(),
                item.name.bold(),
                summary.dimmed()
            ));
        }
    }
    output
}

pub fn render_detail(detail: &str) -> String {
    let mut output = String::from(detail);
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output
}

pub fn render_text_list(lines: &[String], empty_message: &str) -> String {
    if lines.is_empty() {
        return format!("{}\n", empty_message);
    }
    lines.iter().map(|l| format!("{}\n", l)).collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
