use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use timeago::Formatter;
use todoz::api::{CmdMessage, MessageLevel};
use todoz::error::Result;
use todoz::model::Todo;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const DUE_WIDTH: usize = 12;
const DONE_MARKER: &str = "✓";
const PENDING_MARKER: &str = "·";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

/// Full YAML rendering, one document per todo.
pub(super) fn print_todos_yaml(todos: &[Todo]) -> Result<()> {
    for todo in todos {
        print!("{}", todo.to_yaml()?);
    }
    Ok(())
}

pub(super) fn print_todos(todos: &[Todo]) {
    if todos.is_empty() {
        println!("No todos found.");
        return;
    }

    let now = Utc::now();
    for todo in todos {
        let idx_str = format!("{:>4}. ", todo.id());
        let marker = if todo.is_done() {
            DONE_MARKER.green()
        } else {
            PENDING_MARKER.normal()
        };

        let due_str = match todo.due() {
            Some(due) => format!("{:>width$}", format_due(due), width = DUE_WIDTH),
            None => " ".repeat(DUE_WIDTH),
        };
        let due_colored = match todo.due() {
            Some(due) if due < now && !todo.is_done() => due_str.red(),
            _ => due_str.normal(),
        };

        let fixed_width = idx_str.width() + 2 + DUE_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let description = truncate_to_width(&single_line(todo.description()), available);
        let padding = available.saturating_sub(description.width());

        let description = if todo.is_done() {
            description.dimmed()
        } else {
            description.normal()
        };

        println!(
            "{}{} {}{}{}{}",
            idx_str.yellow(),
            marker,
            description,
            " ".repeat(padding),
            due_colored,
            format_time_ago(todo.modified()).dimmed()
        );
    }
}

fn single_line(s: &str) -> String {
    s.chars().map(|c| if c == '\n' { ' ' } else { c }).collect()
}

fn format_due(due: DateTime<Utc>) -> String {
    due.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
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

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Wide characters count double.
        assert_eq!(truncate_to_width("日本語テキスト", 6), "日本…");
    }

    #[test]
    fn flattens_newlines() {
        assert_eq!(single_line("a\nb"), "a b");
    }
}
