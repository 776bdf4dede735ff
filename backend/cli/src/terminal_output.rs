//! Terminal output: ANSI notes, tables, and the chat reply printer.

use std::io::Write;

use async_trait::async_trait;
use wayfarer_agent::{ReplyEvent, ReplySink};

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Formatted notes
// ---------------------------------------------------------------------------

pub fn note_info(msg: &str) {
    if supports_color() {
        println!("{CYAN}{BOLD}ℹ{RESET} {msg}");
    } else {
        println!("INFO: {msg}");
    }
}

pub fn note_warn(msg: &str) {
    if supports_color() {
        println!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        println!("WARN: {msg}");
    }
}

pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

/// Render a left-aligned table.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let width_of = |s: &str| strip_ansi(s).chars().count();
    let mut widths: Vec<usize> = headers.iter().map(|h| width_of(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(width_of(cell));
        }
    }

    let pad = |s: &str, width: usize| format!("{s}{}", " ".repeat(width.saturating_sub(width_of(s))));

    let mut out = String::new();
    let header: Vec<String> = headers.iter().zip(&widths).map(|(h, w)| pad(h, *w)).collect();
    out.push_str(&format!("{BOLD}  {}{RESET}\n", header.join("  ").trim_end()));

    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("  {}\n", sep.join("  ")));

    for row in rows {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| pad(row.get(i).map(String::as_str).unwrap_or(""), *w))
            .collect();
        out.push_str(&format!("  {}\n", cells.join("  ").trim_end()));
    }
    out
}

// ---------------------------------------------------------------------------
// Chat reply printer
// ---------------------------------------------------------------------------

/// Text printed for one reply event. Fragments print raw so the reply
/// appears as it streams.
pub fn render_event(event: &ReplyEvent, color: bool) -> String {
    let (style, reset) = if color { (DIM, RESET) } else { ("", "") };
    match event {
        ReplyEvent::Working(text) => format!("{style}{text}{reset}\n"),
        ReplyEvent::Fragment(text) => text.clone(),
        ReplyEvent::Handoff { from, to } => {
            let (style, reset) = if color { (MAGENTA, RESET) } else { ("", "") };
            format!("\n{style}↪ {from} → {to}{reset}\n")
        }
        ReplyEvent::Committed(_) => "\n".to_string(),
        ReplyEvent::Error(message) => format!("\n{message}\n"),
    }
}

/// Prints reply events to stdout as they arrive.
pub struct TerminalSink {
    color: bool,
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self {
            color: supports_color(),
        }
    }
}

#[async_trait]
impl ReplySink for TerminalSink {
    async fn send(&self, event: ReplyEvent) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(render_event(&event, self.color).as_bytes());
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_ansi() {
        let colored = format!("{GREEN}hello{RESET}");
        assert_eq!(strip_ansi(&colored), "hello");
    }

    #[test]
    fn table_aligns_columns() {
        let table = render_table(
            &["Persona", "Model"],
            &[
                vec!["BookingAgent".into(), "m1".into()],
                vec!["ExploreAgent".into(), "model-two".into()],
            ],
        );
        let lines: Vec<String> = table.lines().map(strip_ansi).collect();
        assert_eq!(lines[0], "  Persona       Model");
        assert_eq!(lines[2], "  BookingAgent  m1");
        assert_eq!(lines[3], "  ExploreAgent  model-two");
    }

    #[test]
    fn events_render_without_color() {
        assert_eq!(
            render_event(&ReplyEvent::Fragment("Hi".into()), false),
            "Hi"
        );
        assert_eq!(
            render_event(
                &ReplyEvent::Handoff {
                    from: "OrchestratorAgent".into(),
                    to: "BookingAgent".into()
                },
                false
            ),
            "\n↪ OrchestratorAgent → BookingAgent\n"
        );
        assert_eq!(render_event(&ReplyEvent::Committed("Hi".into()), true), "\n");
    }

    #[test]
    fn default_sink_follows_terminal_color_support() {
        assert_eq!(TerminalSink::default().color, supports_color());
    }
}
