use ratatui::layout::Alignment;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use crate::theme;

pub(crate) fn wrapped_paragraph<'a, T>(text: T) -> Paragraph<'a>
where
    T: Into<Text<'a>>,
{
    Paragraph::new(text).wrap(Wrap { trim: false })
}

pub(crate) fn key_hint_paragraph<'a, T>(text: T) -> Paragraph<'a>
where
    T: Into<Text<'a>>,
{
    wrapped_paragraph(text).alignment(Alignment::Center)
}

/// Height of a bordered key hint box that fits `text` at `total_width`.
pub(crate) fn key_hint_height(total_width: u16, text: &str) -> u16 {
    let content_width = total_width.saturating_sub(2).max(1) as usize;
    wrapped_line_count(text, content_width)
        .saturating_add(2)
        .max(3)
}

pub(crate) fn compact_hint<'a>(
    width: u16,
    full: &'a str,
    medium: &'a str,
    compact: &'a str,
) -> &'a str {
    if width >= 110 {
        full
    } else if width >= 78 {
        medium
    } else {
        compact
    }
}

pub(crate) fn focus_line(message: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(message.into(), theme::focus_prompt()))
}

pub(crate) fn label_value_line(
    label: impl Into<String>,
    value: impl Into<String>,
) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label.into()), theme::secondary_text()),
        Span::raw(value.into()),
    ])
}

pub(crate) fn quit_footer(width: u16) -> &'static str {
    compact_hint(
        width,
        "Enter/Esc/q: quit bookwheel",
        "Enter/Esc/q: quit",
        "Enter/q quit",
    )
}

fn wrapped_line_count(text: &str, width: usize) -> u16 {
    text.split('\n')
        .map(|line| wrapped_line_count_single(line, width))
        .fold(0u16, u16::saturating_add)
        .max(1)
}

fn wrapped_line_count_single(line: &str, width: usize) -> u16 {
    let width = width.max(1);
    let columns: usize = line
        .chars()
        .map(|character| if character == '\t' { 4 } else { 1 })
        .sum();
    if columns == 0 {
        return 1;
    }
    u16::try_from(columns.div_ceil(width)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use ratatui::style::{Color, Modifier};

    use super::{
        compact_hint, focus_line, key_hint_height, label_value_line, quit_footer,
        wrapped_line_count, wrapped_line_count_single,
    };

    #[test]
    fn compact_hint_selects_variant_by_width() {
        assert_eq!(compact_hint(120, "full", "medium", "compact"), "full");
        assert_eq!(compact_hint(90, "full", "medium", "compact"), "medium");
        assert_eq!(compact_hint(60, "full", "medium", "compact"), "compact");
    }

    #[test]
    fn key_hint_height_is_single_line_when_hint_fits() {
        assert_eq!(key_hint_height(80, "Enter: preview    Esc: quit"), 3);
    }

    #[test]
    fn key_hint_height_grows_when_hint_wraps() {
        let height = key_hint_height(20, "Enter: preview    Up/Down or j/k: move    q: quit");
        assert!(height > 3);
    }

    #[test]
    fn wrapped_line_count_counts_every_line() {
        assert_eq!(wrapped_line_count("", 10), 1);
        assert_eq!(wrapped_line_count("abc\n\nabcdefghijk", 10), 4);
        assert_eq!(wrapped_line_count_single("a    b", 3), 2);
        assert_eq!(wrapped_line_count_single("\t", 2), 2);
    }

    #[test]
    fn focus_line_uses_blue_bold_style() {
        let line = focus_line("Choose a status");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content.as_ref(), "Choose a status");
        assert_eq!(line.spans[0].style.fg, Some(Color::Blue));
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn label_value_line_formats_with_colon() {
        let line = label_value_line("Author", "Ursula K. Le Guin");
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content.as_ref(), "Author: ");
        assert_eq!(line.spans[1].content.as_ref(), "Ursula K. Le Guin");
    }

    #[test]
    fn quit_footer_compacts_by_width() {
        assert_eq!(quit_footer(120), "Enter/Esc/q: quit bookwheel");
        assert_eq!(quit_footer(90), "Enter/Esc/q: quit");
        assert_eq!(quit_footer(60), "Enter/q quit");
    }
}
