use bookwheel_app::{FilterState, Framing, PreviewState, ResultState, RouletteState, Screen};
use bookwheel_core::wheel::segment_at;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState};

use super::{Focus, SpinFlow, Stage};
use crate::theme;
use crate::ui::loading::render_loading_modal;
use crate::ui::modal::{render_error_modal, render_notice_modal};
use crate::ui::text::{
    compact_hint, focus_line, key_hint_height, key_hint_paragraph, label_value_line, quit_footer,
    wrapped_paragraph,
};
use crate::ui::wheel::render_wheel;
use crate::centered_rect;

impl SpinFlow {
    pub(crate) fn render(&self, frame: &mut Frame<'_>) {
        match &self.stage {
            Stage::Loading(stage) => render_loading_modal(
                frame,
                &stage.message,
                "q/Esc: cancel",
                &stage.loading,
            ),
            Stage::Ready(flow) => match flow.screen() {
                Screen::Unsupported { url } => render_unsupported(frame, url),
                Screen::Failed { message } => {
                    let footer = quit_footer(frame.area().width);
                    render_error_modal(frame, "Error", message, footer);
                }
                Screen::Filter(filter) => self.render_filter(frame, filter),
                Screen::Preview(preview) => self.render_preview(frame, preview),
                Screen::Roulette(roulette) => self.render_roulette(frame, roulette),
                Screen::Result(result) => render_result(frame, result),
            },
        }

        if let Some(message) = self.alert.as_deref() {
            render_notice_modal(frame, message, "Enter/Esc: ok");
        }
    }

    fn render_filter(&self, frame: &mut Frame<'_>, filter: &FilterState) {
        let area = frame.area();
        let key_text = compact_hint(
            area.width,
            "Up/Down or j/k: choose status    Enter: preview books    q/Esc: quit",
            "j/k: choose status    Enter: preview    q/Esc: quit",
            "j/k status | Enter preview | q quit",
        );
        let [header, body, footer] = screen_layout(area, 4, key_text);

        let header_text = Text::from(vec![
            Line::from(format!("{} books loaded", filter.total)),
            focus_line("Choose a status to filter by"),
        ]);
        frame.render_widget(
            wrapped_paragraph(header_text).block(theme::chrome("bookwheel")),
            header,
        );

        let items: Vec<ListItem<'_>> = std::iter::once("All")
            .chain(filter.statuses.iter().map(String::as_str))
            .map(|label| ListItem::new(label.to_string()))
            .collect();
        let list = List::new(items)
            .block(theme::chrome(focus_line("Status")))
            .highlight_style(theme::table_highlight(Color::Cyan))
            .highlight_symbol(">> ");
        let mut state = ListState::default();
        state.select(Some(self.status_cursor));
        frame.render_stateful_widget(list, body, &mut state);

        render_keys(frame, footer, key_text);
    }

    fn render_preview(&self, frame: &mut Frame<'_>, preview: &PreviewState) {
        let area = frame.area();
        let key_text = compact_hint(
            area.width,
            "Enter/p: pick randomly    d/Delete: remove book    Up/Down or j/k: move    Esc: back    q: quit",
            "Enter/p: pick    d: remove    j/k: move    Esc: back    q: quit",
            "Enter pick | d remove | Esc back | q quit",
        );
        let [header, body, footer] = screen_layout(area, 3, key_text);

        frame.render_widget(
            Paragraph::new(format!("{} books in the draw", preview.books.len()))
                .block(theme::chrome(focus_line("Preview"))),
            header,
        );

        if preview.books.is_empty() {
            frame.render_widget(
                Paragraph::new("No books left. Press Esc to choose another filter.")
                    .block(theme::chrome("Books")),
                body,
            );
        } else {
            let rows = preview.books.iter().map(|book| {
                Row::new(vec![
                    book.title_or_blank().to_string(),
                    book.author_or_blank().to_string(),
                    book.proposer_or_blank().to_string(),
                ])
            });
            let table = Table::new(
                rows,
                [
                    Constraint::Percentage(45),
                    Constraint::Percentage(30),
                    Constraint::Percentage(25),
                ],
            )
            .header(
                Row::new(["Title", "Author", "Proposed by"])
                    .style(theme::table_header(Color::Cyan)),
            )
            .block(theme::chrome("Books"))
            .row_highlight_style(theme::table_highlight(Color::Cyan))
            .highlight_symbol(">> ");
            let mut state = TableState::new();
            state.select(Some(self.book_cursor));
            frame.render_stateful_widget(table, body, &mut state);
        }

        render_keys(frame, footer, key_text);
    }

    fn render_roulette(&self, frame: &mut Frame<'_>, roulette: &RouletteState) {
        let area = frame.area();
        let focus = self.focus();
        let key_text = match focus {
            Focus::Configuring => compact_hint(
                area.width,
                "Enter: spin    0-9/Backspace: attempts    Up/Down or j/k: adjust    q: quit",
                "Enter: spin    0-9: attempts    j/k: adjust    q: quit",
                "Enter spin | 0-9 attempts | q quit",
            ),
            Focus::Stuck => "q: quit",
            _ => "Spinning...",
        };
        let [body, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(key_hint_height(area.width, key_text)),
            ])
            .areas(area);
        let [wheel_area, side] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .areas(body);
        let [attempts_area, legend_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .areas(side);

        let rotation = self.rotation();
        let wheel_title = if matches!(focus, Focus::Spinning) {
            focus_line("Spinning")
        } else {
            Line::from("Wheel")
        };
        render_wheel(frame, wheel_area, wheel_title, &roulette.segments, rotation);

        self.render_attempts(frame, attempts_area, roulette, focus == Focus::Configuring);

        let items: Vec<ListItem<'_>> = roulette
            .segments
            .iter()
            .map(|segment| {
                ListItem::new(Line::from(vec![
                    Span::styled("■ ", Style::default().fg(theme::segment_color(segment.color))),
                    Span::raw(segment.text.clone()),
                ]))
            })
            .collect();
        let legend = List::new(items)
            .block(theme::chrome(format!("Books ({})", roulette.segments.len())))
            .highlight_style(theme::table_highlight(Color::Cyan))
            .highlight_symbol(">> ");
        let mut state = ListState::default();
        if !roulette.segments.is_empty() {
            state.select(Some(segment_at(rotation, roulette.segments.len())));
        }
        frame.render_stateful_widget(legend, legend_area, &mut state);

        render_keys(frame, footer, key_text);
    }

    fn render_attempts(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        roulette: &RouletteState,
        editable: bool,
    ) {
        let label = format!("Attempts (1-{})", roulette.max_attempts());
        let title = if editable {
            focus_line(label)
        } else {
            Line::from(label)
        };
        let value = if editable {
            self.attempts_input.value().to_string()
        } else {
            roulette.attempts.to_string()
        };
        frame.render_widget(Paragraph::new(value).block(theme::chrome(title)), area);

        let width = area.width.saturating_sub(2) as usize;
        if editable && width > 0 {
            let cursor = self.attempts_input.visual_cursor().min(width - 1);
            frame.set_cursor_position((area.x + 1 + cursor as u16, area.y + 1));
        }
    }
}

fn screen_layout(area: Rect, header_height: u16, key_text: &str) -> [Rect; 3] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(5),
            Constraint::Length(key_hint_height(area.width, key_text)),
        ])
        .areas(area)
}

fn render_keys(frame: &mut Frame<'_>, area: Rect, key_text: &str) {
    frame.render_widget(key_hint_paragraph(key_text).block(theme::key_block()), area);
}

fn render_unsupported(frame: &mut Frame<'_>, url: &str) {
    let message = format!(
        "This page is not a Google Sheets document.\n\n\
         Pass the URL of a spreadsheet on docs.google.com/spreadsheets and try again.\n\n\
         Got: {url}"
    );
    let footer = quit_footer(frame.area().width);
    render_error_modal(frame, "Unsupported page", &message, footer);
}

fn render_result(frame: &mut Frame<'_>, result: &ResultState) {
    let area = frame.area();
    let panel = centered_rect(70, 60, area);
    let book = &result.book;

    let mut lines = match result.framing() {
        Framing::Discarded => vec![
            Line::from(Span::styled("Discarded", theme::discarded_prompt())),
            Line::from(Span::styled(
                format!("Attempts remaining: {}", result.attempts_remaining),
                theme::secondary_text(),
            )),
        ],
        Framing::Winner => vec![Line::from(Span::styled(
            "Winner! This is the next book.",
            theme::winner_prompt(),
        ))],
    };
    lines.push(Line::from(""));
    lines.push(label_value_line("Title", book.title_or_blank()));
    lines.push(label_value_line("Author", book.author_or_blank()));
    lines.push(label_value_line("Proposed by", book.proposer_or_blank()));

    let key_text = if result.can_continue() {
        "Enter: next attempt    q/Esc: quit"
    } else {
        quit_footer(area.width)
    };
    let footer_height = key_hint_height(panel.width, key_text);
    let [body, footer] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(footer_height)])
        .areas(panel);

    frame.render_widget(Clear, panel);
    frame.render_widget(
        wrapped_paragraph(Text::from(lines)).block(theme::chrome("Result")),
        body,
    );
    render_keys(frame, footer, key_text);
}
