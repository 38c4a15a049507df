use std::sync::mpsc::{self, Receiver};

use bookwheel_app::{App, LoadError, LoadResult};
use bookwheel_core::config::BookwheelConfig;
use bookwheel_core::fetch::HttpSheetFetcher;
use ratatui::Frame;
use ratatui::text::{Line, Text};

use crate::theme;
use crate::ui::modal::{ModalSpec, render_modal};

const FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

#[derive(Debug, Clone, Default)]
pub(crate) struct LoadingState {
    frame_index: usize,
}

impl LoadingState {
    pub(crate) fn next_frame(&mut self) {
        self.frame_index = (self.frame_index + 1) % FRAMES.len();
    }

    fn current_frame(&self) -> &'static str {
        FRAMES[self.frame_index]
    }
}

#[derive(Debug)]
pub(crate) enum LoadEvent {
    Downloading,
    Done(Result<LoadResult, LoadError>),
}

/// Runs the sheet load off the UI thread and reports progress on a channel.
pub(crate) trait SheetLoader: Send + Sync {
    fn spawn_load(&self, url: String, config: BookwheelConfig) -> Receiver<LoadEvent>;
}

#[derive(Debug, Default)]
pub(crate) struct SystemSheetLoader;

impl SystemSheetLoader {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl SheetLoader for SystemSheetLoader {
    fn spawn_load(&self, url: String, config: BookwheelConfig) -> Receiver<LoadEvent> {
        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = sender.send(LoadEvent::Downloading);

            let fetcher = match HttpSheetFetcher::new() {
                Ok(fetcher) => fetcher,
                Err(error) => {
                    let _ = sender.send(LoadEvent::Done(Err(LoadError::Download {
                        message: format!("{error:#}"),
                    })));
                    return;
                }
            };

            let app = App::new(&fetcher, config);
            let _ = sender.send(LoadEvent::Done(app.load(&url)));
        });
        receiver
    }
}

pub(crate) fn render_loading_modal(
    frame: &mut Frame<'_>,
    message: &str,
    key_hint: &str,
    loading: &LoadingState,
) {
    let body = Text::from(vec![
        Line::from(""),
        Line::from(format!("{} {}", loading.current_frame(), message)),
    ]);
    render_modal(
        frame,
        ModalSpec {
            title: "Loading books",
            title_style: theme::focus_prompt(),
            body,
            key_hint,
            width_pct: 72,
            height_pct: 42,
        },
    );
}
