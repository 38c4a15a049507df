use anyhow::Result;
use bookwheel_app::{Action, Screen};
use crossterm::event::{Event, KeyEvent};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use super::{Focus, SpinFlow};
use crate::{UiExit, keymap};

impl SpinFlow {
    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Result<Option<UiExit>> {
        match self.focus() {
            Focus::Alert => {
                if keymap::is_confirm(key) || keymap::is_back(key) {
                    self.alert = None;
                }
                Ok(None)
            }
            Focus::Loading => Ok(is_exit(key).then_some(UiExit::Canceled)),
            Focus::Halted => {
                if !(keymap::is_confirm(key) || is_exit(key)) {
                    return Ok(None);
                }
                Ok(self.halted_message().map(UiExit::Halted))
            }
            Focus::Filter => self.on_filter_key(key),
            Focus::Preview => self.on_preview_key(key),
            Focus::Configuring => self.on_attempts_key(key),
            Focus::Spinning => Ok(None),
            Focus::Stuck => Ok(keymap::is_quit(key).then_some(UiExit::Completed)),
            Focus::Result { can_continue } => {
                if keymap::is_confirm(key) && can_continue {
                    self.dispatch(Action::NextAttempt)?;
                    return Ok(None);
                }
                Ok((keymap::is_confirm(key) || is_exit(key)).then_some(UiExit::Completed))
            }
        }
    }

    fn on_filter_key(&mut self, key: KeyEvent) -> Result<Option<UiExit>> {
        if is_exit(key) {
            return Ok(Some(UiExit::Completed));
        }

        if keymap::is_confirm(key) {
            self.dispatch(Action::Preview)?;
            return Ok(None);
        }

        let Some(Screen::Filter(filter)) = self.screen() else {
            return Ok(None);
        };
        // Row 0 is "All"; row n is the n-th status.
        let rows = filter.statuses.len() + 1;
        let next = if keymap::is_up(key) {
            self.status_cursor.saturating_sub(1)
        } else if keymap::is_down(key) {
            (self.status_cursor + 1).min(rows - 1)
        } else {
            return Ok(None);
        };
        let term = next
            .checked_sub(1)
            .and_then(|index| filter.statuses.get(index))
            .cloned();

        self.status_cursor = next;
        self.dispatch(Action::SelectStatus(term))?;
        Ok(None)
    }

    fn on_preview_key(&mut self, key: KeyEvent) -> Result<Option<UiExit>> {
        if keymap::is_quit(key) {
            return Ok(Some(UiExit::Completed));
        }
        if keymap::is_back(key) {
            self.dispatch(Action::BackToFilter)?;
            return Ok(None);
        }
        if keymap::is_confirm(key) || keymap::is_pick(key) {
            self.dispatch(Action::PickRandomly)?;
            return Ok(None);
        }

        let Some(Screen::Preview(preview)) = self.screen() else {
            return Ok(None);
        };
        let len = preview.books.len();
        let selected = preview.books.get(self.book_cursor).map(|book| book.id);

        if keymap::is_up(key) {
            self.book_cursor = self.book_cursor.saturating_sub(1);
        } else if keymap::is_down(key) {
            self.book_cursor = (self.book_cursor + 1).min(len.saturating_sub(1));
        } else if keymap::is_remove(key)
            && let Some(id) = selected
        {
            self.dispatch(Action::RemoveBook(id))?;
            self.book_cursor = self.book_cursor.min(len.saturating_sub(2));
        }
        Ok(None)
    }

    fn on_attempts_key(&mut self, key: KeyEvent) -> Result<Option<UiExit>> {
        if keymap::is_quit(key) {
            return Ok(Some(UiExit::Completed));
        }
        if keymap::is_confirm(key) {
            self.sync_attempts_input();
            self.dispatch(Action::Spin)?;
            return Ok(None);
        }

        let current = self.current_attempts();
        if keymap::is_up(key) {
            self.set_attempts(current.saturating_add(1))?;
        } else if keymap::is_down(key) {
            self.set_attempts(current.saturating_sub(1))?;
        } else if keymap::is_number_edit(key) {
            let before = self.attempts_input.value().to_string();
            self.attempts_input.handle_event(&Event::Key(key));
            let value = self.attempts_input.value();
            if value != before && !value.is_empty() {
                // Only digits get in, so a parse failure means overflow.
                let raw = value.parse::<i64>().unwrap_or(i64::MAX);
                self.set_attempts(raw)?;
            }
        }
        Ok(None)
    }

    fn current_attempts(&self) -> i64 {
        match self.screen() {
            Some(Screen::Roulette(roulette)) => i64::try_from(roulette.attempts).unwrap_or(1),
            _ => 1,
        }
    }

    fn set_attempts(&mut self, raw: i64) -> Result<()> {
        self.dispatch(Action::SetAttempts(raw))?;
        self.sync_attempts_input();
        Ok(())
    }

    fn sync_attempts_input(&mut self) {
        let value = self.current_attempts().to_string();
        if self.attempts_input.value() != value {
            self.attempts_input = Input::new(value);
        }
    }
}

fn is_exit(key: KeyEvent) -> bool {
    keymap::is_quit(key) || keymap::is_back(key)
}
