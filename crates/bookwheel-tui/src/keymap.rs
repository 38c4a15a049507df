use crossterm::event::{KeyCode, KeyEvent};

pub(crate) fn is_back(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc)
}

pub(crate) fn is_confirm(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter)
}

pub(crate) fn is_up(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Up | KeyCode::Char('k'))
}

pub(crate) fn is_down(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Down | KeyCode::Char('j'))
}

pub(crate) fn is_remove(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Delete | KeyCode::Char('d') | KeyCode::Char('x'))
}

pub(crate) fn is_pick(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('p'))
}

pub(crate) fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
}

/// Keys that edit the attempts field.
pub(crate) fn is_number_edit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(character) => character.is_ascii_digit(),
        KeyCode::Backspace | KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End => {
            true
        }
        _ => false,
    }
}
