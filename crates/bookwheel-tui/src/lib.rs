mod keymap;
mod spin_flow;
mod theme;
mod ui;

use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use bookwheel_core::config::BookwheelConfig;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use spin_flow::SpinFlow;

use crate::ui::loading::SystemSheetLoader;
use crate::ui::modal::render_error_modal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiExit {
    Completed,
    Canceled,
    /// The sheet could not be used; carries the message that was shown.
    Halted(String),
}

const TICK_RATE: Duration = Duration::from_millis(120);

pub(crate) struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub(crate) fn enter() -> Result<Self> {
        let terminal = enter_with_ops(
            || enable_raw_mode().context("failed to enable raw mode"),
            || {
                let mut out = stdout();
                execute!(out, EnterAlternateScreen, Hide)
                    .context("failed to enter alternate screen")
            },
            || {
                let backend = CrosstermBackend::new(stdout());
                Terminal::new(backend).context("failed to create terminal backend")
            },
            || {
                let mut out = stdout();
                execute!(out, Show, LeaveAlternateScreen)
                    .context("failed to restore terminal screen during rollback")
            },
            || disable_raw_mode().context("failed to disable raw mode during rollback"),
        )?;
        Ok(Self { terminal })
    }

    pub(crate) fn draw<F>(&mut self, draw_fn: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame<'_>),
    {
        self.terminal
            .draw(draw_fn)
            .context("failed to render terminal")?;
        Ok(())
    }

    pub(crate) fn autoresize(&mut self) -> Result<()> {
        self.terminal
            .autoresize()
            .context("failed to autoresize terminal")?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.terminal.backend_mut(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Runs the setup steps in order and undoes the completed ones if a later
/// step fails.
fn enter_with_ops<
    T,
    EnableRawMode,
    EnterAltScreen,
    CreateTerminal,
    LeaveAltScreen,
    DisableRawMode,
>(
    mut enable_raw_mode_op: EnableRawMode,
    mut enter_alt_screen_op: EnterAltScreen,
    mut create_terminal_op: CreateTerminal,
    mut leave_alt_screen_op: LeaveAltScreen,
    mut disable_raw_mode_op: DisableRawMode,
) -> Result<T>
where
    EnableRawMode: FnMut() -> Result<()>,
    EnterAltScreen: FnMut() -> Result<()>,
    CreateTerminal: FnMut() -> Result<T>,
    LeaveAltScreen: FnMut() -> Result<()>,
    DisableRawMode: FnMut() -> Result<()>,
{
    enable_raw_mode_op()?;

    if let Err(error) = enter_alt_screen_op() {
        let cleanup = rollback(false, &mut leave_alt_screen_op, &mut disable_raw_mode_op);
        return Err(with_cleanup_failures(error, cleanup));
    }

    create_terminal_op().map_err(|error| {
        let cleanup = rollback(true, &mut leave_alt_screen_op, &mut disable_raw_mode_op);
        with_cleanup_failures(error, cleanup)
    })
}

fn rollback<LeaveAltScreen, DisableRawMode>(
    alt_screen_entered: bool,
    leave_alt_screen_op: &mut LeaveAltScreen,
    disable_raw_mode_op: &mut DisableRawMode,
) -> Vec<String>
where
    LeaveAltScreen: FnMut() -> Result<()>,
    DisableRawMode: FnMut() -> Result<()>,
{
    let mut failures = Vec::new();

    if alt_screen_entered && let Err(error) = leave_alt_screen_op() {
        failures.push(format!(
            "failed to restore alternate screen during rollback: {error:#}"
        ));
    }

    if let Err(error) = disable_raw_mode_op() {
        failures.push(format!(
            "failed to disable raw mode during rollback: {error:#}"
        ));
    }

    failures
}

fn with_cleanup_failures(setup_error: anyhow::Error, failures: Vec<String>) -> anyhow::Error {
    if failures.is_empty() {
        return setup_error;
    }
    anyhow!(
        "{setup_error:#}\nterminal rollback cleanup failed: {}",
        failures.join("\n")
    )
}

pub(crate) fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Loads the sheet at `url` and runs the interactive roulette until the
/// user quits.
pub fn run_spin(config: &BookwheelConfig, url: &str) -> Result<UiExit> {
    let loader = SystemSheetLoader::new();
    let mut flow = SpinFlow::new(url, config.clone(), &loader, StdRng::from_os_rng());
    let mut session = TerminalSession::enter()?;
    let mut global_error: Option<String> = None;

    loop {
        session.draw(|frame| {
            flow.render(frame);
            if let Some(message) = global_error.as_deref() {
                render_error_modal(
                    frame,
                    "Error",
                    &format!("Operation failed.\n\n{message}"),
                    "Enter/Esc: continue",
                );
            }
        })?;

        let has_event = event::poll(TICK_RATE).context("failed to poll terminal event")?;
        if has_event {
            let key = match event::read().context("failed to read terminal event")? {
                Event::Resize(_, _) => {
                    session.autoresize()?;
                    None
                }
                Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => Some(key),
                _ => None,
            };

            if let Some(key) = key {
                if is_ctrl_c(key) {
                    return Ok(UiExit::Canceled);
                }

                if global_error.is_some() {
                    if keymap::is_confirm(key) || keymap::is_back(key) {
                        global_error = None;
                    }
                } else {
                    match flow.on_key(key) {
                        Ok(Some(exit)) => return Ok(exit),
                        Ok(None) => {}
                        Err(error) => global_error = Some(format!("{error:#}")),
                    }
                }
            }
        }

        if let Err(error) = flow.on_tick(Instant::now()) {
            global_error = Some(format!("{error:#}"));
        }
    }
}

pub(crate) fn centered_rect(
    percent_x: u16,
    percent_y: u16,
    area: ratatui::layout::Rect,
) -> ratatui::layout::Rect {
    let pct_x = percent_x.min(100);
    let pct_y = percent_y.min(100);

    let [_, vertical, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - pct_y) / 2),
            Constraint::Percentage(pct_y),
            Constraint::Percentage((100 - pct_y) / 2),
        ])
        .areas(area);
    let [_, horizontal, _] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - pct_x) / 2),
            Constraint::Percentage(pct_x),
            Constraint::Percentage((100 - pct_x) / 2),
        ])
        .areas(vertical);
    horizontal
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use anyhow::anyhow;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::layout::Rect;

    use super::{centered_rect, enter_with_ops, is_ctrl_c};

    type Calls = RefCell<Vec<&'static str>>;

    fn step(calls: &Calls, name: &'static str, fail: bool) -> anyhow::Result<()> {
        calls.borrow_mut().push(name);
        if fail {
            Err(anyhow!("{name} failed"))
        } else {
            Ok(())
        }
    }

    #[test]
    fn centered_rect_returns_middle_segment() {
        let centered = centered_rect(80, 60, Rect::new(0, 0, 100, 50));

        assert_eq!(centered.width, 80);
        assert_eq!(centered.height, 30);
        assert_eq!(centered.x, 10);
        assert_eq!(centered.y, 10);
    }

    #[test]
    fn centered_rect_clamps_percentages_over_100() {
        let area = Rect::new(3, 4, 40, 20);
        assert_eq!(centered_rect(120, 150, area), area);
    }

    #[test]
    fn ctrl_c_needs_the_control_modifier() {
        assert!(is_ctrl_c(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_ctrl_c(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn enter_rolls_back_raw_mode_when_alt_screen_step_fails() {
        let calls = Calls::default();

        let error = enter_with_ops(
            || step(&calls, "enable_raw_mode", false),
            || step(&calls, "enter_alt_screen", true),
            || step(&calls, "create_terminal", false),
            || step(&calls, "leave_alt_screen", false),
            || step(&calls, "disable_raw_mode", false),
        )
        .expect_err("enter should fail");

        assert_eq!(
            calls.into_inner(),
            vec!["enable_raw_mode", "enter_alt_screen", "disable_raw_mode"]
        );
        assert!(format!("{error:#}").contains("enter_alt_screen failed"));
    }

    #[test]
    fn enter_rolls_back_alt_screen_then_raw_mode_when_terminal_creation_fails() {
        let calls = Calls::default();

        let error = enter_with_ops(
            || step(&calls, "enable_raw_mode", false),
            || step(&calls, "enter_alt_screen", false),
            || step(&calls, "create_terminal", true),
            || step(&calls, "leave_alt_screen", false),
            || step(&calls, "disable_raw_mode", false),
        )
        .expect_err("enter should fail");

        assert_eq!(
            calls.into_inner(),
            vec![
                "enable_raw_mode",
                "enter_alt_screen",
                "create_terminal",
                "leave_alt_screen",
                "disable_raw_mode",
            ]
        );
        assert!(format!("{error:#}").contains("create_terminal failed"));
    }

    #[test]
    fn enter_reports_every_failed_cleanup_step() {
        let calls = Calls::default();

        let error = enter_with_ops(
            || step(&calls, "enable_raw_mode", false),
            || step(&calls, "enter_alt_screen", false),
            || step(&calls, "create_terminal", true),
            || step(&calls, "leave_alt_screen", true),
            || step(&calls, "disable_raw_mode", true),
        )
        .expect_err("enter should fail");

        let message = format!("{error:#}");
        assert!(message.contains("create_terminal failed"));
        assert!(message.contains("leave_alt_screen failed"));
        assert!(message.contains("disable_raw_mode failed"));
    }

    #[test]
    fn enter_success_skips_rollback() {
        let calls = Calls::default();

        let value = enter_with_ops(
            || step(&calls, "enable_raw_mode", false),
            || step(&calls, "enter_alt_screen", false),
            || {
                calls.borrow_mut().push("create_terminal");
                Ok::<_, anyhow::Error>("terminal")
            },
            || step(&calls, "leave_alt_screen", false),
            || step(&calls, "disable_raw_mode", false),
        )
        .expect("enter should succeed");

        assert_eq!(value, "terminal");
        assert_eq!(
            calls.into_inner(),
            vec!["enable_raw_mode", "enter_alt_screen", "create_terminal"]
        );
    }
}
