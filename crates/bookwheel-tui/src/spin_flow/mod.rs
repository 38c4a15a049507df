mod keys;
mod render;

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use anyhow::Result;
use bookwheel_app::{Action, Flow, LoadError, Outcome, Screen};
use bookwheel_core::config::BookwheelConfig;
use bookwheel_core::sheet::SheetUrl;
use bookwheel_core::wheel::{SpinPlan, segment_at};
use rand::rngs::StdRng;
use tui_input::Input;

use crate::ui::loading::{LoadEvent, LoadingState, SheetLoader};

enum Stage {
    Loading(LoadingStage),
    Ready(Flow),
}

struct LoadingStage {
    target: String,
    receiver: Receiver<LoadEvent>,
    loading: LoadingState,
    message: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SpinAnimation {
    plan: SpinPlan,
    started: Instant,
    rotation: f64,
    resolved: bool,
}

/// Which key handler applies right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Alert,
    Loading,
    Halted,
    Filter,
    Preview,
    Configuring,
    Spinning,
    Stuck,
    Result { can_continue: bool },
}

/// Terminal front end for one run of the roulette: waits for the
/// background load, then maps keys and animation ticks to [`Action`]s.
pub(crate) struct SpinFlow {
    stage: Stage,
    config: BookwheelConfig,
    rng: StdRng,
    status_cursor: usize,
    book_cursor: usize,
    attempts_input: Input,
    animation: Option<SpinAnimation>,
    alert: Option<String>,
}

impl SpinFlow {
    pub(crate) fn new(
        url: &str,
        config: BookwheelConfig,
        loader: &dyn SheetLoader,
        rng: StdRng,
    ) -> Self {
        let target = SheetUrl::parse(url)
            .map(|source| source.export_url())
            .unwrap_or_else(|_| url.trim().to_string());
        let receiver = loader.spawn_load(url.to_string(), config.clone());

        Self {
            stage: Stage::Loading(LoadingStage {
                target,
                receiver,
                loading: LoadingState::default(),
                message: "Checking the page".to_string(),
            }),
            config,
            rng,
            status_cursor: 0,
            book_cursor: 0,
            attempts_input: Input::new("1".to_string()),
            animation: None,
            alert: None,
        }
    }

    pub(crate) fn on_tick(&mut self, now: Instant) -> Result<()> {
        self.drain_loader();
        self.advance_animation(now)
    }

    fn drain_loader(&mut self) {
        let Stage::Loading(stage) = &mut self.stage else {
            return;
        };
        stage.loading.next_frame();

        let mut finished = None;
        loop {
            match stage.receiver.try_recv() {
                Ok(LoadEvent::Downloading) => {
                    stage.message = format!("Downloading {}", stage.target);
                }
                Ok(LoadEvent::Done(result)) => {
                    finished = Some(result);
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    finished = Some(Err(LoadError::Download {
                        message: "background loader stopped before reporting".to_string(),
                    }));
                    break;
                }
            }
        }

        if let Some(result) = finished {
            if let Err(error) = &result {
                tracing::warn!(error = %error, "sheet load failed");
            }
            self.stage = Stage::Ready(Flow::from_load(result, self.config.wheel));
        }
    }

    fn advance_animation(&mut self, now: Instant) -> Result<()> {
        let Some(animation) = self.animation.as_mut() else {
            return Ok(());
        };
        if animation.resolved {
            return Ok(());
        }

        let elapsed = now.saturating_duration_since(animation.started);
        animation.rotation = animation.plan.rotation_at(elapsed);
        if !animation.plan.is_finished(elapsed) {
            return Ok(());
        }

        animation.resolved = true;
        let segment = segment_at(animation.plan.final_rotation, animation.plan.segment_count);
        self.dispatch(Action::SpinResolved { segment })
    }

    fn dispatch(&mut self, action: Action) -> Result<()> {
        let Stage::Ready(flow) = &mut self.stage else {
            return Ok(());
        };

        let before = flow.screen().name();
        let outcome = flow.dispatch(action, &mut self.rng)?;
        let after = flow.screen().name();

        match outcome {
            Outcome::Render => {}
            Outcome::StartSpin(plan) => {
                self.animation = Some(SpinAnimation {
                    plan,
                    started: Instant::now(),
                    rotation: 0.0,
                    resolved: false,
                });
            }
            Outcome::Alert(message) => self.alert = Some(message),
        }

        if before != after {
            self.entered_screen();
        }
        Ok(())
    }

    fn entered_screen(&mut self) {
        let Stage::Ready(flow) = &self.stage else {
            return;
        };

        match flow.screen() {
            Screen::Filter(filter) => {
                self.status_cursor = filter
                    .selected
                    .as_ref()
                    .and_then(|term| filter.statuses.iter().position(|status| status == term))
                    .map_or(0, |index| index + 1);
            }
            Screen::Preview(_) => self.book_cursor = 0,
            Screen::Roulette(roulette) => {
                self.attempts_input = Input::new(roulette.attempts.to_string());
                self.animation = None;
            }
            _ => {}
        }
    }

    fn screen(&self) -> Option<&Screen> {
        match &self.stage {
            Stage::Loading(_) => None,
            Stage::Ready(flow) => Some(flow.screen()),
        }
    }

    fn focus(&self) -> Focus {
        if self.alert.is_some() {
            return Focus::Alert;
        }
        match self.screen() {
            None => Focus::Loading,
            Some(Screen::Unsupported { .. } | Screen::Failed { .. }) => Focus::Halted,
            Some(Screen::Filter(_)) => Focus::Filter,
            Some(Screen::Preview(_)) => Focus::Preview,
            Some(Screen::Roulette(roulette)) if roulette.spin_enabled() => Focus::Configuring,
            Some(Screen::Roulette(_)) => match self.animation {
                Some(animation) if !animation.resolved => Focus::Spinning,
                _ => Focus::Stuck,
            },
            Some(Screen::Result(result)) => Focus::Result {
                can_continue: result.can_continue(),
            },
        }
    }

    fn rotation(&self) -> f64 {
        self.animation.map_or(0.0, |animation| animation.rotation)
    }

    /// Text of the unsupported or failed screen, if the session stopped there.
    fn halted_message(&self) -> Option<String> {
        match self.screen()? {
            Screen::Unsupported { url } => {
                Some(LoadError::UnsupportedSite { url: url.clone() }.to_string())
            }
            Screen::Failed { message } => Some(message.clone()),
            _ => None,
        }
    }
}
