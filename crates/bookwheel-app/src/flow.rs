use bookwheel_core::book::{BookCollection, BookId, BookRecord};
use bookwheel_core::config::WheelConfig;
use bookwheel_core::wheel::{Segment, SpinPlan, build_segments, plan_spin};
use rand::Rng;
use thiserror::Error;

use crate::load::{LoadError, LoadResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Unsupported { url: String },
    Failed { message: String },
    Filter(FilterState),
    Preview(PreviewState),
    Roulette(RouletteState),
    Result(ResultState),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unsupported { .. } => "unsupported",
            Self::Failed { .. } => "error",
            Self::Filter(_) => "filter",
            Self::Preview(_) => "preview",
            Self::Roulette(_) => "roulette",
            Self::Result(_) => "result",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub total: usize,
    pub statuses: Vec<String>,
    pub selected: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    pub books: BookCollection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoulettePhase {
    Configuring,
    Spinning(SpinPlan),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouletteState {
    pub books: BookCollection,
    pub segments: Vec<Segment>,
    pub attempts: usize,
    pub phase: RoulettePhase,
}

impl RouletteState {
    pub fn spin_enabled(&self) -> bool {
        matches!(self.phase, RoulettePhase::Configuring)
    }

    pub fn max_attempts(&self) -> usize {
        self.books.len().max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// An intermediate round: the picked book is eliminated.
    Discarded,
    Winner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultState {
    pub book: BookRecord,
    pub remaining: BookCollection,
    pub attempts_remaining: usize,
}

impl ResultState {
    pub fn framing(&self) -> Framing {
        if self.attempts_remaining > 0 {
            Framing::Discarded
        } else {
            Framing::Winner
        }
    }

    pub fn can_continue(&self) -> bool {
        self.attempts_remaining > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectStatus(Option<String>),
    Preview,
    RemoveBook(BookId),
    BackToFilter,
    PickRandomly,
    SetAttempts(i64),
    Spin,
    SpinResolved { segment: usize },
    NextAttempt,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectStatus(_) => "select-status",
            Self::Preview => "preview",
            Self::RemoveBook(_) => "remove-book",
            Self::BackToFilter => "back-to-filter",
            Self::PickRandomly => "pick-randomly",
            Self::SetAttempts(_) => "set-attempts",
            Self::Spin => "spin",
            Self::SpinResolved { .. } => "spin-resolved",
            Self::NextAttempt => "next-attempt",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render,
    StartSpin(SpinPlan),
    Alert(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("action '{action}' is not available on the {screen} screen")]
    UnexpectedAction {
        action: &'static str,
        screen: &'static str,
    },
}

/// Owns the loaded books and the single active screen. Every transition
/// goes through [`Flow::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    loaded: BookCollection,
    statuses: Vec<String>,
    filter_term: Option<String>,
    wheel: WheelConfig,
    screen: Screen,
}

impl Flow {
    pub fn from_load(result: Result<LoadResult, LoadError>, wheel: WheelConfig) -> Self {
        match result {
            Ok(loaded) => Self::loaded(loaded.books, loaded.statuses, wheel),
            Err(LoadError::UnsupportedSite { url }) => Self::halted(Screen::Unsupported { url }),
            Err(error) => Self::halted(Screen::Failed {
                message: error.to_string(),
            }),
        }
    }

    pub fn loaded(books: BookCollection, statuses: Vec<String>, wheel: WheelConfig) -> Self {
        let screen = Screen::Filter(FilterState {
            total: books.len(),
            statuses: statuses.clone(),
            selected: None,
        });
        Self {
            loaded: books,
            statuses,
            filter_term: None,
            wheel,
            screen,
        }
    }

    fn halted(screen: Screen) -> Self {
        Self {
            loaded: BookCollection::default(),
            statuses: Vec::new(),
            filter_term: None,
            wheel: WheelConfig::default(),
            screen,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn loaded_books(&self) -> &BookCollection {
        &self.loaded
    }

    pub fn dispatch<R: Rng + ?Sized>(
        &mut self,
        action: Action,
        rng: &mut R,
    ) -> Result<Outcome, FlowError> {
        tracing::debug!(action = action.name(), screen = self.screen.name(), "dispatch");
        let unexpected = FlowError::UnexpectedAction {
            action: action.name(),
            screen: self.screen.name(),
        };

        let next = match (&mut self.screen, action) {
            (Screen::Filter(filter), Action::SelectStatus(term)) => {
                let term = term.filter(|value| !value.is_empty());
                filter.selected = term.clone();
                self.filter_term = term;
                None
            }
            (Screen::Filter(_), Action::Preview) => {
                let books = self.loaded.filter_by_status(self.filter_term.as_deref());
                Some(Screen::Preview(PreviewState { books }))
            }
            (Screen::Preview(preview), Action::RemoveBook(id)) => {
                preview.books = preview.books.without(id);
                None
            }
            (Screen::Preview(_), Action::BackToFilter) => Some(Screen::Filter(FilterState {
                total: self.loaded.len(),
                statuses: self.statuses.clone(),
                selected: self.filter_term.clone(),
            })),
            (Screen::Preview(preview), Action::PickRandomly) => {
                if preview.books.is_empty() {
                    return Ok(Outcome::Alert("No books left to pick from.".to_string()));
                }
                Some(Screen::Roulette(enter_roulette(&preview.books, 1, rng)))
            }
            (Screen::Roulette(roulette), Action::SetAttempts(raw)) if roulette.spin_enabled() => {
                roulette.attempts = clamp_attempts(raw, roulette.books.len());
                None
            }
            (Screen::Roulette(roulette), Action::Spin) if roulette.spin_enabled() => {
                let Some(plan) = plan_spin(roulette.segments.len(), &self.wheel, rng) else {
                    return Ok(Outcome::Alert("The wheel has no segments.".to_string()));
                };
                roulette.phase = RoulettePhase::Spinning(plan);
                return Ok(Outcome::StartSpin(plan));
            }
            (Screen::Roulette(roulette), Action::SpinResolved { segment })
                if !roulette.spin_enabled() =>
            {
                let picked = roulette
                    .segments
                    .get(segment)
                    .and_then(|segment| roulette.books.find(segment.book_id))
                    .cloned();
                let Some(book) = picked else {
                    tracing::warn!(segment, "wheel stopped on a segment with no matching book");
                    return Ok(Outcome::Alert("Please try again.".to_string()));
                };

                let remaining = roulette.books.without(book.id);
                let attempts_remaining = roulette.attempts.saturating_sub(1);
                tracing::info!(book = %book.id, attempts_remaining, "spin resolved");
                Some(Screen::Result(ResultState {
                    book,
                    remaining,
                    attempts_remaining,
                }))
            }
            (Screen::Result(result), Action::NextAttempt) if result.can_continue() => Some(
                Screen::Roulette(enter_roulette(&result.remaining, result.attempts_remaining, rng)),
            ),
            _ => return Err(unexpected),
        };

        if let Some(screen) = next {
            self.screen = screen;
        }
        Ok(Outcome::Render)
    }
}

/// Clamps a raw attempt count into `[1, len]` (`[1, 1]` for an empty list).
pub fn clamp_attempts(raw: i64, len: usize) -> usize {
    let max = len.max(1);
    if raw < 1 {
        return 1;
    }
    usize::try_from(raw).map_or(max, |value| value.min(max))
}

fn enter_roulette<R: Rng + ?Sized>(
    books: &BookCollection,
    attempts: usize,
    rng: &mut R,
) -> RouletteState {
    let books = books.shuffled(rng);
    let segments = build_segments(&books, rng);
    let attempts = clamp_attempts(i64::try_from(attempts).unwrap_or(i64::MAX), books.len());
    RouletteState {
        books,
        segments,
        attempts,
        phase: RoulettePhase::Configuring,
    }
}
