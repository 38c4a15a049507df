use std::time::Duration;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::book::{BookCollection, BookId};
use crate::config::WheelConfig;

/// Segment captions are cut to this many characters.
pub const CAPTION_LIMIT: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const PALETTE: [Rgb; 26] = [
    Rgb(0x13, 0x00, 0x5A),
    Rgb(0x00, 0x33, 0x7C),
    Rgb(0x1C, 0x82, 0xAD),
    Rgb(0x03, 0xC9, 0x88),
    Rgb(0x00, 0x42, 0x5A),
    Rgb(0x1F, 0x8A, 0x70),
    Rgb(0xBF, 0xDB, 0x38),
    Rgb(0xFC, 0x73, 0x00),
    Rgb(0x3D, 0x17, 0x66),
    Rgb(0x6F, 0x1A, 0xB6),
    Rgb(0xCD, 0x04, 0x04),
    Rgb(0xCB, 0x1C, 0x8D),
    Rgb(0x7F, 0x16, 0x7F),
    Rgb(0x46, 0x0C, 0x68),
    Rgb(0xE1, 0x4D, 0x2A),
    Rgb(0xFD, 0x84, 0x1F),
    Rgb(0x3E, 0x6D, 0x9C),
    Rgb(0x00, 0x12, 0x53),
    Rgb(0x9A, 0x16, 0x63),
    Rgb(0xE0, 0x14, 0x4C),
    Rgb(0xFF, 0x58, 0x58),
    Rgb(0xFF, 0x97, 0xC1),
    Rgb(0x00, 0x00, 0x00),
    Rgb(0x15, 0x00, 0x50),
    Rgb(0x3F, 0x00, 0x71),
    Rgb(0xFB, 0x25, 0x76),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub book_id: BookId,
    pub color: Rgb,
    pub text: String,
}

pub fn caption(title: &str) -> String {
    title.chars().take(CAPTION_LIMIT).collect()
}

/// One segment per book, in collection order, each with a random color.
pub fn build_segments<R: Rng + ?Sized>(books: &BookCollection, rng: &mut R) -> Vec<Segment> {
    books
        .iter()
        .map(|book| Segment {
            book_id: book.id,
            color: *PALETTE.choose(rng).unwrap_or(&PALETTE[0]),
            text: caption(book.title_or_blank()),
        })
        .collect()
}

/// A spin decided up front: how long it animates, how far the wheel turns
/// and which segment ends under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub duration: Duration,
    pub spins: u32,
    pub segment_count: usize,
    pub landing: usize,
    /// Clockwise rotation in degrees at the end of the animation.
    pub final_rotation: f64,
}

impl SpinPlan {
    /// Rotation after `elapsed`, eased out so the wheel slows to a stop.
    pub fn rotation_at(&self, elapsed: Duration) -> f64 {
        self.final_rotation * ease_out(self.progress(elapsed))
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

pub fn plan_spin<R: Rng + ?Sized>(
    segment_count: usize,
    wheel: &WheelConfig,
    rng: &mut R,
) -> Option<SpinPlan> {
    if segment_count == 0 {
        return None;
    }

    let duration = Duration::from_secs(
        rng.random_range(wheel.min_duration_secs..=wheel.max_duration_secs),
    );
    let spins = rng.random_range(wheel.min_spins..=wheel.max_spins);
    let landing = rng.random_range(0..segment_count);
    // Stay clear of the wedge edges so float error cannot flip the result.
    let offset = rng.random_range(0.15..0.85);

    let width = segment_width(segment_count);
    let target = (landing as f64 + offset) * width;
    let final_rotation = f64::from(spins) * 360.0 + (360.0 - target);

    Some(SpinPlan {
        duration,
        spins,
        segment_count,
        landing,
        final_rotation,
    })
}

pub fn segment_width(segment_count: usize) -> f64 {
    360.0 / segment_count.max(1) as f64
}

/// Index of the segment under the pointer (fixed at the top) once the wheel
/// has turned `rotation` degrees clockwise.
pub fn segment_at(rotation: f64, segment_count: usize) -> usize {
    if segment_count == 0 {
        return 0;
    }
    let under_pointer = (-rotation).rem_euclid(360.0);
    let index = (under_pointer / segment_width(segment_count)).floor() as usize;
    index.min(segment_count - 1)
}

fn ease_out(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(4)
}
