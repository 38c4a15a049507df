use bookwheel_core::wheel::{Segment, segment_at};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Painter, Shape};

use crate::theme;

const RADIAL_STEPS: u32 = 48;
const ANGULAR_STEPS: u32 = 720;
/// Canvas units from the center to the edge of the drawing area.
const EXTENT: f64 = 1.15;

/// The wheel as drawn on screen: segment 0 starts at the top and segments
/// follow clockwise, all turned clockwise by `rotation` degrees.
pub(crate) struct WheelShape<'a> {
    pub(crate) segments: &'a [Segment],
    pub(crate) rotation: f64,
}

impl WheelShape<'_> {
    /// Segment drawn `angle` degrees clockwise from the top.
    pub(crate) fn segment_at_angle(&self, angle: f64) -> Option<&Segment> {
        if self.segments.is_empty() {
            return None;
        }
        self.segments
            .get(segment_at(self.rotation - angle, self.segments.len()))
    }
}

impl Shape for WheelShape<'_> {
    fn draw(&self, painter: &mut Painter<'_, '_>) {
        for step in 0..ANGULAR_STEPS {
            let angle = f64::from(step) * 360.0 / f64::from(ANGULAR_STEPS);
            let Some(segment) = self.segment_at_angle(angle) else {
                return;
            };
            let color = theme::segment_color(segment.color);
            let (sin, cos) = angle.to_radians().sin_cos();
            for ring in 1..=RADIAL_STEPS {
                let radius = f64::from(ring) / f64::from(RADIAL_STEPS);
                if let Some((x, y)) = painter.get_point(radius * sin, radius * cos) {
                    painter.paint(x, y, color);
                }
            }
        }
    }
}

pub(crate) fn render_wheel(
    frame: &mut Frame<'_>,
    area: Rect,
    title: Line<'_>,
    segments: &[Segment],
    rotation: f64,
) {
    let (x_extent, y_extent) = canvas_extents(area);
    let shape = WheelShape { segments, rotation };
    let pointer = Line::from(Span::styled(
        "▼",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));

    let canvas = Canvas::default()
        .block(theme::chrome(title))
        .marker(Marker::Braille)
        .x_bounds([-x_extent, x_extent])
        .y_bounds([-y_extent, y_extent])
        .paint(|context| {
            context.draw(&shape);
            context.layer();
            context.print(0.0, 1.08, pointer.clone());
        });
    frame.render_widget(canvas, area);
}

// Terminal cells are roughly twice as tall as they are wide.
fn canvas_extents(area: Rect) -> (f64, f64) {
    let width = f64::from(area.width.saturating_sub(2).max(1));
    let height = f64::from(area.height.saturating_sub(2).max(1));
    let aspect = width / (height * 2.0);
    if aspect >= 1.0 {
        (EXTENT * aspect, EXTENT)
    } else {
        (EXTENT, EXTENT / aspect)
    }
}
