//! Screen-space math for the history chart: projection, ticks, hover lookup
//! and the x-only pan/zoom window. Times are unix seconds (f64).

use time::OffsetDateTime;

use crate::core::format::format_axis_ms;
use crate::core::timing::{from_unix_seconds, unix_seconds};

pub const VIEW_WIDTH: f64 = 760.0;
pub const VIEW_HEIGHT: f64 = 300.0;
pub const MARGIN_LEFT: f64 = 64.0;
pub const MARGIN_RIGHT: f64 = 16.0;
pub const MARGIN_TOP: f64 = 12.0;
pub const MARGIN_BOTTOM: f64 = 36.0;

/// Narrowest window the zoom allows (one hour).
const MIN_SPAN_SECONDS: f64 = 3_600.0;

const Y_STEPS_MS: &[f64] = &[
    1_000.0, 2_000.0, 5_000.0, 10_000.0, 15_000.0, 30_000.0, 60_000.0, 120_000.0, 300_000.0,
    600_000.0, 900_000.0, 1_800_000.0, 3_600_000.0, 7_200_000.0, 18_000_000.0, 36_000_000.0,
];
const X_STEPS_SECONDS: &[f64] = &[
    3_600.0, 10_800.0, 21_600.0, 43_200.0, 86_400.0, 172_800.0, 604_800.0, 2_592_000.0,
];
const MAX_Y_TICKS: usize = 6;
const MAX_X_TICKS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn from_domain(domain: (OffsetDateTime, OffsetDateTime)) -> Self {
        let start = unix_seconds(domain.0);
        let end = unix_seconds(domain.1).max(start + MIN_SPAN_SECONDS);
        Self { start, end }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Zoom by `factor` (< 1 zooms in) keeping `anchor` fixed on screen.
    pub fn zoom(&self, factor: f64, anchor: f64) -> Self {
        let factor = if factor.is_finite() && factor > 0.0 { factor } else { 1.0 };
        let span = (self.span() * factor).max(MIN_SPAN_SECONDS);
        let anchor = anchor.clamp(self.start, self.end);
        let ratio = if self.span() > 0.0 {
            (anchor - self.start) / self.span()
        } else {
            0.5
        };
        let start = anchor - span * ratio;
        Self {
            start,
            end: start + span,
        }
    }

    pub fn pan(&self, delta_seconds: f64) -> Self {
        Self {
            start: self.start + delta_seconds,
            end: self.end + delta_seconds,
        }
    }
}

fn plot_width() -> f64 {
    VIEW_WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn plot_height() -> f64 {
    VIEW_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

/// Upper bound actually used for projection; a zero domain still needs height.
fn effective_y_max(y_max: f64) -> f64 {
    if y_max.is_finite() && y_max > 0.0 {
        y_max
    } else {
        1.0
    }
}

pub fn project_x(seconds: f64, window: TimeWindow) -> f64 {
    MARGIN_LEFT + (seconds - window.start) / window.span() * plot_width()
}

/// Time span covered by `dx` screen pixels.
pub fn pixels_to_seconds(dx: f64, window: TimeWindow) -> f64 {
    dx / plot_width() * window.span()
}

pub fn unproject_x(x: f64, window: TimeWindow) -> f64 {
    window.start + (x - MARGIN_LEFT) / plot_width() * window.span()
}

/// Values above the domain are clipped to the top edge.
pub fn project_y(value_ms: f64, y_max: f64) -> f64 {
    let y_max = effective_y_max(y_max);
    let clamped = value_ms.clamp(0.0, y_max);
    MARGIN_TOP + plot_height() - clamped / y_max * plot_height()
}

pub fn plot_bounds() -> (f64, f64, f64, f64) {
    (
        MARGIN_LEFT,
        MARGIN_TOP,
        MARGIN_LEFT + plot_width(),
        MARGIN_TOP + plot_height(),
    )
}

/// SVG path data for a series, or `None` for an empty series. Points outside
/// `window` are still emitted; the plot's clip path hides them so lines
/// crossing the edge stay continuous.
pub fn line_path(points: &[(f64, f64)], window: TimeWindow, y_max: f64) -> Option<String> {
    let mut path = String::new();
    for (seconds, value_ms) in points {
        let cmd = if path.is_empty() { 'M' } else { 'L' };
        path.push_str(&format!(
            "{cmd}{:.1},{:.1} ",
            project_x(*seconds, window),
            project_y(*value_ms, y_max)
        ));
    }
    let trimmed = path.trim_end();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Smallest step keeping the tick count under `max_ticks`; past the table,
/// whole multiples of its largest step.
fn pick_step(steps: &[f64], span: f64, max_ticks: usize) -> f64 {
    let max_ticks = max_ticks as f64;
    if let Some(step) = steps.iter().copied().find(|step| span / step <= max_ticks) {
        return step;
    }
    let largest = steps.last().copied().unwrap_or(1.0);
    largest * (span / max_ticks / largest).ceil().max(1.0)
}

/// Value-axis ticks from zero to the domain maximum, labelled as durations.
pub fn y_ticks(y_max: f64) -> Vec<Tick> {
    let y_max = effective_y_max(y_max);
    let step = pick_step(Y_STEPS_MS, y_max, MAX_Y_TICKS);
    let mut ticks = Vec::new();
    let mut value = 0.0;
    while value <= y_max + f64::EPSILON {
        ticks.push(Tick {
            position: project_y(value, y_max),
            label: format_axis_ms(value),
        });
        value += step;
    }
    ticks
}

/// Time-axis ticks aligned to whole UTC steps, labelled `MM-DD HH:MM`.
pub fn x_ticks(window: TimeWindow) -> Vec<Tick> {
    let step = pick_step(X_STEPS_SECONDS, window.span(), MAX_X_TICKS);
    let mut seconds = (window.start / step).ceil() * step;
    let mut ticks = Vec::new();
    while seconds <= window.end {
        if let Some(ts) = from_unix_seconds(seconds) {
            ticks.push(Tick {
                position: project_x(seconds, window),
                label: format!(
                    "{:02}-{:02} {:02}:{:02}",
                    ts.month() as u8,
                    ts.day(),
                    ts.hour(),
                    ts.minute()
                ),
            });
        }
        seconds += step;
    }
    ticks
}

/// Index of the sorted `times` entry nearest to `target`.
pub fn nearest_index(times: &[f64], target: f64) -> Option<usize> {
    if times.is_empty() || !target.is_finite() {
        return None;
    }
    let idx = times.partition_point(|t| *t < target);
    if idx == 0 {
        return Some(0);
    }
    if idx >= times.len() {
        return Some(times.len() - 1);
    }
    if (times[idx] - target).abs() < (target - times[idx - 1]).abs() {
        Some(idx)
    } else {
        Some(idx - 1)
    }
}
