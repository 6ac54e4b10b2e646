mod base;

use std::{
    ops::Not,
    time::{Duration, Instant},
};

use config::Curve;

use base::Animation;

use crate::snapshot::Snapshot;

/// Hinge rotation in degrees when the flap hangs fully under the hinge.
pub const UNFOLDED_ANGLE: f64 = -180.;
pub const FOLDED_ANGLE: f64 = 0.;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FoldDirection {
    Fold,
    Unfold,
}
impl Not for FoldDirection {
    type Output = FoldDirection;

    fn not(self) -> Self::Output {
        match self {
            FoldDirection::Fold => Self::Unfold,
            FoldDirection::Unfold => Self::Fold,
        }
    }
}
impl From<bool> for FoldDirection {
    /// `true` means "currently folded", so the next move unfolds.
    fn from(is_folded: bool) -> Self {
        if is_folded {
            Self::Unfold
        } else {
            Self::Fold
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

/// Per tick values, all derived from progress and the run's fixed inputs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub raw_progress: f64,
    pub progress: f64,
    pub rotation: f64,
    pub shadow_alpha: u8,
    pub height: i32,
}

/// One fold or unfold in flight. Dropped on completion or cancel, taking the
/// snapshot pieces with it.
#[derive(Debug)]
pub struct AnimationRun {
    pub direction: FoldDirection,
    pub start_angle: f64,
    pub end_angle: f64,
    pub initial_height: i32,
    pub swap_done: bool,

    /// face shown on the flap back once the hinge passes vertical
    pub(crate) mirrored: Snapshot,

    base_animation: Animation,
}
impl AnimationRun {
    pub(crate) fn new(
        direction: FoldDirection,
        start_time: Instant,
        duration: Duration,
        curve: Curve,
        initial_height: i32,
        mirrored: Snapshot,
    ) -> Self {
        let (start_angle, end_angle) = match direction {
            FoldDirection::Fold => (UNFOLDED_ANGLE, FOLDED_ANGLE),
            FoldDirection::Unfold => (FOLDED_ANGLE, UNFOLDED_ANGLE),
        };
        Self {
            direction,
            start_angle,
            end_angle,
            initial_height,
            swap_done: false,
            mirrored,
            base_animation: Animation::new(start_time, duration, curve),
        }
    }

    pub fn start_time(&self) -> Instant {
        self.base_animation.start_time
    }

    pub fn progress(&self) -> f64 {
        self.base_animation.progress()
    }

    pub fn is_finished(&self) -> bool {
        self.base_animation.raw_progress() >= 1.
    }

    /// Advance to `now` and compute the frame. `height_bounds` is
    /// `(cover_height, 2 * cover_height)`.
    pub(crate) fn refresh(&mut self, now: Instant, height_bounds: (i32, i32)) -> Frame {
        self.base_animation.refresh(now);
        let raw_progress = self.base_animation.raw_progress();
        let p = self.base_animation.progress();

        let rotation = calculate_transition(p, (self.start_angle, self.end_angle));
        let initial = self.initial_height;
        let (shadow_alpha, height) = match self.direction {
            FoldDirection::Fold => (
                (255. * p) as u8,
                (initial as f64 - (initial / 2) as f64 * p) as i32,
            ),
            FoldDirection::Unfold => (
                (255. * (1. - p)) as u8,
                (initial as f64 + initial as f64 * p) as i32,
            ),
        };

        Frame {
            raw_progress,
            progress: p,
            rotation,
            shadow_alpha,
            height: height.clamp(height_bounds.0, height_bounds.1.max(height_bounds.0)),
        }
    }

    /// True exactly once: on the first refresh at or past the half way point.
    pub(crate) fn take_swap(&mut self) -> bool {
        if !self.swap_done && self.base_animation.raw_progress() >= 0.5 {
            self.swap_done = true;
            true
        } else {
            false
        }
    }
}

pub fn calculate_transition(y: f64, range: (f64, f64)) -> f64 {
    range.0 + (range.1 - range.0) * y
}
