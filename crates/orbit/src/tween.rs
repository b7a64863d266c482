//! Frame-independent transitions.
//!
//! A transition is plain data: it is built once from a start and a target and
//! then sampled with the elapsed time. Nothing here owns a clock.

use crate::angle::{self, RotationMode};
use crate::layout::PanelAlphas;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconPose {
    /// Degrees, `[0, 360)`.
    pub angle: f64,
    pub scale: f64,
    pub alpha: f64,
}

impl IconPose {
    pub fn new(angle: f64, scale: f64, alpha: f64) -> Self {
        Self {
            angle: angle::normalize(angle),
            scale,
            alpha,
        }
    }
}

/// Poses of every icon plus the shared orbit radius.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WheelPose {
    pub icons: Vec<IconPose>,
    pub radius: f64,
}

pub trait Timeline {
    type Output;

    fn duration(&self) -> Duration;

    fn sample(&self, elapsed: Duration) -> Self::Output;
}

/// Linear progress in `[0, 1]`. A zero duration is already complete.
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Icon motion between two wheel poses.
#[derive(Debug, Clone)]
pub struct Tween {
    start: WheelPose,
    target: WheelPose,
    deltas: Vec<f64>,
    duration: Duration,
}

impl Tween {
    /// Icons missing from `start` (the skill list grew) begin on their target.
    pub fn new(start: &WheelPose, target: WheelPose, mode: RotationMode, duration: Duration) -> Self {
        let icons: Vec<IconPose> = target
            .icons
            .iter()
            .enumerate()
            .map(|(i, goal)| start.icons.get(i).copied().unwrap_or(*goal))
            .collect();

        let deltas = icons
            .iter()
            .zip(&target.icons)
            .map(|(from, to)| angle::compute_delta(from.angle, to.angle, mode))
            .collect();

        Self {
            start: WheelPose {
                icons,
                radius: start.radius,
            },
            target,
            deltas,
            duration,
        }
    }
}

impl Timeline for Tween {
    type Output = WheelPose;

    fn duration(&self) -> Duration {
        self.duration
    }

    fn sample(&self, elapsed: Duration) -> WheelPose {
        let t = progress(elapsed, self.duration);
        if t >= 1.0 {
            return self.target.clone();
        }
        let eased = angle::smoothstep(t);

        let icons = self
            .start
            .icons
            .iter()
            .zip(&self.target.icons)
            .zip(&self.deltas)
            .map(|((from, to), delta)| {
                IconPose::new(
                    from.angle + delta * eased,
                    angle::lerp(from.scale, to.scale, eased),
                    angle::lerp(from.alpha, to.alpha, eased),
                )
            })
            .collect();

        WheelPose {
            icons,
            radius: angle::lerp(self.start.radius, self.target.radius, eased),
        }
    }
}

/// Opacity transition for the overlay panels.
#[derive(Debug, Clone)]
pub struct Fade {
    start: PanelAlphas,
    target: PanelAlphas,
    duration: Duration,
}

impl Fade {
    pub fn new(start: PanelAlphas, target: PanelAlphas, duration: Duration) -> Self {
        Self {
            start,
            target,
            duration,
        }
    }
}

impl Timeline for Fade {
    type Output = PanelAlphas;

    fn duration(&self) -> Duration {
        self.duration
    }

    fn sample(&self, elapsed: Duration) -> PanelAlphas {
        let t = progress(elapsed, self.duration);
        if t >= 1.0 {
            return self.target;
        }
        self.start.lerp(&self.target, angle::smoothstep(t))
    }
}

/// A timeline in flight.
#[derive(Debug, Clone)]
pub struct Running<T> {
    timeline: T,
    elapsed: Duration,
}

impl<T: Timeline> Running<T> {
    pub fn new(timeline: T) -> Self {
        Self {
            timeline,
            elapsed: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, dt: Duration) -> T::Output {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.timeline.sample(self.elapsed)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.timeline.duration()
    }
}
