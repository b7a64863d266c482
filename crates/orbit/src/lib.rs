//! Angle animation engine for radial skill wheels.
//!
//! Everything here is engine agnostic: callers feed frame deltas into an
//! [`Animator`] and read back per-icon visuals to draw.

pub mod angle;
pub mod animator;
pub mod command;
pub mod geometry;
pub mod layout;
pub mod macros;
pub mod skill;
pub mod slots;
pub mod tween;

pub use angle::{RotationMode, compute_delta};
pub use animator::{Animator, IconVisual};
pub use command::Command;
pub use geometry::Point;
pub use layout::{PanelAlphas, WheelLayout, WheelSettings, WheelState};
pub use skill::SkillId;
pub use slots::{AngleSet, Rotation, RotationDirection};
