use crate::angle::{self, FULL_TURN, QUARTER_TURN, RotationMode};
use crate::tween::IconPose;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

/// Preset slot that sits on the highlight angle in both layouts.
pub const HIGHLIGHT_SLOT: usize = 0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum WheelState {
    #[default]
    #[strum(serialize = "contracted", serialize = "contract")]
    Contracted,
    #[strum(serialize = "expanded", serialize = "expand")]
    Expanded,
}

impl WheelState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Contracted => Self::Expanded,
            Self::Expanded => Self::Contracted,
        }
    }
}

/// Opacity of the two overlay panels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelAlphas {
    /// Disc drawn behind the icons.
    pub base: f64,
    /// Label panel for the highlighted skill.
    pub detail: f64,
}

impl PanelAlphas {
    pub fn new(base: f64, detail: f64) -> Self {
        Self { base, detail }
    }

    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            base: angle::lerp(self.base, to.base, t),
            detail: angle::lerp(self.detail, to.detail, t),
        }
    }
}

/// Size and opacity as a function of distance from the highlight angle.
///
/// Full `highlight` value on the highlight, falling linearly to `edge` at
/// 90 degrees. Alpha stays 1 inside the front half circle and fades to
/// `edge_alpha` directly opposite the highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePolicy {
    pub highlight: f64,
    pub edge: f64,
    pub edge_alpha: f64,
}

impl ScalePolicy {
    pub fn scale_at(&self, angle: f64, highlight_angle: f64) -> f64 {
        let distance = angle::shortest_delta(highlight_angle, angle).abs();
        angle::lerp(self.highlight, self.edge, (distance / QUARTER_TURN).min(1.0))
    }

    pub fn alpha_at(&self, angle: f64, highlight_angle: f64) -> f64 {
        let distance = angle::shortest_delta(highlight_angle, angle).abs();
        let behind = ((distance - QUARTER_TURN) / QUARTER_TURN).clamp(0.0, 1.0);
        angle::lerp(1.0, self.edge_alpha, behind)
    }
}

/// Slot angles, radius, and scale policy for one [`WheelState`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPreset {
    pub angles: Vec<f64>,
    pub radius: f64,
    pub scale: ScalePolicy,
}

impl LayoutPreset {
    pub fn pose_at(&self, angle: f64, highlight_angle: f64) -> IconPose {
        IconPose::new(
            angle,
            self.scale.scale_at(angle, highlight_angle),
            self.scale.alpha_at(angle, highlight_angle),
        )
    }
}

/// Evenly spaced full circle starting on the highlight.
pub fn contracted_angles(count: usize, highlight_angle: f64) -> Vec<f64> {
    let step = if count == 0 { 0.0 } else { FULL_TURN / count as f64 };
    (0..count)
        .map(|k| angle::normalize(highlight_angle + k as f64 * step))
        .collect()
}

/// Half circle centred on the highlight.
///
/// Slots `1..=count / 2` fan counter-clockwise, the rest fan clockwise back
/// towards slot 0, so stepping through slots always travels the same way.
pub fn expanded_angles(count: usize, highlight_angle: f64) -> Vec<f64> {
    let ccw = count / 2;
    let step = if ccw == 0 { 0.0 } else { QUARTER_TURN / ccw as f64 };
    (0..count)
        .map(|k| {
            let offset = if k <= ccw {
                k as f64 * step
            } else {
                -((count - k) as f64) * step
            };
            angle::normalize(highlight_angle + offset)
        })
        .collect()
}

/// Optional per-state overrides from the config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PresetSettings {
    pub radius: Option<f64>,
    pub highlight_scale: Option<f64>,
    pub edge_scale: Option<f64>,
    pub edge_alpha: Option<f64>,
    /// Explicit slot angles in degrees, slot 0 first.
    pub angles: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PanelSettings {
    pub contracted: PanelAlphas,
    pub expanded: PanelAlphas,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            contracted: PanelAlphas::new(0.35, 0.0),
            expanded: PanelAlphas::new(0.85, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelSettings {
    /// Where slot 0 sits, in degrees counter-clockwise from the right.
    pub highlight_angle: f64,
    pub duration_ms: u64,
    /// Sweep used when switching between layouts.
    pub toggle_mode: RotationMode,
    pub initial_state: WheelState,
    pub contracted: PresetSettings,
    pub expanded: PresetSettings,
    pub panels: PanelSettings,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            highlight_angle: 90.0,
            duration_ms: 250,
            toggle_mode: RotationMode::ShortestPath,
            initial_state: WheelState::Contracted,
            contracted: PresetSettings::default(),
            expanded: PresetSettings::default(),
            panels: PanelSettings::default(),
        }
    }
}

/// Everything the animator needs to place the icons.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelLayout {
    pub highlight_angle: f64,
    pub duration: Duration,
    pub toggle_mode: RotationMode,
    pub contracted: LayoutPreset,
    pub expanded: LayoutPreset,
    pub contracted_panels: PanelAlphas,
    pub expanded_panels: PanelAlphas,
}

impl WheelLayout {
    pub fn new(count: usize, settings: &WheelSettings) -> Self {
        let highlight_angle = angle::normalize(settings.highlight_angle);
        let c = &settings.contracted;
        let e = &settings.expanded;

        let contracted = LayoutPreset {
            angles: resolve_angles(
                WheelState::Contracted,
                count,
                c.angles.as_deref(),
                contracted_angles(count, highlight_angle),
            ),
            radius: c.radius.unwrap_or(90.0),
            scale: ScalePolicy {
                highlight: c.highlight_scale.unwrap_or(1.0),
                edge: c.edge_scale.unwrap_or(1.0),
                edge_alpha: c.edge_alpha.unwrap_or(1.0),
            },
        };

        let expanded = LayoutPreset {
            angles: resolve_angles(
                WheelState::Expanded,
                count,
                e.angles.as_deref(),
                expanded_angles(count, highlight_angle),
            ),
            radius: e.radius.unwrap_or(140.0),
            scale: ScalePolicy {
                highlight: e.highlight_scale.unwrap_or(1.4),
                edge: e.edge_scale.unwrap_or(0.75),
                edge_alpha: e.edge_alpha.unwrap_or(0.35),
            },
        };

        Self {
            highlight_angle,
            duration: Duration::from_millis(settings.duration_ms),
            toggle_mode: settings.toggle_mode,
            contracted,
            expanded,
            contracted_panels: settings.panels.contracted,
            expanded_panels: settings.panels.expanded,
        }
    }

    pub fn preset(&self, state: WheelState) -> &LayoutPreset {
        match state {
            WheelState::Contracted => &self.contracted,
            WheelState::Expanded => &self.expanded,
        }
    }

    pub fn panels(&self, state: WheelState) -> PanelAlphas {
        match state {
            WheelState::Contracted => self.contracted_panels,
            WheelState::Expanded => self.expanded_panels,
        }
    }
}

fn resolve_angles(
    state: WheelState,
    count: usize,
    custom: Option<&[f64]>,
    generated: Vec<f64>,
) -> Vec<f64> {
    match custom {
        Some(angles) if angles.len() == count => angles.iter().copied().map(angle::normalize).collect(),
        Some(angles) => {
            log::warn!(
                "{} layout lists {} angles but there are {} skills; using generated layout",
                state,
                angles.len(),
                count
            );
            generated
        }
        None => generated,
    }
}
