use crate::angle::RotationMode;
use crate::geometry::Point;
use crate::layout::{HIGHLIGHT_SLOT, PanelAlphas, WheelLayout, WheelState};
use crate::skill::SkillId;
use crate::slots::{AngleSet, Rotation, RotationDirection};
use crate::tween::{Fade, Running, Tween, WheelPose};
use std::time::Duration;

/// Where and how to draw one icon, relative to the wheel centre (y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconVisual {
    pub id: SkillId,
    pub offset: Point,
    pub scale: f64,
    pub alpha: f64,
}

/// Drives the wheel between layouts and rotations.
///
/// Two tracks run independently: icon motion and panel fade. Starting a
/// transition replaces the track in flight and picks up from the values last
/// sampled, so interrupted animations never jump.
#[derive(Debug, Clone)]
pub struct Animator {
    layout: WheelLayout,
    state: WheelState,
    contracted: AngleSet,
    expanded: AngleSet,
    pose: WheelPose,
    panels: PanelAlphas,
    motion: Option<Running<Tween>>,
    fade: Option<Running<Fade>>,
}

impl Animator {
    pub fn new(layout: WheelLayout, state: WheelState) -> Self {
        let mut animator = Self {
            contracted: AngleSet::new(layout.contracted.angles.iter().copied()),
            expanded: AngleSet::new(layout.expanded.angles.iter().copied()),
            panels: layout.panels(state),
            layout,
            state,
            pose: WheelPose::default(),
            motion: None,
            fade: None,
        };
        animator.pose = animator.target_pose();
        animator
    }

    pub fn state(&self) -> WheelState {
        self.state
    }

    pub fn layout(&self) -> &WheelLayout {
        &self.layout
    }

    pub fn icon_count(&self) -> usize {
        self.contracted.len()
    }

    pub fn pose(&self) -> &WheelPose {
        &self.pose
    }

    pub fn panels(&self) -> PanelAlphas {
        self.panels
    }

    pub fn is_animating(&self) -> bool {
        self.motion.is_some() || self.fade.is_some()
    }

    /// Target angles of the active layout.
    pub fn angles(&self) -> &AngleSet {
        match self.state {
            WheelState::Contracted => &self.contracted,
            WheelState::Expanded => &self.expanded,
        }
    }

    /// Icon occupying the highlight slot.
    pub fn highlighted(&self) -> Option<SkillId> {
        self.expanded.icon_at(HIGHLIGHT_SLOT)
    }

    pub fn set_state(&mut self, state: WheelState) -> bool {
        if self.state == state {
            return false;
        }
        log::debug!("Wheel {} -> {}", self.state, state);
        self.state = state;
        self.retarget(self.layout.toggle_mode);
        true
    }

    pub fn toggle(&mut self) -> WheelState {
        self.set_state(self.state.toggled());
        self.state
    }

    /// Moves every icon `steps` slots. Both layouts rotate together so a
    /// later toggle keeps the assignment.
    pub fn rotate(&mut self, direction: RotationDirection, steps: usize) -> bool {
        let len = self.icon_count();
        if len == 0 || steps % len == 0 {
            return false;
        }
        self.contracted.rotate(direction, steps);
        self.expanded.rotate(direction, steps);
        self.retarget(direction.sweep());
        true
    }

    /// Brings `icon` to the highlight slot the short way round.
    pub fn select(&mut self, icon: SkillId) -> Option<Rotation> {
        let plan = self.expanded.plan_selection(icon, HIGHLIGHT_SLOT)?;
        if !plan.is_noop() {
            log::debug!(
                "Selecting skill {} by {} step(s) {}",
                icon,
                plan.steps,
                plan.direction
            );
            self.rotate(plan.direction, plan.steps);
        }
        Some(plan)
    }

    /// Swaps in a new layout, keeping the current rotation where it still fits.
    pub fn relayout(&mut self, layout: WheelLayout) {
        let shift = self.contracted.shift();
        self.contracted = AngleSet::new(layout.contracted.angles.iter().copied());
        self.expanded = AngleSet::new(layout.expanded.angles.iter().copied());
        if !self.contracted.is_empty() {
            let steps = shift % self.contracted.len();
            self.contracted.rotate(RotationDirection::Left, steps);
            self.expanded.rotate(RotationDirection::Left, steps);
        }
        self.layout = layout;
        self.retarget(RotationMode::ShortestPath);
    }

    /// Steps both tracks by `dt`. Returns whether anything is still moving.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if let Some(motion) = self.motion.as_mut() {
            self.pose = motion.advance(dt);
            if motion.is_finished() {
                self.motion = None;
            }
        }
        if let Some(fade) = self.fade.as_mut() {
            self.panels = fade.advance(dt);
            if fade.is_finished() {
                self.fade = None;
            }
        }
        self.is_animating()
    }

    pub fn visuals(&self) -> Vec<IconVisual> {
        self.pose
            .icons
            .iter()
            .enumerate()
            .map(|(i, icon)| IconVisual {
                id: SkillId::from(i),
                offset: Point::from_polar(icon.angle, self.pose.radius),
                scale: icon.scale,
                alpha: icon.alpha,
            })
            .collect()
    }

    fn target_pose(&self) -> WheelPose {
        let preset = self.layout.preset(self.state);
        WheelPose {
            icons: self
                .angles()
                .angles()
                .iter()
                .map(|&a| preset.pose_at(a, self.layout.highlight_angle))
                .collect(),
            radius: preset.radius,
        }
    }

    fn retarget(&mut self, mode: RotationMode) {
        let target = self.target_pose();
        let panels = self.layout.panels(self.state);
        let duration = self.layout.duration;

        if duration.is_zero() {
            self.pose = target;
            self.panels = panels;
            self.motion = None;
            self.fade = None;
            return;
        }

        self.motion = Some(Running::new(Tween::new(&self.pose, target, mode, duration)));
        self.fade = Some(Running::new(Fade::new(self.panels, panels, duration)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle;
    use crate::layout::WheelSettings;

    const FRAME: Duration = Duration::from_millis(16);

    fn animator(count: usize) -> Animator {
        Animator::new(
            WheelLayout::new(count, &WheelSettings::default()),
            WheelState::Contracted,
        )
    }

    fn settle(animator: &mut Animator) {
        while animator.advance(FRAME) {}
    }

    fn angles(animator: &Animator) -> Vec<f64> {
        animator.pose().icons.iter().map(|i| i.angle).collect()
    }

    #[test]
    fn test_new_starts_at_rest() {
        let a = animator(5);
        assert!(!a.is_animating());
        assert_eq!(angles(&a), a.layout().contracted.angles);
        assert_eq!(a.panels(), a.layout().contracted_panels);
        assert_eq!(a.highlighted(), Some(SkillId::from(0)));
    }

    #[test]
    fn test_toggle_lands_exactly_on_expanded_layout() {
        let mut a = animator(5);
        assert_eq!(a.toggle(), WheelState::Expanded);
        assert!(a.is_animating());

        settle(&mut a);
        assert_eq!(angles(&a), a.layout().expanded.angles);
        assert_eq!(a.pose().radius, a.layout().expanded.radius);
        assert_eq!(a.pose().icons[0].scale, a.layout().expanded.scale.highlight);
        assert_eq!(a.panels(), a.layout().expanded_panels);
    }

    #[test]
    fn test_icon_alpha_fades_instead_of_jumping() {
        let mut settings = WheelSettings::default();
        settings.contracted.edge_alpha = Some(0.2);
        let mut a = Animator::new(WheelLayout::new(6, &settings), WheelState::Contracted);
        let alphas = |a: &Animator| a.visuals().iter().map(|v| v.alpha).collect::<Vec<_>>();

        // slot 3 sits directly opposite the highlight
        let before = alphas(&a);
        assert_eq!(before[0], 1.0);
        assert!((before[3] - 0.2).abs() < 1e-9);

        a.toggle();
        assert_eq!(alphas(&a), before);

        a.advance(Duration::from_millis(100));
        let mid = alphas(&a)[3];
        assert!(mid > 0.2 && mid < 1.0, "{mid}");

        settle(&mut a);
        assert!(alphas(&a).iter().all(|&alpha| alpha == 1.0));

        a.toggle();
        settle(&mut a);
        assert_eq!(alphas(&a), before);
    }

    #[test]
    fn test_set_same_state_is_noop() {
        let mut a = animator(3);
        assert!(!a.set_state(WheelState::Contracted));
        assert!(!a.is_animating());
    }

    #[test]
    fn test_interrupted_toggle_continues_from_current_pose() {
        let mut a = animator(6);
        a.toggle();
        for _ in 0..5 {
            a.advance(FRAME);
        }
        let mid = a.pose().clone();
        assert_ne!(angles(&a), a.layout().expanded.angles);

        a.toggle();
        assert_eq!(a.pose(), &mid);

        a.advance(Duration::from_millis(1));
        for (now, before) in a.pose().icons.iter().zip(&mid.icons) {
            assert!(angle::shortest_delta(before.angle, now.angle).abs() < 5.0);
        }

        settle(&mut a);
        assert_eq!(angles(&a), a.layout().contracted.angles);
    }

    #[test]
    fn test_rotate_right_sweeps_clockwise() {
        let mut a = animator(5);
        let before = angles(&a);
        assert!(a.rotate(RotationDirection::Right, 1));

        a.advance(Duration::from_millis(100));
        for (now, start) in angles(&a).iter().zip(&before) {
            assert!(angle::shortest_delta(*start, *now) < 0.0);
        }

        settle(&mut a);
        // icon 1 took slot 0
        assert_eq!(a.highlighted(), Some(SkillId::from(1)));
        assert_eq!(a.pose().icons[1].angle, a.layout().contracted.angles[0]);
    }

    #[test]
    fn test_rotate_full_turn_is_noop() {
        let mut a = animator(4);
        assert!(!a.rotate(RotationDirection::Left, 4));
        assert!(!a.is_animating());

        let mut empty = animator(0);
        assert!(!empty.rotate(RotationDirection::Left, 1));
    }

    #[test]
    fn test_select_brings_icon_to_highlight() {
        let mut a = animator(7);
        a.toggle();

        let plan = a.select(SkillId::from(5)).unwrap();
        assert_eq!(plan.direction, RotationDirection::Left);
        assert_eq!(plan.steps, 2);

        settle(&mut a);
        assert_eq!(a.highlighted(), Some(SkillId::from(5)));
        let icon = a.pose().icons[5];
        assert_eq!(icon.angle, a.layout().highlight_angle);
        assert_eq!(icon.scale, a.layout().expanded.scale.highlight);
    }

    #[test]
    fn test_select_highlighted_or_missing_icon() {
        let mut a = animator(4);
        assert!(a.select(SkillId::from(0)).unwrap().is_noop());
        assert!(!a.is_animating());
        assert_eq!(a.select(SkillId::from(9)), None);
    }

    #[test]
    fn test_zero_duration_snaps() {
        let settings = WheelSettings {
            duration_ms: 0,
            ..Default::default()
        };
        let mut a = Animator::new(WheelLayout::new(3, &settings), WheelState::Contracted);
        a.toggle();
        assert!(!a.is_animating());
        assert_eq!(angles(&a), a.layout().expanded.angles);
    }

    #[test]
    fn test_relayout_keeps_rotation() {
        let mut a = animator(4);
        a.rotate(RotationDirection::Left, 1);
        settle(&mut a);
        let highlighted = a.highlighted();

        let settings = WheelSettings {
            highlight_angle: 0.0,
            ..Default::default()
        };
        a.relayout(WheelLayout::new(4, &settings));
        settle(&mut a);
        assert_eq!(a.highlighted(), highlighted);
        assert_eq!(a.pose().icons.len(), 4);
    }

    #[test]
    fn test_visuals_follow_pose() {
        let a = animator(4);
        let visuals = a.visuals();
        assert_eq!(visuals.len(), 4);

        let top = visuals[0];
        assert_eq!(top.id, SkillId::from(0));
        assert!(top.offset.x.abs() < 1e-9);
        assert!((top.offset.y - a.layout().contracted.radius).abs() < 1e-9);
        assert_eq!(top.alpha, 1.0);
    }
}
