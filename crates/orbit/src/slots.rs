use crate::angle::{self, RotationMode};
use crate::skill::SkillId;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RotationDirection {
    /// Every icon moves one slot counter-clockwise.
    #[strum(serialize = "left", serialize = "l", serialize = "ccw")]
    Left,
    /// Every icon moves one slot clockwise.
    #[strum(serialize = "right", serialize = "r", serialize = "cw")]
    Right,
}

impl RotationDirection {
    /// Sweep policy that keeps every icon moving the same way.
    pub fn sweep(self) -> RotationMode {
        match self {
            Self::Left => RotationMode::ForceCounterClockwise,
            Self::Right => RotationMode::ForceClockwise,
        }
    }
}

/// Circular shift by `steps` positions. `Left` moves element `i + 1` into `i`.
pub fn rotate_slots<T>(items: &mut [T], direction: RotationDirection, steps: usize) {
    if items.is_empty() {
        return;
    }
    let steps = steps % items.len();
    match direction {
        RotationDirection::Left => items.rotate_left(steps),
        RotationDirection::Right => items.rotate_right(steps),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    pub direction: RotationDirection,
    pub steps: usize,
}

impl Rotation {
    pub fn is_noop(&self) -> bool {
        self.steps == 0
    }
}

/// Shortest rotation that carries `slot` onto `target` in a ring of `len`.
///
/// Ties go clockwise. `None` when either slot is out of range.
pub fn plan_selection(len: usize, slot: usize, target: usize) -> Option<Rotation> {
    if slot >= len || target >= len {
        return None;
    }
    let clockwise = (slot + len - target) % len;
    let counter_clockwise = (len - clockwise) % len;

    Some(if clockwise <= counter_clockwise {
        Rotation {
            direction: RotationDirection::Right,
            steps: clockwise,
        }
    } else {
        Rotation {
            direction: RotationDirection::Left,
            steps: counter_clockwise,
        }
    })
}

/// Per-icon target angles, one per skill.
///
/// Rotating the set hands every icon its neighbour's angle. `shift` records
/// the net left rotation so the icon sitting on any preset slot is known
/// without searching.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleSet {
    angles: Vec<f64>,
    shift: usize,
}

impl AngleSet {
    pub fn new(angles: impl IntoIterator<Item = f64>) -> Self {
        Self {
            angles: angles.into_iter().map(angle::normalize).collect(),
            shift: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn shift(&self) -> usize {
        self.shift
    }

    pub fn rotate(&mut self, direction: RotationDirection, steps: usize) {
        let len = self.len();
        if len == 0 {
            return;
        }
        rotate_slots(&mut self.angles, direction, steps);
        let steps = steps % len;
        self.shift = match direction {
            RotationDirection::Left => (self.shift + steps) % len,
            RotationDirection::Right => (self.shift + len - steps) % len,
        };
    }

    /// Icon currently holding the preset angle of `slot`.
    pub fn icon_at(&self, slot: usize) -> Option<SkillId> {
        let len = self.len();
        (slot < len).then(|| SkillId::from((slot + len - self.shift) % len))
    }

    /// Preset slot whose angle `icon` currently holds.
    pub fn slot_of(&self, icon: SkillId) -> Option<usize> {
        let len = self.len();
        (icon.index() < len).then(|| (icon.index() + self.shift) % len)
    }

    pub fn plan_selection(&self, icon: SkillId, target_slot: usize) -> Option<Rotation> {
        plan_selection(self.len(), self.slot_of(icon)?, target_slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_left_then_right_restores_order() {
        let original = vec![10, 20, 30, 40, 50];
        for steps in 0..12 {
            let mut items = original.clone();
            rotate_slots(&mut items, RotationDirection::Left, steps);
            rotate_slots(&mut items, RotationDirection::Right, steps);
            assert_eq!(items, original, "steps = {steps}");
        }
    }

    #[test]
    fn test_rotate_left_pulls_next_element() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        rotate_slots(&mut items, RotationDirection::Left, 1);
        assert_eq!(items, vec!['b', 'c', 'd', 'a']);
        rotate_slots(&mut items, RotationDirection::Right, 6);
        assert_eq!(items, vec!['d', 'a', 'b', 'c']);
    }

    #[test]
    fn test_rotate_empty_is_noop() {
        let mut items: Vec<f64> = Vec::new();
        rotate_slots(&mut items, RotationDirection::Left, 3);
        assert!(items.is_empty());
    }

    #[test]
    fn test_plan_selection_prefers_fewest_steps() {
        let plan = plan_selection(8, 2, 0).unwrap();
        assert_eq!(plan.direction, RotationDirection::Right);
        assert_eq!(plan.steps, 2);

        let plan = plan_selection(8, 6, 0).unwrap();
        assert_eq!(plan.direction, RotationDirection::Left);
        assert_eq!(plan.steps, 2);

        assert!(plan_selection(8, 0, 0).unwrap().is_noop());
        assert_eq!(plan_selection(8, 8, 0), None);
    }

    #[test]
    fn test_plan_selection_tie_goes_clockwise() {
        let plan = plan_selection(6, 3, 0).unwrap();
        assert_eq!(plan.direction, RotationDirection::Right);
        assert_eq!(plan.steps, 3);
    }

    #[test]
    fn test_plan_selection_is_minimal_for_every_slot() {
        for len in 1..10 {
            for slot in 0..len {
                let plan = plan_selection(len, slot, 0).unwrap();
                let clockwise = slot;
                let counter_clockwise = (len - slot) % len;
                assert_eq!(plan.steps, clockwise.min(counter_clockwise));
                if clockwise == counter_clockwise {
                    assert_eq!(plan.direction, RotationDirection::Right);
                }
            }
        }
    }

    #[test]
    fn test_angle_set_tracks_slot_owners() {
        let mut set = AngleSet::new([90.0, 180.0, 270.0, 360.0]);
        assert_eq!(set.angles(), &[90.0, 180.0, 270.0, 0.0]);
        assert_eq!(set.icon_at(0), Some(SkillId::from(0)));

        set.rotate(RotationDirection::Left, 1);
        assert_eq!(set.angles(), &[180.0, 270.0, 0.0, 90.0]);
        // icon 3 now holds slot 0's angle
        assert_eq!(set.icon_at(0), Some(SkillId::from(3)));
        assert_eq!(set.slot_of(SkillId::from(0)), Some(1));

        set.rotate(RotationDirection::Right, 5);
        assert_eq!(set.shift(), 0);
        assert_eq!(set.angles(), &[90.0, 180.0, 270.0, 0.0]);
    }

    #[test]
    fn test_angle_set_plan_brings_icon_to_highlight() {
        let mut set = AngleSet::new([0.0, 72.0, 144.0, 216.0, 288.0]);
        let icon = SkillId::from(2);
        let plan = set.plan_selection(icon, 0).unwrap();
        set.rotate(plan.direction, plan.steps);
        assert_eq!(set.icon_at(0), Some(icon));
        assert_eq!(set.angles()[icon.index()], 0.0);
    }
}
