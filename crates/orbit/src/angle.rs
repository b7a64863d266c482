use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

pub const FULL_TURN: f64 = 360.0;
pub const HALF_TURN: f64 = 180.0;
pub const QUARTER_TURN: f64 = 90.0;

/// How an angular transition picks its sweep direction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RotationMode {
    #[default]
    #[strum(serialize = "shortest", serialize = "ShortestPath")]
    ShortestPath,
    #[strum(serialize = "clockwise", serialize = "cw", serialize = "ForceClockwise")]
    ForceClockwise,
    #[strum(
        serialize = "counterclockwise",
        serialize = "ccw",
        serialize = "ForceCounterClockwise"
    )]
    ForceCounterClockwise,
}

/// Wraps any angle into `[0, 360)`.
pub fn normalize(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negatives up to exactly 360
    if d >= FULL_TURN { 0.0 } else { d }
}

/// Signed shortest difference from `from` to `to`, in `(-180, 180]`.
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(FULL_TURN);
    if d > HALF_TURN { d - FULL_TURN } else { d }
}

/// Signed sweep from `from` to `to` under `mode`.
///
/// Clockwise is negative (angles grow counter-clockwise), so
/// [`RotationMode::ForceClockwise`] never yields a positive delta and
/// [`RotationMode::ForceCounterClockwise`] never yields a negative one.
pub fn compute_delta(from: f64, to: f64, mode: RotationMode) -> f64 {
    let delta = shortest_delta(from, to);
    match mode {
        RotationMode::ForceClockwise if delta > 0.0 => delta - FULL_TURN,
        RotationMode::ForceCounterClockwise if delta < 0.0 => delta + FULL_TURN,
        _ => delta,
    }
}

/// Cubic ease `3t² - 2t³`, input clamped to `[0, 1]`.
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f64; 12] = [
        0.0, 1.0, 45.0, 89.5, 90.0, 179.0, 180.0, 181.0, 270.0, 359.9, -30.0, 725.0,
    ];

    #[test]
    fn test_normalize_wraps_into_range() {
        assert_eq!(normalize(360.0), 0.0);
        assert_eq!(normalize(-90.0), 270.0);
        assert_eq!(normalize(725.0), 5.0);
        assert_eq!(normalize(-1e-17), 0.0);
    }

    #[test]
    fn test_shortest_delta_range() {
        for from in SAMPLES {
            for to in SAMPLES {
                let d = shortest_delta(from, to);
                assert!(d > -HALF_TURN && d <= HALF_TURN, "{from} -> {to} gave {d}");
            }
        }
        assert_eq!(shortest_delta(0.0, 180.0), 180.0);
        assert_eq!(shortest_delta(180.0, 0.0), 180.0);
        assert_eq!(shortest_delta(350.0, 10.0), 20.0);
        assert_eq!(shortest_delta(10.0, 350.0), -20.0);
    }

    #[test]
    fn test_forced_modes_keep_direction() {
        for from in SAMPLES {
            for to in SAMPLES {
                let cw = compute_delta(from, to, RotationMode::ForceClockwise);
                let ccw = compute_delta(from, to, RotationMode::ForceCounterClockwise);
                assert!(cw <= 0.0, "clockwise {from} -> {to} gave {cw}");
                assert!(ccw >= 0.0, "counter-clockwise {from} -> {to} gave {ccw}");
                assert!(cw > -FULL_TURN && ccw < FULL_TURN);
            }
        }
    }

    #[test]
    fn test_forced_modes_go_the_long_way() {
        assert_eq!(compute_delta(10.0, 30.0, RotationMode::ForceClockwise), -340.0);
        assert_eq!(compute_delta(30.0, 10.0, RotationMode::ForceCounterClockwise), 340.0);
        assert_eq!(compute_delta(0.0, 180.0, RotationMode::ForceClockwise), -180.0);
        assert_eq!(compute_delta(30.0, 10.0, RotationMode::ShortestPath), -20.0);
    }

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert_eq!(smoothstep(-2.0), 0.0);
        assert_eq!(smoothstep(3.0), 1.0);
        assert!(smoothstep(0.25) < 0.25);
        assert!(smoothstep(0.75) > 0.75);
    }

    #[test]
    fn test_rotation_mode_deserialization() {
        let cases = vec![
            ("\"shortest\"", RotationMode::ShortestPath),
            ("\"CW\"", RotationMode::ForceClockwise),
            ("\"clockwise\"", RotationMode::ForceClockwise),
            ("\"ccw\"", RotationMode::ForceCounterClockwise),
            ("\"ForceCounterClockwise\"", RotationMode::ForceCounterClockwise),
        ];

        for (json, expected) in cases {
            let deserialized: RotationMode = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }
}
