//! Easing curves applied to path progress

use serde::Deserialize;

/// How progress accelerates along the path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// Slow start, accelerate
    EaseIn,
    /// Fast start, decelerate
    EaseOut,
    /// Slow at both ends
    EaseInOut,
    /// Cubic Hermite smoothstep, gentler than EaseInOut
    SmoothStep,
}

/// Apply easing function to a value t in range [0, 1]
pub fn ease(t: f32, easing: Easing) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t).powi(2),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::SmoothStep,
    ];

    #[test]
    fn test_ease_bounds() {
        for easing in ALL {
            assert!(ease(0.0, easing).abs() < 0.0001, "Easing {:?} should start at 0", easing);
            assert!(
                (ease(1.0, easing) - 1.0).abs() < 0.0001,
                "Easing {:?} should end at 1",
                easing
            );
        }
    }

    #[test]
    fn test_ease_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = ease(i as f32 / 100.0, easing);
                assert!(v >= prev - 0.0001, "Easing {:?} should be monotonic", easing);
                prev = v;
            }
        }
    }

    #[test]
    fn test_ease_clamps_input() {
        assert_eq!(ease(-0.5, Easing::Linear), 0.0);
        assert_eq!(ease(1.5, Easing::SmoothStep), 1.0);
    }

    #[test]
    fn test_easing_names() {
        let easing: Easing = serde_yaml::from_str("ease_in_out").unwrap();
        assert_eq!(easing, Easing::EaseInOut);
        let easing: Easing = serde_yaml::from_str("smooth_step").unwrap();
        assert_eq!(easing, Easing::SmoothStep);
    }
}
