//! Time-to-progress driver for motion along a path

use super::easing::{ease, Easing};

/// Shortest pass duration; shorter (or NaN) durations are raised to this
pub const MIN_DURATION: f32 = 1e-3;

/// Turns elapsed frame time into eased progress in [0, 1]
#[derive(Debug, Clone)]
pub struct PathAnimation {
    /// Seconds to travel the whole path
    pub duration: f32,
    /// Seconds since the start of the current pass
    pub elapsed: f32,
    pub easing: Easing,
    /// Restart from the beginning after reaching the end
    pub looping: bool,
    playing: bool,
}

impl Default for PathAnimation {
    fn default() -> Self {
        Self {
            duration: 10.0,
            elapsed: 0.0,
            easing: Easing::Linear,
            looping: true,
            playing: true,
        }
    }
}

impl PathAnimation {
    pub fn new(duration: f32, easing: Easing, looping: bool) -> Self {
        Self {
            duration: duration.max(MIN_DURATION),
            easing,
            looping,
            ..Default::default()
        }
    }

    /// Advance by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if !self.playing || !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let duration = self.span();
        self.elapsed += dt;
        if self.elapsed >= duration {
            if self.looping {
                self.elapsed %= duration;
            } else {
                self.elapsed = duration;
                self.playing = false;
            }
        }
    }

    /// Raw (un-eased) progress
    pub fn linear_progress(&self) -> f32 {
        (self.elapsed / self.span()).clamp(0.0, 1.0)
    }

    /// Eased progress to feed the curve evaluator
    pub fn progress(&self) -> f32 {
        ease(self.linear_progress(), self.easing)
    }

    /// Jump to raw progress (0.0 to 1.0)
    pub fn set_progress(&mut self, progress: f32) {
        self.elapsed = progress.clamp(0.0, 1.0) * self.span();
    }

    pub fn play(&mut self) {
        if self.is_complete() {
            self.elapsed = 0.0;
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_complete(&self) -> bool {
        !self.looping && self.elapsed >= self.span()
    }

    // `duration` is public, so guard every read against zero and NaN
    fn span(&self) -> f32 {
        self.duration.max(MIN_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_advances() {
        let mut anim = PathAnimation::new(4.0, Easing::Linear, false);
        anim.update(1.0);
        assert!((anim.progress() - 0.25).abs() < 0.0001);
        anim.update(1.0);
        assert!((anim.progress() - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_one_shot_stops_at_end() {
        let mut anim = PathAnimation::new(2.0, Easing::Linear, false);
        anim.update(5.0);
        assert_eq!(anim.progress(), 1.0);
        assert!(anim.is_complete());
        assert!(!anim.is_playing());

        anim.play();
        assert_eq!(anim.progress(), 0.0);
        assert!(anim.is_playing());
    }

    #[test]
    fn test_looping_wraps() {
        let mut anim = PathAnimation::new(2.0, Easing::Linear, true);
        anim.update(2.5);
        assert!((anim.progress() - 0.25).abs() < 0.0001);
        assert!(!anim.is_complete());
    }

    #[test]
    fn test_pause_holds_progress() {
        let mut anim = PathAnimation::new(2.0, Easing::Linear, true);
        anim.update(0.5);
        anim.pause();
        anim.update(0.5);
        assert!((anim.progress() - 0.25).abs() < 0.0001);
    }

    #[test]
    fn test_degenerate_duration_keeps_progress_finite() {
        let mut anim = PathAnimation::new(0.0, Easing::Linear, false);
        assert_eq!(anim.duration, MIN_DURATION);
        anim.update(0.016);
        assert_eq!(anim.progress(), 1.0);
        assert!(anim.is_complete());

        let mut anim = PathAnimation::new(f32::NAN, Easing::Linear, true);
        anim.update(0.5);
        assert!(anim.progress().is_finite());

        anim.duration = 0.0;
        anim.update(0.5);
        assert!(anim.progress().is_finite());
    }

    #[test]
    fn test_easing_applies() {
        let mut anim = PathAnimation::new(1.0, Easing::EaseIn, false);
        anim.set_progress(0.5);
        assert!((anim.linear_progress() - 0.5).abs() < 0.0001);
        assert!((anim.progress() - 0.25).abs() < 0.0001);
    }
}
