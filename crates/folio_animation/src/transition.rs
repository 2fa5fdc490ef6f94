//! Reveal transitions
//!
//! A revealed block fades in while sliding up from a small offset. The
//! transition is a pure function of elapsed time so hosts can sample it from
//! whatever frame loop they own.

use std::time::Duration;

/// Easing curve applied to transition progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    Linear,
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Sampled transition values
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealFrame {
    pub opacity: f32,
    /// Downward offset in logical pixels
    pub offset_y: f32,
}

impl RevealFrame {
    pub const HIDDEN_SECTION: RevealFrame = RevealFrame {
        opacity: 0.0,
        offset_y: 40.0,
    };

    pub const SETTLED: RevealFrame = RevealFrame {
        opacity: 1.0,
        offset_y: 0.0,
    };
}

/// Fade and slide-in used when a block becomes visible
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTransition {
    pub duration: Duration,
    pub from_offset_y: f32,
    pub easing: Easing,
}

impl RevealTransition {
    /// Content sections
    pub const SECTION: RevealTransition = RevealTransition {
        duration: Duration::from_millis(1000),
        from_offset_y: 40.0,
        easing: Easing::EaseOutCubic,
    };

    /// Hero photo and intro text
    pub const HERO: RevealTransition = RevealTransition {
        duration: Duration::from_millis(700),
        from_offset_y: 32.0,
        easing: Easing::EaseOutCubic,
    };

    /// Values `elapsed` after the block was revealed
    pub fn sample(&self, elapsed: Duration) -> RevealFrame {
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f32() / self.duration.as_secs_f32()
        };
        let eased = self.easing.apply(progress);
        RevealFrame {
            opacity: eased,
            offset_y: self.from_offset_y * (1.0 - eased),
        }
    }

    /// Values while the block is still hidden
    pub fn hidden(&self) -> RevealFrame {
        RevealFrame {
            opacity: 0.0,
            offset_y: self.from_offset_y,
        }
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

impl Default for RevealTransition {
    fn default() -> Self {
        Self::SECTION
    }
}
