//! Command-based control for mood lights.
//!
//! A remote controller or a button handler can build [`MoodAction`]s and
//! hand them to [`MoodLight::handle_action`](crate::MoodLight::handle_action)
//! instead of calling the setters one by one.

use crate::Rgb;
use crate::mode::Mode;
use crate::time::TimeDuration;
use crate::types::{Hsb, TimingConfig};

/// Actions for controlling a light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoodAction<D: TimeDuration> {
    /// Set an RGB color instantly.
    SetRgb(Rgb),
    /// Set an HSB color instantly.
    SetHsb(Hsb),
    /// Fade to an RGB color.
    FadeRgb(Rgb),
    /// Fade to an HSB color.
    FadeHsb {
        target: Hsb,
        shortest: bool,
    },
    /// Select the animation mode.
    SetMode(Mode),
    /// Replace all timing tunables.
    SetTiming(TimingConfig<D>),
    /// Change the time between fade steps.
    SetFadingSpeed(D),
    /// Change the number of steps per fade.
    SetFadingSteps(u16),
    /// Change the holding time of autonomous modes.
    SetHoldingTime(D),
}

impl<D: TimeDuration> From<Mode> for MoodAction<D> {
    fn from(mode: Mode) -> Self {
        MoodAction::SetMode(mode)
    }
}
