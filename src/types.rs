//! Core types shared by the fade engine and the animation modes.

use crate::time::TimeDuration;

/// A color in hue/saturation/brightness coordinates.
///
/// Hue is in degrees. It is kept in `0..360` at rest, but may temporarily sit
/// above 359 while a fade travels across the 0/360 seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hsb {
    /// Hue in degrees.
    pub hue: u16,

    /// Saturation, 0 (gray) to 255 (fully saturated).
    pub saturation: u8,

    /// Brightness, 0 (off) to 255 (full).
    pub brightness: u8,
}

impl Hsb {
    /// Creates a new HSB triple without normalizing the hue.
    #[inline]
    pub const fn new(hue: u16, saturation: u8, brightness: u8) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Returns the same color with hue taken modulo 360.
    #[inline]
    pub const fn normalized(self) -> Self {
        Self::new(self.hue % 360, self.saturation, self.brightness)
    }
}

/// Color space a fade interpolates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FadeSpace {
    /// Channels are interpolated directly.
    Rgb,

    /// Hue, saturation and brightness are interpolated, then converted.
    Hsb,
}

/// Timing tunables for fades and autonomous modes.
///
/// All fields may be changed at runtime; the light picks them up on its next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingConfig<D: TimeDuration> {
    /// Minimum time between two interpolation steps.
    pub fade_step_interval: D,

    /// Number of steps a fade is split into.
    pub fade_step_count: u16,

    /// How long an autonomous mode keeps a color before choosing the next one.
    pub hold: D,
}

impl<D: TimeDuration> TimingConfig<D> {
    /// Default milliseconds between fade steps.
    pub const DEFAULT_STEP_INTERVAL_MS: u64 = 50;

    /// Default number of fade steps.
    pub const DEFAULT_STEP_COUNT: u16 = 200;

    /// Default holding time in milliseconds.
    pub const DEFAULT_HOLD_MS: u64 = 1000;

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            fade_step_interval: D::from_millis(Self::DEFAULT_STEP_INTERVAL_MS),
            fade_step_count: Self::DEFAULT_STEP_COUNT,
            hold: D::from_millis(Self::DEFAULT_HOLD_MS),
        }
    }

    /// Sets the minimum time between fade steps.
    pub fn with_fade_step_interval(mut self, interval: D) -> Self {
        self.fade_step_interval = interval;
        self
    }

    /// Sets the number of steps per fade. Zero makes every fade instant.
    pub fn with_fade_step_count(mut self, steps: u16) -> Self {
        self.fade_step_count = steps;
        self
    }

    /// Sets the holding time between autonomous decisions.
    pub fn with_hold(mut self, hold: D) -> Self {
        self.hold = hold;
        self
    }

    /// Total time a full fade takes if ticked on schedule.
    pub fn fade_duration(&self) -> D {
        D::from_millis(self.fade_step_interval.as_millis() * u64::from(self.fade_step_count))
    }
}

impl<D: TimeDuration> Default for TimingConfig<D> {
    fn default() -> Self {
        Self::new()
    }
}
