//! Mood light engine with fade stepping and autonomous mode timing.
//!
//! Provides [`MoodLight`], which owns the current color of a single RGB light,
//! advances fades and animation modes on each [`tick`](MoodLight::tick), and
//! pushes the result to an [`RgbLed`]. Also defines the [`RgbLed`] trait for
//! hardware abstraction.

use rand::RngCore;

use crate::colors::{self, rgb_from_u32};
use crate::command::MoodAction;
use crate::fade::{FadeTransition, coords_to_hsb, coords_to_rgb};
use crate::mode::{Mode, ModeDecision};
use crate::time::{TimeDuration, TimeInstant, TimeSource, has_elapsed};
use crate::types::{FadeSpace, Hsb, TimingConfig};
use crate::{COLOR_OFF, Rgb};

/// Trait for abstracting RGB LED hardware.
///
/// Implement this for your output stage (PWM, SPI, a bulb's color channel...)
/// to let the light drive it.
pub trait RgbLed {
    /// Sets the three channel intensities.
    ///
    /// Called once per tick whether or not the color changed. A channel value
    /// of 0 means "off", not "leave unchanged". This method cannot fail;
    /// handle hardware errors internally.
    fn set_color(&mut self, color: Rgb);
}

/// Drives a single RGB light through fades and autonomous animation modes.
///
/// The light keeps its color both as RGB and as HSB. Changes made in HSB
/// space keep both in sync; changes made in RGB space leave the HSB record
/// untouched.
///
/// # Type Parameters
/// * `I` - Time instant type
/// * `L` - LED implementation type
/// * `R` - Random number generator used by the autonomous modes
pub struct MoodLight<I: TimeInstant, L: RgbLed, R: RngCore> {
    led: L,
    rng: R,
    mode: Mode,
    timing: TimingConfig<I::Duration>,
    rgb: Rgb,
    hsb: Hsb,
    fade: Option<FadeTransition>,
    last_update: I,
}

impl<I: TimeInstant, L: RgbLed, R: RngCore> MoodLight<I, L, R> {
    /// Creates a new light in [`Mode::Fixed`] with the LED turned off.
    ///
    /// `now` seeds the clock used for both fade stepping and mode holding.
    pub fn new(mut led: L, rng: R, now: I) -> Self {
        led.set_color(COLOR_OFF);

        Self {
            led,
            rng,
            mode: Mode::Fixed,
            timing: TimingConfig::default(),
            rgb: COLOR_OFF,
            hsb: Hsb::default(),
            fade: None,
            last_update: now,
        }
    }

    /// Replaces the timing configuration.
    pub fn with_timing(mut self, timing: TimingConfig<I::Duration>) -> Self {
        self.timing = timing;
        self
    }

    /// Handles a light action by dispatching to the appropriate method.
    pub fn handle_action(&mut self, action: MoodAction<I::Duration>) {
        match action {
            MoodAction::SetRgb(color) => self.set_rgb(color.red, color.green, color.blue),
            MoodAction::SetHsb(color) => {
                self.set_hsb(color.hue, color.saturation, color.brightness);
            }
            MoodAction::FadeRgb(color) => self.fade_rgb(color.red, color.green, color.blue),
            MoodAction::FadeHsb { target, shortest } => {
                self.fade_hsb(target.hue, target.saturation, target.brightness, shortest);
            }
            MoodAction::SetMode(mode) => self.set_mode(mode),
            MoodAction::SetTiming(timing) => self.set_timing(timing),
            MoodAction::SetFadingSpeed(interval) => self.set_fading_speed(interval),
            MoodAction::SetFadingSteps(steps) => self.set_fading_steps(steps),
            MoodAction::SetHoldingTime(hold) => self.set_holding_time(hold),
        }
    }

    /// Sets a color instantly from HSB coordinates, cancelling any fade.
    ///
    /// Hue is taken modulo 360.
    pub fn set_hsb(&mut self, hue: u16, saturation: u8, brightness: u8) {
        self.hsb = Hsb::new(hue % 360, saturation, brightness);
        self.rgb = colors::hsb(self.hsb);
        self.fade = None;
    }

    /// Sets a color instantly from RGB channels, cancelling any fade.
    pub fn set_rgb(&mut self, red: u8, green: u8, blue: u8) {
        self.rgb = Rgb::new(red, green, blue);
        self.fade = None;
    }

    /// Sets a packed `0xRRGGBB` color instantly.
    pub fn set_rgb_u32(&mut self, color: u32) {
        let color = rgb_from_u32(color);
        self.set_rgb(color.red, color.green, color.blue);
    }

    /// Starts an HSB fade from the current HSB color.
    ///
    /// With `shortest` the hue travels the smaller arc of the circle.
    /// Any fade already running is discarded.
    pub fn fade_hsb(&mut self, hue: u16, saturation: u8, brightness: u8, shortest: bool) {
        let target = Hsb::new(hue, saturation, brightness);
        self.fade = Some(FadeTransition::hsb(self.hsb, target, shortest));
        self.finish_if_instant();
    }

    /// Starts an RGB fade from the current RGB color.
    ///
    /// Any fade already running is discarded.
    pub fn fade_rgb(&mut self, red: u8, green: u8, blue: u8) {
        self.fade = Some(FadeTransition::rgb(self.rgb, Rgb::new(red, green, blue)));
        self.finish_if_instant();
    }

    /// Starts an RGB fade toward a packed `0xRRGGBB` color.
    pub fn fade_rgb_u32(&mut self, color: u32) {
        let color = rgb_from_u32(color);
        self.fade_rgb(color.red, color.green, color.blue);
    }

    fn finish_if_instant(&mut self) {
        if self.timing.fade_step_count == 0 {
            self.step_fade();
        }
    }

    /// Advances the running fade by one step, ignoring the clock.
    ///
    /// Does nothing when no fade is running.
    pub fn step_fade(&mut self) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };

        let frame = fade.advance(self.timing.fade_step_count);
        match fade.space() {
            FadeSpace::Rgb => self.rgb = coords_to_rgb(frame.coords),
            FadeSpace::Hsb => {
                self.hsb = coords_to_hsb(frame.coords);
                self.rgb = colors::hsb(self.hsb);
            }
        }

        if frame.complete {
            // RGB stays at the last truncated frame; only HSB lands exactly
            if fade.space() == FadeSpace::Hsb {
                self.hsb = fade.landing_hsb();
            }
            self.fade = None;

            #[cfg(feature = "defmt")]
            defmt::debug!(
                "fade complete at rgb({}, {}, {})",
                self.rgb.red,
                self.rgb.green,
                self.rgb.blue
            );
        }
    }

    /// Updates the light for the instant `now` and writes the color to the LED.
    ///
    /// At most one thing happens per call: a fade step when a fade is running
    /// and the step interval has passed, otherwise an autonomous decision when
    /// the holding time has passed. Missed steps are not caught up.
    pub fn tick(&mut self, now: I) {
        if self.fade.is_some() {
            if has_elapsed(now, self.last_update, self.timing.fade_step_interval) {
                self.step_fade();
                self.last_update = now;
            }
        } else if self.mode.is_autonomous()
            && has_elapsed(now, self.last_update, self.timing.hold)
        {
            self.last_update = now;
            self.decide();
        }

        self.led.set_color(self.rgb);
    }

    /// Ticks with the current instant of `time_source`.
    pub fn service<T: TimeSource<I>>(&mut self, time_source: &T) {
        self.tick(time_source.now());
    }

    fn decide(&mut self) {
        let Some(decision) = self.mode.decide(self.hsb, &mut self.rng) else {
            return;
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("mode {} decided {}", self.mode, decision);

        match decision {
            ModeDecision::Fade { target, shortest } => {
                self.fade_hsb(target.hue, target.saturation, target.brightness, shortest);
            }
            ModeDecision::Set { color, hold_ms } => {
                self.set_hsb(color.hue, color.saturation, color.brightness);
                self.timing.hold = I::Duration::from_millis(hold_ms);
            }
        }
    }

    /// Selects the animation mode.
    ///
    /// A running fade is not interrupted; the new mode makes its first
    /// decision once the light is still and the holding time has passed.
    pub fn set_mode(&mut self, mode: Mode) {
        #[cfg(feature = "defmt")]
        defmt::trace!("mode {} -> {}", self.mode, mode);

        self.mode = mode;
    }

    /// Returns the active animation mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the timing configuration.
    pub fn timing(&self) -> &TimingConfig<I::Duration> {
        &self.timing
    }

    /// Replaces the timing configuration.
    pub fn set_timing(&mut self, timing: TimingConfig<I::Duration>) {
        self.timing = timing;
    }

    /// Sets the minimum time between fade steps.
    pub fn set_fading_speed(&mut self, interval: I::Duration) {
        self.timing.fade_step_interval = interval;
    }

    /// Sets the number of steps per fade.
    pub fn set_fading_steps(&mut self, steps: u16) {
        self.timing.fade_step_count = steps;
    }

    /// Sets how long autonomous modes keep a color.
    pub fn set_holding_time(&mut self, hold: I::Duration) {
        self.timing.hold = hold;
    }

    /// Returns true while a fade is running.
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Returns true when no fade is running.
    pub fn is_still(&self) -> bool {
        self.fade.is_none()
    }

    /// Returns the running fade, if any.
    pub fn fade(&self) -> Option<&FadeTransition> {
        self.fade.as_ref()
    }

    /// Returns the color last written (or about to be written) to the LED.
    pub fn current_rgb(&self) -> Rgb {
        self.rgb
    }

    /// Returns the HSB record. The hue may exceed 359 mid-fade.
    pub fn current_hsb(&self) -> Hsb {
        self.hsb
    }

    /// The current red channel.
    pub fn red(&self) -> u8 {
        self.rgb.red
    }

    /// The current green channel.
    pub fn green(&self) -> u8 {
        self.rgb.green
    }

    /// The current blue channel.
    pub fn blue(&self) -> u8 {
        self.rgb.blue
    }

    /// Returns the LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Returns the instant of the last fade step or autonomous decision.
    pub fn last_update(&self) -> I {
        self.last_update
    }
}
