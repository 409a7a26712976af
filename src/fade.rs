//! Step-based linear interpolation between two colors.
//!
//! A [`FadeTransition`] only knows coordinates and a step counter. The light
//! decides when to advance it and what to do with each frame.

use crate::Rgb;
use crate::types::{FadeSpace, Hsb};

/// One interpolated frame of a fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeFrame {
    /// Interpolated coordinates in the transition's space.
    pub coords: [u16; 3],

    /// True when this frame ended the transition.
    pub complete: bool,
}

/// An in-progress interpolation between an initial and a target color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FadeTransition {
    initial: [u16; 3],
    target: [u16; 3],
    step: u16,
    space: FadeSpace,
}

impl FadeTransition {
    /// Creates an RGB-space transition.
    pub fn rgb(from: Rgb, to: Rgb) -> Self {
        Self {
            initial: rgb_coords(from),
            target: rgb_coords(to),
            step: 0,
            space: FadeSpace::Rgb,
        }
    }

    /// Creates an HSB-space transition.
    ///
    /// With `shortest` both hues are taken modulo 360 and one end is
    /// lifted by 360 degrees so the fade travels the smaller arc. The
    /// starting hue may sit above 359 when the previous fade was cut short. A tie
    /// (exactly 180 degrees apart) keeps the direct path. Without `shortest`
    /// the hues are used as given, so `to.hue > from.hue` always fades forward.
    pub fn hsb(from: Hsb, to: Hsb, shortest: bool) -> Self {
        let mut initial_hue = from.hue;
        let mut target_hue = to.hue;

        if shortest {
            initial_hue %= 360;
            target_hue %= 360;
            if initial_hue < target_hue {
                if target_hue - initial_hue > initial_hue + 360 - target_hue {
                    initial_hue += 360;
                }
            } else if initial_hue > target_hue
                && initial_hue - target_hue > target_hue + 360 - initial_hue
            {
                target_hue += 360;
            }
        }

        Self {
            initial: [initial_hue, u16::from(from.saturation), u16::from(from.brightness)],
            target: [target_hue, u16::from(to.saturation), u16::from(to.brightness)],
            step: 0,
            space: FadeSpace::Hsb,
        }
    }

    /// Space the transition interpolates in.
    #[inline]
    pub fn space(&self) -> FadeSpace {
        self.space
    }

    /// Steps taken so far.
    #[inline]
    pub fn step(&self) -> u16 {
        self.step
    }

    /// Starting coordinates, after any hue rewrite.
    #[inline]
    pub fn initial(&self) -> [u16; 3] {
        self.initial
    }

    /// Target coordinates, after any hue rewrite.
    #[inline]
    pub fn target(&self) -> [u16; 3] {
        self.target
    }

    /// Takes one step toward the target.
    ///
    /// The interpolated value is truncated, not rounded, so the last frame
    /// may sit a unit short of the target. A `max_steps` of zero snaps
    /// straight to the target.
    pub fn advance(&mut self, max_steps: u16) -> FadeFrame {
        self.step = self.step.saturating_add(1);

        if max_steps == 0 {
            return FadeFrame {
                coords: self.target,
                complete: true,
            };
        }

        // Step count may have been lowered mid-fade
        let step = self.step.min(max_steps);
        let mut coords = [0u16; 3];
        for (i, coord) in coords.iter_mut().enumerate() {
            *coord = interpolate(self.initial[i], self.target[i], step, max_steps);
        }

        FadeFrame {
            coords,
            complete: self.step >= max_steps,
        }
    }

    /// HSB record to keep once an HSB transition completes.
    #[inline]
    pub fn landing_hsb(&self) -> Hsb {
        coords_to_hsb(self.target).normalized()
    }
}

#[inline]
fn interpolate(initial: u16, target: u16, step: u16, max_steps: u16) -> u16 {
    let initial = f32::from(initial);
    let delta = (initial - f32::from(target)) / f32::from(max_steps);
    (initial - f32::from(step) * delta) as u16
}

#[inline]
fn rgb_coords(color: Rgb) -> [u16; 3] {
    [
        u16::from(color.red),
        u16::from(color.green),
        u16::from(color.blue),
    ]
}

/// Reads RGB-space coordinates back as a color.
#[inline]
pub fn coords_to_rgb(coords: [u16; 3]) -> Rgb {
    Rgb::new(channel(coords[0]), channel(coords[1]), channel(coords[2]))
}

/// Reads HSB-space coordinates back as an [`Hsb`], keeping any extended hue.
#[inline]
pub fn coords_to_hsb(coords: [u16; 3]) -> Hsb {
    Hsb::new(coords[0], channel(coords[1]), channel(coords[2]))
}

#[inline]
fn channel(value: u16) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_path_lifts_initial_hue() {
        let fade = FadeTransition::hsb(Hsb::new(10, 255, 255), Hsb::new(350, 255, 255), true);
        assert_eq!(fade.initial()[0], 370);
        assert_eq!(fade.target()[0], 350);
    }

    #[test]
    fn shortest_path_lifts_target_hue() {
        let fade = FadeTransition::hsb(Hsb::new(350, 255, 255), Hsb::new(10, 255, 255), true);
        assert_eq!(fade.initial()[0], 350);
        assert_eq!(fade.target()[0], 370);
    }

    #[test]
    fn shortest_path_wraps_requested_hue() {
        let fade = FadeTransition::hsb(Hsb::new(340, 255, 255), Hsb::new(380, 255, 255), true);
        assert_eq!(fade.initial()[0], 340);
        assert_eq!(fade.target()[0], 380);
    }

    #[test]
    fn shortest_path_accepts_lifted_initial_hue() {
        let fade = FadeTransition::hsb(Hsb::new(365, 255, 255), Hsb::new(0, 255, 255), true);
        assert_eq!(fade.initial()[0], 5);
        assert_eq!(fade.target()[0], 0);

        let fade = FadeTransition::hsb(Hsb::new(400, 255, 255), Hsb::new(300, 255, 255), true);
        assert_eq!(fade.initial()[0], 400);
        assert_eq!(fade.target()[0], 300);
    }

    #[test]
    fn half_circle_keeps_direct_path() {
        let fade = FadeTransition::hsb(Hsb::new(0, 255, 255), Hsb::new(180, 255, 255), true);
        assert_eq!(fade.initial()[0], 0);
        assert_eq!(fade.target()[0], 180);
    }

    #[test]
    fn forward_path_is_left_alone() {
        let fade = FadeTransition::hsb(Hsb::new(10, 255, 255), Hsb::new(370, 255, 255), false);
        assert_eq!(fade.initial()[0], 10);
        assert_eq!(fade.target()[0], 370);
    }

    #[test]
    fn interpolation_truncates() {
        let mut fade = FadeTransition::rgb(Rgb::new(0, 0, 0), Rgb::new(255, 0, 0));
        let mut frame = fade.advance(200);
        for _ in 1..100 {
            frame = fade.advance(200);
        }
        assert_eq!(fade.step(), 100);
        assert_eq!(frame.coords[0], 127);
        assert!(!frame.complete);
    }

    #[test]
    fn zero_steps_snaps_to_target() {
        let mut fade = FadeTransition::rgb(Rgb::new(0, 0, 0), Rgb::new(12, 34, 56));
        let frame = fade.advance(0);
        assert!(frame.complete);
        assert_eq!(frame.coords, [12, 34, 56]);
    }

    #[test]
    fn landing_hsb_normalizes_hue() {
        let fade = FadeTransition::hsb(Hsb::new(350, 200, 100), Hsb::new(10, 210, 110), true);
        assert_eq!(fade.landing_hsb(), Hsb::new(10, 210, 110));
    }
}
