#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`MoodLight`**: Owns the color of a single RGB light and advances it on every `tick`
//! - **`Hsb`**: Hue (degrees), saturation and brightness (0-255) coordinates
//! - **`FadeTransition`**: Step-based linear interpolation in RGB or HSB space
//! - **`Mode`**: Autonomous behaviour (`Fixed`, `RandomHue`, `RainbowHue`, themed ranges, `Fire`)
//! - **`TimingConfig`**: Step interval, step count and holding time
//! - **`RgbLed`**: Trait to implement for your LED hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`MoodAction`**: Commands that can be sent to control a light
//!
//! Colors are 8-bit `Srgb<u8>` values. HSB colors are passed through a
//! perceptual dimming curve before they reach the LED.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod colors;
pub mod command;
pub mod fade;
pub mod light;
pub mod mode;
pub mod protocol;
pub mod time;
pub mod types;

pub use colors::{DIM_CURVE, hsb_to_rgb, kelvin_to_rgb, rgb_from_u32, rgb_to_hsb};
pub use command::MoodAction;
pub use fade::{FadeFrame, FadeTransition};
pub use light::{MoodLight, RgbLed};
pub use mode::{Mode, ModeDecision, ModeError};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{FadeSpace, Hsb, TimingConfig};

/// 8-bit RGB color as written to the LED.
pub type Rgb = Srgb<u8>;

pub const COLOR_OFF: Rgb = Srgb::new(0, 0, 0);

pub const BLACK: Rgb = COLOR_OFF;
pub const RED: Rgb = rgb_from_u32(0xFF0000);
pub const GREEN: Rgb = rgb_from_u32(0x00FF00);
pub const BLUE: Rgb = rgb_from_u32(0x0000FF);
pub const AQUAMARINE: Rgb = rgb_from_u32(0x7FFFD4);
pub const AIR_FORCE_BLUE: Rgb = rgb_from_u32(0x5D8AA8);
pub const AMARANTH: Rgb = rgb_from_u32(0xE52B50);
pub const ASPARAGUS: Rgb = rgb_from_u32(0x87A96B);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_compile() {
        let _ = FadeSpace::Rgb;
        let _ = FadeSpace::Hsb;
        let _ = Mode::Fixed;
        let _ = Mode::Fire;
    }

    #[test]
    fn named_colors_unpack() {
        assert_eq!(RED, Srgb::new(255, 0, 0));
        assert_eq!(AMARANTH, Srgb::new(0xE5, 0x2B, 0x50));
    }
}
