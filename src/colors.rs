//! Color space conversion helpers.
//!
//! HSB here means the 8-bit mood light flavour: hue in degrees, saturation
//! and brightness in `0..=255`. Before conversion both saturation and
//! brightness go through [`DIM_CURVE`], which makes low intensities look
//! less washed out to the eye.

use palette::{FromColor, Hsv};

use crate::types::Hsb;
use crate::Rgb;

/// Perceptual dimming curve. Monotonic, `DIM_CURVE[0] == 0`, `DIM_CURVE[255] == 255`.
pub const DIM_CURVE: [u8; 256] = [
    0, 1, 1, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, //
    3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, //
    4, 4, 4, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 6, 6, 6, //
    6, 6, 6, 6, 6, 7, 7, 7, 7, 7, 7, 7, 8, 8, 8, 8, //
    8, 8, 9, 9, 9, 9, 9, 9, 10, 10, 10, 10, 10, 11, 11, 11, //
    11, 11, 12, 12, 12, 12, 12, 13, 13, 13, 13, 14, 14, 14, 14, 15, //
    15, 15, 16, 16, 16, 16, 17, 17, 17, 18, 18, 18, 19, 19, 19, 20, //
    20, 20, 21, 21, 22, 22, 22, 23, 23, 24, 24, 25, 25, 25, 26, 26, //
    27, 27, 28, 28, 29, 29, 30, 30, 31, 32, 32, 33, 33, 34, 35, 35, //
    36, 36, 37, 38, 38, 39, 40, 40, 41, 42, 43, 43, 44, 45, 46, 47, //
    48, 48, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61, 62, //
    63, 64, 65, 66, 68, 69, 70, 71, 73, 74, 75, 76, 78, 79, 81, 82, //
    83, 85, 86, 88, 90, 91, 93, 94, 96, 98, 99, 101, 103, 105, 107, 109, //
    110, 112, 114, 116, 118, 121, 123, 125, 127, 129, 132, 134, 136, 139, 141, 144, //
    146, 149, 151, 154, 157, 159, 162, 165, 168, 171, 174, 177, 180, 183, 186, 190, //
    193, 196, 200, 203, 207, 211, 214, 218, 222, 226, 230, 234, 238, 242, 248, 255, //
];

/// Converts an HSB color to RGB, applying the dimming curve first.
///
/// Hue wraps modulo 360. Saturation is corrected in the inverted sense
/// (`255 - DIM_CURVE[255 - sat]`) so that low saturations fall off gently.
pub fn hsb_to_rgb(hue: u16, saturation: u8, brightness: u8) -> Rgb {
    let val = u32::from(DIM_CURVE[usize::from(brightness)]);
    let sat = 255 - u32::from(DIM_CURVE[usize::from(255 - saturation)]);
    let hue = u32::from(hue % 360);

    if sat == 0 {
        // Achromatic, hue is irrelevant
        let v = val as u8;
        return Rgb::new(v, v, v);
    }

    let base = (255 - sat) * val / 255;
    let offset = hue % 60;
    let rising = (val - base) * offset / 60 + base;
    let falling = (val - base) * (60 - offset) / 60 + base;

    let (r, g, b) = match hue / 60 {
        0 => (val, rising, base),
        1 => (falling, val, base),
        2 => (base, val, rising),
        3 => (base, falling, val),
        4 => (rising, base, val),
        _ => (val, base, falling),
    };

    Rgb::new(r as u8, g as u8, b as u8)
}

/// Converts an [`Hsb`] triple to RGB. See [`hsb_to_rgb`].
#[inline]
pub fn hsb(color: Hsb) -> Rgb {
    hsb_to_rgb(color.hue, color.saturation, color.brightness)
}

/// Converts an RGB color to undimmed HSB.
///
/// This is a one-way helper: the dimming curve is lossy, so the result is
/// only the exact inverse of [`hsb_to_rgb`] for fully saturated, full
/// brightness colors.
pub fn rgb_to_hsb(color: Rgb) -> Hsb {
    let hsv: Hsv = Hsv::from_color(color.into_format::<f32>());
    let hue = libm::roundf(hsv.hue.into_positive_degrees()) as u16 % 360;

    Hsb::new(
        hue,
        to_channel(hsv.saturation),
        to_channel(hsv.value),
    )
}

#[inline]
fn to_channel(unit: f32) -> u8 {
    libm::roundf(unit.clamp(0.0, 1.0) * 255.0) as u8
}

/// Approximates the color of a black body at `kelvin` degrees.
///
/// Cheap curve fit meant for warm/cool white presets, not colorimetry.
pub fn kelvin_to_rgb(kelvin: u32) -> Rgb {
    let temperature = (kelvin / 100) as f32;

    let red = if temperature <= 66.0 {
        255.0
    } else {
        329.698_73 * libm::powf(temperature - 60.0, -0.133_204_76)
    };

    let green = if temperature <= 66.0 {
        99.470_8 * libm::logf(temperature) - 161.119_57
    } else {
        288.122_17 * libm::powf(temperature - 60.0, -0.075_514_85)
    };

    let blue = if temperature >= 66.0 {
        255.0
    } else if temperature <= 19.0 {
        0.0
    } else {
        138.517_73 * libm::logf(temperature - 10.0) - 305.044_8
    };

    Rgb::new(clamp_channel(red), clamp_channel(green), clamp_channel(blue))
}

#[inline]
fn clamp_channel(value: f32) -> u8 {
    // -inf from log(0) lands on 0
    value.clamp(0.0, 255.0) as u8
}

/// Unpacks a `0xRRGGBB` color.
#[inline]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb::new(
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    )
}
