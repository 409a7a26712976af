//! Autonomous animation modes.
//!
//! A mode only picks the next color. Timing, and whether a decision is due
//! at all, belongs to [`MoodLight`](crate::MoodLight).

use core::ops::Range;

use rand::{Rng, RngCore};

use crate::types::Hsb;

/// Saturation range shared by the themed modes.
const THEMED_SATURATION: Range<u8> = 190..255;

/// Brightness range shared by the themed modes.
const THEMED_BRIGHTNESS: Range<u8> = 120..255;

/// Flicker interval range for [`Mode::Fire`], in milliseconds.
pub const FIRE_HOLD_MS: Range<u64> = 10..500;

/// Selects what the light does on its own between explicit commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// No autonomous changes.
    #[default]
    Fixed = 0,

    /// Random hue, keeping saturation and brightness.
    RandomHue = 1,

    /// Full forward sweep around the hue circle.
    RainbowHue = 2,

    /// Random reds and magentas.
    RedRange = 3,

    /// Random cyans, blues and violets.
    BlueRange = 4,

    /// Random yellow-greens to greens.
    GreenRange = 5,

    /// Instant random warm colors at an irregular cadence.
    Fire = 6,
}

/// What a mode wants the light to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeDecision {
    /// Start an HSB fade toward `target`.
    Fade {
        /// Target color. The hue may exceed 359.
        target: Hsb,
        /// Whether the fade should take the shorter hue arc.
        shortest: bool,
    },

    /// Jump to `color` and keep it for `hold_ms`.
    Set {
        /// New color. The hue may exceed 359.
        color: Hsb,
        /// New holding time in milliseconds.
        hold_ms: u64,
    },
}

impl Mode {
    /// All modes in index order.
    pub const ALL: [Mode; 7] = [
        Mode::Fixed,
        Mode::RandomHue,
        Mode::RainbowHue,
        Mode::RedRange,
        Mode::BlueRange,
        Mode::GreenRange,
        Mode::Fire,
    ];

    /// Returns true for every mode except [`Mode::Fixed`].
    #[inline]
    pub fn is_autonomous(self) -> bool {
        self != Mode::Fixed
    }

    /// Picks the next color given the current one.
    ///
    /// Returns `None` for [`Mode::Fixed`].
    pub fn decide<R: RngCore>(self, current: Hsb, rng: &mut R) -> Option<ModeDecision> {
        let decision = match self {
            Mode::Fixed => return None,
            Mode::RandomHue => ModeDecision::Fade {
                target: Hsb::new(rng.gen_range(0..360), current.saturation, current.brightness),
                shortest: true,
            },
            Mode::RainbowHue => ModeDecision::Fade {
                target: Hsb::new(current.hue % 360 + 360, current.saturation, current.brightness),
                shortest: false,
            },
            Mode::RedRange => themed(335..400, rng),
            Mode::BlueRange => themed(160..275, rng),
            Mode::GreenRange => themed(72..160, rng),
            Mode::Fire => ModeDecision::Set {
                color: random_hsb(345..435, rng),
                hold_ms: rng.gen_range(FIRE_HOLD_MS),
            },
        };

        Some(decision)
    }
}

fn themed<R: RngCore>(hues: Range<u16>, rng: &mut R) -> ModeDecision {
    ModeDecision::Fade {
        target: random_hsb(hues, rng),
        shortest: true,
    }
}

fn random_hsb<R: RngCore>(hues: Range<u16>, rng: &mut R) -> Hsb {
    Hsb::new(
        rng.gen_range(hues),
        rng.gen_range(THEMED_SATURATION),
        rng.gen_range(THEMED_BRIGHTNESS),
    )
}

/// Mode conversion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeError {
    /// No mode has this index.
    UnknownMode(u8),
}

impl core::fmt::Display for ModeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ModeError::UnknownMode(index) => {
                write!(f, "unknown mode index {}", index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ModeError {}

impl TryFrom<u8> for Mode {
    type Error = ModeError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Mode::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(ModeError::UnknownMode(index))
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        mode as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn fixed_never_decides() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(Mode::Fixed.decide(Hsb::new(10, 20, 30), &mut rng), None);
    }

    #[test]
    fn rainbow_sweeps_forward_a_full_turn() {
        let mut rng = SmallRng::seed_from_u64(1);
        let decision = Mode::RainbowHue.decide(Hsb::new(90, 200, 100), &mut rng);
        assert_eq!(
            decision,
            Some(ModeDecision::Fade {
                target: Hsb::new(450, 200, 100),
                shortest: false,
            })
        );
    }

    #[test]
    fn index_round_trips() {
        for mode in Mode::ALL {
            assert_eq!(Mode::try_from(u8::from(mode)), Ok(mode));
        }
        assert_eq!(Mode::try_from(7), Err(ModeError::UnknownMode(7)));
    }
}
