//! Shared test infrastructure for rgb-mood integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rgb_mood::{MoodLight, Rgb, RgbLed, TimeDuration, TimeInstant, TimeSource};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }
}

// ============================================================================
// Mock LED
// ============================================================================

/// Mock LED that records every write
pub struct MockLed {
    current_color: Rgb,
    writes: usize,
    color_history: heapless::Vec<Rgb, 1024>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            current_color: Rgb::new(0, 0, 0),
            writes: 0,
            color_history: heapless::Vec::new(),
        }
    }

    pub fn get_last_color(&self) -> Rgb {
        self.current_color
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    /// First 1024 writes, oldest first
    pub fn color_history(&self) -> &[Rgb] {
        &self.color_history
    }
}

impl RgbLed for MockLed {
    fn set_color(&mut self, color: Rgb) {
        self.current_color = color;
        self.writes += 1;
        let _ = self.color_history.push(color);
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestLight = MoodLight<TestInstant, MockLed, SmallRng>;

/// Light created at t=0 with default timing and a fixed seed
pub fn new_light() -> TestLight {
    new_light_seeded(0x5EED)
}

pub fn new_light_seeded(seed: u64) -> TestLight {
    MoodLight::new(MockLed::new(), SmallRng::seed_from_u64(seed), TestInstant(0))
}

/// Ticks every `interval_ms` starting after `*now`, `count` times
pub fn tick_every(light: &mut TestLight, now: &mut u64, interval_ms: u64, count: usize) {
    for _ in 0..count {
        *now += interval_ms;
        light.tick(TestInstant(*now));
    }
}

/// Ticks on the fade step interval until the running fade ends
pub fn run_fade_to_end(light: &mut TestLight, now: &mut u64) -> usize {
    let interval = light.timing().fade_step_interval.0;
    let mut ticks = 0;
    while light.is_fading() {
        *now += interval;
        light.tick(TestInstant(*now));
        ticks += 1;
        assert!(ticks <= usize::from(u16::MAX), "fade never ended");
    }
    ticks
}

/// Compare two colors channel by channel with a tolerance
pub fn colors_close(a: Rgb, b: Rgb, tolerance: u8) -> bool {
    a.red.abs_diff(b.red) <= tolerance
        && a.green.abs_diff(b.green) <= tolerance
        && a.blue.abs_diff(b.blue) <= tolerance
}
