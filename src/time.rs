//! Time abstraction traits for platform-agnostic timing.
//!
//! The light never reads a clock on its own. Callers hand it an instant on
//! every tick, either directly or through a [`TimeSource`].

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Implementations should saturate to zero when `earlier` is in the future.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Returns true when at least `interval` has passed between `since` and `now`.
#[inline]
pub(crate) fn has_elapsed<I: TimeInstant>(now: I, since: I, interval: I::Duration) -> bool {
    now.duration_since(since).as_millis() >= interval.as_millis()
}
