//! Playback constants and per-controller configuration

use crate::error::ConfigError;
use std::num::NonZeroUsize;
use std::time::Duration;

/// Interval between automatic steps at speed 1x
pub const DEFAULT_BASE_INTERVAL: Duration = Duration::from_millis(1000);

/// Hard lower bound on the tick interval, whatever the speed
pub const DEFAULT_FLOOR: Duration = Duration::from_millis(16);

/// Speeds offered by the viewer's `+` / `-` keys
pub const SPEED_PRESETS: [f64; 7] = [0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0];

/// Largest trace the viewer will build before giving up
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 1_000_000;

/// Settings owned by one playback controller.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Interval between ticks at an effective speed of 1x
    pub base_interval: Duration,
    /// Minimum interval between ticks
    pub floor: Duration,
    /// Positions advanced per timer tick
    pub steps_per_tick: NonZeroUsize,
    /// Whether the controller starts playing on creation and after reset
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            base_interval: DEFAULT_BASE_INTERVAL,
            floor: DEFAULT_FLOOR,
            steps_per_tick: NonZeroUsize::MIN,
            autoplay: false,
        }
    }
}

impl PlaybackConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floor.is_zero() {
            return Err(ConfigError::ZeroFloor);
        }
        if self.base_interval < self.floor {
            return Err(ConfigError::IntervalBelowFloor {
                base_ms: self.base_interval.as_millis(),
                floor_ms: self.floor.as_millis(),
            });
        }
        Ok(())
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn with_steps_per_tick(mut self, steps: NonZeroUsize) -> Self {
        self.steps_per_tick = steps;
        self
    }

    /// Tick interval for this config under the given combined multiplier
    pub fn interval_for(&self, multiplier: f64) -> Duration {
        effective_interval(self.base_interval, self.floor, multiplier)
    }
}

/// Check that a speed multiplier is usable
pub fn validate_speed(multiplier: f64) -> Result<f64, ConfigError> {
    if multiplier.is_finite() && multiplier > 0.0 {
        Ok(multiplier)
    } else {
        Err(ConfigError::InvalidSpeed(multiplier))
    }
}

/// Slowest a controller will ever tick, unless its base interval is slower
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// `round(base / multiplier)` in whole milliseconds, clamped to
/// `floor..=max(base, MAX_INTERVAL)`.
///
/// The multiplier is usually the product of two validated speeds, so it can
/// still overflow to infinity (clamped to `floor`) or underflow to zero
/// (clamped to the ceiling). Non-increasing in `multiplier`.
pub fn effective_interval(base: Duration, floor: Duration, multiplier: f64) -> Duration {
    let ceiling = base.max(MAX_INTERVAL).max(floor);
    if multiplier.is_nan() || multiplier <= 0.0 {
        return ceiling;
    }
    let ms = (base.as_millis() as f64 / multiplier).round();
    // f64 -> u64 casts saturate; an infinite multiplier gives 0 here
    Duration::from_millis(ms as u64).clamp(floor, ceiling)
}

/// Next entry in [`SPEED_PRESETS`] above `current`, or the top preset
pub fn faster_preset(current: f64) -> f64 {
    SPEED_PRESETS
        .iter()
        .copied()
        .find(|&p| p > current + f64::EPSILON)
        .unwrap_or(SPEED_PRESETS[SPEED_PRESETS.len() - 1])
}

/// Next entry in [`SPEED_PRESETS`] below `current`, or the bottom preset
pub fn slower_preset(current: f64) -> f64 {
    SPEED_PRESETS
        .iter()
        .rev()
        .copied()
        .find(|&p| p < current - f64::EPSILON)
        .unwrap_or(SPEED_PRESETS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_scales_and_rounds() {
        let base = Duration::from_millis(1000);
        let floor = Duration::from_millis(16);
        assert_eq!(effective_interval(base, floor, 1.0), base);
        assert_eq!(
            effective_interval(base, floor, 3.0),
            Duration::from_millis(333)
        );
        assert_eq!(
            effective_interval(base, floor, 0.5),
            Duration::from_millis(2000)
        );
    }

    #[test]
    fn interval_never_drops_below_floor() {
        let base = Duration::from_millis(100);
        let floor = Duration::from_millis(16);
        assert_eq!(effective_interval(base, floor, 1000.0), floor);
    }

    #[test]
    fn extreme_products_clamp_instead_of_resetting() {
        let base = Duration::from_millis(1000);
        let floor = Duration::from_millis(16);
        let huge: f64 = 1e200 * 1e200;
        let tiny: f64 = 1e-200 * 1e-200;
        assert!(huge.is_infinite());
        assert_eq!(tiny, 0.0);

        assert_eq!(effective_interval(base, floor, huge), floor);
        assert_eq!(effective_interval(base, floor, f64::MAX), floor);
        assert_eq!(effective_interval(base, floor, tiny), MAX_INTERVAL);
        assert_eq!(effective_interval(base, floor, 1e-300), MAX_INTERVAL);
        assert!(effective_interval(base, floor, 1e200) <= effective_interval(base, floor, 1.0));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(PlaybackConfig::default().validate().is_ok());
        let bad = PlaybackConfig {
            floor: Duration::ZERO,
            ..PlaybackConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::ZeroFloor));
    }

    #[test]
    fn presets_step_through_the_table() {
        assert_eq!(faster_preset(1.0), 2.0);
        assert_eq!(slower_preset(1.0), 0.5);
        assert_eq!(faster_preset(16.0), 16.0);
        assert_eq!(slower_preset(0.25), 0.25);
        assert_eq!(faster_preset(3.0), 4.0);
    }
}
