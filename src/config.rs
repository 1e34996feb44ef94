use core::fmt;

use serde::Deserialize;

pub const TAP_TIMEOUT_MS: u64 = 100;
pub const LONG_PRESS_TIMEOUT_MS: u64 = 500;
pub const DOUBLE_TAP_TIMEOUT_MS: u64 = 300;
pub const DOUBLE_TAP_MIN_TIME_MS: u64 = 0;
pub const MOVE_SLOP: f32 = 10.0;
pub const DOUBLE_TAP_SLOP: f32 = 100.0;
pub const MIN_FLING_VELOCITY: f32 = 50.0;
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Thresholds and capability flags for gesture classification.
///
/// Distances are in host coordinate units, velocities in units per second.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    pub tap_timeout_ms: u64,
    pub long_press_timeout_ms: u64,
    pub double_tap_timeout_ms: u64,
    pub double_tap_min_time_ms: u64,
    pub move_slop: f32,
    pub double_tap_slop: f32,
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
    pub long_clickable: bool,
    pub dbl_long_clickable: bool,
    pub multi_long_clickable: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_timeout_ms: TAP_TIMEOUT_MS,
            long_press_timeout_ms: LONG_PRESS_TIMEOUT_MS,
            double_tap_timeout_ms: DOUBLE_TAP_TIMEOUT_MS,
            double_tap_min_time_ms: DOUBLE_TAP_MIN_TIME_MS,
            move_slop: MOVE_SLOP,
            double_tap_slop: DOUBLE_TAP_SLOP,
            min_fling_velocity: MIN_FLING_VELOCITY,
            max_fling_velocity: MAX_FLING_VELOCITY,
            long_clickable: true,
            dbl_long_clickable: true,
            multi_long_clickable: true,
        }
    }
}

impl GestureConfig {
    /// Parses a TOML table; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tap_timeout_ms == 0 {
            return Err(ConfigError::invalid("tap_timeout_ms", "must be positive"));
        }
        if self.long_press_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "long_press_timeout_ms",
                "must be positive",
            ));
        }
        if self.double_tap_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "double_tap_timeout_ms",
                "must be positive",
            ));
        }
        if self.double_tap_min_time_ms >= self.double_tap_timeout_ms {
            return Err(ConfigError::invalid(
                "double_tap_min_time_ms",
                "must be below double_tap_timeout_ms",
            ));
        }
        check_distance("move_slop", self.move_slop)?;
        check_distance("double_tap_slop", self.double_tap_slop)?;
        if !self.min_fling_velocity.is_finite() || self.min_fling_velocity < 0.0 {
            return Err(ConfigError::invalid(
                "min_fling_velocity",
                "must be finite and non-negative",
            ));
        }
        if !self.max_fling_velocity.is_finite()
            || self.max_fling_velocity <= self.min_fling_velocity
        {
            return Err(ConfigError::invalid(
                "max_fling_velocity",
                "must be finite and above min_fling_velocity",
            ));
        }
        Ok(())
    }

    /// Absolute time a long-press window opened at `down_time_ms` expires.
    pub fn long_press_deadline(&self, down_time_ms: u64) -> u64 {
        down_time_ms
            .saturating_add(self.tap_timeout_ms)
            .saturating_add(self.long_press_timeout_ms)
    }
}

fn check_distance(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be finite and positive"))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(toml::de::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        log::warn!("gesture: config rejected field={} reason={}", field, reason);
        Self::Invalid { field, reason }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "gesture config parse failed: {err}"),
            Self::Invalid { field, reason } => {
                write!(f, "gesture config field `{field}` {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        GestureConfig::default()
            .validate()
            .expect("default config should validate");
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let config = GestureConfig::from_toml_str(include_str!("../config/gestures.toml"))
            .expect("shipped config should parse");
        assert_eq!(config, GestureConfig::default());
        assert_eq!(config.double_tap_min_time_ms, 0);
    }

    #[test]
    fn partial_table_keeps_remaining_defaults() {
        let config = GestureConfig::from_toml_str(
            "long_press_timeout_ms = 800\nmove_slop = 16.0\ndbl_long_clickable = false\n",
        )
        .expect("partial config should parse");

        assert_eq!(config.long_press_timeout_ms, 800);
        assert_eq!(config.move_slop, 16.0);
        assert!(!config.dbl_long_clickable);
        assert_eq!(config.tap_timeout_ms, TAP_TIMEOUT_MS);
        assert!(config.long_clickable);
        assert_eq!(config.long_press_deadline(1_000), 1_900);
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let err = GestureConfig::from_toml_str("tap_slop = 4.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_values_name_the_field() {
        for (source, expected) in [
            ("tap_timeout_ms = 0", "tap_timeout_ms"),
            ("move_slop = -1.0", "move_slop"),
            ("double_tap_min_time_ms = 300", "double_tap_min_time_ms"),
            ("min_fling_velocity = 9000.0", "max_fling_velocity"),
        ] {
            match GestureConfig::from_toml_str(source) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected invalid `{expected}`, got {other:?}"),
            }
        }
    }

    #[test]
    fn deadline_saturates() {
        let config = GestureConfig::default();
        assert_eq!(config.long_press_deadline(u64::MAX - 10), u64::MAX);
    }
}
