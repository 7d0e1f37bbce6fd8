//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] is the builder-input for a [`BoardEngine`](crate::BoardEngine)
//! and its [`Host`](crate::Host). [`validate()`](EngineConfig::validate)
//! checks every field once at startup; nothing downstream re-checks.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use tessera_grid::{GridRules, Layout, LayoutError};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`] or host startup.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `spawn_base` is zero or not a power of two.
    InvalidSpawnBase {
        /// The configured value.
        value: u32,
    },
    /// `win_threshold` is not a power of two above the higher spawn tier.
    InvalidWinThreshold {
        /// The configured threshold.
        threshold: u32,
        /// The higher spawn tier it must exceed.
        high_tier: u32,
    },
    /// `save_interval_ticks` is zero.
    SaveIntervalZero,
    /// `tick_rate_hz` is not positive and finite, or its tick length is
    /// zero or too long to represent.
    InvalidTickRate {
        /// The invalid value.
        value: f64,
    },
    /// `max_catch_up_ticks` is zero, so the driver could never update.
    CatchUpZero,
    /// `outbox_capacity` is zero.
    OutboxZero,
    /// Board geometry cannot be rendered or slides would not terminate.
    InvalidLayout {
        /// The field that was rejected.
        reason: LayoutError,
    },
    /// A background thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of which thread failed.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpawnBase { value } => {
                write!(f, "spawn_base must be a non-zero power of two, got {value}")
            }
            Self::InvalidWinThreshold {
                threshold,
                high_tier,
            } => write!(
                f,
                "win_threshold {threshold} must be a power of two above the spawn tier {high_tier}"
            ),
            Self::SaveIntervalZero => write!(f, "save_interval_ticks must be at least 1"),
            Self::InvalidTickRate { value } => {
                write!(f, "tick_rate_hz must give a non-zero finite tick, got {value}")
            }
            Self::CatchUpZero => write!(f, "max_catch_up_ticks must be at least 1"),
            Self::OutboxZero => write!(f, "outbox_capacity must be at least 1"),
            Self::InvalidLayout { reason } => write!(f, "invalid layout: {reason}"),
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidLayout { reason } => Some(reason),
            _ => None,
        }
    }
}

impl From<LayoutError> for ConfigError {
    fn from(reason: LayoutError) -> Self {
        Self::InvalidLayout { reason }
    }
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Complete configuration for one engine and its driver.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Seed of the spawn source. Same seed and inputs give the same game.
    pub seed: u64,
    /// Lower spawn tier; the higher tier is twice this. Default: 32.
    pub spawn_base: u32,
    /// Tile value that wins the game. Default: 2048.
    pub win_threshold: u32,
    /// Ticks between periodic saves. Default: 120 (2 s at 60 Hz).
    pub save_interval_ticks: u64,
    /// Logical updates per second. Default: 60.0.
    pub tick_rate_hz: f64,
    /// Most updates run for one frame before the backlog is dropped. Default: 8.
    pub max_catch_up_ticks: u32,
    /// Slots in the host's event outbox when threaded. Default: 64.
    pub outbox_capacity: usize,
    /// Board pixel geometry.
    pub layout: Layout,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let rules = GridRules::default();
        Self {
            seed: 0,
            spawn_base: rules.spawn_base,
            win_threshold: rules.win_threshold,
            save_interval_ticks: 120,
            tick_rate_hz: 60.0,
            max_catch_up_ticks: 8,
            outbox_capacity: 64,
            layout: Layout::default(),
        }
    }
}

impl EngineConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.spawn_base.is_power_of_two() {
            return Err(ConfigError::InvalidSpawnBase {
                value: self.spawn_base,
            });
        }
        let high_tier = self.spawn_base.checked_mul(2).unwrap_or(u32::MAX);
        if !self.win_threshold.is_power_of_two() || self.win_threshold <= high_tier {
            return Err(ConfigError::InvalidWinThreshold {
                threshold: self.win_threshold,
                high_tier,
            });
        }
        if self.save_interval_ticks == 0 {
            return Err(ConfigError::SaveIntervalZero);
        }
        let tick = self
            .tick_rate_hz
            .is_finite()
            .then(|| Duration::try_from_secs_f64(1.0 / self.tick_rate_hz).ok())
            .flatten();
        if !matches!(tick, Some(t) if !t.is_zero()) {
            return Err(ConfigError::InvalidTickRate {
                value: self.tick_rate_hz,
            });
        }
        if self.max_catch_up_ticks == 0 {
            return Err(ConfigError::CatchUpZero);
        }
        if self.outbox_capacity == 0 {
            return Err(ConfigError::OutboxZero);
        }
        self.layout.validate()?;
        Ok(())
    }

    /// Grid value rules derived from this config.
    pub fn rules(&self) -> GridRules {
        GridRules {
            spawn_base: self.spawn_base,
            win_threshold: self.win_threshold,
        }
    }

    /// Wall-clock length of one logical update.
    ///
    /// Only meaningful on a validated config.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rules(), GridRules::default());
        assert_eq!(config.tick_duration().as_micros(), 16_666);
    }

    #[test]
    fn spawn_base_must_be_power_of_two() {
        for value in [0, 3, 48] {
            let config = EngineConfig {
                spawn_base: value,
                ..EngineConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::InvalidSpawnBase { value })
            );
        }
    }

    #[test]
    fn win_threshold_must_exceed_spawn_tiers() {
        let config = EngineConfig {
            win_threshold: 64,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidWinThreshold {
                threshold: 64,
                high_tier: 64
            })
        );

        let config = EngineConfig {
            win_threshold: 1000,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWinThreshold { .. })
        ));
    }

    #[test]
    fn tick_rate_must_be_finite_and_positive() {
        for value in [0.0, -0.0, -60.0, f64::NAN, f64::INFINITY] {
            let config = EngineConfig {
                tick_rate_hz: value,
                ..EngineConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidTickRate { .. })
            ));
        }
    }

    #[test]
    fn tick_rate_must_give_a_representable_tick() {
        // Sub-nanosecond tick, and a tick longer than Duration can hold.
        for value in [1.0e10, 1.0e-300] {
            let config = EngineConfig {
                tick_rate_hz: value,
                ..EngineConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::InvalidTickRate { value })
            );
        }

        let fast = EngineConfig {
            tick_rate_hz: 1.0e6,
            ..EngineConfig::default()
        };
        assert!(fast.validate().is_ok());
        assert!(!fast.tick_duration().is_zero());
    }

    #[test]
    fn zero_counts_rejected() {
        let zero_save = EngineConfig {
            save_interval_ticks: 0,
            ..EngineConfig::default()
        };
        assert_eq!(zero_save.validate(), Err(ConfigError::SaveIntervalZero));

        let zero_catch_up = EngineConfig {
            max_catch_up_ticks: 0,
            ..EngineConfig::default()
        };
        assert_eq!(zero_catch_up.validate(), Err(ConfigError::CatchUpZero));

        let zero_outbox = EngineConfig {
            outbox_capacity: 0,
            ..EngineConfig::default()
        };
        assert_eq!(zero_outbox.validate(), Err(ConfigError::OutboxZero));
    }

    #[test]
    fn layout_errors_carry_the_field() {
        let config = EngineConfig {
            layout: Layout {
                slide_speed: 0,
                ..Layout::default()
            },
            ..EngineConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidLayout {
                reason: LayoutError::SlideSpeed { value: 0 }
            }
        );
        assert!(err.source().is_some());
        assert!(err.to_string().contains("slide_speed"));
    }
}
