//! Simulation configuration and runtime settings

use std::time::Duration;

use crate::entities::Vector2;

/// Fixed rules of the arena. Built once and handed to the game at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Arena width in world units
    pub width: f32,
    /// Arena height in world units
    pub height: f32,
    /// Duration of one simulation tick
    pub step: Duration,
    pub ball_size: Vector2,
    /// Ball velocity on serve; the horizontal sign is chosen per serve
    pub serve_velocity: Vector2,
    pub paddle_size: Vector2,
    /// Units a paddle travels per tick
    pub paddle_speed: f32,
    /// Distance from a paddle's center to its own arena edge
    pub paddle_inset: f32,
    /// Side length of one score glyph pixel
    pub glyph_pixel: f32,
    /// Gap between two digit cells
    pub glyph_gap: f32,
    pub player_score_anchor: Vector2,
    pub opponent_score_anchor: Vector2,
}

impl Default for Config {
    fn default() -> Self {
        let width = 512.0;
        let height = 256.0;

        Self {
            width,
            height,
            step: Duration::from_secs(1) / 60,
            ball_size: Vector2::new(10.0, 10.0),
            serve_velocity: Vector2::new(3.0, 3.0),
            paddle_size: Vector2::new(10.0, 75.0),
            paddle_speed: 2.0,
            paddle_inset: 20.0,
            glyph_pixel: 4.0,
            glyph_gap: 4.0,
            player_score_anchor: Vector2::new(width / 4.0, 24.0),
            opponent_score_anchor: Vector2::new(width * 3.0 / 4.0, 24.0),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Center of the arena
    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Runtime settings of the terminal host, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// tracing filter directive (trace, debug, info, warn, error)
    pub log_filter: String,
    pub log_file: String,
    /// Sleep between two host frames
    pub frame_interval: Duration,
    /// Catch-up update count above which a frame is reported as a burst
    pub burst_warning: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            log_file: "pong.log".to_string(),
            frame_interval: Duration::from_millis(8),
            burst_warning: 10,
        }
    }
}

impl Settings {
    /// Load settings from `PONG_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let frame_interval = match lookup("PONG_FRAME_MS") {
            Some(raw) => {
                let millis = parse_in_range("PONG_FRAME_MS", &raw, 1, 1000)?;
                Duration::from_millis(millis)
            }
            None => defaults.frame_interval,
        };

        let burst_warning = match lookup("PONG_BURST_WARN") {
            Some(raw) => parse_in_range("PONG_BURST_WARN", &raw, 1, u64::from(u32::MAX))? as u32,
            None => defaults.burst_warning,
        };

        Ok(Self {
            log_filter: lookup("PONG_LOG").unwrap_or(defaults.log_filter),
            log_file: lookup("PONG_LOG_FILE").unwrap_or(defaults.log_file),
            frame_interval,
            burst_warning,
        })
    }
}

fn parse_in_range(key: &'static str, raw: &str, min: u64, max: u64) -> Result<u64, ConfigError> {
    let value: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })?;

    if value < min || value > max {
        return Err(ConfigError::OutOfRange { key, value, min, max });
    }

    Ok(value)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}
