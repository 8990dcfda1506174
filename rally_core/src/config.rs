use serde::Deserialize;

use crate::error::ConfigError;
use crate::params::Params;
use crate::PlayerId;

/// Game configuration
///
/// Every field falls back to its [`Params`] default when missing from a
/// loaded config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_inset: f32,
    pub paddle_speed: f32,
    pub paddle_boost_speed: f32,
    pub ball_size: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_max: f32,
    pub win_score: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: Params::FIELD_WIDTH,
            field_height: Params::FIELD_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_inset: Params::PADDLE_INSET,
            paddle_speed: Params::PADDLE_SPEED,
            paddle_boost_speed: Params::PADDLE_BOOST_SPEED,
            ball_size: Params::BALL_SIZE,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            ball_speed_max: Params::BALL_SPEED_MAX,
            win_score: Params::WIN_SCORE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()
    }

    /// Check that the dimensions and speeds describe a playable field
    pub fn validate(self) -> Result<Self, ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("paddle_boost_speed", self.paddle_boost_speed),
            ("ball_size", self.ball_size),
            ("ball_speed_initial", self.ball_speed_initial),
            ("ball_speed_max", self.ball_speed_max),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let max_inset = self.field_width / 2.0 - self.paddle_width;
        if !self.paddle_inset.is_finite() || !(0.0..=max_inset).contains(&self.paddle_inset) {
            return Err(ConfigError::PaddleInsetOutOfRange {
                inset: self.paddle_inset,
                max: max_inset,
            });
        }

        if self.paddle_height >= self.field_height {
            return Err(ConfigError::PaddleTooTall {
                paddle: self.paddle_height,
                field: self.field_height,
            });
        }

        if self.ball_speed_initial > self.ball_speed_max {
            return Err(ConfigError::BallSpeedAboveMax {
                initial: self.ball_speed_initial,
                max: self.ball_speed_max,
            });
        }

        if !(Params::WIN_SCORE_MIN..=Params::WIN_SCORE_MAX).contains(&self.win_score) {
            return Err(ConfigError::WinScoreOutOfRange {
                value: self.win_score,
                min: Params::WIN_SCORE_MIN,
                max: Params::WIN_SCORE_MAX,
            });
        }

        Ok(self)
    }

    /// Get X position for a player's paddle
    pub fn paddle_x(&self, player: PlayerId) -> f32 {
        let goal = self.field_width / 2.0;
        match player {
            PlayerId::One => -goal + self.paddle_inset,
            PlayerId::Two => goal - self.paddle_inset,
        }
    }

    pub fn paddle_half_height(&self) -> f32 {
        self.paddle_height / 2.0
    }

    pub fn ball_radius(&self) -> f32 {
        self.ball_size / 2.0
    }

    /// Highest Y the paddle centre may reach
    pub fn paddle_limit(&self) -> f32 {
        self.field_height / 2.0 - self.paddle_half_height()
    }

    /// Clamp paddle Y to field bounds
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        let limit = self.paddle_limit();
        y.clamp(-limit, limit)
    }

    /// Y at which the ball touches the top (or, negated, bottom) border
    pub fn wall_y(&self) -> f32 {
        self.field_height / 2.0 - self.ball_radius()
    }

    /// X beyond which the ball counts as a goal
    pub fn goal_x(&self) -> f32 {
        self.field_width / 2.0
    }
}
