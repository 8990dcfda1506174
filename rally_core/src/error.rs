use thiserror::Error;

/// Errors raised while loading or validating a [`crate::Config`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Config field `{field}` must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("Win score {value} outside [{min}, {max}]")]
    WinScoreOutOfRange { value: u32, min: u32, max: u32 },

    #[error("Paddle inset {inset} outside [0, {max}]")]
    PaddleInsetOutOfRange { inset: f32, max: f32 },

    #[error("Paddle height {paddle} does not fit in field height {field}")]
    PaddleTooTall { paddle: f32, field: f32 },

    #[error("Initial ball speed {initial} exceeds max ball speed {max}")]
    BallSpeedAboveMax { initial: f32, max: f32 },
}
