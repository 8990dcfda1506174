/// Game tuning parameters for Rally Pong
///
/// Distances are in field units with the origin at the centre of the field
/// and y growing upward. Speeds are in units per frame.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Field
    pub const FIELD_WIDTH: f32 = 100.0;
    pub const FIELD_HEIGHT: f32 = 60.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 0.7;
    pub const PADDLE_HEIGHT: f32 = 8.0;
    pub const PADDLE_INSET: f32 = 8.0; // distance from the goal line
    pub const PADDLE_SPEED: f32 = 1.0;
    pub const PADDLE_BOOST_SPEED: f32 = 1.8;

    // CPU
    pub const CPU_SPEED_FACTOR: f32 = 0.8;
    pub const CPU_TOLERANCE: f32 = 2.0;

    // Ball
    pub const BALL_SIZE: f32 = 0.8;
    pub const BALL_SPEED_INITIAL: f32 = 0.6;
    pub const BALL_SPEED_MAX: f32 = 1.5;
    pub const BALL_SPEED_GAIN: f32 = 1.02; // vx multiplier on paddle hit
    pub const BALL_DEFLECTION: f32 = 0.3; // vy gain per unit of hit offset
    pub const BALL_LAUNCH_SPREAD: f32 = std::f32::consts::FRAC_PI_4;

    // Win threshold
    pub const WIN_SCORE: u32 = 50;
    pub const WIN_SCORE_MIN: u32 = 10;
    pub const WIN_SCORE_MAX: u32 = 200;

    // Frame stepping
    pub const FIXED_DT: f32 = 1.0 / 60.0;
    pub const MAX_FRAMES_PER_UPDATE: u32 = 6;

    // Effects
    pub const BURST_PARTICLES: usize = 8;
    pub const BURST_SPREAD: f32 = 3.0;
    pub const BURST_SPEED: f32 = 0.3;
    pub const PARTICLE_SIZE: f32 = 0.4;
    pub const PARTICLE_LIFE: u32 = 40;
    pub const PARTICLE_OPACITY: f32 = 0.9;
    pub const PARTICLE_FADE: f32 = 0.92;
    pub const PARTICLE_MIN_OPACITY: f32 = 0.01;

    // Colors (0xRRGGBB)
    pub const PLAYER_ONE_COLOR: u32 = 0x00ff88;
    pub const PLAYER_TWO_COLOR: u32 = 0xff4488;
    pub const WALL_COLOR: u32 = 0x888888;
    pub const BALL_COLOR: u32 = 0xffff00;
}

/// Point values and thresholds for the bonus scoring system
#[derive(Debug, Clone, Copy)]
pub struct Scoring;

impl Scoring {
    pub const BASE_GOAL: u32 = 10;
    pub const RALLY_MULTIPLIER: u32 = 2;
    pub const RALLY_BONUS_AFTER: u32 = 3; // bonus starts on the 4th hit
    pub const SPEED_BONUS_WINDOW_MS: u64 = 1000;
    pub const SPEED_BONUS_POINTS: u32 = 5;
    pub const STREAK_MULTIPLIER: f64 = 0.1;
    pub const MAX_MULTIPLIER: f64 = 5.0;
    pub const PERFECT_HIT_BONUS: u32 = 15;
    pub const PERFECT_HIT_ZONE: f32 = 0.2;
    pub const EDGE_HIT_BONUS: u32 = 8;
    pub const EDGE_HIT_ZONE: f32 = 0.7;
}
