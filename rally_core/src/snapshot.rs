use serde::Serialize;

use crate::{
    Ball, GameMode, Paddle, Particle, Phase, PlayerId, PlayerStats, RallyState, RunState,
};

/// Read-only view of the game handed to the presentation layer each frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub mode: GameMode,
    pub phase: Phase,
    pub run: RunState,
    pub ball: Ball,
    /// Brightness hint in [0.8, 1.0], rising with ball speed
    pub ball_intensity: f32,
    pub paddles: [Paddle; 2],
    pub stats: [PlayerStats; 2],
    pub rally: RallyState,
    pub win_score: u32,
    pub particles: Vec<Particle>,
}

impl Snapshot {
    pub fn paddle(&self, player: PlayerId) -> &Paddle {
        &self.paddles[player.index()]
    }

    pub fn stats(&self, player: PlayerId) -> &PlayerStats {
        &self.stats[player.index()]
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
