use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use serde::Serialize;

use crate::params::Params;
use crate::{PlayerId, PlayerStats};

/// Frame counter and wall-time accumulator for the fixed-step driver
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    pub frame: u64,       // logical frames simulated so far
    pub accumulator: f32, // wall time not yet turned into frames
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank `elapsed` seconds and return how many fixed frames are due.
    ///
    /// At most `MAX_FRAMES_PER_UPDATE` frames are released per call; any
    /// backlog beyond that is dropped.
    pub fn frames_due(&mut self, elapsed: f32) -> u32 {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.accumulator += elapsed;
        }

        let mut frames = 0;
        while self.accumulator >= Params::FIXED_DT && frames < Params::MAX_FRAMES_PER_UPDATE {
            self.accumulator -= Params::FIXED_DT;
            frames += 1;
        }
        if frames == Params::MAX_FRAMES_PER_UPDATE {
            self.accumulator %= Params::FIXED_DT;
        }
        frames
    }
}

/// Source of wall-clock milliseconds for hit timing
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Hand-driven clock; clones share the same reading
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<u64>>);

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self(Rc::new(Cell::new(start_ms)))
    }

    pub fn set(&self, ms: u64) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// State of the current rally, from serve to goal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RallyState {
    pub rally_count: u32,
    pub last_hit_ms: u64, // serve or last paddle hit
}

impl RallyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.rally_count = 0;
    }

    /// Start a new rally at `now_ms`
    pub fn serve(&mut self, now_ms: u64) {
        self.rally_count = 0;
        self.last_hit_ms = now_ms;
    }
}

/// Both players' stats, indexed by [`PlayerId`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Scoreboard {
    pub players: [PlayerStats; 2],
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, player: PlayerId) -> &PlayerStats {
        &self.players[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut PlayerStats {
        &mut self.players[player.index()]
    }

    /// Borrow `player`'s stats and the opponent's at once
    pub fn pair_mut(&mut self, player: PlayerId) -> (&mut PlayerStats, &mut PlayerStats) {
        let [one, two] = &mut self.players;
        match player {
            PlayerId::One => (one, two),
            PlayerId::Two => (two, one),
        }
    }

    pub fn reset(&mut self) {
        self.players = [PlayerStats::default(); 2];
    }

    pub fn totals(&self) -> [u32; 2] {
        [self.players[0].total_score, self.players[1].total_score]
    }

    /// Player one is checked first, so it wins when both reach the threshold
    /// in the same evaluation
    pub fn has_winner(&self, win_score: u32) -> Option<PlayerId> {
        PlayerId::BOTH
            .into_iter()
            .find(|player| self.get(*player).total_score >= win_score)
    }
}

/// Total score needed to win, kept inside `[WIN_SCORE_MIN, WIN_SCORE_MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinScore(u32);

impl WinScore {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(Params::WIN_SCORE_MIN, Params::WIN_SCORE_MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn adjust(&mut self, delta: i32) {
        let next = (self.0 as i64 + delta as i64)
            .clamp(Params::WIN_SCORE_MIN as i64, Params::WIN_SCORE_MAX as i64);
        self.0 = next as u32;
    }
}

impl Default for WinScore {
    fn default() -> Self {
        Self::new(Params::WIN_SCORE)
    }
}

/// Flat or accumulated bonus handed out on a paddle hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BonusKind {
    Rally,
    Speed,
    PerfectHit,
    EdgeHit,
}

impl BonusKind {
    pub fn label(self) -> &'static str {
        match self {
            BonusKind::Rally => "Rally Bonus!",
            BonusKind::Speed => "Speed Bonus!",
            BonusKind::PerfectHit => "Perfect Hit!",
            BonusKind::EdgeHit => "Edge Hit!",
        }
    }
}

/// Something the presentation layer may want to show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    WallBounce {
        pos: Vec2,
    },
    PaddleHit {
        player: PlayerId,
        color: u32,
        hit_position: f32,
        time_since_last_hit_ms: u64,
        rally_count: u32,
    },
    BonusAwarded {
        player: PlayerId,
        kind: BonusKind,
        points: u32,
    },
    MultiplierChanged {
        player: PlayerId,
        multiplier: f64,
    },
    GoalScored {
        player: PlayerId,
        color: u32,
        points: u32,
    },
    WinDeclared {
        winner: PlayerId,
        label: &'static str,
        totals: [u32; 2],
    },
}

impl GameEvent {
    /// Popup text for events that carry one
    pub fn popup_text(&self) -> Option<String> {
        match self {
            GameEvent::BonusAwarded { kind, points, .. } => {
                Some(format!("{} +{}", kind.label(), points))
            }
            GameEvent::MultiplierChanged { multiplier, .. } if *multiplier > 1.0 => {
                Some(format!("{:.1}x MULTIPLIER", multiplier))
            }
            GameEvent::MultiplierChanged { .. } => None,
            GameEvent::GoalScored { points, .. } => Some(format!("GOAL! +{} points", points)),
            GameEvent::WinDeclared { label, totals, .. } => Some(format!(
                "{} Wins!\nFinal Score: {} - {}",
                label, totals[0], totals[1]
            )),
            GameEvent::WallBounce { .. } | GameEvent::PaddleHit { .. } => None,
        }
    }
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Default)]
pub struct Events {
    queue: Vec<GameEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.queue.iter()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.queue.drain(..)
    }
}
