//! Game State Machine
//!
//! Tracks the selected mode and the started/paused flags, and decides which
//! commands apply in the current state. Side effects of a transition (ball
//! resets, stat wipes) are carried out by [`crate::GameWorld`].

use serde::Serialize;

use crate::PlayerId;

/// Top-level mode picked from the menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum GameMode {
    #[default]
    Menu,
    VsCpu,
    TwoPlayer,
}

impl GameMode {
    /// Name shown for `player` when announcing a winner
    pub fn player_label(self, player: PlayerId) -> &'static str {
        match (player, self) {
            (PlayerId::One, _) => "Player 1",
            (PlayerId::Two, GameMode::VsCpu) => "CPU",
            (PlayerId::Two, _) => "Player 2",
        }
    }
}

/// Whether the ball is in play and whether play is frozen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunState {
    pub started: bool,
    pub paused: bool,
}

/// Coarse view of mode plus run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Menu,
    NotStarted,
    Running,
    Paused,
}

/// Discrete commands accepted by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectMode(GameMode),
    AdjustWinScore(i32),
    StartBall,
    TogglePause,
    ResetRound,
    ResetGame,
    NewGame,
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub applied: bool,
    pub from: Phase,
    pub to: Phase,
    pub command: Command,
}

/// Game Finite State Machine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameFsm {
    mode: GameMode,
    run: RunState,
}

impl GameFsm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn phase(&self) -> Phase {
        if self.mode == GameMode::Menu {
            Phase::Menu
        } else if self.run.paused {
            Phase::Paused
        } else if self.run.started {
            Phase::Running
        } else {
            Phase::NotStarted
        }
    }

    /// Paddles (and the CPU) may move this frame
    pub fn paddles_active(&self) -> bool {
        self.mode != GameMode::Menu && !self.run.paused
    }

    /// The ball is in flight this frame
    pub fn ball_active(&self) -> bool {
        self.paddles_active() && self.run.started
    }

    /// Check if a command would change anything
    pub fn can_apply(&self, command: Command) -> bool {
        self.next_state(command).is_some()
    }

    /// Attempt a transition
    pub fn apply(&mut self, command: Command) -> TransitionResult {
        let from = self.phase();
        let applied = match self.next_state(command) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        };

        let to = self.phase();
        if applied {
            log::debug!("{:?}: {:?} -> {:?}", command, from, to);
        } else {
            log::debug!("{:?} ignored in {:?}", command, from);
        }

        TransitionResult {
            applied,
            from,
            to,
            command,
        }
    }

    /// Get next state for a given command (if valid)
    fn next_state(&self, command: Command) -> Option<GameFsm> {
        let in_menu = self.mode == GameMode::Menu;

        match command {
            Command::SelectMode(GameMode::Menu) => None,
            Command::SelectMode(mode) if in_menu => Some(GameFsm {
                mode,
                run: RunState::default(),
            }),
            Command::SelectMode(_) => None,

            Command::StartBall if !in_menu && !self.run.started && !self.run.paused => {
                Some(GameFsm {
                    mode: self.mode,
                    run: RunState {
                        started: true,
                        paused: false,
                    },
                })
            }
            Command::StartBall => None,

            Command::TogglePause if !in_menu => Some(GameFsm {
                mode: self.mode,
                run: RunState {
                    started: self.run.started,
                    paused: !self.run.paused,
                },
            }),
            Command::TogglePause => None,

            Command::ResetRound => Some(GameFsm {
                mode: self.mode,
                run: RunState {
                    started: false,
                    paused: self.run.paused,
                },
            }),

            Command::ResetGame => Some(GameFsm {
                mode: self.mode,
                run: RunState::default(),
            }),

            Command::NewGame => Some(GameFsm::default()),

            // The win threshold lives outside the state machine
            Command::AdjustWinScore(_) => Some(*self),
        }
    }
}
