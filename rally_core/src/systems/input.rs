//! Keyboard sampling: held keys become per-player intents, key presses
//! become commands.

use std::collections::HashSet;

use hecs::World;

use crate::{Command, Config, GameMode, Paddle, PaddleIntent, PlayerId, Steer};

/// Key codes bound to one player's paddle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerKeys {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub boost: Vec<String>,
}

impl PlayerKeys {
    fn new(up: &str, down: &str, boost: &str) -> Self {
        Self {
            up: vec![up.to_string()],
            down: vec![down.to_string()],
            boost: vec![boost.to_string()],
        }
    }
}

/// Full key binding table, using DOM `KeyboardEvent.code` names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub players: [PlayerKeys; 2],
    pub start: Vec<String>,
    pub pause: Vec<String>,
    pub reset: Vec<String>,
    pub new_game: Vec<String>,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            players: [
                PlayerKeys::new("KeyW", "KeyS", "ShiftLeft"),
                PlayerKeys::new("ArrowUp", "ArrowDown", "ShiftRight"),
            ],
            start: vec!["Space".to_string()],
            pause: vec!["Escape".to_string()],
            reset: vec!["KeyR".to_string()],
            new_game: vec!["KeyN".to_string()],
        }
    }
}

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, code: &str) {
        self.held.insert(code.to_string());
    }

    pub fn release(&mut self, code: &str) {
        self.held.remove(code);
    }

    pub fn is_down(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    pub fn any_down(&self, codes: &[String]) -> bool {
        codes.iter().any(|code| self.is_down(code))
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Continuous input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub players: [PaddleIntent; 2],
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, player: PlayerId, intent: PaddleIntent) -> Self {
        self.players[player.index()] = intent;
        self
    }

    pub fn intent(&self, player: PlayerId) -> PaddleIntent {
        self.players[player.index()]
    }
}

/// Turn held keys into paddle intents; up and down together cancel out
pub fn sample_keys(keys: &KeyState, controls: &Controls) -> FrameInput {
    let mut input = FrameInput::new();
    for player in PlayerId::BOTH {
        let bindings = &controls.players[player.index()];
        let up = keys.any_down(&bindings.up) as i8;
        let down = keys.any_down(&bindings.down) as i8;
        input.players[player.index()] = PaddleIntent {
            dir: up - down,
            boost: keys.any_down(&bindings.boost),
        };
    }
    input
}

/// Map a key press to a command.
///
/// Start, pause and reset keys only count outside the menu; the new-game key
/// always does.
pub fn command_for_key(code: &str, mode: GameMode, controls: &Controls) -> Option<Command> {
    let bound = |codes: &[String]| codes.iter().any(|c| c == code);
    let in_menu = mode == GameMode::Menu;

    if bound(&controls.start) && !in_menu {
        Some(Command::StartBall)
    } else if bound(&controls.pause) && !in_menu {
        Some(Command::TogglePause)
    } else if bound(&controls.reset) && !in_menu {
        Some(Command::ResetRound)
    } else if bound(&controls.new_game) {
        Some(Command::NewGame)
    } else {
        None
    }
}

/// Write human intents onto paddle steers.
///
/// Player two only takes keyboard input in two-player mode; otherwise its
/// steer is left to the CPU.
pub fn ingest_inputs(world: &mut World, input: &FrameInput, mode: GameMode, config: &Config) {
    for (_entity, (paddle, steer)) in world.query_mut::<(&Paddle, &mut Steer)>() {
        let human = match paddle.player_id {
            PlayerId::One => true,
            PlayerId::Two => mode == GameMode::TwoPlayer,
        };
        if human {
            *steer = input.intent(paddle.player_id).steer(config);
        }
    }
}
