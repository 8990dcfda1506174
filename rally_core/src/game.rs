use glam::Vec2;
use hecs::{Entity, World};

use crate::ai::{drive_cpu, PaddlePolicy, TrackingCpu};
use crate::params::Params;
use crate::systems::*;
use crate::{
    create_ball, create_paddle, Ball, Clock, Command, Config, Events, GameEvent, GameFsm,
    GameMode, GameRng, Paddle, Phase, PlayerId, PlayerStats, RallyState, RunState, Scoreboard,
    Snapshot, Steer, SystemClock, Time, TransitionResult, WinScore,
};

/// The whole simulation: entities, resources and the state machine
pub struct GameWorld {
    world: World,
    paddles: [Entity; 2],
    ball: Entity,
    config: Config,
    time: Time,
    fsm: GameFsm,
    scoreboard: Scoreboard,
    rally: RallyState,
    win_score: WinScore,
    events: Events,
    rng: GameRng,
    clock: Box<dyn Clock>,
    cpu: Box<dyn PaddlePolicy>,
    controls: Controls,
}

impl GameWorld {
    /// Boot into the menu with a seeded RNG and the system clock
    pub fn new(config: Config, seed: u64) -> Self {
        Self::with_parts(config, GameRng::new(seed), Box::new(SystemClock))
    }

    pub fn with_parts(config: Config, rng: GameRng, clock: Box<dyn Clock>) -> Self {
        let mut world = World::new();
        let paddles = [
            create_paddle(&mut world, PlayerId::One, &config),
            create_paddle(&mut world, PlayerId::Two, &config),
        ];
        let ball = create_ball(&mut world, Vec2::ZERO, Vec2::ZERO);
        let win_score = WinScore::new(config.win_score);

        Self {
            world,
            paddles,
            ball,
            config,
            time: Time::new(),
            fsm: GameFsm::new(),
            scoreboard: Scoreboard::new(),
            rally: RallyState::new(),
            win_score,
            events: Events::new(),
            rng,
            clock,
            cpu: Box::new(TrackingCpu::default()),
            controls: Controls::default(),
        }
    }

    /// Swap the opponent used in VsCpu mode
    pub fn set_cpu_policy(&mut self, policy: Box<dyn PaddlePolicy>) {
        self.cpu = policy;
    }

    pub fn set_controls(&mut self, controls: Controls) {
        self.controls = controls;
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.time.frame
    }

    pub fn mode(&self) -> GameMode {
        self.fsm.mode()
    }

    pub fn phase(&self) -> Phase {
        self.fsm.phase()
    }

    pub fn run_state(&self) -> RunState {
        self.fsm.run_state()
    }

    pub fn stats(&self, player: PlayerId) -> PlayerStats {
        *self.scoreboard.get(player)
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn rally(&self) -> RallyState {
        self.rally
    }

    pub fn win_score(&self) -> u32 {
        self.win_score.get()
    }

    pub fn ball(&self) -> Ball {
        self.world
            .get::<&Ball>(self.ball)
            .map(|ball| *ball)
            .unwrap_or_else(|_| Ball::new(Vec2::ZERO, Vec2::ZERO))
    }

    pub fn paddle(&self, player: PlayerId) -> Paddle {
        self.world
            .get::<&Paddle>(self.paddles[player.index()])
            .map(|paddle| *paddle)
            .unwrap_or_else(|_| {
                Paddle::new(player, Vec2::new(self.config.paddle_x(player), 0.0))
            })
    }

    /// Events produced by the last `tick` or `advance` call
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    /// Teleport the ball, e.g. to script a scenario
    pub fn place_ball(&mut self, pos: Vec2, vel: Vec2) {
        if let Ok(mut ball) = self.world.get::<&mut Ball>(self.ball) {
            ball.pos = pos;
            ball.vel = vel;
        }
    }

    /// Teleport a paddle; Y is clamped to the field
    pub fn place_paddle(&mut self, player: PlayerId, y: f32) {
        let y = self.config.clamp_paddle_y(y);
        if let Ok(mut paddle) = self.world.get::<&mut Paddle>(self.paddles[player.index()]) {
            paddle.pos.y = y;
        }
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Run a command through the state machine and apply its side effects.
    ///
    /// Commands that do not apply in the current state are ignored.
    pub fn apply(&mut self, command: Command) -> TransitionResult {
        let result = self.fsm.apply(command);
        if !result.applied {
            return result;
        }

        match command {
            Command::SelectMode(_) | Command::ResetGame | Command::NewGame => self.clear_game(),
            Command::AdjustWinScore(delta) => {
                self.win_score.adjust(delta);
                log::debug!("Win score now {}", self.win_score.get());
            }
            Command::StartBall => self.launch_ball(),
            Command::TogglePause => {}
            Command::ResetRound => self.clear_round(),
        }
        result
    }

    pub fn select_mode(&mut self, mode: GameMode) -> TransitionResult {
        self.apply(Command::SelectMode(mode))
    }

    pub fn adjust_win_score(&mut self, delta: i32) -> TransitionResult {
        self.apply(Command::AdjustWinScore(delta))
    }

    pub fn start_ball(&mut self) -> TransitionResult {
        self.apply(Command::StartBall)
    }

    pub fn toggle_pause(&mut self) -> TransitionResult {
        self.apply(Command::TogglePause)
    }

    pub fn reset_round(&mut self) -> TransitionResult {
        self.apply(Command::ResetRound)
    }

    pub fn reset_game(&mut self) -> TransitionResult {
        self.apply(Command::ResetGame)
    }

    pub fn new_game(&mut self) -> TransitionResult {
        self.apply(Command::NewGame)
    }

    /// Whether `command` would be accepted right now
    pub fn can_apply(&self, command: Command) -> bool {
        self.fsm.can_apply(command)
    }

    /// Map a key press through the control bindings and apply it
    pub fn handle_key_down(&mut self, code: &str) -> Option<TransitionResult> {
        let command = command_for_key(code, self.fsm.mode(), &self.controls)?;
        Some(self.apply(command))
    }

    fn launch_ball(&mut self) {
        let now = self.clock.now_ms();
        if let Ok(mut ball) = self.world.get::<&mut Ball>(self.ball) {
            ball.launch(self.config.ball_speed_initial, &mut self.rng);
        }
        self.rally.serve(now);
    }

    fn clear_round(&mut self) {
        if let Ok(mut ball) = self.world.get::<&mut Ball>(self.ball) {
            ball.reset();
        }
        self.rally.reset();
    }

    fn clear_game(&mut self) {
        self.scoreboard.reset();
        self.clear_round();
        for (_entity, (paddle, steer)) in self.world.query_mut::<(&mut Paddle, &mut Steer)>() {
            paddle.pos.y = 0.0;
            paddle.boosting = false;
            *steer = Steer::hold();
        }
    }

    // ------------------------------------------------------------------
    // Frame stepping
    // ------------------------------------------------------------------

    /// Simulate exactly one frame
    pub fn tick(&mut self, input: &FrameInput) {
        self.events.clear();
        self.step_frame(input);
    }

    /// Bank `elapsed` seconds of wall time and simulate the fixed frames it
    /// covers. Events from all of those frames stay queued. Returns the
    /// number of frames run.
    pub fn advance(&mut self, elapsed: f32, input: &FrameInput) -> u32 {
        self.events.clear();
        let frames = self.time.frames_due(elapsed);
        for _ in 0..frames {
            self.step_frame(input);
        }
        frames
    }

    fn step_frame(&mut self, input: &FrameInput) {
        self.time.frame += 1;

        if self.fsm.paddles_active() {
            let mode = self.fsm.mode();
            ingest_inputs(&mut self.world, input, mode, &self.config);
            if mode == GameMode::VsCpu {
                drive_cpu(&mut self.world, PlayerId::Two, self.cpu.as_mut(), &self.config);
            }
            move_paddles(&mut self.world, &self.config);
        }

        if self.fsm.ball_active() {
            self.step_ball();
        }

        update_particles(&mut self.world);
    }

    fn step_ball(&mut self) {
        let now = self.clock.now_ms();

        if let Some(pos) = move_ball(&mut self.world, &self.config, &mut self.events) {
            spawn_burst(&mut self.world, &mut self.rng, pos, Params::WALL_COLOR);
        }

        if let Some(hit) = check_collisions(&mut self.world, &self.config, &self.rally, now) {
            score_hit(&mut self.scoreboard, &hit, &mut self.rally, now, &mut self.events);
            spawn_burst(&mut self.world, &mut self.rng, hit.pos, hit.player.color());
        }

        if let Some(scorer) = check_goal(&self.world, &self.config) {
            let pos = self.ball().pos;
            score_goal(&mut self.scoreboard, scorer, &mut self.events);
            spawn_burst(&mut self.world, &mut self.rng, pos, scorer.color());
            self.apply(Command::ResetRound);

            if let Some(win) = check_win(&self.scoreboard, self.win_score.get(), self.fsm.mode()) {
                log::info!("{}", win.popup_text().unwrap_or_default());
                self.events.push(win);
                self.apply(Command::ResetGame);
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let ball = self.ball();
        let speed_ratio = (ball.speed() / self.config.ball_speed_max).min(1.0);

        Snapshot {
            frame: self.time.frame,
            mode: self.fsm.mode(),
            phase: self.fsm.phase(),
            run: self.fsm.run_state(),
            ball,
            ball_intensity: 0.8 + speed_ratio * 0.2,
            paddles: [self.paddle(PlayerId::One), self.paddle(PlayerId::Two)],
            stats: self.scoreboard.players,
            rally: self.rally,
            win_score: self.win_score.get(),
            particles: collect_particles(&self.world),
        }
    }
}
