use glam::Vec2;
use proptest::prelude::*;
use rally_core::*;

fn intent() -> impl Strategy<Value = PaddleIntent> {
    (-1i8..=1, any::<bool>()).prop_map(|(dir, boost)| PaddleIntent { dir, boost })
}

proptest! {
    /// Property: paddles never leave the field, whatever the input
    #[test]
    fn prop_paddles_stay_in_bounds(
        seed in any::<u64>(),
        inputs in prop::collection::vec((intent(), intent()), 1..200)
    ) {
        let mut game = GameWorld::with_parts(
            Config::new(),
            GameRng::new(seed),
            Box::new(ManualClock::new(0)),
        );
        game.select_mode(GameMode::TwoPlayer);
        game.start_ball();
        let limit = game.config().paddle_limit();

        for (one, two) in inputs {
            let input = FrameInput::new()
                .with(PlayerId::One, one)
                .with(PlayerId::Two, two);
            game.tick(&input);
            for player in PlayerId::BOTH {
                let y = game.paddle(player).pos.y;
                prop_assert!(y.abs() <= limit + 1e-4, "{:?} at {}", player, y);
            }
        }
    }

    /// Property: a paddle return never exceeds the speed cap
    #[test]
    fn prop_hit_respects_speed_cap(
        speed in 0.1f32..1.5,
        angle in -1.2f32..1.2,
        offset in -4.3f32..4.3
    ) {
        let config = Config::new();
        let paddle = Paddle::new(PlayerId::Two, Vec2::new(config.paddle_x(PlayerId::Two), 0.0));
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        let mut ball = Ball::new(Vec2::new(paddle.pos.x - 0.5, offset), vel);

        let hit = resolve_paddle_collision(&mut ball, &paddle, &config);

        prop_assert!(hit.is_some());
        prop_assert!(ball.vel.x < 0.0);
        prop_assert!(ball.speed() <= config.ball_speed_max + 1e-4);
    }

    /// Property: the ball stays between the walls while in play
    #[test]
    fn prop_ball_stays_between_walls(
        seed in any::<u64>(),
        frames in 1usize..400
    ) {
        let mut game = GameWorld::with_parts(
            Config::new(),
            GameRng::new(seed),
            Box::new(ManualClock::new(0)),
        );
        game.select_mode(GameMode::VsCpu);
        game.start_ball();
        let wall = game.config().wall_y();

        for _ in 0..frames {
            game.tick(&FrameInput::new());
            prop_assert!(game.ball().pos.y.abs() <= wall + 1e-4);
        }
    }
}
