//! Bonus scoring: rally, speed, perfect/edge hits, streak multipliers and
//! goal totals.

use crate::params::Scoring;
use crate::systems::PaddleHit;
use crate::{
    BonusKind, Events, GameEvent, GameMode, PlayerId, PlayerStats, RallyState, Scoreboard,
};

/// Points a goal is worth for the scoring player right now
pub fn goal_points(stats: &PlayerStats) -> u32 {
    let base = (Scoring::BASE_GOAL + stats.rally_bonus + stats.speed_bonus) as f64;
    (base * stats.multiplier).floor() as u32
}

/// Credit a paddle hit to `stats` and break the opponent's hit streak.
///
/// Steps run in a fixed order: rally bonus, speed bonus, perfect or edge
/// bonus, multiplier, opponent reset.
pub fn on_paddle_hit(
    hit: &PaddleHit,
    stats: &mut PlayerStats,
    opponent: &mut PlayerStats,
    rally: &mut RallyState,
    now_ms: u64,
    events: &mut Events,
) {
    let player = hit.player;
    rally.rally_count += 1;

    events.push(GameEvent::PaddleHit {
        player,
        color: player.color(),
        hit_position: hit.hit_position,
        time_since_last_hit_ms: hit.time_since_last_hit_ms,
        rally_count: rally.rally_count,
    });

    if rally.rally_count > Scoring::RALLY_BONUS_AFTER {
        let points = (rally.rally_count / 2) * Scoring::RALLY_MULTIPLIER;
        stats.rally_bonus += points;
        events.push(GameEvent::BonusAwarded {
            player,
            kind: BonusKind::Rally,
            points,
        });
    }

    if hit.time_since_last_hit_ms < Scoring::SPEED_BONUS_WINDOW_MS {
        stats.speed_bonus += Scoring::SPEED_BONUS_POINTS;
        events.push(GameEvent::BonusAwarded {
            player,
            kind: BonusKind::Speed,
            points: Scoring::SPEED_BONUS_POINTS,
        });
    }

    let offset = hit.hit_position.abs();
    let placement = if offset < Scoring::PERFECT_HIT_ZONE {
        Some((BonusKind::PerfectHit, Scoring::PERFECT_HIT_BONUS))
    } else if offset > Scoring::EDGE_HIT_ZONE {
        Some((BonusKind::EdgeHit, Scoring::EDGE_HIT_BONUS))
    } else {
        None
    };
    if let Some((kind, points)) = placement {
        stats.total_score += points;
        events.push(GameEvent::BonusAwarded {
            player,
            kind,
            points,
        });
    }

    stats.consecutive_hits += 1;
    stats.multiplier = PlayerStats::multiplier_for(stats.consecutive_hits);
    if stats.multiplier > 1.0 {
        events.push(GameEvent::MultiplierChanged {
            player,
            multiplier: stats.multiplier,
        });
    }

    stats.last_hit_ms = now_ms;
    rally.last_hit_ms = now_ms;

    break_opponent_streak(player, opponent, events);

    log::trace!(
        "{:?} hit at {:.2}, rally {}, multiplier {:.1}",
        player,
        hit.hit_position,
        rally.rally_count,
        stats.multiplier
    );
}

/// Drop the opponent's hit streak, announcing the reset if it had built up
fn break_opponent_streak(player: PlayerId, opponent: &mut PlayerStats, events: &mut Events) {
    let was_boosted = opponent.multiplier > 1.0;
    opponent.break_streak();
    if was_boosted {
        events.push(GameEvent::MultiplierChanged {
            player: player.opponent(),
            multiplier: opponent.multiplier,
        });
    }
}

/// Bank a goal for `stats` and wipe the opponent's streak and bonuses.
///
/// Returns the points awarded.
pub fn on_goal(
    player: PlayerId,
    stats: &mut PlayerStats,
    opponent: &mut PlayerStats,
    events: &mut Events,
) -> u32 {
    let points = goal_points(stats);

    stats.score += 1;
    stats.total_score += points;
    stats.streak += 1;
    stats.rally_bonus = 0;
    stats.speed_bonus = 0;

    opponent.streak = 0;
    opponent.rally_bonus = 0;
    opponent.speed_bonus = 0;

    events.push(GameEvent::GoalScored {
        player,
        color: player.color(),
        points,
    });
    break_opponent_streak(player, opponent, events);
    log::info!(
        "{:?} scored {} points (total {}, streak {})",
        player,
        points,
        stats.total_score,
        stats.streak
    );

    points
}

/// Apply a paddle hit to the right pair of stats
pub fn score_hit(
    scoreboard: &mut Scoreboard,
    hit: &PaddleHit,
    rally: &mut RallyState,
    now_ms: u64,
    events: &mut Events,
) {
    let (stats, opponent) = scoreboard.pair_mut(hit.player);
    on_paddle_hit(hit, stats, opponent, rally, now_ms, events);
}

/// Apply a goal to the right pair of stats
pub fn score_goal(scoreboard: &mut Scoreboard, player: PlayerId, events: &mut Events) -> u32 {
    let (stats, opponent) = scoreboard.pair_mut(player);
    on_goal(player, stats, opponent, events)
}

/// Announce a winner once either total reaches `win_score`.
///
/// Player one is evaluated first and wins a simultaneous crossing.
pub fn check_win(scoreboard: &Scoreboard, win_score: u32, mode: GameMode) -> Option<GameEvent> {
    let winner = scoreboard.has_winner(win_score)?;
    Some(GameEvent::WinDeclared {
        winner,
        label: mode.player_label(winner),
        totals: scoreboard.totals(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn hit(player: PlayerId, hit_position: f32, since_ms: u64) -> PaddleHit {
        PaddleHit {
            player,
            pos: Vec2::ZERO,
            hit_position,
            time_since_last_hit_ms: since_ms,
            rally_count: 0,
        }
    }

    fn bonus_kinds(events: &Events) -> Vec<BonusKind> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::BonusAwarded { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_goal_points_formula() {
        let stats = PlayerStats {
            rally_bonus: 4,
            speed_bonus: 5,
            multiplier: 1.3,
            ..PlayerStats::default()
        };
        assert_eq!(goal_points(&stats), 24);
    }

    #[test]
    fn test_plain_goal_is_worth_base() {
        assert_eq!(goal_points(&PlayerStats::default()), 10);
    }

    #[test]
    fn test_perfect_hit_bonus() {
        let mut stats = PlayerStats::default();
        let mut opponent = PlayerStats::default();
        let mut rally = RallyState::new();
        let mut events = Events::new();

        on_paddle_hit(
            &hit(PlayerId::One, 0.1, 5_000),
            &mut stats,
            &mut opponent,
            &mut rally,
            5_000,
            &mut events,
        );

        assert_eq!(stats.total_score, 15);
        assert_eq!(bonus_kinds(&events), vec![BonusKind::PerfectHit]);
    }

    #[test]
    fn test_edge_hit_bonus() {
        let mut stats = PlayerStats::default();
        let mut opponent = PlayerStats::default();
        let mut rally = RallyState::new();
        let mut events = Events::new();

        on_paddle_hit(
            &hit(PlayerId::One, -0.8, 5_000),
            &mut stats,
            &mut opponent,
            &mut rally,
            5_000,
            &mut events,
        );

        assert_eq!(stats.total_score, 8);
        assert_eq!(bonus_kinds(&events), vec![BonusKind::EdgeHit]);
    }

    #[test]
    fn test_mid_paddle_hit_has_no_placement_bonus() {
        let mut stats = PlayerStats::default();
        let mut opponent = PlayerStats::default();
        let mut rally = RallyState::new();
        let mut events = Events::new();

        on_paddle_hit(
            &hit(PlayerId::One, 0.5, 5_000),
            &mut stats,
            &mut opponent,
            &mut rally,
            5_000,
            &mut events,
        );

        assert_eq!(stats.total_score, 0);
        assert!(bonus_kinds(&events).is_empty());
    }

    #[test]
    fn test_speed_bonus_inside_window() {
        let mut stats = PlayerStats::default();
        let mut opponent = PlayerStats::default();
        let mut rally = RallyState::new();
        let mut events = Events::new();

        on_paddle_hit(
            &hit(PlayerId::One, 0.5, 999),
            &mut stats,
            &mut opponent,
            &mut rally,
            999,
            &mut events,
        );
        assert_eq!(stats.speed_bonus, 5);

        on_paddle_hit(
            &hit(PlayerId::One, 0.5, 1_000),
            &mut stats,
            &mut opponent,
            &mut rally,
            1_999,
            &mut events,
        );
        assert_eq!(stats.speed_bonus, 5, "No bonus at exactly one second");
    }

    #[test]
    fn test_rally_bonus_starts_on_fourth_hit() {
        let mut stats = PlayerStats::default();
        let mut opponent = PlayerStats::default();
        let mut rally = RallyState::new();
        let mut events = Events::new();

        for _ in 0..3 {
            on_paddle_hit(
                &hit(PlayerId::One, 0.5, 5_000),
                &mut stats,
                &mut opponent,
                &mut rally,
                5_000,
                &mut events,
            );
        }
        assert_eq!(stats.rally_bonus, 0);

        // 4th hit: floor(4/2) * 2, 5th hit: floor(5/2) * 2
        on_paddle_hit(
            &hit(PlayerId::One, 0.5, 5_000),
            &mut stats,
            &mut opponent,
            &mut rally,
            5_000,
            &mut events,
        );
        assert_eq!(stats.rally_bonus, 4);
        on_paddle_hit(
            &hit(PlayerId::One, 0.5, 5_000),
            &mut stats,
            &mut opponent,
            &mut rally,
            5_000,
            &mut events,
        );
        assert_eq!(stats.rally_bonus, 8);
        assert_eq!(rally.rally_count, 5);
    }

    #[test]
    fn test_five_hits_give_one_and_a_half_multiplier() {
        let mut stats = PlayerStats::default();
        let mut opponent = PlayerStats::default();
        let mut rally = RallyState::new();
        let mut events = Events::new();

        for _ in 0..5 {
            on_paddle_hit(
                &hit(PlayerId::One, 0.5, 5_000),
                &mut stats,
                &mut opponent,
                &mut rally,
                5_000,
                &mut events,
            );
        }

        assert!((stats.multiplier - 1.5).abs() < 1e-9);
        assert_eq!(stats.consecutive_hits, 5);
    }

    #[test]
    fn test_hit_resets_opponent_multiplier() {
        let mut stats = PlayerStats::default();
        let mut opponent = PlayerStats {
            consecutive_hits: 4,
            multiplier: 1.4,
            streak: 2,
            ..PlayerStats::default()
        };
        let mut rally = RallyState::new();
        let mut events = Events::new();

        on_paddle_hit(
            &hit(PlayerId::One, 0.5, 5_000),
            &mut stats,
            &mut opponent,
            &mut rally,
            5_000,
            &mut events,
        );

        assert_eq!(opponent.consecutive_hits, 0);
        assert_eq!(opponent.multiplier, 1.0);
        assert_eq!(opponent.streak, 2, "Goal streak survives a hit");
        assert!(events.iter().any(|e| *e
            == GameEvent::MultiplierChanged {
                player: PlayerId::Two,
                multiplier: 1.0,
            }));
    }

    #[test]
    fn test_hit_skips_reset_event_for_idle_opponent() {
        let mut stats = PlayerStats::default();
        let mut opponent = PlayerStats::default();
        let mut rally = RallyState::new();
        let mut events = Events::new();

        on_paddle_hit(
            &hit(PlayerId::One, 0.5, 5_000),
            &mut stats,
            &mut opponent,
            &mut rally,
            5_000,
            &mut events,
        );

        assert!(!events.iter().any(|e| matches!(
            e,
            GameEvent::MultiplierChanged {
                player: PlayerId::Two,
                ..
            }
        )));
    }

    #[test]
    fn test_hit_records_timestamps() {
        let mut stats = PlayerStats::default();
        let mut opponent = PlayerStats::default();
        let mut rally = RallyState::new();
        let mut events = Events::new();

        on_paddle_hit(
            &hit(PlayerId::Two, 0.5, 5_000),
            &mut stats,
            &mut opponent,
            &mut rally,
            8_000,
            &mut events,
        );

        assert_eq!(stats.last_hit_ms, 8_000);
        assert_eq!(rally.last_hit_ms, 8_000);
        assert!(matches!(
            events.iter().next(),
            Some(GameEvent::PaddleHit {
                player: PlayerId::Two,
                rally_count: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_goal_updates_scorer_and_resets_opponent() {
        let mut stats = PlayerStats {
            rally_bonus: 4,
            speed_bonus: 5,
            consecutive_hits: 3,
            multiplier: 1.3,
            streak: 1,
            total_score: 15,
            ..PlayerStats::default()
        };
        let mut opponent = PlayerStats {
            rally_bonus: 6,
            speed_bonus: 10,
            consecutive_hits: 2,
            multiplier: 1.2,
            streak: 3,
            ..PlayerStats::default()
        };
        let mut events = Events::new();

        let points = on_goal(PlayerId::One, &mut stats, &mut opponent, &mut events);

        assert_eq!(points, 24);
        assert_eq!(stats.score, 1);
        assert_eq!(stats.total_score, 39);
        assert_eq!(stats.streak, 2);
        assert_eq!(stats.rally_bonus, 0);
        assert_eq!(stats.speed_bonus, 0);
        assert_eq!(stats.consecutive_hits, 3, "Scorer keeps hit streak");

        assert_eq!(opponent.streak, 0);
        assert_eq!(opponent.consecutive_hits, 0);
        assert_eq!(opponent.multiplier, 1.0);
        assert_eq!(opponent.rally_bonus, 0);
        assert_eq!(opponent.speed_bonus, 0);

        assert!(matches!(
            events.iter().next(),
            Some(GameEvent::GoalScored { points: 24, .. })
        ));
        assert_eq!(
            events.iter().nth(1),
            Some(&GameEvent::MultiplierChanged {
                player: PlayerId::Two,
                multiplier: 1.0,
            })
        );
    }

    #[test]
    fn test_score_hit_routes_to_player() {
        let mut scoreboard = Scoreboard::new();
        scoreboard.get_mut(PlayerId::One).consecutive_hits = 2;
        scoreboard.get_mut(PlayerId::One).multiplier = 1.2;
        let mut rally = RallyState::new();
        let mut events = Events::new();

        score_hit(
            &mut scoreboard,
            &hit(PlayerId::Two, 0.0, 5_000),
            &mut rally,
            5_000,
            &mut events,
        );

        assert_eq!(scoreboard.get(PlayerId::Two).total_score, 15);
        assert_eq!(scoreboard.get(PlayerId::One).multiplier, 1.0);
    }

    #[test]
    fn test_check_win_tie_break() {
        let mut scoreboard = Scoreboard::new();
        scoreboard.get_mut(PlayerId::One).total_score = 60;
        scoreboard.get_mut(PlayerId::Two).total_score = 60;

        let event = check_win(&scoreboard, 50, GameMode::TwoPlayer);

        assert_eq!(
            event,
            Some(GameEvent::WinDeclared {
                winner: PlayerId::One,
                label: "Player 1",
                totals: [60, 60],
            })
        );
    }

    #[test]
    fn test_check_win_names_cpu() {
        let mut scoreboard = Scoreboard::new();
        scoreboard.get_mut(PlayerId::Two).total_score = 50;

        let event = check_win(&scoreboard, 50, GameMode::VsCpu).unwrap();

        assert_eq!(
            event.popup_text().as_deref(),
            Some("CPU Wins!\nFinal Score: 0 - 50")
        );
    }

    #[test]
    fn test_check_win_below_threshold() {
        let scoreboard = Scoreboard::new();
        assert!(check_win(&scoreboard, 10, GameMode::VsCpu).is_none());
    }

    #[test]
    fn test_score_goal_routes_to_player() {
        let mut scoreboard = Scoreboard::new();
        let mut events = Events::new();

        let points = score_goal(&mut scoreboard, PlayerId::Two, &mut events);

        assert_eq!(points, 10);
        assert_eq!(scoreboard.get(PlayerId::Two).score, 1);
        assert_eq!(scoreboard.get(PlayerId::One).score, 0);
    }
}
