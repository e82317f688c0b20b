use grid_snake::game::snake::pursuit_direction;
use grid_snake::game::{
    Controls, Direction, GameConfig, GameSession, GameVariant, Pilot, Position, SessionEvent,
    SessionState, SnakeId,
};
use grid_snake::modes::HeadlessMode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_direction(rng: &mut StdRng) -> Direction {
    Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
}

/// Play a round with random steering, checking invariants after every tick
fn fuzz_round(variant: GameVariant, seed: u64) -> GameSession {
    let mut session = GameSession::start(variant, GameConfig::seeded(seed)).unwrap();
    let mut input = StdRng::seed_from_u64(seed ^ 0xfeed);
    let mut toggles = 0;

    for _ in 0..10_000 {
        if session.state() == SessionState::Running {
            for controls in [Controls::Arrows, Controls::Wasd] {
                if input.gen_bool(0.3) {
                    session.steer(controls, random_direction(&mut input)).unwrap();
                }
            }
        }

        let before: Vec<(usize, bool)> = session
            .snakes()
            .iter()
            .map(|snake| (snake.len(), snake.is_alive()))
            .collect();

        let report = session.tick().unwrap();
        toggles += report
            .events
            .iter()
            .filter(|event| matches!(event, SessionEvent::VisibilityToggled { .. }))
            .count();

        for (snake, (len_before, was_alive)) in session.snakes().iter().zip(before) {
            if was_alive {
                assert!(snake.len() >= len_before, "length shrank");
                assert!(snake.len() <= len_before + 1, "grew by more than one");
            } else {
                assert_eq!(snake.len(), len_before, "dead snake changed");
            }
        }

        let food = session.food();
        for snake in session.snakes() {
            assert!(
                snake.segments().all(|segment| *segment != food),
                "food spawned on a snake"
            );
        }

        if report.next_tick.is_none() {
            assert_eq!(toggles, 6);
            return session;
        }
    }

    panic!("round with seed {seed} never ended");
}

#[test]
fn random_rounds_keep_invariants() {
    for variant in GameVariant::ALL {
        for seed in 0..20 {
            let session = fuzz_round(variant, seed);
            assert_eq!(session.state(), SessionState::Ended);
            assert!(session.results().is_ok());
        }
    }
}

#[test]
fn versus_results_name_the_longer_snake() {
    for seed in 0..20 {
        let session = fuzz_round(GameVariant::competitive(), seed);
        let lengths: Vec<usize> = session.snakes().iter().map(|snake| snake.len()).collect();
        let results = session.results().unwrap();

        let banner = if lengths[0] > lengths[1] {
            "PLAYER 1 WINS!"
        } else if lengths[0] < lengths[1] {
            "PLAYER 2 WINS!"
        } else {
            "DRAW!"
        };
        assert_eq!(results[0], banner);
        assert_eq!(results[1], format!("PLAYER 1 SCORE: {}", lengths[0]));
        assert_eq!(results[2], format!("PLAYER 2 SCORE: {}", lengths[1]));
    }
}

#[test]
fn reset_matches_a_fresh_start() {
    for variant in GameVariant::ALL {
        let fresh = GameSession::start(variant, GameConfig::seeded(1)).unwrap();
        let mut session = fuzz_round(variant, 1);
        session.reset().unwrap();

        let spawn = |session: &GameSession| {
            session
                .snakes()
                .iter()
                .map(|snake| (snake.head(), snake.direction(), snake.len(), snake.is_alive()))
                .collect::<Vec<_>>()
        };
        assert_eq!(spawn(&session), spawn(&fresh));
        assert_eq!(session.state(), SessionState::Running);
        assert!(!session.snakes_hidden());
    }
}

#[test]
fn classic_player_runs_off_the_right_edge() {
    let mut session = GameSession::start(GameVariant::classic(), GameConfig::seeded(99)).unwrap();

    let mut ticks = 0;
    let mut eaten = 0;
    while session.state() == SessionState::Running {
        session.steer(Controls::Arrows, Direction::Right).unwrap();
        let report = session.tick().unwrap();
        eaten += report
            .events
            .iter()
            .filter(|event| matches!(event, SessionEvent::FoodEaten { .. }))
            .count();
        ticks += 1;
    }
    assert_eq!(ticks, 10);
    assert!(matches!(session.state(), SessionState::Ending { remaining_toggles: 6 }));

    while session.tick().unwrap().next_tick.is_some() {}
    let score = format!("SCORE: {}", 1 + eaten);
    assert_eq!(session.results().unwrap(), ["GAME OVER", score.as_str()]);
}

#[test]
fn enemy_heads_for_the_food() {
    let mut session =
        GameSession::start(GameVariant::classic_enemy(), GameConfig::seeded(4)).unwrap();
    let enemy = SnakeId(1);
    assert_eq!(session.snakes()[enemy.0].pilot, Pilot::Enemy);

    let start = session.snakes()[enemy.0].head();
    let food = session.food();
    let report = session.tick().unwrap();

    // The player moves first; if it ate, the enemy chases the replacement
    let player_ate = report.events.iter().any(|event| {
        matches!(event, SessionEvent::FoodEaten { snake, .. } if *snake == SnakeId(0))
    });
    let respawned = report.events.iter().find_map(|event| match event {
        SessionEvent::FoodSpawned { position } => Some(*position),
        _ => None,
    });
    let chased = match (player_ate, respawned) {
        (true, Some(position)) => position,
        _ => food,
    };
    let expected = start.moved_in_direction(pursuit_direction(start, chased));
    assert_eq!(session.snakes()[enemy.0].head(), expected);
    assert!(session.snakes()[enemy.0].head() != Position::new(30, 30));
}

#[test]
fn headless_summary_serializes() {
    let summary = HeadlessMode::new(GameConfig::seeded(8), GameVariant::classic_enemy())
        .unwrap()
        .run()
        .unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["variant"], "Classic Game with Enemy");
    assert_eq!(json["results"][0], "GAME OVER");
    assert_eq!(json["final_state"]["state"], "Ended");
    assert_eq!(json["final_state"]["snakes"].as_array().unwrap().len(), 2);
}
