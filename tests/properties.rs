//! Property tests for the game rules

use glam::Vec2;
use proptest::prelude::*;

use starfield_breakout::consts::*;
use starfield_breakout::sim::{
    Arena, BrickColor, Contact, GameController, Phase, PointerEvent, SceneCommand, SceneHandler,
    brick_grid, grid_columns,
};
use starfield_breakout::Settings;

fn launched(arena: Arena) -> GameController {
    let mut controller = GameController::new(Settings::default());
    controller.on_activate(arena);
    let label = controller.state().unwrap().label.pos;
    controller.on_pointer(PointerEvent::down(label));
    controller.drain_commands();
    controller
}

proptest! {
    #[test]
    fn grid_size_and_bounds(width in 55.0f32..2000.0, height in 300.0f32..2000.0, x in -500.0f32..500.0) {
        let arena = Arena::new(Vec2::new(x, 0.0), Vec2::new(x + width, height));
        let bricks = brick_grid(&arena, 1);
        let columns = (arena.width() as i32 / 55) as usize;

        prop_assert_eq!(grid_columns(arena.width()) as usize, columns);
        prop_assert_eq!(bricks.len(), 4 * columns);
        for brick in &bricks {
            // Whole-point layout may shift a brick by less than one unit
            prop_assert!(brick.pos.x - BRICK_WIDTH / 2.0 >= arena.min.x - 1.0);
            prop_assert!(brick.pos.x + BRICK_WIDTH / 2.0 <= arena.max.x + 1.0);
        }
    }

    #[test]
    fn colors_only_move_forward(hits in proptest::collection::vec(0usize..24, 1..200)) {
        let mut controller = launched(Arena::centered(330.0, 600.0));
        let ids: Vec<_> = controller.state().unwrap().bricks.iter().map(|b| b.id).collect();
        let mut last: std::collections::HashMap<_, _> = controller
            .state()
            .unwrap()
            .bricks
            .iter()
            .map(|b| (b.id, b.color))
            .collect();

        for index in hits {
            if controller.phase() != Some(Phase::Active) {
                break;
            }
            let ball = controller.state().unwrap().ball.id;
            controller.on_contact(&[Contact::new(ball, ids[index])]);

            let state = controller.state().unwrap();
            if state.phase != Phase::Active {
                break;
            }
            for brick in &state.bricks {
                prop_assert!(brick.color >= last[&brick.id]);
                last.insert(brick.id, brick.color);
            }
        }
    }

    #[test]
    fn removal_counter_wins_exactly_at_total(order in Just((0usize..24).collect::<Vec<_>>()).prop_shuffle()) {
        let mut controller = launched(Arena::centered(330.0, 600.0));
        let state = controller.state().unwrap();
        let ball = state.ball.id;
        let ids: Vec<_> = state.bricks.iter().map(|b| b.id).collect();

        for (n, index) in order.iter().enumerate() {
            let before = controller.state().unwrap().bricks_removed;
            let contact = Contact::new(ball, ids[*index]);
            controller.on_contact(&[contact, contact, contact, contact]);

            if n + 1 < ids.len() {
                let state = controller.state().unwrap();
                prop_assert_eq!(state.phase, Phase::Active);
                prop_assert_eq!(state.bricks_removed, before + 1);
            }
        }

        prop_assert_eq!(controller.stats().wins, 1);
        prop_assert_eq!(controller.phase(), Some(Phase::Idle));
        prop_assert_eq!(controller.state().unwrap().bricks.len(), 24);
    }

    #[test]
    fn lose_zone_always_loses(hits in proptest::collection::vec(0usize..24, 0..40), at in 0usize..40) {
        let mut controller = launched(Arena::centered(330.0, 600.0));
        let state = controller.state().unwrap();
        let ball = state.ball.id;
        let lose = Contact::new(state.lose_zone.id, ball);

        // Clearing all 24 bricks takes 60 hits; these batches hold at most 40
        let mut batch: Vec<Contact> = hits
            .iter()
            .map(|&i| Contact::new(ball, state.bricks[i].id))
            .collect();
        batch.insert(at.min(batch.len()), lose);

        controller.on_contact(&batch);
        prop_assert_eq!(controller.stats().losses, 1);
        prop_assert_eq!(controller.stats().wins, 0);
        prop_assert_eq!(controller.phase(), Some(Phase::Idle));
        prop_assert_eq!(controller.state().unwrap().label.text.as_str(), LOSS_TEXT);
    }

    #[test]
    fn active_iff_launched(events in proptest::collection::vec((any::<bool>(), -200.0f32..200.0, -300.0f32..300.0), 1..30)) {
        let mut controller = GameController::new(Settings::default());
        controller.on_activate(Arena::centered(330.0, 600.0));

        for (lose, x, y) in events {
            let state = controller.state().unwrap();
            if lose {
                let contact = Contact::new(state.ball.id, state.lose_zone.id);
                controller.on_contact(&[contact]);
            } else {
                controller.on_pointer(PointerEvent::down(Vec2::new(x, y)));
            }
            let state = controller.state().unwrap();
            prop_assert_eq!(state.phase == Phase::Active, state.ball.launched);
            prop_assert_eq!(state.phase == Phase::Active, !state.label.visible);
        }
    }
}

#[test]
fn scenario_330_wide_arena_has_24_bricks() {
    let mut controller = GameController::new(Settings::default());
    controller.on_activate(Arena::centered(330.0, 600.0));
    let spawned = controller
        .drain_commands()
        .into_iter()
        .filter(|c| matches!(c, SceneCommand::SpawnBrick { .. }))
        .count();
    assert_eq!(grid_columns(330.0), 6);
    assert_eq!(spawned, 24);

    let state = controller.state().unwrap();
    for (row, color) in BrickColor::ROWS.iter().enumerate() {
        assert_eq!(state.bricks[row * 6..(row + 1) * 6].iter().filter(|b| b.color == *color).count(), 6);
    }
}

#[test]
fn scenario_last_brick_wins_and_restores_grid() {
    let mut controller = launched(Arena::centered(330.0, 600.0));
    let state = controller.state().unwrap();
    let ball = state.ball.id;
    let ids: Vec<_> = state.bricks.iter().map(|b| b.id).collect();

    for id in &ids[..23] {
        let contact = Contact::new(ball, *id);
        controller.on_contact(&[contact, contact, contact, contact]);
    }
    assert_eq!(controller.state().unwrap().bricks_removed, 23);
    controller.drain_commands();

    let last = Contact::new(ball, ids[23]);
    controller.on_contact(&[last, last, last, last]);
    let commands = controller.drain_commands();
    let state = controller.state().unwrap();

    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.label.text, WIN_TEXT);
    assert_eq!(state.bricks.len(), 24);
    assert_eq!(state.bricks_removed, 0);
    assert!(!state.ball.launched);
    assert!(commands.contains(&SceneCommand::Despawn { id: ball }));
    assert_eq!(
        commands.iter().filter(|c| matches!(c, SceneCommand::SpawnBrick { .. })).count(),
        24
    );
}
