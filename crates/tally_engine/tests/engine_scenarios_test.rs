//! Round, score and reset behaviour of the engine.

use tally_engine::{Engine, Mark, MoveOutcome, MoveRejection, PlayerNames, RoundNotification};

fn play(engine: &mut Engine, indices: &[usize]) -> MoveOutcome {
    let mut last = MoveOutcome::Continued;
    for &i in indices {
        last = engine.apply_move(i);
        assert!(last.is_accepted(), "move {i} rejected: {last:?}");
    }
    last
}

#[test]
fn test_top_row_win() {
    let mut engine = Engine::default();
    let outcome = play(&mut engine, &[0, 3, 1, 4, 2]);

    assert_eq!(engine.winning_line().map(|l| l.indices()), Some([0, 1, 2]));
    assert!(engine.is_over());
    assert_eq!(engine.winning_mark(), Some(Mark::X));
    assert_eq!(engine.scores().wins(Mark::X), 1);
    assert_eq!(engine.scores().wins(Mark::O), 0);
    assert!(matches!(
        outcome,
        MoveOutcome::Finished(RoundNotification::RoundWon { mark: Mark::X, .. })
    ));
}

#[test]
fn test_full_board_without_line_is_draw() {
    let mut engine = Engine::default();
    // X O X / X O O / O X X
    let outcome = play(&mut engine, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    assert!(engine.is_over());
    assert_eq!(engine.winning_mark(), None);
    assert_eq!(engine.winning_line(), None);
    assert_eq!(engine.scores().wins(Mark::X), 0);
    assert_eq!(engine.scores().wins(Mark::O), 0);
    assert_eq!(engine.scores().draws(), 1);
    assert_eq!(outcome, MoveOutcome::Finished(RoundNotification::RoundDraw));
}

#[test]
fn test_ninth_move_completing_a_line_is_a_win_not_a_draw() {
    // X@0,O@1,X@2,O@3,X@4,O@6,X@7,O@5,X@8 fills the board, but the last
    // move also completes the main diagonal.
    let mut engine = Engine::default();
    let outcome = play(&mut engine, &[0, 1, 2, 3, 4, 6, 7, 5, 8]);

    assert!(engine.is_over());
    assert_eq!(engine.board().occupied_count(), 9);
    assert_eq!(engine.winning_line().map(|l| l.indices()), Some([0, 4, 8]));
    assert_eq!(engine.winning_mark(), Some(Mark::X));
    assert_eq!(engine.scores().draws(), 0);
    assert!(outcome.notification().is_some());
}

#[test]
fn test_occupied_cell_rejection_leaves_state_alone() {
    let mut engine = Engine::default();
    play(&mut engine, &[4]);
    let before = engine.snapshot();

    for _ in 0..3 {
        assert!(!engine.apply_move(4).is_accepted());
    }
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_moves_after_round_over_rejected() {
    let mut engine = Engine::default();
    play(&mut engine, &[0, 3, 1, 4, 2]);
    let before = engine.snapshot();

    assert_eq!(
        engine.apply_move(8),
        MoveOutcome::Rejected(MoveRejection::RoundOver)
    );
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.scores().wins(Mark::X), 1);
}

#[test]
fn test_turn_alternates_until_terminal() {
    let mut engine = Engine::default();
    let mut expected = Mark::X;
    for i in [4, 0, 8, 2] {
        assert_eq!(engine.current_mark(), expected);
        assert_eq!(engine.apply_move(i), MoveOutcome::Continued);
        assert!(!engine.is_over());
        expected = expected.opponent();
    }
    assert_eq!(engine.current_mark(), Mark::X);
}

#[test]
fn test_exactly_one_notification_per_round() {
    let mut engine = Engine::default();
    let mut notifications = 0;
    for i in [0, 3, 1, 4, 2, 5, 6, 7, 8] {
        if engine.apply_move(i).notification().is_some() {
            notifications += 1;
        }
    }
    assert_eq!(notifications, 1);
}

#[test]
fn test_scores_accumulate_across_rounds() {
    let mut engine = Engine::default();
    play(&mut engine, &[0, 3, 1, 4, 2]);
    engine.reset_round();
    // O takes the middle row.
    play(&mut engine, &[0, 3, 1, 4, 8, 5]);
    engine.reset_round();
    play(&mut engine, &[0, 3, 1, 4, 2]);

    assert_eq!(engine.scores().wins(Mark::X), 2);
    assert_eq!(engine.scores().wins(Mark::O), 1);
}

#[test]
fn test_reset_round_from_any_state() {
    let mut engine = Engine::default();
    play(&mut engine, &[0, 3, 1, 4, 2]);
    engine.reset_round();

    assert_eq!(engine.board().occupied_count(), 0);
    assert_eq!(engine.current_mark(), Mark::X);
    assert!(!engine.is_over());
    assert_eq!(engine.winning_line(), None);
    assert!(engine.round().history().is_empty());
    assert_eq!(engine.scores().wins(Mark::X), 1);

    play(&mut engine, &[4, 0]);
    engine.reset_round();
    assert_eq!(engine.board().occupied_count(), 0);
    assert_eq!(engine.current_mark(), Mark::X);
}

#[test]
fn test_reset_scores_also_resets_round() {
    let mut engine = Engine::new(PlayerNames::new("Ada", "Bob"), false);
    play(&mut engine, &[0, 3, 1, 4, 2]);
    engine.reset_round();
    play(&mut engine, &[6]);

    engine.reset_scores();

    assert_eq!(engine.scores().wins(Mark::X), 0);
    assert_eq!(engine.scores().wins(Mark::O), 0);
    assert_eq!(engine.board().occupied_count(), 0);
    assert_eq!(engine.current_mark(), Mark::X);
    assert_eq!(engine.names().get(Mark::X), "Ada");
}

#[test]
fn test_names_editable_mid_round() {
    let mut engine = Engine::default();
    play(&mut engine, &[0, 3]);
    engine.set_player_name(Mark::X, "");
    let outcome = play(&mut engine, &[1, 4, 2]);

    assert_eq!(
        outcome.notification(),
        Some(&RoundNotification::RoundWon {
            mark: Mark::X,
            display_name: String::new(),
            line: engine.winning_line().expect("won"),
        })
    );
}
