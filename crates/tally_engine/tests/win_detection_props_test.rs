//! Property tests for standalone win detection and move rejection.

use proptest::prelude::*;
use tally_engine::{Board, Engine, LINES, Mark, find_winning_line};

fn square_char() -> impl Strategy<Value = char> {
    prop_oneof![Just('.'), Just('X'), Just('O')]
}

fn arb_board() -> impl Strategy<Value = Board> {
    proptest::collection::vec(square_char(), 9)
        .prop_map(|chars| Board::from(chars.into_iter().collect::<String>().as_str()))
}

proptest! {
    #[test]
    fn winning_line_is_first_uniform_line(board in arb_board()) {
        let cells = board.cells();
        let expected = LINES.iter().find_map(|line| {
            let [a, b, c] = line.indices();
            match (cells[a], cells[b], cells[c]) {
                (Some(m1), Some(m2), Some(m3)) if m1 == m2 && m2 == m3 => Some((*line, m1)),
                _ => None,
            }
        });
        prop_assert_eq!(find_winning_line(&board), expected);
    }

    #[test]
    fn reported_line_is_held_by_reported_mark(board in arb_board()) {
        if let Some((line, mark)) = find_winning_line(&board) {
            let cells = board.cells();
            for i in line.indices() {
                prop_assert_eq!(cells[i], Some(mark));
            }
        }
    }

    #[test]
    fn random_games_never_overwrite(moves in proptest::collection::vec(0usize..12, 0..30)) {
        let mut engine = Engine::default();
        for index in moves {
            let before = engine.board().clone();
            let was_over = engine.is_over();
            let wins_before = (engine.scores().wins(Mark::X), engine.scores().wins(Mark::O));
            let outcome = engine.apply_move(index);

            if !outcome.is_accepted() {
                prop_assert_eq!(engine.board(), &before);
            }
            if was_over {
                prop_assert!(!outcome.is_accepted());
            }
            let wins_after = (engine.scores().wins(Mark::X), engine.scores().wins(Mark::O));
            let gained = (wins_after.0 - wins_before.0) + (wins_after.1 - wins_before.1);
            let won_now = !was_over && engine.winning_mark().is_some();
            prop_assert_eq!(gained, u32::from(won_now));
        }
    }
}
