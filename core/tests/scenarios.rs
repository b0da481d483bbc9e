use ndarray::array;
use puzzlebox_core::merge::{Direction, MergeConfig, MergeState};
use puzzlebox_core::minefield::MinefieldConfig;
use puzzlebox_core::stack::{Piece, PieceKind, StackBoard, StackConfig, StackState};
use puzzlebox_core::{GameStatus, ManualClock, MergeEngine, MinefieldEngine, StackEngine};
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[test]
fn minefield_first_reveal_opens_safely() {
    for seed in 0..50 {
        let mut engine = MinefieldEngine::new(
            MinefieldConfig::beginner(),
            SmallRng::seed_from_u64(seed),
            ManualClock::new(0),
        )
        .unwrap();

        assert!(engine.reveal((4, 4)));

        let snapshot = engine.state();
        let mines = snapshot.cells.iter().filter(|cell| cell.is_mine).count();
        assert_eq!(mines, 10);
        for row in 3..=5 {
            for col in 3..=5 {
                assert!(!snapshot.cell_at((row, col)).unwrap().is_mine);
            }
        }
        assert!(matches!(snapshot.status, GameStatus::Playing | GameStatus::Won));
        assert!(snapshot.cell_at((4, 4)).unwrap().is_revealed());
    }
}

#[test]
fn minefield_flag_toggle_is_an_involution() {
    let mut engine = MinefieldEngine::with_seed(MinefieldConfig::intermediate(), 7).unwrap();
    engine.reveal((8, 8));
    let hidden = engine
        .state()
        .cells
        .indexed_iter()
        .find(|(_, cell)| cell.is_hidden())
        .map(|((row, col), _)| (row as u8, col as u8))
        .unwrap();

    assert!(engine.toggle_flag(hidden));
    assert_eq!(engine.state().remaining_mine_count, 39);
    assert!(engine.toggle_flag(hidden));

    let snapshot = engine.state();
    assert_eq!(snapshot.remaining_mine_count, 40);
    assert!(snapshot.cell_at(hidden).unwrap().is_hidden());
}

#[test]
fn merge_row_merges_first_pair_only() {
    let state = MergeState::from_values(
        MergeConfig::default(),
        array![[2, 2, 4, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    )
    .unwrap();
    let mut engine = MergeEngine::from_state(state, SmallRng::seed_from_u64(11));

    let outcome = engine.move_tiles(Direction::Left);

    assert!(outcome.moved);
    assert_eq!(outcome.score_increase, 4);
    let tiles = engine.state().tiles;
    assert_eq!(tiles[[0, 0]].value, 4);
    assert_eq!(tiles[[0, 1]].value, 4);
    // the rest of the row is empty apart from a possible spawned tile
    for col in 2..4 {
        let tile = tiles[[0, col]];
        assert!(tile.is_empty() || tile.is_new);
    }
    assert_eq!(tiles.iter().filter(|tile| tile.is_new).count(), 1);
}

#[test]
fn merge_stuck_board_rejects_moves_without_ending() {
    let state = MergeState::from_values(
        MergeConfig::default(),
        array![[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]],
    )
    .unwrap();
    let mut engine = MergeEngine::from_state(state, SmallRng::seed_from_u64(2));

    for direction in Direction::ALL {
        assert!(!engine.move_tiles(direction).moved);
    }
    let snapshot = engine.state();
    assert_eq!(snapshot.status, GameStatus::Playing);
    assert_eq!(snapshot.move_count, 0);
    assert!(!snapshot.can_undo);
    assert!(!engine.can_move());
}

#[test]
fn merge_loss_lands_on_the_last_successful_move() {
    let state = MergeState::from_values(
        MergeConfig::default(),
        array![[2, 4, 2, 4], [4, 2, 4, 2], [8, 16, 8, 16], [32, 64, 128, 0]],
    )
    .unwrap();
    let mut engine = MergeEngine::from_state(state, SmallRng::seed_from_u64(5));

    let outcome = engine.move_tiles(Direction::Right);

    assert!(outcome.moved);
    assert_eq!(outcome.score_increase, 0);
    assert_eq!(engine.status(), GameStatus::Lost);
    assert!(!engine.move_tiles(Direction::Left).moved);
}

#[test]
fn merge_undo_restores_pre_move_state() {
    let mut engine = MergeEngine::with_seed(MergeConfig::default(), 31);
    engine.start();
    let before = engine.state();
    // rejected moves leave the grid untouched
    let moved = Direction::ALL
        .into_iter()
        .any(|direction| engine.move_tiles(direction).moved);
    assert!(moved);

    assert!(engine.undo());

    let after = engine.state();
    let values = |snapshot: &puzzlebox_core::MergeSnapshot| {
        snapshot.tiles.map(|tile| tile.value)
    };
    assert_eq!(values(&after), values(&before));
    assert_eq!(after.score, before.score);
    assert_eq!(after.move_count, before.move_count);
}

#[test]
fn stack_rotation_kicks_off_the_right_wall() {
    let state = StackState::from_parts(
        StackConfig::default(),
        StackBoard::new(10, 20),
        Piece {
            rotation: 1,
            ..Piece::new(PieceKind::I, 7, 4)
        },
        PieceKind::O,
        0,
    )
    .unwrap();
    let mut engine = StackEngine::from_state(state, SmallRng::seed_from_u64(0));

    assert!(engine.rotate());

    let piece = engine.state().current.unwrap();
    assert_eq!(piece.x, 6);
    assert_eq!(piece.rotation, 2);
}

#[test]
fn stack_double_clear_shifts_rows_down() {
    let mut board = StackBoard::new(10, 20);
    for y in 18..20 {
        for x in 2..10 {
            board.set(x, y, Some(PieceKind::L));
        }
    }
    board.set(3, 17, Some(PieceKind::S));
    board.set(7, 16, Some(PieceKind::Z));
    let state = StackState::from_parts(
        StackConfig::default(),
        board,
        Piece::new(PieceKind::O, 0, 0),
        PieceKind::T,
        0,
    )
    .unwrap();
    let mut engine = StackEngine::from_state(state, SmallRng::seed_from_u64(0));

    assert!(engine.hard_drop());

    let snapshot = engine.state();
    assert_eq!(snapshot.cleared_lines, 2);
    assert_eq!(snapshot.last_lock.as_ref().unwrap().cleared_rows, vec![19, 18]);
    assert_eq!(snapshot.board[[19, 3]], Some(PieceKind::S));
    assert_eq!(snapshot.board[[18, 7]], Some(PieceKind::Z));
    assert_eq!(snapshot.board.iter().filter(|cell| cell.is_some()).count(), 2);
    for row in 0..2 {
        assert!(snapshot.board.row(row).iter().all(|cell| cell.is_none()));
    }
}

#[test]
fn stack_clear_sizes_pay_more_the_more_rows() {
    let clear = |rows: i16| {
        let mut board = StackBoard::new(10, 20);
        for y in 20 - rows..20 {
            for x in 0..9 {
                board.set(x, y, Some(PieceKind::J));
            }
        }
        // vertical I dropped into the right-hand well
        let piece = Piece {
            rotation: 1,
            ..Piece::new(PieceKind::I, 7, 16)
        };
        let mut state =
            StackState::from_parts(StackConfig::default(), board, piece, PieceKind::T, 0).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        state.soft_drop(&mut rng);
        (state.cleared_lines(), state.score())
    };

    assert_eq!(clear(4), (4, 800));
    assert_eq!(clear(3), (3, 500));
    assert_eq!(clear(2), (2, 300));
}

#[test]
fn stack_tick_is_driven_by_caller_time() {
    let mut engine = StackEngine::with_seed(StackConfig::default(), 19);
    assert!(engine.start(1_000));
    let start_y = engine.state().current.unwrap().y;

    assert!(!engine.tick(1_999));
    assert!(engine.tick(2_000));
    assert_eq!(engine.state().current.unwrap().y, start_y + 1);

    assert!(engine.pause());
    assert!(!engine.tick(60_000));
    assert!(engine.resume(60_000));
    assert!(!engine.tick(60_999));
    assert!(engine.tick(61_000));
    assert_eq!(engine.state().current.unwrap().y, start_y + 2);
}
