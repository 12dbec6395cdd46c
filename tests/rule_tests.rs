//! Rule layer tests through a room: the history a move leaves behind.

use drunkala::board::{Board, StoneId};
use drunkala::core::{PlayerId, RoomConfig};
use drunkala::room::{MoveAction, Room};
use drunkala::rules::{GameResult, RulesEngine};
use drunkala::triggers::{Addressing, Channel, Event, Rule, RuleBook, RuleContext};
use drunkala::SowingRules;

fn seated_room() -> Room {
    let room = Room::new("rules", &RoomConfig::default().with_seed(9)).unwrap();
    room.join("ann");
    room.join("bob");
    room
}

fn ids(range: std::ops::Range<u32>) -> Vec<StoneId> {
    range.map(StoneId).collect()
}

/// Test the default rules for a three-stone capture.
#[test]
fn test_capture_history() {
    let room = seated_room();
    let mut board = Board::empty(2);
    board.deposit(0, &ids(0..1));
    board.deposit(2, &ids(1..2));
    board.deposit(7, &ids(2..3));
    board.deposit(9, &ids(3..6));
    room.load_board(board);

    // Hole 2 → 3, which is empty and faces hole 9.
    room.apply_action(&MoveAction::new("ann", 2)).unwrap();

    let history = room.history();
    assert_eq!(history.len(), 1);
    assert_eq!(
        history[0],
        "bob: give a level 6 confession\nbob: take a drink! ×3\nann: ask a level 3 truth"
    );
    assert_eq!(room.board().current_player, PlayerId::new(1));
}

/// Test the history of a move that earns a repeat and ends the game.
#[test]
fn test_final_move_history() {
    let room = seated_room();
    let mut board = Board::empty(2);
    board.deposit(5, &ids(0..1));
    board.deposit(6, &ids(1..4));
    board.deposit(7, &ids(4..6));
    room.load_board(board);

    room.apply_action(&MoveAction::new("ann", 5)).unwrap();

    let expected = [
        "ann: best/worst category",
        "bob: give a level 6 confession",
        "bob: take a drink!",
        "ann: give a level 6 confession",
        "ann: take a drink! ×4",
        "ann: give a level 1 confession",
        "bob: give a level 2 confession ×2",
    ]
    .join("\n");
    assert_eq!(room.history()[0], expected);

    let board = room.board();
    assert!(board.finished);
    assert_eq!(
        SowingRules::new().is_terminal(&board),
        Some(GameResult::Winner(PlayerId::new(0)))
    );
}

/// Test that a tied finish sends every player the tie confession.
#[test]
fn test_tied_final_move_history() {
    let room = seated_room();
    let mut board = Board::empty(2);
    board.deposit(5, &ids(0..1));
    board.deposit(6, &ids(1..4));
    board.deposit(7, &ids(4..6));
    board.deposit(13, &ids(6..8));
    room.load_board(board);

    room.apply_action(&MoveAction::new("ann", 5)).unwrap();

    let expected = [
        "ann: best/worst category",
        "bob: give a level 6 confession",
        "bob: take a drink!",
        "ann: give a level 6 confession",
        "ann: take a drink! ×4",
        "ann: give a level 2 confession ×2",
        "bob: give a level 2 confession ×2",
    ]
    .join("\n");
    assert_eq!(room.history()[0], expected);

    let board = room.board();
    assert_eq!(board.scores().values().copied().collect::<Vec<_>>(), vec![4, 4]);
    assert_eq!(
        SowingRules::new().is_terminal(&board),
        Some(GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(1)]))
    );
}

/// Test that a move nothing reacts to leaves no history entry.
#[test]
fn test_quiet_move_leaves_no_history() {
    let room = seated_room();
    let mut board = Board::empty(2);
    board.deposit(0, &ids(0..2));
    board.deposit(1, &ids(2..3));
    board.deposit(2, &ids(3..4));
    board.deposit(8, &ids(4..5));
    room.load_board(board);

    room.apply_action(&MoveAction::new("ann", 0)).unwrap();
    assert!(room.history().is_empty());
}

/// Test that sowing into the opponent's store triggers the own-goal rule.
#[test]
fn test_own_goal_history() {
    let room = seated_room();
    let mut board = Board::empty(2);
    board.deposit(0, &ids(0..1));
    board.deposit(5, &ids(1..9));
    room.load_board(board);

    // Eight stones from hole 5: ann's store, all of bob's holes, bob's store.
    room.apply_action(&MoveAction::new("ann", 5)).unwrap();
    assert_eq!(
        room.history()[0],
        [
            "bob: give a level 6 confession",
            "bob: take a drink!",
            "ann: give a dice roll confession",
            "ann: give a level 6 confession",
            "ann: take a drink!",
        ]
        .join("\n")
    );
    assert_eq!(room.board().current_player, PlayerId::new(1));
}

/// Test a custom rule with a stone subset and a victim prefix.
#[test]
fn test_custom_stone_rule() {
    let mut book = RuleBook::new();
    book.push(
        Rule::new("the lucky stone strikes!")
            .on(Channel::Eaten)
            .addressed_to(Addressing::Victim)
            .requiring([StoneId(7)]),
    );

    let board = Board::empty(2);
    let names = vec!["ann".to_string(), "bob".to_string()];
    let ctx = RuleContext::new(&board, &names);

    let hit = Event::eaten(PlayerId::new(1), 8, 2, [StoneId(7), StoneId(1)]);
    let miss = Event::eaten(PlayerId::new(1), 8, 2, [StoneId(3), StoneId(1)]);
    assert_eq!(book.handle_events(&[hit], &ctx), "ann: the lucky stone strikes!");
    assert_eq!(book.handle_events(&[miss], &ctx), "");
}

/// Test that rules added to a room apply to the next move.
#[test]
fn test_added_rule_fires() {
    let room = seated_room();
    room.add_rule(
        Rule::new("everyone sings for {} seconds")
            .on(Channel::Repeat)
            .embedded()
            .addressed_to(Addressing::Opponents),
    );

    let mut board = Board::empty(2);
    board.deposit(5, &ids(0..1));
    board.deposit(4, &ids(1..2));
    board.deposit(7, &ids(2..3));
    room.load_board(board);

    room.apply_action(&MoveAction::new("ann", 5)).unwrap();
    assert_eq!(
        room.history()[0],
        "ann: best/worst category\nbob: everyone sings for 1 seconds\nbob: give a level 6 confession\nbob: take a drink!"
    );
}
