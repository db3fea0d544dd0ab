//! Evaluator and geometry properties over every possible board.

use tictactoe_timeline::{
    Board, Player, Position, Square, evaluate_winner, is_draw, last_move_coords,
};

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Every assignment of {empty, X, O} to the nine cells.
fn all_boards() -> impl Iterator<Item = [Square; 9]> {
    (0..3usize.pow(9)).map(|mut n| {
        let mut squares = [Square::Empty; 9];
        for square in squares.iter_mut() {
            *square = match n % 3 {
                0 => Square::Empty,
                1 => Square::Occupied(Player::X),
                _ => Square::Occupied(Player::O),
            };
            n /= 3;
        }
        squares
    })
}

fn board(cells: &str) -> Board {
    let mut squares = [Square::Empty; 9];
    for (square, c) in squares.iter_mut().zip(cells.chars()) {
        *square = match c {
            'X' => Square::Occupied(Player::X),
            'O' => Square::Occupied(Player::O),
            _ => Square::Empty,
        };
    }
    Board::from_squares(squares)
}

#[test]
fn test_winner_iff_uniform_line() {
    for squares in all_boards() {
        let first_line = LINES.iter().find(|[a, b, c]| {
            squares[*a] != Square::Empty && squares[*a] == squares[*b] && squares[*a] == squares[*c]
        });

        let win = evaluate_winner(&Board::from_squares(squares));
        match (first_line, win) {
            (None, None) => {}
            (Some(line), Some(win)) => {
                assert_eq!(win.indices(), *line);
                assert_eq!(Square::Occupied(win.player()), squares[line[0]]);
            }
            (expected, got) => panic!("{squares:?}: expected {expected:?}, got {got:?}"),
        }
    }
}

#[test]
fn test_draw_iff_full() {
    for squares in all_boards() {
        let full = squares.iter().all(|s| *s != Square::Empty);
        assert_eq!(is_draw(&Board::from_squares(squares)), full);
    }
}

#[test]
fn test_top_row_scenario() {
    let win = evaluate_winner(&board("XXXOO____")).expect("X owns the top row");
    assert_eq!(win.player(), Player::X);
    assert_eq!(win.indices(), [0, 1, 2]);
}

#[test]
fn test_full_board_without_line_scenario() {
    let full = board("XOXOXOOXO");
    assert_eq!(evaluate_winner(&full), None);
    assert!(is_draw(&full));
}

#[test]
fn test_last_move_coords_single_difference() {
    for squares in all_boards() {
        let before = Board::from_squares(squares);
        for pos in Position::valid_moves(&before) {
            let mut after = before.clone();
            after.set(pos, Square::Occupied(Player::O));

            let i = pos.to_index();
            let coords = last_move_coords(Some(&before), &after).expect("one cell differs");
            assert_eq!(coords.column, i % 3 + 1);
            assert_eq!(coords.row, (i + 1).div_ceil(3));
        }
    }
}

#[test]
fn test_last_move_coords_without_a_move() {
    let start = board("X___O____");
    assert_eq!(last_move_coords(None, &start), None);
    assert_eq!(last_move_coords(Some(&start), &start), None);
}
