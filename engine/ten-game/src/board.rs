//! Board representation and move rules for TEN.

use std::fmt;

/// Identity of the black player (moves first).
pub const BLACK: i8 = 1;

/// Identity of the white player.
pub const WHITE: i8 = -1;

/// Status code for a square whose nine cells are all occupied with no winner.
pub(crate) const SQUARE_FULL: i8 = 2;

/// The 8 tic-tac-toe lines of a 3×3 square (rows, columns, diagonals).
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

/// A move: a tile inside a big square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Big-square index, 0..9.
    pub big: u8,
    /// Tile index within the big square, 0..9.
    pub tile: u8,
}

/// Status of a 3×3 square, applied uniformly to a tile block and to the
/// nine-element big-square array: ±1 when that player holds a line, 0 while
/// a cell is still open, [`SQUARE_FULL`] when every cell is taken without a
/// line. Lines of `SQUARE_FULL` markers never count as a win.
pub(crate) fn status_of(square: &[i8]) -> i8 {
    for &player in &[BLACK, WHITE] {
        if LINES
            .iter()
            .any(|&[a, b, c]| square[a] == player && square[b] == player && square[c] == player)
        {
            return player;
        }
    }
    if square.iter().any(|&cell| cell == 0) {
        0
    } else {
        SQUARE_FULL
    }
}

/// A TEN position.
///
/// Boards are immutable-by-move: [`Board::apply`] returns a fresh value, so
/// playouts on sibling branches never share mutable state. The struct is 90
/// small integers and cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Tile owners, indexed `big * 9 + tile`: 1 black, -1 white, 0 empty.
    tiles: [i8; 81],
    /// Per-big-square status: ±1 won, 0 open, 2 full with no winner.
    big_status: [i8; 9],
    /// Big square the next move must land in; -1 means free choice.
    big_to_pick: i8,
    /// Big squares won by black so far.
    black_squares: u8,
    /// Big squares won by white so far.
    white_squares: u8,
    /// 1 = black to move, -1 = white to move.
    to_move: i8,
}

impl Board {
    /// An empty board: black to move, free big-square choice.
    pub fn new() -> Self {
        Self {
            tiles: [0; 81],
            big_status: [0; 9],
            big_to_pick: -1,
            black_squares: 0,
            white_squares: 0,
            to_move: BLACK,
        }
    }

    /// The player whose turn it is (+1 black, -1 white).
    pub fn current_player(&self) -> i8 {
        self.to_move
    }

    /// The big square the next move is confined to, or -1 for a free choice.
    pub fn big_to_pick(&self) -> i8 {
        self.big_to_pick
    }

    /// Owner of a single tile.
    pub fn tile(&self, big: usize, tile: usize) -> i8 {
        self.tiles[big * 9 + tile]
    }

    /// Status of one big square.
    pub fn big_square_status(&self, big: usize) -> i8 {
        self.big_status[big]
    }

    pub(crate) fn tiles(&self) -> &[i8; 81] {
        &self.tiles
    }

    pub(crate) fn from_parts(tiles: [i8; 81], big_to_pick: i8, to_move: i8) -> Self {
        let mut board = Self {
            tiles,
            big_status: [0; 9],
            big_to_pick,
            black_squares: 0,
            white_squares: 0,
            to_move,
        };
        for big in 0..9 {
            let status = status_of(&board.tiles[big * 9..big * 9 + 9]);
            board.big_status[big] = status;
            match status {
                BLACK => board.black_squares += 1,
                WHITE => board.white_squares += 1,
                _ => {}
            }
        }
        board
    }

    /// Whether `mv` may be played on this board: in range, inside the
    /// prescribed big square when one is prescribed, on an open big square,
    /// and on an empty tile.
    pub fn is_legal(&self, mv: Move) -> bool {
        if mv.big >= 9 || mv.tile >= 9 {
            return false;
        }
        if self.big_to_pick >= 0 && self.big_to_pick != mv.big as i8 {
            return false;
        }
        let big = mv.big as usize;
        self.big_status[big] == 0 && self.tiles[big * 9 + mv.tile as usize] == 0
    }

    /// All legal moves, in row-major order (big square outer, tile inner).
    /// Non-empty on every non-terminal board.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(40);
        if self.big_to_pick >= 0 {
            let big = self.big_to_pick as u8;
            for tile in 0..9 {
                let mv = Move { big, tile };
                if self.is_legal(mv) {
                    moves.push(mv);
                }
            }
        } else {
            for big in 0..9 {
                for tile in 0..9 {
                    let mv = Move { big, tile };
                    if self.is_legal(mv) {
                        moves.push(mv);
                    }
                }
            }
        }
        moves
    }

    /// Play `mv` and return the resulting position.
    ///
    /// Assumes the move is legal (checked in debug builds only); this is the
    /// unguarded primitive the playout loop runs on. Use [`Board::try_apply`]
    /// for untrusted input.
    pub fn apply(&self, mv: Move) -> Board {
        debug_assert!(self.is_legal(mv), "apply called with illegal move {mv:?}");
        let mut next = self.clone();
        let big = mv.big as usize;
        next.tiles[big * 9 + mv.tile as usize] = self.to_move;
        let status = status_of(&next.tiles[big * 9..big * 9 + 9]);
        next.big_status[big] = status;
        match status {
            BLACK => next.black_squares += 1,
            WHITE => next.white_squares += 1,
            _ => {}
        }
        // The opponent is sent to big square `mv.tile`, unless it is decided.
        next.big_to_pick = if next.big_status[mv.tile as usize] == 0 {
            mv.tile as i8
        } else {
            -1
        };
        next.to_move = -self.to_move;
        next
    }

    /// Checked variant of [`Board::apply`]: `None` when the move is illegal.
    /// Never mutates the receiver.
    pub fn try_apply(&self, mv: Move) -> Option<Board> {
        if self.is_legal(mv) {
            Some(self.apply(mv))
        } else {
            None
        }
    }

    /// Outcome of the game: ±1 once decided, 0 while play continues.
    ///
    /// A three-in-a-row of big squares wins immediately. When all nine big
    /// squares are decided without one, the side holding more big squares
    /// wins; an exact tie goes to white.
    pub fn game_status(&self) -> i8 {
        match status_of(&self.big_status) {
            0 => 0,
            SQUARE_FULL => {
                if self.black_squares > self.white_squares {
                    BLACK
                } else {
                    WHITE
                }
            }
            winner => winner,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            if row > 0 && row % 3 == 0 {
                writeln!(f, "---------------------")?;
            }
            for col in 0..9 {
                if col > 0 && col % 3 == 0 {
                    write!(f, "| ")?;
                }
                let big = (row / 3) * 3 + col / 3;
                let tile = (row % 3) * 3 + col % 3;
                let glyph = match self.tiles[big * 9 + tile] {
                    BLACK => 'b',
                    WHITE => 'w',
                    _ => '.',
                };
                write!(f, "{glyph} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_empty_board_has_81_legal_moves() {
        let board = Board::new();
        assert_eq!(board.current_player(), BLACK);
        assert_eq!(board.big_to_pick(), -1);
        assert_eq!(board.game_status(), 0);
        assert_eq!(board.legal_moves().len(), 81);
    }

    #[test]
    fn test_status_of_detects_all_lines() {
        for line in &LINES {
            for player in [BLACK, WHITE] {
                let mut square = [0i8; 9];
                for &cell in line {
                    square[cell] = player;
                }
                assert_eq!(status_of(&square), player, "line {line:?}");
            }
        }
    }

    #[test]
    fn test_status_of_full_square_without_line() {
        // b w b / b w w / w b b: every cell taken, no line.
        let square = [1, -1, 1, 1, -1, -1, -1, 1, 1];
        assert_eq!(status_of(&square), SQUARE_FULL);
    }

    #[test]
    fn test_status_of_ignores_full_marker_lines() {
        // A big-status array where a row of decided-but-drawn squares must
        // not read as a win.
        let square = [2, 2, 2, 1, -1, 0, 0, 0, 0];
        assert_eq!(status_of(&square), 0);
    }

    /// The status rule is symmetric under the dihedral group of the square.
    #[test]
    fn test_status_of_invariant_under_symmetry() {
        // Index maps for a quarter turn and the horizontal mirror; the other
        // six symmetries are compositions of these two.
        const ROTATE: [usize; 9] = [6, 3, 0, 7, 4, 1, 8, 5, 2];
        const MIRROR: [usize; 9] = [2, 1, 0, 5, 4, 3, 8, 7, 6];

        fn permute(square: &[i8; 9], map: &[usize; 9]) -> [i8; 9] {
            let mut out = [0i8; 9];
            for (to, &from) in map.iter().enumerate() {
                out[to] = square[from];
            }
            out
        }

        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..500 {
            let mut square = [0i8; 9];
            for cell in square.iter_mut() {
                *cell = rng.gen_range(-1..=1);
            }
            let status = status_of(&square);

            let mut image = square;
            for _ in 0..4 {
                image = permute(&image, &ROTATE);
                assert_eq!(status_of(&image), status, "rotation of {square:?}");
                let mirrored = permute(&image, &MIRROR);
                assert_eq!(status_of(&mirrored), status, "reflection of {square:?}");
            }
        }
    }

    #[test]
    fn test_apply_flips_player_and_constrains_big_square() {
        let board = Board::new();
        let next = board.apply(Move { big: 3, tile: 7 });
        assert_eq!(next.current_player(), WHITE);
        assert_eq!(next.tile(3, 7), BLACK);
        assert_eq!(next.big_to_pick(), 7);
    }

    #[test]
    fn test_redirect_chain_follows_tile_indices() {
        let mut board = Board::new();
        board = board.apply(Move { big: 0, tile: 3 }); // black, sends white to 3
        assert_eq!(board.big_to_pick(), 3);
        board = board.apply(Move { big: 3, tile: 3 }); // white, sends black back to 3
        assert_eq!(board.big_to_pick(), 3);
        board = board.apply(Move { big: 3, tile: 0 }); // black, sends white to 0
        assert_eq!(board.big_to_pick(), 0);
        assert_eq!(board.big_square_status(0), 0);
        assert_eq!(board.big_square_status(3), 0);
    }

    #[test]
    fn test_small_square_win_updates_status_and_counters() {
        // Black on tiles 0 and 1 of big square 2, black to move there.
        let mut tiles = [0i8; 81];
        tiles[2 * 9] = BLACK;
        tiles[2 * 9 + 1] = BLACK;
        tiles[5 * 9] = WHITE;
        tiles[5 * 9 + 1] = WHITE;
        let board = Board::from_parts(tiles, 2, BLACK);

        let next = board.apply(Move { big: 2, tile: 2 });
        assert_eq!(next.big_square_status(2), BLACK);
        // Tile index 2 points at the square black just closed, so the
        // opponent gets a free choice.
        assert_eq!(next.big_to_pick(), -1);
        assert_eq!(next.current_player(), WHITE);
    }

    #[test]
    fn test_prescribed_big_square_excludes_other_moves() {
        let board = Board::new().apply(Move { big: 0, tile: 4 });
        assert_eq!(board.big_to_pick(), 4);
        assert!(board.is_legal(Move { big: 4, tile: 3 }));
        assert!(!board.is_legal(Move { big: 0, tile: 0 }));
        assert!(board
            .legal_moves()
            .iter()
            .all(|mv| mv.big == 4));
    }

    #[test]
    fn test_move_into_decided_square_frees_the_choice() {
        // Big square 5 is fully won by white; a move whose tile index is 5
        // must leave the opponent unconstrained.
        let mut tiles = [0i8; 81];
        tiles[5 * 9] = WHITE;
        tiles[5 * 9 + 1] = WHITE;
        tiles[5 * 9 + 2] = WHITE;
        let board = Board::from_parts(tiles, 3, BLACK);
        assert_eq!(board.big_square_status(5), WHITE);

        let next = board.apply(Move { big: 3, tile: 5 });
        assert_eq!(next.big_to_pick(), -1);
    }

    #[test]
    fn test_out_of_range_and_occupied_moves_are_illegal() {
        let board = Board::new().apply(Move { big: 4, tile: 4 });
        assert!(!board.is_legal(Move { big: 9, tile: 0 }));
        assert!(!board.is_legal(Move { big: 0, tile: 9 }));
        assert!(!board.is_legal(Move { big: 4, tile: 4 }));
        assert!(board.try_apply(Move { big: 4, tile: 4 }).is_none());
    }

    #[test]
    fn test_legal_moves_and_try_apply_agree() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut board = Board::new();
        // Walk a random midgame position, checking the full 81-move grid at
        // every step.
        for _ in 0..20 {
            if board.game_status() != 0 {
                break;
            }
            let legal = board.legal_moves();
            for big in 0..9u8 {
                for tile in 0..9u8 {
                    let mv = Move { big, tile };
                    let listed = legal.contains(&mv);
                    assert_eq!(
                        board.try_apply(mv).is_some(),
                        listed,
                        "{mv:?} listed={listed}"
                    );
                }
            }
            board = board.apply(legal[rng.gen_range(0..legal.len())]);
        }
    }

    #[test]
    fn test_full_board_tiebreak_goes_to_the_majority() {
        // Five black big squares, four white, arranged with no line of
        // either color: b b w / w w b / b b w.
        let plan: [i8; 9] = [1, 1, -1, -1, -1, 1, 1, 1, -1];
        let mut tiles = [0i8; 81];
        for (big, &winner) in plan.iter().enumerate() {
            // A top-row line for the square's winner, two filler tiles for
            // the loser.
            tiles[big * 9] = winner;
            tiles[big * 9 + 1] = winner;
            tiles[big * 9 + 2] = winner;
            tiles[big * 9 + 3] = -winner;
            tiles[big * 9 + 4] = -winner;
        }
        let board = Board::from_parts(tiles, -1, BLACK);
        assert_eq!(
            status_of(&plan),
            SQUARE_FULL,
            "plan must avoid a big-square line"
        );
        assert_eq!(board.game_status(), BLACK);
    }

    #[test]
    fn test_exact_tiebreak_ties_go_to_white() {
        // Four big squares each plus a drawn one: b b w / w w b / b b= w
        // where `=` is full-no-winner.
        let plan: [i8; 9] = [1, 1, -1, -1, -1, 1, 1, 2, -1];
        let mut tiles = [0i8; 81];
        for (big, &winner) in plan.iter().enumerate() {
            if winner == SQUARE_FULL {
                tiles[big * 9..big * 9 + 9]
                    .copy_from_slice(&[1, -1, 1, 1, -1, -1, -1, 1, 1]);
            } else {
                tiles[big * 9] = winner;
                tiles[big * 9 + 1] = winner;
                tiles[big * 9 + 2] = winner;
                tiles[big * 9 + 3] = -winner;
                tiles[big * 9 + 4] = -winner;
            }
        }
        let board = Board::from_parts(tiles, -1, BLACK);
        assert_eq!(board.game_status(), WHITE);
    }

    fn random_game(seed: u64) -> (i8, usize) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut board = Board::new();
        let mut plies = 0;
        loop {
            let status = board.game_status();
            if status != 0 {
                return (status, plies);
            }
            let moves = board.legal_moves();
            assert!(!moves.is_empty(), "non-terminal board with no moves");
            let mv = moves[rng.gen_range(0..moves.len())];
            assert!(board.is_legal(mv));
            board = board.apply(mv);
            plies += 1;
            assert!(plies <= 81, "game exceeded 81 plies");
        }
    }

    #[test]
    fn test_random_games_terminate_decisively() {
        for seed in 0..2048 {
            let (status, plies) = random_game(seed);
            assert!(status == BLACK || status == WHITE, "seed {seed}");
            assert!(plies <= 81, "seed {seed} ran {plies} plies");
        }
    }

    /// Full-size legality stress run; slow, so opt-in.
    #[test]
    #[ignore]
    fn test_random_games_terminate_decisively_stress() {
        for seed in 0..16384 {
            let (status, _) = random_game(seed);
            assert!(status == BLACK || status == WHITE, "seed {seed}");
        }
    }
}
