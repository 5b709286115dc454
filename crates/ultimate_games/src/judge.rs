//! Line-protocol adapter for an automated judge.
//!
//! Each turn the judge sends the opponent's last move (`-1 -1` before
//! the first one), a count of legal cells, and that many coordinate
//! pairs. We answer with one `row col` line.

use anyhow::{Context, Result};
use derive_more::{Display, Error};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};
use ultimate_tictactoe::{BoardError, BoardId, BoardIndex, Coord, GLOBAL_SIDE, Player, best_move};

/// Most legal cells a turn can offer: the whole 9x9 grid.
const MAX_LEGAL_CELLS: usize = GLOBAL_SIDE * GLOBAL_SIDE;

/// Malformed or unusable judge input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ProtocolError {
    /// A line could not be parsed.
    #[display("Failed to parse judge line: {line:?}")]
    Parse {
        /// The offending line.
        line: String,
    },

    /// Input ended inside a turn.
    #[display("Judge input ended mid-turn")]
    UnexpectedEof,

    /// A coordinate outside the 9x9 grid.
    #[display("Coordinate ({row}, {col}) is outside the 9x9 grid")]
    InvalidCoordinate {
        /// Row as sent.
        row: i64,
        /// Column as sent.
        col: i64,
    },

    /// A legal-cell count larger than the grid.
    #[display("Judge offered {count} legal cells, at most 81 exist")]
    TooManyCells {
        /// Count as sent.
        count: usize,
    },

    /// The judge offered no legal cells.
    #[display("Judge offered no legal actions")]
    NoLegalActions,

    /// The board rejected a lookup.
    #[display("Board rejected lookup: {_0}")]
    Board(#[error(not(source))] BoardError),
}

impl From<BoardError> for ProtocolError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}

/// Match state kept across judge turns.
///
/// We play X; the judge's opponent plays O.
#[derive(Debug)]
pub struct JudgeAdapter {
    index: BoardIndex,
    depth: u32,
}

impl JudgeAdapter {
    /// Creates an adapter searching at `depth`.
    #[instrument]
    pub fn new(depth: u32) -> Result<Self, BoardError> {
        Ok(Self {
            index: BoardIndex::new()?,
            depth,
        })
    }

    /// The tracked boards.
    pub fn index(&self) -> &BoardIndex {
        &self.index
    }

    /// Mutable access to the tracked boards.
    pub fn index_mut(&mut self) -> &mut BoardIndex {
        &mut self.index
    }

    /// Serves turns until the judge closes its input.
    ///
    /// Returns the number of turns answered.
    #[instrument(skip_all, fields(depth = self.depth))]
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<usize> {
        let mut lines = input.lines();
        let mut turns = 0;

        loop {
            let Some(first) = lines.next().transpose().context("Failed to read judge input")? else {
                info!(turns, "Judge closed input");
                return Ok(turns);
            };

            let (row, col) = parse_pair(&first)?;
            let opponent = (row > -1 && col > -1)
                .then(|| to_coord(row, col))
                .transpose()?;

            let count_line = next_line(&mut lines)?;
            let count: usize = count_line
                .trim()
                .parse()
                .map_err(|_| ProtocolError::Parse { line: count_line.clone() })?;
            if count > MAX_LEGAL_CELLS {
                return Err(ProtocolError::TooManyCells { count }.into());
            }

            let mut legal = Vec::with_capacity(count);
            for _ in 0..count {
                let (row, col) = parse_pair(&next_line(&mut lines)?)?;
                legal.push(to_coord(row, col)?);
            }

            let chosen = self.turn(opponent, &legal)?;
            writeln!(output, "{} {}", chosen.row(), chosen.col())?;
            output.flush()?;
            turns += 1;
        }
    }

    /// Plays one turn: records the opponent's move and picks ours.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::NoLegalActions`] for an empty list. A rejected
    /// opponent move is only logged.
    #[instrument(skip(self, legal), fields(legal = legal.len()))]
    pub fn turn(&mut self, opponent: Option<Coord>, legal: &[Coord]) -> Result<Coord, ProtocolError> {
        if let Some(coord) = opponent
            && let Err(error) = self.index.apply_move(coord, Player::O)
        {
            warn!(%coord, %error, "Could not record opponent move");
        }

        let active = select_active_cell(legal).ok_or(ProtocolError::NoLegalActions)?;
        let board = self.index.board_for(active)?;
        debug!(board = %board.id(), open = board.remaining_moves().len(), "Active board");

        let chosen = match best_move(board, Player::X, self.depth) {
            Some(coord) => coord,
            None => {
                warn!(board = %board.id(), fallback = %active, "Search found no move, using first legal cell");
                active
            }
        };

        if let Err(error) = self.index.apply_move(chosen, Player::X) {
            warn!(%chosen, %error, "Could not record our move");
        }
        Ok(chosen)
    }
}

/// Picks the first cell of the sub-board with the fewest legal cells.
///
/// Boards are considered in order of first appearance; the first of
/// equally small boards wins.
pub fn select_active_cell(legal: &[Coord]) -> Option<Coord> {
    let mut groups: Vec<(BoardId, usize, Coord)> = Vec::new();
    for &coord in legal {
        let Some(id) = coord.board_id() else {
            continue;
        };
        match groups.iter_mut().find(|(group, _, _)| *group == id) {
            Some((_, count, _)) => *count += 1,
            None => groups.push((id, 1, coord)),
        }
    }
    groups
        .into_iter()
        .min_by_key(|&(_, count, _)| count)
        .map(|(_, _, first)| first)
}

fn parse_pair(line: &str) -> Result<(i64, i64), ProtocolError> {
    let parse_err = || ProtocolError::Parse { line: line.to_string() };
    let mut parts = line.split_whitespace().map(str::parse::<i64>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(row)), Some(Ok(col)), None) => Ok((row, col)),
        _ => Err(parse_err()),
    }
}

fn to_coord(row: i64, col: i64) -> Result<Coord, ProtocolError> {
    let invalid = ProtocolError::InvalidCoordinate { row, col };
    let row = usize::try_from(row).map_err(|_| invalid.clone())?;
    let col = usize::try_from(col).map_err(|_| invalid.clone())?;
    let coord = Coord::new(row, col);
    if coord.in_bounds() { Ok(coord) } else { Err(invalid) }
}

fn next_line<I>(lines: &mut I) -> Result<String>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let line = lines
        .next()
        .transpose()
        .context("Failed to read judge input")?;
    line.ok_or_else(|| ProtocolError::UnexpectedEof.into())
}
