//! The nine sub-boards of a full game.

use crate::{Board, BoardBuilder, BoardError, BoardId, Coord, GLOBAL_SIDE, Player};
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Owns the nine sub-boards covering the 9x9 grid.
///
/// The set of boards is fixed at construction; only their cells change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardIndex {
    boards: BTreeMap<BoardId, Board>,
}

impl BoardIndex {
    /// Generates all 9 boards and 81 cells in a single row-major pass.
    ///
    /// Each coordinate is routed to its board with [`Coord::board_id`],
    /// the same projection [`BoardIndex::board_for`] uses.
    ///
    /// # Errors
    ///
    /// Propagates [`BoardError::DuplicateConstruction`] and
    /// [`BoardError::IncompleteBoard`] from the builders.
    #[instrument]
    pub fn new() -> Result<Self, BoardError> {
        let mut builders: BTreeMap<BoardId, BoardBuilder> = BTreeMap::new();
        for row in 0..GLOBAL_SIDE {
            for col in 0..GLOBAL_SIDE {
                let coord = Coord::new(row, col);
                let id = coord
                    .board_id()
                    .ok_or(BoardError::InvalidCoordinate(coord))?;
                builders
                    .entry(id)
                    .or_insert_with(|| BoardBuilder::new(id))
                    .generate_position(coord)?;
            }
        }

        let boards = builders
            .into_iter()
            .map(|(id, builder)| builder.build().map(|board| (id, board)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        debug!(boards = boards.len(), "Board index generated");
        Ok(Self { boards })
    }

    /// Returns the sub-board containing `coord`.
    ///
    /// # Errors
    ///
    /// [`BoardError::InvalidCoordinate`] outside the 9x9 grid.
    pub fn board_for(&self, coord: Coord) -> Result<&Board, BoardError> {
        self.id_for(coord)
            .and_then(|id| self.boards.get(&id).ok_or(BoardError::InvalidCoordinate(coord)))
    }

    /// Mutable access to the sub-board containing `coord`.
    ///
    /// # Errors
    ///
    /// [`BoardError::InvalidCoordinate`] outside the 9x9 grid.
    pub fn board_for_mut(&mut self, coord: Coord) -> Result<&mut Board, BoardError> {
        let id = self.id_for(coord)?;
        self.boards
            .get_mut(&id)
            .ok_or(BoardError::InvalidCoordinate(coord))
    }

    /// Plays `coord` for `player` on the board that owns it.
    ///
    /// # Errors
    ///
    /// Lookup errors and [`BoardError::OccupiedCell`].
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, coord: Coord, player: Player) -> Result<Coord, BoardError> {
        self.board_for_mut(coord)?.apply_move(coord, player)
    }

    /// Sub-board by identifier.
    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.get(&id)
    }

    /// All boards in row-major order.
    pub fn boards(&self) -> impl Iterator<Item = &Board> {
        self.boards.values()
    }

    fn id_for(&self, coord: Coord) -> Result<BoardId, BoardError> {
        coord.board_id().ok_or_else(|| {
            warn!(%coord, "No board for coordinate");
            BoardError::InvalidCoordinate(coord)
        })
    }
}
