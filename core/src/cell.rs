use serde::{Deserialize, Serialize};

/// One grid position as stored by the engine.
///
/// `mined` is present for every cell; hiding it while the cell is unrevealed is up to whoever renders the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub mined: bool,
    pub revealed: bool,
    pub flagged: bool,
    pub adjacent_mine_count: u8,
}

impl Cell {
    /// Whether the player can still act on this cell.
    pub const fn is_unrevealed(self) -> bool {
        !self.revealed
    }
}
