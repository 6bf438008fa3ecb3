use chrono::{DateTime, TimeDelta, Utc};
use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// Valid transitions:
/// - Pending -> Won
/// - Pending -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Moves are accepted
    #[default]
    Pending,
    /// Every safe cell revealed and as many flags as mines
    Won,
    /// A mine was revealed
    Lost,
}

impl GameStatus {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Complete snapshot of a game.
///
/// Every transition comes in two forms: a pure one taking `&self` and returning the next snapshot, and an `apply_*`
/// one that updates the value in place and reports what happened. Moves that do not apply leave the state untouched.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    width: Coord,
    height: Coord,
    status: GameStatus,
    mine_count: CellCount,
    flag_count: CellCount,
    start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_rows")]
    cells: Array2<Cell>,
}

impl GameState {
    /// Starts a game with randomly placed mines.
    pub fn new(options: GameOptions) -> Self {
        Self::with_generator(options, RandomMineGenerator::from_entropy())
    }

    /// Starts a game with mines placed by `generator`, asking for at most as many mines as the board holds.
    pub fn with_generator(options: GameOptions, generator: impl MineGenerator) -> Self {
        let options = GameOptions::new(options.width, options.height, options.mines);
        Self::from_layout(generator.generate(options))
    }

    /// Starts a game over a known layout.
    pub fn from_layout(layout: MineLayout) -> Self {
        let (height, width) = layout.size();
        let mut cells: Array2<Cell> = Array2::default(layout.size().to_nd_index());
        let mut mine_count = 0;

        for coords in layout.iter_mines() {
            cells[coords.to_nd_index()].mined = true;
            mine_count += 1;
            for neighbor in layout.iter_neighbors(coords) {
                cells[neighbor.to_nd_index()].adjacent_mine_count += 1;
            }
        }

        let start_time = Utc::now();
        log::debug!(
            "New {}x{} game with {} mines, started at {}",
            width,
            height,
            mine_count,
            start_time
        );

        Self {
            width,
            height,
            status: GameStatus::Pending,
            mine_count,
            flag_count: 0,
            start_time,
            end_time: None,
            cells,
        }
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    /// Grid shape as `(rows, cols)`.
    pub fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flag_count as isize)
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// The cell at `coords`, or `None` outside the board.
    pub fn cell(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// Time between the start and the end of the game, or `now` while it is still pending.
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> TimeDelta {
        let until = self.end_time.unwrap_or(now);
        (until - self.start_time).max(TimeDelta::zero())
    }

    pub fn elapsed(&self) -> TimeDelta {
        self.elapsed_at(Utc::now())
    }

    /// Reveals a cell, returning the next state.
    pub fn reveal(&self, coords: Coord2) -> Self {
        let mut next = self.clone();
        next.apply_reveal(coords);
        next
    }

    /// Flags or unflags a cell, returning the next state.
    pub fn toggle_flag(&self, coords: Coord2) -> Self {
        let mut next = self.clone();
        next.apply_toggle_flag(coords);
        next
    }

    /// Returns the state with the win applied if the board is solved.
    pub fn check_win(&self) -> Self {
        let mut next = self.clone();
        next.evaluate_win();
        next
    }

    /// Reveals a cell in place. Flagged cells are revealed like any other hidden cell.
    pub fn apply_reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.status.is_pending() {
            return RevealOutcome::NoChange;
        }
        let Some(cell) = self.cell(coords) else {
            return RevealOutcome::NoChange;
        };
        if cell.revealed {
            return RevealOutcome::NoChange;
        }

        self.cells[coords.to_nd_index()].revealed = true;
        log::debug!(
            "Reveal cell at {:?}, adjacent mines: {}",
            coords,
            cell.adjacent_mine_count
        );

        if cell.mined {
            self.finish(GameStatus::Lost);
            return RevealOutcome::HitMine;
        }

        if cell.adjacent_mine_count == 0 {
            self.cascade_from(coords);
        }

        if self.evaluate_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Flags or unflags a cell in place.
    ///
    /// Nothing changes once the flag count has reached the mine count, removing a flag included.
    pub fn apply_toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if !self.status.is_pending() || self.flag_count >= self.mine_count {
            return FlagOutcome::NoChange;
        }
        let Some(cell) = self.cell(coords) else {
            return FlagOutcome::NoChange;
        };
        if cell.revealed {
            return FlagOutcome::NoChange;
        }

        let flagged = !cell.flagged;
        self.cells[coords.to_nd_index()].flagged = flagged;
        if flagged {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        log::debug!("Flag at {:?} set to {}, {} flags", coords, flagged, self.flag_count);

        if self.evaluate_win() {
            FlagOutcome::Won
        } else if flagged {
            FlagOutcome::Flagged
        } else {
            FlagOutcome::Unflagged
        }
    }

    /// Whether the game is pending, every safe cell is revealed, and the flag count matches the mine count.
    pub fn is_solved(&self) -> bool {
        self.status.is_pending()
            && self.flag_count == self.mine_count
            && self.cells.iter().all(|cell| cell.revealed || cell.mined)
    }

    /// Flood-fills from a revealed zero cell.
    ///
    /// Neighbors are visited depth first in [`NeighborIter`] order, so the result matches revealing each neighbor
    /// in turn and recursing into zeros. Only neighbors of zero cells are queued and those are never mined.
    fn cascade_from(&mut self, origin: Coord2) {
        let mut to_visit: Vec<Coord2> = self.hidden_neighbors(origin);
        to_visit.reverse();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            if cell.revealed || cell.mined {
                continue;
            }

            cell.revealed = true;
            let adjacent_mines = cell.adjacent_mine_count;
            log::trace!(
                "Flood revealed cell at {:?}, adjacent mines: {}",
                visit_coords,
                adjacent_mines
            );

            if adjacent_mines == 0 {
                let mut neighbors = self.hidden_neighbors(visit_coords);
                neighbors.reverse();
                to_visit.extend(neighbors);
            }
        }
    }

    fn hidden_neighbors(&self, coords: Coord2) -> Vec<Coord2> {
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_unrevealed())
            .collect()
    }

    fn evaluate_win(&mut self) -> bool {
        if self.is_solved() {
            self.finish(GameStatus::Won);
            true
        } else {
            false
        }
    }

    fn finish(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }

        let now = Utc::now();
        self.status = status;
        self.end_time = Some(now);
        log::debug!("Game {:?} at {}", status, now);
    }
}

/// Writes the grid as a list of rows.
fn serialize_rows<S>(cells: &Array2<Cell>, serializer: S) -> core::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(cells.rows().into_iter().map(|row| row.to_vec()))
}
