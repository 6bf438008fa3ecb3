use chrono::{DateTime, TimeDelta, Utc};
use std::io::{self, Write};
use sweeper_core::{Cell, GameState, GameStatus};

/// Formats a duration as `HH:MM:SS`.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let seconds = elapsed.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    )
}

/// Character shown for a cell. Mines stay hidden until the game is lost.
pub fn cell_glyph(cell: Cell, status: GameStatus) -> char {
    match (cell.revealed, cell.mined) {
        (true, true) => '*',
        (true, false) if cell.adjacent_mine_count == 0 => '.',
        (true, false) => char::from(b'0' + cell.adjacent_mine_count),
        (false, _) if cell.flagged => 'F',
        (false, true) if status == GameStatus::Lost => '*',
        (false, _) => '#',
    }
}

fn status_text(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Pending => "playing",
        GameStatus::Won => "you won!",
        GameStatus::Lost => "boom, you lost",
    }
}

/// Draws the status line and the board.
pub fn draw(out: &mut impl Write, state: &GameState, now: DateTime<Utc>) -> io::Result<()> {
    writeln!(
        out,
        "mines: {}  time: {}  {}",
        state.mines_left(),
        format_elapsed(state.elapsed_at(now)),
        status_text(state.status())
    )?;

    write!(out, "    ")?;
    for col in 0..state.width() {
        write!(out, "{}", col % 10)?;
    }
    writeln!(out)?;

    for (row, cells) in state.cells().rows().into_iter().enumerate() {
        let line: String = cells
            .iter()
            .map(|&cell| cell_glyph(cell, state.status()))
            .collect();
        writeln!(out, "{:>3} {}", row, line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::MineLayout;

    fn game(size: (u8, u8), mines: &[(u8, u8)]) -> GameState {
        GameState::from_layout(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    fn draw_to_string(state: &GameState) -> String {
        let mut out = Vec::new();
        draw(&mut out, state, state.start_time()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn formats_elapsed_time() {
        assert_eq!(format_elapsed(TimeDelta::zero()), "00:00:00");
        assert_eq!(format_elapsed(TimeDelta::seconds(3725)), "01:02:05");
        assert_eq!(format_elapsed(TimeDelta::seconds(-4)), "00:00:00");
    }

    #[test]
    fn hides_mines_while_playing() {
        let state = game((2, 3), &[(0, 0)]).reveal((1, 2)).toggle_flag((1, 0));

        assert_eq!(
            draw_to_string(&state),
            "mines: 0  time: 00:00:00  playing\n    012\n  0 #1.\n  1 F1.\n"
        );
    }

    #[test]
    fn shows_mines_after_loss() {
        let state = game((1, 3), &[(0, 0), (0, 2)]).reveal((0, 2));

        let text = draw_to_string(&state);

        assert!(text.contains("boom, you lost"));
        assert!(text.ends_with("  0 *#*\n"));
    }

    #[test]
    fn flagged_mine_keeps_flag_after_loss() {
        let cell = Cell {
            mined: true,
            flagged: true,
            ..Cell::default()
        };

        assert_eq!(cell_glyph(cell, GameStatus::Lost), 'F');
        assert_eq!(cell_glyph(Cell { flagged: false, ..cell }, GameStatus::Pending), '#');
    }
}
