use core::str::FromStr;
use sweeper_core::{Coord, Coord2, GameError, GameOptions};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Reset,
    New(GameOptions),
    Show,
    Json,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command {0:?}, try `help`")]
    Unknown(String),
    #[error("Missing {0}")]
    MissingArgument(&'static str),
    #[error("Unexpected argument {0:?}")]
    UnexpectedArgument(String),
    #[error("Invalid {name}: {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error(transparent)]
    Options(#[from] GameError),
}

pub const HELP: &str = "\
commands:
  r ROW COL        reveal a cell
  f ROW COL        flag or unflag a cell
  n                new game with the same options
  new W H MINES    new game with other options
  show             redraw the board
  json             print the game state as JSON
  q                quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Command::Show);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(coords(&mut words)?),
            "f" | "flag" => Command::Flag(coords(&mut words)?),
            "n" | "reset" => Command::Reset,
            "new" => {
                let width = number(&mut words, "width")?;
                let height = number(&mut words, "height")?;
                let mines = number(&mut words, "mine count")?;
                Command::New(GameOptions::try_new(width, height, mines)?)
            }
            "s" | "show" => Command::Show,
            "json" => Command::Json,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(name.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::UnexpectedArgument(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, CommandError> {
    let row: Coord = number(&mut *words, "row")?;
    let col: Coord = number(&mut *words, "column")?;
    Ok((row, col))
}

fn number<'a, T: FromStr>(
    words: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<T, CommandError> {
    let value = words.next().ok_or(CommandError::MissingArgument(name))?;
    value.parse().map_err(|_| CommandError::InvalidNumber {
        name,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!("r 2 3".parse::<Command>(), Ok(Command::Reveal((2, 3))));
        assert_eq!("  FLAG 0 9 ".parse::<Command>(), Ok(Command::Flag((0, 9))));
    }

    #[test]
    fn parses_game_commands() {
        assert_eq!("n".parse::<Command>(), Ok(Command::Reset));
        assert_eq!(
            "new 16 16 40".parse::<Command>(),
            Ok(Command::New(GameOptions::new_unchecked(16, 16, 40)))
        );
        assert_eq!("".parse::<Command>(), Ok(Command::Show));
        assert_eq!("json".parse::<Command>(), Ok(Command::Json));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(CommandError::Unknown("dig".into()))
        );
        assert_eq!(
            "r 1".parse::<Command>(),
            Err(CommandError::MissingArgument("column"))
        );
        assert_eq!(
            "f -1 2".parse::<Command>(),
            Err(CommandError::InvalidNumber {
                name: "row",
                value: "-1".into()
            })
        );
        assert_eq!(
            "q now".parse::<Command>(),
            Err(CommandError::UnexpectedArgument("now".into()))
        );
    }

    #[test]
    fn new_game_options_are_validated() {
        assert_eq!(
            "new 2 2 5".parse::<Command>(),
            Err(CommandError::Options(GameError::TooManyMines {
                requested: 5,
                capacity: 4
            }))
        );
    }
}
