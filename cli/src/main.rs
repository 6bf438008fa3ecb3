use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::io::{self, BufRead, Write};
use sweeper_core::{CellCount, Coord, FlagOutcome, GameOptions, RevealOutcome, Session};

use crate::command::{Command, HELP};

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width in cells
    #[arg(long, default_value_t = GameOptions::DEFAULT_WIDTH)]
    width: Coord,

    /// Board height in cells
    #[arg(long, default_value_t = GameOptions::DEFAULT_HEIGHT)]
    height: Coord,

    /// How many mines to place
    #[arg(long, default_value_t = GameOptions::DEFAULT_MINES)]
    mines: CellCount,

    /// Options as a query string such as `width=16&height=16&mineCount=40`, replaces the flags above
    #[arg(long)]
    query: Option<String>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn game_options(&self) -> sweeper_core::Result<GameOptions> {
        match &self.query {
            Some(query) => GameOptions::from_query(query),
            None => GameOptions::try_new(self.width, self.height, self.mines),
        }
    }
}

/// Routes `log` records through a `tracing` fmt subscriber on stderr.
fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    use tracing_subscriber::filter::LevelFilter;

    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// Applies one command, returning whether the board should be drawn again.
fn run(session: &mut Session, command: Command, out: &mut impl Write) -> anyhow::Result<bool> {
    Ok(match command {
        Command::Reveal(coords) => {
            let outcome = session.reveal(coords);
            if outcome == RevealOutcome::NoChange {
                writeln!(out, "nothing to reveal at {:?}", coords)?;
            }
            outcome.has_update()
        }
        Command::Flag(coords) => {
            let outcome = session.toggle_flag(coords);
            if outcome == FlagOutcome::NoChange {
                writeln!(out, "cannot flag {:?}", coords)?;
            }
            outcome.has_update()
        }
        Command::Reset => {
            session.reset();
            true
        }
        Command::New(options) => {
            session.create(options);
            true
        }
        Command::Show => true,
        Command::Json => {
            let json = serde_json::to_string_pretty(session.state())
                .context("Could not serialize game state")?;
            writeln!(out, "{}", json)?;
            false
        }
        Command::Help => {
            writeln!(out, "{}", HELP)?;
            false
        }
        Command::Quit => false,
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let options = args.game_options().context("Invalid game options")?;
    log::debug!("options: {:?}, seed: {:?}", options, args.seed);
    let mut session = match args.seed {
        Some(seed) => Session::with_seed(options, seed),
        None => Session::new(options),
    };

    let mut out = io::stdout().lock();
    render::draw(&mut out, session.state(), Utc::now())?;
    writeln!(out, "type `help` for commands")?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;
        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{}", err)?;
                continue;
            }
        };
        log::trace!("command: {:?}", command);

        if run(&mut session, command, &mut out)? {
            render::draw(&mut out, session.state(), Utc::now())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::GameStatus;

    #[test]
    fn query_replaces_flags() {
        let args = Args::parse_from(["sweeper", "--width", "4", "--query", "width=6&mineCount=3"]);

        assert_eq!(
            args.game_options(),
            Ok(GameOptions::new_unchecked(6, 10, 3))
        );
    }

    #[test]
    fn flags_default_to_ten_by_ten() {
        let args = Args::parse_from(["sweeper", "-s", "3"]);

        assert_eq!(args.game_options(), Ok(GameOptions::default()));
        assert_eq!(args.seed, Some(3));
    }

    #[test]
    fn overfull_board_is_rejected() {
        let args = Args::parse_from(["sweeper", "--width", "2", "--height", "2", "--mines", "5"]);

        assert!(args.game_options().is_err());
    }

    #[test]
    fn run_reports_noops_and_redraws_changes() {
        let mut session = Session::with_seed(GameOptions::new(3, 3, 9), 0);
        let mut out = Vec::new();

        assert!(!run(&mut session, Command::Flag((5, 5)), &mut out).unwrap());
        assert!(run(&mut session, Command::Reveal((0, 0)), &mut out).unwrap());
        assert_eq!(session.state().status(), GameStatus::Lost);
        assert!(!run(&mut session, Command::Reveal((1, 1)), &mut out).unwrap());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("cannot flag (5, 5)"));
        assert!(text.contains("nothing to reveal at (1, 1)"));
    }

    #[test]
    fn json_dump_uses_product_field_names() {
        let mut session = Session::with_seed(GameOptions::new(2, 2, 1), 0);
        let mut out = Vec::new();

        assert!(!run(&mut session, Command::Json, &mut out).unwrap());

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"], "pending");
        assert_eq!(value["mineCount"], 1);
    }
}
