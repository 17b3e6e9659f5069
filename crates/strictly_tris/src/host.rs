//! Terminal host: reads commands, runs the engine, honors its effects.

use anyhow::Result;
use derive_more::{Display, From};
use std::str::FromStr;
use strictly_tris::{
    Coord, CoordParseError, Dimension, DimensionError, Effect, GamePhase, MatchEngine, Player,
    Resolution, ScheduledTransition, Stopwatch, Timer,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

const HELP: &str = "\
Commands:
  place R C | R C | R-C   put the current player's mark at row R, column C
  size N                  re-seed the board at N x N (3 <= N <= 1024); score is kept
  show                    print the board
  json                    print a JSON snapshot
  new                     start a new match (score and history cleared)
  help                    this text
  quit                    leave";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Place the current player's mark.
    Place(Coord),
    /// Change the board size.
    Resize(Dimension),
    /// Print the board.
    Show,
    /// Print a JSON snapshot.
    Json,
    /// Start over.
    NewMatch,
    /// Print usage.
    Help,
    /// Exit.
    Quit,
}

/// Input the host could not understand.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum HostCommandError {
    /// Not a known command.
    #[display("Unknown command {:?} (try \"help\")", _0)]
    Unknown(String),

    /// Bad coordinates.
    #[display("{}", _0)]
    Coord(CoordParseError),

    /// Bad board size.
    #[display("{}", _0)]
    Dimension(DimensionError),
}

impl std::error::Error for HostCommandError {}

impl FromStr for HostCommand {
    type Err = HostCommandError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match word.to_lowercase().as_str() {
            "place" | "p" => Ok(HostCommand::Place(rest.parse()?)),
            "size" | "resize" => Ok(HostCommand::Resize(rest.parse()?)),
            "show" | "board" => Ok(HostCommand::Show),
            "json" => Ok(HostCommand::Json),
            "new" => Ok(HostCommand::NewMatch),
            "help" | "?" => Ok(HostCommand::Help),
            "quit" | "exit" | "q" => Ok(HostCommand::Quit),
            _ => line
                .parse::<Coord>()
                .map(HostCommand::Place)
                .map_err(|_| HostCommandError::Unknown(line.to_string())),
        }
    }
}

/// Interactive match on stdin/stdout.
pub struct Host {
    engine: MatchEngine,
    round: Stopwatch,
    overall: Stopwatch,
    json: bool,
    due: Option<(Instant, ScheduledTransition)>,
}

impl Host {
    /// Wraps an engine; both timers start immediately.
    pub fn new(engine: MatchEngine, json: bool) -> Self {
        Self {
            engine,
            round: Stopwatch::started(),
            overall: Stopwatch::started(),
            json,
            due: None,
        }
    }

    /// Runs until `quit` or end of input.
    ///
    /// While a round is waiting to resolve, input is still read; the engine
    /// refuses placements during that window rather than queueing them.
    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("{}", HELP);
        self.render();

        loop {
            let line = match self.due {
                Some((deadline, transition)) => {
                    tokio::select! {
                        _ = tokio::time::sleep_until(deadline) => {
                            self.due = None;
                            self.fire(transition);
                            continue;
                        }
                        line = lines.next_line() => line?,
                    }
                }
                None => lines.next_line().await?,
            };

            let Some(line) = line else {
                info!("End of input");
                return Ok(());
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<HostCommand>() {
                Ok(HostCommand::Quit) => return Ok(()),
                Ok(command) => self.handle(command),
                Err(err) => println!("{}", err),
            }
        }
    }

    #[instrument(skip(self))]
    fn handle(&mut self, command: HostCommand) {
        match command {
            HostCommand::Place(coord) => match self.engine.place(coord) {
                Ok(report) => {
                    self.apply(report.effects());
                    self.render();
                }
                Err(err) => {
                    debug!(%err, "Placement ignored");
                    println!("Ignored: {}", err);
                }
            },
            HostCommand::Resize(size) => {
                let effects = self.engine.resize(size);
                self.apply(&effects);
                self.render();
            }
            HostCommand::NewMatch => {
                let effects = self.engine.new_match();
                self.apply(&effects);
                self.render();
            }
            HostCommand::Show => self.render_board(),
            HostCommand::Json => self.render_json(),
            HostCommand::Help => println!("{}", HELP),
            HostCommand::Quit => {}
        }
    }

    fn apply(&mut self, effects: &[Effect]) {
        // A resize or new match drops whatever was waiting.
        if self.engine.pending().is_none() {
            self.due = None;
        }

        for effect in effects {
            match effect {
                Effect::Timer(signal) => signal.apply(&mut self.round, &mut self.overall),
                Effect::Schedule(transition) => {
                    debug!(delay = ?transition.delay(), "Scheduling transition");
                    self.due = Some((Instant::now() + transition.delay(), *transition));
                }
            }
        }
    }

    fn fire(&mut self, transition: ScheduledTransition) {
        let resolution = self.engine.resolve(transition);
        match &resolution {
            Resolution::NextRound { opener, .. } => {
                println!("New round: {} opens.", seat(*opener));
            }
            Resolution::MatchOver { champion, .. } => {
                println!("{} wins the match!", seat(*champion));
            }
            Resolution::Stale => warn!("Transition was stale"),
        }
        self.apply(resolution.effects());
        self.render();
    }

    fn render(&self) {
        if self.json {
            self.render_json();
        } else {
            self.render_board();
        }
    }

    fn render_board(&self) {
        let snapshot = self.engine.snapshot();
        println!();
        println!(
            "Round {} | Total {}",
            self.round.formatted(),
            self.overall.formatted()
        );
        println!("{}", self.engine.board().display());

        if !snapshot.winning_cells.is_empty() {
            let cells: Vec<String> = snapshot.winning_cells.iter().map(|c| c.to_string()).collect();
            println!("Winning line: {}", cells.join(" "));
        }

        let score: Vec<String> = self
            .engine
            .score()
            .entries()
            .into_iter()
            .map(|(player, wins)| format!("{}: {}", seat(player), wins))
            .collect();
        println!("Score  {}", score.join("  "));

        let badges: Vec<String> = snapshot.recent_history.iter().map(|o| o.label()).collect();
        println!(
            "Played {}/{}  [{}]",
            snapshot.rounds_played,
            snapshot.max_rounds,
            badges.join(" ")
        );

        let status = match snapshot.phase {
            GamePhase::InProgress => format!("{} to move", seat(snapshot.current_player)),
            GamePhase::Won => format!("{} takes the round", seat(snapshot.current_player)),
            GamePhase::Drawn => "Draw".to_string(),
            GamePhase::MatchOver => {
                format!("Game over - {} wins", seat(snapshot.current_player))
            }
        };
        println!("{}", status);
    }

    fn render_json(&self) {
        match serde_json::to_string_pretty(&self.engine.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(err) => warn!(%err, "Failed to serialize snapshot"),
        }
    }
}

fn seat(player: Player) -> String {
    format!("Player {} ({})", player.number(), player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place_variants() {
        let expected = HostCommand::Place(Coord::new(1, 2));
        assert_eq!("place 1 2".parse::<HostCommand>(), Ok(expected.clone()));
        assert_eq!("p 1-2".parse::<HostCommand>(), Ok(expected.clone()));
        assert_eq!("1 2".parse::<HostCommand>(), Ok(expected.clone()));
        assert_eq!("1,2".parse::<HostCommand>(), Ok(expected));
    }

    #[test]
    fn test_parse_resize() {
        assert_eq!(
            "size 5".parse::<HostCommand>(),
            Ok(HostCommand::Resize(Dimension::new(5).unwrap()))
        );
        assert_eq!(
            "size 2".parse::<HostCommand>(),
            Err(HostCommandError::Dimension(DimensionError::TooSmall(2)))
        );
        assert_eq!(
            "size 100000".parse::<HostCommand>(),
            Err(HostCommandError::Dimension(DimensionError::TooLarge(100_000)))
        );
        assert!(matches!(
            "size big".parse::<HostCommand>(),
            Err(HostCommandError::Dimension(DimensionError::NotAnInteger(_)))
        ));
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!("SHOW".parse::<HostCommand>(), Ok(HostCommand::Show));
        assert_eq!("new".parse::<HostCommand>(), Ok(HostCommand::NewMatch));
        assert_eq!(" quit ".parse::<HostCommand>(), Ok(HostCommand::Quit));
        assert!(matches!(
            "dance".parse::<HostCommand>(),
            Err(HostCommandError::Unknown(_))
        ));
    }

    #[test]
    fn test_apply_tracks_scheduled_transition() {
        let mut host = Host::new(MatchEngine::default(), false);
        let mut report = None;
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            report = Some(host.engine.place(Coord::new(row, col)).unwrap());
        }
        let report = report.unwrap();

        host.apply(report.effects());
        assert!(!host.round.is_running());
        assert!(host.overall.is_running());
        let (_, transition) = host.due.unwrap();
        assert_eq!(Some(transition), report.scheduled());

        // Resizing drops the pending transition.
        let effects = host.engine.resize(Dimension::new(4).unwrap());
        host.apply(&effects);
        assert!(host.due.is_none());
        assert!(host.round.is_running());
    }
}
