//! Strictly Tris - N x N tic-tac-toe match engine
//!
//! Two players share one board. The engine runs rounds until one of them
//! has won more than half of the planned rounds.
//!
//! # Architecture
//!
//! - **Board**: the N x N grid; validates bounds and occupancy
//! - **Counters**: per-player line tallies, updated once per placement
//! - **Rules**: O(N) win detection from the tallies, then draw detection
//! - **Engine**: turn order, phases, score and history
//! - **Contracts**: preconditions and debug-build invariants around every move
//!
//! The engine never sleeps or reads a clock. Round endings come back as
//! [`Effect`]s that the host schedules.
//!
//! # Example
//!
//! ```
//! use strictly_tris::{Coord, GamePhase, MatchConfig, MatchEngine, Player, Resolution};
//!
//! let mut engine = MatchEngine::new(MatchConfig::default());
//! for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
//!     engine.place(Coord::new(row, col)).unwrap();
//! }
//! let report = engine.place(Coord::new(0, 2)).unwrap();
//! assert_eq!(engine.phase(), GamePhase::Won);
//!
//! // After the presentation delay:
//! let resolution = engine.resolve(report.scheduled().unwrap());
//! assert!(matches!(resolution, Resolution::NextRound { opener: Player::O, .. }));
//! assert_eq!(engine.score().get(Player::X), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod config;
mod counters;
mod engine;
mod phases;
mod score;
mod timer;
mod types;

pub mod contracts;
pub mod invariants;
pub mod rules;

// Crate-level exports - Domain types
pub use types::{Cell, Coord, CoordParseError, Dimension, DimensionError, Player};

// Crate-level exports - Board and tallies
pub use board::Board;
pub use counters::{Counters, LineCounters};

// Crate-level exports - Rules
pub use rules::{Line, Verdict, WinningLine};

// Crate-level exports - Actions and errors
pub use action::{MoveError, Placement};

// Crate-level exports - Phases and bookkeeping
pub use phases::{GamePhase, Outcome};
pub use score::{History, Score, ScoreHistory};

// Crate-level exports - Engine
pub use engine::{
    Effect, MatchEngine, MatchSnapshot, MoveReport, Resolution, ScheduledTransition,
    TransitionKind,
};

// Crate-level exports - Configuration
pub use config::{CONFIG_ENV_VAR, ConfigError, MatchConfig};

// Crate-level exports - Timers
pub use timer::{Stopwatch, Timer, TimerScope, TimerSignal, format_elapsed};
