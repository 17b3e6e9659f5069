//! Match engine: turns, rounds and scoring.
//!
//! The engine is synchronous. Anything time-based is handed back to the
//! host as an [`Effect`]: a [`ScheduledTransition`] to fire after a delay,
//! or a [`TimerSignal`] for the elapsed-time displays. The host owns the
//! clock; the engine only owns the state.

use super::action::{MoveError, Placement};
use super::board::Board;
use super::config::MatchConfig;
use super::contracts::{Contract, PlacementContract, assert_invariants};
use super::counters::Counters;
use super::phases::{GamePhase, Outcome};
use super::rules::{self, Verdict, WinningLine};
use super::score::{History, Score, ScoreHistory};
use super::timer::{TimerScope, TimerSignal};
use super::types::{Cell, Coord, Dimension, DimensionError, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Effects
// ─────────────────────────────────────────────────────────────

/// What a scheduled transition will do when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Score the round for this player.
    ResolveWin(Player),
    /// Clear the board after a draw.
    ResolveDraw,
}

/// Deferred continuation out of `Won` or `Drawn`.
///
/// Hand it back to [`MatchEngine::resolve`] once `delay` has passed. A
/// transition issued before a board resize or a new match is stale and
/// resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledTransition {
    epoch: u64,
    delay: Duration,
    kind: TransitionKind,
}

impl ScheduledTransition {
    /// How long the host should wait before resolving.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// What resolving will do.
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Engine epoch the transition belongs to.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Instruction for the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Call [`MatchEngine::resolve`] with this after its delay.
    Schedule(ScheduledTransition),
    /// Forward to the round or overall timer.
    Timer(TimerSignal),
}

/// Result of an accepted placement.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MoveReport {
    /// Who played where.
    placement: Placement,
    /// What the placement did to the round.
    verdict: Verdict,
    /// Work for the host.
    effects: Vec<Effect>,
}

impl MoveReport {
    /// The transition to fire later, if the round just ended.
    pub fn scheduled(&self) -> Option<ScheduledTransition> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::Schedule(transition) => Some(*transition),
            Effect::Timer(_) => None,
        })
    }
}

/// Result of firing a scheduled transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A fresh board is ready and `opener` moves first.
    NextRound {
        /// Player to move on the new board.
        opener: Player,
        /// Work for the host.
        effects: Vec<Effect>,
    },
    /// `champion` passed the score threshold.
    MatchOver {
        /// Winner of the match.
        champion: Player,
        /// Work for the host.
        effects: Vec<Effect>,
    },
    /// The transition was superseded; nothing changed.
    Stale,
}

impl Resolution {
    /// Effects carried by the resolution.
    pub fn effects(&self) -> &[Effect] {
        match self {
            Resolution::NextRound { effects, .. } | Resolution::MatchOver { effects, .. } => {
                effects
            }
            Resolution::Stale => &[],
        }
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Side length.
    pub size: usize,
    /// Cells, one vector per row.
    pub board: Vec<Vec<Cell>>,
    /// Current phase.
    pub phase: GamePhase,
    /// Player to move (or the round winner while `Won`).
    pub current_player: Player,
    /// Wins per player.
    pub score: Score,
    /// The most recent history entries, oldest first.
    pub recent_history: Vec<Outcome>,
    /// Rounds resolved so far.
    pub rounds_played: usize,
    /// Planned rounds.
    pub max_rounds: u32,
    /// Cells to highlight.
    pub winning_cells: Vec<Coord>,
}

// ─────────────────────────────────────────────────────────────
//  Engine
// ─────────────────────────────────────────────────────────────

/// One match between two players sharing an input surface.
///
/// Each engine owns all of its state, so independent matches are just
/// independent values.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    pub(crate) config: MatchConfig,
    pub(crate) board: Board,
    pub(crate) counters: Counters,
    pub(crate) phase: GamePhase,
    pub(crate) current_player: Player,
    pub(crate) winning_line: Option<WinningLine>,
    pub(crate) record: ScoreHistory,
    pub(crate) epoch: u64,
    pub(crate) pending: Option<ScheduledTransition>,
}

impl MatchEngine {
    /// Starts a match on an empty board.
    #[instrument(skip(config), fields(size = config.dimension().get()))]
    pub fn new(config: MatchConfig) -> Self {
        let size = *config.dimension();
        info!(first_player = %config.first_player(), "Starting match");
        Self {
            board: Board::new(size),
            counters: Counters::new(size),
            phase: GamePhase::InProgress,
            current_player: *config.first_player(),
            winning_line: None,
            record: ScoreHistory::new(),
            epoch: 0,
            pending: None,
            config,
        }
    }

    /// Places the current player's mark at `coord`.
    ///
    /// On a win or draw the phase moves to `Won`/`Drawn` and the report
    /// carries the transition to fire later; otherwise the turn passes.
    ///
    /// # Errors
    ///
    /// Any [`MoveError`]. A refused placement changes nothing and hosts
    /// should treat it as a no-op.
    #[instrument(skip(self), fields(player = %self.current_player, phase = %self.phase))]
    pub fn place(&mut self, coord: Coord) -> Result<MoveReport, MoveError> {
        let placement = Placement::new(self.current_player, coord);

        if let Err(err) = PlacementContract::pre(self, &placement) {
            debug!(%err, "Placement rejected");
            return Err(err);
        }

        #[cfg(debug_assertions)]
        let (board_before, counters_before) = (self.board.clone(), self.counters.clone());

        self.board.place(coord, placement.player)?;
        self.counters.record_move(placement.player, coord)?;

        #[cfg(debug_assertions)]
        if let Err(err) = PlacementContract::post(&board_before, self) {
            warn!(%err, "Placement broke the match; rolling back");
            self.board = board_before;
            self.counters = counters_before;
            return Err(err);
        }

        let verdict = rules::evaluate(&self.board, self.counters.for_player(placement.player));
        let effects = match &verdict {
            Verdict::Win(line) => {
                info!(%placement, line = ?line.line(), "Round won");
                self.phase = GamePhase::Won;
                self.winning_line = Some(line.clone());
                self.end_round(TransitionKind::ResolveWin(placement.player))
            }
            Verdict::Draw => {
                info!(%placement, "Round drawn");
                self.phase = GamePhase::Drawn;
                self.end_round(TransitionKind::ResolveDraw)
            }
            Verdict::Continue => {
                self.current_player = self.current_player.opponent();
                debug!(%placement, next = %self.current_player, "Turn passed");
                Vec::new()
            }
        };

        Ok(MoveReport {
            placement,
            verdict,
            effects,
        })
    }

    /// Fires a transition previously returned in a [`MoveReport`].
    ///
    /// A win is scored and appended to the history; the match ends once the
    /// winner holds more than half of the planned rounds, otherwise the
    /// other player opens a fresh board. A draw is appended and the same
    /// player opens a fresh board. Stale transitions are ignored.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn resolve(&mut self, transition: ScheduledTransition) -> Resolution {
        if self.pending != Some(transition) {
            debug!(?transition, "Ignoring stale transition");
            return Resolution::Stale;
        }
        self.pending = None;

        let resolution = match transition.kind {
            TransitionKind::ResolveWin(winner) => {
                self.record.record_outcome(Outcome::Winner(winner));
                let wins = self.record.record_win(winner);

                if self.config.is_match_point(wins) {
                    info!(%winner, wins, "Match over");
                    self.phase = GamePhase::MatchOver;
                    Resolution::MatchOver {
                        champion: winner,
                        effects: vec![
                            Effect::Timer(TimerSignal::Stop(TimerScope::Round)),
                            Effect::Timer(TimerSignal::Stop(TimerScope::Overall)),
                        ],
                    }
                } else {
                    self.current_player = winner.opponent();
                    self.clear_round();
                    Resolution::NextRound {
                        opener: self.current_player,
                        effects: vec![Effect::Timer(TimerSignal::Reset(TimerScope::Round))],
                    }
                }
            }
            TransitionKind::ResolveDraw => {
                self.record.record_outcome(Outcome::Draw);
                self.clear_round();
                Resolution::NextRound {
                    opener: self.current_player,
                    effects: vec![Effect::Timer(TimerSignal::Reset(TimerScope::Round))],
                }
            }
        };

        assert_invariants(self);
        resolution
    }

    /// Re-seeds the board at a new size.
    ///
    /// Score, history and the current player carry over. Any pending
    /// transition becomes stale.
    ///
    /// # Errors
    ///
    /// [`DimensionError`] for sizes below three; the match is untouched.
    #[instrument(skip(self), fields(current = self.board.size().get()))]
    pub fn change_dimension(&mut self, size: usize) -> Result<Vec<Effect>, DimensionError> {
        let size = Dimension::new(size).inspect_err(|err| warn!(%err, "Rejected board size"))?;
        Ok(self.resize(size))
    }

    /// [`change_dimension`](Self::change_dimension) with an already validated size.
    #[instrument(skip(self))]
    pub fn resize(&mut self, size: Dimension) -> Vec<Effect> {
        info!(%size, "Resizing board");
        self.invalidate_pending();
        self.board.reset(size);
        self.clear_round();
        assert_invariants(self);
        vec![Effect::Timer(TimerSignal::Reset(TimerScope::Round))]
    }

    /// Throws the whole match away, score and history included.
    ///
    /// The board keeps its current size and the configured first player
    /// opens.
    #[instrument(skip(self))]
    pub fn new_match(&mut self) -> Vec<Effect> {
        info!("Starting new match");
        self.invalidate_pending();
        self.record.reset();
        self.current_player = *self.config.first_player();
        self.clear_round();
        assert_invariants(self);
        vec![
            Effect::Timer(TimerSignal::Reset(TimerScope::Round)),
            Effect::Timer(TimerSignal::Reset(TimerScope::Overall)),
        ]
    }

    /// Read-only view for rendering.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            size: self.board.size().get(),
            board: self.board.rows().map(<[Cell]>::to_vec).collect(),
            phase: self.phase,
            current_player: self.current_player,
            score: *self.record.score(),
            recent_history: self
                .record
                .history()
                .recent(*self.config.history_window())
                .to_vec(),
            rounds_played: self.record.history().len(),
            max_rounds: *self.config.max_rounds(),
            winning_cells: self
                .winning_line
                .as_ref()
                .map(|line| line.cells().to_vec())
                .unwrap_or_default(),
        }
    }

    /// Empty cells the current player may take; none outside `InProgress`.
    pub fn valid_moves(&self) -> Vec<Coord> {
        if self.phase.accepts_moves() {
            self.board.empty_cells()
        } else {
            Vec::new()
        }
    }

    /// True if `coord` lies on the highlighted winning line.
    pub fn is_winning_cell(&self, coord: Coord) -> bool {
        self.winning_line
            .as_ref()
            .is_some_and(|line| line.contains(coord))
    }

    /// Match configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Both players' line tallies.
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Player to move. While `Won` or `MatchOver`, the player who won.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Line completed this round, if any.
    pub fn winning_line(&self) -> Option<&WinningLine> {
        self.winning_line.as_ref()
    }

    /// Wins per player.
    pub fn score(&self) -> &Score {
        self.record.score()
    }

    /// Resolved rounds.
    pub fn history(&self) -> &History {
        self.record.history()
    }

    /// Transition waiting to be fired, if any.
    pub fn pending(&self) -> Option<ScheduledTransition> {
        self.pending
    }

    fn end_round(&mut self, kind: TransitionKind) -> Vec<Effect> {
        let transition = ScheduledTransition {
            epoch: self.epoch,
            delay: self.config.presentation_delay(),
            kind,
        };
        self.pending = Some(transition);
        vec![
            Effect::Timer(TimerSignal::Stop(TimerScope::Round)),
            Effect::Schedule(transition),
        ]
    }

    fn clear_round(&mut self) {
        let size = self.board.size();
        self.board.reset(size);
        self.counters.reset(size);
        self.winning_line = None;
        self.phase = GamePhase::InProgress;
    }

    fn invalidate_pending(&mut self) {
        if let Some(transition) = self.pending.take() {
            debug!(?transition, "Dropping pending transition");
        }
        self.epoch += 1;
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}
