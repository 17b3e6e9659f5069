//! Cumulative score and round history.

use super::phases::Outcome;
use super::types::Player;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{info, instrument};

/// Rounds won per player. Never decreases within a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    x: u32,
    o: u32,
}

impl Score {
    /// Wins for `player`.
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Adds one win for `player` and returns the new total.
    pub fn increment(&mut self, player: Player) -> u32 {
        let slot = match player {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        };
        *slot += 1;
        *slot
    }

    /// Wins across both players.
    pub fn total(&self) -> u32 {
        self.x + self.o
    }

    /// `(player, wins)` pairs in seat order.
    pub fn entries(&self) -> Vec<(Player, u32)> {
        Player::iter().map(|p| (p, self.get(p))).collect()
    }
}

/// Every resolved round, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<Outcome>,
}

impl History {
    /// Appends a resolved round.
    pub fn push(&mut self, outcome: Outcome) {
        self.entries.push(outcome);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[Outcome] {
        &self.entries
    }

    /// Rounds resolved so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True before the first round resolves.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last `window` entries, oldest first.
    pub fn recent(&self, window: usize) -> &[Outcome] {
        let start = self.entries.len().saturating_sub(window);
        &self.entries[start..]
    }

    /// Number of rounds `player` has won.
    pub fn wins_of(&self, player: Player) -> usize {
        self.entries
            .iter()
            .filter(|o| o.winner() == Some(player))
            .count()
    }

    /// Number of drawn rounds.
    pub fn draws(&self) -> usize {
        self.entries.iter().filter(|o| o.is_draw()).count()
    }
}

/// Score and history bookkeeping for one match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreHistory {
    score: Score,
    history: History,
}

impl ScoreHistory {
    /// Empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a round outcome to the history.
    #[instrument(skip(self))]
    pub fn record_outcome(&mut self, outcome: Outcome) {
        self.history.push(outcome);
        info!(rounds = self.history.len(), %outcome, "Round recorded");
    }

    /// Credits `player` with a round win and returns their new total.
    #[instrument(skip(self))]
    pub fn record_win(&mut self, player: Player) -> u32 {
        let wins = self.score.increment(player);
        info!(%player, wins, "Score updated");
        wins
    }

    /// Current score.
    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Round history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Clears score and history. Only a new match does this.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
