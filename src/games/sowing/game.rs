//! Sowing game implementation.

use log::debug;

use crate::board::{Board, HoleIndex, StoneId};
use crate::core::{GameError, GameRng, PlayerId, PlayerMap, Result, VICTORY_TIE, VICTORY_WIN};
use crate::rules::{GameResult, RulesEngine};
use crate::triggers::Event;

/// The sowing action engine.
///
/// A move empties one of the mover's play holes and drops its stones one
/// per hole around the ring, scoring holes included. Ending in one's own
/// scoring hole earns another turn; ending alone in one's own empty hole
/// captures the facing hole. The game ends as soon as any seat has no
/// stones left in its play holes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SowingRules;

impl SowingRules {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Fail with `GameFinished` once the end-of-game sweep has run.
    pub fn ensure_in_progress(board: &Board) -> Result<()> {
        if board.finished {
            Err(GameError::GameFinished)
        } else {
            Ok(())
        }
    }

    /// Check that `player` may sow from `hole`, without touching the board.
    pub fn validate(board: &Board, player: PlayerId, hole: HoleIndex) -> Result<()> {
        Self::ensure_in_progress(board)?;

        let target = board.hole(hole).ok_or(GameError::HoleOutOfRange {
            index: hole,
            len: board.len(),
        })?;
        if target.owner != player {
            return Err(GameError::NotOwnHole(hole));
        }
        if target.scoring {
            return Err(GameError::ScoringHole(hole));
        }
        if target.is_empty() {
            return Err(GameError::EmptyHole(hole));
        }
        Ok(())
    }

    /// Victory values for every seat from the current scoring holes.
    ///
    /// The single best seat gets `VICTORY_WIN`, seats sharing the best score
    /// get `VICTORY_TIE`, everyone else their (negative) distance to it.
    #[must_use]
    pub fn standings(board: &Board) -> PlayerMap<i64> {
        let scores = board.scores();
        let best = scores.values().copied().max().unwrap_or(0);
        let leaders = scores.values().filter(|&&s| s == best).count();

        PlayerMap::new(board.player_count(), |player| {
            let score = scores[player];
            if score != best {
                score as i64 - best as i64
            } else if leaders == 1 {
                VICTORY_WIN
            } else {
                VICTORY_TIE
            }
        })
    }

    /// Drop one stone and record the turn and scoring consequences.
    fn drop_stone(
        board: &mut Board,
        mover: PlayerId,
        at: HoleIndex,
        stone: StoneId,
        last: bool,
        events: &mut Vec<Event>,
    ) {
        let (owner, scoring) = {
            let hole = &board.holes()[at];
            (hole.owner, hole.scoring)
        };

        if last {
            if scoring && owner == mover {
                board.rounds_repeated += 1;
                events.push(Event::repeat(mover, at, board.rounds_repeated));
            } else {
                board.advance_turn();
            }
        }

        board.drop_stone(at, stone);

        if scoring {
            if owner == mover {
                events.push(Event::collected(mover, at, stone));
            } else {
                events.push(Event::own_goal(mover, at, stone));
                events.push(Event::collected(owner, at, stone));
            }
        }
    }

    /// Capture after the last stone lands alone in one of the mover's holes.
    fn try_capture(board: &mut Board, mover: PlayerId, at: HoleIndex, events: &mut Vec<Event>) {
        let hole = &board.holes()[at];
        if hole.scoring || hole.len() != 1 || hole.owner != mover {
            return;
        }
        let Some(opposite) = hole.opposite else {
            return;
        };
        let eaten = board.holes()[opposite].len();
        if eaten == 0 {
            return;
        }
        let Some(store) = board.scoring_hole(mover) else {
            return;
        };

        let mut stones = board.take_stones(at);
        stones.extend(board.take_stones(opposite));
        board.deposit(store, &stones);

        debug!("{mover} captured {eaten} stones from hole {opposite}");
        events.push(Event::eaten(mover, at, eaten as i64, stones));
    }

    /// Sweep every play hole home and score the game once a seat runs dry.
    fn try_finish(board: &mut Board, events: &mut Vec<Event>) {
        if !board.free_stones().values().any(|&n| n == 0) {
            return;
        }

        let mut swept: PlayerMap<Vec<StoneId>> = PlayerMap::with_default(board.player_count());
        for index in 0..board.len() {
            let hole = &board.holes()[index];
            if hole.scoring {
                continue;
            }
            let owner = hole.owner;
            swept[owner].extend(board.take_stones(index));
        }

        for (player, stones) in swept.iter() {
            events.push(Event::end_of_round(player, stones));
            if let Some(store) = board.scoring_hole(player) {
                board.deposit(store, stones);
            }
        }

        board.finished = true;

        let standings = Self::standings(board);
        debug!("game finished, scores {:?}", board.scores());
        for (player, &value) in standings.iter() {
            events.push(Event::victory(player, value));
        }
    }
}

impl RulesEngine for SowingRules {
    fn legal_holes(&self, board: &Board, player: PlayerId) -> Vec<HoleIndex> {
        if board.finished || board.current_player != player {
            return Vec::new();
        }
        (0..board.len())
            .filter(|&index| Self::validate(board, player, index).is_ok())
            .collect()
    }

    fn apply_move(
        &self,
        board: &mut Board,
        player: PlayerId,
        hole: HoleIndex,
        rng: &mut GameRng,
    ) -> Result<Vec<Event>> {
        Self::validate(board, player, hole)?;

        let mut stones = board.take_stones(hole);
        rng.shuffle(&mut stones);

        let mut events = Vec::new();
        let count = stones.len();
        let mut at = hole;

        for (step, stone) in stones.into_iter().enumerate() {
            at = board.next(at);
            let last = step + 1 == count;

            Self::drop_stone(board, player, at, stone, last, &mut events);
            if last {
                Self::try_capture(board, player, at, &mut events);
            }
        }

        Self::try_finish(board, &mut events);
        Ok(events)
    }

    fn is_terminal(&self, board: &Board) -> Option<GameResult> {
        if !board.finished {
            return None;
        }
        let winners: Vec<PlayerId> = Self::standings(board)
            .iter()
            .filter(|(_, v)| **v > 0)
            .map(|(p, _)| p)
            .collect();

        if let [single] = winners[..] {
            Some(GameResult::Winner(single))
        } else {
            Some(GameResult::Winners(winners))
        }
    }
}
