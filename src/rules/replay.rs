//! Rebuilding a match from its move history.
//!
//! Setup is a pure function of the seed, and every move is deterministic,
//! so `(rules, player count, seed, history)` is a complete record of a
//! match.

use tracing::debug;

use crate::core::{GameRng, GameState, MoveRecord, ReplayError, RulesConfig};

use super::engine::{EmuBay, RulesEngine};

/// Set up with `seed` and re-apply `history` in order.
pub fn replay(
    rules: RulesConfig,
    player_count: usize,
    seed: u64,
    history: &[MoveRecord],
) -> Result<GameState, ReplayError> {
    let engine = EmuBay::new(rules);
    let mut state = engine.setup(player_count, &mut GameRng::new(seed))?;

    for record in history {
        engine
            .apply_move(&mut state, record.player, &record.mv)
            .map_err(|source| ReplayError::Move {
                sequence: record.sequence,
                name: record.mv.name(),
                source,
            })?;
    }

    debug!(seed, moves = history.len(), "replayed");
    Ok(state)
}
