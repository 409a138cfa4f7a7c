//! End-of-game detection and scoring.

use tracing::info;

use crate::core::{EndGameReason, GameOutcome, GameState, LogEvent, Score};

/// Trigger conditions active right now.
///
/// Shares: every company sold out. Bonds: the pool is nearly empty.
/// Track: enough charters out of equipment, each major counting alone and
/// the independents together counting once. Resource: few cubes left.
#[must_use]
pub fn active_end_game_conditions(state: &GameState) -> Vec<EndGameReason> {
    let rules = &state.rules;
    let mut reasons = Vec::new();

    if state.companies.iter().all(|c| c.shares_remaining == 0) {
        reasons.push(EndGameReason::Shares);
    }

    if state.bonds.len() <= rules.bonds_end_threshold {
        reasons.push(EndGameReason::Bonds);
    }

    let majors_without_track = state
        .companies
        .iter()
        .filter(|c| c.is_major() && c.equipment_remaining() == 0)
        .count();
    let minors_without_track = state
        .companies
        .iter()
        .filter(|c| !c.is_major())
        .map(|c| c.narrow_gauge_remaining)
        .sum::<u32>()
        == 0;
    if majors_without_track + usize::from(minors_without_track) >= rules.charters_end_threshold {
        reasons.push(EndGameReason::Track);
    }

    if state.board.resource_cubes.len() <= rules.resources_end_threshold {
        reasons.push(EndGameReason::Resource);
    }

    reasons
}

/// Scores and winners for the current cash position.
#[must_use]
pub fn outcome(state: &GameState, reasons: Vec<EndGameReason>) -> GameOutcome {
    let mut scores: Vec<Score> = state
        .players
        .iter()
        .map(|(player, p)| Score { player, cash: p.cash })
        .collect();
    scores.sort_by(|a, b| b.cash.cmp(&a.cash));

    let winners = match scores.first() {
        Some(best) if best.cash >= 0 => scores
            .iter()
            .take_while(|s| s.cash == best.cash)
            .map(|s| s.player)
            .collect(),
        _ => Vec::new(),
    };

    GameOutcome {
        reasons,
        scores,
        winners,
    }
}

/// Record the end of the game.
pub fn end_game(state: &mut GameState, reasons: Vec<EndGameReason>) {
    let result = outcome(state, reasons.clone());
    info!(?reasons, winners = ?result.winners, "game over");
    state.push_log(LogEvent::GameEnded { reasons });
    state.outcome = Some(result);
}

/// Checks run after dividends: any player in debt ends the game at once;
/// otherwise enough simultaneous conditions end it.
pub fn check_after_dividends(state: &mut GameState) {
    if state.players.values().any(|p| p.cash < 0) {
        end_game(state, vec![EndGameReason::Bankruptcy]);
        return;
    }

    let reasons = active_end_game_conditions(state);
    if reasons.len() >= state.rules.conditions_to_end {
        end_game(state, reasons);
    }
}
