//! Rules engine trait and the Emu Bay implementation.
//!
//! `RulesEngine` is the seam a host drives a match through:
//! - which moves are legal for a player
//! - how a move changes the state
//! - whether the game is over
//!
//! `EmuBay::apply_move` is the only way state changes once a match is set
//! up. It works on a copy and commits the copy only if every check passed,
//! so a rejected move leaves the caller's state exactly as it was.

use tracing::debug;

use crate::actions::ActionKind;
use crate::auction::{self, auctionable_companies, check_auctionable, minimum_bid};
use crate::board::{allowed_build_spaces, BuildMode};
use crate::core::{
    CompanyId, EndGameReason, GameOutcome, GameRng, GameState, LogEvent, Move, MoveRecord, MoveRejected, Phase,
    PlayerId, RulesConfig, SetupError, Stage,
};
use crate::economy::{bond_companies, build_track, issue_bond, pay_dividends, take_resource, take_resource_spaces};
use crate::setup::setup_with_rules;

use super::endgame::{check_after_dividends, end_game};
use super::merger::{merge, mergeable_companies};
use super::stalemate::{action_available, stalemate_available};
use super::turn;

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_moves`: empty when the player cannot act
/// - `apply_move`: atomic and deterministic
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    /// The rule constants this engine plays by.
    fn rules(&self) -> &RulesConfig;

    /// Every move `player` could make now.
    fn legal_moves(&self, state: &GameState, player: PlayerId) -> Vec<Move>;

    /// Apply `mv` for `player`, or reject it without touching `state`.
    fn apply_move(&self, state: &mut GameState, player: PlayerId, mv: &Move) -> Result<(), MoveRejected>;

    /// The outcome once the game has ended.
    fn is_terminal<'a>(&self, state: &'a GameState) -> Option<&'a GameOutcome>;

    // === Convenience Methods ===

    /// Parse a wire move and apply it.
    fn apply_named(&self, state: &mut GameState, player: PlayerId, name: &str, args: &[i64]) -> Result<(), MoveRejected> {
        let mv = Move::parse(name, args)?;
        self.apply_move(state, player, &mv)
    }

    /// Whether `mv` would be accepted, without applying it.
    fn is_legal(&self, state: &GameState, player: PlayerId, mv: &Move) -> bool {
        let mut scratch = state.clone();
        self.apply_move(&mut scratch, player, mv).is_ok()
    }
}

/// The Emu Bay Railway Company rules.
#[derive(Clone, Debug, Default)]
pub struct EmuBay {
    rules: RulesConfig,
}

impl EmuBay {
    #[must_use]
    pub fn new(rules: RulesConfig) -> Self {
        Self { rules }
    }

    /// Set up a new match for `player_count` players.
    pub fn setup(&self, player_count: usize, rng: &mut GameRng) -> Result<GameState, SetupError> {
        setup_with_rules(self.rules.clone(), player_count, rng)
    }
}

impl RulesEngine for EmuBay {
    fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    fn legal_moves(&self, state: &GameState, player: PlayerId) -> Vec<Move> {
        if state.is_over() || player != state.current_player() {
            return Vec::new();
        }
        legal_moves_for(state, player)
    }

    fn apply_move(&self, state: &mut GameState, player: PlayerId, mv: &Move) -> Result<(), MoveRejected> {
        let mut working = state.clone();
        match apply(&mut working, player, mv) {
            Ok(()) => {
                let sequence = working.history.len() as u32;
                working.history.push_back(MoveRecord {
                    player,
                    mv: mv.clone(),
                    sequence,
                });
                debug!(%player, name = mv.name(), sequence, "move applied");
                *state = working;
                Ok(())
            }
            Err(reason) => {
                debug!(%player, name = mv.name(), %reason, "move rejected");
                Err(reason)
            }
        }
    }

    fn is_terminal<'a>(&self, state: &'a GameState) -> Option<&'a GameOutcome> {
        state.outcome.as_ref()
    }
}

/// Builder for an engine and its starting state.
pub struct EmuBayBuilder {
    player_count: usize,
    rules: RulesConfig,
}

impl Default for EmuBayBuilder {
    fn default() -> Self {
        Self {
            player_count: 4,
            rules: RulesConfig::default(),
        }
    }
}

impl EmuBayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Build the engine and the initial state.
    pub fn build(self, seed: u64) -> Result<(EmuBay, GameState), SetupError> {
        let engine = EmuBay::new(self.rules);
        let state = engine.setup(self.player_count, &mut GameRng::new(seed))?;
        Ok((engine, state))
    }
}

fn stage_of(state: &GameState) -> Result<&Stage, MoveRejected> {
    state
        .turn
        .phase
        .stage()
        .ok_or(MoveRejected::WrongPhase(state.turn.phase.name()))
}

fn require_shareholder(state: &GameState, player: PlayerId, company: CompanyId) -> Result<(), MoveRejected> {
    if state.company(company).is_shareholder(player) {
        Ok(())
    } else {
        Err(MoveRejected::NotShareholder { player, company })
    }
}

/// Some kind other than `removed` has a free slot and a legal follow-up.
fn has_follow_up(state: &GameState, player: PlayerId, removed: ActionKind) -> bool {
    state
        .action_cubes
        .placeable()
        .any(|kind| kind != removed && action_available(state, player, kind))
}

fn has_build_target(state: &GameState, company: CompanyId) -> bool {
    [BuildMode::Normal, BuildMode::Narrow]
        .into_iter()
        .any(|mode| !allowed_build_spaces(state, mode, company).is_empty())
}

/// Validate and apply one move in place. The caller discards `state` on
/// error.
fn apply(state: &mut GameState, player: PlayerId, mv: &Move) -> Result<(), MoveRejected> {
    if state.is_over() {
        return Err(MoveRejected::GameOver);
    }
    if !state.players.contains(player) {
        return Err(MoveRejected::UnknownPlayer(player));
    }
    if player != state.current_player() {
        return Err(MoveRejected::NotYourTurn {
            expected: state.current_player(),
            actual: player,
        });
    }
    mv.check_companies()?;

    match mv {
        Move::Bid { amount } => {
            let step = auction::bid(state, player, *amount)?;
            turn::advance_auction(state, step);
            Ok(())
        }
        Move::Pass => {
            let step = auction::pass(state, player)?;
            turn::advance_auction(state, step);
            Ok(())
        }
        Move::RemoveCube { action } => {
            if stage_of(state)? != &Stage::RemoveCube {
                return Err(MoveRejected::WrongStage(stage_of(state)?.name()));
            }
            if !state.action_cubes.has_cube(*action) {
                return Err(MoveRejected::NoCubeToRemove(*action));
            }
            if !has_follow_up(state, player, *action) {
                return Err(MoveRejected::NoFollowUp(*action));
            }
            state.action_cubes.remove(*action)?;
            state.push_log(LogEvent::CubeRemoved {
                player,
                action: *action,
            });
            state.turn.phase = Phase::NormalPlay(Stage::TakeAction { vacated: *action });
            Ok(())
        }
        Move::DeclareStalemate => {
            if stage_of(state)? != &Stage::RemoveCube {
                return Err(MoveRejected::WrongStage(stage_of(state)?.name()));
            }
            if !stalemate_available(state) {
                return Err(MoveRejected::StalemateUnavailable);
            }
            state.push_log(LogEvent::StalemateDeclared { player });
            end_game(state, vec![EndGameReason::Stalemate]);
            Ok(())
        }
        Move::BuildTrack { at, mode } => {
            let Stage::BuildingTrack {
                company,
                builds_remaining,
                ..
            } = *stage_of(state)?
            else {
                return Err(MoveRejected::WrongStage(stage_of(state)?.name()));
            };
            if builds_remaining == 0 {
                return Err(MoveRejected::NoBuildsRemaining);
            }
            let built = build_track(state, company, *at, *mode)?;
            state.push_log(LogEvent::TrackBuilt {
                player,
                company,
                at: *at,
                cost: built.cost,
                revenue: built.revenue,
            });
            state.turn.phase = Phase::NormalPlay(Stage::BuildingTrack {
                company,
                builds_remaining: builds_remaining - 1,
                any_built: true,
            });
            Ok(())
        }
        Move::DoneBuilding => match stage_of(state)?.clone() {
            Stage::BuildingTrack { any_built: true, .. } => {
                turn::finish_multi_step(state);
                Ok(())
            }
            Stage::BuildingTrack { any_built: false, .. } => Err(MoveRejected::NothingDoneYet),
            other => Err(MoveRejected::WrongStage(other.name())),
        },
        Move::TakeResource { at } => {
            let Stage::TakeResources { company, .. } = *stage_of(state)? else {
                return Err(MoveRejected::WrongStage(stage_of(state)?.name()));
            };
            let (cost, revenue) = take_resource(state, company, *at)?;
            state.push_log(LogEvent::ResourceTaken {
                player,
                company,
                at: *at,
                cost,
                revenue,
            });
            state.turn.phase = Phase::NormalPlay(Stage::TakeResources {
                company,
                mine_location: Some(*at),
                any_taken: true,
            });
            Ok(())
        }
        Move::DoneTaking => match stage_of(state)?.clone() {
            Stage::TakeResources { any_taken: true, .. } => {
                turn::finish_multi_step(state);
                Ok(())
            }
            Stage::TakeResources { any_taken: false, .. } => Err(MoveRejected::NothingDoneYet),
            other => Err(MoveRejected::WrongStage(other.name())),
        },
        Move::BuildTrackAction { .. }
        | Move::TakeResourcesAction { .. }
        | Move::AuctionShare { .. }
        | Move::IssueBond { .. }
        | Move::Merge { .. }
        | Move::PayDividends => take_action(state, player, mv),
    }
}

/// A TakeAction-stage move: place the held cube, then start the action.
fn take_action(state: &mut GameState, player: PlayerId, mv: &Move) -> Result<(), MoveRejected> {
    let Stage::TakeAction { vacated } = *stage_of(state)? else {
        return Err(MoveRejected::WrongStage(stage_of(state)?.name()));
    };
    let kind = mv
        .action_kind()
        .ok_or_else(|| MoveRejected::UnknownMove(mv.name().to_string()))?;
    state.action_cubes.place(kind, vacated)?;

    match *mv {
        Move::BuildTrackAction { company } => {
            require_shareholder(state, player, company)?;
            if !has_build_target(state, company) {
                return Err(MoveRejected::NoLegalTarget(company));
            }
            state.push_log(LogEvent::BuildStarted { player, company });
            let builds_remaining = state.rules.builds_per_action;
            turn::start_multi_step(
                state,
                Stage::BuildingTrack {
                    company,
                    builds_remaining,
                    any_built: false,
                },
            );
        }
        Move::TakeResourcesAction { company } => {
            require_shareholder(state, player, company)?;
            if take_resource_spaces(state, company).is_empty() {
                return Err(MoveRejected::NoLegalTarget(company));
            }
            state.push_log(LogEvent::TakeResourcesStarted { player, company });
            turn::start_multi_step(
                state,
                Stage::TakeResources {
                    company,
                    mine_location: None,
                    any_taken: false,
                },
            );
        }
        Move::AuctionShare { company } => {
            check_auctionable(state, player, company)?;
            state.push_log(LogEvent::AuctionStarted { player, company });
            turn::start_share_auction(state, player, company);
        }
        Move::IssueBond { company, bond } => {
            let bond = issue_bond(state, player, company, bond)?;
            state.push_log(LogEvent::BondIssued { player, company, bond });
            turn::end_turn(state);
        }
        Move::Merge { major, minor } => {
            merge(state, player, major, minor)?;
            state.push_log(LogEvent::Merged { player, major, minor });
            turn::end_turn(state);
        }
        Move::PayDividends => {
            state.push_log(LogEvent::DividendsPaid { player });
            pay_dividends(state);
            check_after_dividends(state);
            turn::end_turn(state);
        }
        _ => return Err(MoveRejected::UnknownMove(mv.name().to_string())),
    }
    Ok(())
}

fn legal_moves_for(state: &GameState, player: PlayerId) -> Vec<Move> {
    let mut moves = Vec::new();

    match &state.turn.phase {
        Phase::InitialAuction(a) | Phase::Auction(a) => {
            let amount = minimum_bid(state, a.company).max(a.current_bid + 1);
            if amount <= state.players[player].cash {
                moves.push(Move::Bid { amount });
            }
            let must_bid = matches!(state.turn.phase, Phase::Auction(_)) && a.current_bid == 0 && a.initiator == player;
            if !must_bid {
                moves.push(Move::Pass);
            }
        }
        Phase::NormalPlay(Stage::RemoveCube) => {
            moves.extend(
                state
                    .action_cubes
                    .removable()
                    .filter(|&action| has_follow_up(state, player, action))
                    .map(|action| Move::RemoveCube { action }),
            );
            if stalemate_available(state) {
                moves.push(Move::DeclareStalemate);
            }
        }
        Phase::NormalPlay(Stage::TakeAction { vacated }) => {
            for kind in state.action_cubes.placeable().filter(|k| k != vacated) {
                take_action_moves(state, player, kind, &mut moves);
            }
        }
        Phase::NormalPlay(Stage::BuildingTrack {
            company,
            builds_remaining,
            any_built,
        }) => {
            if *builds_remaining > 0 {
                for mode in [BuildMode::Normal, BuildMode::Narrow] {
                    moves.extend(
                        allowed_build_spaces(state, mode, *company)
                            .into_iter()
                            .map(|s| Move::BuildTrack { at: s.at, mode }),
                    );
                }
            }
            if *any_built {
                moves.push(Move::DoneBuilding);
            }
        }
        Phase::NormalPlay(Stage::TakeResources { company, any_taken, .. }) => {
            moves.extend(
                take_resource_spaces(state, *company)
                    .into_iter()
                    .map(|at| Move::TakeResource { at }),
            );
            if *any_taken {
                moves.push(Move::DoneTaking);
            }
        }
    }

    moves
}

fn take_action_moves(state: &GameState, player: PlayerId, kind: ActionKind, moves: &mut Vec<Move>) {
    match kind {
        ActionKind::BuildTrack => moves.extend(
            state
                .companies_held_by(player)
                .filter(|&c| has_build_target(state, c))
                .map(|company| Move::BuildTrackAction { company }),
        ),
        ActionKind::TakeResources => moves.extend(
            state
                .companies_held_by(player)
                .filter(|&c| !take_resource_spaces(state, c).is_empty())
                .map(|company| Move::TakeResourcesAction { company }),
        ),
        ActionKind::AuctionShare => moves.extend(
            auctionable_companies(state, player)
                .into_iter()
                .map(|company| Move::AuctionShare { company }),
        ),
        ActionKind::IssueBond => {
            for company in bond_companies(state, player) {
                moves.extend((0..state.bonds.len()).map(|bond| Move::IssueBond { company, bond }));
            }
        }
        ActionKind::Merge => moves.extend(
            mergeable_companies(state, player)
                .into_iter()
                .map(|m| Move::Merge {
                    major: m.major,
                    minor: m.minor,
                }),
        ),
        ActionKind::PayDividend => moves.push(Move::PayDividends),
    }
}
