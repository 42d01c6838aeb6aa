//! Tournament phase transitions: NONE -> SIGNUP -> ACTIVE -> CONCLUDED.
//!
//! Each function runs inside the caller's transaction and mutates the
//! configuration record it was handed; the caller saves it before commit.

use crate::logic::advance::{advance, NextRoundResult};
use crate::logic::{bracket, league, rankings};
use crate::models::{
    LeagueConfig, LeagueError, PlayerId, Tournament, TournamentId, TournamentMatch,
    TournamentMatchId, TournamentPhase,
};
use crate::store::{brackets, players, signups, tournaments};
use chrono::Utc;
use rand::Rng;
use rusqlite::Connection;
use serde::Serialize;

/// What `start_next_round` did.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RoundOutcome {
    /// Latest round still has an undecided match; nothing changed.
    NotReady,
    NextRound {
        round: u32,
        matches: Vec<TournamentMatch>,
    },
    Champion {
        tournament: Tournament,
    },
}

fn require_phase(
    config: &LeagueConfig,
    allowed: &[TournamentPhase],
    action: &'static str,
) -> Result<(), LeagueError> {
    if allowed.contains(&config.phase) {
        Ok(())
    } else {
        Err(LeagueError::InvalidTransition {
            action,
            phase: config.phase,
        })
    }
}

fn current_tournament(
    config: &LeagueConfig,
    action: &'static str,
) -> Result<TournamentId, LeagueError> {
    config
        .current_tournament_id
        .ok_or(LeagueError::InvalidTransition {
            action,
            phase: config.phase,
        })
}

/// Open signups for a new tournament (from NONE or CONCLUDED). Clears the
/// previous signups and bracket; past tournament records are kept.
pub fn start_signup(
    conn: &Connection,
    config: &mut LeagueConfig,
) -> Result<Tournament, LeagueError> {
    require_phase(
        config,
        &[TournamentPhase::None, TournamentPhase::Concluded],
        "start signup",
    )?;

    let cleared_signups = signups::delete_all(conn)?;
    let cleared_matches = brackets::delete_all(conn)?;
    let tournament = tournaments::insert(conn, Utc::now())?;

    config.current_tournament_id = Some(tournament.id);
    config.phase = TournamentPhase::Signup;
    log::info!(
        "Signup open for tournament {} (cleared {} signups, {} bracket slots)",
        tournament.id,
        cleared_signups,
        cleared_matches
    );
    Ok(tournament)
}

/// Register a player. Returns false, without error, when already signed up.
pub fn signup(
    conn: &Connection,
    config: &LeagueConfig,
    player_id: PlayerId,
) -> Result<bool, LeagueError> {
    if config.phase != TournamentPhase::Signup {
        return Err(LeagueError::SignupClosed);
    }
    let tournament_id = current_tournament(config, "sign up")?;
    let player = players::get(conn, player_id)?;

    let added = signups::insert(conn, tournament_id, player.id)?;
    if added {
        log::info!("{} signed up for tournament {}", player.name, tournament_id);
    } else {
        log::debug!("{} already signed up for tournament {}", player.name, tournament_id);
    }
    Ok(added)
}

/// Close signups and persist round one (SIGNUP -> ACTIVE).
pub fn start_tournament<R: Rng + ?Sized>(
    conn: &Connection,
    config: &mut LeagueConfig,
    rng: &mut R,
) -> Result<Vec<TournamentMatch>, LeagueError> {
    require_phase(config, &[TournamentPhase::Signup], "start the tournament")?;
    let tournament_id = current_tournament(config, "start the tournament")?;

    let entrants: Vec<PlayerId> = signups::list_for(conn, tournament_id)?
        .into_iter()
        .map(|s| s.player_id)
        .collect();
    let slots = bracket::generate(&entrants, rng)?;
    let matches = brackets::insert_all(conn, tournament_id, &slots)?;

    config.phase = TournamentPhase::Active;
    log::info!(
        "Tournament {} started with {} players ({} round-1 slots)",
        tournament_id,
        entrants.len(),
        matches.len()
    );
    Ok(matches)
}

/// Record the result of a real bracket match. Also rated like a league
/// game. Rounds are not advanced here.
pub fn record_match_result(
    conn: &Connection,
    config: &LeagueConfig,
    match_id: TournamentMatchId,
    winner_id: PlayerId,
    score: &str,
) -> Result<TournamentMatch, LeagueError> {
    require_phase(config, &[TournamentPhase::Active], "record a tournament match")?;
    let tournament_id = current_tournament(config, "record a tournament match")?;

    let slot = brackets::find_by_id(conn, match_id)?
        .filter(|m| m.tournament_id == tournament_id)
        .ok_or(LeagueError::TournamentMatchNotFound(match_id))?;
    let Some(player_2) = slot.player_2 else {
        return Err(LeagueError::ByeMatchCannotBeLogged);
    };
    if slot.is_decided() {
        return Err(LeagueError::MatchAlreadyDecided);
    }
    let loser_id = if winner_id == slot.player_1 {
        player_2
    } else if winner_id == player_2 {
        slot.player_1
    } else {
        return Err(LeagueError::InvalidWinner);
    };

    let played_at = Utc::now();
    brackets::record_result(conn, match_id, winner_id, score, played_at)?;
    league::record_rated_result(conn, winner_id, loser_id, score, played_at, Some(match_id))?;
    log::info!(
        "Tournament {} round {} match {}: {} beat {} ({})",
        tournament_id,
        slot.round,
        slot.match_num,
        winner_id,
        loser_id,
        score
    );

    Ok(TournamentMatch {
        winner: Some(winner_id),
        score: Some(score.to_string()),
        played_at: Some(played_at),
        ..slot
    })
}

/// Generate the next round, or conclude when one winner is left. A round
/// with an undecided match is a no-op.
pub fn start_next_round(
    conn: &Connection,
    config: &mut LeagueConfig,
) -> Result<RoundOutcome, LeagueError> {
    require_phase(config, &[TournamentPhase::Active], "start the next round")?;
    let tournament_id = current_tournament(config, "start the next round")?;

    let round = brackets::latest_round(conn, tournament_id)?.ok_or(LeagueError::EmptyRound)?;
    let current = brackets::list_round(conn, tournament_id, round)?;

    match advance(&current)? {
        NextRoundResult::NotReady => {
            log::debug!("Tournament {} round {} not complete", tournament_id, round);
            Ok(RoundOutcome::NotReady)
        }
        NextRoundResult::NextRound(slots) => {
            let matches = brackets::insert_all(conn, tournament_id, &slots)?;
            log::info!(
                "Tournament {} round {} generated ({} slots)",
                tournament_id,
                round + 1,
                matches.len()
            );
            Ok(RoundOutcome::NextRound {
                round: round + 1,
                matches,
            })
        }
        NextRoundResult::Champion(champion) => {
            let bracket = brackets::list_for(conn, tournament_id)?;
            let tournament = Tournament {
                ended_at: Some(Utc::now()),
                champion_id: Some(champion),
                final_rankings: Some(rankings::final_rankings(&bracket, champion)),
                ..tournaments::get(conn, tournament_id)?
            };
            tournaments::update_outcome(conn, &tournament)?;

            config.phase = TournamentPhase::Concluded;
            log::info!(
                "Tournament {} concluded after {} rounds, champion {}",
                tournament_id,
                round,
                champion
            );
            Ok(RoundOutcome::Champion { tournament })
        }
    }
}

/// Abandon whatever is running and return to NONE without a champion.
pub fn end_tournament(
    conn: &Connection,
    config: &mut LeagueConfig,
) -> Result<Option<Tournament>, LeagueError> {
    let abandoned = match config.current_tournament_id {
        Some(id) => {
            let mut tournament = tournaments::get(conn, id)?;
            if tournament.ended_at.is_none() {
                tournament.ended_at = Some(Utc::now());
                tournaments::update_outcome(conn, &tournament)?;
            }
            Some(tournament)
        }
        None => None,
    };

    log::info!(
        "Tournament {:?} ended by admin from phase {}",
        config.current_tournament_id,
        config.phase
    );
    config.phase = TournamentPhase::None;
    config.current_tournament_id = None;
    Ok(abandoned)
}
