//! Roster and league-match operations, and the view handed to presentation.

use crate::logic::elo;
use crate::models::{
    LeagueConfig, LeagueError, LeagueMatch, MatchId, Player, PlayerId, Tournament,
    TournamentMatch, TournamentMatchId, TournamentPhase,
};
use crate::store::{brackets, matches, players, signups, tournaments};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

/// How many league matches the front page shows.
pub const RECENT_MATCH_LIMIT: usize = 5;

pub fn add_player(conn: &Connection, name: &str) -> Result<Player, LeagueError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LeagueError::InvalidInput("player name is empty".to_string()));
    }
    let player = players::insert(conn, name)?;
    log::info!("Added player {} ({})", player.name, player.id);
    Ok(player)
}

/// Delete a player with their league matches and signups. Opponents keep
/// the rating they gained or lost against the player.
pub fn remove_player(
    conn: &Connection,
    config: &LeagueConfig,
    player_id: PlayerId,
) -> Result<Player, LeagueError> {
    let player = players::get(conn, player_id)?;

    if config.phase == TournamentPhase::Active {
        if let Some(tournament_id) = config.current_tournament_id {
            let in_bracket = brackets::list_for(conn, tournament_id)?
                .iter()
                .any(|m| m.involves(player_id));
            if in_bracket {
                return Err(LeagueError::InvalidTransition {
                    action: "remove a player from the running bracket",
                    phase: config.phase,
                });
            }
        }
    }

    let removed_matches = matches::delete_involving(conn, player_id)?;
    signups::delete_for_player(conn, player_id)?;
    tournaments::clear_champion(conn, player_id)?;
    players::delete(conn, player_id)?;
    log::info!(
        "Removed player {} ({}) and {} league matches",
        player.name,
        player.id,
        removed_matches
    );
    Ok(player)
}

/// Rate a decided game, update both players and store the match with its
/// rating snapshots. `slot` links the record to the bracket match it decided.
pub fn record_rated_result(
    conn: &Connection,
    winner_id: PlayerId,
    loser_id: PlayerId,
    score: &str,
    played_at: DateTime<Utc>,
    slot: Option<TournamentMatchId>,
) -> Result<LeagueMatch, LeagueError> {
    if winner_id == loser_id {
        return Err(LeagueError::InvalidInput(
            "winner and loser must be different players".to_string(),
        ));
    }
    let mut winner = players::get(conn, winner_id)?;
    let mut loser = players::get(conn, loser_id)?;

    let (winner_pre_rating, loser_pre_rating) = (winner.rating, loser.rating);
    let (winner_post_rating, loser_post_rating) = elo::rate(winner_pre_rating, loser_pre_rating);
    winner.record_win(winner_post_rating);
    loser.record_loss(loser_post_rating);
    players::update_standing(conn, &winner)?;
    players::update_standing(conn, &loser)?;

    let record = matches::insert(
        conn,
        &LeagueMatch {
            id: 0,
            winner_id,
            loser_id,
            score: score.to_string(),
            played_at,
            winner_pre_rating,
            loser_pre_rating,
            winner_post_rating,
            loser_post_rating,
            tournament_match_id: slot,
        },
    )?;
    log::debug!(
        "{} {} -> {}, {} {} -> {}",
        winner.name,
        winner_pre_rating,
        winner_post_rating,
        loser.name,
        loser_pre_rating,
        loser_post_rating
    );
    Ok(record)
}

pub fn log_match(
    conn: &Connection,
    winner_id: PlayerId,
    loser_id: PlayerId,
    score: &str,
) -> Result<LeagueMatch, LeagueError> {
    let record = record_rated_result(conn, winner_id, loser_id, score, Utc::now(), None)?;
    log::info!(
        "Logged match {}: {} beat {} ({})",
        record.id,
        winner_id,
        loser_id,
        record.score
    );
    Ok(record)
}

/// Delete a league match and take back exactly the rating it moved.
/// A match that decided a slot of the current tournament's bracket stays
/// until that tournament is replaced or ended.
pub fn remove_match(
    conn: &Connection,
    config: &LeagueConfig,
    match_id: MatchId,
) -> Result<LeagueMatch, LeagueError> {
    let record = matches::get(conn, match_id)?;

    if let Some(slot_id) = record.tournament_match_id {
        let decides_current = brackets::find_by_id(conn, slot_id)?
            .is_some_and(|slot| Some(slot.tournament_id) == config.current_tournament_id);
        if decides_current {
            return Err(LeagueError::InvalidTransition {
                action: "remove a match recorded in the current bracket",
                phase: config.phase,
            });
        }
    }

    // A removed player takes their matches along, so both sides normally
    // exist; revert whichever side is still on the roster.
    if let Some(mut winner) = players::find_by_id(conn, record.winner_id)? {
        winner.revert_win(record.winner_delta());
        players::update_standing(conn, &winner)?;
    }
    if let Some(mut loser) = players::find_by_id(conn, record.loser_id)? {
        loser.revert_loss(record.loser_delta());
        players::update_standing(conn, &loser)?;
    }

    matches::delete(conn, match_id)?;
    log::info!("Removed match {} and reverted its ratings", match_id);
    Ok(record)
}

pub fn set_note(config: &mut LeagueConfig, note: &str) {
    config.note = note.to_string();
    log::info!("Admin note updated ({} chars)", config.note.chars().count());
}

/// A league match with player names resolved.
#[derive(Clone, Debug, Serialize)]
pub struct MatchSummary {
    #[serde(flatten)]
    pub record: LeagueMatch,
    pub winner_name: Option<String>,
    pub loser_name: Option<String>,
}

/// A bracket slot with player names resolved. Names are None for players
/// removed after the bracket was drawn.
#[derive(Clone, Debug, Serialize)]
pub struct BracketSlotView {
    #[serde(flatten)]
    pub slot: TournamentMatch,
    pub player_1_name: Option<String>,
    pub player_2_name: Option<String>,
    pub winner_name: Option<String>,
}

/// Everything the front page renders, already computed.
#[derive(Clone, Debug, Serialize)]
pub struct LeagueView {
    pub active_players: Vec<Player>,
    pub inactive_players: Vec<Player>,
    pub recent_matches: Vec<MatchSummary>,
    pub note: String,
    pub phase: TournamentPhase,
    pub current_tournament: Option<Tournament>,
    pub signups: Vec<Player>,
    pub bracket: Vec<BracketSlotView>,
    pub past_tournaments: Vec<Tournament>,
}

pub fn view(conn: &Connection, config: &LeagueConfig) -> Result<LeagueView, LeagueError> {
    let roster = players::list_by_rating(conn)?;
    let names: HashMap<PlayerId, String> =
        roster.iter().map(|p| (p.id, p.name.clone())).collect();
    let name_of = |id: Option<PlayerId>| id.and_then(|id| names.get(&id).cloned());

    let recent_matches = matches::list_recent(conn, RECENT_MATCH_LIMIT)?
        .into_iter()
        .map(|record| MatchSummary {
            winner_name: name_of(Some(record.winner_id)),
            loser_name: name_of(Some(record.loser_id)),
            record,
        })
        .collect();

    let (current_tournament, signups, bracket) = match config.current_tournament_id {
        Some(id) => {
            let tournament = tournaments::find_by_id(conn, id)?;
            let signed_up: Vec<PlayerId> = signups::list_for(conn, id)?
                .into_iter()
                .map(|s| s.player_id)
                .collect();
            let signups = signed_up
                .iter()
                .filter_map(|pid| roster.iter().find(|p| p.id == *pid).cloned())
                .collect();
            let bracket = brackets::list_for(conn, id)?
                .into_iter()
                .map(|slot| BracketSlotView {
                    player_1_name: name_of(Some(slot.player_1)),
                    player_2_name: name_of(slot.player_2),
                    winner_name: name_of(slot.winner),
                    slot,
                })
                .collect();
            (tournament, signups, bracket)
        }
        None => (None, Vec::new(), Vec::new()),
    };

    let past_tournaments = tournaments::list_all(conn)?
        .into_iter()
        .filter(|t| Some(t.id) != config.current_tournament_id)
        .collect();

    let (active_players, inactive_players): (Vec<Player>, Vec<Player>) =
        roster.into_iter().partition(Player::is_active);

    Ok(LeagueView {
        active_players,
        inactive_players,
        recent_matches,
        note: config.note.clone(),
        phase: config.phase,
        current_tournament,
        signups,
        bracket,
        past_tournaments,
    })
}
