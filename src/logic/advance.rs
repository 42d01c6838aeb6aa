//! Round progression: decide whether a round is complete and what follows it.

use crate::models::{
    LeagueError, MatchSlot, PlayerId, TournamentMatch, DEFAULT_BEST_OF, FINAL_BEST_OF,
};

/// Outcome of inspecting the latest round.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NextRoundResult {
    /// A real match in the round has no winner yet. Nothing may change.
    NotReady,
    /// One winner left: the tournament is over.
    Champion(PlayerId),
    /// Slots for the following round, in match-number order.
    NextRound(Vec<MatchSlot>),
}

/// A round is ready when every non-bye match has a winner.
pub fn is_round_ready(matches: &[TournamentMatch]) -> bool {
    matches.iter().all(|m| m.is_bye() || m.is_decided())
}

/// Winners of a ready round in match-number order. Byes count for their
/// only player.
pub fn round_winners(matches: &[TournamentMatch]) -> Vec<PlayerId> {
    let mut ordered: Vec<&TournamentMatch> = matches.iter().collect();
    ordered.sort_by_key(|m| m.match_num);
    ordered
        .into_iter()
        .filter_map(|m| m.winner.or_else(|| m.is_bye().then_some(m.player_1)))
        .collect()
}

/// Pair `winners` consecutively into round `next_round`; an odd last winner
/// gets a bye slot after the pairings.
///
/// The round plays best-of-5 when it holds exactly one paired match. Only
/// paired matches are counted, so a round of one match plus a bye also
/// escalates even though a further round follows it.
pub fn pair_winners(next_round: u32, winners: &[PlayerId]) -> Vec<MatchSlot> {
    let pairs = winners.chunks_exact(2);
    let leftover = pairs.remainder().first().copied();
    let best_of = if next_round > 1 && pairs.len() == 1 {
        FINAL_BEST_OF
    } else {
        DEFAULT_BEST_OF
    };

    let mut slots: Vec<MatchSlot> = pairs
        .enumerate()
        .map(|(i, pair)| MatchSlot::pairing(next_round, i as u32 + 1, pair[0], pair[1], best_of))
        .collect();
    if let Some(player) = leftover {
        slots.push(MatchSlot::bye(next_round, slots.len() as u32 + 1, player));
    }
    slots
}

/// Inspect the latest round of a bracket.
pub fn advance(matches: &[TournamentMatch]) -> Result<NextRoundResult, LeagueError> {
    let round = matches
        .iter()
        .map(|m| m.round)
        .max()
        .ok_or(LeagueError::EmptyRound)?;

    if !is_round_ready(matches) {
        return Ok(NextRoundResult::NotReady);
    }

    let winners = round_winners(matches);
    match winners.as_slice() {
        [] => Err(LeagueError::EmptyRound),
        [champion] => Ok(NextRoundResult::Champion(*champion)),
        _ => Ok(NextRoundResult::NextRound(pair_winners(round + 1, &winners))),
    }
}
