//! Final placings of a concluded bracket.

use crate::models::{PlayerId, RankingEntry, TournamentMatch};

/// Champion first, then every eliminated player by the round they lost in.
/// Players knocked out in the same round share a place and the next place
/// skips accordingly (1, 2, 3, 3, 5, ...).
pub fn final_rankings(matches: &[TournamentMatch], champion: PlayerId) -> Vec<RankingEntry> {
    let mut eliminated: Vec<(PlayerId, u32)> = matches
        .iter()
        .filter_map(|m| m.loser().map(|loser| (loser, m.round)))
        .filter(|(player, _)| *player != champion)
        .collect();
    eliminated.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut rankings = vec![RankingEntry {
        place: 1,
        player_id: champion,
    }];
    let mut previous: Option<(u32, u32)> = None;
    for (i, &(player_id, round)) in eliminated.iter().enumerate() {
        let place = match previous {
            Some((prev_round, prev_place)) if prev_round == round => prev_place,
            _ => i as u32 + 2,
        };
        previous = Some((round, place));
        rankings.push(RankingEntry { place, player_id });
    }
    rankings
}
