//! Round-one bracket generation for a single-elimination tournament.
//!
//! Seeding is random, not rating-based. After the shuffle the first
//! `bracket_size - n` players get byes (match numbers 1..=byes) and the rest
//! are paired in order. Pairing is consecutive, not by bracket-tree position.

use crate::models::{LeagueError, MatchSlot, PlayerId, DEFAULT_BEST_OF};
use rand::seq::SliceRandom;
use rand::Rng;

/// Smallest power of two holding `players` entrants; 0 for an empty field.
pub fn bracket_size(players: usize) -> usize {
    if players == 0 {
        0
    } else {
        players.next_power_of_two()
    }
}

/// Byes needed in round one so the remaining field is a power of two.
pub fn bye_count(players: usize) -> usize {
    bracket_size(players) - players
}

/// Build round one from the signed-up players.
pub fn generate<R: Rng + ?Sized>(
    players: &[PlayerId],
    rng: &mut R,
) -> Result<Vec<MatchSlot>, LeagueError> {
    if players.len() < 2 {
        return Err(LeagueError::InsufficientPlayers {
            found: players.len(),
        });
    }

    let mut seeded = players.to_vec();
    seeded.shuffle(rng);

    let byes = bye_count(seeded.len());
    let (bye_players, playing) = seeded.split_at(byes);

    let mut slots: Vec<MatchSlot> = bye_players
        .iter()
        .enumerate()
        .map(|(i, &player)| MatchSlot::bye(1, i as u32 + 1, player))
        .collect();

    let first_real = byes as u32 + 1;
    slots.extend(playing.chunks_exact(2).enumerate().map(|(i, pair)| {
        MatchSlot::pairing(1, first_real + i as u32, pair[0], pair[1], DEFAULT_BEST_OF)
    }));

    log::debug!(
        "Generated round 1: {} players, {} byes, {} matches",
        seeded.len(),
        byes,
        slots.len() - byes
    );
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn ids(n: usize) -> Vec<PlayerId> {
        (1..=n as PlayerId).collect()
    }

    #[test]
    fn bracket_size_is_next_power_of_two() {
        assert_eq!(bracket_size(0), 0);
        assert_eq!(bracket_size(1), 1);
        assert_eq!(bracket_size(2), 2);
        assert_eq!(bracket_size(3), 4);
        assert_eq!(bracket_size(5), 8);
        assert_eq!(bracket_size(8), 8);
        assert_eq!(bracket_size(9), 16);
    }

    #[test]
    fn fewer_than_two_players_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            generate(&[], &mut rng),
            Err(LeagueError::InsufficientPlayers { found: 0 })
        );
        assert_eq!(
            generate(&[7], &mut rng),
            Err(LeagueError::InsufficientPlayers { found: 1 })
        );
    }

    #[test]
    fn five_players_get_three_byes_and_one_match() {
        let mut rng = StdRng::seed_from_u64(42);
        let slots = generate(&ids(5), &mut rng).unwrap();
        assert_eq!(slots.len(), 4);

        let (byes, real): (Vec<_>, Vec<_>) = slots.iter().partition(|s| s.is_bye());
        assert_eq!(byes.len(), 3);
        assert_eq!(real.len(), 1);

        for (i, slot) in byes.iter().enumerate() {
            assert_eq!(slot.match_num, i as u32 + 1);
            assert_eq!(slot.winner, Some(slot.player_1));
            assert_eq!(slot.score.as_deref(), Some("BYE"));
        }
        assert_eq!(real[0].match_num, 4);
        assert_eq!(real[0].winner, None);
        assert_eq!(real[0].score, None);
    }

    #[test]
    fn every_player_appears_in_exactly_one_slot() {
        for n in 2..=33 {
            let mut rng = StdRng::seed_from_u64(n as u64);
            let slots = generate(&ids(n), &mut rng).unwrap();

            let mut seen = HashSet::new();
            for slot in &slots {
                assert!(seen.insert(slot.player_1));
                if let Some(p2) = slot.player_2 {
                    assert!(seen.insert(p2));
                }
                assert_eq!(slot.round, 1);
                assert_eq!(slot.best_of, 3);
            }
            assert_eq!(seen.len(), n);

            let byes = slots.iter().filter(|s| s.is_bye()).count();
            let real = slots.len() - byes;
            assert_eq!(byes + 2 * real, n);
            assert_eq!(slots.len(), bracket_size(n) / 2);

            let numbers: Vec<u32> = slots.iter().map(|s| s.match_num).collect();
            let expected: Vec<u32> = (1..=slots.len() as u32).collect();
            assert_eq!(numbers, expected);
        }
    }

    #[test]
    fn power_of_two_field_has_no_byes() {
        let mut rng = StdRng::seed_from_u64(3);
        let slots = generate(&ids(8), &mut rng).unwrap();
        assert_eq!(slots.len(), 4);
        assert!(slots.iter().all(|s| !s.is_bye()));
    }

    #[test]
    fn same_seed_gives_same_bracket() {
        let a = generate(&ids(11), &mut StdRng::seed_from_u64(9)).unwrap();
        let b = generate(&ids(11), &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }
}
