//! Elo rating update for a decided game.
//!
//! K-factor 32, results rounded half away from zero. The loser's expected
//! score is one minus the winner's, so the loser's change is the winner's
//! rounded change negated; a game never creates or destroys rating points.

pub const K_FACTOR: f64 = 32.0;

/// Expected score of a player rated `rating` against `opponent`.
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    1.0 / (1.0 + 10_f64.powf((f64::from(opponent) - f64::from(rating)) / 400.0))
}

/// Post-match ratings as `(winner, loser)`.
pub fn rate(winner_rating: i32, loser_rating: i32) -> (i32, i32) {
    let expected_winner = expected_score(winner_rating, loser_rating);
    let delta = (K_FACTOR * (1.0 - expected_winner)).round() as i32;
    (
        winner_rating.saturating_add(delta),
        loser_rating.saturating_sub(delta),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_ratings_split_sixteen_points() {
        assert_eq!(rate(1200, 1200), (1216, 1184));
    }

    #[test]
    fn expected_score_favours_higher_rating() {
        assert!((expected_score(1500, 1500) - 0.5).abs() < 1e-9);
        let favoured = expected_score(1700, 1500);
        assert!(favoured > 0.7 && favoured < 0.8);
    }

    #[test]
    fn upset_moves_more_points_than_expected_win() {
        let (upset_winner, _) = rate(1000, 1400);
        let (expected_winner, _) = rate(1400, 1000);
        assert!(upset_winner - 1000 > expected_winner - 1400);
    }

    #[test]
    fn winner_never_loses_rating() {
        for gap in (-1200..=1200).step_by(50) {
            let (w, l) = rate(1200 + gap, 1200);
            assert!(w >= 1200 + gap, "gap {gap}");
            assert!(l <= 1200, "gap {gap}");
        }
    }

    #[test]
    fn overwhelming_favourite_gains_nothing() {
        assert_eq!(rate(3000, 1000), (3000, 1000));
    }

    #[test]
    fn zero_sum_for_all_gaps() {
        for winner in (800..=2400).step_by(37) {
            for loser in (800..=2400).step_by(41) {
                let (w, l) = rate(winner, loser);
                assert_eq!((w - winner) + (l - loser), 0, "{winner} vs {loser}");
            }
        }
    }

    #[test]
    fn extreme_ratings_do_not_overflow() {
        assert_eq!(rate(i32::MIN, i32::MAX), (i32::MIN + 32, i32::MAX - 32));
        assert_eq!(rate(i32::MAX, i32::MIN), (i32::MAX, i32::MIN));
    }

    #[test]
    fn gain_shrinks_as_winner_is_more_favoured() {
        let mut previous = i32::MAX;
        for gap in (-800..=800).step_by(100) {
            let (w, _) = rate(1500 + gap, 1500);
            let gain = w - (1500 + gap);
            assert!(gain <= previous);
            previous = gain;
        }
    }
}
