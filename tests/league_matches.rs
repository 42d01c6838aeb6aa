//! Integration tests for the roster, rated league matches and their reversal.

use pong_league::{League, LeagueError, Player, INITIAL_RATING};

fn league_with_players(names: &[&str]) -> (League, Vec<Player>) {
    let league = League::in_memory().unwrap();
    let players = names.iter().map(|n| league.add_player(n).unwrap()).collect();
    (league, players)
}

fn standing(league: &League, player: &Player) -> (i32, u32, u32) {
    let p = league.player(player.id).unwrap();
    (p.rating, p.wins, p.losses)
}

#[test]
fn new_players_start_at_initial_rating() {
    let (league, players) = league_with_players(&["Ada", "  Grace  "]);
    assert_eq!(players[1].name, "Grace");
    for p in &players {
        assert_eq!(standing(&league, p), (INITIAL_RATING, 0, 0));
    }
}

#[test]
fn blank_player_name_is_rejected() {
    let league = League::in_memory().unwrap();
    assert!(matches!(
        league.add_player("   "),
        Err(LeagueError::InvalidInput(_))
    ));
}

#[test]
fn logging_a_match_rates_both_players_and_snapshots() {
    let (league, players) = league_with_players(&["Ada", "Grace"]);
    let m = league.log_match(players[0].id, players[1].id, "11-6").unwrap();

    assert_eq!((m.winner_pre_rating, m.winner_post_rating), (1200, 1216));
    assert_eq!((m.loser_pre_rating, m.loser_post_rating), (1200, 1184));
    assert_eq!(standing(&league, &players[0]), (1216, 1, 0));
    assert_eq!(standing(&league, &players[1]), (1184, 0, 1));
}

#[test]
fn invalid_match_input_is_rejected() {
    let (league, players) = league_with_players(&["Ada"]);
    assert!(matches!(
        league.log_match(players[0].id, players[0].id, "11-0"),
        Err(LeagueError::InvalidInput(_))
    ));
    assert_eq!(
        league.log_match(players[0].id, 77, "11-0"),
        Err(LeagueError::PlayerNotFound(77))
    );
    assert_eq!(standing(&league, &players[0]), (1200, 0, 0));
}

#[test]
fn reversing_matches_in_reverse_order_restores_everything() {
    let (league, players) = league_with_players(&["Ada", "Grace", "Linus", "Ken"]);
    let before: Vec<_> = players.iter().map(|p| standing(&league, p)).collect();

    let results = [(0, 1), (2, 3), (1, 2), (0, 3), (3, 0), (2, 0), (1, 3), (0, 1)];
    let logged: Vec<_> = results
        .iter()
        .map(|&(w, l)| league.log_match(players[w].id, players[l].id, "3-2").unwrap())
        .collect();

    let total: i32 = players.iter().map(|p| standing(&league, p).0).sum();
    assert_eq!(total, 4 * INITIAL_RATING);

    for m in logged.iter().rev() {
        league.remove_match(m.id).unwrap();
    }
    let after: Vec<_> = players.iter().map(|p| standing(&league, p)).collect();
    assert_eq!(after, before);
    assert!(league.view().unwrap().recent_matches.is_empty());
}

#[test]
fn reversal_uses_stored_delta_not_current_ratings() {
    let (league, players) = league_with_players(&["Ada", "Grace", "Linus"]);
    let first = league.log_match(players[0].id, players[1].id, "11-3").unwrap();
    league.log_match(players[2].id, players[0].id, "11-9").unwrap();

    let ada_now = standing(&league, &players[0]).0;
    league.remove_match(first.id).unwrap();
    assert_eq!(standing(&league, &players[0]).0, ada_now - first.winner_delta());
    assert_eq!(standing(&league, &players[1]), (1200, 0, 0));
}

#[test]
fn removing_unknown_match_is_not_found() {
    let league = League::in_memory().unwrap();
    assert_eq!(league.remove_match(5), Err(LeagueError::MatchNotFound(5)));
}

#[test]
fn removing_a_player_drops_their_matches_only() {
    let (league, players) = league_with_players(&["Ada", "Grace", "Linus"]);
    league.log_match(players[0].id, players[1].id, "11-4").unwrap();
    league.log_match(players[1].id, players[2].id, "11-4").unwrap();
    let grace_before = standing(&league, &players[1]);

    league.remove_player(players[0].id).unwrap();
    assert_eq!(
        league.player(players[0].id),
        Err(LeagueError::PlayerNotFound(players[0].id))
    );
    assert_eq!(standing(&league, &players[1]), grace_before);

    let view = league.view().unwrap();
    assert_eq!(view.recent_matches.len(), 1);
    assert_eq!(view.recent_matches[0].winner_name.as_deref(), Some("Grace"));
    assert_eq!(
        league.remove_player(players[0].id),
        Err(LeagueError::PlayerNotFound(players[0].id))
    );
}

#[test]
fn view_splits_active_and_inactive_and_orders_by_rating() {
    let (league, players) = league_with_players(&["Ada", "Grace", "Linus"]);
    league.log_match(players[1].id, players[0].id, "11-2").unwrap();

    let view = league.view().unwrap();
    let active: Vec<&str> = view.active_players.iter().map(|p| p.name.as_str()).collect();
    let inactive: Vec<&str> = view.inactive_players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(active, vec!["Grace", "Ada"]);
    assert_eq!(inactive, vec!["Linus"]);
}

#[test]
fn view_shows_five_most_recent_matches_newest_first() {
    let (league, players) = league_with_players(&["Ada", "Grace"]);
    let ids: Vec<_> = (0..7)
        .map(|i| {
            league
                .log_match(players[i % 2].id, players[(i + 1) % 2].id, &format!("game {i}"))
                .unwrap()
                .id
        })
        .collect();

    let view = league.view().unwrap();
    let shown: Vec<_> = view.recent_matches.iter().map(|m| m.record.id).collect();
    let expected: Vec<_> = ids.iter().rev().take(5).copied().collect();
    assert_eq!(shown, expected);
}

#[test]
fn admin_note_persists() {
    let league = League::in_memory().unwrap();
    league.set_note("Finals on Friday").unwrap();
    assert_eq!(league.config().unwrap().note, "Finals on Friday");
    assert_eq!(league.view().unwrap().note, "Finals on Friday");
}

#[test]
fn standings_csv_follows_leaderboard() {
    let (league, players) = league_with_players(&["Ada", "Grace"]);
    league.log_match(players[1].id, players[0].id, "11-2").unwrap();
    let csv = league.standings_csv().unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "rank,name,rating,wins,losses",
            "1,Grace,1216,1,0",
            "2,Ada,1184,0,1"
        ]
    );
}
