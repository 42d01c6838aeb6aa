//! `League`: the store-backed entry point for every operation.
//!
//! Each mutating call opens one IMMEDIATE transaction, loads the league
//! configuration, runs the operation and saves the configuration before
//! committing if the operation changed it. An error drops the transaction with nothing applied.

use crate::logic::export;
use crate::logic::league::{self, LeagueView};
use crate::logic::tournament::{self, RoundOutcome};
use crate::models::{
    LeagueConfig, LeagueError, LeagueMatch, MatchId, Player, PlayerId, Tournament,
    TournamentMatch, TournamentMatchId,
};
use crate::store::{self, DbPool};
use rand::Rng;
use rusqlite::{Connection, TransactionBehavior};

#[derive(Clone)]
pub struct League {
    pool: DbPool,
}

impl League {
    /// Wrap a pool, creating tables and the configuration record if absent.
    pub fn open(pool: DbPool) -> Result<Self, LeagueError> {
        let conn = store::get_connection(&pool)?;
        store::setup::initialize(&conn)?;
        Ok(Self { pool })
    }

    /// League on a private in-memory database.
    pub fn in_memory() -> Result<Self, LeagueError> {
        Self::open(store::create_memory_pool()?)
    }

    fn write<T>(
        &self,
        op: impl FnOnce(&Connection, &mut LeagueConfig) -> Result<T, LeagueError>,
    ) -> Result<T, LeagueError> {
        let mut conn = store::get_connection(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let loaded = store::config::load(&tx)?;
        let mut config = loaded.clone();
        let out = op(&*tx, &mut config)?;
        if config != loaded {
            store::config::save(&tx, &config)?;
        }
        tx.commit()?;
        Ok(out)
    }

    fn read<T>(
        &self,
        op: impl FnOnce(&Connection, &LeagueConfig) -> Result<T, LeagueError>,
    ) -> Result<T, LeagueError> {
        let conn = store::get_connection(&self.pool)?;
        let config = store::config::load(&conn)?;
        op(&*conn, &config)
    }

    pub fn config(&self) -> Result<LeagueConfig, LeagueError> {
        self.read(|_, config| Ok(config.clone()))
    }

    pub fn view(&self) -> Result<LeagueView, LeagueError> {
        self.read(league::view)
    }

    pub fn player(&self, id: PlayerId) -> Result<Player, LeagueError> {
        self.read(|conn, _| store::players::get(conn, id))
    }

    /// Leaderboard order.
    pub fn players(&self) -> Result<Vec<Player>, LeagueError> {
        self.read(|conn, _| store::players::list_by_rating(conn))
    }

    pub fn standings_csv(&self) -> Result<String, LeagueError> {
        export::standings_csv(&self.players()?)
    }

    /// All tournaments, newest first.
    pub fn tournament_history(&self) -> Result<Vec<Tournament>, LeagueError> {
        self.read(|conn, _| store::tournaments::list_all(conn))
    }

    /// Bracket of the current tournament ordered by round and match number.
    pub fn bracket(&self) -> Result<Vec<TournamentMatch>, LeagueError> {
        self.read(|conn, config| match config.current_tournament_id {
            Some(id) => store::brackets::list_for(conn, id),
            None => Ok(Vec::new()),
        })
    }

    pub fn add_player(&self, name: &str) -> Result<Player, LeagueError> {
        self.write(|conn, _| league::add_player(conn, name))
    }

    pub fn remove_player(&self, id: PlayerId) -> Result<Player, LeagueError> {
        self.write(|conn, config| league::remove_player(conn, config, id))
    }

    pub fn log_match(
        &self,
        winner_id: PlayerId,
        loser_id: PlayerId,
        score: &str,
    ) -> Result<LeagueMatch, LeagueError> {
        self.write(|conn, _| league::log_match(conn, winner_id, loser_id, score))
    }

    pub fn remove_match(&self, id: MatchId) -> Result<LeagueMatch, LeagueError> {
        self.write(|conn, config| league::remove_match(conn, config, id))
    }

    pub fn set_note(&self, note: &str) -> Result<LeagueConfig, LeagueError> {
        self.write(|_, config| {
            league::set_note(config, note);
            Ok(config.clone())
        })
    }

    pub fn start_signup(&self) -> Result<Tournament, LeagueError> {
        self.write(tournament::start_signup)
    }

    /// True when newly added, false when the player was already signed up.
    pub fn signup(&self, player_id: PlayerId) -> Result<bool, LeagueError> {
        self.write(|conn, config| tournament::signup(conn, config, player_id))
    }

    /// Draw round one with the given random source.
    pub fn start_tournament<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<TournamentMatch>, LeagueError> {
        self.write(|conn, config| tournament::start_tournament(conn, config, rng))
    }

    pub fn record_match_result(
        &self,
        match_id: TournamentMatchId,
        winner_id: PlayerId,
        score: &str,
    ) -> Result<TournamentMatch, LeagueError> {
        self.write(|conn, config| {
            tournament::record_match_result(conn, config, match_id, winner_id, score)
        })
    }

    pub fn start_next_round(&self) -> Result<RoundOutcome, LeagueError> {
        self.write(tournament::start_next_round)
    }

    pub fn end_tournament(&self) -> Result<Option<Tournament>, LeagueError> {
        self.write(tournament::end_tournament)
    }
}
