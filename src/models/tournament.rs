//! Tournament, signups, bracket slots and the tournament phase.

use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row id of a tournament.
pub type TournamentId = i64;

/// Row id of a bracket slot.
pub type TournamentMatchId = i64;

/// Score text stored on an automatic advancement.
pub const BYE_SCORE: &str = "BYE";

/// Games per match outside the final.
pub const DEFAULT_BEST_OF: u32 = 3;

/// Games per match in the final.
pub const FINAL_BEST_OF: u32 = 5;

/// Phase of the league's tournament cycle.
///
/// Stored as `NONE=0, SIGNUP=1, ACTIVE=2, CONCLUDED=3`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    /// No tournament running; the league is idle.
    #[default]
    None,
    /// Players may sign up for the current tournament.
    Signup,
    /// Bracket generated; results are being recorded round by round.
    Active,
    /// A champion was decided.
    Concluded,
}

impl TournamentPhase {
    pub fn code(self) -> i64 {
        match self {
            TournamentPhase::None => 0,
            TournamentPhase::Signup => 1,
            TournamentPhase::Active => 2,
            TournamentPhase::Concluded => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(TournamentPhase::None),
            1 => Some(TournamentPhase::Signup),
            2 => Some(TournamentPhase::Active),
            3 => Some(TournamentPhase::Concluded),
            _ => None,
        }
    }
}

impl std::fmt::Display for TournamentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TournamentPhase::None => "none",
            TournamentPhase::Signup => "signup",
            TournamentPhase::Active => "active",
            TournamentPhase::Concluded => "concluded",
        };
        f.write_str(name)
    }
}

/// One bracket run. `ended_at` and `champion_id` are set on conclusion.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub champion_id: Option<PlayerId>,
    pub final_rankings: Option<Vec<RankingEntry>>,
}

/// Final placing of one bracket player.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub place: u32,
    pub player_id: PlayerId,
}

/// A player's registration for the current tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSignup {
    pub tournament_id: TournamentId,
    pub player_id: PlayerId,
}

/// A bracket slot before it is persisted. `player_2 == None` is a bye and
/// then carries `winner == Some(player_1)` and the `BYE` score.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchSlot {
    pub round: u32,
    pub match_num: u32,
    pub player_1: PlayerId,
    pub player_2: Option<PlayerId>,
    pub winner: Option<PlayerId>,
    pub score: Option<String>,
    pub best_of: u32,
}

impl MatchSlot {
    /// Automatic advancement, created already decided.
    pub fn bye(round: u32, match_num: u32, player: PlayerId) -> Self {
        Self {
            round,
            match_num,
            player_1: player,
            player_2: None,
            winner: Some(player),
            score: Some(BYE_SCORE.to_string()),
            best_of: DEFAULT_BEST_OF,
        }
    }

    /// A real match waiting for a result.
    pub fn pairing(
        round: u32,
        match_num: u32,
        player_1: PlayerId,
        player_2: PlayerId,
        best_of: u32,
    ) -> Self {
        Self {
            round,
            match_num,
            player_1,
            player_2: Some(player_2),
            winner: None,
            score: None,
            best_of,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.player_2.is_none()
    }
}

/// A persisted bracket slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentMatch {
    pub id: TournamentMatchId,
    pub tournament_id: TournamentId,
    pub round: u32,
    pub match_num: u32,
    pub player_1: PlayerId,
    /// None if this slot is a bye.
    pub player_2: Option<PlayerId>,
    /// None until decided.
    pub winner: Option<PlayerId>,
    pub score: Option<String>,
    pub best_of: u32,
    pub played_at: Option<DateTime<Utc>>,
}

impl TournamentMatch {
    pub fn is_bye(&self) -> bool {
        self.player_2.is_none()
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.player_1 == player_id || self.player_2 == Some(player_id)
    }

    /// The other side of a decided, non-bye match.
    pub fn loser(&self) -> Option<PlayerId> {
        let winner = self.winner?;
        let player_2 = self.player_2?;
        if winner == self.player_1 {
            Some(player_2)
        } else {
            Some(self.player_1)
        }
    }
}
