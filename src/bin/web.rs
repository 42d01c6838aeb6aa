//! JSON API over the league. Presentation lives elsewhere and only renders
//! what `/api/league` returns.
//! Run with: cargo run --bin web
//! Env: HOST, PORT, DATABASE_PATH, ADMIN_PASSWORD (see `Settings`).

use actix_web::{
    get,
    http::StatusCode,
    post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use anyhow::Context;
use pong_league::store::create_pool;
use pong_league::{League, LeagueError, MatchId, PlayerId, Settings, TournamentMatchId};
use serde::{Deserialize, Serialize};

struct AppState {
    league: League,
    settings: Settings,
}

type State = Data<AppState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Body of admin-only requests with no other fields.
#[derive(Deserialize)]
struct AdminBody {
    admin_password: Option<String>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct LogMatchBody {
    winner_id: PlayerId,
    loser_id: PlayerId,
    #[serde(default)]
    score: String,
}

#[derive(Deserialize)]
struct NoteBody {
    admin_password: Option<String>,
    note: String,
}

#[derive(Deserialize)]
struct SignupBody {
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct RecordResultBody {
    admin_password: Option<String>,
    winner_id: PlayerId,
    #[serde(default)]
    score: String,
}

#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentMatchId,
}

fn status_for(e: &LeagueError) -> StatusCode {
    match e {
        _ if e.is_not_found() => StatusCode::NOT_FOUND,
        LeagueError::Unauthorized => StatusCode::UNAUTHORIZED,
        LeagueError::InvalidTransition { .. }
        | LeagueError::SignupClosed
        | LeagueError::MatchAlreadyDecided => StatusCode::CONFLICT,
        LeagueError::Storage(_) | LeagueError::ConfigMissing | LeagueError::Export(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::BAD_REQUEST,
    }
}

fn error_response(e: &LeagueError) -> HttpResponse {
    let status = status_for(e);
    if status.is_server_error() {
        log::error!("{}", e);
    }
    HttpResponse::build(status).json(serde_json::json!({ "error": e.to_string() }))
}

fn respond<T: Serialize>(result: Result<T, LeagueError>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pong-league",
    })
}

/// Leaderboard, recent matches, phase, note and the current bracket.
#[get("/api/league")]
async fn api_league(state: State) -> HttpResponse {
    respond(state.league.view())
}

#[get("/api/standings.csv")]
async fn api_standings_csv(state: State) -> HttpResponse {
    match state.league.standings_csv() {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments")]
async fn api_tournament_history(state: State) -> HttpResponse {
    respond(state.league.tournament_history())
}

#[post("/api/players")]
async fn api_add_player(state: State, body: Json<AddPlayerBody>) -> HttpResponse {
    respond(state.league.add_player(&body.name))
}

/// Remove a player and every league match they played (admin).
#[post("/api/players/{id}/remove")]
async fn api_remove_player(
    state: State,
    path: Path<PlayerPath>,
    body: Json<AdminBody>,
) -> HttpResponse {
    if let Err(e) = state.settings.authorize(body.admin_password.as_deref()) {
        return error_response(&e);
    }
    respond(state.league.remove_player(path.id))
}

#[post("/api/matches")]
async fn api_log_match(state: State, body: Json<LogMatchBody>) -> HttpResponse {
    respond(state.league.log_match(body.winner_id, body.loser_id, &body.score))
}

/// Remove a league match and revert its ratings (admin).
#[post("/api/matches/{id}/remove")]
async fn api_remove_match(
    state: State,
    path: Path<MatchPath>,
    body: Json<AdminBody>,
) -> HttpResponse {
    if let Err(e) = state.settings.authorize(body.admin_password.as_deref()) {
        return error_response(&e);
    }
    respond(state.league.remove_match(path.id))
}

#[post("/api/admin/check")]
async fn api_check_admin(state: State, body: Json<AdminBody>) -> HttpResponse {
    match state.settings.authorize(body.admin_password.as_deref()) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(_) => HttpResponse::Unauthorized()
            .json(serde_json::json!({ "success": false, "message": "Incorrect Password" })),
    }
}

#[put("/api/note")]
async fn api_set_note(state: State, body: Json<NoteBody>) -> HttpResponse {
    if let Err(e) = state.settings.authorize(body.admin_password.as_deref()) {
        return error_response(&e);
    }
    respond(state.league.set_note(&body.note))
}

/// Open signups for a new tournament (admin).
#[post("/api/tournament/signup-phase")]
async fn api_start_signup(state: State, body: Json<AdminBody>) -> HttpResponse {
    if let Err(e) = state.settings.authorize(body.admin_password.as_deref()) {
        return error_response(&e);
    }
    respond(state.league.start_signup())
}

#[post("/api/tournament/signups")]
async fn api_signup(state: State, body: Json<SignupBody>) -> HttpResponse {
    respond(
        state
            .league
            .signup(body.player_id)
            .map(|added| serde_json::json!({ "added": added })),
    )
}

/// Draw round one and start the tournament (admin).
#[post("/api/tournament/start")]
async fn api_start_tournament(state: State, body: Json<AdminBody>) -> HttpResponse {
    if let Err(e) = state.settings.authorize(body.admin_password.as_deref()) {
        return error_response(&e);
    }
    respond(state.league.start_tournament(&mut rand::thread_rng()))
}

/// Record a bracket match result (admin).
#[put("/api/tournament/matches/{id}")]
async fn api_record_result(
    state: State,
    path: Path<TournamentMatchPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    if let Err(e) = state.settings.authorize(body.admin_password.as_deref()) {
        return error_response(&e);
    }
    respond(
        state
            .league
            .record_match_result(path.id, body.winner_id, &body.score),
    )
}

/// Advance to the next round or crown the champion (admin).
#[post("/api/tournament/next-round")]
async fn api_next_round(state: State, body: Json<AdminBody>) -> HttpResponse {
    if let Err(e) = state.settings.authorize(body.admin_password.as_deref()) {
        return error_response(&e);
    }
    respond(state.league.start_next_round())
}

/// Abandon the tournament without a champion (admin).
#[post("/api/tournament/end")]
async fn api_end_tournament(state: State, body: Json<AdminBody>) -> HttpResponse {
    if let Err(e) = state.settings.authorize(body.admin_password.as_deref()) {
        return error_response(&e);
    }
    respond(state.league.end_tournament())
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_league)
        .service(api_standings_csv)
        .service(api_tournament_history)
        .service(api_add_player)
        .service(api_remove_player)
        .service(api_log_match)
        .service(api_remove_match)
        .service(api_check_admin)
        .service(api_set_note)
        .service(api_start_signup)
        .service(api_signup)
        .service(api_start_tournament)
        .service(api_record_result)
        .service(api_next_round)
        .service(api_end_tournament);
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::from_env();
    let pool = create_pool(&settings.database_path)
        .with_context(|| format!("Failed to open database at {}", settings.database_path))?;
    let league = League::open(pool).context("Failed to initialise league store")?;

    let bind = (settings.host.clone(), settings.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(AppState { league, settings });
    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind(bind)?
        .run()
        .await?;
    Ok(())
}
