//! Standings web server: JSON API over the fixture snapshot.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! The snapshot is read from FIXTURE_PATH (csv or json) and re-read every RELOAD_SECS.

use actix_web::{
    get, post,
    web::{Data, Json, Query},
    App, HttpResponse, HttpServer, Responder,
};
use fixture_standings::{
    available_categories, available_competitions, compute_standings, filter_season,
    import::rows_into_matches, parse_matches, FixtureFormat, ImportError, Match, RawFixtureRow,
    Selection, StandingsFilter,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Last successfully loaded fixture snapshot.
struct FixtureSnapshot {
    matches: Vec<Match>,
    loaded_at: Option<Instant>,
}

/// Shared snapshot plus where it comes from.
struct AppContext {
    snapshot: RwLock<FixtureSnapshot>,
    source: PathBuf,
}

type AppState = Data<AppContext>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
    matches: usize,
    snapshot_age_secs: Option<u64>,
}

#[derive(serde::Serialize)]
struct FiltersResponse {
    tournaments: Vec<String>,
    categories: Vec<String>,
}

#[derive(Deserialize)]
struct StandingsQuery {
    tournament: Option<String>,
    category: Option<String>,
    season: Option<i32>,
}

#[derive(Deserialize)]
struct FiltersQuery {
    tournament: Option<String>,
}

#[derive(Deserialize)]
struct ComputeStandingsBody {
    matches: Vec<RawFixtureRow>,
    #[serde(default)]
    tournament: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

fn error_json(message: impl std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "error": message.to_string() })
}

/// Read and parse the snapshot file without touching shared state.
async fn read_snapshot(path: &Path) -> Result<Vec<Match>, ImportError> {
    let format = FixtureFormat::from_path(path)?;
    let text = tokio::fs::read_to_string(path).await?;
    parse_matches(&text, format)
}

/// Replace the shared snapshot with a fresh read. On failure the previous snapshot stays.
async fn reload(ctx: &AppContext) -> Result<usize, ImportError> {
    let matches = read_snapshot(&ctx.source).await?;
    let count = matches.len();
    let mut g = ctx
        .snapshot
        .write()
        .map_err(|_| ImportError::Io(std::io::Error::other("snapshot lock poisoned")))?;
    g.matches = matches;
    g.loaded_at = Some(Instant::now());
    Ok(count)
}

#[get("/api/health")]
async fn api_health(state: AppState) -> impl Responder {
    let (matches, snapshot_age_secs) = match state.snapshot.read() {
        Ok(g) => (g.matches.len(), g.loaded_at.map(|t| t.elapsed().as_secs())),
        Err(_) => (0, None),
    };
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "fixture-standings",
        matches,
        snapshot_age_secs,
    })
}

/// Standings from the current snapshot (optionally one season, tournament, category).
#[get("/api/standings")]
async fn api_standings(state: AppState, query: Query<StandingsQuery>) -> HttpResponse {
    let g = match state.snapshot.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let filter = StandingsFilter::new(query.tournament.as_deref(), query.category.as_deref());
    let groups = match query.season {
        Some(season) => compute_standings(&filter_season(g.matches.clone(), season), &filter),
        None => compute_standings(&g.matches, &filter),
    };
    HttpResponse::Ok().json(groups)
}

/// Standings from a snapshot supplied in the request body.
#[post("/api/standings")]
async fn api_compute_standings(body: Json<ComputeStandingsBody>) -> HttpResponse {
    let body = body.into_inner();
    let filter = StandingsFilter::new(body.tournament.as_deref(), body.category.as_deref());
    let matches = rows_into_matches(body.matches);
    HttpResponse::Ok().json(compute_standings(&matches, &filter))
}

/// Options for the tournament and category selectors.
#[get("/api/filters")]
async fn api_filters(state: AppState, query: Query<FiltersQuery>) -> HttpResponse {
    let g = match state.snapshot.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let tournament = Selection::from(query.tournament.as_deref());
    HttpResponse::Ok().json(FiltersResponse {
        tournaments: available_competitions(&g.matches),
        categories: available_categories(&g.matches, &tournament),
    })
}

/// Re-read the snapshot file now.
#[post("/api/fixture/reload")]
async fn api_reload(state: AppState) -> HttpResponse {
    match reload(&state).await {
        Ok(count) => HttpResponse::Ok().json(serde_json::json!({ "matches": count })),
        Err(e) => {
            log::warn!("Fixture reload failed: {}", e);
            HttpResponse::BadRequest().json(error_json(e))
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_fixture_path() -> PathBuf {
    PathBuf::from("data/fixture.csv")
}

fn default_reload_secs() -> u64 {
    300
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let source = std::env::var("FIXTURE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_fixture_path());
    let reload_secs: u64 = std::env::var("RELOAD_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&s| s > 0)
        .unwrap_or_else(default_reload_secs);

    let state = Data::new(AppContext {
        snapshot: RwLock::new(FixtureSnapshot {
            matches: Vec::new(),
            loaded_at: None,
        }),
        source,
    });

    match reload(&state).await {
        Ok(count) => log::info!("Loaded {} matches from {}", count, state.source.display()),
        Err(e) => log::warn!("Starting without fixture ({}): {}", state.source.display(), e),
    }

    // Background task: re-read the snapshot so standings follow provider updates
    let state_reload = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(reload_secs));
        interval.tick().await;
        loop {
            interval.tick().await;
            match reload(&state_reload).await {
                Ok(count) => log::debug!("Reloaded {} matches", count),
                Err(e) => log::warn!("Fixture reload failed, keeping previous snapshot: {}", e),
            }
        }
    });

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_standings)
            .service(api_compute_standings)
            .service(api_filters)
            .service(api_reload)
    })
    .bind(bind)?
    .run()
    .await
}
