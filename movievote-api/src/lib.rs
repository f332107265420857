pub mod routes;
pub mod session;

use axum::routing::{get, post};
use axum::Router;
use movievote_app::AppContext;
use routes::{auth, board, movies};
use time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

const SESSION_IDLE_DAYS: i64 = 7;

pub fn build_router(ctx: AppContext, cookie_secure: bool) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_IDLE_DAYS)));

    Router::new()
        .route("/", get(board::home).post(board::submit))
        .route("/vote", get(board::vote_redirect).post(board::vote))
        .route("/movies", get(movies::index).post(movies::create))
        .route("/movies/{id}", get(movies::show))
        .route("/movies/{id}/delete", post(movies::delete))
        .route("/auth/login", get(auth::login))
        .route("/auth/callback", get(auth::callback))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .layer(session_layer)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
