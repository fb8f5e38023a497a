// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use action_board_api::{
    ApiError, AuthenticationService, RankingScope, SignUpRequest, SubmitAchievementRequest,
    UpdateBoardStatusRequest, board_history, board_status_counts, calculate_all_badges,
    cancel_achievement, delete_account, get_ranking, get_unnotified_badges, get_user_badges,
    get_user_level_view, get_user_xp_history, mark_badges_notified, record_posting, sign_up,
    submit_achievement, update_board_status,
};
use action_board_domain::{BadgeCutoffs, validate_return_url};
use action_board_persistence::Persistence;

mod line;
mod session;

use line::{HttpLineExchanger, LineConfig, LineIdentity, LineTokenExchanger, StateStore};
use session::SessionUser;

/// Action Board Server - HTTP server for the Action Board backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over --database.
    #[arg(long)]
    mysql_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, plus the LINE login adapter.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// The LINE token exchanger.
    line: Arc<dyn LineTokenExchanger>,
    /// The registered LINE redirect URI.
    line_redirect_uri: String,
    /// Issued CSRF states awaiting their callback.
    states: Arc<StateStore>,
}

/// HTTP wrapper for API errors.
struct HttpError(ApiError);

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status: StatusCode = match &self.0 {
            ApiError::AuthenticationFailed { .. } | ApiError::Unauthorized { .. } => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DomainRuleViolation { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// API response for sign-up.
#[derive(Debug, Serialize)]
struct SignUpApiResponse {
    user_id: i64,
    message: String,
}

/// API request for logging in.
#[derive(Debug, Deserialize)]
struct LogInApiRequest {
    email: String,
    password: String,
}

/// API response for logging in (and for the LINE callback).
#[derive(Debug, Serialize)]
struct SessionApiResponse {
    token: String,
    user_id: i64,
    name: String,
    /// Validated post-auth redirect target, when one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_to: Option<String>,
}

/// API response for starting a LINE login.
#[derive(Debug, Serialize)]
struct LineStartResponse {
    authorize_url: String,
    state: String,
}

/// Query parameters for the LINE callback.
#[derive(Debug, Deserialize)]
struct LineCallbackQuery {
    code: String,
    state: String,
    /// Optional post-auth redirect target (same-origin paths only).
    return_to: Option<String>,
    /// Birth date required when the callback creates a new account.
    date_of_birth: Option<String>,
}

/// API request for recording a posting event.
#[derive(Debug, Deserialize)]
struct PostingApiRequest {
    posted_count: i32,
    latitude: Option<f64>,
    longitude: Option<f64>,
    note: Option<String>,
}

/// API response for recording a posting event.
#[derive(Debug, Serialize)]
struct PostingApiResponse {
    event_id: i64,
}

/// API request for marking badges notified.
#[derive(Debug, Deserialize)]
struct MarkBadgesRequest {
    badge_ids: Vec<i64>,
}

async fn sign_up_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<Json<SignUpApiResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let user_id: i64 = sign_up(&mut persistence, &request, time::OffsetDateTime::now_utc())?;
    Ok(Json(SignUpApiResponse {
        user_id,
        message: String::from("登録が完了しました。"),
    }))
}

async fn log_in_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<LogInApiRequest>,
) -> Result<Json<SessionApiResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let (user, token) = AuthenticationService::log_in(
        &mut persistence,
        &request.email,
        &request.password,
        time::OffsetDateTime::now_utc(),
    )?;
    Ok(Json(SessionApiResponse {
        token,
        user_id: user.user_id,
        name: user.name,
        redirect_to: None,
    }))
}

async fn log_out_handler(
    AxumState(state): AxumState<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<StatusCode, HttpError> {
    let token: &str = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized {
            action: String::from("log_out"),
        })?;
    let mut persistence = state.persistence.lock().await;
    AuthenticationService::log_out(&mut persistence, token)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_account_handler(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
) -> Result<StatusCode, HttpError> {
    let mut persistence = state.persistence.lock().await;
    delete_account(&mut persistence, &user, time::OffsetDateTime::now_utc())?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_missions_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let missions = persistence.list_visible_missions().map_err(|e| {
        error!(error = %e, "Mission listing failed");
        ApiError::Internal {
            message: String::from("list_missions failed"),
        }
    })?;
    Ok(Json(serde_json::json!({ "missions": missions })))
}

async fn submit_achievement_handler(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(mission_slug): Path<String>,
    Json(mut request): Json<SubmitAchievementRequest>,
) -> Result<Json<action_board_api::SubmitAchievementResponse>, HttpError> {
    request.mission_slug = mission_slug;
    let mut persistence = state.persistence.lock().await;
    let response = submit_achievement(
        &mut persistence,
        &user,
        &request,
        time::OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

async fn cancel_achievement_handler(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(achievement_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = state.persistence.lock().await;
    cancel_achievement(&mut persistence, &user, achievement_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn overall_ranking_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<action_board_api::RankingResponse>, HttpError> {
    ranking_response(&state, RankingScope::Overall).await
}

async fn daily_ranking_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<action_board_api::RankingResponse>, HttpError> {
    ranking_response(&state, RankingScope::Daily).await
}

async fn prefecture_ranking_handler(
    AxumState(state): AxumState<AppState>,
    Path(prefecture): Path<String>,
) -> Result<Json<action_board_api::RankingResponse>, HttpError> {
    ranking_response(&state, RankingScope::Prefecture(prefecture)).await
}

async fn mission_ranking_handler(
    AxumState(state): AxumState<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<action_board_api::RankingResponse>, HttpError> {
    ranking_response(&state, RankingScope::Mission(slug)).await
}

async fn ranking_response(
    state: &AppState,
    scope: RankingScope,
) -> Result<Json<action_board_api::RankingResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = get_ranking(&mut persistence, &scope, chrono::Utc::now())?;
    Ok(Json(response))
}

async fn user_badges_handler(
    AxumState(state): AxumState<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let badges = get_user_badges(&mut persistence, user_id)?;
    Ok(Json(serde_json::json!({ "badges": badges })))
}

async fn unnotified_badges_handler(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<serde_json::Value>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let badges = get_unnotified_badges(&mut persistence, user.user_id)?;
    Ok(Json(serde_json::json!({ "badges": badges })))
}

async fn mark_badges_handler(
    AxumState(state): AxumState<AppState>,
    SessionUser(_user): SessionUser,
    Json(request): Json<MarkBadgesRequest>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = state.persistence.lock().await;
    mark_badges_notified(&mut persistence, &request.badge_ids, chrono::Utc::now())?;
    Ok(StatusCode::NO_CONTENT)
}

async fn user_level_handler(
    AxumState(state): AxumState<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<action_board_api::LevelView>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let view = get_user_level_view(&mut persistence, user_id)?;
    Ok(Json(view))
}

async fn xp_history_handler(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<serde_json::Value>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let history = get_user_xp_history(&mut persistence, user.user_id, 50)?;
    Ok(Json(serde_json::json!({ "transactions": history })))
}

async fn update_board_status_handler(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(board_id): Path<i64>,
    Json(request): Json<UpdateBoardStatusRequest>,
) -> Result<Json<action_board_api::UpdateBoardStatusResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = update_board_status(
        &mut persistence,
        &user,
        board_id,
        &request,
        time::OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

async fn board_history_handler(
    AxumState(state): AxumState<AppState>,
    Path(board_id): Path<i64>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let history = board_history(&mut persistence, board_id)?;
    Ok(Json(serde_json::json!({ "history": history })))
}

async fn board_stats_handler(
    AxumState(state): AxumState<AppState>,
    Path(prefecture): Path<String>,
) -> Result<Json<action_board_api::BoardStatusCountsResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let stats = board_status_counts(&mut persistence, &prefecture)?;
    Ok(Json(stats))
}

async fn record_posting_handler(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(request): Json<PostingApiRequest>,
) -> Result<Json<PostingApiResponse>, HttpError> {
    let coordinates: Option<(f64, f64)> = match (request.latitude, request.longitude) {
        (Some(lat), Some(long)) => Some((lat, long)),
        _ => None,
    };
    let mut persistence = state.persistence.lock().await;
    let event_id: i64 = record_posting(
        &mut persistence,
        &user,
        request.posted_count,
        coordinates,
        request.note.as_deref(),
        time::OffsetDateTime::now_utc(),
    )?;
    Ok(Json(PostingApiResponse { event_id }))
}

async fn recompute_badges_handler(
    AxumState(state): AxumState<AppState>,
    SessionUser(_user): SessionUser,
) -> Result<Json<action_board_api::BadgeCalculationSummary>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let summary = calculate_all_badges(
        &mut persistence,
        BadgeCutoffs::default(),
        None,
        chrono::Utc::now(),
    )?;
    Ok(Json(summary))
}

async fn line_start_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<LineStartResponse>, HttpError> {
    let mut bytes: [u8; 16] = [0; 16];
    rand::rng().fill_bytes(&mut bytes);
    let csrf_state: String = hex::encode(bytes);
    state.states.issue(&csrf_state);

    let authorize_url: String = format!(
        "https://access.line.me/oauth2/v2.1/authorize?response_type=code&scope=profile%20openid%20email&state={csrf_state}&redirect_uri={}",
        state.line_redirect_uri
    );
    Ok(Json(LineStartResponse {
        authorize_url,
        state: csrf_state,
    }))
}

async fn line_callback_handler(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<LineCallbackQuery>,
) -> Result<Json<SessionApiResponse>, HttpError> {
    // Reject forged callbacks before touching the provider.
    if !state.states.consume(&query.state) {
        warn!("LINE callback with unknown state");
        return Err(ApiError::AuthenticationFailed {
            reason: String::from("不正なログインリクエストです"),
        }
        .into());
    }

    // Open-redirect guard: only same-origin relative paths survive.
    let redirect_to: Option<String> = query
        .return_to
        .as_deref()
        .and_then(validate_return_url);

    let exchanger = Arc::clone(&state.line);
    let redirect_uri: String = state.line_redirect_uri.clone();
    let code: String = query.code.clone();
    let identity: LineIdentity =
        tokio::task::spawn_blocking(move || exchanger.exchange_code(&code, &redirect_uri))
            .await
            .map_err(|e| {
                error!(error = %e, "LINE exchange task failed");
                ApiError::Internal {
                    message: String::from("line_login failed"),
                }
            })?
            .map_err(|e| {
                error!(error = %e, "LINE code exchange failed");
                ApiError::AuthenticationFailed {
                    reason: String::from("LINEログインに失敗しました"),
                }
            })?;

    let email: String = identity
        .email
        .clone()
        .unwrap_or_else(|| format!("line-{}@line.local", identity.subject));

    let mut persistence = state.persistence.lock().await;
    let now = time::OffsetDateTime::now_utc();

    let existing = persistence.get_user_by_email(&email).map_err(|e| {
        error!(error = %e, "LINE user lookup failed");
        ApiError::Internal {
            message: String::from("line_login failed"),
        }
    })?;

    if existing.is_none() {
        // New accounts still pass through the regular sign-up path so
        // the age gate and referral handling apply.
        let Some(date_of_birth) = query.date_of_birth.clone() else {
            return Err(ApiError::InvalidInput {
                field: String::from("date_of_birth"),
                message: String::from(
                    "新規ユーザー登録には生年月日が必要です。サインアップページから登録してください。",
                ),
            }
            .into());
        };

        let mut password_bytes: [u8; 32] = [0; 32];
        rand::rng().fill_bytes(&mut password_bytes);
        let temp_password: String = format!("l1-{}", hex::encode(password_bytes));

        sign_up(
            &mut persistence,
            &SignUpRequest {
                email: email.clone(),
                password: temp_password,
                name: identity
                    .name
                    .clone()
                    .unwrap_or_else(|| String::from("LINEユーザー")),
                date_of_birth,
                address_prefecture: None,
                referral_code: None,
            },
            now,
        )?;
    }

    // Session issuance bypasses the password check: the provider
    // already authenticated this user.
    let user = persistence
        .get_user_by_email(&email)
        .map_err(|e| {
            error!(error = %e, "LINE user lookup failed");
            ApiError::Internal {
                message: String::from("line_login failed"),
            }
        })?
        .ok_or_else(|| ApiError::Internal {
            message: String::from("line_login failed"),
        })?;

    let mut token_bytes: [u8; 32] = [0; 32];
    rand::rng().fill_bytes(&mut token_bytes);
    let token: String = hex::encode(token_bytes);
    let now_str: String = now
        .format(&time::format_description::well_known::Rfc3339)
        .map_err(|e| {
            error!(error = %e, "Timestamp formatting failed");
            ApiError::Internal {
                message: String::from("line_login failed"),
            }
        })?;
    let expires_at: String = (now
        + time::Duration::hours(action_board_api::SESSION_TTL_HOURS))
    .format(&time::format_description::well_known::Rfc3339)
    .map_err(|e| {
        error!(error = %e, "Timestamp formatting failed");
        ApiError::Internal {
            message: String::from("line_login failed"),
        }
    })?;
    persistence
        .create_session(&action_board_persistence::NewSession {
            session_token: token.clone(),
            user_id: user.user_id,
            created_at: now_str.clone(),
            last_activity_at: now_str,
            expires_at,
        })
        .map_err(|e| {
            error!(error = %e, "Session creation failed");
            ApiError::Internal {
                message: String::from("line_login failed"),
            }
        })?;

    Ok(Json(SessionApiResponse {
        token,
        user_id: user.user_id,
        name: user.name,
        redirect_to,
    }))
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/sign-up", post(sign_up_handler))
        .route("/api/log-in", post(log_in_handler))
        .route("/api/log-out", post(log_out_handler))
        .route("/api/account", delete(delete_account_handler))
        .route("/api/auth/line/login", post(line_start_handler))
        .route("/api/auth/line/callback", get(line_callback_handler))
        .route("/api/missions", get(list_missions_handler))
        .route(
            "/api/missions/{slug}/achievements",
            post(submit_achievement_handler),
        )
        .route(
            "/api/achievements/{id}",
            delete(cancel_achievement_handler),
        )
        .route("/api/rankings/overall", get(overall_ranking_handler))
        .route("/api/rankings/daily", get(daily_ranking_handler))
        .route(
            "/api/rankings/prefecture/{prefecture}",
            get(prefecture_ranking_handler),
        )
        .route("/api/rankings/mission/{slug}", get(mission_ranking_handler))
        .route("/api/users/{id}/badges", get(user_badges_handler))
        .route("/api/users/{id}/level", get(user_level_handler))
        .route("/api/me/xp-history", get(xp_history_handler))
        .route("/api/badges/unnotified", get(unnotified_badges_handler))
        .route("/api/badges/mark-notified", post(mark_badges_handler))
        .route("/api/badges/recompute", post(recompute_badges_handler))
        .route(
            "/api/boards/{id}/status",
            post(update_board_status_handler),
        )
        .route("/api/boards/{id}/history", get(board_history_handler))
        .route("/api/boards/stats/{prefecture}", get(board_stats_handler))
        .route("/api/postings", post(record_posting_handler))
        .with_state(state)
}

/// LINE exchanger used when the channel is not configured.
struct DisabledLineExchanger;

impl LineTokenExchanger for DisabledLineExchanger {
    fn exchange_code(&self, _code: &str, _redirect_uri: &str) -> Result<LineIdentity, String> {
        Err(String::from("LINE login is not configured"))
    }
}

fn build_line_exchanger() -> (Arc<dyn LineTokenExchanger>, String) {
    let channel_id = std::env::var("LINE_CHANNEL_ID").ok();
    let channel_secret = std::env::var("LINE_CHANNEL_SECRET").ok();
    let redirect_uri = std::env::var("LINE_REDIRECT_URI").ok();

    match (channel_id, channel_secret, redirect_uri) {
        (Some(channel_id), Some(channel_secret), Some(redirect_uri)) => {
            info!("LINE login enabled");
            (
                Arc::new(HttpLineExchanger::new(LineConfig {
                    channel_id,
                    channel_secret,
                    redirect_uri: redirect_uri.clone(),
                })),
                redirect_uri,
            )
        }
        _ => {
            warn!("LINE login disabled: LINE_CHANNEL_ID/SECRET/REDIRECT_URI not set");
            (Arc::new(DisabledLineExchanger), String::new())
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Args = Args::parse();

    let persistence: Persistence = match (&args.mysql_url, &args.database) {
        (Some(url), _) => match Persistence::new_with_mysql(url) {
            Ok(p) => p,
            Err(e) => {
                error!(error = %e, "Failed to open MySQL database");
                std::process::exit(1);
            }
        },
        (None, Some(path)) => match Persistence::new_with_file(path) {
            Ok(p) => p,
            Err(e) => {
                error!(error = %e, path, "Failed to open database file");
                std::process::exit(1);
            }
        },
        (None, None) => {
            warn!("No database path provided; using in-memory database");
            match Persistence::new_in_memory() {
                Ok(p) => p,
                Err(e) => {
                    error!(error = %e, "Failed to create in-memory database");
                    std::process::exit(1);
                }
            }
        }
    };

    let mut persistence = persistence;
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(now) => match persistence.delete_expired_sessions(&now) {
            Ok(removed) if removed > 0 => info!(removed, "Removed expired sessions"),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Expired session sweep failed"),
        },
        Err(e) => warn!(error = %e, "Timestamp formatting failed"),
    }

    let (line_exchanger, line_redirect_uri) = build_line_exchanger();

    let state = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        line: line_exchanger,
        line_redirect_uri,
        states: Arc::new(StateStore::default()),
    };

    let router: Router = build_router(state);

    let addr: std::net::SocketAddr = std::net::SocketAddr::from(([0, 0, 0, 0], args.port));
    info!(%addr, "Starting Action Board server");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, "Failed to bind listener");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
