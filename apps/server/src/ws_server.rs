//! HTTP + WebSocket surface for the dashboard.
//!
//! REST endpoints serve point-in-time snapshots (matches, opportunities,
//! the manual calculator); the `/ws` channel pushes opportunity and stats
//! refreshes after every poll cycle.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

use surebet_core::{Match, Outcome};
use surebet_engine::{find_opportunities, plan_stakes, MatchAnalysis, ProfitSummary, StakePlan};

use crate::state::{SharedState, StatsSnapshot};

/// Best available odds for one outcome, with the bookmaker offering it.
#[derive(Debug, Clone, Serialize)]
pub struct WsBestPrice {
    pub outcome: &'static str,
    pub odds: f64,
    pub bookmaker: String,
}

/// One arbitrage opportunity, flattened for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct WsOpportunityData {
    pub match_id: String,
    pub sport_key: String,
    pub sport_title: String,
    pub commence_time: String,
    pub home_team: String,
    pub away_team: String,
    pub best_odds: Vec<WsBestPrice>,
    /// Stake per outcome in home/draw/away order.
    pub stakes: Vec<f64>,
    pub total_investment: f64,
    pub profit: f64,
    pub roi_pct: f64,
    pub margin: f64,
}

impl WsOpportunityData {
    fn from_analysis(analysis: &MatchAnalysis) -> Self {
        let event = &analysis.event;
        let best = &analysis.best_odds;
        let best_odds = Outcome::ALL
            .iter()
            .map(|&outcome| WsBestPrice {
                outcome: outcome.label(),
                odds: best.odds(outcome).value(),
                bookmaker: best.bookmaker(outcome).to_string(),
            })
            .collect();

        Self {
            match_id: event.id.to_string(),
            sport_key: event.sport_key.to_string(),
            sport_title: event.sport_title.to_string(),
            commence_time: event.commence_time.to_string(),
            home_team: event.home_team.to_string(),
            away_team: event.away_team.to_string(),
            best_odds,
            stakes: analysis.result.stakes.clone(),
            total_investment: analysis.result.total_investment,
            profit: analysis.result.profit,
            roi_pct: analysis.result.roi_pct(),
            margin: analysis.result.margin,
        }
    }
}

/// Stats data for WebSocket broadcast.
#[derive(Debug, Clone, Serialize)]
pub struct WsStatsData {
    pub uptime_secs: u64,
    pub polls_completed: u64,
    pub matches_tracked: u64,
    pub opportunities_found: u64,
    pub board_updated_at_ms: u64,
    pub is_running: bool,
}

/// WebSocket message types.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum WsServerMessage {
    /// Full opportunity snapshot after a poll cycle (and on initial sync).
    #[serde(rename = "opportunities")]
    Opportunities(Vec<WsOpportunityData>),
    #[serde(rename = "summary")]
    Summary(ProfitSummary),
    #[serde(rename = "stats")]
    Stats(WsStatsData),
}

/// Broadcast channel sender.
pub type BroadcastSender = broadcast::Sender<WsServerMessage>;

/// Router state shared across handlers.
pub struct WsServerState {
    pub app_state: SharedState,
    pub broadcast_tx: BroadcastSender,
}

/// Create the dashboard router.
pub fn create_router(state: Arc<WsServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/ws", get(ws_handler))
        .route("/api/matches", get(matches_handler))
        .route("/api/opportunities", get(opportunities_handler))
        .route("/api/calculator", post(calculator_handler))
        .layer(cors)
        .with_state(state)
}

/// Health check handler.
async fn health_handler() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn unprocessable(error: impl ToString) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorBody {
            error: error.to_string(),
        }),
    )
}

#[derive(Debug, Serialize)]
struct MatchesResponse {
    updated_at_ms: u64,
    matches: Vec<Match>,
}

/// Raw board snapshot, quotes included.
async fn matches_handler(State(state): State<Arc<WsServerState>>) -> Json<MatchesResponse> {
    let board = &state.app_state.board;
    Json(MatchesResponse {
        updated_at_ms: board.updated_at_ms(),
        matches: board.all(),
    })
}

#[derive(Debug, Deserialize)]
struct OpportunityQuery {
    investment: Option<f64>,
}

#[derive(Debug, Serialize)]
struct OpportunitiesResponse {
    investment: f64,
    opportunities: Vec<WsOpportunityData>,
    summary: ProfitSummary,
}

/// Opportunities over the current board. An explicit `?investment=` query
/// re-runs the analysis at that stake instead of serving the cached one.
async fn opportunities_handler(
    State(state): State<Arc<WsServerState>>,
    Query(query): Query<OpportunityQuery>,
) -> Result<Json<OpportunitiesResponse>, (StatusCode, Json<ErrorBody>)> {
    let app = &state.app_state;
    let investment = match query.investment {
        Some(investment) => investment,
        None => app.default_investment().await,
    };

    let matches = app.board.all();
    let analyses = find_opportunities(&matches, investment).map_err(unprocessable)?;
    let summary = ProfitSummary::from_analyses(&analyses);
    let opportunities = analyses.iter().map(WsOpportunityData::from_analysis).collect();

    Ok(Json(OpportunitiesResponse {
        investment,
        opportunities,
        summary,
    }))
}

#[derive(Debug, Deserialize)]
struct CalculatorRequest {
    odds: Vec<f64>,
    total_stake: f64,
}

/// Manual calculator: split a stake across arbitrary user-entered odds.
async fn calculator_handler(
    Json(request): Json<CalculatorRequest>,
) -> Result<Json<StakePlan>, (StatusCode, Json<ErrorBody>)> {
    let plan = plan_stakes(&request.odds, request.total_stake).map_err(unprocessable)?;
    Ok(Json(plan))
}

/// WebSocket upgrade handler.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<WsServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<WsServerState>) {
    let (mut sender, mut receiver) = socket.split();

    let mut broadcast_rx = state.broadcast_tx.subscribe();

    debug!("WebSocket client connected");

    // Initial sync so a freshly-opened dashboard is not empty until the
    // next poll cycle.
    let initial_opportunities = collect_opportunities(&state.app_state).await;
    let initial_summary = state.app_state.summary.read().await.clone();
    let initial_stats = collect_stats(&state.app_state);

    if let Ok(json) = serde_json::to_string(&WsServerMessage::Opportunities(initial_opportunities))
    {
        let _ = sender.send(Message::Text(json)).await;
    }
    if let Ok(json) = serde_json::to_string(&WsServerMessage::Summary(initial_summary)) {
        let _ = sender.send(Message::Text(json)).await;
    }
    if let Ok(json) = serde_json::to_string(&WsServerMessage::Stats(initial_stats)) {
        let _ = sender.send(Message::Text(json)).await;
    }

    // Forward broadcasts to this client until it disconnects.
    let send_task = tokio::spawn(async move {
        loop {
            match broadcast_rx.recv().await {
                Ok(ws_msg) => {
                    if let Ok(json) = serde_json::to_string(&ws_msg) {
                        if sender.send(Message::Text(json)).await.is_err() {
                            break;
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "slow WebSocket client lagged behind");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    break;
                }
            }
        }
    });

    // Handle incoming messages (ping/pong, close)
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Ping(data)) => {
                // Pong is handled automatically by axum
                let _ = data;
            }
            Ok(Message::Close(_)) => {
                break;
            }
            Err(e) => {
                warn!("WebSocket error: {}", e);
                break;
            }
            _ => {}
        }
    }

    send_task.abort();
    debug!("WebSocket client disconnected");
}

/// Collect cached opportunities from state.
async fn collect_opportunities(state: &SharedState) -> Vec<WsOpportunityData> {
    let opportunities = state.opportunities.read().await;
    opportunities
        .iter()
        .map(WsOpportunityData::from_analysis)
        .collect()
}

/// Collect current stats from state.
fn collect_stats(state: &SharedState) -> WsStatsData {
    let snapshot: StatsSnapshot = state.stats.snapshot();
    WsStatsData {
        uptime_secs: snapshot.uptime_secs,
        polls_completed: snapshot.polls_completed,
        matches_tracked: snapshot.matches_tracked,
        opportunities_found: snapshot.opportunities_found,
        board_updated_at_ms: state.board.updated_at_ms(),
        is_running: state.is_running(),
    }
}

/// Broadcast the current opportunity snapshot and summary.
pub async fn broadcast_opportunities(tx: &BroadcastSender, state: &SharedState) {
    let opportunities = collect_opportunities(state).await;
    let summary = state.summary.read().await.clone();
    let _ = tx.send(WsServerMessage::Opportunities(opportunities));
    let _ = tx.send(WsServerMessage::Summary(summary));
}

/// Broadcast stats update.
pub fn broadcast_stats(tx: &BroadcastSender, state: &SharedState) {
    let stats = collect_stats(state);
    let _ = tx.send(WsServerMessage::Stats(stats));
}

/// Create the router and return the broadcast sender for poll-driven updates.
pub fn create_server(state: SharedState) -> (Router, BroadcastSender) {
    let (broadcast_tx, _) = broadcast::channel::<WsServerMessage>(256);

    let ws_state = Arc::new(WsServerState {
        app_state: state,
        broadcast_tx: broadcast_tx.clone(),
    });

    let app = create_router(ws_state);
    (app, broadcast_tx)
}

/// Start the dashboard server and return the broadcast sender.
pub async fn start_server(
    state: SharedState,
    port: u16,
) -> Result<BroadcastSender, Box<dyn std::error::Error + Send + Sync>> {
    let (app, broadcast_tx) = create_server(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("dashboard server listening on http://0.0.0.0:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let tx_clone = broadcast_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("server error: {}", e);
        }
    });

    Ok(tx_clone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ws_messages_are_tagged() {
        let msg = WsServerMessage::Stats(WsStatsData {
            uptime_secs: 5,
            polls_completed: 1,
            matches_tracked: 3,
            opportunities_found: 1,
            board_updated_at_ms: 1_700_000_000_000,
            is_running: true,
        });
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.starts_with(r#"{"type":"stats","data":{"#));
    }

    #[test]
    fn error_body_shape() {
        let (status, body) = unprocessable("invalid odds 0.5");
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            serde_json::to_string(&body.0).unwrap(),
            r#"{"error":"invalid odds 0.5"}"#
        );
    }
}
