//! Surebet - Arbitrage Dashboard Server
//!
//! Polls bookmaker odds feeds, computes arbitrage stake splits, and serves
//! them to the dashboard over REST and WebSocket.

mod config;
mod demo;
mod state;
mod ws_server;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use surebet_feeds::{OddsPoller, OddsProvider, RapidLiveOdds, TheOddsApi};

use config::AppConfig;
use state::{create_state, SharedState};
use ws_server::BroadcastSender;

/// Surebet CLI
#[derive(Parser, Debug)]
#[command(name = "surebet")]
#[command(about = "Sports betting arbitrage dashboard server", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// HTTP/WebSocket server port
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Seconds between odds polls (overrides config)
    #[arg(short = 'i', long)]
    poll_interval: Option<u64>,

    /// Default investment per opportunity (overrides config)
    #[arg(long)]
    investment: Option<f64>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Use simulated fixtures instead of live feeds
    #[arg(long, default_value_t = false)]
    demo: bool,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Build the poller from whichever provider keys are configured.
async fn build_poller(state: &SharedState) -> OddsPoller {
    let mut poller = OddsPoller::new(state.board.clone());
    let config = state.config.read().await;

    if let Some(key) = &config.providers.odds_api_key {
        poller.add_provider(Arc::new(TheOddsApi::new(key.clone())) as Arc<dyn OddsProvider>);
        info!("  Provider: The Odds API (upcoming fixtures)");
    }
    if let Some(key) = &config.providers.rapid_api_key {
        poller.add_provider(Arc::new(RapidLiveOdds::new(key.clone())) as Arc<dyn OddsProvider>);
        info!("  Provider: RapidAPI live odds");
    }

    poller
}

/// Poll -> analyze -> broadcast cycle for live feeds.
async fn run_poll_loop(
    state: SharedState,
    poller: OddsPoller,
    broadcast_tx: BroadcastSender,
    interval_secs: u64,
) {
    info!("Starting odds poll loop ({}s interval)", interval_secs);

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    while state.is_running() {
        ticker.tick().await;
        if !state.is_running() {
            break;
        }

        let fetched = poller.fetch_once().await;
        let opportunities = state.refresh_analyses().await;
        state.stats.record_poll(fetched as u64, opportunities as u64);

        info!(
            "📊 Poll complete | Matches: {} | Opportunities: {}",
            fetched, opportunities
        );
        ws_server::broadcast_opportunities(&broadcast_tx, &state).await;
    }

    info!("Odds poll loop stopped");
}

/// Demo-mode counterpart of the poll loop. Same analyze/broadcast path,
/// fed by the simulator instead of HTTP.
async fn run_demo_loop(state: SharedState, broadcast_tx: BroadcastSender) {
    info!("Starting fixture simulator (demo mode)");

    let mut tick = 0u64;
    while state.is_running() {
        let matches = demo::demo_matches(tick);
        let fetched = matches.len();
        state.board.replace_all(matches);

        let opportunities = state.refresh_analyses().await;
        state.stats.record_poll(fetched as u64, opportunities as u64);
        ws_server::broadcast_opportunities(&broadcast_tx, &state).await;

        tick += 1;
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    info!("Fixture simulator stopped");
}

async fn run_stats_reporter(state: SharedState, broadcast_tx: BroadcastSender, interval_secs: u64) {
    info!("Starting stats reporter");

    let ticks = interval_secs.max(1) * 10;
    loop {
        // Check every 100ms if we should stop, but only report per interval
        for _ in 0..ticks {
            if !state.is_running() {
                info!("Stats reporter stopped");
                return;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let snapshot = state.stats.snapshot();
        info!(
            "📊 Stats | Uptime: {}s | Polls: {} | Matches: {} | Opportunities: {}",
            snapshot.uptime_secs,
            snapshot.polls_completed,
            snapshot.matches_tracked,
            snapshot.opportunities_found
        );
        ws_server::broadcast_stats(&broadcast_tx, &state);
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_logging(&args.log_level);

    info!("🚀 Surebet dashboard server starting...");
    info!("  Port: {}", args.port);
    info!("  Demo: {}", args.demo);

    let mut config = AppConfig::load(&args.config);
    config.apply_env();
    if let Some(interval) = args.poll_interval {
        config.poller.interval_secs = interval.max(1);
    }
    if let Some(investment) = args.investment {
        if investment.is_finite() && investment > 0.0 {
            config.analysis.default_investment = investment;
        } else {
            warn!(investment, "ignoring non-positive --investment override");
        }
    }
    config.log_level = args.log_level.clone();

    let demo_mode = if args.demo {
        true
    } else if !config.has_any_provider() {
        warn!("No provider API keys configured (ODDS_API_KEY / RAPID_API_KEY), falling back to demo mode");
        true
    } else {
        false
    };

    let poll_interval = config.poller.interval_secs;
    let stats_interval = config.poller.stats_interval_secs;

    // Create shared state
    let state = create_state(config);
    state.start();

    // Server must start first so loops can hand it the broadcast sender
    let broadcast_tx = match ws_server::start_server(state.clone(), args.port).await {
        Ok(tx) => tx,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            return;
        }
    };

    let feed_handle = if demo_mode {
        info!("🎮 Using SIMULATED fixtures");
        let demo_state = state.clone();
        let demo_broadcast = broadcast_tx.clone();
        tokio::spawn(async move {
            run_demo_loop(demo_state, demo_broadcast).await;
        })
    } else {
        info!("📡 Using LIVE odds feeds");
        let poller = build_poller(&state).await;
        let poll_state = state.clone();
        let poll_broadcast = broadcast_tx.clone();
        tokio::spawn(async move {
            run_poll_loop(poll_state, poller, poll_broadcast, poll_interval).await;
        })
    };

    let stats_state = state.clone();
    let stats_broadcast = broadcast_tx.clone();
    let stats_handle = tokio::spawn(async move {
        run_stats_reporter(stats_state, stats_broadcast, stats_interval).await;
    });

    info!("Press Ctrl+C to stop...");

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");

    warn!("Shutdown signal received");
    state.shutdown();

    let _ = tokio::time::timeout(Duration::from_secs(2), feed_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(1), stats_handle).await;

    let snapshot = state.stats.snapshot();
    info!("📈 Final Stats:");
    info!("  Total uptime: {} seconds", snapshot.uptime_secs);
    info!("  Polls completed: {}", snapshot.polls_completed);
    info!("  Opportunities found: {}", snapshot.opportunities_found);

    info!("👋 Surebet stopped");
}
