mod cache;
mod config;
mod handlers;
mod metrics;
mod models;
mod rate_limit;
mod state;

use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Args;
use crate::handlers::{health_handler, metrics_handler, summarize_handler};
use crate::rate_limit::RateLimiter;
use crate::state::AppState;

// this is main async function with tokio
#[tokio::main]
async fn main() {
    // parse cli arguments
    let args = Args::parse();

    let rate_limiter = Arc::new(RateLimiter::new(
        args.rate_limit,
        Duration::from_secs(args.rate_window),
    ));

    // spawn the background sweep of expired rate limit entries
    tokio::spawn(rate_limit::sweeper(
        rate_limiter.clone(),
        Duration::from_secs(args.cleanup_interval),
    ));

    // creating shared state
    let state = Arc::new(AppState {
        client: reqwest::Client::new(),
        cache: DashMap::new(),
        ttl: Duration::from_secs(args.cache_ttl),
        upstream_url: args.upstream_url.clone(),
        model: args.model.clone(),
        api_token: args.api_token.clone(),
        upstream_timeout: Duration::from_secs(args.upstream_timeout),
        rate_limiter,
    });

    // creating the router with routes
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/summarize", post(summarize_handler)) // post route
        .route("/metrics", get(metrics_handler)) // metrics endpoint
        .with_state(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    println!("Gateway running on http://localhost:{}", args.port);
    println!("Forwarding to {} at {}", args.model, args.upstream_url);
    println!("Cache TTL: {} seconds", args.cache_ttl);
    println!(
        "Rate limit: {} requests per {} seconds",
        args.rate_limit, args.rate_window
    );
    axum::serve(listener, app).await.unwrap();
}
