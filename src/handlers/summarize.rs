use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tokio::time::Instant;

use crate::cache::{CacheEntry, make_cache_key};
use crate::metrics::{
    CACHE_HITS, CACHE_MISSES, CACHE_SIZE, RATE_LIMITED_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL,
    UPSTREAM_ERRORS,
};
use crate::models::{SummarizeRequest, SummarizeResponse, UpstreamParameters, UpstreamRequest, UpstreamSummary};
use crate::state::AppState;

pub enum ApiError {
    RateLimited,
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests. Please try again later.".to_string(),
            ),
            ApiError::Upstream(message) => (StatusCode::BAD_GATEWAY, message),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

// Derive the per-client rate limit key from proxy headers: first hop of
// x-forwarded-for, else x-real-ip, else a shared "unknown" bucket.
fn client_key(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    "unknown".to_string()
}

// post handler
pub async fn summarize_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    REQUEST_TOTAL.inc();

    // rate limit check comes before any other work
    let key = client_key(&headers);
    if state.rate_limiter.check_and_record(&key) {
        RATE_LIMITED_TOTAL.inc();
        return Err(ApiError::RateLimited);
    }

    let start_time = Instant::now();
    let cache_key = make_cache_key(&state.model, &payload.abstract_text);

    // check cache first
    if let Some(entry) = state.cache.get(&cache_key) {
        if entry.created_at.elapsed() < state.ttl {
            CACHE_HITS.inc();
            return Ok(Json(SummarizeResponse {
                summary: entry.summary.clone(),
            }));
        }
    }
    CACHE_MISSES.inc();

    // Call the hosted summarization model
    let upstream_req = UpstreamRequest {
        inputs: &payload.abstract_text,
        parameters: UpstreamParameters::default(),
    };

    let mut request = state
        .client
        .post(format!("{}/models/{}", state.upstream_url, state.model))
        .timeout(state.upstream_timeout)
        .json(&upstream_req);
    if let Some(token) = &state.api_token {
        request = request.bearer_auth(token);
    }

    let result = request.send().await;

    let summary = match result {
        Ok(res) if res.status().is_success() => {
            match res.json::<Vec<UpstreamSummary>>().await {
                Ok(candidates) => match candidates.into_iter().next() {
                    Some(candidate) => candidate.summary_text,
                    None => {
                        UPSTREAM_ERRORS.inc();
                        return Err(ApiError::Upstream(
                            "Model returned no summary".to_string(),
                        ));
                    }
                },
                Err(e) => {
                    UPSTREAM_ERRORS.inc();
                    return Err(ApiError::Upstream(format!("Parse error: {}", e)));
                }
            }
        }
        Ok(res) => {
            UPSTREAM_ERRORS.inc();
            return Err(ApiError::Upstream(format!(
                "Model returned status {}",
                res.status()
            )));
        }
        Err(e) => {
            UPSTREAM_ERRORS.inc();
            return Err(ApiError::Upstream(format!("Request failed: {}", e)));
        }
    };

    // saving to cache
    state.cache.insert(
        cache_key,
        CacheEntry {
            summary: summary.clone(),
            created_at: Instant::now(),
        },
    );
    CACHE_SIZE.set(state.cache.len() as f64);

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    Ok(Json(SummarizeResponse { summary }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn forwarded_for_uses_the_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("1.2.3.4, 10.0.0.1, 10.0.0.2"),
        );
        assert_eq!(client_key(&headers), "1.2.3.4");
    }

    #[test]
    fn falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("5.6.7.8"));
        assert_eq!(client_key(&headers), "5.6.7.8");
    }

    #[test]
    fn empty_forwarded_for_falls_through() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(" "));
        headers.insert("x-real-ip", HeaderValue::from_static("5.6.7.8"));
        assert_eq!(client_key(&headers), "5.6.7.8");
    }

    #[test]
    fn unresolvable_client_shares_the_unknown_bucket() {
        assert_eq!(client_key(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn rate_limited_rejection_is_429() {
        let response = ApiError::RateLimited.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
