use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::GenomeIndex;
use crate::cli::ServeArgs;
use crate::core::genome::Genome;
use crate::matching::engine::{MatchError, MatchingConfig, MatchingEngine};
use crate::utils::validation::{validate_query_sequence, ValidationError};

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_REQUEST_BODY_SIZE: usize = 2 * 1024 * 1024; // 2MB
pub const MAX_CONCURRENT_REQUESTS: usize = 100;
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared application state
///
/// The index is never mutated after start-up, so handlers read it concurrently.
pub struct AppState {
    pub index: GenomeIndex,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Body of `POST /api/search`
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub fragment: String,

    #[serde(flatten)]
    pub options: MatchingConfig,
}

/// Body of `POST /api/related`
#[derive(Debug, Deserialize)]
pub struct RelatedRequest {
    pub sequence: String,

    #[serde(default = "default_query_name")]
    pub name: String,

    #[serde(flatten)]
    pub options: MatchingConfig,
}

fn default_query_name() -> String {
    "query".to_string()
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None, // Never expose internal details to prevent information disclosure
    }
}

fn match_error_response(err: &MatchError) -> Response {
    let (status, error_type) = if err.is_precondition() {
        (StatusCode::BAD_REQUEST, "invalid_request")
    } else {
        (StatusCode::NOT_FOUND, "no_matches")
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            error_type: error_type.to_string(),
            details: None,
        }),
    )
        .into_response()
}

fn validation_error_response(err: &ValidationError) -> Response {
    // Point at the offending base; it comes from the client's own input
    let details = match err {
        ValidationError::InvalidBase { position, .. } => Some(format!("position {position}")),
        ValidationError::EmptySequence | ValidationError::SequenceTooLong(_) => None,
    };

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.to_string(),
            error_type: "invalid_sequence".to_string(),
            details,
        }),
    )
        .into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the genomes cannot be indexed, the tokio runtime cannot be
/// created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    // Index before starting the runtime; the index is read-only from here on
    let index = args.index.build_index(true)?;
    let state = Arc::new(AppState { index });

    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, state).await })
}

/// Create the application router with all routes and middleware configured.
///
/// Per-IP rate limiting needs the peer address and is added in
/// [`run_server`]; everything else is configured here.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/genomes", get(genomes_handler))
        .route("/api/search", post(search_handler))
        .route("/api/related", post(related_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(REQUEST_TIMEOUT_SECS),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                // Limit request body size
                .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE)),
        )
}

async fn run_server(args: ServeArgs, state: Arc<AppState>) -> anyhow::Result<()> {
    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    let app = create_router(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting genome-matcher web server at http://{addr}");
    tracing::info!("Listening on {addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/genomes"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// API endpoint listing indexed genomes
async fn genomes_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let index = &state.index;
    Json(serde_json::json!({
        "min_search_length": index.min_search_length(),
        "window_count": index.window_count(),
        "genomes": index.genomes().iter().map(|g| {
            serde_json::json!({"name": g.name(), "length": g.len()})
        }).collect::<Vec<_>>(),
    }))
}

/// API endpoint for locating a fragment
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Response {
    let start_time = Instant::now();

    let fragment = match validate_query_sequence(&request.fragment) {
        Ok(fragment) => fragment,
        Err(e) => return validation_error_response(&e),
    };

    // Long fragments over repetitive genomes can take a while; keep them off the async workers
    let worker_state = Arc::clone(&state);
    let worker_fragment = fragment.clone();
    let worker_options = request.options.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        MatchingEngine::new(&worker_state.index)
            .search_with_config(&worker_fragment, &worker_options)
    })
    .await;

    let matches = match outcome {
        Ok(Ok(matches)) => matches,
        Ok(Err(e)) => return match_error_response(&e),
        Err(e) => {
            let body = create_safe_error_response(
                "internal_error",
                "Search failed",
                Some(&e.to_string()),
            );
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }
    };

    #[allow(clippy::cast_possible_truncation)] // Processing time won't exceed u64
    let processing_time = start_time.elapsed().as_millis() as u64;

    Json(serde_json::json!({
        "fragment": fragment,
        "minimum_length": request.options.minimum_length_for(&state.index),
        "exact_match_only": request.options.exact_match_only,
        "matches": matches,
        "processing_time_ms": processing_time,
    }))
    .into_response()
}

/// API endpoint for ranking genomes related to a query sequence
async fn related_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RelatedRequest>,
) -> Response {
    let start_time = Instant::now();

    let sequence = match validate_query_sequence(&request.sequence) {
        Ok(sequence) => sequence,
        Err(e) => return validation_error_response(&e),
    };
    let query = Genome::new(request.name, sequence);
    let options = request.options;

    let worker_state = Arc::clone(&state);
    let worker_query = query.clone();
    let worker_options = options.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        MatchingEngine::new(&worker_state.index).related_with_config(&worker_query, &worker_options)
    })
    .await;

    let related = match outcome {
        Ok(Ok(related)) => related,
        Ok(Err(e)) => return match_error_response(&e),
        Err(e) => {
            let body = create_safe_error_response(
                "internal_error",
                "Comparison failed",
                Some(&e.to_string()),
            );
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }
    };

    let fragment_match_length = options.fragment_match_length_for(&state.index);

    #[allow(clippy::cast_possible_truncation)] // Processing time won't exceed u64
    let processing_time = start_time.elapsed().as_millis() as u64;

    Json(serde_json::json!({
        "query": query.name(),
        "query_length": query.len(),
        "fragment_match_length": fragment_match_length,
        "fragment_count": query.len() / fragment_match_length,
        "related": related,
        "processing_time_ms": processing_time,
    }))
    .into_response()
}
