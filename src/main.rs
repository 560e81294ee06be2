mod api;
mod config;
mod pipeline;
mod vapi;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use config::Config;
use pipeline::advisor::Advisor;
use pipeline::openai::OpenAiClient;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared application state accessible from all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub advisor: Arc<Advisor>,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("--version") => println!("vapi-advisor {VERSION}"),
        Some("--help") | Some("-h") => print_usage(),
        Some(other) => {
            eprintln!("Unknown option: {other}");
            print_usage();
            std::process::exit(1);
        }
        None => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(server());
        }
    }
}

fn print_usage() {
    println!("vapi-advisor {VERSION}");
    println!("Vapi assistant webhook backed by an OpenAI business advisor");
    println!();
    println!("Usage: vapi-advisor [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --version   Print version");
    println!("  --help, -h  Print this help message");
    println!();
    println!("Without options, starts the webhook server.");
    println!("Configured through PORT, HOST, OPENAI_API_KEY, OPENAI_BASE_URL");
    println!("and VAPI_WEBHOOK_SECRET (a .env file is read if present).");
}

/// Build the router. Split out from `server` so tests can drive it directly.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::status::handle_root))
        .route("/api/health", get(api::status::handle_health))
        .route(
            "/api/vapi/webhook",
            post(vapi::webhook::handle_webhook)
                .layer(DefaultBodyLimit::max(vapi::webhook::MAX_BODY_BYTES)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn server() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vapi_advisor=info,tower_http=info".into()),
        )
        .init();

    let config = Config::load();

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "Starting vapi-advisor"
    );

    if config.openai.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set, every caller turn will get the apology");
    }
    if config.vapi.webhook_secret.is_none() {
        tracing::warn!("VAPI_WEBHOOK_SECRET not set, webhook accepts unauthenticated requests");
    }

    let provider = Arc::new(OpenAiClient::new(&config.openai));
    let state = AppState {
        advisor: Arc::new(Advisor::new(provider)),
        config: config.clone(),
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .expect("Invalid server address");

    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app(state)).await.expect("Server error");
}
