use anyhow::Context;
use aq_api::{AppState, create_app, loader};
use aq_core::Dashboard;
use clap::Parser;

/// Command line arguments for the dashboard server
#[derive(Parser, Debug)]
#[command(name = "aq-dashboard")]
#[command(about = "Global Air Quality Index dashboard")]
struct Args {
    /// URL of the JSON feed of station readings
    #[arg(short, long)]
    feed_url: String,

    /// Port to bind the server to
    #[arg(short, long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt().pretty().init();

    // Initial load of the feed. A failure does not abort: the dashboard
    // starts empty with the error recorded, and POST /reload is the retry.
    let client = reqwest::Client::new();
    let (dashboard, feed_error) = match loader::fetch_readings(&client, &args.feed_url).await {
        Ok(readings) => {
            tracing::info!("Loaded {} station readings from {}", readings.len(), args.feed_url);
            (Dashboard::new(readings), None)
        }
        Err(error) => {
            tracing::error!("Initial feed fetch failed: {error}");
            (
                Dashboard::default(),
                Some(loader::FEED_ERROR_MESSAGE.to_string()),
            )
        }
    };

    let state = AppState::new(args.feed_url, client, dashboard, feed_error);

    // Build our application with routes
    let app = create_app(state);

    // Run our app with hyper
    let bind_addr = format!("0.0.0.0:{}", args.port);
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {bind_addr}"))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
