//! apexsearch — top-1 semantic search over a small in-memory corpus.

use apexsearch_core::SearchConfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use apexsearch_server::{build_router, startup};

fn print_usage() {
    println!("apexsearch — semantic search over an in-memory corpus");
    println!();
    println!("Usage: apexsearch [command]");
    println!();
    println!("Commands:");
    println!("  (none) | serve           Start the HTTP server");
    println!("  query <text...>          Run one search and print the result as JSON");
    println!("  help                     Show this help message");
    println!();
    println!("Environment:");
    println!("  HOST, PORT                       Listen address (default 0.0.0.0:8000)");
    println!("  APEXSEARCH_MODEL_DIR             Directory with model.onnx and tokenizer.json");
    println!("  APEXSEARCH_MODEL_NAME            Reported model name");
    println!("  APEXSEARCH_INTRA_THREADS         ONNX Runtime intra-op threads");
    println!("  APEXSEARCH_CORPUS_FILE           JSON array of corpus strings");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        None | Some("serve") => {}
        Some("query") => {
            if args.len() < 3 {
                eprintln!("Usage: apexsearch query <text...>");
                std::process::exit(1);
            }
            let query = args[2..].join(" ");
            let config = SearchConfig::from_env()?;
            let state = startup(config).await?;
            let hit = tokio::task::spawn_blocking(move || state.search(&query)).await??;
            println!("{}", serde_json::to_string_pretty(&hit)?);
            return Ok(());
        }
        Some("--help") | Some("-h") | Some("help") => {
            print_usage();
            return Ok(());
        }
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'apexsearch help' for usage.", other);
            std::process::exit(1);
        }
    }

    let config = SearchConfig::from_env()?;
    let addr = config.bind_addr();

    // Model load and corpus embedding must finish before the listener exists.
    let state = match startup(config).await {
        Ok(state) => state,
        Err(e) => {
            error!("Startup failed, service will not become ready: {}", e);
            return Err(e.into());
        }
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("apexsearch listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
