use std::{env, io, process};

use tokio::{net::TcpListener, signal};
use tracing_subscriber::EnvFilter;

mod cache;
mod cli;
mod server;

use cli::Command;

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = match cli::parse(env::args().skip(1).collect()) {
        Ok(Command::Serve(args)) => args,
        Ok(Command::Help(usage)) => {
            println!("{usage}");
            process::exit(0);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    setup_logging();

    let cache = cache::DocumentCache::new(cache::Config {
        enabled: args.enable_cache,
        ttl: args.cache_ttl,
    });
    let router = server::router(server::AppState::new(args.events.clone(), cache));

    let listener = TcpListener::bind(args.address).await?;
    tracing::info!(
        events = %args.events.display(),
        cache = args.enable_cache,
        "listening at http://{}",
        args.address
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
